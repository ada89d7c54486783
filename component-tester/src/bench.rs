//! Pin roles and analog channels of the component bench.
//!
//! Engines address the bench by role, never by GPIO number; the firmware
//! `board` module owns the mapping to actual pads.

use bench_common::{AnalogInput, Clock, ProbePins};
use embedded_hal::delay::DelayNs;

/// Digital pins of the bench, by role.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum BenchPin {
    /// BCD decoder input, bit 0.
    DecoderA,
    /// BCD decoder input, bit 1.
    DecoderB,
    /// BCD decoder input, bit 2.
    DecoderC,
    /// BCD decoder input, bit 3.
    DecoderD,
    /// LED under test (through its series resistor).
    Led,
    /// Charges the capacitor under test through the RC reference resistor.
    Charge,
    /// Dumps the capacitor under test through a small resistor.
    Discharge,
    /// Diode cathode.
    DiodeCathode,
    /// Diode supply, feeding the anode through a resistor.
    DiodeSupply,
}

impl BenchPin {
    /// Number of pin roles.
    pub const COUNT: usize = 9;

    /// Every role, in declaration order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::DecoderA,
        Self::DecoderB,
        Self::DecoderC,
        Self::DecoderD,
        Self::Led,
        Self::Charge,
        Self::Discharge,
        Self::DiodeCathode,
        Self::DiodeSupply,
    ];

    /// Dense index, for role-indexed tables.
    #[inline]
    pub const fn index(self) -> usize { self as usize }
}

/// Analog sense points of the bench.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum Probe {
    /// Midpoint of the resistor divider.
    Resistor,
    /// Top of the capacitor under test.
    Capacitor,
    /// Diode anode.
    DiodeAnode,
}

/// Everything a measurement needs: role-addressed pins, the analog channels,
/// a millisecond clock and blocking settling delays.
pub trait Bench: ProbePins<Pin = BenchPin> + AnalogInput<Channel = Probe> + Clock + DelayNs {}

impl<T> Bench for T where T: ProbePins<Pin = BenchPin> + AnalogInput<Channel = Probe> + Clock + DelayNs {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_table_order() {
        for (i, pin) in BenchPin::ALL.iter().enumerate() {
            assert_eq!(pin.index(), i);
        }
    }
}
