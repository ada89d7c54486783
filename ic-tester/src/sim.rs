//! Simulated IC socket for host tests and the desktop simulator.
//!
//! Models a 74-series package on the 14-pin socket:
//!
//! - Gate outputs are computed from the levels driven on their inputs.
//!   Undriven TTL inputs float HIGH.
//! - Pins that are not package outputs read LOW when sampled, as the
//!   socket inputs are pulled down on the board.
//! - Individual gates can be broken to model faults: an inverted output,
//!   or an output stuck HIGH or LOW regardless of its inputs.
//!
//! Time is virtual: it only advances through [`DelayNs`].

use bench_common::ProbePins;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::PinState::{self, High, Low};

use crate::family::IcFamily;
use crate::layout::{HEX_INVERTERS, gates};

/// A chip placed in the socket.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ChipModel {
    pub family: IcFamily,
    /// Bit `n` set: gate `n` (0-based) has an inverted output.
    pub inverted_gates: u8,
    /// Bit `n` set: output of gate `n` is stuck HIGH.
    pub stuck_high: u8,
    /// Bit `n` set: output of gate `n` is stuck LOW.
    pub stuck_low: u8,
}

/// Gates and inverter channels in one package never exceed six.
const MAX_GATES: u8 = 6;

impl ChipModel {
    /// A fully working chip.
    pub const fn healthy(family: IcFamily) -> Self {
        Self {
            family,
            inverted_gates: 0,
            stuck_high: 0,
            stuck_low: 0,
        }
    }

    /// Break gate `gate` (0-based) by inverting its output.
    pub const fn with_inverted_gate(
        mut self,
        gate: u8,
    ) -> Self {
        debug_assert!(gate < MAX_GATES);
        self.inverted_gates |= 1 << gate;
        self
    }

    /// Break gate `gate` (0-based) by pinning its output to `level`.
    pub const fn with_stuck_output(
        mut self,
        gate: u8,
        level: PinState,
    ) -> Self {
        debug_assert!(gate < MAX_GATES);
        match level {
            High => self.stuck_high |= 1 << gate,
            Low => self.stuck_low |= 1 << gate,
        }
        self
    }

    /// Output level of `pin` if it is an output of this package.
    fn output_level(
        &self,
        pin: u8,
        driven: &[Option<PinState>; 15],
    ) -> Option<PinState> {
        let input = |p: u8| driven[usize::from(p)].unwrap_or(High);

        let (gate, level) = if self.family == IcFamily::Inverter {
            let idx = HEX_INVERTERS.iter().position(|c| c.output == pin)?;
            (idx, !input(HEX_INVERTERS[idx].input))
        } else {
            let idx = gates(self.family).iter().position(|g| g.output == pin)?;
            let g = gates(self.family)[idx];
            let table = self.family.truth_table()?;
            (idx, table.output_for([input(g.inputs[0]), input(g.inputs[1])]))
        };

        let mask = 1u8 << gate;
        if self.stuck_high & mask != 0 {
            Some(High)
        } else if self.stuck_low & mask != 0 {
            Some(Low)
        } else if self.inverted_gates & mask != 0 {
            Some(!level)
        } else {
            Some(level)
        }
    }
}

/// Socket with an optional chip and a virtual clock.
#[derive(Clone, Debug)]
pub struct SimulatedSocket {
    chip: Option<ChipModel>,
    /// Indexed by socket pin number (index 0 unused).
    driven: [Option<PinState>; 15],
    elapsed_ns: u64,
    settled: bool,
    unsettled_samples: u32,
}

impl SimulatedSocket {
    /// Socket holding `chip` (or empty).
    pub const fn new(chip: Option<ChipModel>) -> Self {
        Self {
            chip,
            driven: [None; 15],
            elapsed_ns: 0,
            settled: true,
            unsettled_samples: 0,
        }
    }

    /// Swap the chip in the socket.
    pub fn insert(
        &mut self,
        chip: Option<ChipModel>,
    ) {
        self.chip = chip;
    }

    /// Whether `pin` is currently an output.
    pub fn is_driven(
        &self,
        pin: u8,
    ) -> bool {
        self.driven.get(usize::from(pin)).is_some_and(Option::is_some)
    }

    /// Samples taken without any delay since the last stimulus change.
    #[inline]
    pub const fn unsettled_samples(&self) -> u32 { self.unsettled_samples }

    /// Virtual time in milliseconds.
    #[inline]
    pub const fn now_ms(&self) -> u64 { self.elapsed_ns / 1_000_000 }

    fn level(
        &self,
        pin: u8,
    ) -> PinState {
        if let Some(level) = self.chip.and_then(|chip| chip.output_level(pin, &self.driven)) {
            return level;
        }
        self.driven.get(usize::from(pin)).copied().flatten().unwrap_or(Low)
    }
}

impl ProbePins for SimulatedSocket {
    type Pin = u8;

    fn drive(
        &mut self,
        pin: u8,
        level: PinState,
    ) {
        if let Some(slot) = self.driven.get_mut(usize::from(pin)) {
            *slot = Some(level);
            self.settled = false;
        }
    }

    fn sample(
        &mut self,
        pin: u8,
    ) -> PinState {
        self.release(pin);
        if !self.settled {
            self.unsettled_samples += 1;
        }
        self.level(pin)
    }

    fn sense(
        &mut self,
        pin: u8,
    ) -> PinState {
        self.level(pin)
    }

    fn release(
        &mut self,
        pin: u8,
    ) {
        if let Some(slot) = self.driven.get_mut(usize::from(pin)) {
            *slot = None;
        }
    }
}

impl DelayNs for SimulatedSocket {
    fn delay_ns(
        &mut self,
        ns: u32,
    ) {
        self.elapsed_ns += u64::from(ns);
        if ns > 0 {
            self.settled = true;
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nand_gate_follows_inputs() {
        let mut socket = SimulatedSocket::new(Some(ChipModel::healthy(IcFamily::Nand)));
        socket.drive(1, High);
        socket.drive(2, High);
        assert_eq!(socket.sense(3), Low);
        socket.drive(2, Low);
        assert_eq!(socket.sense(3), High);
    }

    #[test]
    fn test_floating_inputs_read_high_to_the_gate() {
        // AND with both inputs floating outputs HIGH
        let mut socket = SimulatedSocket::new(Some(ChipModel::healthy(IcFamily::And)));
        assert_eq!(socket.sample(6), High);
    }

    #[test]
    fn test_non_output_pins_read_low() {
        let mut socket = SimulatedSocket::new(Some(ChipModel::healthy(IcFamily::Nor)));
        assert_eq!(socket.sample(3), Low);
        let mut empty = SimulatedSocket::new(None);
        assert_eq!(empty.sample(3), Low);
    }

    #[test]
    fn test_sample_releases_pin() {
        let mut socket = SimulatedSocket::new(None);
        socket.drive(5, High);
        assert!(socket.is_driven(5));
        assert_eq!(socket.sense(5), High);
        // Released pin falls back to the pull-down level
        assert_eq!(socket.sample(5), Low);
        assert!(!socket.is_driven(5));
    }

    #[test]
    fn test_inverted_gate() {
        let mut socket = SimulatedSocket::new(Some(ChipModel::healthy(IcFamily::Inverter).with_inverted_gate(3)));
        socket.drive(9, High);
        // Channel 4 (9 -> 8) is broken
        assert_eq!(socket.sense(8), High);
        socket.drive(1, High);
        assert_eq!(socket.sense(2), Low);
    }

    #[test]
    fn test_stuck_outputs_ignore_inputs() {
        let chip = ChipModel::healthy(IcFamily::Inverter)
            .with_stuck_output(2, High)
            .with_stuck_output(5, Low);
        let mut socket = SimulatedSocket::new(Some(chip));
        for level in [Low, High] {
            socket.drive(5, level);
            socket.drive(13, level);
            assert_eq!(socket.sense(6), High);
            assert_eq!(socket.sense(12), Low);
        }
        // Neighbouring channel unaffected
        socket.drive(3, High);
        assert_eq!(socket.sense(4), Low);
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn test_gate_index_past_package_rejected() {
        let _ = ChipModel::healthy(IcFamily::Inverter).with_inverted_gate(8);
    }

    #[test]
    fn test_settle_tracking() {
        let mut socket = SimulatedSocket::new(None);
        socket.drive(1, High);
        socket.sample(3);
        assert_eq!(socket.unsettled_samples(), 1);
        socket.drive(1, Low);
        socket.delay_ms(1);
        socket.sample(3);
        assert_eq!(socket.unsettled_samples(), 1);
        assert_eq!(socket.now_ms(), 1);
    }

    #[test]
    fn test_out_of_range_pins_ignored() {
        let mut socket = SimulatedSocket::new(None);
        socket.drive(40, High);
        assert!(!socket.is_driven(40));
        assert_eq!(socket.sample(40), Low);
    }
}
