//! Hardware seams used by the test engines.
//!
//! The engines never touch a HAL directly. Firmware boards implement these
//! traits over `embassy_rp` GPIO/ADC, the simulator implements them over
//! models of the parts under test.
//!
//! Pin direction is chosen per test phase: [`ProbePins::drive`] makes a pin an
//! output, [`ProbePins::sample`] makes it an input. Settling delays come from
//! [`embedded_hal::delay::DelayNs`], which every bench also implements.

use embedded_hal::digital::PinState;

/// Digital pins whose direction is reconfigured between test phases.
pub trait ProbePins {
    /// Pin identifier (socket pin number, bench pin role, ...).
    type Pin: Copy;

    /// Configure `pin` as an output and drive `level`.
    fn drive(
        &mut self,
        pin: Self::Pin,
        level: PinState,
    );

    /// Configure `pin` as an input and read it.
    fn sample(
        &mut self,
        pin: Self::Pin,
    ) -> PinState;

    /// Read the pad level of `pin` without changing its direction.
    fn sense(
        &mut self,
        pin: Self::Pin,
    ) -> PinState;

    /// Return `pin` to a high-impedance input.
    fn release(
        &mut self,
        pin: Self::Pin,
    );
}

/// 10-bit analog inputs (0..=[`ADC_FULL_SCALE`]).
pub trait AnalogInput {
    /// Analog channel identifier.
    type Channel: Copy;

    /// Take one raw sample from `channel`.
    fn read_raw(
        &mut self,
        channel: Self::Channel,
    ) -> u16;
}

/// Monotonic millisecond clock used for timing measurements.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed epoch.
    fn now_ms(&self) -> u64;
}

/// Full-scale value of a 10-bit analog reading.
pub const ADC_FULL_SCALE: u16 = 1023;

/// Scale a 12-bit converter reading down to the 10-bit range used by the
/// measurement formulas.
#[inline]
pub const fn to_10_bit(raw_12: u16) -> u16 {
    let raw = raw_12 >> 2;
    if raw > ADC_FULL_SCALE { ADC_FULL_SCALE } else { raw }
}
