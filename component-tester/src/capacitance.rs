//! Capacitance measurement by RC charge time.
//!
//! The capacitor charges through [`RC_REF_OHMS`] from a GPIO. The time to
//! reach one time constant ([`RC_THRESHOLD_RAW`]) gives `C = t / R`.
//! Afterwards the capacitor is always dumped through the discharge pin, so
//! the next measurement starts from an empty part.
//!
//! Both waits are bounded: an empty socket never reaches the threshold and a
//! faulty discharge path never reaches zero.

use core::fmt;

use bench_common::Line;
use bench_common::screen::line_fmt;
use embedded_hal::digital::PinState;

use crate::bench::{Bench, BenchPin, Probe};
use crate::config::{CHARGE_TIMEOUT_MS, DISCHARGE_TIMEOUT_MS, RC_REF_OHMS, RC_THRESHOLD_RAW};

/// Why a capacitance measurement produced no value.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum MeasureError {
    /// Threshold not reached within [`CHARGE_TIMEOUT_MS`].
    NoCapacitor,
    /// Sense point still above zero after [`DISCHARGE_TIMEOUT_MS`].
    DischargeTimeout,
}

impl MeasureError {
    /// Verdict text for the LCD.
    pub const fn label(self) -> &'static str {
        match self {
            Self::NoCapacitor => "No Capacitor",
            Self::DischargeTimeout => "Discharge Fail",
        }
    }
}

impl fmt::Display for MeasureError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Capacitance in microfarads for a charge time to one time constant.
#[inline]
pub fn capacitance_uf(
    elapsed_ms: u64,
    ref_ohms: f32,
) -> f32 {
    elapsed_ms as f32 / ref_ohms * 1000.0
}

/// Display line for a measured value.
pub fn format_microfarads(uf: f32) -> Line { line_fmt(format_args!("C={uf:.2} uF")) }

/// Poll the capacitor channel until `done` accepts a reading.
/// Returns the elapsed milliseconds, or `None` after `timeout_ms`.
fn poll_until<B, F>(
    bench: &mut B,
    timeout_ms: u64,
    mut done: F,
) -> Option<u64>
where
    B: Bench,
    F: FnMut(u16) -> bool,
{
    let start = bench.now_ms();
    loop {
        let raw = bench.read_raw(Probe::Capacitor);
        let elapsed = bench.now_ms().saturating_sub(start);
        if done(raw) {
            return Some(elapsed);
        }
        if elapsed >= timeout_ms {
            return None;
        }
    }
}

/// Empty the capacitor: charge pin LOW, discharge pin LOW until the sense
/// point reads zero, then release the discharge pin.
pub fn discharge<B: Bench>(bench: &mut B) -> Result<(), MeasureError> {
    bench.drive(BenchPin::Charge, PinState::Low);
    bench.drive(BenchPin::Discharge, PinState::Low);
    let emptied = poll_until(bench, DISCHARGE_TIMEOUT_MS, |raw| raw == 0);
    bench.release(BenchPin::Discharge);
    emptied.map(|_| ()).ok_or(MeasureError::DischargeTimeout)
}

/// Measure the capacitor in microfarads.
///
/// The discharge step runs even when charging timed out. A discharge
/// failure takes precedence over the charge result, since the part may
/// still hold charge.
pub fn measure_capacitance<B: Bench>(bench: &mut B) -> Result<f32, MeasureError> {
    bench.release(BenchPin::Discharge);
    bench.drive(BenchPin::Charge, PinState::High);
    let charge_ms = poll_until(bench, CHARGE_TIMEOUT_MS, |raw| raw >= RC_THRESHOLD_RAW);

    discharge(bench)?;
    charge_ms.map(|ms| capacitance_uf(ms, RC_REF_OHMS)).ok_or(MeasureError::NoCapacitor)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use bench_common::{AnalogInput, Clock};

    use super::*;
    use crate::sim::{Part, SimulatedBench};

    fn assert_close(
        actual: f32,
        expected: f32,
        tolerance: f32,
    ) {
        assert!((actual - expected).abs() <= tolerance, "expected {expected} +/- {tolerance}, got {actual}");
    }

    #[test]
    fn test_formula() {
        assert_close(capacitance_uf(10_000, 10_000.0), 1000.0, 0.001);
        assert_close(capacitance_uf(1_000, 10_000.0), 100.0, 0.001);
        assert_eq!(capacitance_uf(0, 10_000.0), 0.0);
    }

    #[test]
    fn test_measures_100_uf() {
        let mut bench = SimulatedBench::new(Part::Capacitor { microfarads: 100.0 });
        let uf = measure_capacitance(&mut bench).unwrap();
        assert_close(uf, 100.0, 2.0);
    }

    #[test]
    fn test_measures_470_uf() {
        let mut bench = SimulatedBench::new(Part::Capacitor { microfarads: 470.0 });
        let uf = measure_capacitance(&mut bench).unwrap();
        assert_close(uf, 470.0, 9.0);
    }

    #[test]
    fn test_capacitor_discharged_after_measurement() {
        let mut bench = SimulatedBench::new(Part::Capacitor { microfarads: 220.0 });
        measure_capacitance(&mut bench).unwrap();
        assert_eq!(bench.read_raw(Probe::Capacitor), 0);
        assert!(!bench.is_driven(BenchPin::Discharge));
        assert_eq!(bench.driven(BenchPin::Charge), Some(PinState::Low));
    }

    #[test]
    fn test_repeat_measurements_agree() {
        let mut bench = SimulatedBench::new(Part::Capacitor { microfarads: 100.0 });
        let first = measure_capacitance(&mut bench).unwrap();
        let second = measure_capacitance(&mut bench).unwrap();
        assert_close(first, second, 0.5);
    }

    #[test]
    fn test_empty_socket_times_out() {
        let mut bench = SimulatedBench::new(Part::Empty);
        let start = bench.now_ms();
        assert_eq!(measure_capacitance(&mut bench), Err(MeasureError::NoCapacitor));
        assert!(bench.now_ms() - start >= CHARGE_TIMEOUT_MS);
        // Discharge still ran
        assert!(!bench.is_driven(BenchPin::Discharge));
        assert_eq!(bench.driven(BenchPin::Charge), Some(PinState::Low));
    }

    #[test]
    fn test_stuck_node_reports_discharge_failure() {
        let mut bench = SimulatedBench::new(Part::StuckNode { volts: 4.0 });
        assert_eq!(measure_capacitance(&mut bench), Err(MeasureError::DischargeTimeout));
        assert!(!bench.is_driven(BenchPin::Discharge));
    }

    #[test]
    fn test_discharge_failure_wins_over_charge_timeout() {
        let mut bench = SimulatedBench::new(Part::StuckNode { volts: 1.0 });
        assert_eq!(measure_capacitance(&mut bench), Err(MeasureError::DischargeTimeout));
    }

    #[test]
    fn test_labels() {
        assert_eq!(MeasureError::NoCapacitor.to_string(), "No Capacitor");
        assert_eq!(MeasureError::DischargeTimeout.to_string(), "Discharge Fail");
        assert_eq!(format_microfarads(1000.0).as_str(), "C=1000.00 uF");
    }
}
