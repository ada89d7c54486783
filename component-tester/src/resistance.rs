//! Resistance measurement through a voltage divider.
//!
//! The unknown resistor R2 sits between the supply and the sense point, the
//! reference R1 ([`DIVIDER_REF_OHMS`]) between the sense point and ground:
//!
//! ```text
//! Vout = raw * Vin / 1023
//! R2   = R1 * (Vin / Vout - 1)
//! ```
//!
//! A raw reading of zero means nothing is in the clips. It is reported as
//! "no resistor", never as zero ohms.

use bench_common::probe::ADC_FULL_SCALE;
use bench_common::screen::line_fmt;
use bench_common::{AnalogInput, Line};

use crate::bench::Probe;
use crate::config::{DIVIDER_REF_OHMS, SUPPLY_VOLTS};

/// Verdict text when the divider reads zero.
pub const NO_RESISTOR_TEXT: &str = "No Resistor";

/// Resistance in ohms for a raw divider reading, `None` if nothing is connected.
pub fn resistance_from_raw(raw: u16) -> Option<f32> {
    if raw == 0 {
        return None;
    }
    let vout = f32::from(raw) * SUPPLY_VOLTS / f32::from(ADC_FULL_SCALE);
    Some(DIVIDER_REF_OHMS * (SUPPLY_VOLTS / vout - 1.0))
}

/// Take one divider sample and convert it.
pub fn measure_resistance<A>(adc: &mut A) -> Option<f32>
where
    A: AnalogInput<Channel = Probe>,
{
    resistance_from_raw(adc.read_raw(Probe::Resistor))
}

/// Display line for a measured value, scaled to Ohm, kOhm or MOhm.
pub fn format_ohms(ohms: f32) -> Line {
    if ohms >= 1_000_000.0 {
        line_fmt(format_args!("R={:.2} MOhm", ohms / 1_000_000.0))
    } else if ohms >= 1000.0 {
        line_fmt(format_args!("R={:.2} kOhm", ohms / 1000.0))
    } else {
        line_fmt(format_args!("R={:.1} Ohm", ohms))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
