//! Diode classification by forward and reverse bias.
//!
//! The diode sits between the anode sense point (fed from the supply pin
//! through a resistor) and the cathode pin. Each bias direction is held for
//! [`DIODE_SETTLE_MS`] before the anode is sampled. Verdicts, first match wins:
//!
//! | forward (V)     | reverse (V) | verdict    |
//! |-----------------|-------------|------------|
//! | 0.2 < f < 1.0   | r > 4.0     | Diode OK   |
//! | f < 0.1         | r < 0.5     | Shorted    |
//! | f > 4.0         | any         | Open Diode |
//! | otherwise       |             | Faulty     |

use bench_common::probe::ADC_FULL_SCALE;
use bench_common::screen::line_fmt;
use bench_common::{AnalogInput, Line, ProbePins};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::PinState;

use crate::bench::{BenchPin, Probe};
use crate::config::{
    DIODE_FORWARD_MAX_V, DIODE_FORWARD_MIN_V, DIODE_REVERSE_MIN_V, DIODE_SETTLE_MS, OPEN_FORWARD_MIN_V,
    SHORT_FORWARD_MAX_V, SHORT_REVERSE_MAX_V, SUPPLY_VOLTS,
};

/// Diode test verdict.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum DiodeVerdict {
    Good,
    Shorted,
    Open,
    Faulty,
}

impl DiodeVerdict {
    /// Verdict text for the LCD.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "Diode OK",
            Self::Shorted => "Shorted",
            Self::Open => "Open Diode",
            Self::Faulty => "Faulty",
        }
    }
}

/// Classify a diode from its anode voltages under forward and reverse bias.
pub fn classify_diode(
    forward_v: f32,
    reverse_v: f32,
) -> DiodeVerdict {
    if forward_v > DIODE_FORWARD_MIN_V && forward_v < DIODE_FORWARD_MAX_V && reverse_v > DIODE_REVERSE_MIN_V {
        DiodeVerdict::Good
    } else if forward_v < SHORT_FORWARD_MAX_V && reverse_v < SHORT_REVERSE_MAX_V {
        DiodeVerdict::Shorted
    } else if forward_v > OPEN_FORWARD_MIN_V {
        DiodeVerdict::Open
    } else {
        DiodeVerdict::Faulty
    }
}

/// Convert a 10-bit reading to volts.
#[inline]
pub fn raw_to_volts(raw: u16) -> f32 { f32::from(raw) * SUPPLY_VOLTS / f32::from(ADC_FULL_SCALE) }

/// Both bias readings and the resulting verdict.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct DiodeReading {
    pub forward_v: f32,
    pub reverse_v: f32,
    pub verdict: DiodeVerdict,
}

impl DiodeReading {
    pub fn new(
        forward_v: f32,
        reverse_v: f32,
    ) -> Self {
        Self {
            forward_v,
            reverse_v,
            verdict: classify_diode(forward_v, reverse_v),
        }
    }

    /// Both voltages on one LCD line, e.g. `F=0.62V R=4.60V`.
    pub fn voltages_line(&self) -> Line { line_fmt(format_args!("F={:.2}V R={:.2}V", self.forward_v, self.reverse_v)) }
}

/// Bias the diode both ways, sample the anode each time and release the
/// bias pins.
pub fn measure_diode<B>(bench: &mut B) -> DiodeReading
where
    B: ProbePins<Pin = BenchPin> + AnalogInput<Channel = Probe> + DelayNs,
{
    bench.drive(BenchPin::DiodeCathode, PinState::Low);
    bench.drive(BenchPin::DiodeSupply, PinState::High);
    bench.delay_ms(DIODE_SETTLE_MS);
    let forward_v = raw_to_volts(bench.read_raw(Probe::DiodeAnode));

    bench.drive(BenchPin::DiodeCathode, PinState::High);
    bench.drive(BenchPin::DiodeSupply, PinState::Low);
    bench.delay_ms(DIODE_SETTLE_MS);
    let reverse_v = raw_to_volts(bench.read_raw(Probe::DiodeAnode));

    bench.release(BenchPin::DiodeCathode);
    bench.release(BenchPin::DiodeSupply);
    DiodeReading::new(forward_v, reverse_v)
}

// =============================================================================
// Unit Tests
// =============================================================================
