//! Seven-segment display test through a BCD-to-7-segment decoder.
//!
//! The display's common pin loads the decoder inputs: with all four inputs
//! driven HIGH, a common-anode module pulls every pad LOW, a common-cathode
//! module leaves them HIGH.

use bench_common::ProbePins;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::PinState;

use crate::bench::BenchPin;
use crate::config::{SEGMENT_SETTLE_MS, SEGMENT_STEP_MS};

/// Decoder inputs, bit 0 first.
pub const DECODER_PINS: [BenchPin; 4] = [BenchPin::DecoderA, BenchPin::DecoderB, BenchPin::DecoderC, BenchPin::DecoderD];

/// Digit left on the display after polarity detection.
pub const TEST_DIGIT: u8 = 0xF;

/// Common pin polarity of the display module.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum Polarity {
    CommonAnode,
    CommonCathode,
}

impl Polarity {
    /// Verdict text for the LCD.
    pub const fn label(self) -> &'static str {
        match self {
            Self::CommonAnode => "Common Anode",
            Self::CommonCathode => "Common Cathode",
        }
    }
}

/// Put the low nibble of `digit` on the decoder inputs.
pub fn show_hex<P>(
    pins: &mut P,
    digit: u8,
) where
    P: ProbePins<Pin = BenchPin>,
{
    for (bit, pin) in DECODER_PINS.iter().enumerate() {
        pins.drive(*pin, PinState::from((digit >> bit) & 1 == 1));
    }
}

/// Drive all decoder inputs HIGH and read the pads back in place.
/// Common anode iff every pad reads LOW.
pub fn detect_polarity<B>(bench: &mut B) -> Polarity
where
    B: ProbePins<Pin = BenchPin> + DelayNs,
{
    for pin in DECODER_PINS {
        bench.drive(pin, PinState::High);
    }
    bench.delay_ms(SEGMENT_SETTLE_MS);

    let any_high = DECODER_PINS.iter().any(|&pin| bench.sense(pin) == PinState::High);
    if any_high { Polarity::CommonCathode } else { Polarity::CommonAnode }
}

/// Detect the polarity, then leave [`TEST_DIGIT`] on the display.
pub fn test_display<B>(bench: &mut B) -> Polarity
where
    B: ProbePins<Pin = BenchPin> + DelayNs,
{
    let polarity = detect_polarity(bench);
    show_hex(bench, TEST_DIGIT);
    polarity
}

/// Show every digit 0..=F for [`SEGMENT_STEP_MS`] each.
pub fn sweep_digits<B>(bench: &mut B)
where
    B: ProbePins<Pin = BenchPin> + DelayNs,
{
    for digit in 0..=0xF {
        show_hex(bench, digit);
        bench.delay_ms(SEGMENT_STEP_MS);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Part, SimulatedBench};

    #[test]
    fn test_show_hex_bits() {
        let mut bench = SimulatedBench::new(Part::Empty);
        show_hex(&mut bench, 0b1010);
        assert_eq!(bench.driven(BenchPin::DecoderA), Some(PinState::Low));
        assert_eq!(bench.driven(BenchPin::DecoderB), Some(PinState::High));
        assert_eq!(bench.driven(BenchPin::DecoderC), Some(PinState::Low));
        assert_eq!(bench.driven(BenchPin::DecoderD), Some(PinState::High));
        assert_eq!(bench.displayed_digit(), Some(0xA));
    }

    #[test]
    fn test_show_hex_ignores_high_nibble() {
        let mut bench = SimulatedBench::new(Part::Empty);
        show_hex(&mut bench, 0x35);
        assert_eq!(bench.displayed_digit(), Some(0x5));
    }

    #[test]
    fn test_detects_common_anode() {
        let mut bench = SimulatedBench::new(Part::SevenSegment(Polarity::CommonAnode));
        assert_eq!(test_display(&mut bench), Polarity::CommonAnode);
        assert_eq!(bench.displayed_digit(), Some(0xF));
    }

    #[test]
    fn test_detects_common_cathode() {
        let mut bench = SimulatedBench::new(Part::SevenSegment(Polarity::CommonCathode));
        assert_eq!(test_display(&mut bench), Polarity::CommonCathode);
    }

    #[test]
    fn test_unloaded_pads_read_as_cathode() {
        let mut bench = SimulatedBench::new(Part::Empty);
        assert_eq!(detect_polarity(&mut bench), Polarity::CommonCathode);
    }

    #[test]
    fn test_detection_waits_for_settle() {
        let mut bench = SimulatedBench::new(Part::SevenSegment(Polarity::CommonAnode));
        detect_polarity(&mut bench);
        assert_eq!(bench.elapsed_ns(), u64::from(SEGMENT_SETTLE_MS) * 1_000_000);
    }

    #[test]
    fn test_sweep_shows_every_digit() {
        let mut bench = SimulatedBench::new(Part::SevenSegment(Polarity::CommonCathode));
        sweep_digits(&mut bench);
        assert_eq!(bench.digits_seen(), 0xFFFF);
        assert_eq!(bench.displayed_digit(), Some(0xF));
        assert_eq!(bench.elapsed_ns(), 16 * u64::from(SEGMENT_STEP_MS) * 1_000_000);
    }
}
