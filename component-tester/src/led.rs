//! LED test: light the LED under test and let the operator judge it.

use bench_common::ProbePins;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::PinState;

use crate::bench::BenchPin;
use crate::config::LED_ON_MS;

/// Light the LED for [`LED_ON_MS`], then switch it off.
pub fn flash_led<B>(bench: &mut B)
where
    B: ProbePins<Pin = BenchPin> + DelayNs,
{
    bench.drive(BenchPin::Led, PinState::High);
    bench.delay_ms(LED_ON_MS);
    bench.drive(BenchPin::Led, PinState::Low);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Part, SimulatedBench};

    #[test]
    fn test_led_lit_for_on_time_then_off() {
        let mut bench = SimulatedBench::new(Part::Led);
        flash_led(&mut bench);
        assert_eq!(bench.led_lit_ms(), u64::from(LED_ON_MS));
        assert_eq!(bench.driven(BenchPin::Led), Some(PinState::Low));
    }

    #[test]
    fn test_no_led_never_lights() {
        let mut bench = SimulatedBench::new(Part::Empty);
        flash_led(&mut bench);
        assert_eq!(bench.led_lit_ms(), 0);
    }
}
