//! Discrete component tester firmware for Raspberry Pi Pico 2 (RP2350).
//!
//! Measures resistors and capacitors, classifies diodes, detects the
//! polarity of seven-segment displays and flashes LEDs. Verdicts go to a
//! 16x2 character LCD.
//!
//! # Button Controls
//!
//! - **7-Seg Test**: Detect common anode / common cathode, then show F
//! - **7-Seg Check**: Sweep the display through 0-F
//! - **LED**: Light the LED for two seconds
//! - **Resistor** / **Capacitor** / **Diode**: Measure the part in the clips
//! - **Reset**: Clear the verdict and show the ready banner
//!
//! On the host this binary builds as an empty stub; the measurement engines
//! live in the `component_tester` library and are exercised by the simulator.

#![cfg_attr(target_arch = "arm", no_std)]
#![cfg_attr(target_arch = "arm", no_main)]

#[cfg(target_arch = "arm")]
mod board;

#[cfg(target_arch = "arm")]
mod firmware {
    use bench_common::config::{BUSY_SCREEN_MS, LCD_I2C_ADDRESS, POLL_INTERVAL_MS};
    use bench_common::{Lcd, Screen, TextDisplay};
    use component_tester::capacitance::discharge;
    use component_tester::{ComponentTester, Outcome};
    use defmt::{debug, info, warn};
    use embassy_executor::Spawner;
    use embassy_rp::gpio::{Flex, Input, Pull};
    use embassy_rp::i2c::{self, I2c};
    use embassy_time::{Delay, Instant, Timer};
    use {defmt_rtt as _, panic_probe as _};

    use crate::board::{BenchBoard, Buttons};

    // Program metadata for `picotool info`
    #[unsafe(link_section = ".bi_entries")]
    #[used]
    pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
        embassy_rp::binary_info::rp_program_name!(c"component-tester"),
        embassy_rp::binary_info::rp_program_description!(c"Discrete component tester"),
        embassy_rp::binary_info::rp_cargo_version!(),
        embassy_rp::binary_info::rp_program_build_attribute!(),
    ];

    /// Render a screen, logging (not propagating) display errors.
    fn show<D>(
        lcd: &mut D,
        screen: &Screen,
    ) where
        D: TextDisplay,
        D::Error: defmt::Format,
    {
        if let Err(e) = lcd.show(screen) {
            warn!("LCD write failed: {}", e);
        }
    }

    fn log_outcome(outcome: &Outcome) {
        match *outcome {
            Outcome::Segment(polarity) => info!("7-segment polarity: {}", polarity),
            Outcome::SegmentSwept => info!("7-segment sweep done"),
            Outcome::LedFlashed => info!("LED flashed"),
            Outcome::Resistance(Some(ohms)) => info!("Resistance: {} Ohm", ohms),
            Outcome::Resistance(None) => info!("No resistor"),
            Outcome::Capacitance(Ok(uf)) => info!("Capacitance: {} uF", uf),
            Outcome::Capacitance(Err(e)) => warn!("Capacitance failed: {}", e),
            Outcome::Diode(reading) => info!(
                "Diode {} (forward {} V, reverse {} V)",
                reading.verdict, reading.forward_v, reading.reverse_v
            ),
        }
    }

    #[embassy_executor::main]
    async fn main(_spawner: Spawner) {
        info!("Component tester starting...");
        let p = embassy_rp::init(Default::default());

        // LCD on I2C0 (SDA=20, SCL=21)
        let i2c = I2c::new_blocking(p.I2C0, p.PIN_21, p.PIN_20, i2c::Config::default());
        let mut lcd = Lcd::new(i2c, Delay, LCD_I2C_ADDRESS);
        if let Err(e) = lcd.init() {
            warn!("LCD init failed: {}", e);
        }
        info!("LCD initialized");

        let mut bench = BenchBoard::new(
            [
                Flex::new(p.PIN_2),
                Flex::new(p.PIN_3),
                Flex::new(p.PIN_4),
                Flex::new(p.PIN_5),
                Flex::new(p.PIN_6),
                Flex::new(p.PIN_7),
                Flex::new(p.PIN_8),
                Flex::new(p.PIN_9),
                Flex::new(p.PIN_10),
            ],
            p.ADC,
            p.PIN_26,
            p.PIN_27,
            p.PIN_28,
        );

        // Start from an empty capacitor in case one was left charged
        if let Err(e) = discharge(&mut bench) {
            warn!("Startup discharge failed: {}", e);
        }

        // Buttons are active-low with internal pull-up, reset first
        let mut buttons = Buttons::new([
            Input::new(p.PIN_17, Pull::Up),
            Input::new(p.PIN_11, Pull::Up),
            Input::new(p.PIN_12, Pull::Up),
            Input::new(p.PIN_13, Pull::Up),
            Input::new(p.PIN_14, Pull::Up),
            Input::new(p.PIN_15, Pull::Up),
            Input::new(p.PIN_16, Pull::Up),
        ]);
        info!("Buttons initialized!");

        let mut tester = ComponentTester::new();
        show(&mut lcd, &ComponentTester::banner());
        info!("Main loop starting");

        loop {
            if let Some(button) = buttons.poll(Instant::now().as_millis())
                && let Some(screen) = tester.press(button)
            {
                info!("{} pressed -> {}", button, tester.phase());
                show(&mut lcd, &screen);
            }

            if let Some(job) = tester.pending() {
                // Leave the busy screen up before the bench is driven
                Timer::after_millis(BUSY_SCREEN_MS).await;
                debug!("Running {}", job);

                if let Some(outcome) = tester.run_pending(&mut bench) {
                    log_outcome(&outcome);
                    show(&mut lcd, &outcome.screen());
                }
            }

            Timer::after_millis(POLL_INTERVAL_MS).await;
        }
    }
}

#[cfg(not(target_arch = "arm"))]
fn main() {}
