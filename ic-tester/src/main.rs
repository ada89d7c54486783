//! 74-series logic IC tester firmware for Raspberry Pi Pico 2 (RP2350).
//!
//! Identifies the chip in a 14-pin DIP socket by stimulus/response and
//! checks each of its gates. Verdicts go to a 16x2 character LCD.
//!
//! # Button Controls
//!
//! - **Test**: Classify the chip (NAND, AND, OR, XOR, NOR, inverter)
//! - **Pin Check**: Check every gate of the last classified chip
//! - **Reset**: Clear the verdict and show the ready banner
//!
//! On the host this binary builds as an empty stub so the workspace can be
//! built and tested without the ARM toolchain; the logic lives in the
//! `ic_tester` library and is exercised by the simulator.

#![cfg_attr(target_arch = "arm", no_std)]
#![cfg_attr(target_arch = "arm", no_main)]

#[cfg(target_arch = "arm")]
mod board;

#[cfg(target_arch = "arm")]
mod firmware {
    use bench_common::config::{BUSY_SCREEN_MS, LCD_I2C_ADDRESS, POLL_INTERVAL_MS};
    use bench_common::{Lcd, Screen, TextDisplay};
    use defmt::{Debug2Format, debug, info, warn};
    use embassy_executor::Spawner;
    use embassy_rp::gpio::{Flex, Input, Pull};
    use embassy_rp::i2c::{self, I2c};
    use embassy_time::{Delay, Instant, Timer};
    use ic_tester::{IcTester, Outcome};
    use {defmt_rtt as _, panic_probe as _};

    use crate::board::{Buttons, SocketPins};

    // Program metadata for `picotool info`
    #[unsafe(link_section = ".bi_entries")]
    #[used]
    pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
        embassy_rp::binary_info::rp_program_name!(c"ic-tester"),
        embassy_rp::binary_info::rp_program_description!(c"74-series logic IC tester"),
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

    #[embassy_executor::main]
    async fn main(_spawner: Spawner) {
        info!("IC tester starting...");
        let p = embassy_rp::init(Default::default());

        // LCD on I2C0 (SDA=20, SCL=21)
        let i2c = I2c::new_blocking(p.I2C0, p.PIN_21, p.PIN_20, i2c::Config::default());
        let mut lcd = Lcd::new(i2c, Delay, LCD_I2C_ADDRESS);
        if let Err(e) = lcd.init() {
            warn!("LCD init failed: {}", e);
        }
        info!("LCD initialized");

        let mut socket = SocketPins::new([
            Flex::new(p.PIN_2),
            Flex::new(p.PIN_3),
            Flex::new(p.PIN_4),
            Flex::new(p.PIN_5),
            Flex::new(p.PIN_6),
            Flex::new(p.PIN_7),
            Flex::new(p.PIN_8),
            Flex::new(p.PIN_9),
            Flex::new(p.PIN_10),
            Flex::new(p.PIN_11),
            Flex::new(p.PIN_12),
            Flex::new(p.PIN_13),
        ]);

        // Buttons are active-low with internal pull-up
        let mut buttons = Buttons::new(
            Input::new(p.PIN_14, Pull::Up),
            Input::new(p.PIN_15, Pull::Up),
            Input::new(p.PIN_16, Pull::Up),
        );
        info!("Buttons initialized!");

        let mut tester = IcTester::new();
        show(&mut lcd, &IcTester::banner());
        info!("Main loop starting");

        loop {
            if let Some(button) = buttons.poll(Instant::now().as_millis())
                && let Some(screen) = tester.press(button)
            {
                info!("{} pressed -> {}", button, tester.phase());
                show(&mut lcd, &screen);
            }

            if let Some(job) = tester.pending() {
                // Leave the busy screen up before the socket is driven
                Timer::after_millis(BUSY_SCREEN_MS).await;
                debug!("Running {}", job);

                if let Some(outcome) = tester.run_pending(&mut socket) {
                    match &outcome {
                        Outcome::Classified(report) => info!(
                            "Detected {} (quad {}, nor {}, inverter {})",
                            report.detection,
                            Debug2Format(&report.quad_response),
                            Debug2Format(&report.nor_response),
                            report.inverter_ok
                        ),
                        Outcome::PinsChecked(family, verdict) => info!("Pin check {}: {}", family, verdict),
                    }
                    show(&mut lcd, &outcome.screen());
                }
            }

            Timer::after_millis(POLL_INTERVAL_MS).await;
        }
    }
}

#[cfg(not(target_arch = "arm"))]
fn main() {}
