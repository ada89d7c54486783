//! Board wiring for the IC tester (Raspberry Pi Pico 2).
//!
//! Pin mapping:
//! - Socket pins 1-6: GPIO2-GPIO7
//! - Socket pins 8-13: GPIO8-GPIO13
//! - Socket pin 7 (GND) and 14 (VCC): hard-wired
//! - Released socket pins keep the internal pull-down, so an empty socket
//!   or a pin that is not a package output reads LOW
//! - Buttons (active-low, internal pull-up): Test GPIO14, Pin Check GPIO15, Reset GPIO16
//! - LCD backpack: I2C0, SDA GPIO20, SCL GPIO21

use bench_common::{ButtonState, ProbePins};
use defmt::warn;
use embassy_rp::gpio::{Flex, Input, Level, Pull};
use embassy_time::Delay;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::PinState;
use ic_tester::Button;

/// Socket signal pins, each on a GPIO whose direction changes per test phase.
pub struct SocketPins {
    /// Socket pins 1-6 then 8-13.
    pins: [Flex<'static>; 12],
    delay: Delay,
}

impl SocketPins {
    /// Take the socket GPIOs and park them as pulled-down inputs.
    pub fn new(mut pins: [Flex<'static>; 12]) -> Self {
        for pin in &mut pins {
            pin.set_pull(Pull::Down);
            pin.set_as_input();
        }
        Self { pins, delay: Delay }
    }

    fn flex(
        &mut self,
        pin: u8,
    ) -> Option<&mut Flex<'static>> {
        let slot = match pin {
            1..=6 => usize::from(pin - 1),
            8..=13 => usize::from(pin - 2),
            _ => {
                warn!("Socket pin {} has no GPIO", pin);
                return None;
            },
        };
        self.pins.get_mut(slot)
    }
}

impl ProbePins for SocketPins {
    type Pin = u8;

    fn drive(
        &mut self,
        pin: u8,
        level: PinState,
    ) {
        if let Some(flex) = self.flex(pin) {
            // Latch the level first so the pin never glitches to the old value
            flex.set_level(Level::from(level == PinState::High));
            flex.set_as_output();
        }
    }

    fn sample(
        &mut self,
        pin: u8,
    ) -> PinState {
        self.flex(pin).map_or(PinState::Low, |flex| {
            flex.set_as_input();
            PinState::from(flex.is_high())
        })
    }

    fn sense(
        &mut self,
        pin: u8,
    ) -> PinState {
        self.flex(pin).map_or(PinState::Low, |flex| PinState::from(flex.is_high()))
    }

    fn release(
        &mut self,
        pin: u8,
    ) {
        if let Some(flex) = self.flex(pin) {
            flex.set_as_input();
        }
    }
}

impl DelayNs for SocketPins {
    fn delay_ns(
        &mut self,
        ns: u32,
    ) {
        self.delay.delay_ns(ns);
    }
}

/// The three front-panel buttons with their debounce state.
pub struct Buttons {
    test: Input<'static>,
    pin_check: Input<'static>,
    reset: Input<'static>,
    test_state: ButtonState,
    pin_check_state: ButtonState,
    reset_state: ButtonState,
}

impl Buttons {
    pub fn new(
        test: Input<'static>,
        pin_check: Input<'static>,
        reset: Input<'static>,
    ) -> Self {
        Self {
            test,
            pin_check,
            reset,
            test_state: ButtonState::new(),
            pin_check_state: ButtonState::new(),
            reset_state: ButtonState::new(),
        }
    }

    /// Poll all buttons and return the press to act on. Every button's
    /// debounce state is updated on each poll; reset wins over the others.
    pub fn poll(
        &mut self,
        now_ms: u64,
    ) -> Option<Button> {
        let reset = self.reset_state.just_pressed(self.reset.is_low(), now_ms);
        let test = self.test_state.just_pressed(self.test.is_low(), now_ms);
        let pin_check = self.pin_check_state.just_pressed(self.pin_check.is_low(), now_ms);

        if reset {
            Some(Button::Reset)
        } else if test {
            Some(Button::Test)
        } else if pin_check {
            Some(Button::PinCheck)
        } else {
            None
        }
    }
}
