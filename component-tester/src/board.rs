//! Board wiring for the component tester (Raspberry Pi Pico 2).
//!
//! Pin mapping:
//! - BCD decoder inputs A-D: GPIO2-GPIO5
//! - LED under test: GPIO6
//! - RC charge: GPIO7, RC discharge: GPIO8
//! - Diode cathode: GPIO9, diode supply: GPIO10
//! - Buttons (active-low, internal pull-up): 7-Seg Test GPIO11, 7-Seg Check
//!   GPIO12, LED GPIO13, Resistor GPIO14, Capacitor GPIO15, Diode GPIO16,
//!   Reset GPIO17
//! - ADC: resistor divider GPIO26, capacitor GPIO27, diode anode GPIO28
//! - LCD backpack: I2C0, SDA GPIO20, SCL GPIO21
//!
//! The analog front end runs from a 5 V rail scaled into the ADC range, so
//! readings are referenced to 5 V after scaling to 10 bits.

use bench_common::probe::to_10_bit;
use bench_common::{AnalogInput, ButtonState, Clock, ProbePins};
use component_tester::{BenchPin, Button, Probe};
use defmt::warn;
use embassy_rp::Peri;
use embassy_rp::adc::{self, Adc, Blocking, Channel};
use embassy_rp::gpio::{Flex, Input, Level, Pull};
use embassy_rp::peripherals::{ADC, PIN_26, PIN_27, PIN_28};
use embassy_time::{Delay, Instant};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::PinState;

/// GPIOs and ADC channels of the bench.
pub struct BenchBoard {
    /// Indexed by [`BenchPin::index`].
    pins: [Flex<'static>; BenchPin::COUNT],
    adc: Adc<'static, Blocking>,
    resistor: Channel<'static>,
    capacitor: Channel<'static>,
    diode_anode: Channel<'static>,
    delay: Delay,
}

impl BenchBoard {
    /// Take the bench GPIOs (in [`BenchPin::ALL`] order) and ADC inputs.
    /// All pins start as floating inputs.
    pub fn new(
        mut pins: [Flex<'static>; BenchPin::COUNT],
        adc: Peri<'static, ADC>,
        resistor: Peri<'static, PIN_26>,
        capacitor: Peri<'static, PIN_27>,
        diode_anode: Peri<'static, PIN_28>,
    ) -> Self {
        for pin in &mut pins {
            pin.set_pull(Pull::None);
            pin.set_as_input();
        }
        Self {
            pins,
            adc: Adc::new_blocking(adc, adc::Config::default()),
            resistor: Channel::new_pin(resistor, Pull::None),
            capacitor: Channel::new_pin(capacitor, Pull::None),
            diode_anode: Channel::new_pin(diode_anode, Pull::None),
            delay: Delay,
        }
    }
}

impl ProbePins for BenchBoard {
    type Pin = BenchPin;

    fn drive(
        &mut self,
        pin: BenchPin,
        level: PinState,
    ) {
        let flex = &mut self.pins[pin.index()];
        flex.set_level(Level::from(level == PinState::High));
        flex.set_as_output();
    }

    fn sample(
        &mut self,
        pin: BenchPin,
    ) -> PinState {
        let flex = &mut self.pins[pin.index()];
        flex.set_as_input();
        PinState::from(flex.is_high())
    }

    fn sense(
        &mut self,
        pin: BenchPin,
    ) -> PinState {
        PinState::from(self.pins[pin.index()].is_high())
    }

    fn release(
        &mut self,
        pin: BenchPin,
    ) {
        self.pins[pin.index()].set_as_input();
    }
}

impl AnalogInput for BenchBoard {
    type Channel = Probe;

    fn read_raw(
        &mut self,
        channel: Probe,
    ) -> u16 {
        let ch = match channel {
            Probe::Resistor => &mut self.resistor,
            Probe::Capacitor => &mut self.capacitor,
            Probe::DiodeAnode => &mut self.diode_anode,
        };
        match self.adc.blocking_read(ch) {
            Ok(raw) => to_10_bit(raw),
            Err(e) => {
                warn!("ADC read on {} failed: {}", channel, e);
                0
            },
        }
    }
}

impl Clock for BenchBoard {
    fn now_ms(&self) -> u64 { Instant::now().as_millis() }
}

impl DelayNs for BenchBoard {
    fn delay_ns(
        &mut self,
        ns: u32,
    ) {
        self.delay.delay_ns(ns);
    }
}

/// Poll order; reset comes first so it wins over a simultaneous test press.
const BUTTON_ORDER: [Button; 7] = [
    Button::Reset,
    Button::SegmentTest,
    Button::SegmentCheck,
    Button::Led,
    Button::Resistor,
    Button::Capacitor,
    Button::Diode,
];

/// The seven front-panel buttons with their debounce state.
pub struct Buttons {
    /// In [`BUTTON_ORDER`] order.
    inputs: [Input<'static>; 7],
    states: [ButtonState; 7],
}

impl Buttons {
    /// Take the button inputs in `BUTTON_ORDER` order (reset first).
    pub fn new(inputs: [Input<'static>; 7]) -> Self {
        Self {
            inputs,
            states: [ButtonState::new(); 7],
        }
    }

    /// Poll all buttons and return the press to act on. Every button's
    /// debounce state is updated on each poll.
    pub fn poll(
        &mut self,
        now_ms: u64,
    ) -> Option<Button> {
        let mut pressed = None;
        for ((input, state), button) in self.inputs.iter().zip(self.states.iter_mut()).zip(BUTTON_ORDER) {
            if state.just_pressed(input.is_low(), now_ms) && pressed.is_none() {
                pressed = Some(button);
            }
        }
        pressed
    }
}
