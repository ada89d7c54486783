//! Socket pinouts of the supported packages.
//!
//! Pins are numbered as on the 14-pin DIP socket (1-14, pin 7 = GND,
//! pin 14 = VCC). The firmware board maps socket pins to GPIOs.

use crate::family::IcFamily;

/// Socket ground pin.
pub const GND_PIN: u8 = 7;

/// Socket supply pin.
pub const VCC_PIN: u8 = 14;

/// Every signal pin of the socket (all pins except GND and VCC).
pub const SIGNAL_PINS: [u8; 12] = [1, 2, 3, 4, 5, 6, 8, 9, 10, 11, 12, 13];

/// One 2-input gate instance.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Gate {
    pub inputs: [u8; 2],
    pub output: u8,
}

/// One inverter channel.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct InverterChannel {
    pub input: u8,
    pub output: u8,
}

const fn gate(
    a: u8,
    b: u8,
    output: u8,
) -> Gate {
    Gate {
        inputs: [a, b],
        output,
    }
}

const fn inv(
    input: u8,
    output: u8,
) -> InverterChannel {
    InverterChannel { input, output }
}

/// 74LS00 / 08 / 32 / 86 pinout.
pub const QUAD_GATES: [Gate; 4] = [gate(1, 2, 3), gate(4, 5, 6), gate(9, 10, 8), gate(12, 13, 11)];

/// 74LS02 pinout (outputs on the outer pins).
pub const NOR_GATES: [Gate; 4] = [gate(2, 3, 1), gate(5, 6, 4), gate(8, 9, 10), gate(11, 12, 13)];

/// 74LS04 pinout.
pub const HEX_INVERTERS: [InverterChannel; 6] = [inv(1, 2), inv(3, 4), inv(5, 6), inv(9, 8), inv(11, 10), inv(13, 12)];

/// Gate instances of a 2-input family; empty for the inverter.
pub const fn gates(family: IcFamily) -> &'static [Gate] {
    match family {
        IcFamily::Nor => &NOR_GATES,
        IcFamily::Inverter => &[],
        _ => &QUAD_GATES,
    }
}

// Compile-time validation: layouts only use signal pins
const fn is_signal_pin(pin: u8) -> bool { pin >= 1 && pin < VCC_PIN && pin != GND_PIN }

const fn gates_use_signal_pins(gates: &[Gate]) -> bool {
    let mut i = 0;
    while i < gates.len() {
        let g = gates[i];
        if !is_signal_pin(g.inputs[0]) || !is_signal_pin(g.inputs[1]) || !is_signal_pin(g.output) {
            return false;
        }
        i += 1;
    }
    true
}

const _: () = assert!(gates_use_signal_pins(&QUAD_GATES));
const _: () = assert!(gates_use_signal_pins(&NOR_GATES));

// =============================================================================
// Unit Tests
// =============================================================================
