//! Component tester reference values, thresholds and timings.
//!
//! All analog formulas work on 10-bit readings referenced to [`SUPPLY_VOLTS`].

use bench_common::probe::ADC_FULL_SCALE;

// =============================================================================
// Analog front end
// =============================================================================

/// Supply and ADC reference voltage of the analog front end.
pub const SUPPLY_VOLTS: f32 = 5.0;

/// Fixed divider resistor between the supply and the resistor under test.
pub const DIVIDER_REF_OHMS: f32 = 1000.0;

/// Charge resistor of the RC timing circuit.
pub const RC_REF_OHMS: f32 = 10_000.0;

/// Raw reading at one time constant (63.2% of full scale).
pub const RC_THRESHOLD_RAW: u16 = 648;

// =============================================================================
// Timeouts and settling
// =============================================================================

/// Longest wait for the capacitor to reach [`RC_THRESHOLD_RAW`].
pub const CHARGE_TIMEOUT_MS: u64 = 30_000;

/// Longest wait for the capacitor to read zero while discharging.
pub const DISCHARGE_TIMEOUT_MS: u64 = 30_000;

/// Settling time after each diode bias change.
pub const DIODE_SETTLE_MS: u32 = 10;

/// Settling time before reading back the decoder pins.
pub const SEGMENT_SETTLE_MS: u32 = 100;

/// Time each digit stays up during the display sweep.
pub const SEGMENT_STEP_MS: u32 = 500;

/// How long the LED under test is lit.
pub const LED_ON_MS: u32 = 2000;

// =============================================================================
// Diode thresholds (volts at the anode)
// =============================================================================

/// Forward drop window of a healthy diode (exclusive).
pub const DIODE_FORWARD_MIN_V: f32 = 0.2;
pub const DIODE_FORWARD_MAX_V: f32 = 1.0;

/// Reverse reading above which a healthy diode is blocking.
pub const DIODE_REVERSE_MIN_V: f32 = 4.0;

/// Both readings below these: the diode is a short.
pub const SHORT_FORWARD_MAX_V: f32 = 0.1;
pub const SHORT_REVERSE_MAX_V: f32 = 0.5;

/// Forward reading above this: the diode is open.
pub const OPEN_FORWARD_MIN_V: f32 = 4.0;

// =============================================================================
// Text
// =============================================================================

/// Ready banner.
pub const BANNER: &str = "COMPONENT TESTER";

// =============================================================================
// Compile-time validation
// =============================================================================

const _: () = assert!(RC_THRESHOLD_RAW < ADC_FULL_SCALE);
// 648 / 1023 is one time constant
const _: () = assert!(RC_THRESHOLD_RAW as u32 * 1000 / ADC_FULL_SCALE as u32 == 633);
const _: () = assert!(DIODE_FORWARD_MIN_V < DIODE_FORWARD_MAX_V);
const _: () = assert!(SHORT_FORWARD_MAX_V < DIODE_FORWARD_MIN_V);
const _: () = assert!(DIODE_FORWARD_MAX_V < OPEN_FORWARD_MIN_V);
const _: () = assert!(OPEN_FORWARD_MIN_V <= SUPPLY_VOLTS);
const _: () = assert!(BANNER.len() <= bench_common::config::LCD_COLUMNS);
