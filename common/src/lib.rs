//! Common building blocks for the bench testers.
//!
//! This crate contains platform-agnostic code shared between the IC tester,
//! the component tester and the host simulator:
//!
//! - [`button`]: Active-low button edge detection with debounce
//! - [`config`]: Shared timing and display constants
//! - [`lcd`]: HD44780 16x2 character LCD driver over an MCP23008 I2C backpack
//! - [`probe`]: Traits for reconfigurable probe pins, analog inputs and clocks
//! - [`screen`]: Two-line screen contents and the [`TextDisplay`] sink trait
//! - [`session`]: Idle / Testing / AwaitingReset state machine
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test -p bench-common
//! ```
//!
//! Tests run with `std` enabled (via `cfg_attr`), allowing use of the standard
//! test framework while the firmware links the crate as `no_std`.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]

pub mod button;
pub mod config;
pub mod lcd;
pub mod probe;
pub mod screen;
pub mod session;

// Re-export commonly used items
pub use button::ButtonState;
pub use embedded_hal::digital::PinState;
pub use lcd::Lcd;
pub use probe::{AnalogInput, Clock, ProbePins};
pub use screen::{Line, Screen, TextDisplay};
pub use session::{Phase, Session};
