//! Component tester library - testable modules for the discrete component tester.
//!
//! This library contains the measurement engines that can be tested on the
//! host machine. The binary (`main.rs`) wires them to the RP2350 GPIO and ADC.
//!
//! - [`bench`]: Pin roles, analog channels and the [`Bench`] seam
//! - [`resistance`]: Voltage-divider resistance measurement
//! - [`capacitance`]: RC charge-time capacitance measurement
//! - [`diode`]: Forward/reverse bias diode classification
//! - [`seven_segment`]: Display polarity detection and digit sweep
//! - [`led`]: Timed LED flash
//! - [`controller`]: Session context tying buttons to jobs and screens
//! - [`sim`]: Simulated bench used by tests and the desktop simulator
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test -p component-tester --lib
//! ```

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]

pub mod bench;
pub mod capacitance;
pub mod config;
pub mod controller;
pub mod diode;
pub mod led;
pub mod resistance;
pub mod seven_segment;
pub mod sim;

pub use bench::{Bench, BenchPin, Probe};
pub use capacitance::{MeasureError, measure_capacitance};
pub use controller::{Button, ComponentTester, Job, Outcome};
pub use diode::{DiodeReading, DiodeVerdict, measure_diode};
pub use resistance::measure_resistance;
pub use seven_segment::Polarity;
