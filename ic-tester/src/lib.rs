//! IC tester library - testable modules for the 74-series logic IC tester.
//!
//! This library contains the core logic that can be tested on the host machine.
//! The binary (`main.rs`) uses this library and adds the embedded-specific code.
//!
//! - [`family`]: Supported families, truth tables and resolution priority
//! - [`layout`]: Socket pinouts of the supported packages
//! - [`classify`]: Stimulus/response identification of the chip
//! - [`pin_check`]: Per-gate integrity check of a known family
//! - [`controller`]: Session context tying buttons to jobs and screens
//! - [`sim`]: Simulated socket used by tests and the desktop simulator
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test -p ic-tester --lib
//! ```

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]

pub mod classify;
pub mod config;
pub mod controller;
pub mod family;
pub mod layout;
pub mod pin_check;
pub mod sim;

pub use classify::{ClassifyReport, classify};
pub use controller::{Button, IcTester, Job, Outcome};
pub use family::{Detection, IcFamily};
pub use pin_check::{PinCheck, check_pins};
