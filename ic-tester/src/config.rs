//! IC tester timing and text constants.

/// Settling time after driving a gate's inputs, before sampling its output.
pub const GATE_SETTLE_MS: u32 = 5;

/// Settling time after each inverter input change.
pub const INVERTER_SETTLE_MS: u32 = 5;

/// Ready banner.
pub const BANNER: &str = "IC TESTER READY";

/// Busy screen while classifying.
pub const TESTING_TEXT: &str = "Testing...";

/// Busy screen while checking pins.
pub const CHECKING_TEXT: &str = "Checking Pins...";

/// Title of the pin check verdict screen.
pub const PIN_CHECK_TITLE: &str = "Pins OK?";
