//! Shared timing and display configuration constants.

// =============================================================================
// Input
// =============================================================================

/// Debounce duration in milliseconds.
pub const DEBOUNCE_MS: u64 = 50;

/// Delay between two button polls of the main loop.
pub const POLL_INTERVAL_MS: u64 = 10;

/// How long the "Testing..." style busy screen stays up before a job runs.
pub const BUSY_SCREEN_MS: u64 = 1000;

// =============================================================================
// Display
// =============================================================================

/// Character columns of the LCD.
pub const LCD_COLUMNS: usize = 16;

/// Character rows of the LCD.
pub const LCD_ROWS: usize = 2;

/// I2C address of the MCP23008 LCD backpack (all address jumpers open).
pub const LCD_I2C_ADDRESS: u8 = 0x20;

const _: () = assert!(LCD_ROWS == 2);
const _: () = assert!(POLL_INTERVAL_MS < DEBOUNCE_MS);
