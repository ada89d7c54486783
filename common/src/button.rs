//! Button debounce handling for the bench testers.
//!
//! Provides time-based edge detection with debouncing to prevent
//! multiple triggers from contact bounce on physical buttons.
//!
//! Timestamps are passed in by the caller so the same logic runs on the
//! firmware (`embassy_time::Instant`) and on the host.

use crate::config::DEBOUNCE_MS;

/// Button debounce state with time-based edge detection.
#[derive(Clone, Copy, Debug)]
pub struct ButtonState {
    was_pressed: bool,
    last_change_ms: Option<u64>,
}

impl ButtonState {
    /// Create a new button state (not pressed).
    pub const fn new() -> Self {
        Self {
            was_pressed: false,
            last_change_ms: None,
        }
    }

    /// Returns true only on the falling edge (button just pressed).
    ///
    /// Buttons are active-low, so `is_low` means pressed.
    /// Changes arriving within [`DEBOUNCE_MS`] of the last accepted change
    /// are treated as contact bounce and ignored.
    pub fn just_pressed(
        &mut self,
        is_low: bool,
        now_ms: u64,
    ) -> bool {
        if is_low == self.was_pressed {
            return false;
        }

        if let Some(last) = self.last_change_ms
            && now_ms.saturating_sub(last) < DEBOUNCE_MS
        {
            return false;
        }

        self.was_pressed = is_low;
        self.last_change_ms = Some(now_ms);

        // Only the press (falling edge) counts
        is_low
    }
}

impl Default for ButtonState {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================
