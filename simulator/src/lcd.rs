//! In-memory 16x2 character LCD.
//!
//! Behaves like the HD44780 as driven by the firmware: clear homes the
//! cursor, the cursor is clamped to the panel, text past the last column is
//! not visible and non-ASCII characters show as `?`.

use std::convert::Infallible;

use bench_common::TextDisplay;
use bench_common::config::{LCD_COLUMNS, LCD_ROWS};

/// Character cells and cursor of the simulated panel.
#[derive(Clone, Debug)]
pub struct LcdModel {
    cells: [[char; LCD_COLUMNS]; LCD_ROWS],
    col: usize,
    row: usize,
}

impl LcdModel {
    pub const fn new() -> Self {
        Self {
            cells: [[' '; LCD_COLUMNS]; LCD_ROWS],
            col: 0,
            row: 0,
        }
    }

    /// Characters of `row`, padded to the panel width.
    pub fn row(
        &self,
        row: usize,
    ) -> String {
        self.cells.get(row).map(|cells| cells.iter().collect()).unwrap_or_default()
    }
}

impl Default for LcdModel {
    fn default() -> Self { Self::new() }
}

impl TextDisplay for LcdModel {
    type Error = Infallible;

    fn clear(&mut self) -> Result<(), Infallible> {
        *self = Self::new();
        Ok(())
    }

    fn set_cursor(
        &mut self,
        col: u8,
        row: u8,
    ) -> Result<(), Infallible> {
        self.col = usize::from(col).min(LCD_COLUMNS - 1);
        self.row = usize::from(row).min(LCD_ROWS - 1);
        Ok(())
    }

    fn print(
        &mut self,
        text: &str,
    ) -> Result<(), Infallible> {
        for c in text.chars() {
            if self.col >= LCD_COLUMNS {
                break;
            }
            self.cells[self.row][self.col] = if c.is_ascii() { c } else { '?' };
            self.col += 1;
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use bench_common::Screen;

    use super::*;

    #[test]
    fn test_show_two_rows() {
        let mut lcd = LcdModel::new();
        lcd.show(&Screen::two("Diode OK", "F=0.62V R=4.60V")).ok();
        assert_eq!(lcd.row(0), "Diode OK        ");
        assert_eq!(lcd.row(1), "F=0.62V R=4.60V ");
    }

    #[test]
    fn test_show_replaces_previous_screen() {
        let mut lcd = LcdModel::new();
        lcd.show(&Screen::two("Pins OK?", "All Good")).ok();
        lcd.show(&Screen::single("IC TESTER READY")).ok();
        assert_eq!(lcd.row(0).trim_end(), "IC TESTER READY");
        assert_eq!(lcd.row(1).trim_end(), "");
    }

    #[test]
    fn test_print_stops_at_last_column() {
        let mut lcd = LcdModel::new();
        lcd.set_cursor(12, 0).ok();
        lcd.print("ABCDEFG").ok();
        assert_eq!(lcd.row(0), "            ABCD");
    }

    #[test]
    fn test_cursor_clamped_and_non_ascii_replaced() {
        let mut lcd = LcdModel::new();
        lcd.set_cursor(0, 5).ok();
        lcd.print("5µF").ok();
        assert_eq!(lcd.row(1).trim_end(), "5?F");
        assert_eq!(lcd.row(2), "");
    }
}
