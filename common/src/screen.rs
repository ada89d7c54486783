//! Two-line screen contents for the 16x2 character LCD.
//!
//! Engines and controllers produce [`Screen`] values; rendering them is the
//! job of a [`TextDisplay`] (the I2C LCD on hardware, a terminal frame in the
//! simulator).

use core::fmt::{self, Write};

use heapless::String;

use crate::config::LCD_COLUMNS;

/// One LCD line, at most [`LCD_COLUMNS`] characters.
pub type Line = String<LCD_COLUMNS>;

/// Writer that silently drops characters beyond the line width.
struct Truncating<'a>(&'a mut Line);

impl Write for Truncating<'_> {
    fn write_str(
        &mut self,
        s: &str,
    ) -> fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}

/// Build a line from text, truncated to the display width.
pub fn line(text: &str) -> Line {
    let mut out = Line::new();
    let _ = Truncating(&mut out).write_str(text);
    out
}

/// Build a line from format arguments, truncated to the display width.
///
/// ```ignore
/// let l = line_fmt(format_args!("R={:.1} Ohm", ohms));
/// ```
pub fn line_fmt(args: fmt::Arguments<'_>) -> Line {
    let mut out = Line::new();
    let _ = Truncating(&mut out).write_fmt(args);
    out
}

/// Contents of both LCD rows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Screen {
    /// Top row.
    pub top: Line,
    /// Bottom row (often empty).
    pub bottom: Line,
}

impl Screen {
    /// Screen with only the top row filled.
    pub fn single(top: &str) -> Self {
        Self {
            top: line(top),
            bottom: Line::new(),
        }
    }

    /// Screen with both rows filled.
    pub fn two(
        top: &str,
        bottom: &str,
    ) -> Self {
        Self {
            top: line(top),
            bottom: line(bottom),
        }
    }

    /// Replace the bottom row.
    pub fn with_bottom(
        mut self,
        bottom: Line,
    ) -> Self {
        self.bottom = bottom;
        self
    }
}

/// Character display sink: clear, cursor positioning and printing.
pub trait TextDisplay {
    /// Bus or device error.
    type Error;

    /// Clear the display and home the cursor.
    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Move the cursor to `col`, `row` (both zero-based).
    fn set_cursor(
        &mut self,
        col: u8,
        row: u8,
    ) -> Result<(), Self::Error>;

    /// Print text at the cursor.
    fn print(
        &mut self,
        text: &str,
    ) -> Result<(), Self::Error>;

    /// Replace the whole display with `screen`.
    fn show(
        &mut self,
        screen: &Screen,
    ) -> Result<(), Self::Error> {
        self.clear()?;
        self.print(&screen.top)?;
        if !screen.bottom.is_empty() {
            self.set_cursor(0, 1)?;
            self.print(&screen.bottom)?;
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
