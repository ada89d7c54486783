//! HD44780 16x2 character LCD driver over an MCP23008 I2C backpack.
//!
//! The backpack wires the expander's GPIO port to the LCD like this:
//!
//! | GP | LCD |
//! |----|-----|
//! | 1  | RS  |
//! | 2  | E   |
//! | 3-6 | D4-D7 |
//! | 7  | backlight (held on) |
//!
//! The LCD runs in 4-bit mode, so every byte is sent as two nibbles, each
//! latched by pulsing E. Generic over `embedded-hal` 1.0 I2C and delay so it
//! runs on `embassy_rp` blocking I2C and against a recording mock in tests.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::config::LCD_COLUMNS;
use crate::screen::TextDisplay;

// MCP23008 registers
const MCP_IODIR: u8 = 0x00;
const MCP_GPIO: u8 = 0x09;

// Backpack bit positions
const BIT_RS: u8 = 1 << 1;
const BIT_EN: u8 = 1 << 2;
const DATA_SHIFT: u8 = 3;
const BIT_BACKLIGHT: u8 = 1 << 7;

// HD44780 commands
const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_MODE: u8 = 0x04;
const CMD_DISPLAY_CONTROL: u8 = 0x08;
const CMD_FUNCTION_SET: u8 = 0x20;
const CMD_SET_DDRAM: u8 = 0x80;

// Flags
const ENTRY_LEFT: u8 = 0x02;
const DISPLAY_ON: u8 = 0x04;
const FUNCTION_2_LINE: u8 = 0x08;

/// DDRAM start address of each row.
const ROW_OFFSETS: [u8; 2] = [0x00, 0x40];

/// HD44780 LCD behind an MCP23008 expander.
pub struct Lcd<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
}

impl<I2C: I2c, D: DelayNs> Lcd<I2C, D> {
    /// Create the driver. Call [`Lcd::init`] before printing.
    pub const fn new(
        i2c: I2C,
        delay: D,
        address: u8,
    ) -> Self {
        Self {
            i2c,
            delay,
            address,
        }
    }

    /// Configure the expander and run the HD44780 4-bit initialisation
    /// sequence (two lines, display on, cursor off, left-to-right entry).
    pub fn init(&mut self) -> Result<(), I2C::Error> {
        // All expander pins are outputs
        self.i2c.write(self.address, &[MCP_IODIR, 0x00])?;

        // Power-on wait (>40ms after Vcc rises to 2.7V)
        self.delay.delay_ms(50);
        self.write_port(0)?;

        // Force 8-bit mode three times, then switch to 4-bit
        self.write_nibble(0x03, false)?;
        self.delay.delay_us(4500);
        self.write_nibble(0x03, false)?;
        self.delay.delay_us(4500);
        self.write_nibble(0x03, false)?;
        self.delay.delay_us(150);
        self.write_nibble(0x02, false)?;

        self.command(CMD_FUNCTION_SET | FUNCTION_2_LINE)?;
        self.command(CMD_DISPLAY_CONTROL | DISPLAY_ON)?;
        self.clear_display()?;
        self.command(CMD_ENTRY_MODE | ENTRY_LEFT)
    }

    #[cfg(test)]
    fn release(self) -> (I2C, D) { (self.i2c, self.delay) }

    fn clear_display(&mut self) -> Result<(), I2C::Error> {
        self.command(CMD_CLEAR)?;
        // Clear takes 1.52ms
        self.delay.delay_ms(2);
        Ok(())
    }

    fn command(
        &mut self,
        value: u8,
    ) -> Result<(), I2C::Error> {
        self.send(value, false)
    }

    fn send(
        &mut self,
        value: u8,
        data: bool,
    ) -> Result<(), I2C::Error> {
        self.write_nibble(value >> 4, data)?;
        self.write_nibble(value & 0x0F, data)
    }

    fn write_nibble(
        &mut self,
        nibble: u8,
        data: bool,
    ) -> Result<(), I2C::Error> {
        let mut bits = (nibble & 0x0F) << DATA_SHIFT;
        if data {
            bits |= BIT_RS;
        }
        self.write_port(bits | BIT_EN)?;
        self.delay.delay_us(1);
        self.write_port(bits)?;
        // Commands need >37us to settle
        self.delay.delay_us(100);
        Ok(())
    }

    fn write_port(
        &mut self,
        bits: u8,
    ) -> Result<(), I2C::Error> {
        self.i2c.write(self.address, &[MCP_GPIO, bits | BIT_BACKLIGHT])
    }
}

impl<I2C: I2c, D: DelayNs> TextDisplay for Lcd<I2C, D> {
    type Error = I2C::Error;

    fn clear(&mut self) -> Result<(), Self::Error> { self.clear_display() }

    fn set_cursor(
        &mut self,
        col: u8,
        row: u8,
    ) -> Result<(), Self::Error> {
        let row = usize::from(row).min(ROW_OFFSETS.len() - 1);
        let col = col.min(LCD_COLUMNS as u8 - 1);
        self.command(CMD_SET_DDRAM | (ROW_OFFSETS[row] + col))
    }

    fn print(
        &mut self,
        text: &str,
    ) -> Result<(), Self::Error> {
        for c in text.chars() {
            // The character ROM is ASCII in the printable range
            let byte = if c.is_ascii() && !c.is_ascii_control() { c as u8 } else { b'?' };
            self.send(byte, true)?;
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
