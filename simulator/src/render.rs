//! Drawing of the simulated front panel.
//!
//! The LCD is drawn as a 16x2 grid of character cells on a backlit panel,
//! the key legend and the inserted part go underneath.

use bench_common::config::{LCD_COLUMNS, LCD_ROWS};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use embedded_graphics_simulator::SimulatorDisplay;
use profont::{PROFONT_9_POINT, PROFONT_18_POINT};

use crate::lcd::LcdModel;

const CELL_FONT: &MonoFont = &PROFONT_18_POINT;
const LEGEND_FONT: &MonoFont = &PROFONT_9_POINT;

const MARGIN: u32 = 12;
const BEZEL: u32 = 8;
const CELL_GAP: u32 = 2;
const LEGEND_LINE_HEIGHT: u32 = 14;
const LEGEND_LINES: u32 = 5;

pub const BACKGROUND: Rgb565 = Rgb565::new(2, 4, 2);
const BEZEL_COLOR: Rgb565 = Rgb565::new(4, 8, 4);
const PANEL_COLOR: Rgb565 = Rgb565::new(12, 44, 4);
const CELL_COLOR: Rgb565 = Rgb565::new(14, 50, 6);
const PIXEL_COLOR: Rgb565 = Rgb565::new(2, 10, 2);
const LEGEND_COLOR: Rgb565 = Rgb565::new(24, 48, 24);

const CELL_WIDTH: u32 = CELL_FONT.character_size.width + CELL_GAP;
const CELL_HEIGHT: u32 = CELL_FONT.character_size.height + CELL_GAP;
const PANEL_WIDTH: u32 = LCD_COLUMNS as u32 * CELL_WIDTH + 2 * BEZEL;
const PANEL_HEIGHT: u32 = LCD_ROWS as u32 * CELL_HEIGHT + 2 * BEZEL;

/// Size of the simulator window (before scaling).
pub const WINDOW_SIZE: Size = Size::new(
    PANEL_WIDTH + 2 * MARGIN,
    PANEL_HEIGHT + 3 * MARGIN + LEGEND_LINES * LEGEND_LINE_HEIGHT,
);

/// Draw the LCD panel with its current contents.
pub fn draw_lcd(
    display: &mut SimulatorDisplay<Rgb565>,
    lcd: &LcdModel,
) {
    let origin = Point::new(MARGIN as i32, MARGIN as i32);
    Rectangle::new(origin, Size::new(PANEL_WIDTH, PANEL_HEIGHT))
        .into_styled(PrimitiveStyle::with_fill(BEZEL_COLOR))
        .draw(display)
        .ok();

    let glass = origin + Point::new(BEZEL as i32, BEZEL as i32);
    Rectangle::new(glass, Size::new(PANEL_WIDTH - 2 * BEZEL, PANEL_HEIGHT - 2 * BEZEL))
        .into_styled(PrimitiveStyle::with_fill(PANEL_COLOR))
        .draw(display)
        .ok();

    let style = MonoTextStyle::new(CELL_FONT, PIXEL_COLOR);
    let cell_style = PrimitiveStyle::with_fill(CELL_COLOR);
    let mut buf = [0u8; 4];

    for row in 0..LCD_ROWS {
        for (col, c) in lcd.row(row).chars().enumerate() {
            let top_left = glass + Point::new((col as u32 * CELL_WIDTH) as i32, (row as u32 * CELL_HEIGHT) as i32);
            Rectangle::new(top_left, CELL_FONT.character_size).into_styled(cell_style).draw(display).ok();
            Text::with_baseline(c.encode_utf8(&mut buf), top_left, style, Baseline::Top)
                .draw(display)
                .ok();
        }
    }
}

/// Draw the legend lines below the panel.
pub fn draw_legend(
    display: &mut SimulatorDisplay<Rgb565>,
    lines: &[String],
) {
    let style = MonoTextStyle::new(LEGEND_FONT, LEGEND_COLOR);
    let top = (PANEL_HEIGHT + 2 * MARGIN) as i32;

    for (i, line) in lines.iter().take(LEGEND_LINES as usize).enumerate() {
        let position = Point::new(MARGIN as i32, top + (i as u32 * LEGEND_LINE_HEIGHT) as i32);
        Text::with_baseline(line, position, style, Baseline::Top).draw(display).ok();
    }
}
