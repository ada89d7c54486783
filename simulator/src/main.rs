//! Bench tester simulator for Windows/Desktop.
//!
//! Runs the IC tester and the component tester controllers against simulated
//! hardware and renders their LCD in an `embedded-graphics-simulator` window.
//!
//! # Keys
//!
//! - **M**: Switch between the IC tester and the component tester
//! - **N**: Insert the next chip or part
//! - IC tester: **T** Test, **P** Pin Check, **R** Reset
//! - Component tester: **A** 7-Seg Test, **S** 7-Seg Check, **L** LED,
//!   **O** Resistor, **C** Capacitor, **D** Diode, **R** Reset

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]

mod lcd;
mod render;
mod station;

use std::thread;
use std::time::{Duration, Instant};

use bench_common::TextDisplay;
use component_tester::Button as ComponentButton;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use ic_tester::Button as IcButton;

use crate::lcd::LcdModel;
use crate::render::{BACKGROUND, WINDOW_SIZE, draw_lcd, draw_legend};
use crate::station::{Command, Mode, Station};

/// Redraw period of the window (~50 FPS).
const FRAME_TIME: Duration = Duration::from_millis(20);

/// Map a key to an operator action for the tester in front.
fn command_for(
    keycode: Keycode,
    mode: Mode,
) -> Option<Command> {
    let command = match (keycode, mode) {
        (Keycode::M, _) => Command::SwitchMode,
        (Keycode::N, _) => Command::NextPart,
        (Keycode::T, Mode::Ic) => Command::Ic(IcButton::Test),
        (Keycode::P, Mode::Ic) => Command::Ic(IcButton::PinCheck),
        (Keycode::R, Mode::Ic) => Command::Ic(IcButton::Reset),
        (Keycode::A, Mode::Component) => Command::Component(ComponentButton::SegmentTest),
        (Keycode::S, Mode::Component) => Command::Component(ComponentButton::SegmentCheck),
        (Keycode::L, Mode::Component) => Command::Component(ComponentButton::Led),
        (Keycode::O, Mode::Component) => Command::Component(ComponentButton::Resistor),
        (Keycode::C, Mode::Component) => Command::Component(ComponentButton::Capacitor),
        (Keycode::D, Mode::Component) => Command::Component(ComponentButton::Diode),
        (Keycode::R, Mode::Component) => Command::Component(ComponentButton::Reset),
        _ => return None,
    };
    Some(command)
}

fn legend(station: &Station) -> Vec<String> {
    let (title, keys) = match station.mode() {
        Mode::Ic => ("IC tester", ["[T] Test  [P] Pin Check", "[R] Reset"]),
        Mode::Component => (
            "Component tester",
            ["[A] 7-Seg  [S] Sweep  [L] LED", "[O] R  [C] C  [D] Diode  [R] Reset"],
        ),
    };
    vec![
        format!("{title}  ([M] switch)"),
        format!("Inserted: {}  ([N] next)", station.inserted()),
        keys[0].to_owned(),
        keys[1].to_owned(),
        if station.is_busy() { "busy...".to_owned() } else { String::new() },
    ]
}

fn main() {
    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(WINDOW_SIZE);
    let output_settings = OutputSettingsBuilder::new().scale(2).build();
    let mut window = Window::new("Bench Tester Sim", &output_settings);

    let mut station = Station::new();
    let mut lcd = LcdModel::new();
    lcd.show(station.screen()).ok();

    let started = Instant::now();
    println!("[sim] {} in the socket", station.inserted());

    loop {
        let frame_start = Instant::now();
        let now_ms = started.elapsed().as_millis() as u64;

        if let Some(screen) = station.poll(now_ms) {
            lcd.show(&screen).ok();
        }

        display.clear(BACKGROUND).ok();
        draw_lcd(&mut display, &lcd);
        draw_legend(&mut display, &legend(&station));
        window.update(&display);

        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => return,
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    if repeat {
                        continue;
                    }
                    if let Some(command) = command_for(keycode, station.mode())
                        && let Some(screen) = station.apply(command, now_ms)
                    {
                        lcd.show(&screen).ok();
                    }
                },
                _ => {},
            }
        }

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_TIME {
            thread::sleep(FRAME_TIME - elapsed);
        }
    }
}
