//! Simulated test station: both testers, their simulated hardware and the
//! part currently inserted.
//!
//! Button presses go straight to the tester controllers. Like the firmware,
//! a job runs only after its busy screen has been up for [`BUSY_SCREEN_MS`];
//! the simulated hardware then completes it in virtual time.

use bench_common::Screen;
use bench_common::config::BUSY_SCREEN_MS;
use component_tester::sim::{DiodeModel, Part, SimulatedBench};
use component_tester::{ComponentTester, Polarity};
use embedded_hal::digital::PinState;
use ic_tester::sim::{ChipModel, SimulatedSocket};
use ic_tester::{IcFamily, IcTester};

/// Chips offered in the socket, in cycling order.
const CHIP_PRESETS: &[(&str, Option<ChipModel>)] = &[
    ("74LS00 NAND", Some(ChipModel::healthy(IcFamily::Nand))),
    ("74LS08 AND", Some(ChipModel::healthy(IcFamily::And))),
    ("74LS32 OR", Some(ChipModel::healthy(IcFamily::Or))),
    ("74LS86 XOR", Some(ChipModel::healthy(IcFamily::Xor))),
    ("74LS02 NOR", Some(ChipModel::healthy(IcFamily::Nor))),
    ("74LS04 INV", Some(ChipModel::healthy(IcFamily::Inverter))),
    ("74LS00, gate 3 bad", Some(ChipModel::healthy(IcFamily::Nand).with_inverted_gate(2))),
    ("74LS04, inv 5 bad", Some(ChipModel::healthy(IcFamily::Inverter).with_inverted_gate(4))),
    ("74LS04, pin 6 stuck", Some(ChipModel::healthy(IcFamily::Inverter).with_stuck_output(2, PinState::High))),
    ("empty socket", None),
];

/// Parts offered in the clips, in cycling order.
const PART_PRESETS: &[(&str, Part)] = &[
    ("1k resistor", Part::Resistor { ohms: 1000.0 }),
    ("220R resistor", Part::Resistor { ohms: 220.0 }),
    ("47k resistor", Part::Resistor { ohms: 47_000.0 }),
    ("100uF capacitor", Part::Capacitor { microfarads: 100.0 }),
    ("470uF capacitor", Part::Capacitor { microfarads: 470.0 }),
    ("stuck RC node", Part::StuckNode { volts: 2.0 }),
    ("1N4148 diode", Part::Diode(DiodeModel::GOOD)),
    ("shorted diode", Part::Diode(DiodeModel::SHORTED)),
    ("open diode", Part::Diode(DiodeModel::OPEN)),
    ("leaky diode", Part::Diode(DiodeModel::LEAKY)),
    ("7-seg common anode", Part::SevenSegment(Polarity::CommonAnode)),
    ("7-seg common cathode", Part::SevenSegment(Polarity::CommonCathode)),
    ("red LED", Part::Led),
    ("nothing", Part::Empty),
];

/// Which tester the front panel is showing.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Mode {
    Ic,
    Component,
}

/// Operator action.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    /// Switch between the two testers.
    SwitchMode,
    /// Insert the next preset chip or part.
    NextPart,
    Ic(ic_tester::Button),
    Component(component_tester::Button),
}

/// Both testers with their simulated hardware.
pub struct Station {
    mode: Mode,
    ic: IcTester,
    socket: SimulatedSocket,
    chip: usize,
    ic_screen: Screen,
    components: ComponentTester,
    bench: SimulatedBench,
    part: usize,
    component_screen: Screen,
    /// When the current busy screen went up.
    busy_since_ms: Option<u64>,
}

impl Station {
    pub fn new() -> Self {
        Self {
            mode: Mode::Ic,
            ic: IcTester::new(),
            socket: SimulatedSocket::new(CHIP_PRESETS[0].1),
            chip: 0,
            ic_screen: IcTester::banner(),
            components: ComponentTester::new(),
            bench: SimulatedBench::new(PART_PRESETS[0].1),
            part: 0,
            component_screen: ComponentTester::banner(),
            busy_since_ms: None,
        }
    }

    #[inline]
    pub const fn mode(&self) -> Mode { self.mode }

    /// Screen of the tester in front.
    pub fn screen(&self) -> &Screen {
        match self.mode {
            Mode::Ic => &self.ic_screen,
            Mode::Component => &self.component_screen,
        }
    }

    /// Name of the chip or part currently inserted.
    pub fn inserted(&self) -> &'static str {
        match self.mode {
            Mode::Ic => CHIP_PRESETS[self.chip].0,
            Mode::Component => PART_PRESETS[self.part].0,
        }
    }

    /// Whether a job is waiting behind its busy screen.
    #[inline]
    pub const fn is_busy(&self) -> bool { self.busy_since_ms.is_some() }

    /// Apply an operator action. Returns the screen to show, if it changes.
    pub fn apply(
        &mut self,
        command: Command,
        now_ms: u64,
    ) -> Option<Screen> {
        match (command, self.mode) {
            (Command::SwitchMode, _) if self.is_busy() => None,
            (Command::SwitchMode, Mode::Ic) => {
                self.mode = Mode::Component;
                Some(self.screen().clone())
            },
            (Command::SwitchMode, Mode::Component) => {
                self.mode = Mode::Ic;
                Some(self.screen().clone())
            },
            (Command::NextPart, _) => {
                self.insert_next();
                println!("[sim] inserted {}", self.inserted());
                None
            },
            (Command::Ic(button), Mode::Ic) => {
                let screen = self.ic.press(button)?;
                println!("[ic] {button:?} -> {:?}", self.ic.phase());
                self.ic_screen = screen.clone();
                self.mark_busy(self.ic.pending().is_some(), now_ms);
                Some(screen)
            },
            (Command::Component(button), Mode::Component) => {
                let screen = self.components.press(button)?;
                println!("[component] {button:?} -> {:?}", self.components.phase());
                self.component_screen = screen.clone();
                self.mark_busy(self.components.pending().is_some(), now_ms);
                Some(screen)
            },
            // Button belongs to the other tester
            (Command::Ic(_) | Command::Component(_), _) => None,
        }
    }

    /// Run the pending job once its busy screen has been up long enough.
    pub fn poll(
        &mut self,
        now_ms: u64,
    ) -> Option<Screen> {
        let since = self.busy_since_ms?;
        if now_ms.saturating_sub(since) < BUSY_SCREEN_MS {
            return None;
        }
        self.busy_since_ms = None;

        match self.mode {
            Mode::Ic => {
                let outcome = self.ic.run_pending(&mut self.socket)?;
                println!("[ic] {outcome:?}");
                self.ic_screen = outcome.screen();
            },
            Mode::Component => {
                let outcome = self.components.run_pending(&mut self.bench)?;
                println!("[component] {outcome:?}");
                self.component_screen = outcome.screen();
            },
        }
        Some(self.screen().clone())
    }

    fn mark_busy(
        &mut self,
        pending: bool,
        now_ms: u64,
    ) {
        self.busy_since_ms = pending.then_some(now_ms);
    }

    fn insert_next(&mut self) {
        match self.mode {
            Mode::Ic => {
                self.chip = (self.chip + 1) % CHIP_PRESETS.len();
                self.socket.insert(CHIP_PRESETS[self.chip].1);
            },
            Mode::Component => {
                self.part = (self.part + 1) % PART_PRESETS.len();
                self.bench.insert(PART_PRESETS[self.part].1);
            },
        }
    }
}

impl Default for Station {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn press_ic(
        station: &mut Station,
        button: ic_tester::Button,
    ) -> Option<Screen> {
        station.apply(Command::Ic(button), 0)
    }

    #[test]
    fn test_job_waits_for_busy_screen() {
        let mut station = Station::new();
        assert_eq!(press_ic(&mut station, ic_tester::Button::Test), Some(Screen::single("Testing...")));
        assert!(station.is_busy());
        assert_eq!(station.poll(BUSY_SCREEN_MS - 1), None);
        assert_eq!(station.poll(BUSY_SCREEN_MS), Some(Screen::single("74LS00 NAND")));
        assert!(!station.is_busy());
    }

    #[test]
    fn test_faulty_chip_preset() {
        let mut station = Station::new();
        // Cycle to the NAND with a bad third gate
        for _ in 0..6 {
            station.apply(Command::NextPart, 0);
        }
        assert_eq!(station.inserted(), "74LS00, gate 3 bad");

        // The probe gate is fine, so the chip still classifies
        press_ic(&mut station, ic_tester::Button::Test);
        assert_eq!(station.poll(BUSY_SCREEN_MS), Some(Screen::single("74LS00 NAND")));
        press_ic(&mut station, ic_tester::Button::Reset);

        press_ic(&mut station, ic_tester::Button::PinCheck);
        assert_eq!(station.poll(BUSY_SCREEN_MS), Some(Screen::two("Pins OK?", "Faulty")));
    }

    #[test]
    fn test_stuck_inverter_preset_is_unknown() {
        let mut station = Station::new();
        for _ in 0..8 {
            station.apply(Command::NextPart, 0);
        }
        assert_eq!(station.inserted(), "74LS04, pin 6 stuck");

        press_ic(&mut station, ic_tester::Button::Test);
        assert_eq!(station.poll(BUSY_SCREEN_MS), Some(Screen::single("Unknown")));
    }

    #[test]
    fn test_mode_switch_keeps_each_screen() {
        let mut station = Station::new();
        press_ic(&mut station, ic_tester::Button::Test);
        station.poll(BUSY_SCREEN_MS);

        let screen = station.apply(Command::SwitchMode, 0);
        assert_eq!(screen, Some(Screen::single("COMPONENT TESTER")));
        assert_eq!(station.mode(), Mode::Component);

        let screen = station.apply(Command::SwitchMode, 0);
        assert_eq!(screen, Some(Screen::single("74LS00 NAND")));
    }

    #[test]
    fn test_no_switch_while_busy() {
        let mut station = Station::new();
        press_ic(&mut station, ic_tester::Button::Test);
        assert_eq!(station.apply(Command::SwitchMode, 10), None);
        assert_eq!(station.mode(), Mode::Ic);
    }

    #[test]
    fn test_buttons_of_other_tester_ignored() {
        let mut station = Station::new();
        assert_eq!(station.apply(Command::Component(component_tester::Button::Resistor), 0), None);
        assert!(!station.is_busy());
    }

    #[test]
    fn test_component_resistor() {
        let mut station = Station::new();
        station.apply(Command::SwitchMode, 0);
        let busy = station.apply(Command::Component(component_tester::Button::Resistor), 0);
        assert_eq!(busy, Some(Screen::single("Measuring R...")));
        let screen = station.poll(BUSY_SCREEN_MS).unwrap();
        assert_eq!(screen.top.as_str(), "Resistor");
        assert!(screen.bottom.starts_with("R="), "got {}", screen.bottom);
    }

    #[test]
    fn test_reset_cancels_pending_job() {
        let mut station = Station::new();
        press_ic(&mut station, ic_tester::Button::Test);
        press_ic(&mut station, ic_tester::Button::Reset);
        assert!(!station.is_busy());
        assert_eq!(station.poll(BUSY_SCREEN_MS), None);
    }

    #[test]
    fn test_presets_cycle() {
        let mut station = Station::new();
        for _ in 0..CHIP_PRESETS.len() {
            station.apply(Command::NextPart, 0);
        }
        assert_eq!(station.inserted(), CHIP_PRESETS[0].0);
    }
}
