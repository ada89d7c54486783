//! Button-driven control of the IC tester.
//!
//! [`IcTester`] is the explicit session context: it owns the session state
//! machine and the one piece of state shared between jobs, the most recent
//! detection. Button presses only schedule jobs and pick the busy screen;
//! [`IcTester::run_pending`] does the socket I/O.

use bench_common::{Phase, ProbePins, Screen, Session};
use embedded_hal::delay::DelayNs;

use crate::classify::{ClassifyReport, classify};
use crate::config::{BANNER, CHECKING_TEXT, PIN_CHECK_TITLE, TESTING_TEXT};
use crate::family::{Detection, IcFamily};
use crate::pin_check::{PinCheck, check_pins};

/// Buttons of the IC tester.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum Button {
    Test,
    PinCheck,
    Reset,
}

/// Work scheduled by a button press.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum Job {
    Classify,
    PinCheck(IcFamily),
}

/// Result of a completed job.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
    Classified(ClassifyReport),
    PinsChecked(IcFamily, PinCheck),
}

impl Outcome {
    /// Verdict screen for this outcome.
    pub fn screen(&self) -> Screen {
        match self {
            Self::Classified(report) => Screen::single(report.detection.label()),
            Self::PinsChecked(_, verdict) => Screen::two(PIN_CHECK_TITLE, verdict.label()),
        }
    }
}

/// IC tester session context.
#[derive(Clone, Copy, Debug, Default)]
pub struct IcTester {
    session: Session<Job>,
    last_detection: Option<Detection>,
}

impl IcTester {
    pub const fn new() -> Self {
        Self {
            session: Session::new(),
            last_detection: None,
        }
    }

    /// Ready banner.
    pub fn banner() -> Screen { Screen::single(BANNER) }

    /// Current session phase.
    #[inline]
    pub const fn phase(&self) -> Phase<Job> { self.session.phase() }

    /// Job waiting to run, if any.
    #[inline]
    pub const fn pending(&self) -> Option<Job> { self.session.pending() }

    /// Most recent classification result (`None` before the first run).
    #[inline]
    pub const fn last_detection(&self) -> Option<Detection> { self.last_detection }

    /// Handle a button press. Returns the screen to show, if it changes.
    ///
    /// Test and pin check are only accepted while idle; pin check also
    /// needs a known family from a previous classification. Reset is
    /// accepted in every phase and redraws the banner.
    pub fn press(
        &mut self,
        button: Button,
    ) -> Option<Screen> {
        match button {
            Button::Reset => {
                self.session.reset();
                Some(Self::banner())
            },
            Button::Test => self.session.begin(Job::Classify).then(|| Screen::single(TESTING_TEXT)),
            Button::PinCheck => {
                let family = self.last_detection.and_then(Detection::family)?;
                self.session.begin(Job::PinCheck(family)).then(|| Screen::single(CHECKING_TEXT))
            },
        }
    }

    /// Run the pending job against `socket` and move to `AwaitingReset`.
    pub fn run_pending<S>(
        &mut self,
        socket: &mut S,
    ) -> Option<Outcome>
    where
        S: ProbePins<Pin = u8> + DelayNs,
    {
        let outcome = match self.session.pending()? {
            Job::Classify => {
                let report = classify(socket);
                self.last_detection = Some(report.detection);
                Outcome::Classified(report)
            },
            Job::PinCheck(family) => Outcome::PinsChecked(family, check_pins(socket, family)),
        };
        self.session.complete();
        Some(outcome)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{ChipModel, SimulatedSocket};

    fn socket_with(family: IcFamily) -> SimulatedSocket { SimulatedSocket::new(Some(ChipModel::healthy(family))) }

    #[test]
    fn test_classify_flow() {
        let mut tester = IcTester::new();
        let mut socket = socket_with(IcFamily::Xor);

        assert_eq!(tester.press(Button::Test), Some(Screen::single("Testing...")));
        assert_eq!(tester.pending(), Some(Job::Classify));

        let outcome = tester.run_pending(&mut socket).unwrap();
        assert_eq!(outcome.screen(), Screen::single("74LS86 XOR"));
        assert_eq!(tester.phase(), Phase::AwaitingReset);
        assert_eq!(tester.last_detection(), Some(Detection::Known(IcFamily::Xor)));
    }

    #[test]
    fn test_buttons_ignored_until_reset() {
        let mut tester = IcTester::new();
        let mut socket = socket_with(IcFamily::Nand);
        tester.press(Button::Test);
        tester.run_pending(&mut socket);

        assert_eq!(tester.press(Button::Test), None);
        assert_eq!(tester.press(Button::PinCheck), None);
        assert_eq!(tester.run_pending(&mut socket), None);

        assert_eq!(tester.press(Button::Reset), Some(Screen::single("IC TESTER READY")));
        assert_eq!(tester.phase(), Phase::Idle);
    }

    #[test]
    fn test_pin_check_uses_last_detection() {
        let mut tester = IcTester::new();
        let mut socket = socket_with(IcFamily::Nor);
        tester.press(Button::Test);
        tester.run_pending(&mut socket);
        tester.press(Button::Reset);

        assert_eq!(tester.press(Button::PinCheck), Some(Screen::single("Checking Pins...")));
        assert_eq!(tester.pending(), Some(Job::PinCheck(IcFamily::Nor)));
        let outcome = tester.run_pending(&mut socket).unwrap();
        assert_eq!(outcome, Outcome::PinsChecked(IcFamily::Nor, PinCheck::AllGood));
        assert_eq!(outcome.screen(), Screen::two("Pins OK?", "All Good"));
    }

    #[test]
    fn test_pin_check_reports_fault() {
        let mut tester = IcTester::new();
        let mut socket = socket_with(IcFamily::And);
        tester.press(Button::Test);
        tester.run_pending(&mut socket);
        tester.press(Button::Reset);

        // Chip swapped for one with a dead third gate
        socket.insert(Some(ChipModel::healthy(IcFamily::And).with_inverted_gate(2)));
        tester.press(Button::PinCheck);
        let outcome = tester.run_pending(&mut socket).unwrap();
        assert_eq!(outcome.screen(), Screen::two("Pins OK?", "Faulty"));
    }

    #[test]
    fn test_pin_check_needs_prior_test() {
        let mut tester = IcTester::new();
        assert_eq!(tester.press(Button::PinCheck), None);
        assert_eq!(tester.phase(), Phase::Idle);
    }

    #[test]
    fn test_pin_check_refused_after_unknown() {
        let mut tester = IcTester::new();
        let mut socket = SimulatedSocket::new(None);
        tester.press(Button::Test);
        let outcome = tester.run_pending(&mut socket).unwrap();
        assert_eq!(outcome.screen(), Screen::single("Unknown"));
        tester.press(Button::Reset);

        assert_eq!(tester.last_detection(), Some(Detection::Unknown));
        assert_eq!(tester.press(Button::PinCheck), None);
    }

    #[test]
    fn test_new_classification_overwrites_last() {
        let mut tester = IcTester::new();
        let mut socket = socket_with(IcFamily::Or);
        tester.press(Button::Test);
        tester.run_pending(&mut socket);
        tester.press(Button::Reset);

        socket.insert(Some(ChipModel::healthy(IcFamily::Inverter)));
        tester.press(Button::Test);
        tester.run_pending(&mut socket);
        assert_eq!(tester.last_detection(), Some(Detection::Known(IcFamily::Inverter)));
    }
}
