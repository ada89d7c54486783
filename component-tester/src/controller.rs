//! Button-driven control of the component tester.
//!
//! Every test button maps to one job with its own busy screen. Jobs only run
//! from the idle phase; once a verdict is up, only reset is accepted.

use bench_common::{Phase, Screen, Session};

use crate::bench::Bench;
use crate::capacitance::{MeasureError, format_microfarads, measure_capacitance};
use crate::config::BANNER;
use crate::diode::{DiodeReading, measure_diode};
use crate::led::flash_led;
use crate::resistance::{NO_RESISTOR_TEXT, format_ohms, measure_resistance};
use crate::seven_segment::{Polarity, sweep_digits, test_display};

/// Buttons of the component tester.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum Button {
    SegmentTest,
    SegmentCheck,
    Led,
    Resistor,
    Capacitor,
    Diode,
    Reset,
}

impl Button {
    /// Job started by this button (`None` for reset).
    pub const fn job(self) -> Option<Job> {
        match self {
            Self::SegmentTest => Some(Job::SegmentTest),
            Self::SegmentCheck => Some(Job::SegmentCheck),
            Self::Led => Some(Job::Led),
            Self::Resistor => Some(Job::Resistor),
            Self::Capacitor => Some(Job::Capacitor),
            Self::Diode => Some(Job::Diode),
            Self::Reset => None,
        }
    }
}

/// Work scheduled by a button press.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum Job {
    SegmentTest,
    SegmentCheck,
    Led,
    Resistor,
    Capacitor,
    Diode,
}

impl Job {
    /// Busy screen text shown while the job runs.
    pub const fn busy_text(self) -> &'static str {
        match self {
            Self::SegmentTest => "Testing 7-Seg...",
            Self::SegmentCheck => "7-Seg Check...",
            Self::Led => "Testing LED...",
            Self::Resistor => "Measuring R...",
            Self::Capacitor => "Measuring C...",
            Self::Diode => "Testing Diode...",
        }
    }
}

/// Result of a completed job.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Outcome {
    Segment(Polarity),
    SegmentSwept,
    LedFlashed,
    /// Ohms, `None` when nothing is connected.
    Resistance(Option<f32>),
    /// Microfarads.
    Capacitance(Result<f32, MeasureError>),
    Diode(DiodeReading),
}

impl Outcome {
    /// Verdict screen for this outcome.
    pub fn screen(&self) -> Screen {
        match *self {
            Self::Segment(polarity) => Screen::single(polarity.label()),
            Self::SegmentSwept => Screen::two("7-Seg Check", "Done 0-F"),
            Self::LedFlashed => Screen::two("LED Test Done", "Did it light?"),
            Self::Resistance(Some(ohms)) => Screen::single("Resistor").with_bottom(format_ohms(ohms)),
            Self::Resistance(None) => Screen::single(NO_RESISTOR_TEXT),
            Self::Capacitance(Ok(uf)) => Screen::single("Capacitor").with_bottom(format_microfarads(uf)),
            Self::Capacitance(Err(e)) => Screen::single(e.label()),
            Self::Diode(reading) => Screen::single(reading.verdict.label()).with_bottom(reading.voltages_line()),
        }
    }
}

/// Component tester session context.
#[derive(Clone, Copy, Debug, Default)]
pub struct ComponentTester {
    session: Session<Job>,
}

impl ComponentTester {
    pub const fn new() -> Self {
        Self {
            session: Session::new(),
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

    /// Handle a button press. Returns the screen to show, if it changes.
    pub fn press(
        &mut self,
        button: Button,
    ) -> Option<Screen> {
        match button.job() {
            Some(job) => self.session.begin(job).then(|| Screen::single(job.busy_text())),
            None => {
                self.session.reset();
                Some(Self::banner())
            },
        }
    }

    /// Run the pending job against `bench` and move to `AwaitingReset`.
    pub fn run_pending<B: Bench>(
        &mut self,
        bench: &mut B,
    ) -> Option<Outcome> {
        let outcome = match self.session.pending()? {
            Job::SegmentTest => Outcome::Segment(test_display(bench)),
            Job::SegmentCheck => {
                sweep_digits(bench);
                Outcome::SegmentSwept
            },
            Job::Led => {
                flash_led(bench);
                Outcome::LedFlashed
            },
            Job::Resistor => Outcome::Resistance(measure_resistance(bench)),
            Job::Capacitor => Outcome::Capacitance(measure_capacitance(bench)),
            Job::Diode => Outcome::Diode(measure_diode(bench)),
        };
        self.session.complete();
        Some(outcome)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
