//! Test session state machine.
//!
//! Both testers follow the same cycle:
//!
//! ```text
//! Idle --begin(job)--> Testing(job) --complete()--> AwaitingReset --reset()--> Idle
//! ```
//!
//! A new test can only start from `Idle`, so a verdict stays on screen until
//! the reset button is pressed.

/// Phase of the current test session.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum Phase<J> {
    /// Ready banner shown, waiting for a test button.
    Idle,
    /// A job was requested and has not run yet.
    Testing(J),
    /// Verdict shown, waiting for the reset button.
    AwaitingReset,
}

/// Session state machine parameterised over the job type.
#[derive(Clone, Copy, Debug)]
pub struct Session<J> {
    phase: Phase<J>,
}

impl<J: Copy> Session<J> {
    /// Create an idle session.
    pub const fn new() -> Self { Self { phase: Phase::Idle } }

    /// Current phase.
    #[inline]
    pub const fn phase(&self) -> Phase<J> { self.phase }

    /// Start `job`. Returns false (and changes nothing) unless idle.
    pub fn begin(
        &mut self,
        job: J,
    ) -> bool {
        if matches!(self.phase, Phase::Idle) {
            self.phase = Phase::Testing(job);
            true
        } else {
            false
        }
    }

    /// Job waiting to run, if any.
    #[inline]
    pub const fn pending(&self) -> Option<J> {
        match self.phase {
            Phase::Testing(job) => Some(job),
            _ => None,
        }
    }

    /// Mark the pending job as done. Only valid while testing.
    pub fn complete(&mut self) -> bool {
        if matches!(self.phase, Phase::Testing(_)) {
            self.phase = Phase::AwaitingReset;
            true
        } else {
            false
        }
    }

    /// Return to idle from any phase.
    pub fn reset(&mut self) { self.phase = Phase::Idle; }
}

impl<J: Copy> Default for Session<J> {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================
