use std::fmt;

use chartlab_core::experiment::{
    ExperimentAction, ExperimentError, ExperimentSession, SessionSnapshot,
};
use chartlab_core::model::ChartVariant;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use tracing::{debug, warn};

use crate::Clock;

/// Drives one user's show / answer / reset cycle.
///
/// Owns its session; create one controller per user session.
pub struct ExperimentController {
    clock: Clock,
    rng: Box<dyn RngCore + Send>,
    session: ExperimentSession,
}

impl ExperimentController {
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            rng: Box::new(StdRng::from_os_rng()),
            session: ExperimentSession::new(),
        }
    }

    /// Replace the chart-selection RNG (seeded RNGs make tests deterministic).
    #[must_use]
    pub fn with_rng(mut self, rng: impl RngCore + Send + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// Resume from an existing session.
    #[must_use]
    pub fn with_session(mut self, session: ExperimentSession) -> Self {
        self.session = session;
        self
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Mutable access for advancing a fixed clock between actions.
    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    #[must_use]
    pub fn session(&self) -> &ExperimentSession {
        &self.session
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    /// Pick one of the two charts uniformly at random and start the timer.
    ///
    /// # Errors
    ///
    /// Returns `ExperimentError::InvalidTransition` unless the session is idle.
    pub fn show(&mut self) -> Result<SessionSnapshot, ExperimentError> {
        self.session.ensure(ExperimentAction::Show)?;
        let chart = self.pick_chart();
        let snapshot = self.session.show(chart, self.clock.now())?;
        debug!(chart = %chart, "chart shown");
        Ok(snapshot)
    }

    /// Stop the timer.
    ///
    /// # Errors
    ///
    /// Returns `ExperimentError::InvalidTransition` unless a chart is showing.
    pub fn mark_answered(&mut self) -> Result<SessionSnapshot, ExperimentError> {
        let snapshot = self.session.mark_answered(self.clock.now())?;
        match (snapshot.elapsed, snapshot.notice) {
            (Some(elapsed), _) => debug!(elapsed_secs = elapsed.secs(), "question answered"),
            (None, Some(notice)) => warn!(notice = notice.message(), "answered without a start time"),
            (None, None) => {}
        }
        Ok(snapshot)
    }

    /// Return to idle with every field cleared.
    ///
    /// # Errors
    ///
    /// Returns `ExperimentError::InvalidTransition` unless the session is answered.
    pub fn reset(&mut self) -> Result<SessionSnapshot, ExperimentError> {
        let snapshot = self.session.reset()?;
        debug!("session reset");
        Ok(snapshot)
    }

    fn pick_chart(&mut self) -> ChartVariant {
        let idx = self.rng.random_range(0..ChartVariant::ALL.len());
        ChartVariant::ALL[idx]
    }
}

impl fmt::Debug for ExperimentController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExperimentController")
            .field("clock", &self.clock)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
