//! Session-scoped state machine for the chart experiment.
//!
//! A session moves `Idle -> Showing -> Answered -> Idle`. Every transition
//! returns an immutable [`SessionSnapshot`] that the presentation layer
//! renders from.

use chrono::{DateTime, Duration, Utc};
use std::fmt;
use thiserror::Error;

use crate::model::ChartVariant;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// A user action requested in a phase that does not offer it.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExperimentError {
    #[error("cannot {action} while the experiment is {phase}")]
    InvalidTransition {
        action: ExperimentAction,
        phase: ExperimentPhase,
    },
}

/// Rehydrated fields that contradict the session invariants.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionStateError {
    #[error("a selected chart requires chart_displayed and vice versa")]
    ChartSelectionMismatch,

    #[error("elapsed time requires the session to be answered")]
    ElapsedWithoutAnswer,

    #[error("an answered session must have a chart displayed")]
    AnswerWithoutChart,

    #[error("start time requires a chart to be displayed")]
    StartWithoutChart,
}

/// Soft problems surfaced to the user without blocking the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperimentNotice {
    /// The answer arrived but no start time had been recorded.
    MissingStartTime,
}

impl ExperimentNotice {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ExperimentNotice::MissingStartTime => "Start time not recorded. Please try again.",
        }
    }
}

//
// ─── PHASE / ACTION ────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperimentPhase {
    /// No chart on screen.
    Idle,
    /// Chart visible, waiting for the answer.
    Showing,
    /// Chart visible, response time recorded.
    Answered,
}

impl fmt::Display for ExperimentPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExperimentPhase::Idle => "idle",
            ExperimentPhase::Showing => "showing a chart",
            ExperimentPhase::Answered => "answered",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperimentAction {
    Show,
    MarkAnswered,
    Reset,
}

impl ExperimentAction {
    /// The only phase in which this action is valid.
    #[must_use]
    pub fn required_phase(self) -> ExperimentPhase {
        match self {
            ExperimentAction::Show => ExperimentPhase::Idle,
            ExperimentAction::MarkAnswered => ExperimentPhase::Showing,
            ExperimentAction::Reset => ExperimentPhase::Answered,
        }
    }
}

impl fmt::Display for ExperimentAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExperimentAction::Show => "show a chart",
            ExperimentAction::MarkAnswered => "mark the question answered",
            ExperimentAction::Reset => "reset",
        })
    }
}

//
// ─── ELAPSED TIME ──────────────────────────────────────────────────────────────
//

/// Non-negative response time in seconds.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ElapsedTime(f64);

impl ElapsedTime {
    /// Converts a signed duration, clamping negative values (clock skew) to zero.
    #[must_use]
    pub fn from_duration(delta: Duration) -> Self {
        let micros = delta
            .num_microseconds()
            .unwrap_or_else(|| delta.num_milliseconds().saturating_mul(1_000));
        #[allow(clippy::cast_precision_loss)]
        let secs = micros.max(0) as f64 / 1_000_000.0;
        Self(secs)
    }

    #[must_use]
    pub fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self::from_duration(end - start)
    }

    #[must_use]
    pub fn secs(self) -> f64 {
        self.0
    }
}

impl fmt::Display for ElapsedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

//
// ─── SNAPSHOT ──────────────────────────────────────────────────────────────────
//

/// Immutable view of a session after a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSnapshot {
    pub phase: ExperimentPhase,
    pub started_at: Option<DateTime<Utc>>,
    pub chart_displayed: bool,
    pub selected_chart: Option<ChartVariant>,
    pub answered: bool,
    pub elapsed: Option<ElapsedTime>,
    pub notice: Option<ExperimentNotice>,
}

impl SessionSnapshot {
    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == ExperimentSession::default().snapshot()
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One user's interaction episode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExperimentSession {
    started_at: Option<DateTime<Utc>>,
    chart_displayed: bool,
    selected_chart: Option<ChartVariant>,
    answered: bool,
    elapsed: Option<ElapsedTime>,
    notice: Option<ExperimentNotice>,
}

impl ExperimentSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehydrate a session from raw fields.
    ///
    /// A displayed chart without a start time is accepted; it is the state the
    /// missing-start-time handling in [`Self::mark_answered`] exists for.
    ///
    /// # Errors
    ///
    /// Returns `SessionStateError` if the fields contradict each other.
    pub fn from_parts(
        started_at: Option<DateTime<Utc>>,
        chart_displayed: bool,
        selected_chart: Option<ChartVariant>,
        answered: bool,
        elapsed: Option<ElapsedTime>,
    ) -> Result<Self, SessionStateError> {
        if selected_chart.is_some() != chart_displayed {
            return Err(SessionStateError::ChartSelectionMismatch);
        }
        if elapsed.is_some() && !answered {
            return Err(SessionStateError::ElapsedWithoutAnswer);
        }
        if answered && !chart_displayed {
            return Err(SessionStateError::AnswerWithoutChart);
        }
        if started_at.is_some() && !chart_displayed {
            return Err(SessionStateError::StartWithoutChart);
        }
        Ok(Self {
            started_at,
            chart_displayed,
            selected_chart,
            answered,
            elapsed,
            notice: None,
        })
    }

    #[must_use]
    pub fn phase(&self) -> ExperimentPhase {
        if self.answered {
            ExperimentPhase::Answered
        } else if self.chart_displayed {
            ExperimentPhase::Showing
        } else {
            ExperimentPhase::Idle
        }
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn chart_displayed(&self) -> bool {
        self.chart_displayed
    }

    #[must_use]
    pub fn selected_chart(&self) -> Option<ChartVariant> {
        self.selected_chart
    }

    #[must_use]
    pub fn answered(&self) -> bool {
        self.answered
    }

    #[must_use]
    pub fn elapsed(&self) -> Option<ElapsedTime> {
        self.elapsed
    }

    #[must_use]
    pub fn notice(&self) -> Option<ExperimentNotice> {
        self.notice
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase(),
            started_at: self.started_at,
            chart_displayed: self.chart_displayed,
            selected_chart: self.selected_chart,
            answered: self.answered,
            elapsed: self.elapsed,
            notice: self.notice,
        }
    }

    /// Display `chart` and start the response timer at `now`.
    ///
    /// # Errors
    ///
    /// Returns `ExperimentError::InvalidTransition` unless the session is idle.
    pub fn show(
        &mut self,
        chart: ChartVariant,
        now: DateTime<Utc>,
    ) -> Result<SessionSnapshot, ExperimentError> {
        self.ensure(ExperimentAction::Show)?;
        self.started_at = Some(now);
        self.selected_chart = Some(chart);
        self.chart_displayed = true;
        Ok(self.snapshot())
    }

    /// Record the answer at `now`.
    ///
    /// Without a start time the session still becomes answered, with no elapsed
    /// time and a [`ExperimentNotice::MissingStartTime`] notice.
    ///
    /// # Errors
    ///
    /// Returns `ExperimentError::InvalidTransition` unless a chart is showing.
    pub fn mark_answered(&mut self, now: DateTime<Utc>) -> Result<SessionSnapshot, ExperimentError> {
        self.ensure(ExperimentAction::MarkAnswered)?;
        match self.started_at {
            Some(started_at) => {
                self.elapsed = Some(ElapsedTime::between(started_at, now));
                self.notice = None;
            }
            None => {
                self.elapsed = None;
                self.notice = Some(ExperimentNotice::MissingStartTime);
            }
        }
        self.answered = true;
        Ok(self.snapshot())
    }

    /// Clear every field and return to idle.
    ///
    /// # Errors
    ///
    /// Returns `ExperimentError::InvalidTransition` unless the session is answered.
    pub fn reset(&mut self) -> Result<SessionSnapshot, ExperimentError> {
        self.ensure(ExperimentAction::Reset)?;
        *self = Self::default();
        Ok(self.snapshot())
    }

    /// Check that `action` is allowed in the current phase without changing anything.
    ///
    /// # Errors
    ///
    /// Returns `ExperimentError::InvalidTransition` when the phase does not match.
    pub fn ensure(&self, action: ExperimentAction) -> Result<(), ExperimentError> {
        let phase = self.phase();
        if phase == action.required_phase() {
            Ok(())
        } else {
            Err(ExperimentError::InvalidTransition { action, phase })
        }
    }
}
