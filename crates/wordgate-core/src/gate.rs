//! Submission gate state machine.
//!
//! The gate decides whether a guess form submission may reach the server.
//! It never performs I/O: each event returns the actions the host must run,
//! in order.
//!
//! ```text
//!            submit (len != 5)
//!           ┌──────────────┐
//!           ▼              │
//!         Idle ────────────┘
//!           │ submit (len == 5)        invalid
//!           ▼                     ┌──────────────► Idle
//!       Checking ─────────────────┤
//!                                 │ valid / transport error
//!                                 └──────────────► Submitted
//! ```
//!
//! # Invariants
//!
//! - The control is locked before `Validate` is emitted and unlocked in the
//!   same action batch that reports an invalid word.
//! - At most one attempt is `Checking` at any time.
//! - `SubmitNative` is emitted at most once per page.
//! - A reset only clears the notice of the latest attempt.

use crate::{
    config::GateConfig,
    error::GateError,
    event::{AttemptId, GateAction, GateEvent, LogLevel, NoticeKind},
    guess::{GUESS_LEN, GuessInput},
    validation::ValidationOutcome,
};

/// Where the submit control stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// Control enabled, no request in flight.
    Idle,
    /// Control disabled while `attempt` is being validated.
    Checking {
        /// Attempt awaiting its validation result.
        attempt: AttemptId,
    },
    /// The form was handed to the page. Terminal.
    Submitted {
        /// Attempt that released the form.
        attempt: AttemptId,
    },
}

/// Submission gate for one page.
#[derive(Debug, Clone)]
pub struct SubmissionGate {
    config: GateConfig,
    state: GateState,
    /// Last attempt id handed out; 0 before the first submission.
    latest_attempt: AttemptId,
    /// Attempt whose notice is currently shown in the input, if any.
    notice_owner: Option<AttemptId>,
}

impl SubmissionGate {
    /// Create a gate in the `Idle` state.
    pub fn new(config: GateConfig) -> Self {
        Self { config, state: GateState::Idle, latest_attempt: 0, notice_owner: None }
    }

    /// Current state.
    pub fn state(&self) -> GateState {
        self.state
    }

    /// Id of the most recent attempt, 0 if none yet.
    pub fn latest_attempt(&self) -> AttemptId {
        self.latest_attempt
    }

    /// Whether a notice is currently displayed in the input.
    pub fn notice_shown(&self) -> bool {
        self.notice_owner.is_some()
    }

    /// Gate configuration.
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Process an event and return resulting actions.
    ///
    /// # Errors
    ///
    /// Returns `GateError` if the event is not valid in the current state.
    /// State is unchanged in that case.
    pub fn handle(&mut self, event: GateEvent) -> Result<Vec<GateAction>, GateError> {
        match event {
            GateEvent::Submit { raw } => self.handle_submit(&raw),
            GateEvent::ValidationResolved { attempt, outcome } => {
                self.handle_resolved(attempt, outcome)
            },
            GateEvent::ResetDue { attempt } => Ok(self.handle_reset(attempt)),
        }
    }

    fn handle_submit(&mut self, raw: &str) -> Result<Vec<GateAction>, GateError> {
        match self.state {
            GateState::Idle => {},
            GateState::Checking { attempt } => return Err(GateError::AttemptInFlight { attempt }),
            GateState::Submitted { attempt } => {
                return Err(GateError::AlreadySubmitted { attempt });
            },
        }

        self.latest_attempt += 1;
        let attempt = self.latest_attempt;
        // A newer attempt supersedes any notice still waiting for its reset.
        self.notice_owner = None;
        let guess = GuessInput::normalize(raw);

        if !guess.has_valid_length() {
            self.notice_owner = Some(attempt);
            return Ok(vec![
                GateAction::ShowNotice {
                    kind: NoticeKind::LengthWarning,
                    text: self.config.messages.length_prompt.clone(),
                    color: self.config.markers.length_warning.clone(),
                },
                GateAction::log(
                    LogLevel::Debug,
                    format!(
                        "attempt {attempt}: {} letters, need {GUESS_LEN}; not validating",
                        guess.len()
                    ),
                ),
                GateAction::ScheduleReset { attempt, after: self.config.reset_delay() },
            ]);
        }

        self.state = GateState::Checking { attempt };

        Ok(vec![
            GateAction::LockControl { label: self.config.messages.checking_label.clone() },
            GateAction::Validate { attempt, guess },
        ])
    }

    fn handle_resolved(
        &mut self,
        attempt: AttemptId,
        outcome: ValidationOutcome,
    ) -> Result<Vec<GateAction>, GateError> {
        if self.state != (GateState::Checking { attempt }) {
            return Err(GateError::UnknownAttempt { attempt });
        }

        match outcome {
            ValidationOutcome::Valid => {
                self.state = GateState::Submitted { attempt };
                Ok(vec![GateAction::SubmitNative { attempt }])
            },

            ValidationOutcome::Invalid => {
                self.state = GateState::Idle;
                self.notice_owner = Some(attempt);
                Ok(vec![
                    GateAction::ShowNotice {
                        kind: NoticeKind::InvalidWord,
                        text: self.config.messages.invalid_word.clone(),
                        color: self.config.markers.invalid_word.clone(),
                    },
                    GateAction::UnlockControl { label: self.config.messages.idle_label.clone() },
                    GateAction::ScheduleReset { attempt, after: self.config.reset_delay() },
                ])
            },

            // Fail open: a broken dictionary check must not block the game.
            ValidationOutcome::TransportFailed { reason } => {
                self.state = GateState::Submitted { attempt };
                Ok(vec![
                    GateAction::log(
                        LogLevel::Error,
                        format!("attempt {attempt}: validation unavailable, submitting: {reason}"),
                    ),
                    GateAction::SubmitNative { attempt },
                ])
            },
        }
    }

    fn handle_reset(&mut self, attempt: AttemptId) -> Vec<GateAction> {
        if self.notice_owner != Some(attempt) {
            return vec![GateAction::log(
                LogLevel::Debug,
                format!("attempt {attempt}: stale reset ignored (latest is {})", self.latest_attempt),
            )];
        }

        self.notice_owner = None;
        vec![GateAction::ClearNotice, GateAction::FocusInput]
    }
}
