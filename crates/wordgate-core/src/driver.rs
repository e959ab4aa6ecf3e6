//! Async driver running gate actions against a host.
//!
//! The driver owns the gate and feeds it events; the host owns the UI. The
//! gate is borrowed only between awaits, so while one attempt sleeps on its
//! delayed reset the host may start another.

use std::{cell::RefCell, fmt};

use async_trait::async_trait;

use crate::{
    config::GateConfig,
    env::Environment,
    error::GateError,
    event::{AttemptId, ControlState, GateAction, GateEvent, LogLevel},
    gate::{GateState, SubmissionGate},
    guess::GuessInput,
    validation::{ValidationError, ValidationOutcome, ValidationResult},
};

/// Dictionary check client.
#[async_trait(?Send)]
pub trait Validator {
    /// Issue one request for `guess` and await its answer.
    ///
    /// Non-2xx answers, malformed bodies and network errors are all
    /// `Err`; only a well-formed answer is `Ok`.
    async fn check(&self, guess: &GuessInput) -> Result<ValidationResult, ValidationError>;
}

/// The UI surface the gate acts on: input field, submit control and form.
pub trait GateHost {
    /// Put `text` into the input field and color it.
    fn show_notice(&self, text: &str, color: &str);

    /// Empty the input field and remove its color.
    fn clear_notice(&self);

    /// Focus the input field.
    fn focus_input(&self);

    /// Update the submit control.
    fn set_control(&self, state: ControlState);

    /// Run the page's ordinary form submission with the form as it is.
    fn submit_native(&self);

    /// Record a diagnostic message.
    fn log(&self, level: LogLevel, message: &str);
}

/// How an attempt ended, from the driver's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptReport {
    /// Guess had the wrong length; nothing was sent.
    LengthRejected {
        /// Attempt id.
        attempt: AttemptId,
    },
    /// Dictionary accepted the word; the form was submitted.
    Submitted {
        /// Attempt id.
        attempt: AttemptId,
    },
    /// Dictionary rejected the word.
    Rejected {
        /// Attempt id.
        attempt: AttemptId,
    },
    /// Validation failed; the form was submitted anyway.
    FailedOpen {
        /// Attempt id.
        attempt: AttemptId,
    },
}

/// Drives one [`SubmissionGate`] for the lifetime of a page.
pub struct GateDriver<E: Environment, V: Validator, H: GateHost> {
    gate: RefCell<SubmissionGate>,
    env: E,
    validator: V,
    host: H,
}

impl<E: Environment, V: Validator, H: GateHost> GateDriver<E, V, H> {
    /// Create a driver with a fresh gate.
    pub fn new(env: E, config: GateConfig, validator: V, host: H) -> Self {
        Self { gate: RefCell::new(SubmissionGate::new(config)), env, validator, host }
    }

    /// Current gate state.
    pub fn state(&self) -> GateState {
        self.gate.borrow().state()
    }

    /// The host this driver acts on.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Handle one form submission to completion.
    ///
    /// Returns once the attempt has concluded and any delayed reset it
    /// scheduled has run. The host must have prevented the default
    /// submission before calling this.
    pub async fn submit(&self, raw: &str) -> Result<AttemptReport, GateError> {
        let actions = self.feed(GateEvent::Submit { raw: raw.to_string() })?;
        let attempt = self.gate.borrow().latest_attempt();
        tracing::debug!(attempt, "submission received");

        let mut report = AttemptReport::LengthRejected { attempt };
        let mut pending = actions;

        // Each batch may request a validation or a reset, which yields the
        // next batch.
        while !pending.is_empty() {
            let mut next = Vec::new();

            for action in pending {
                match action {
                    GateAction::Validate { attempt, guess } => {
                        let outcome = self.validate(attempt, &guess).await;
                        report = match outcome {
                            ValidationOutcome::Valid => AttemptReport::Submitted { attempt },
                            ValidationOutcome::Invalid => AttemptReport::Rejected { attempt },
                            ValidationOutcome::TransportFailed { .. } => {
                                AttemptReport::FailedOpen { attempt }
                            },
                        };
                        next.extend(self.feed(GateEvent::ValidationResolved { attempt, outcome })?);
                    },
                    GateAction::ScheduleReset { attempt, after } => {
                        self.env.sleep(after).await;
                        next.extend(self.feed(GateEvent::ResetDue { attempt })?);
                    },
                    other => self.execute(other),
                }
            }

            pending = next;
        }

        Ok(report)
    }

    async fn validate(&self, attempt: AttemptId, guess: &GuessInput) -> ValidationOutcome {
        let started = self.env.now();
        let result = self.validator.check(guess).await;
        let elapsed = self.env.now() - started;
        tracing::debug!(attempt, %guess, ?elapsed, ok = result.is_ok(), "validation finished");
        ValidationOutcome::from(result)
    }

    fn feed(&self, event: GateEvent) -> Result<Vec<GateAction>, GateError> {
        self.gate.borrow_mut().handle(event)
    }

    /// Execute an action that completes synchronously.
    fn execute(&self, action: GateAction) {
        match action {
            GateAction::ShowNotice { text, color, .. } => self.host.show_notice(&text, &color),
            GateAction::ClearNotice => self.host.clear_notice(),
            GateAction::FocusInput => self.host.focus_input(),
            GateAction::LockControl { label } => {
                self.host.set_control(ControlState { enabled: false, label });
            },
            GateAction::UnlockControl { label } => {
                self.host.set_control(ControlState { enabled: true, label });
            },
            GateAction::SubmitNative { attempt } => {
                tracing::debug!(attempt, "releasing form");
                self.host.submit_native();
            },
            GateAction::Log { level, message } => self.host.log(level, &message),
            GateAction::Validate { .. } | GateAction::ScheduleReset { .. } => {
                tracing::warn!("async action reached synchronous executor");
            },
        }
    }
}

impl<E: Environment, V: Validator, H: GateHost> fmt::Debug for GateDriver<E, V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GateDriver").field("gate", &self.gate).finish_non_exhaustive()
    }
}
