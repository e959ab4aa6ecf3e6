//! Events fed into the gate and actions it produces.

use std::time::Duration;

use crate::{guess::GuessInput, validation::ValidationOutcome};

/// Submission attempt counter. Starts at 1 and never repeats within a page.
pub type AttemptId = u64;

/// Events the host feeds into [`SubmissionGate`](crate::SubmissionGate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateEvent {
    /// The guess form was submitted. The host has already prevented the
    /// default submission.
    Submit {
        /// Field content at submission time, unnormalized.
        raw: String,
    },

    /// The validation request for `attempt` completed.
    ValidationResolved {
        /// Attempt the request belonged to.
        attempt: AttemptId,
        /// What the endpoint said, or why it could not say.
        outcome: ValidationOutcome,
    },

    /// The delayed reset scheduled by `attempt` is due.
    ResetDue {
        /// Attempt that scheduled the reset.
        attempt: AttemptId,
    },
}

/// Which user-visible error class a notice belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeKind {
    /// Normalized guess is not five letters long.
    LengthWarning,
    /// The endpoint rejected the word.
    InvalidWord,
}

/// Log severity for [`GateAction::Log`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Debug
    Debug,
    /// Info
    Info,
    /// Warn
    Warn,
    /// Error
    Error,
}

/// Enabled state and label of the submit control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlState {
    /// Whether the control accepts clicks.
    pub enabled: bool,
    /// Text shown on the control.
    pub label: String,
}

/// Actions produced by the gate for the host to execute, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateAction {
    /// Replace the input content with `text` and color it.
    ShowNotice {
        /// Error class, for hosts that style by class instead of color.
        kind: NoticeKind,
        /// Message to put in the input field.
        text: String,
        /// CSS color for the field text.
        color: String,
    },

    /// Empty the input field and remove the notice color.
    ClearNotice,

    /// Move keyboard focus to the input field.
    FocusInput,

    /// Disable the submit control and show an in-progress label.
    LockControl {
        /// In-progress label.
        label: String,
    },

    /// Enable the submit control and restore its idle label.
    UnlockControl {
        /// Idle label.
        label: String,
    },

    /// Issue exactly one validation request for `guess`.
    Validate {
        /// Attempt to tag the result with.
        attempt: AttemptId,
        /// Normalized guess.
        guess: GuessInput,
    },

    /// Feed [`GateEvent::ResetDue`] back after `after` has elapsed.
    ScheduleReset {
        /// Attempt that owns the notice being reset.
        attempt: AttemptId,
        /// Delay before the reset.
        after: Duration,
    },

    /// Perform the page's ordinary form submission, unmodified.
    SubmitNative {
        /// Attempt that released the form.
        attempt: AttemptId,
    },

    /// Diagnostic message.
    Log {
        /// Severity.
        level: LogLevel,
        /// Message text.
        message: String,
    },
}

impl GateAction {
    /// Shorthand used by the gate.
    pub(crate) fn log(level: LogLevel, message: impl Into<String>) -> Self {
        Self::Log { level, message: message.into() }
    }
}
