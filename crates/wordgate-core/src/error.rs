//! Gate and configuration error types.

use thiserror::Error;

use crate::event::AttemptId;

/// Errors from feeding an event the gate cannot accept in its current state.
///
/// None of these is fatal to the page: the gate's state is left untouched
/// and the host may simply log and drop the event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    /// A submission arrived while another attempt is being validated.
    #[error("attempt {attempt} is still being validated")]
    AttemptInFlight {
        /// The attempt currently awaiting its validation result.
        attempt: AttemptId,
    },

    /// A submission arrived after the form was already handed to the page.
    #[error("form already submitted by attempt {attempt}")]
    AlreadySubmitted {
        /// The attempt that submitted the form.
        attempt: AttemptId,
    },

    /// A validation result arrived for an attempt that is not in flight.
    #[error("no attempt {attempt} awaiting validation")]
    UnknownAttempt {
        /// The attempt the result was tagged with.
        attempt: AttemptId,
    },
}

impl GateError {
    /// Returns true if retrying the submission later can succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::AttemptInFlight { .. } => true,
            Self::AlreadySubmitted { .. } | Self::UnknownAttempt { .. } => false,
        }
    }
}

/// Errors from loading or checking configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration document is not valid JSON for the schema.
    #[error("invalid config document: {0}")]
    Json(#[from] serde_json::Error),

    /// Both error classes would look the same to the user.
    #[error("length warning and invalid word share the marker color {color:?}")]
    IndistinctMarkers {
        /// The shared color.
        color: String,
    },

    /// A user-visible string is empty.
    #[error("message {field} must not be empty")]
    EmptyMessage {
        /// Config field name.
        field: &'static str,
    },

    /// The reset delay is zero, so notices would never be visible.
    #[error("reset delay must be positive")]
    ZeroResetDelay,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_flight_is_transient() {
        assert!(GateError::AttemptInFlight { attempt: 3 }.is_transient());
        assert!(!GateError::AlreadySubmitted { attempt: 3 }.is_transient());
        assert!(!GateError::UnknownAttempt { attempt: 3 }.is_transient());
    }

    #[test]
    fn error_display() {
        let err = GateError::UnknownAttempt { attempt: 7 };
        assert_eq!(err.to_string(), "no attempt 7 awaiting validation");

        let err = ConfigError::IndistinctMarkers { color: "red".to_string() };
        assert_eq!(err.to_string(), "length warning and invalid word share the marker color \"red\"");
    }
}
