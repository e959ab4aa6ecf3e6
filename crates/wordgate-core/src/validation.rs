//! Dictionary check endpoint contract.
//!
//! The endpoint is `GET {endpoint}/{guess}` and answers with a JSON object
//! carrying a boolean `valid`. Only a well-formed 2xx answer counts as a
//! verdict; everything else is a transport failure, which the gate treats
//! as fail-open.

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::guess::GuessInput;

/// Body of a successful check response. Extra fields are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the word is in the dictionary.
    pub valid: bool,
}

/// Why the check endpoint produced no verdict.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Endpoint answered with a non-2xx status.
    #[error("check endpoint returned status {code}")]
    Status {
        /// HTTP status code.
        code: u16,
    },

    /// Body was not a JSON object with a boolean `valid`.
    #[error("malformed check response: {reason}")]
    Body {
        /// Parser message.
        reason: String,
    },

    /// Request never completed.
    #[error("network error: {reason}")]
    Network {
        /// Transport message.
        reason: String,
    },
}

/// Resolution of one validation request.
///
/// Three variants so that every branch is handled by an exhaustive match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// Word accepted.
    Valid,
    /// Word rejected by the dictionary.
    Invalid,
    /// No verdict; the gate fails open.
    TransportFailed {
        /// Diagnostic text, never shown to the user.
        reason: String,
    },
}

impl From<Result<ValidationResult, ValidationError>> for ValidationOutcome {
    fn from(result: Result<ValidationResult, ValidationError>) -> Self {
        match result {
            Ok(ValidationResult { valid: true }) => Self::Valid,
            Ok(ValidationResult { valid: false }) => Self::Invalid,
            Err(e) => Self::TransportFailed { reason: e.to_string() },
        }
    }
}

/// Interpret a raw HTTP answer from the check endpoint.
pub fn parse_check_response(status: u16, body: &[u8]) -> Result<ValidationResult, ValidationError> {
    if !(200..300).contains(&status) {
        return Err(ValidationError::Status { code: status });
    }

    serde_json::from_slice(body).map_err(|e| ValidationError::Body { reason: e.to_string() })
}

/// Build the check URL for `guess` under `endpoint`.
///
/// The guess is encoded as a single path segment, so characters such as
/// `/` or `?` cannot change the route.
pub fn check_url(endpoint: &str, guess: &GuessInput) -> String {
    let segment = utf8_percent_encode(guess.as_str(), NON_ALPHANUMERIC);
    format!("{}/{segment}", endpoint.trim_end_matches('/'))
}
