//! Operations for model-based testing.
//!
//! Operations are generated randomly by proptest (or decoded from fuzz
//! input) and applied to both the model and the real gate.

use arbitrary::Arbitrary;
use wordgate_core::{ValidationError, ValidationOutcome, ValidationResult};

/// Operations that can be applied to a gate.
#[derive(Debug, Clone, Arbitrary)]
pub enum Operation {
    /// The user submits the form.
    Submit {
        /// What the field contains.
        shape: GuessShape,
    },

    /// The in-flight validation request (or a bogus one) completes.
    Resolve {
        /// The endpoint's answer.
        verdict: Verdict,
        /// Tag the result with an older attempt than the latest.
        stale: bool,
    },

    /// A delayed reset fires.
    FireReset {
        /// How many attempts back from the latest the reset belongs to.
        back: u8,
    },
}

/// Compact description of field content.
#[derive(Debug, Clone, Copy, Arbitrary)]
pub struct GuessShape {
    /// Letter count hint (taken modulo 9).
    pub letters: u8,
    /// Surround with whitespace.
    pub padded: bool,
    /// Use lowercase letters.
    pub lowercase: bool,
}

impl GuessShape {
    /// Number of letters the field holds after trimming.
    pub fn len(self) -> usize {
        usize::from(self.letters % 9)
    }

    /// True if the trimmed field is empty.
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Expand to raw field content.
    pub fn to_raw(self) -> String {
        let base = if self.lowercase { 'a' } else { 'A' };
        let word: String =
            (0..self.len()).map(|i| char::from(base as u8 + (i as u8 * 7) % 26)).collect();
        if self.padded { format!("  {word}\t") } else { word }
    }
}

/// Possible endpoint answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Arbitrary)]
pub enum Verdict {
    /// `{"valid": true}`
    Valid,
    /// `{"valid": false}`
    Invalid,
    /// Connection failed.
    NetworkError,
    /// 5xx response.
    ServerError,
    /// 200 with a body that is not the expected JSON.
    MalformedBody,
}

impl Verdict {
    /// What the validator returns for this verdict.
    pub fn to_answer(self) -> Result<ValidationResult, ValidationError> {
        match self {
            Self::Valid => Ok(ValidationResult { valid: true }),
            Self::Invalid => Ok(ValidationResult { valid: false }),
            Self::NetworkError => {
                Err(ValidationError::Network { reason: "connection reset".to_string() })
            },
            Self::ServerError => Err(ValidationError::Status { code: 503 }),
            Self::MalformedBody => {
                Err(ValidationError::Body { reason: "expected value at line 1".to_string() })
            },
        }
    }

    /// The outcome the gate receives for this verdict.
    pub fn to_outcome(self) -> ValidationOutcome {
        ValidationOutcome::from(self.to_answer())
    }
}

/// Result of applying an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationResult {
    /// Event accepted.
    Ok,
    /// Event refused in the current state.
    Rejected,
}

impl OperationResult {
    /// Check if operation succeeded.
    pub fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_expands_to_expected_length() {
        let shape = GuessShape { letters: 5, padded: true, lowercase: true };
        let raw = shape.to_raw();
        assert_eq!(raw.trim().len(), 5);
        assert!(raw.starts_with(' '));
        assert!(raw.trim().chars().all(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn transport_verdicts_fail_open() {
        for verdict in [Verdict::NetworkError, Verdict::ServerError, Verdict::MalformedBody] {
            assert!(matches!(verdict.to_outcome(), ValidationOutcome::TransportFailed { .. }));
        }
    }
}
