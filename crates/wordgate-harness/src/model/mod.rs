//! Reference model for model-based testing.
//!
//! The model is a deliberately naive restatement of the gate's rules: no
//! action lists, no configuration, only counters and flags. It serves as
//! the oracle against which [`SubmissionGate`](wordgate_core::SubmissionGate)
//! is verified.
//!
//! # Design Principles
//!
//! - Simplicity: The model should be obviously correct
//! - Rules not mechanics: Captures WHAT, not HOW
//! - Deterministic: Same inputs produce same outputs

mod gate;
pub mod operation;

pub use gate::{ModelGate, ObservableGate};
pub use operation::{GuessShape, Operation, OperationResult, Verdict};
