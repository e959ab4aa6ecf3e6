//! Deterministic simulation harness for the wordgate submission gate.
//!
//! Implementations of the `Environment`, `Validator` and `GateHost` traits
//! for reproducible tests: a paused tokio clock stands in for the browser's
//! timers, a seeded ChaCha RNG for `Math.random()`, and [`SimPage`] records
//! every UI mutation the gate requests.
//!
//! # Model-Based Testing
//!
//! The `model` module provides a reference implementation of the gate.
//! Operations are applied to both the model and the real gate, and their
//! observable states are compared.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod model;
pub mod sim_env;
pub mod sim_page;
pub mod validators;

pub use model::{GuessShape, ModelGate, ObservableGate, Operation, OperationResult, Verdict};
pub use sim_env::{SimEnv, settle};
pub use sim_page::{PageSnapshot, SimPage, SubmittedForm};
pub use validators::{ManualValidator, ScriptedValidator};
