//! Wordgate core
//!
//! Action-based submission gate for a word-guessing form. A guess is only
//! allowed to reach the server once a dictionary check endpoint has accepted
//! it, with the submit control kept consistent with the in-flight check.
//!
//! # Architecture
//!
//! The gate is a pure state machine that:
//! - Receives events from the host (submissions, validation results, due
//!   resets)
//! - Produces actions for the host to execute (notices, control updates,
//!   validation requests, native submission)
//! - Never touches the DOM, the network or a clock itself
//!
//! [`GateDriver`] connects it to a [`Validator`], a [`GateHost`] and an
//! [`Environment`], so browser, terminal and simulated hosts share one
//! implementation.
//!
//! # Components
//!
//! - [`SubmissionGate`]: the state machine
//! - [`GuessInput`]: normalized guess
//! - [`ValidationOutcome`]: valid / invalid / transport failure
//! - [`PagePlan`]: page-load affordances
//! - [`ConfettiPlan`]: celebration particles

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod config;
pub mod confetti;
pub mod driver;
pub mod env;
mod error;
mod event;
mod gate;
mod guess;
pub mod page;
mod validation;

pub use config::{ConfettiConfig, GateConfig, GateMessages, MarkerColors, PageConfig, WordgateConfig};
pub use confetti::{ConfettiPlan, Particle};
pub use driver::{AttemptReport, GateDriver, GateHost, Validator};
pub use env::Environment;
pub use error::{ConfigError, GateError};
pub use event::{AttemptId, ControlState, GateAction, GateEvent, LogLevel, NoticeKind};
pub use gate::{GateState, SubmissionGate};
pub use guess::{GUESS_LEN, GuessInput};
pub use page::{PageAction, PagePlan, PagePresence};
pub use validation::{
    ValidationError, ValidationOutcome, ValidationResult, check_url, parse_check_response,
};
