//! Wordgate terminal front end
//!
//! Plays the guess form from a terminal: every line typed is a submission of
//! the form, gated by the same [`wordgate_core::GateDriver`] the browser
//! binding uses. Released guesses are posted to the game server.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod error;
pub mod http;
pub mod session;
pub mod system_env;
pub mod terminal;

pub use error::CliError;
pub use http::GameClient;
pub use session::{Settings, has_celebration_marker, run};
pub use system_env::SystemEnv;
pub use terminal::{TerminalHost, confetti_rows};
