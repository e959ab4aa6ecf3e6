//! CLI errors.

use thiserror::Error;
use wordgate_core::ConfigError;

/// Errors that end a terminal session.
#[derive(Debug, Error)]
pub enum CliError {
    /// Terminal I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The game server could not be reached or refused the form.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Config file could not be read.
    #[error("cannot read config {path}: {source}")]
    ConfigFile {
        /// Path given on the command line.
        path: String,
        /// Underlying error.
        source: std::io::Error,
    },

    /// Config file content is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
