//! Error types for the qtictactoe crate

use thiserror::Error;

/// Main error type for the qtictactoe crate
///
/// Rejected moves and a busy trainer are not errors: they are reported through
/// `bool`, `Option` and [`crate::q_learning::TrainingLaunch`] return values.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("position {position} is out of bounds (must be 0-8)")]
    InvalidPosition { position: usize },

    #[error("invalid fingerprint '{fingerprint}' (expected 9 cells of 'X', 'O' or '_')")]
    InvalidFingerprint { fingerprint: String },

    #[error("invalid state-action key '{key}' (expected '<fingerprint>-<cell>')")]
    InvalidStateActionKey { key: String },

    #[error("background training thread panicked")]
    TrainingPanicked,

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;
