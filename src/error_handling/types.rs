//! Error type definitions.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// Timed pacing needs a non-empty `[min, max)` range.
    #[error("Invalid pause bounds: min ({min}s) must be less than max ({max}s)")]
    InvalidPauseBounds {
        /// Lower bound in seconds
        min: u64,
        /// Upper bound in seconds
        max: u64,
    },
}

/// Errors raised by the disclosure session.
///
/// A lookup that finds no transactions is not an error; it is `Ok(None)`.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Network or HTTP client failure. Never retried.
    #[error("HTTP request failed: {0}")]
    Transport(#[from] ReqwestError),

    /// The operator chose to stop at an interactive pause.
    #[error("Run aborted by operator")]
    Aborted,

    /// Reading the operator prompt or writing the response dump failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SessionError {
    /// Returns true for the operator abort, which ends the run successfully.
    pub fn is_abort(&self) -> bool {
        matches!(self, SessionError::Aborted)
    }
}
