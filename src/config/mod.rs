//! Application configuration and constants.
//!
//! This module provides:
//! - Protocol constants (endpoints, form field names, codes, pause bounds)
//! - Browser header values for the results request
//! - CLI option types and parsing

mod constants;
mod headers;
mod types;

// Re-export all constants
pub use constants::*;
pub use headers::*;
pub use types::{Cli, Config, Endpoints, LogFormat, LogLevel, PacingMode};
