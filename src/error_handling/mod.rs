//! Error handling.
//!
//! Errors are split into:
//! - **Initialization errors**: logger, HTTP client, invalid pause bounds
//! - **Session errors**: transport failures, operator abort, dump I/O
//!
//! "No transactions" is a normal lookup outcome and has no error variant.

mod types;

// Re-export public API
pub use types::{InitializationError, SessionError};
