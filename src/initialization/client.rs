//! HTTP client initialization.

use std::time::Duration;

use reqwest::ClientBuilder;

use crate::session::SessionConfig;

/// Initializes the HTTP client used by a disclosure session.
///
/// Creates a `reqwest::Client` configured with:
/// - A cookie store, so the server-side session survives across requests
/// - User-Agent header from the session config
/// - Timeout only when one is configured (the client default is none)
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &SessionConfig) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = ClientBuilder::new()
        .cookie_store(true)
        .user_agent(config.user_agent.clone());
    if let Some(secs) = config.timeout_seconds {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder.build()
}
