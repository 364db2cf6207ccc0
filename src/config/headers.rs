//! HTTP header values.
//!
//! The results view only serves the full transaction table when the follow-up
//! request carries the headers a desktop browser would send.

/// Accept header for the results view request
pub const BROWSER_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
/// Accept-Encoding header for the results view request
pub const BROWSER_ACCEPT_ENCODING: &str = "gzip,deflate,sdch";
/// Accept-Language header for the results view request
pub const BROWSER_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.8";
