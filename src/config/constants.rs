//! Configuration constants.
//!
//! This module defines the SEDI endpoints, the form field names and codes the
//! server expects, and the default pacing bounds.

// Endpoints
/// Insider information by issuer: search page (GET) and search submission (POST)
pub const ISSUER_SEARCH_URL: &str = "https://www.sedi.ca/sedi/SVTIIBIselectIssuer?locale=en_CA";
/// Transactions view for the issuer selected by the previous search
pub const ISSUER_RESULT_URL: &str = "https://www.sedi.ca/sedi/SVTIIBIviewResults?locale=en_CA";

// Pacing
/// Lower bound (inclusive) of the timed pause, in seconds
pub const DEFAULT_MIN_PAUSE_SECS: u64 = 90;
/// Upper bound (exclusive) of the timed pause, in seconds
pub const DEFAULT_MAX_PAUSE_SECS: u64 = 450;

/// Default directory for downloaded transaction pages
pub const DEFAULT_OUTPUT_DIR: &str = "./output";

/// Default User-Agent string for HTTP requests.
///
/// Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

// Form field names
/// Search criteria drop-down (name, number, ...)
pub const FIELD_SEARCH_CRITERIA_SELECT_BOX: &str = "ISSUER_SEARCH_CRITERIA_SELECT_BOX";
/// Search type code; distinguishes a resubmitted search from a drill-down
pub const FIELD_SEARCH_TYPE: &str = "ISSUER_SEARCH_TYPE";
/// Page transition marker
pub const FIELD_PAGE_NAME: &str = "pageName";
/// The issuer number being searched
pub const FIELD_SEARCH_VALUE: &str = "ISSUER_SEARCH_VALUE";
/// Results period start month
pub const FIELD_FROM_MONTH: &str = "FROM_MONTH";
/// Results period start day
pub const FIELD_FROM_DAY: &str = "FROM_DAY";
/// Insider name range start
pub const FIELD_ALPHA_RANGE_FROM: &str = "ALPHA_RANGE_FROM";
/// Insider name range end
pub const FIELD_ALPHA_RANGE_TO: &str = "ALPHA_RANGE_TO";
/// Issuer selected for drill-down
pub const FIELD_DRILL_ID: &str = "ATTRIB_DRILL_ID";
/// Second drill-down id; SEDI expects the same issuer number
pub const FIELD_DRILL_ID2: &str = "ATTRIB_DRILL_ID2";

/// Fields the results view requires to be submitted, even when empty
pub const RESULTS_EMPTY_FIELDS: &[&str] = &[
    FIELD_FROM_MONTH,
    FIELD_FROM_DAY,
    FIELD_ALPHA_RANGE_FROM,
    FIELD_ALPHA_RANGE_TO,
];

/// Drill-down fields that fall back to the issuer number
pub const RESULTS_DRILL_FIELDS: &[&str] = &[FIELD_DRILL_ID, FIELD_DRILL_ID2];

// Protocol codes
/// Search criteria option "Issuer number"
pub const SEARCH_CRITERIA_ISSUER_NUMBER: &str = "7";
/// Search type sent when resubmitting the search page
pub const SEARCH_TYPE_RESUBMIT: &str = "3";
/// Search type sent when drilling into an issuer's transactions
pub const SEARCH_TYPE_DRILL: &str = "2";
/// Page transition marker for the resubmitted search page
pub const PAGE_NAME_RESUBMIT: &str = "resubmit";

/// Substring (lowercase) that marks a table row as an error message
pub const ERROR_ROW_MARKER: &str = "error";
