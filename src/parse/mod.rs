//! HTML parsing for the form replay.
//!
//! This module provides:
//! - The [`FormDocument`] query trait and its `scraper` backend
//! - Form field extraction and the results-form normalization
//! - Search response classification (results vs. no results)

mod document;
mod form;
mod page;

// Re-export public API
pub use document::{FieldEntry, FormDocument, ScrapedPage};
pub use form::{tidy_results_form, FormFields};
pub use page::{classify, classify_html, PageKind};
