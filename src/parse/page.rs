//! Search response classification.

use crate::parse::document::{FormDocument, ScrapedPage};

/// What kind of page the issuer search returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    /// A table row mentions an error: no transactions for this issuer.
    NoResults,
    /// The search matched; the page carries the form for the results view.
    Results,
}

/// Classifies a page by its error rows.
///
/// Matching is a case-insensitive substring test on each row's text, so a row
/// reading "No Error Found Here" still marks the page as `NoResults`.
pub fn classify<D: FormDocument>(document: &D) -> PageKind {
    let error_rows = document.error_rows();
    if let Some(first) = error_rows.first() {
        log::debug!(
            "Classified page as no-results ({} error row(s), first: '{}')",
            error_rows.len(),
            first.trim()
        );
        PageKind::NoResults
    } else {
        PageKind::Results
    }
}

/// Parses `html` and classifies it.
pub fn classify_html(html: &str) -> PageKind {
    classify(&ScrapedPage::parse(html))
}
