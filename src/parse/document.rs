//! HTML document queries needed by the form replay.
//!
//! The session never touches the DOM directly; it only asks a [`FormDocument`]
//! for form fields and error rows. [`ScrapedPage`] answers those questions with
//! `scraper`.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

use crate::config::ERROR_ROW_MARKER;

/// A form field name and its value (`None` when the page leaves it unset).
pub type FieldEntry = (String, Option<String>);

/// Queries a page must answer for form replay and result detection.
pub trait FormDocument {
    /// `<input>` elements whose `type` is exactly `hidden` or `HIDDEN`.
    fn hidden_inputs(&self) -> Vec<FieldEntry>;
    /// `<select>` elements with their selected value, `None` if nothing is selected.
    fn select_fields(&self) -> Vec<FieldEntry>;
    /// `<input>` elements whose `type` is exactly `text`.
    fn text_inputs(&self) -> Vec<FieldEntry>;
    /// Concatenated text of every table row that mentions "error" (any case).
    fn error_rows(&self) -> Vec<String>;
}

/// Hidden input markers; attribute values are compared verbatim.
const HIDDEN_TYPES: [&str; 2] = ["hidden", "HIDDEN"];
const TEXT_TYPE: &str = "text";

const INPUT_SELECTOR_STR: &str = "input[type]";
const SELECT_SELECTOR_STR: &str = "select";
const OPTION_SELECTOR_STR: &str = "option";
const ROW_SELECTOR_STR: &str = "tr";

fn parse_selector(selector_str: &str) -> Selector {
    Selector::parse(selector_str).unwrap_or_else(|e| {
        log::error!("Failed to parse CSS selector '{}': {}", selector_str, e);
        // Known-valid selector that matches nothing
        Selector::parse("*:not(*)").expect(
            "Fallback selector '*:not(*)' should always parse - this is a programming error",
        )
    })
}

static INPUT_SELECTOR: LazyLock<Selector> = LazyLock::new(|| parse_selector(INPUT_SELECTOR_STR));
static SELECT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector(SELECT_SELECTOR_STR));
static OPTION_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector(OPTION_SELECTOR_STR));
static ROW_SELECTOR: LazyLock<Selector> = LazyLock::new(|| parse_selector(ROW_SELECTOR_STR));

/// A response body parsed with `scraper`.
///
/// `scraper::Html` is not `Send`, so keep a `ScrapedPage` out of scope across
/// `.await` points.
pub struct ScrapedPage {
    document: Html,
}

impl ScrapedPage {
    /// Parses a full HTML document. Malformed markup is recovered, never rejected.
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    /// Named inputs whose `type` attribute equals `marker` exactly.
    fn inputs_of_type<'a>(&'a self, marker: &'a str) -> impl Iterator<Item = FieldEntry> + 'a {
        self.document
            .select(&INPUT_SELECTOR)
            .filter(move |input| input.value().attr("type") == Some(marker))
            .filter_map(named_value)
    }
}

/// Pairs an element's `name` with its `value` attribute; unnamed elements are
/// never submitted, so they are skipped.
fn named_value(element: ElementRef<'_>) -> Option<FieldEntry> {
    let name = element.value().attr("name")?;
    Some((
        name.to_string(),
        element.value().attr("value").map(str::to_string),
    ))
}

/// Value of the last `<option selected>`, as browsers resolve a single-choice
/// select: its `value` attribute verbatim, or its trimmed text when the
/// attribute is missing. Empty values count as unselected.
fn selected_value(select: ElementRef<'_>) -> Option<String> {
    let option = select
        .select(&OPTION_SELECTOR)
        .filter(|option| option.value().attr("selected").is_some())
        .last()?;
    let value = match option.value().attr("value") {
        Some(value) => value.to_string(),
        None => option.text().collect::<String>().trim().to_string(),
    };
    (!value.is_empty()).then_some(value)
}

impl FormDocument for ScrapedPage {
    fn hidden_inputs(&self) -> Vec<FieldEntry> {
        HIDDEN_TYPES
            .into_iter()
            .flat_map(|marker| self.inputs_of_type(marker))
            .collect()
    }

    fn select_fields(&self) -> Vec<FieldEntry> {
        self.document
            .select(&SELECT_SELECTOR)
            .filter_map(|select| {
                let name = select.value().attr("name")?;
                Some((name.to_string(), selected_value(select)))
            })
            .collect()
    }

    fn text_inputs(&self) -> Vec<FieldEntry> {
        self.inputs_of_type(TEXT_TYPE).collect()
    }

    fn error_rows(&self) -> Vec<String> {
        self.document
            .select(&ROW_SELECTOR)
            .map(|row| row.text().collect::<String>())
            .filter(|text| text.to_lowercase().contains(ERROR_ROW_MARKER))
            .collect()
    }
}
