//! Form field sets and the results-form normalization.

use std::collections::BTreeMap;

use crate::config::{
    FIELD_SEARCH_TYPE, RESULTS_DRILL_FIELDS, RESULTS_EMPTY_FIELDS, SEARCH_TYPE_DRILL,
};
use crate::parse::document::{FieldEntry, FormDocument, ScrapedPage};

/// Form field names mapped to their values, as scraped from one page.
///
/// A field can be present with no value (`None`); it is still submitted, as an
/// empty value. Inserting a name that already exists replaces its value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    fields: BTreeMap<String, Option<String>>,
}

impl FormFields {
    /// Creates an empty field set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Extracts the fields of a page: hidden inputs, then selects, then text
    /// inputs. Later entries win over earlier ones with the same name.
    pub fn from_document<D: FormDocument>(document: &D) -> Self {
        let mut fields = Self::new();
        fields.extend(document.hidden_inputs());
        fields.extend(document.select_fields());
        fields.extend(document.text_inputs());
        fields
    }

    /// Parses `html` and extracts its fields.
    pub fn from_html(html: &str) -> Self {
        Self::from_document(&ScrapedPage::parse(html))
    }

    /// The value of `name`, if the field is present and has one.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(|value| value.as_deref())
    }

    /// True if the field exists, with or without a value.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// True if the field is missing, has no value, or has an empty value.
    pub fn is_blank(&self, name: &str) -> bool {
        self.get(name).map_or(true, str::is_empty)
    }

    /// Sets `name` to `value`.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.fields.insert(name.to_string(), Some(value.into()));
    }

    /// Keeps `name` in the set with no value.
    pub fn set_absent(&mut self, name: &str) {
        self.fields.insert(name.to_string(), None);
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if no fields were extracted.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
    }

    /// Name/value pairs for a form-encoded body; absent values become empty.
    pub fn to_form_pairs(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.clone(), value.clone().unwrap_or_default()))
            .collect()
    }
}

impl Extend<FieldEntry> for FormFields {
    fn extend<I: IntoIterator<Item = FieldEntry>>(&mut self, iter: I) {
        self.fields.extend(iter);
    }
}

impl FromIterator<FieldEntry> for FormFields {
    fn from_iter<I: IntoIterator<Item = FieldEntry>>(iter: I) -> Self {
        let mut fields = Self::new();
        fields.extend(iter);
        fields
    }
}

/// Fills in the fields the results view requires before it is submitted.
///
/// Missing or empty date/range fields are kept as present-but-empty, and the
/// drill-down ids fall back to `issuer_id`. Non-empty values are never touched,
/// except the search type: whenever it is set, it becomes the drill code.
pub fn tidy_results_form(fields: &mut FormFields, issuer_id: &str) {
    for name in RESULTS_EMPTY_FIELDS {
        if fields.is_blank(name) {
            fields.set_absent(name);
        }
    }
    for name in RESULTS_DRILL_FIELDS {
        if fields.is_blank(name) {
            fields.set(name, issuer_id);
        }
    }
    if !fields.is_blank(FIELD_SEARCH_TYPE) {
        fields.set(FIELD_SEARCH_TYPE, SEARCH_TYPE_DRILL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(entries: &[(&str, Option<&str>)]) -> FormFields {
        entries
            .iter()
            .map(|(name, value)| (name.to_string(), value.map(str::to_string)))
            .collect()
    }

    #[test]
    fn test_from_html_layers_text_over_hidden() {
        let form = FormFields::from_html(
            r#"<form>
                 <input type="hidden" name="dup" value="hidden">
                 <input type="text" name="dup" value="text">
                 <input type="HIDDEN" name="jspSynchronizerToken" value="abc">
                 <select name="FROM_DAY"><option value="1">1</option></select>
               </form>"#,
        );
        assert_eq!(form.get("dup"), Some("text"));
        assert_eq!(form.get("jspSynchronizerToken"), Some("abc"));
        // Unselected select: present, no value
        assert!(form.contains("FROM_DAY"));
        assert_eq!(form.get("FROM_DAY"), None);
        assert_eq!(form.len(), 3);
    }

    #[test]
    fn test_is_blank() {
        let form = fields(&[("a", Some("x")), ("b", Some("")), ("c", None)]);
        assert!(!form.is_blank("a"));
        assert!(form.is_blank("b"));
        assert!(form.is_blank("c"));
        assert!(form.is_blank("missing"));
    }

    #[test]
    fn test_to_form_pairs_keeps_absent_fields() {
        let form = fields(&[("FROM_MONTH", None), ("ISSUER_SEARCH_VALUE", Some("00012345"))]);
        assert_eq!(
            form.to_form_pairs(),
            vec![
                ("FROM_MONTH".to_string(), String::new()),
                ("ISSUER_SEARCH_VALUE".to_string(), "00012345".to_string()),
            ]
        );
    }

    #[test]
    fn test_tidy_fills_missing_fields() {
        let mut form = FormFields::new();
        tidy_results_form(&mut form, "00012345");

        for name in ["FROM_MONTH", "FROM_DAY", "ALPHA_RANGE_FROM", "ALPHA_RANGE_TO"] {
            assert!(form.contains(name), "{name} should be present");
            assert_eq!(form.get(name), None);
        }
        assert_eq!(form.get("ATTRIB_DRILL_ID"), Some("00012345"));
        assert_eq!(form.get("ATTRIB_DRILL_ID2"), Some("00012345"));
        // No search type on the page: none is invented
        assert!(!form.contains("ISSUER_SEARCH_TYPE"));
    }

    #[test]
    fn test_tidy_never_overwrites_present_values() {
        let mut form = fields(&[
            ("FROM_MONTH", Some("03")),
            ("FROM_DAY", Some("15")),
            ("ALPHA_RANGE_FROM", Some("A")),
            ("ALPHA_RANGE_TO", Some("Z")),
            ("ATTRIB_DRILL_ID", Some("777")),
            ("ATTRIB_DRILL_ID2", Some("888")),
        ]);
        let before = form.clone();
        tidy_results_form(&mut form, "00012345");
        assert_eq!(form, before);
    }

    #[test]
    fn test_tidy_replaces_empty_drill_ids() {
        let mut form = fields(&[("ATTRIB_DRILL_ID", Some("")), ("ATTRIB_DRILL_ID2", None)]);
        tidy_results_form(&mut form, "42");
        assert_eq!(form.get("ATTRIB_DRILL_ID"), Some("42"));
        assert_eq!(form.get("ATTRIB_DRILL_ID2"), Some("42"));
    }

    #[test]
    fn test_tidy_forces_search_type_when_set() {
        for current in ["3", "2", "anything"] {
            let mut form = fields(&[("ISSUER_SEARCH_TYPE", Some(current))]);
            tidy_results_form(&mut form, "1");
            assert_eq!(form.get("ISSUER_SEARCH_TYPE"), Some("2"));
        }
    }

    #[test]
    fn test_tidy_leaves_blank_search_type() {
        let mut form = fields(&[("ISSUER_SEARCH_TYPE", Some(""))]);
        tidy_results_form(&mut form, "1");
        assert_eq!(form.get("ISSUER_SEARCH_TYPE"), Some(""));
    }
}
