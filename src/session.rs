//! The SEDI disclosure session.
//!
//! SEDI only serves an issuer's transactions to a client that walks its forms
//! like a browser does. A [`DisclosureSession`] keeps the cookies, headers and
//! form fields of that walk alive across lookups:
//!
//! 1. `open` loads the issuer search page, resubmits it with the "issuer
//!    number" criteria and keeps the resulting form as the *baseline*.
//! 2. `lookup` submits the baseline with an issuer number. An error row means
//!    no transactions; otherwise the returned form is tidied and posted to the
//!    results view, whose HTML is returned.

use std::path::PathBuf;

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use log::{debug, info, warn};
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, CONTENT_TYPE, REFERER,
};

use crate::config::{
    Endpoints, BROWSER_ACCEPT, BROWSER_ACCEPT_ENCODING, BROWSER_ACCEPT_LANGUAGE,
    DEFAULT_USER_AGENT, FIELD_PAGE_NAME, FIELD_SEARCH_CRITERIA_SELECT_BOX, FIELD_SEARCH_TYPE,
    FIELD_SEARCH_VALUE, PAGE_NAME_RESUBMIT, SEARCH_CRITERIA_ISSUER_NUMBER, SEARCH_TYPE_RESUBMIT,
};
use crate::error_handling::SessionError;
use crate::initialization::init_client;
use crate::output::write_html;
use crate::pacing::{OperatorInput, Pacer, PacingPolicy};
use crate::parse::{classify, tidy_results_form, FormFields, PageKind, ScrapedPage};

/// Settings for opening a [`DisclosureSession`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Search and results URLs
    pub endpoints: Endpoints,
    /// Pause applied before every state-advancing request
    pub pacing: PacingPolicy,
    /// HTTP User-Agent header value
    pub user_agent: String,
    /// Per-request timeout in seconds; `None` means no timeout
    pub timeout_seconds: Option<u64>,
    /// Overwritten with every response body when set
    pub dump_file: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            pacing: PacingPolicy::Interactive,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_seconds: None,
            dump_file: None,
        }
    }
}

/// A response body and the encoding it was decoded with.
struct FetchedPage {
    text: String,
    encoding: &'static Encoding,
}

/// Picks the decoder for a response: the `charset` parameter of its
/// Content-Type, else ISO-8859-1 for `text/*` and UTF-8 for everything else.
pub fn response_encoding(content_type: Option<&str>) -> &'static Encoding {
    let Some(content_type) = content_type else {
        return UTF_8;
    };
    let charset = content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches('"'))
    });
    if let Some(encoding) = charset.and_then(|label| Encoding::for_label(label.as_bytes())) {
        return encoding;
    }
    if content_type.trim_start().to_ascii_lowercase().starts_with("text/") {
        WINDOWS_1252
    } else {
        UTF_8
    }
}

/// A live form-replay session with SEDI.
///
/// Dropping the session releases its connections and cookies.
#[derive(Debug)]
pub struct DisclosureSession {
    client: reqwest::Client,
    headers: HeaderMap,
    endpoints: Endpoints,
    baseline: FormFields,
    encoding: &'static Encoding,
    pacer: Pacer,
    dump_file: Option<PathBuf>,
}

impl DisclosureSession {
    /// Opens a session: fetches the issuer search page and resubmits it to
    /// obtain the baseline form used by every lookup.
    ///
    /// Pauses once between the two requests.
    ///
    /// # Errors
    ///
    /// Any transport failure, or `SessionError::Aborted` if the operator stops
    /// at the pause.
    pub async fn open(config: SessionConfig) -> Result<Self, SessionError> {
        let pacer = Pacer::new(config.pacing);
        Self::open_with_pacer(config, pacer).await
    }

    /// Like [`DisclosureSession::open`], but interactive pauses read the
    /// operator's replies from `operator` instead of stdin.
    ///
    /// # Errors
    ///
    /// Same as [`DisclosureSession::open`].
    pub async fn open_with_operator(
        config: SessionConfig,
        operator: OperatorInput,
    ) -> Result<Self, SessionError> {
        let pacer = Pacer::with_operator(config.pacing, operator);
        Self::open_with_pacer(config, pacer).await
    }

    async fn open_with_pacer(config: SessionConfig, pacer: Pacer) -> Result<Self, SessionError> {
        let client = init_client(&config)?;
        let mut session = Self {
            client,
            headers: HeaderMap::new(),
            endpoints: config.endpoints,
            baseline: FormFields::new(),
            encoding: UTF_8,
            pacer,
            dump_file: config.dump_file,
        };

        info!(
            "Request page for Insider information by issuer: {}",
            session.endpoints.search_url
        );
        let request = session.client.get(&session.endpoints.search_url);
        let page = session.fetch(request).await?;
        let mut provisional = FormFields::from_html(&page.text);
        provisional.set(FIELD_SEARCH_CRITERIA_SELECT_BOX, SEARCH_CRITERIA_ISSUER_NUMBER);
        provisional.set(FIELD_SEARCH_TYPE, SEARCH_TYPE_RESUBMIT);
        provisional.set(FIELD_PAGE_NAME, PAGE_NAME_RESUBMIT);
        session.encoding = page.encoding;
        debug!(
            "Search page: {} form fields, encoding {}",
            provisional.len(),
            session.encoding.name()
        );

        session.pacer.pause().await?;

        info!(
            "Request Issuer Number search page: {}",
            session.endpoints.search_url
        );
        let page = session
            .post_form(&session.endpoints.search_url, &provisional)
            .await?;
        session.replace_baseline(FormFields::from_html(&page.text));
        Ok(session)
    }

    /// Looks up the transactions of one issuer.
    ///
    /// Returns `Ok(None)` when SEDI reports no transactions; in that case no
    /// results request is sent. Otherwise returns the results view HTML as the
    /// server sent it.
    ///
    /// # Errors
    ///
    /// Any transport failure, or `SessionError::Aborted` if the operator stops
    /// at the pause before the results request.
    pub async fn lookup(&mut self, issuer_id: &str) -> Result<Option<String>, SessionError> {
        self.set_search_value(issuer_id);

        info!(
            "Request Issuer Number {} results: {}",
            issuer_id, self.endpoints.search_url
        );
        let page = self
            .post_form(&self.endpoints.search_url, &self.baseline)
            .await?;

        let mut form = {
            let document = ScrapedPage::parse(&page.text);
            if classify(&document) == PageKind::NoResults {
                info!("No transactions available for Issuer Number {}!", issuer_id);
                return Ok(None);
            }
            FormFields::from_document(&document)
        };
        tidy_results_form(&mut form, issuer_id);
        debug!("Results form for {}: {} fields", issuer_id, form.len());

        self.pacer.pause().await?;
        self.apply_browser_headers();

        info!(
            "Request Issuer Number {} View Results: {}",
            issuer_id, self.endpoints.results_url
        );
        let page = self.post_form(&self.endpoints.results_url, &form).await?;
        info!("Found transactions for Issuer Number {}.", issuer_id);
        Ok(Some(page.text))
    }

    /// Encoding of the first response; downloaded pages are saved with it.
    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// The form submitted by the next lookup (before its search value is set).
    pub fn baseline(&self) -> &FormFields {
        &self.baseline
    }

    /// Ends the session. This only logs; connections and cookies are released
    /// when the session is dropped, which `close` does by taking it by value.
    pub fn close(self) {
        debug!("Closing disclosure session");
    }

    /// Sets the issuer number on the baseline form.
    ///
    /// The value stays on the baseline after the lookup. It is only ever
    /// replaced by the next call, so a lookup never submits a stale number, but
    /// the baseline always carries the last issuer searched.
    fn set_search_value(&mut self, issuer_id: &str) {
        self.baseline.set(FIELD_SEARCH_VALUE, issuer_id);
    }

    fn replace_baseline(&mut self, baseline: FormFields) {
        debug!("Baseline form: {} fields", baseline.len());
        self.baseline = baseline;
    }

    /// Switches the session headers to those of a desktop browser. They stay
    /// in place for every later request.
    fn apply_browser_headers(&mut self) {
        self.headers
            .insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
        self.headers.insert(
            ACCEPT_ENCODING,
            HeaderValue::from_static(BROWSER_ACCEPT_ENCODING),
        );
        self.headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static(BROWSER_ACCEPT_LANGUAGE),
        );
        match HeaderValue::from_str(&self.endpoints.search_url) {
            Ok(referer) => {
                self.headers.insert(REFERER, referer);
            }
            Err(e) => warn!(
                "Search URL is not a valid Referer ({}): {}",
                self.endpoints.search_url, e
            ),
        }
    }

    async fn post_form(&self, url: &str, form: &FormFields) -> Result<FetchedPage, SessionError> {
        let request = self.client.post(url).form(&form.to_form_pairs());
        self.fetch(request).await
    }

    /// Sends a request with the session headers and decodes the body.
    async fn fetch(&self, request: reqwest::RequestBuilder) -> Result<FetchedPage, SessionError> {
        let response = request.headers(self.headers.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("{} answered {}", response.url(), status);
        }
        let encoding = response_encoding(
            response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
        );
        let bytes = response.bytes().await?;
        // A byte order mark overrides the declared charset
        let (text, encoding, had_errors) = encoding.decode(&bytes);
        if had_errors {
            debug!("Malformed {} sequences replaced in response", encoding.name());
        }
        let page = FetchedPage {
            text: text.into_owned(),
            encoding,
        };
        if let Some(path) = &self.dump_file {
            write_html(&page.text, page.encoding, path).await?;
        }
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_encoding_charset_param() {
        assert_eq!(
            response_encoding(Some("text/html; charset=UTF-8")),
            UTF_8
        );
        assert_eq!(
            response_encoding(Some("text/html;Charset=\"windows-1252\"")),
            WINDOWS_1252
        );
    }

    #[test]
    fn test_response_encoding_text_default() {
        // ISO-8859-1 is decoded as its windows-1252 superset
        assert_eq!(response_encoding(Some("text/html")), WINDOWS_1252);
        assert_eq!(response_encoding(Some("text/html; charset=bogus")), WINDOWS_1252);
    }

    #[test]
    fn test_response_encoding_non_text_default() {
        assert_eq!(response_encoding(Some("application/xhtml+xml")), UTF_8);
        assert_eq!(response_encoding(None), UTF_8);
    }

    #[test]
    fn test_session_config_default() {
        let config = SessionConfig::default();
        assert_eq!(config.pacing, PacingPolicy::Interactive);
        assert_eq!(config.timeout_seconds, None);
        assert!(config.dump_file.is_none());
    }
}
