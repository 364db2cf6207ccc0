// Shared test helpers: SEDI page fixtures and mock server expectations.
//
// The mock server plays SEDI's side of the form flow so sessions can be opened
// without network access or pauses.

use httptest::{all_of, matchers::*, responders::*, Expectation, Server};

use insider_transactions::{Endpoints, PacingPolicy, SessionConfig};

pub const SEARCH_PATH: &str = "/sedi/SVTIIBIselectIssuer";
pub const RESULTS_PATH: &str = "/sedi/SVTIIBIviewResults";

/// Issuer search page as first served (GET).
pub const SEARCH_PAGE: &str = r#"<html><body>
<form name="issuerSearch" method="post">
  <input type="hidden" name="jspSynchronizerToken" value="tok-1">
  <INPUT TYPE="HIDDEN" NAME="pageName" VALUE="selectIssuer">
  <select name="ISSUER_SEARCH_CRITERIA_SELECT_BOX">
    <option value="1" selected>Issuer name</option>
    <option value="7">Issuer number</option>
  </select>
  <input type="text" name="ISSUER_SEARCH_VALUE" value="">
</form>
</body></html>"#;

/// Issuer number search form (response to the resubmitted search page).
pub const SEARCH_FORM: &str = r#"<html><body>
<form name="issuerSearch" method="post">
  <input type="hidden" name="jspSynchronizerToken" value="tok-2">
  <input type="hidden" name="pageName" value="issuerSearch">
  <input type="hidden" name="ISSUER_SEARCH_TYPE" value="3">
  <input type="text" name="ISSUER_SEARCH_VALUE" value="">
</form>
</body></html>"#;

/// Search response listing the issuer, with the drill-down form.
pub const ISSUER_FOUND_PAGE: &str = r#"<html><body>
<table>
  <tr><th>Issuer name</th><th>Issuer number</th></tr>
  <tr><td>Acme Mining Corp.</td><td>00012345</td></tr>
</table>
<form name="viewResults" method="post">
  <input type="hidden" name="jspSynchronizerToken" value="tok-3">
  <input type="hidden" name="ISSUER_SEARCH_TYPE" value="3">
  <input type="hidden" name="ATTRIB_DRILL_ID" value="">
  <select name="FROM_MONTH"><option value="01">January</option></select>
  <select name="FROM_DAY"><option value="05" selected>5</option></select>
</form>
</body></html>"#;

/// Search response for an unknown issuer.
pub const NO_ISSUER_PAGE: &str = r#"<html><body>
<table>
  <tr><td class="error">Error: No issuer found for the search criteria.</td></tr>
</table>
</body></html>"#;

/// Transactions view.
pub const TRANSACTIONS_PAGE: &str = r#"<html><body>
<table>
  <tr><td>Insider</td><td>Date</td><td>Nature</td></tr>
  <tr><td>Doe, Jane</td><td>2014-03-05</td><td>10 - Acquisition in the public market</td></tr>
</table>
</body></html>"#;

/// Session config pointing at `server`, with zero-second timed pauses.
#[allow(dead_code)] // Used by other test files
pub fn test_session_config(server: &Server) -> SessionConfig {
    SessionConfig {
        endpoints: test_endpoints(server),
        pacing: PacingPolicy::timed(0, 1).expect("valid bounds"),
        ..Default::default()
    }
}

/// Endpoints on the mock server, with the same query strings as SEDI.
pub fn test_endpoints(server: &Server) -> Endpoints {
    Endpoints {
        search_url: server.url_str(&format!("{SEARCH_PATH}?locale=en_CA")),
        results_url: server.url_str(&format!("{RESULTS_PATH}?locale=en_CA")),
    }
}

/// Expects the two requests of `DisclosureSession::open`.
#[allow(dead_code)] // Used by other test files
pub fn expect_session_open(server: &Server) {
    server.expect(
        Expectation::matching(request::method_path("GET", SEARCH_PATH)).respond_with(
            status_code(200)
                .insert_header("Content-Type", "text/html; charset=UTF-8")
                .body(SEARCH_PAGE),
        ),
    );
    server.expect(
        Expectation::matching(all_of![
            request::method_path("POST", SEARCH_PATH),
            request::body(url_decoded(contains(("pageName", "resubmit")))),
        ])
        .respond_with(status_code(200).body(SEARCH_FORM)),
    );
}

/// Expects one issuer search for `issuer_id`, answered with `page`.
#[allow(dead_code)] // Used by other test files
pub fn expect_issuer_search(server: &Server, issuer_id: &'static str, page: &'static str) {
    server.expect(
        Expectation::matching(all_of![
            request::method_path("POST", SEARCH_PATH),
            request::body(url_decoded(contains(("ISSUER_SEARCH_VALUE", issuer_id)))),
        ])
        .respond_with(status_code(200).body(page)),
    );
}

/// Expects one results view request for `issuer_id`, answered with the
/// transactions page.
#[allow(dead_code)] // Used by other test files
pub fn expect_results_view(server: &Server, issuer_id: &'static str) {
    server.expect(
        Expectation::matching(all_of![
            request::method_path("POST", RESULTS_PATH),
            request::body(url_decoded(contains(("ATTRIB_DRILL_ID2", issuer_id)))),
        ])
        .respond_with(status_code(200).body(TRANSACTIONS_PAGE)),
    );
}
