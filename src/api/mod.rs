//! Typed client for the reports REST API.
//!
//! Every backend endpoint is one method on [`ReportsApi`]. [`ApiClient`] is
//! the HTTP implementation: a synchronous `ureq` agent with a fixed request
//! timeout. Calls are fire-once: no retry, caching or deduplication. A
//! failure is recorded through [`Diagnostics`] and handed back to the caller
//! unchanged.

pub mod error;
pub mod topology;
pub mod types;

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use serde::de::DeserializeOwned;

use crate::config::schema::ApiConfig;
use crate::diagnostics::Diagnostics;

pub use error::ApiError;
pub use topology::{TopologyClient, TopologySource};
pub use types::{
    DepartmentStat, GetReportsParams, HealthStatus, HeatmapEntry, NewReportInput, Report,
    ReportListResponse, StateSummaryStats, SummaryStats,
};

/// State codes go straight into URL paths, so only plain alphanumerics pass.
static STATE_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{1,8}$").expect("valid state code regex"));

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// The backend surface the pages and the form depend on.
pub trait ReportsApi {
    /// `GET /v1/reports`: filtered, paged listing.
    fn list_reports(&self, params: &GetReportsParams) -> Result<ReportListResponse, ApiError>;
    /// `GET /v1/reports/all`
    fn all_reports(&self) -> Result<Vec<Report>, ApiError>;
    /// `POST /v1/reports`
    fn create_report(&self, input: &NewReportInput) -> Result<Report, ApiError>;
    /// `DELETE /v1/reports/all`
    fn delete_all_reports(&self) -> Result<(), ApiError>;
    /// `GET /v1/stats/summary`
    fn summary_stats(&self) -> Result<SummaryStats, ApiError>;
    /// `GET /v1/stats/heatmap`
    fn heatmap(&self) -> Result<Vec<HeatmapEntry>, ApiError>;
    /// `GET /v1/stats/state/{code}/summary`
    fn state_summary(&self, state_code: &str) -> Result<StateSummaryStats, ApiError>;
    /// `GET /v1/states/{code}/districts`
    fn districts(&self, state_code: &str) -> Result<Vec<String>, ApiError>;
    /// `GET /health`
    fn health(&self) -> Result<HealthStatus, ApiError>;
}

// ---------------------------------------------------------------------------
// HTTP client
// ---------------------------------------------------------------------------

/// Synchronous HTTP implementation of [`ReportsApi`].
#[derive(Debug)]
pub struct ApiClient {
    base_url: String,
    timeout: Duration,
    agent: ureq::Agent,
    diagnostics: Diagnostics,
}

impl ApiClient {
    /// Build a client for `base_url` with the given request timeout.
    ///
    /// Failures are not recorded until [`with_diagnostics`](Self::with_diagnostics)
    /// is called.
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            agent,
            diagnostics: Diagnostics::disabled(),
        }
    }

    /// Build a client from the resolved `[api]` section.
    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(&config.base_url, Duration::from_millis(config.timeout_ms))
    }

    /// Attach a failure recorder.
    pub fn with_diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", loopback_base(&self.base_url), path)
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T, ApiError> {
        let mut request = self
            .agent
            .get(&self.url(path))
            .set("Content-Type", "application/json");
        for (name, value) in query {
            request = request.query(name, value);
        }
        let response = request.call().map_err(classify)?;
        decode(response)
    }

    /// Record a failed call and pass the result through untouched.
    fn observe<T>(&self, operation: &str, path: &str, result: Result<T, ApiError>) -> Result<T, ApiError> {
        if let Err(err) = &result {
            self.diagnostics.record(operation, path, err);
        }
        result
    }
}

impl ReportsApi for ApiClient {
    fn list_reports(&self, params: &GetReportsParams) -> Result<ReportListResponse, ApiError> {
        let path = "/v1/reports";
        self.observe("list_reports", path, self.get_json(path, &params.query_pairs()))
    }

    fn all_reports(&self) -> Result<Vec<Report>, ApiError> {
        let path = "/v1/reports/all";
        self.observe("all_reports", path, self.get_json(path, &[]))
    }

    fn create_report(&self, input: &NewReportInput) -> Result<Report, ApiError> {
        let path = "/v1/reports";
        let result = self
            .agent
            .post(&self.url(path))
            .set("Content-Type", "application/json")
            .send_json(input)
            .map_err(classify)
            .and_then(decode);
        self.observe("create_report", path, result)
    }

    fn delete_all_reports(&self) -> Result<(), ApiError> {
        let path = "/v1/reports/all";
        let result = self
            .agent
            .delete(&self.url(path))
            .set("Content-Type", "application/json")
            .call()
            .map(|_| ())
            .map_err(classify);
        self.observe("delete_all_reports", path, result)
    }

    fn summary_stats(&self) -> Result<SummaryStats, ApiError> {
        let path = "/v1/stats/summary";
        self.observe("summary_stats", path, self.get_json(path, &[]))
    }

    fn heatmap(&self) -> Result<Vec<HeatmapEntry>, ApiError> {
        let path = "/v1/stats/heatmap";
        self.observe("heatmap", path, self.get_json(path, &[]))
    }

    fn state_summary(&self, state_code: &str) -> Result<StateSummaryStats, ApiError> {
        let result = checked_code(state_code).and_then(|code| {
            self.get_json(&format!("/v1/stats/state/{code}/summary"), &[])
        });
        self.observe("state_summary", "/v1/stats/state/{code}/summary", result)
    }

    fn districts(&self, state_code: &str) -> Result<Vec<String>, ApiError> {
        let result = checked_code(state_code)
            .and_then(|code| self.get_json(&format!("/v1/states/{code}/districts"), &[]));
        self.observe("districts", "/v1/states/{code}/districts", result)
    }

    fn health(&self) -> Result<HealthStatus, ApiError> {
        let path = "/health";
        self.observe("health", path, self.get_json(path, &[]))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Reject anything that is not a bare alphanumeric state code.
pub fn checked_code(state_code: &str) -> Result<&str, ApiError> {
    let code = state_code.trim();
    if STATE_CODE_RE.is_match(code) {
        Ok(code)
    } else {
        Err(ApiError::InvalidInput {
            message: format!("not a state code: {state_code:?}"),
        })
    }
}

/// Pin a bare `localhost` host to IPv4.
///
/// Windows resolves "localhost" to ::1 first; most dev backends bind IPv4 only.
fn loopback_base(base_url: &str) -> String {
    if let Some((scheme, rest)) = base_url.split_once("://")
        && let Some(tail) = rest.strip_prefix("localhost")
        && (tail.is_empty() || tail.starts_with(':') || tail.starts_with('/'))
    {
        return format!("{scheme}://127.0.0.1{tail}");
    }
    base_url.to_string()
}

/// Map a `ureq` failure onto the client taxonomy.
pub(crate) fn classify(err: ureq::Error) -> ApiError {
    match err {
        ureq::Error::Status(status, response) => {
            let body = response.into_string().unwrap_or_default();
            ApiError::from_response(status, &body)
        }
        ureq::Error::Transport(transport) => ApiError::Network {
            message: transport.to_string(),
        },
    }
}

pub(crate) fn decode<T: DeserializeOwned>(response: ureq::Response) -> Result<T, ApiError> {
    response.into_json::<T>().map_err(|e| ApiError::Parse {
        message: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_strips_trailing_slash() {
        let client = ApiClient::new("http://api.example.in/", Duration::from_secs(1));
        assert_eq!(client.base_url(), "http://api.example.in");
        assert_eq!(
            client.url("/v1/reports"),
            "http://api.example.in/v1/reports"
        );
    }

    #[test]
    fn client_from_default_config() {
        let client = ApiClient::from_config(&ApiConfig::default());
        assert_eq!(client.base_url(), "http://localhost:3000");
        assert_eq!(client.timeout(), Duration::from_millis(10_000));
        assert_eq!(client.url("/health"), "http://127.0.0.1:3000/health");
    }

    #[test]
    fn only_the_bare_localhost_host_is_pinned() {
        assert_eq!(loopback_base("http://localhost"), "http://127.0.0.1");
        assert_eq!(loopback_base("http://localhost/api"), "http://127.0.0.1/api");
        assert_eq!(
            loopback_base("http://localhost.corp.in"),
            "http://localhost.corp.in"
        );
        assert_eq!(
            loopback_base("https://localhostel.in:8443"),
            "https://localhostel.in:8443"
        );

        let client = ApiClient::new("http://localhost.corp.in", Duration::from_secs(1));
        assert_eq!(client.url("/health"), "http://localhost.corp.in/health");
    }

    #[test]
    fn state_codes_are_checked_before_use() {
        assert_eq!(checked_code(" MH "), Ok("MH"));
        assert!(checked_code("").is_err());
        assert!(checked_code("../admin").is_err());
        assert!(checked_code("MH/../x").is_err());
    }

    #[test]
    fn invalid_code_fails_without_a_request() {
        // Port 9 is discard; an actual request would be a network error instead.
        let client = ApiClient::new("http://127.0.0.1:9", Duration::from_millis(50));
        let err = client.districts("not a code").unwrap_err();
        assert_eq!(err.kind(), "invalid-input");
    }
}
