//! JSON handlers for the web dashboard.
//!
//! Each handler mounts the matching page model against the backend and
//! serializes what the page would render. Backend failures come back as
//! `502 {"error": ...}` carrying the user-facing message.

use std::io::Cursor;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};
use tiny_http::{Response, StatusCode};

use crate::aggregate::ChartData;
use crate::api::{self, ApiError, Report, SummaryStats};
use crate::form::{self, FormFields, SubmissionForm};
use crate::map::HeatmapView;
use crate::pages::{ExplorePage, HomePage, MetricCard, StateDetailsPage, SubmitPage};
use crate::table::{ReportColumn, ReportGrid, SortDirection, SortState};

use super::{AppState, content_type_json, json_error};

type HttpResponse = Response<Cursor<Vec<u8>>>;

// ---------------------------------------------------------------------------
// JSON response types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct MetaResponse {
    states: Vec<StateOption>,
    departments: Vec<DepartmentOption>,
    amount_ranges: Vec<&'static str>,
    page_size_options: Vec<usize>,
    page_size: usize,
    success_display_ms: u128,
}

#[derive(Serialize)]
struct StateOption {
    code: &'static str,
    label: String,
}

#[derive(Serialize)]
struct DepartmentOption {
    value: &'static str,
    label: &'static str,
}

#[derive(Serialize)]
struct HomeResponse<'a> {
    stats: Option<&'a SummaryStats>,
    stats_error: Option<&'a str>,
    cards: Vec<MetricCard>,
    heatmap: Option<&'a HeatmapView>,
}

#[derive(Serialize)]
struct ReportsResponse<'a> {
    rows: Vec<&'a Report>,
    page: usize,
    page_count: usize,
    page_size: usize,
    total_matching: usize,
    sort: SortState<ReportColumn>,
    chart: ChartData,
}

#[derive(Serialize)]
struct StateResponse {
    code: String,
    name: String,
    cards: Vec<MetricCard>,
    most_reported: String,
    chart: ChartData,
}

/// Body of `POST /api/reports`, as typed into the form.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SubmitRequest {
    state: String,
    district: String,
    city: String,
    department: String,
    description: String,
    amount: String,
}

#[derive(Serialize)]
struct HealthResponse {
    backend_ok: bool,
    backend_status: Option<String>,
    backend_error: Option<String>,
    topology_ok: bool,
    config_exists: bool,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn json_response<T: Serialize>(data: &T, status: u16) -> Result<HttpResponse> {
    let body = serde_json::to_string(data).context("failed to serialize JSON response")?;
    Ok(Response::from_data(body.into_bytes())
        .with_header(content_type_json())
        .with_status_code(StatusCode(status)))
}

fn upstream_error(err: &ApiError, fallback: &str) -> HttpResponse {
    json_error(502, &err.user_message(fallback))
}

/// Decode `%XX` escapes and `+` in a query component.
fn percent_decode(s: &str) -> String {
    let hex = |b: u8| (b as char).to_digit(16);
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' if i + 2 < bytes.len() => match (hex(bytes[i + 1]), hex(bytes[i + 2])) {
                (Some(hi), Some(lo)) => {
                    out.push((hi * 16 + lo) as u8);
                    i += 2;
                }
                _ => out.push(b'%'),
            },
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// All `key=value` pairs of the URL's query string, decoded.
fn query_params(url: &str) -> Vec<(String, String)> {
    let Some((_, query)) = url.split_once('?') else {
        return Vec::new();
    };
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            (percent_decode(k), percent_decode(v))
        })
        .collect()
}

fn param<'a>(params: &'a [(String, String)], name: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `GET /api/meta`: choices for the form and the filter panel.
pub fn get_meta(state: &AppState) -> Result<HttpResponse> {
    let resp = MetaResponse {
        states: SubmitPage::state_options()
            .into_iter()
            .map(|(code, label)| StateOption { code, label })
            .collect(),
        departments: SubmitPage::department_options()
            .iter()
            .map(|&(value, label)| DepartmentOption { value, label })
            .collect(),
        amount_ranges: crate::table::AmountRange::PRESETS.to_vec(),
        page_size_options: state.display.page_size_options.clone(),
        page_size: state.display.page_size,
        success_display_ms: state.success_display.as_millis(),
    };
    json_response(&resp, 200)
}

/// `GET /api/home`: summary cards and the heatmap.
pub fn get_home(state: &AppState) -> Result<HttpResponse> {
    let mut page = HomePage::new();
    page.mount(state.api.as_ref(), state.topology.as_ref());

    let resp = HomeResponse {
        stats: page.stats.ready(),
        stats_error: page.stats.error.as_deref(),
        cards: page.metric_cards(),
        heatmap: page.map.ready(),
    };
    json_response(&resp, 200)
}

/// `GET /api/reports?state=&department=&amountRange=&dateRange=&search=&sort=&dir=&page=&pageSize=`
pub fn get_reports(state: &AppState, url: &str) -> Result<HttpResponse> {
    let params = query_params(url);
    let mut grid = ReportGrid::new(
        state.display.page_size,
        state.display.page_size_options.clone(),
    );

    for key in ["state", "department", "amountRange", "dateRange", "search"] {
        if let Some(value) = param(&params, key)
            && let Err(e) = grid.set_filter(key, value)
        {
            return Ok(json_error(400, &e));
        }
    }
    if let Some(field) = param(&params, "sort") {
        let field: ReportColumn = match field.parse() {
            Ok(f) => f,
            Err(e) => return Ok(json_error(400, &e)),
        };
        let direction = match param(&params, "dir") {
            Some("asc") => SortDirection::Asc,
            _ => SortDirection::Desc,
        };
        grid.sort = SortState::new(field, direction);
    }
    if let Some(size) = param(&params, "pageSize").and_then(|s| s.parse().ok())
        && let Err(e) = grid.set_page_size(size)
    {
        return Ok(json_error(400, &e));
    }

    let mut page = ExplorePage::new(grid);
    page.mount(state.api.as_ref());
    if let Some(err) = &page.reports.error {
        return Ok(json_error(502, err));
    }

    let today = Local::now().date_naive();
    let total = page.grid.matching(page.loaded(), today).len();
    let requested = param(&params, "page").and_then(|s| s.parse().ok()).unwrap_or(1);
    page.grid.pagination.go_to(requested, total);

    let view = page.view(today);
    let resp = ReportsResponse {
        page: view.page,
        page_count: view.page_count,
        page_size: view.page_size,
        total_matching: view.total_matching,
        sort: page.grid.sort,
        chart: page.department_chart(today),
        rows: view.rows,
    };
    json_response(&resp, 200)
}

/// `GET /api/state/{code}`: one state's drill-down.
pub fn get_state(state: &AppState, code: &str) -> Result<HttpResponse> {
    if let Err(e) = api::checked_code(code) {
        return Ok(json_error(400, &e.to_string()));
    }
    let mut page = StateDetailsPage::default();
    page.navigate(code, state.api.as_ref());
    if let Some(err) = page.error() {
        return Ok(json_error(502, err));
    }

    let resp = StateResponse {
        code: page.code.clone().unwrap_or_default(),
        name: page.state_name().to_string(),
        cards: page.metric_cards(),
        most_reported: page.most_reported(),
        chart: page.chart(),
    };
    json_response(&resp, 200)
}

/// `GET /api/states/{code}/districts`
pub fn get_districts(state: &AppState, code: &str) -> Result<HttpResponse> {
    match state.api.districts(code) {
        Ok(districts) => json_response(&districts, 200),
        Err(e) => Ok(upstream_error(&e, "Failed to load districts")),
    }
}

/// `POST /api/reports`: submit through the form model.
pub fn post_report(state: &AppState, body: &str) -> Result<HttpResponse> {
    let req: SubmitRequest = match serde_json::from_str(body) {
        Ok(r) => r,
        Err(e) => return Ok(json_error(400, &format!("invalid JSON in report: {e}"))),
    };

    let mut form = SubmissionForm::new(state.success_display);
    form.fields = FormFields {
        state: req.state,
        district: req.district,
        city: req.city,
        department: req.department,
        description: req.description,
        amount: form::format_amount_input(&req.amount),
    };

    match form.submit(state.api.as_ref(), Instant::now()) {
        Ok(Some(report)) => json_response(&report, 201),
        Ok(None) => Ok(json_error(
            502,
            &form.banner().unwrap_or_else(|| form::SUBMIT_FAILED_MESSAGE.to_string()),
        )),
        Err(missing) => json_response(
            &serde_json::json!({ "error": missing.to_string(), "missing": missing.0 }),
            400,
        ),
    }
}

/// `GET /api/health`: backend and topology reachability.
pub fn get_health(state: &AppState) -> Result<HttpResponse> {
    let health = state.api.health();
    let resp = HealthResponse {
        backend_ok: health.is_ok(),
        backend_status: health.as_ref().ok().map(|h| h.status.clone()),
        backend_error: health.as_ref().err().map(|e| e.to_string()),
        topology_ok: state.topology.state_names().is_ok(),
        config_exists: crate::config::global_config_file()
            .map(|p| p.exists())
            .unwrap_or(false),
    };
    json_response(&resp, 200)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
