//! Embedded web dashboard for bribemap.
//!
//! Provides a lightweight HTTP server (sync, via `tiny_http`) that serves:
//! - A single-page dashboard: heatmap, explore grid, state pages, submit form
//! - JSON endpoints backed by the page models and the typed API client
//!
//! Launched via `bribemap web` (default: `http://127.0.0.1:9747`).

mod api;
mod frontend;

use std::io::{Cursor, Read};
use std::time::Duration;

use anyhow::{Context, Result};
use tiny_http::{Header, Method, Response, Server, StatusCode};

use crate::api::{ReportsApi, TopologySource};
use crate::config::schema::{BribemapConfig, DisplayConfig};

/// What request handlers work against.
pub struct AppState {
    pub api: Box<dyn ReportsApi>,
    pub topology: Box<dyn TopologySource>,
    pub display: DisplayConfig,
    pub success_display: Duration,
}

impl AppState {
    pub fn from_config(cfg: &BribemapConfig) -> Self {
        let (api, topology) = crate::cli::clients(cfg);
        Self {
            api: Box::new(api),
            topology: Box::new(topology),
            display: cfg.display.clone(),
            success_display: Duration::from_secs(cfg.form.success_display_secs),
        }
    }
}

// ---------------------------------------------------------------------------
// Server entry point
// ---------------------------------------------------------------------------

/// Start the dashboard on `addr`.
///
/// Blocks the current thread and handles requests one at a time. A failing
/// handler answers with a JSON error instead of stopping the server.
pub fn serve(state: &AppState, addr: &str, open: bool) -> Result<()> {
    let server = Server::http(addr)
        .map_err(|e| anyhow::anyhow!("failed to start HTTP server on {addr}: {e}"))?;

    println!("bribemap dashboard running at http://{addr}");
    println!("Press Ctrl+C to stop.\n");

    if open {
        let _ = open_browser(&format!("http://{addr}"));
    }

    for mut request in server.incoming_requests() {
        let method = request.method().clone();
        let url = request.url().to_string();

        let body = if matches!(method, Method::Put | Method::Post | Method::Patch) {
            let mut buf = String::new();
            let _ = request.as_reader().read_to_string(&mut buf);
            Some(buf)
        } else {
            None
        };

        let response = dispatch(state, &method, &url, body.as_deref())
            .unwrap_or_else(|e| json_error(500, &e.to_string()));
        let _ = request.respond(response);

        println!(
            "{} {} {}",
            method,
            url,
            chrono::Local::now().format("%H:%M:%S")
        );
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Route one request.
pub fn dispatch(
    state: &AppState,
    method: &Method,
    url: &str,
    body: Option<&str>,
) -> Result<Response<Cursor<Vec<u8>>>> {
    let path = url.split('?').next().unwrap_or(url);
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

    match (method, segments.as_slice()) {
        (&Method::Get, [""] | ["index.html"]) => Ok(serve_frontend()),

        (&Method::Get, ["api", "meta"]) => api::get_meta(state),
        (&Method::Get, ["api", "home"]) => api::get_home(state),
        (&Method::Get, ["api", "reports"]) => api::get_reports(state, url),
        (&Method::Post, ["api", "reports"]) => api::post_report(state, body.unwrap_or("{}")),
        (&Method::Get, ["api", "state", code]) => api::get_state(state, code),
        (&Method::Get, ["api", "states", code, "districts"]) => api::get_districts(state, code),
        (&Method::Get, ["api", "health"]) => api::get_health(state),

        _ => Ok(not_found()),
    }
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

fn serve_frontend() -> Response<Cursor<Vec<u8>>> {
    Response::from_data(frontend::INDEX_HTML.as_bytes().to_vec())
        .with_header(content_type_html())
        .with_status_code(StatusCode(200))
}

fn not_found() -> Response<Cursor<Vec<u8>>> {
    json_error(404, "not found")
}

/// `{"error": message}` with the given status.
pub(crate) fn json_error(status: u16, message: &str) -> Response<Cursor<Vec<u8>>> {
    let body = serde_json::json!({ "error": message }).to_string();
    Response::from_data(body.into_bytes())
        .with_header(content_type_json())
        .with_status_code(StatusCode(status))
}

pub(crate) fn content_type_json() -> Header {
    Header::from_bytes("Content-Type", "application/json; charset=utf-8")
        .expect("static header is valid")
}

fn content_type_html() -> Header {
    Header::from_bytes("Content-Type", "text/html; charset=utf-8").expect("static header is valid")
}

/// Open `url` in the default browser.
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", url])
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    Ok(())
}
