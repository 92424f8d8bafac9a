/// HTTP client against a local `tiny_http` stub backend.
use std::io::Read;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use bribemap::api::{ApiClient, ApiError, GetReportsParams, NewReportInput, ReportsApi, TopologyClient, TopologySource};
use bribemap::diagnostics::Diagnostics;
use tiny_http::{Header, Response, Server};

/// What the stub saw for one request.
#[derive(Debug)]
struct Seen {
    method: String,
    url: String,
    body: String,
    content_type: Option<String>,
}

/// Serve `responses` in order, one per request, then stop.
fn stub(responses: Vec<(u16, &'static str)>) -> (String, mpsc::Receiver<Seen>) {
    let server = Server::http("127.0.0.1:0").expect("bind stub server");
    let addr = server.server_addr().to_ip().expect("ip listener");
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        for (status, body) in responses {
            let Ok(mut request) = server.recv() else {
                return;
            };
            let mut received = String::new();
            let _ = request.as_reader().read_to_string(&mut received);
            let content_type = request
                .headers()
                .iter()
                .find(|h| h.field.equiv("Content-Type"))
                .map(|h| h.value.to_string());
            let _ = tx.send(Seen {
                method: request.method().to_string(),
                url: request.url().to_string(),
                body: received,
                content_type,
            });
            let header = Header::from_bytes("Content-Type", "application/json").unwrap();
            let _ = request.respond(
                Response::from_string(body)
                    .with_status_code(status)
                    .with_header(header),
            );
        }
    });

    (format!("http://{addr}/"), rx)
}

fn client(base: &str) -> ApiClient {
    ApiClient::new(base, Duration::from_secs(5))
}

#[test]
fn list_reports_sends_only_set_params() {
    let (base, seen) = stub(vec![(
        200,
        r#"{"data":[{"id":"a1","department":"Police","amount":"₹1,500","state":"MH","district":null,"city":"Pune","description":"x","date_reported":"2025-01-15T10:00:00Z"}],"total":41}"#,
    )]);
    let params = GetReportsParams {
        state: Some("MH".to_string()),
        limit: Some(10),
        ..Default::default()
    };
    let listing = client(&base).list_reports(&params).unwrap();

    assert_eq!(listing.total, 41);
    assert_eq!(listing.data[0].amount, 1500.0);
    let req = seen.recv().unwrap();
    assert_eq!(req.method, "GET");
    assert!(req.url.starts_with("/v1/reports?"));
    assert!(req.url.contains("state=MH"));
    assert!(req.url.contains("limit=10"));
    assert!(!req.url.contains("offset"));
    assert!(!req.url.contains("department"));
    assert_eq!(req.content_type.as_deref(), Some("application/json"));
}

#[test]
fn create_report_posts_json_without_empty_optionals() {
    let (base, seen) = stub(vec![(
        201,
        r#"{"id":"n1","department":"Revenue","amount":2500,"state":"KA","city":"Mysuru","description":"Mutation fee","date_reported":"2025-06-01T12:00:00Z"}"#,
    )]);
    let input = NewReportInput {
        department: "Revenue".to_string(),
        amount: 2500.0,
        state: "KA".to_string(),
        district: None,
        city: Some("Mysuru".to_string()),
        description: "Mutation fee".to_string(),
    };
    let created = client(&base).create_report(&input).unwrap();
    assert_eq!(created.id, "n1");
    assert_eq!(created.district, None);

    let req = seen.recv().unwrap();
    assert_eq!(req.method, "POST");
    assert_eq!(req.url, "/v1/reports");
    let body: serde_json::Value = serde_json::from_str(&req.body).unwrap();
    assert_eq!(body["state"], "KA");
    assert!(body.get("district").is_none());
}

#[test]
fn validation_failure_is_typed() {
    let (base, _seen) = stub(vec![(
        400,
        r#"{"error":"Validation failed","details":[{"field":"amount","message":"Expected number"}]}"#,
    )]);
    let input = NewReportInput {
        department: "Police".to_string(),
        amount: 0.0,
        state: "MH".to_string(),
        district: None,
        city: None,
        description: "x".to_string(),
    };
    let err = client(&base).create_report(&input).unwrap_err();
    assert_eq!(err.kind(), "validation");
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.user_message("fallback"), "amount: Expected number");
}

#[test]
fn server_error_with_and_without_message() {
    let (base, _seen) = stub(vec![
        (500, r#"{"error":"Internal","message":"Database unavailable"}"#),
        (503, "upstream down"),
    ]);
    let api = client(&base);

    let err = api.summary_stats().unwrap_err();
    assert_eq!(err.server_message().as_deref(), Some("Database unavailable"));

    let err = api.heatmap().unwrap_err();
    assert_eq!(
        err,
        ApiError::Server {
            status: 503,
            error: None,
            message: None
        }
    );
    assert_eq!(err.user_message("Failed to load"), "Failed to load");
}

#[test]
fn unexpected_body_is_a_parse_error() {
    let (base, _seen) = stub(vec![(200, r#"{"status":"ok"}"#)]);
    let err = client(&base).all_reports().unwrap_err();
    assert_eq!(err.kind(), "parse");
}

#[test]
fn state_paths_and_delete() {
    let (base, seen) = stub(vec![
        (
            200,
            r#"{"total_reports":3,"total_amount":4500,"avg_bribe":1500,"corruption_by_departments":{"Transport":2,"Police":1}}"#,
        ),
        (200, r#"["Pune","Nagpur"]"#),
        (200, r#"{"deleted":3}"#),
    ]);
    let api = client(&base);

    let summary = api.state_summary("MH").unwrap();
    assert_eq!(
        summary.corruption_by_departments,
        vec![("Transport".to_string(), 2.0), ("Police".to_string(), 1.0)]
    );
    assert_eq!(seen.recv().unwrap().url, "/v1/stats/state/MH/summary");

    assert_eq!(api.districts("MH").unwrap(), vec!["Pune", "Nagpur"]);
    assert_eq!(seen.recv().unwrap().url, "/v1/states/MH/districts");

    api.delete_all_reports().unwrap();
    let req = seen.recv().unwrap();
    assert_eq!(req.method, "DELETE");
    assert_eq!(req.url, "/v1/reports/all");
}

#[test]
fn unreachable_backend_is_a_network_error() {
    // Bind then drop to get a port nothing listens on.
    let port = {
        let server = Server::http("127.0.0.1:0").unwrap();
        server.server_addr().to_ip().unwrap().port()
    };
    let api = ApiClient::new(&format!("http://127.0.0.1:{port}"), Duration::from_secs(2));
    let err = api.health().unwrap_err();
    assert_eq!(err.kind(), "network");
    assert_eq!(err.status(), None);
}

#[test]
fn failures_are_recorded_in_the_diagnostics_log() {
    let dir = std::env::temp_dir().join(format!("bribemap-api-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    let log = dir.join("diagnostics.jsonl");

    let (base, _seen) = stub(vec![(500, r#"{"error":"Internal","message":"boom"}"#)]);
    let api = client(&base).with_diagnostics(Diagnostics::new(false, Some(log.clone())));
    assert!(api.health().is_err());

    let entries = bribemap::diagnostics::logger::read_all_entries(&log);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].operation, "health");
    assert_eq!(entries[0].kind, "server");
    assert_eq!(entries[0].status, Some(500));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn topology_names_come_from_geometries() {
    let (base, _seen) = stub(vec![(
        200,
        r#"{"type":"Topology","objects":{"india":{"type":"GeometryCollection","geometries":[
            {"type":"Polygon","properties":{"NAME_1":"Maharashtra"}},
            {"type":"Polygon","properties":{"name":"Kerala"}},
            {"type":"Polygon","properties":{"NAME_1":"Maharashtra"}}
        ]}}}"#,
    )]);
    let topology = TopologyClient::new(&format!("{base}india.json"), Duration::from_secs(5));
    assert_eq!(
        topology.state_names().unwrap(),
        vec!["Maharashtra".to_string(), "Kerala".to_string()]
    );
}
