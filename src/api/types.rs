//! Request and response bodies of the reports API.

use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// One anonymous corruption report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    pub department: String,
    #[serde(deserialize_with = "de_amount")]
    pub amount: f64,
    pub state: String,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    pub description: String,
    pub date_reported: String,
}

impl Report {
    /// `city, state` as shown in the location column.
    pub fn location(&self) -> String {
        match self.city.as_deref() {
            Some(city) if !city.is_empty() => format!("{city}, {}", self.state),
            _ => self.state.clone(),
        }
    }
}

/// Body of `POST /v1/reports`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReportInput {
    pub department: String,
    pub amount: f64,
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    pub description: String,
}

/// Paged listing returned by `GET /v1/reports`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportListResponse {
    pub data: Vec<Report>,
    pub total: u64,
}

/// Query parameters for `GET /v1/reports`. Unset values are not sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetReportsParams {
    pub state: Option<String>,
    pub department: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl GetReportsParams {
    /// The set parameters as `(name, value)` query pairs.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(state) = &self.state {
            pairs.push(("state", state.clone()));
        }
        if let Some(department) = &self.department {
            pairs.push(("department", department.clone()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset", offset.to_string()));
        }
        pairs
    }
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

/// Country-wide totals from `GET /v1/stats/summary`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub total_corruption_amount: f64,
    pub median_bribe: f64,
    pub most_reported_department: String,
    pub total_reports: u64,
}

/// Per-state aggregate from `GET /v1/stats/heatmap`.
///
/// `state_name` carries the state code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapEntry {
    pub state_name: String,
    pub total_amount: f64,
    pub report_count: u64,
}

/// Per-state totals from `GET /v1/stats/state/{code}/summary`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSummaryStats {
    pub total_reports: u64,
    pub total_amount: f64,
    pub avg_bribe: f64,
    /// Department → report count, in the order the server sent them.
    #[serde(
        default,
        deserialize_with = "de_ordered_counts",
        serialize_with = "ser_ordered_counts"
    )]
    pub corruption_by_departments: Vec<(String, f64)>,
}

/// Department breakdown row fed to the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentStat {
    pub department: String,
    pub count: f64,
    pub amount: f64,
}

/// `GET /health` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub service: String,
}

// ---------------------------------------------------------------------------
// Error bodies
// ---------------------------------------------------------------------------

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// `{ error, details: [...] }` returned for rejected input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationErrorBody {
    pub error: String,
    pub details: Vec<FieldError>,
}

/// `{ error, message }` returned for other failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

// ---------------------------------------------------------------------------
// Serde helpers
// ---------------------------------------------------------------------------

/// Accept the amount as a JSON number or as a formatted string (`"₹1,500"`).
fn de_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Number(f64),
        Text(String),
    }

    match Amount::deserialize(deserializer)? {
        Amount::Number(n) => Ok(n),
        Amount::Text(s) => {
            let cleaned: String = s
                .chars()
                .filter(|c| *c != '₹' && *c != ',' && !c.is_whitespace())
                .collect();
            match cleaned.parse::<f64>() {
                Ok(n) if n.is_finite() => Ok(n),
                _ => Err(de::Error::custom(format!("invalid amount: {s:?}"))),
            }
        }
    }
}

/// Deserialize a JSON object of numbers into a vec that keeps key order.
fn de_ordered_counts<'de, D>(deserializer: D) -> Result<Vec<(String, f64)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OrderedCounts;

    impl<'de> Visitor<'de> for OrderedCounts {
        type Value = Vec<(String, f64)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an object mapping department names to numbers")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((key, value)) = map.next_entry::<String, f64>()? {
                entries.push((key, value));
            }
            Ok(entries)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(OrderedCounts)
}

fn ser_ordered_counts<S>(entries: &[(String, f64)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(entries.len()))?;
    for (key, value) in entries {
        map.serialize_entry(key, value)?;
    }
    map.end()
}
