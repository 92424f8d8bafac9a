//! State drill-down: metrics and department breakdown for one state.

use serde::Serialize;

use super::{MetricCard, Resource};
use crate::aggregate::{self, ChartData};
use crate::api::{ReportsApi, StateSummaryStats};
use crate::format;
use crate::states;

pub const STATE_ERROR: &str = "Failed to load state data";
pub const NOT_FOUND: &str = "State not found";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StateDetailsPage {
    pub code: Option<String>,
    pub summary: Resource<StateSummaryStats>,
    /// Code of the last fetch; re-fetch only when it changes.
    #[serde(skip)]
    last_fetched: Option<String>,
}

impl StateDetailsPage {
    /// Show `code`, fetching its summary unless it was the last one
    /// fetched. Returns whether a request was made.
    pub fn navigate<A: ReportsApi + ?Sized>(&mut self, code: &str, api: &A) -> bool {
        let code = code.trim().to_uppercase();
        if code.is_empty() || self.last_fetched.as_deref() == Some(code.as_str()) {
            return false;
        }
        self.last_fetched = Some(code.clone());
        self.code = Some(code.clone());

        self.summary.begin();
        self.summary.resolve(api.state_summary(&code), STATE_ERROR);
        true
    }

    pub fn state_name(&self) -> &str {
        self.code.as_deref().map_or("", states::display_name)
    }

    /// Error line to show instead of the page body, if any.
    pub fn error(&self) -> Option<&str> {
        if self.summary.loading {
            return None;
        }
        match (&self.summary.error, &self.summary.data) {
            (Some(err), _) => Some(err.as_str()),
            (None, None) => Some(NOT_FOUND),
            _ => None,
        }
    }

    /// Most reported department, `N/A` when there is no breakdown.
    pub fn most_reported(&self) -> String {
        self.summary
            .ready()
            .and_then(|s| aggregate::most_reported(&s.corruption_by_departments))
            .unwrap_or("N/A")
            .to_string()
    }

    pub fn metric_cards(&self) -> Vec<MetricCard> {
        let Some(summary) = self.summary.ready() else {
            return Vec::new();
        };
        vec![
            MetricCard::new(
                "Total Reports",
                format::format_count(summary.total_reports as f64),
                "",
            ),
            MetricCard::new(
                "Total Amount",
                format::format_compact_inr(summary.total_amount),
                "",
            ),
            MetricCard::new("Most Corrupt Dept", self.most_reported(), ""),
            MetricCard::new("Avg Bribe", format::format_compact_inr(summary.avg_bribe), ""),
        ]
    }

    /// Department chart from the per-department counts.
    pub fn chart(&self) -> ChartData {
        let counts = self
            .summary
            .ready()
            .map(|s| s.corruption_by_departments.as_slice())
            .unwrap_or_default();
        aggregate::from_department_stats(&aggregate::department_stats_from_counts(counts))
    }
}
