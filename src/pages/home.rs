//! Home: country totals and the heatmap.

use serde::Serialize;

use super::{FetchGuard, MetricCard, Resource};
use crate::api::{ReportsApi, SummaryStats, TopologySource};
use crate::format;
use crate::map::HeatmapView;

pub const STATS_ERROR: &str = "Failed to load statistics";
pub const MAP_ERROR: &str = "Failed to load map data";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomePage {
    pub stats: Resource<SummaryStats>,
    /// Map failures are only logged; the page renders without a map.
    pub map: Resource<HeatmapView>,
    #[serde(skip)]
    guard: FetchGuard,
}

impl Default for HomePage {
    fn default() -> Self {
        Self::new()
    }
}

impl HomePage {
    pub fn new() -> Self {
        Self {
            stats: Resource::default(),
            map: Resource::default(),
            guard: FetchGuard::default(),
        }
    }

    /// Fetch summary, heatmap and geometry on first mount. Returns whether
    /// anything was fetched.
    ///
    /// Without geometry the map falls back to the reported states only.
    pub fn mount<A, T>(&mut self, api: &A, topology: &T) -> bool
    where
        A: ReportsApi + ?Sized,
        T: TopologySource + ?Sized,
    {
        if !self.guard.try_begin() {
            return false;
        }

        self.stats.begin();
        self.stats.resolve(api.summary_stats(), STATS_ERROR);

        self.map.begin();
        let map = api.heatmap().map(|entries| {
            let geometry = topology.state_names().ok();
            HeatmapView::build(&entries, geometry.as_deref())
        });
        self.map.resolve(map, MAP_ERROR);
        true
    }

    /// The three headline cards; empty until stats arrive.
    pub fn metric_cards(&self) -> Vec<MetricCard> {
        let Some(stats) = self.stats.ready() else {
            return Vec::new();
        };
        vec![
            MetricCard {
                title: "Total Corruption Amount".to_string(),
                value: format::format_inr(stats.total_corruption_amount),
                label: format!("{} reports", format::format_count(stats.total_reports as f64)),
            },
            MetricCard::new(
                "Median Bribe",
                format::format_inr(stats.median_bribe),
                "Based on all reports",
            ),
            MetricCard::new(
                "Most Reported",
                stats.most_reported_department.clone(),
                "Department",
            ),
        ]
    }
}
