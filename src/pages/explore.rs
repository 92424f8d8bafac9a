//! Explore: every report in a sortable, filterable grid.

use chrono::NaiveDate;

use super::{FetchGuard, Resource};
use crate::aggregate::{self, ChartData};
use crate::api::{Report, ReportsApi};
use crate::table::{GridPage, ReportGrid};

pub const REPORTS_ERROR: &str = "Failed to load reports";

#[derive(Debug, Clone, PartialEq)]
pub struct ExplorePage {
    pub reports: Resource<Vec<Report>>,
    pub grid: ReportGrid,
    guard: FetchGuard,
}

impl Default for ExplorePage {
    fn default() -> Self {
        Self::new(ReportGrid::default())
    }
}

impl ExplorePage {
    pub fn new(grid: ReportGrid) -> Self {
        Self {
            reports: Resource::default(),
            grid,
            guard: FetchGuard::default(),
        }
    }

    /// Load all reports on first mount.
    pub fn mount<A: ReportsApi + ?Sized>(&mut self, api: &A) -> bool {
        if !self.guard.try_begin() {
            return false;
        }
        self.reports.begin();
        self.reports.resolve(api.all_reports(), REPORTS_ERROR);
        true
    }

    /// Everything loaded so far; empty before the first successful fetch.
    pub fn loaded(&self) -> &[Report] {
        self.reports.ready().map(Vec::as_slice).unwrap_or_default()
    }

    /// Current grid page.
    pub fn view(&self, today: NaiveDate) -> GridPage<'_> {
        self.grid.view(self.loaded(), today)
    }

    /// Department totals over the rows matching the active filters.
    pub fn department_chart(&self, today: NaiveDate) -> ChartData {
        let matching: Vec<Report> = self
            .grid
            .matching(self.loaded(), today)
            .into_iter()
            .cloned()
            .collect();
        aggregate::department_totals(&matching)
    }
}
