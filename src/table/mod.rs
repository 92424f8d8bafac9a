//! The explore grid: filter, then sort, then page.

pub mod filter;
pub mod paging;
pub mod sort;

use chrono::NaiveDate;
use serde::Serialize;

use crate::api::Report;

pub use filter::{AmountRange, DateWindow, ReportFilter};
pub use paging::{PAGE_SIZE_OPTIONS, Pagination};
pub use sort::{ReportColumn, SortDirection, SortState, Sortable, sort_rows};

/// Interactive state of the reports grid over a loaded report set.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportGrid {
    pub sort: SortState<ReportColumn>,
    pub filter: ReportFilter,
    pub pagination: Pagination,
    pub page_size_options: Vec<usize>,
}

/// One rendered page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridPage<'a> {
    pub rows: Vec<&'a Report>,
    pub page: usize,
    pub page_count: usize,
    pub page_size: usize,
    pub total_matching: usize,
}

impl Default for ReportGrid {
    fn default() -> Self {
        Self::new(paging::DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS.to_vec())
    }
}

impl ReportGrid {
    pub fn new(page_size: usize, page_size_options: Vec<usize>) -> Self {
        let page_size = if page_size_options.contains(&page_size) {
            page_size
        } else {
            page_size_options
                .first()
                .copied()
                .unwrap_or(paging::DEFAULT_PAGE_SIZE)
        };
        Self {
            sort: SortState::new(ReportColumn::Date, SortDirection::Desc),
            filter: ReportFilter::default(),
            pagination: Pagination::new(page_size),
            page_size_options,
        }
    }

    /// Header click.
    pub fn toggle_sort(&mut self, column: ReportColumn) {
        self.sort.toggle(column);
    }

    /// Change a filter and go back to the first page.
    pub fn set_filter(&mut self, key: &str, value: &str) -> Result<(), String> {
        self.filter.set(key, value)?;
        self.pagination.page = 1;
        Ok(())
    }

    pub fn reset_filters(&mut self) {
        self.filter.reset();
        self.pagination.page = 1;
    }

    pub fn set_page_size(&mut self, size: usize) -> Result<(), String> {
        self.pagination.set_page_size(size, &self.page_size_options)
    }

    /// Filtered and sorted rows, before paging.
    pub fn matching<'a>(&self, reports: &'a [Report], today: NaiveDate) -> Vec<&'a Report> {
        let filtered = self.filter.apply(reports, today);
        sort_rows(&filtered, &self.sort)
    }

    pub fn view<'a>(&self, reports: &'a [Report], today: NaiveDate) -> GridPage<'a> {
        let matching = self.matching(reports, today);
        let total = matching.len();
        let range = self.pagination.range(total);
        GridPage {
            page: self.pagination.page.clamp(1, self.pagination.page_count(total)),
            page_count: self.pagination.page_count(total),
            page_size: self.pagination.page_size,
            total_matching: total,
            rows: matching[range].to_vec(),
        }
    }
}
