//! 1-based pagination over an in-memory row set.

use std::ops::Range;

use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const PAGE_SIZE_OPTIONS: [usize; 3] = [20, 50, 100];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page_size: usize,
    /// Current page, starting at 1.
    pub page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            page: 1,
        }
    }

    /// Number of pages for `total` rows; never less than 1.
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    /// Jump to `page`, clamped to `[1, page_count]`.
    pub fn go_to(&mut self, page: usize, total: usize) {
        self.page = page.clamp(1, self.page_count(total));
    }

    pub fn next(&mut self, total: usize) {
        self.go_to(self.page + 1, total);
    }

    pub fn prev(&mut self, total: usize) {
        self.go_to(self.page.saturating_sub(1), total);
    }

    /// Change the page size and return to page 1. Sizes outside `options`
    /// are rejected.
    pub fn set_page_size(&mut self, size: usize, options: &[usize]) -> Result<(), String> {
        if !options.contains(&size) {
            let opts: Vec<String> = options.iter().map(|o| o.to_string()).collect();
            return Err(format!(
                "invalid page size {size} (expected one of: {})",
                opts.join(", ")
            ));
        }
        self.page_size = size;
        self.page = 1;
        Ok(())
    }

    /// Index range of the current page, after clamping to `total`.
    pub fn range(&self, total: usize) -> Range<usize> {
        let page = self.page.clamp(1, self.page_count(total));
        let start = ((page - 1) * self.page_size).min(total);
        let end = (start + self.page_size).min(total);
        start..end
    }

    pub fn slice<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        &rows[self.range(rows.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_has_floor_of_one() {
        let pager = Pagination::default();
        assert_eq!(pager.page_count(0), 1);
        assert_eq!(pager.page_count(20), 1);
        assert_eq!(pager.page_count(21), 2);
    }

    #[test]
    fn navigation_is_clamped() {
        let mut pager = Pagination::new(20);
        pager.prev(45);
        assert_eq!(pager.page, 1);
        pager.next(45);
        pager.next(45);
        pager.next(45);
        assert_eq!(pager.page, 3);
        pager.go_to(99, 45);
        assert_eq!(pager.page, 3);
        assert_eq!(pager.range(45), 40..45);
    }

    #[test]
    fn page_size_change_resets_page() {
        let mut pager = Pagination::new(20);
        pager.go_to(3, 100);
        pager.set_page_size(50, &PAGE_SIZE_OPTIONS).unwrap();
        assert_eq!(pager, Pagination { page_size: 50, page: 1 });
        assert!(pager.set_page_size(30, &PAGE_SIZE_OPTIONS).is_err());
        assert_eq!(pager.page_size, 50);
    }

    #[test]
    fn slice_handles_shrunk_data() {
        let rows: Vec<u32> = (0..25).collect();
        let mut pager = Pagination::new(20);
        pager.go_to(2, rows.len());
        assert_eq!(pager.slice(&rows), &[20, 21, 22, 23, 24]);
        assert_eq!(pager.slice(&rows[..5]), &[0, 1, 2, 3, 4]);
        assert!(pager.slice::<u32>(&[]).is_empty());
    }
}
