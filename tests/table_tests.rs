/// Aggregation and grid behavior over realistic report sets.
mod common;

use bribemap::aggregate;
use bribemap::format;
use bribemap::table::{ReportColumn, ReportGrid, SortDirection, SortState, sort_rows};
use chrono::NaiveDate;
use common::report;

fn sample() -> Vec<bribemap::api::Report> {
    vec![
        report("1", "MH", "Police", 500.0, "2025-05-02T09:00:00Z"),
        report("2", "KA", "Revenue", 12_000.0, "2025-06-20T09:00:00Z"),
        report("3", "MH", "Transport", 750.0, "2024-01-10T09:00:00Z"),
        report("4", "DL", "Police", 2_500.0, "2025-06-25T09:00:00Z"),
        report("5", "KA", "Municipal", 300.0, "2023-11-30T09:00:00Z"),
    ]
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
}

fn ids(rows: &[&bribemap::api::Report]) -> Vec<String> {
    rows.iter().map(|r| r.id.clone()).collect()
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

#[test]
fn department_totals_match_direct_sum() {
    let reports = sample();
    let chart = aggregate::department_totals(&reports);
    let direct: f64 = reports.iter().map(|r| r.amount).sum();
    assert_eq!(chart.total, direct);
    assert_eq!(chart.slices.iter().map(|s| s.value).sum::<f64>(), direct);
    assert_eq!(chart.slices[0].label, "Revenue");
    assert_eq!(chart.slices[1].label, "Police");
    assert_eq!(chart.slices[1].value, 3_000.0);
}

#[test]
fn state_breakdown_charts_counts() {
    let counts = vec![
        ("Police".to_string(), 4.0),
        ("Revenue".to_string(), 9.0),
        ("Transport".to_string(), 9.0),
    ];
    let chart = aggregate::from_department_stats(&aggregate::department_stats_from_counts(&counts));
    assert_eq!(chart.total_kind, aggregate::ValueKind::Count);
    assert_eq!(chart.formatted_total(), "22");
    // Equal counts keep server order.
    assert_eq!(chart.slices[0].label, "Revenue");
    assert_eq!(chart.slices[1].label, "Transport");
    assert_eq!(aggregate::most_reported(&counts), Some("Transport"));
}

#[test]
fn compact_currency_thresholds() {
    assert_eq!(format::format_compact_inr(1_500_000.0), "₹15.0 L");
    assert_eq!(format::format_compact_inr(150_000_000.0), "₹15.0 Cr");
    assert_eq!(format::format_compact_inr(2_500.0), "₹2.5 K");
    assert_eq!(format::format_compact_inr(500.0), "₹500");
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

#[test]
fn toggling_same_header_twice_restores_order() {
    let reports = sample();
    let refs: Vec<_> = reports.iter().collect();
    let mut state = SortState::new(ReportColumn::Amount, SortDirection::Desc);
    let before = ids(&sort_rows(&refs, &state));

    state.toggle(ReportColumn::Amount);
    let flipped = ids(&sort_rows(&refs, &state));
    let mut reversed = before.clone();
    reversed.reverse();
    assert_eq!(flipped, reversed);

    state.toggle(ReportColumn::Amount);
    assert_eq!(ids(&sort_rows(&refs, &state)), before);
}

#[test]
fn switching_headers_never_combines_keys() {
    let reports = sample();
    let refs: Vec<_> = reports.iter().collect();
    let mut state = SortState::new(ReportColumn::Amount, SortDirection::Asc);
    state.toggle(ReportColumn::State);
    assert_eq!(state.direction, SortDirection::Desc);

    // Rows with the same state keep their input order; amount plays no part.
    let sorted = ids(&sort_rows(&refs, &state));
    assert_eq!(sorted, vec!["1", "3", "2", "5", "4"]);
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

#[test]
fn grid_filters_sort_and_pages() {
    let reports = sample();
    let mut grid = ReportGrid::new(20, vec![20, 50, 100]);
    grid.set_filter("dateRange", "last-year").unwrap();
    grid.toggle_sort(ReportColumn::Amount);

    let page = grid.view(&reports, today());
    assert_eq!(page.total_matching, 3);
    assert_eq!(ids(&page.rows), vec!["2", "4", "1"]);
    assert_eq!(page.page_count, 1);

    grid.set_filter("amountRange", "2000-10000").unwrap();
    assert_eq!(ids(&grid.view(&reports, today()).rows), vec!["4"]);

    grid.reset_filters();
    assert_eq!(grid.view(&reports, today()).total_matching, 5);
}

#[test]
fn state_filter_accepts_names_and_codes() {
    let reports = sample();
    let mut grid = ReportGrid::default();
    grid.set_filter("state", "karnataka").unwrap();
    assert_eq!(grid.view(&reports, today()).total_matching, 2);
    grid.set_filter("state", "KA").unwrap();
    assert_eq!(grid.view(&reports, today()).total_matching, 2);
}

#[test]
fn page_size_must_be_offered() {
    let mut grid = ReportGrid::default();
    assert!(grid.set_page_size(50).is_ok());
    assert!(grid.set_page_size(25).is_err());
    assert_eq!(grid.pagination.page_size, 50);
}
