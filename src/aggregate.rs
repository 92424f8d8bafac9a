//! Department breakdowns for the pie chart and its legend.
//!
//! All functions are pure. Output slices are ordered by value, descending,
//! with equal values left in the order they were first seen.

use std::collections::HashMap;

use serde::Serialize;

use crate::api::{DepartmentStat, Report};
use crate::format;

/// What a slice value measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Amount,
    Count,
}

impl ValueKind {
    /// Render a value of this kind (`₹1,500` or `1,500`).
    pub fn format(self, value: f64) -> String {
        match self {
            Self::Amount => format::format_inr(value),
            Self::Count => format::format_count(value),
        }
    }

    /// Legend / tooltip caption.
    pub fn caption(self) -> &'static str {
        match self {
            Self::Amount => "Amount",
            Self::Count => "Reports",
        }
    }
}

/// One chart slice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSlice {
    pub label: String,
    pub value: f64,
    pub kind: ValueKind,
}

/// Chart-ready breakdown plus its total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub slices: Vec<ChartSlice>,
    pub total: f64,
    /// Kind of the leading slice; amount when there are no slices.
    pub total_kind: ValueKind,
}

impl ChartData {
    fn from_slices(mut slices: Vec<ChartSlice>) -> Self {
        sort_by_value_desc(&mut slices);
        let total = slices.iter().map(|s| s.value).sum();
        let total_kind = slices.first().map_or(ValueKind::Amount, |s| s.kind);
        Self {
            slices,
            total,
            total_kind,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Formatted total, in the leading slice's kind.
    pub fn formatted_total(&self) -> String {
        self.total_kind.format(self.total)
    }

    /// Share of the total for one slice, in percent.
    pub fn share_pct(&self, slice: &ChartSlice) -> f64 {
        if self.total == 0.0 {
            0.0
        } else {
            slice.value / self.total * 100.0
        }
    }
}

/// Stable descending sort by value.
pub fn sort_by_value_desc(slices: &mut [ChartSlice]) {
    slices.sort_by(|a, b| {
        b.value
            .partial_cmp(&a.value)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Sum report amounts per department.
pub fn department_totals(reports: &[Report]) -> ChartData {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut slices: Vec<ChartSlice> = Vec::new();

    for report in reports {
        match index.get(report.department.as_str()) {
            Some(&i) => slices[i].value += report.amount,
            None => {
                index.insert(report.department.as_str(), slices.len());
                slices.push(ChartSlice {
                    label: report.department.clone(),
                    value: report.amount,
                    kind: ValueKind::Amount,
                });
            }
        }
    }

    ChartData::from_slices(slices)
}

/// Chart pre-aggregated stats: amount when positive, otherwise the count.
pub fn from_department_stats(stats: &[DepartmentStat]) -> ChartData {
    let slices = stats
        .iter()
        .map(|stat| {
            if stat.amount > 0.0 {
                ChartSlice {
                    label: stat.department.clone(),
                    value: stat.amount,
                    kind: ValueKind::Amount,
                }
            } else {
                ChartSlice {
                    label: stat.department.clone(),
                    value: stat.count,
                    kind: ValueKind::Count,
                }
            }
        })
        .collect();

    ChartData::from_slices(slices)
}

/// Turn a state summary's department → count breakdown into chart stats.
///
/// The backend only reports counts per department, so `amount` is zero.
pub fn department_stats_from_counts(counts: &[(String, f64)]) -> Vec<DepartmentStat> {
    counts
        .iter()
        .map(|(department, count)| DepartmentStat {
            department: department.clone(),
            count: *count,
            amount: 0.0,
        })
        .collect()
}

/// Department with the highest count; on a tie the later entry wins.
pub fn most_reported(counts: &[(String, f64)]) -> Option<&str> {
    counts
        .iter()
        .reduce(|a, b| if a.1 > b.1 { a } else { b })
        .map(|(department, _)| department.as_str())
}
