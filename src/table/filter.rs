//! Report filters: state, department, amount range, date window, text.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::api::Report;
use crate::format;
use crate::states;

// ---------------------------------------------------------------------------
// Amount range
// ---------------------------------------------------------------------------

/// Half-open amount range `[min, max)`; no upper bound when `max` is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AmountRange {
    pub min: f64,
    pub max: Option<f64>,
}

impl AmountRange {
    /// The ranges offered by the filter panel.
    pub const PRESETS: [&'static str; 4] = ["0-500", "500-2000", "2000-10000", "10000+"];

    pub fn contains(&self, amount: f64) -> bool {
        amount >= self.min && self.max.is_none_or(|max| amount < max)
    }
}

impl FromStr for AmountRange {
    type Err = String;

    /// Parse `A-B` or `A+`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let bad = || format!("invalid amount range '{s}' (expected e.g. 500-2000 or 10000+)");
        let number = |v: &str| v.trim().replace(',', "").parse::<f64>().map_err(|_| bad());

        if let Some(min) = s.strip_suffix('+') {
            return Ok(Self {
                min: number(min)?,
                max: None,
            });
        }
        let (min, max) = s.split_once('-').ok_or_else(bad)?;
        let (min, max) = (number(min)?, number(max)?);
        if max <= min {
            return Err(bad());
        }
        Ok(Self {
            min,
            max: Some(max),
        })
    }
}

impl fmt::Display for AmountRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "{} - {}", format::format_inr(self.min), format::format_inr(max)),
            None => write!(f, "{}+", format::format_inr(self.min)),
        }
    }
}

// ---------------------------------------------------------------------------
// Date window
// ---------------------------------------------------------------------------

/// Report age relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateWindow {
    /// Within the last 30 days.
    LastMonth,
    /// Within the last 365 days.
    LastYear,
    /// More than 365 days ago.
    Older,
}

impl DateWindow {
    pub fn contains(self, date: NaiveDate, today: NaiveDate) -> bool {
        let year_ago = today - Duration::days(365);
        match self {
            Self::LastMonth => date >= today - Duration::days(30),
            Self::LastYear => date >= year_ago,
            Self::Older => date < year_ago,
        }
    }
}

impl FromStr for DateWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "last-month" | "month" => Ok(Self::LastMonth),
            "last-year" | "year" => Ok(Self::LastYear),
            "older" => Ok(Self::Older),
            other => Err(format!(
                "invalid date range '{other}' (expected last-month, last-year or older)"
            )),
        }
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LastMonth => "last-month",
            Self::LastYear => "last-year",
            Self::Older => "older",
        })
    }
}

// ---------------------------------------------------------------------------
// Combined filter
// ---------------------------------------------------------------------------

/// All active filters. Unset filters match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportFilter {
    /// State code or name.
    pub state: Option<String>,
    pub department: Option<String>,
    pub amount: Option<AmountRange>,
    pub date: Option<DateWindow>,
    /// Case-insensitive substring of the description.
    pub search: Option<String>,
}

impl ReportFilter {
    /// Set one filter by its panel key; an empty value clears it.
    ///
    /// Keys: `state`, `department`, `amountRange`, `dateRange`, `search`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        let value = value.trim();
        let text = || (!value.is_empty()).then(|| value.to_string());
        match key {
            "state" => self.state = text(),
            "department" => self.department = text(),
            "amountRange" | "amount_range" | "amount" => {
                self.amount = if value.is_empty() {
                    None
                } else {
                    Some(value.parse()?)
                };
            }
            "dateRange" | "date_range" | "date" => {
                self.date = if value.is_empty() {
                    None
                } else {
                    Some(value.parse()?)
                };
            }
            "search" => self.search = text(),
            other => return Err(format!("unknown filter '{other}'")),
        }
        Ok(())
    }

    /// "Reset all".
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, report: &Report, today: NaiveDate) -> bool {
        if let Some(state) = &self.state
            && !states::matches(&report.state, state)
        {
            return false;
        }
        if let Some(department) = &self.department
            && !report.department.eq_ignore_ascii_case(department.trim())
        {
            return false;
        }
        if let Some(range) = &self.amount
            && !range.contains(report.amount)
        {
            return false;
        }
        if let Some(window) = self.date {
            match format::parse_report_date(&report.date_reported) {
                Some(date) if window.contains(date, today) => {}
                _ => return false,
            }
        }
        if let Some(search) = &self.search
            && !report
                .description
                .to_lowercase()
                .contains(&search.to_lowercase())
        {
            return false;
        }
        true
    }

    pub fn apply<'a>(&self, reports: &'a [Report], today: NaiveDate) -> Vec<&'a Report> {
        reports.iter().filter(|r| self.matches(r, today)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(state: &str, department: &str, amount: f64, date: &str) -> Report {
        Report {
            id: format!("{state}-{amount}"),
            department: department.to_string(),
            amount,
            state: state.to_string(),
            district: None,
            city: None,
            description: "Asked for money to process a licence".to_string(),
            date_reported: date.to_string(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
    }

    #[test]
    fn amount_ranges_are_half_open() {
        let low: AmountRange = "0-500".parse().unwrap();
        let high: AmountRange = "10000+".parse().unwrap();
        assert!(low.contains(0.0));
        assert!(low.contains(499.0));
        assert!(!low.contains(500.0));
        assert!(high.contains(10_000.0));
        assert!(high.contains(1e9));
        assert!("500".parse::<AmountRange>().is_err());
        assert!("2000-500".parse::<AmountRange>().is_err());
        assert_eq!(low.to_string(), "₹0 - ₹500");
    }

    #[test]
    fn date_windows() {
        let today = today();
        let recent = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let months_ago = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let years_ago = NaiveDate::from_ymd_opt(2023, 1, 10).unwrap();

        assert!(DateWindow::LastMonth.contains(recent, today));
        assert!(!DateWindow::LastMonth.contains(months_ago, today));
        assert!(DateWindow::LastYear.contains(months_ago, today));
        assert!(DateWindow::Older.contains(years_ago, today));
        assert!(!DateWindow::Older.contains(months_ago, today));
    }

    #[test]
    fn combined_filters() {
        let reports = vec![
            report("MH", "Police", 300.0, "2025-06-20T00:00:00Z"),
            report("MH", "Revenue", 5000.0, "2025-06-20T00:00:00Z"),
            report("KA", "Police", 300.0, "2023-01-01T00:00:00Z"),
        ];
        let mut filter = ReportFilter::default();
        filter.set("state", "Maharashtra").unwrap();
        filter.set("department", "police").unwrap();
        assert_eq!(filter.apply(&reports, today()).len(), 1);

        filter.reset();
        assert!(filter.is_empty());
        filter.set("dateRange", "older").unwrap();
        let older = filter.apply(&reports, today());
        assert_eq!(older.len(), 1);
        assert_eq!(older[0].state, "KA");
    }

    #[test]
    fn empty_value_clears_and_bad_input_errors() {
        let mut filter = ReportFilter::default();
        filter.set("amountRange", "500-2000").unwrap();
        assert!(filter.amount.is_some());
        filter.set("amountRange", "").unwrap();
        assert!(filter.amount.is_none());
        assert!(filter.set("dateRange", "someday").is_err());
        assert!(filter.set("service", "x").is_err());
    }

    #[test]
    fn search_is_case_insensitive() {
        let reports = vec![report("DL", "Transport", 100.0, "2025-06-01")];
        let mut filter = ReportFilter::default();
        filter.set("search", "LICENCE").unwrap();
        assert_eq!(filter.apply(&reports, today()).len(), 1);
        filter.set("search", "passport").unwrap();
        assert!(filter.apply(&reports, today()).is_empty());
    }
}
