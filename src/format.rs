//! Display formatting for amounts, counts and dates.
//!
//! Amounts are always rendered the en-IN way: rupee symbol, no fraction
//! digits, and Indian digit grouping (last three digits, then pairs), so
//! `1234567` becomes `₹12,34,567`.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const CRORE: f64 = 10_000_000.0;
const LAKH: f64 = 100_000.0;
const THOUSAND: f64 = 1_000.0;

/// Group a plain digit string the Indian way (`1234567` → `12,34,567`).
pub fn group_indian_digits(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// Round to a whole number and group it, keeping a leading minus sign.
fn grouped_whole(value: f64) -> (bool, String) {
    let value = if value.is_finite() { value.round() } else { 0.0 };
    let negative = value < 0.0;
    let digits = format!("{:.0}", value.abs());
    (negative, group_indian_digits(&digits))
}

/// Format an amount as Indian rupees with no fraction digits.
pub fn format_inr(amount: f64) -> String {
    let (negative, grouped) = grouped_whole(amount);
    if negative {
        format!("-₹{grouped}")
    } else {
        format!("₹{grouped}")
    }
}

/// Format a count with Indian digit grouping and no symbol.
pub fn format_count(count: f64) -> String {
    let (negative, grouped) = grouped_whole(count);
    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Compact rupee format used for headline metrics.
///
/// Thresholds are fixed at one thousand (K), one lakh (L) and one crore
/// (Cr); anything below a thousand uses [`format_inr`].
pub fn format_compact_inr(amount: f64) -> String {
    if amount >= CRORE {
        format!("₹{:.1} Cr", amount / CRORE)
    } else if amount >= LAKH {
        format!("₹{:.1} L", amount / LAKH)
    } else if amount >= THOUSAND {
        format!("₹{:.1} K", amount / THOUSAND)
    } else {
        format_inr(amount)
    }
}

/// Parse a report timestamp.
///
/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS[.f]` timestamp, or a bare
/// `YYYY-MM-DD` date.
pub fn parse_report_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Short en-IN date (`15 Jan 2025`). Unparseable input is returned as-is.
pub fn format_date(raw: &str) -> String {
    match parse_report_date(raw) {
        Some(date) => date.format("%-d %b %Y").to_string(),
        None => raw.to_string(),
    }
}

/// Truncate a string to `max_chars` characters, appending "…" if truncated.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_digits_indian_style() {
        assert_eq!(group_indian_digits("0"), "0");
        assert_eq!(group_indian_digits("999"), "999");
        assert_eq!(group_indian_digits("1000"), "1,000");
        assert_eq!(group_indian_digits("100000"), "1,00,000");
        assert_eq!(group_indian_digits("1234567"), "12,34,567");
        assert_eq!(group_indian_digits("123456789"), "12,34,56,789");
    }

    #[test]
    fn format_inr_rounds_to_whole_rupees() {
        assert_eq!(format_inr(500.0), "₹500");
        assert_eq!(format_inr(1500.4), "₹1,500");
        assert_eq!(format_inr(1500.5), "₹1,501");
        assert_eq!(format_inr(2_500_000.0), "₹25,00,000");
        assert_eq!(format_inr(-750.0), "-₹750");
        assert_eq!(format_inr(f64::NAN), "₹0");
    }

    #[test]
    fn compact_thresholds() {
        assert_eq!(format_compact_inr(1_500_000.0), "₹15.0 L");
        assert_eq!(format_compact_inr(150_000_000.0), "₹15.0 Cr");
        assert_eq!(format_compact_inr(500.0), "₹500");
        assert_eq!(format_compact_inr(1_000.0), "₹1.0 K");
        assert_eq!(format_compact_inr(99_999.0), "₹100.0 K");
        assert_eq!(format_compact_inr(100_000.0), "₹1.0 L");
        assert_eq!(format_compact_inr(10_000_000.0), "₹1.0 Cr");
    }

    #[test]
    fn count_has_no_symbol() {
        assert_eq!(format_count(12345.0), "12,345");
        assert_eq!(format_count(7.0), "7");
    }

    #[test]
    fn dates_in_short_form() {
        assert_eq!(format_date("2025-01-15T10:00:00+00:00"), "15 Jan 2025");
        assert_eq!(format_date("2025-01-05T10:00:00.123Z"), "5 Jan 2025");
        assert_eq!(format_date("2024-11-30T08:15:00"), "30 Nov 2024");
        assert_eq!(format_date("2024-02-29"), "29 Feb 2024");
        assert_eq!(format_date("yesterday"), "yesterday");
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 5), "hell…");
        assert_eq!(truncate("₹₹₹₹", 3), "₹₹…");
    }
}
