//! Single-key client-side sorting.
//!
//! One field is active at a time. Toggling the active field flips the
//! direction; switching to another field starts descending. There is no
//! secondary key.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::api::Report;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Self::Asc => "↑",
            Self::Desc => "↓",
        }
    }
}

/// Active sort field and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortState<F> {
    pub field: F,
    pub direction: SortDirection,
}

impl<F: Copy + PartialEq> SortState<F> {
    pub fn new(field: F, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Header click.
    pub fn toggle(&mut self, field: F) {
        if self.field == field {
            self.direction = self.direction.flipped();
        } else {
            self.field = field;
            self.direction = SortDirection::Desc;
        }
    }

    /// Arrow to show next to a header, if it is the active one.
    pub fn indicator(&self, field: F) -> Option<&'static str> {
        (self.field == field).then(|| self.direction.arrow())
    }
}

/// A comparable cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Text(String),
    Number(f64),
}

/// Plain less/greater comparison; mixed or NaN values compare equal.
pub fn compare_values(a: &SortValue, b: &SortValue) -> Ordering {
    match (a, b) {
        (SortValue::Text(a), SortValue::Text(b)) => a.cmp(b),
        (SortValue::Number(a), SortValue::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
        _ => Ordering::Equal,
    }
}

/// Rows that expose per-field sort values.
pub trait Sortable {
    type Field: Copy + PartialEq;

    fn sort_value(&self, field: Self::Field) -> SortValue;
}

/// Sort borrowed rows by the active field.
pub fn sort_rows<'a, T: Sortable>(rows: &[&'a T], state: &SortState<T::Field>) -> Vec<&'a T> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| {
        let ord = compare_values(&a.sort_value(state.field), &b.sort_value(state.field));
        match state.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
    sorted
}

// ---------------------------------------------------------------------------
// Report columns
// ---------------------------------------------------------------------------

/// Sortable columns of the report grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportColumn {
    Location,
    Department,
    Description,
    Amount,
    State,
    District,
    City,
    Date,
}

impl ReportColumn {
    pub const ALL: [ReportColumn; 8] = [
        Self::Location,
        Self::Department,
        Self::Description,
        Self::Amount,
        Self::State,
        Self::District,
        Self::City,
        Self::Date,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Location => "location",
            Self::Department => "department",
            Self::Description => "description",
            Self::Amount => "amount",
            Self::State => "state",
            Self::District => "district",
            Self::City => "city",
            Self::Date => "date",
        }
    }

    pub fn header(self) -> &'static str {
        match self {
            Self::Location => "Location",
            Self::Department => "Department",
            Self::Description => "Description",
            Self::Amount => "Amount",
            Self::State => "State",
            Self::District => "District",
            Self::City => "City",
            Self::Date => "Date",
        }
    }
}

impl fmt::Display for ReportColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReportColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        let s = match s.as_str() {
            "date_reported" => "date",
            other => other,
        };
        Self::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|c| c.name()).collect();
                format!("unknown column '{s}' (expected one of: {})", names.join(", "))
            })
    }
}

impl Sortable for Report {
    type Field = ReportColumn;

    fn sort_value(&self, field: ReportColumn) -> SortValue {
        let text = |s: &str| SortValue::Text(s.to_string());
        match field {
            ReportColumn::Location => SortValue::Text(self.location()),
            ReportColumn::Department => text(&self.department),
            ReportColumn::Description => text(&self.description),
            ReportColumn::Amount => SortValue::Number(self.amount),
            ReportColumn::State => text(&self.state),
            ReportColumn::District => text(self.district.as_deref().unwrap_or("")),
            ReportColumn::City => text(self.city.as_deref().unwrap_or("")),
            // ISO 8601 timestamps order correctly as text.
            ReportColumn::Date => text(&self.date_reported),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_then_resets_on_new_field() {
        let mut state = SortState::new(ReportColumn::Date, SortDirection::Desc);
        state.toggle(ReportColumn::Date);
        assert_eq!(state.direction, SortDirection::Asc);
        state.toggle(ReportColumn::Amount);
        assert_eq!(state, SortState::new(ReportColumn::Amount, SortDirection::Desc));
        state.toggle(ReportColumn::Amount);
        assert_eq!(state.direction, SortDirection::Asc);
    }

    #[test]
    fn indicator_only_on_active_field() {
        let state = SortState::new(ReportColumn::Amount, SortDirection::Asc);
        assert_eq!(state.indicator(ReportColumn::Amount), Some("↑"));
        assert_eq!(state.indicator(ReportColumn::City), None);
    }

    #[test]
    fn mixed_values_compare_equal() {
        assert_eq!(
            compare_values(&SortValue::Text("a".into()), &SortValue::Number(1.0)),
            Ordering::Equal
        );
        assert_eq!(
            compare_values(&SortValue::Number(f64::NAN), &SortValue::Number(1.0)),
            Ordering::Equal
        );
        assert_eq!(
            compare_values(&SortValue::Number(2.0), &SortValue::Number(10.0)),
            Ordering::Less
        );
    }

    #[test]
    fn column_parsing() {
        assert_eq!("Amount".parse::<ReportColumn>(), Ok(ReportColumn::Amount));
        assert_eq!("date_reported".parse::<ReportColumn>(), Ok(ReportColumn::Date));
        assert!("service".parse::<ReportColumn>().is_err());
    }
}
