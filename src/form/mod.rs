//! Report submission form.
//!
//! Holds the field values, the dependent district list, and the submission
//! status. The status moves `Idle → Submitting → Success | Error`; a success
//! clears the form and reverts to `Idle` once its display time has passed.

use std::sync::LazyLock;
use std::time::{Duration, Instant};

use regex::Regex;
use serde::Serialize;

use crate::api::{ApiError, NewReportInput, Report, ReportsApi};
use crate::format;

static NON_DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9]").expect("valid non-digit regex"));

/// Departments offered by the form, as `(value, label)`.
pub const DEPARTMENTS: [(&str, &str); 6] = [
    ("Police", "Police"),
    ("Revenue", "Revenue"),
    ("Transport", "Transport"),
    ("Municipal", "Municipal Corporation"),
    ("Electricity", "Electricity Board"),
    ("Other", "Other"),
];

/// Message shown when a failed submission carries no server message.
pub const SUBMIT_FAILED_MESSAGE: &str = "Failed to submit report. Please try again.";

// ---------------------------------------------------------------------------
// Amount input
// ---------------------------------------------------------------------------

/// Reformat a keystroke's worth of amount input: keep digits, drop leading
/// zeros, group Indian-style. Empty when no digits remain.
pub fn format_amount_input(raw: &str) -> String {
    let digits = NON_DIGITS_RE.replace_all(raw, "");
    if digits.is_empty() {
        return String::new();
    }
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        format::group_indian_digits(trimmed)
    }
}

/// Strip the grouping back out; `None` when no digits are present.
pub fn parse_amount_input(display: &str) -> Option<f64> {
    let digits = NON_DIGITS_RE.replace_all(display, "");
    if digits.is_empty() {
        return None;
    }
    digits.parse::<f64>().ok()
}

// ---------------------------------------------------------------------------
// Fields
// ---------------------------------------------------------------------------

/// Raw field values as typed. `amount` holds the grouped display string.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormFields {
    pub state: String,
    pub district: String,
    pub city: String,
    pub department: String,
    pub description: String,
    pub amount: String,
}

/// Required fields left empty, in form order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("missing required fields: {}", .0.join(", "))]
pub struct MissingFields(pub Vec<&'static str>);

impl FormFields {
    /// Build the request body. Only presence is checked.
    pub fn to_input(&self) -> Result<NewReportInput, MissingFields> {
        let mut missing = Vec::new();
        let blank = |s: &str| s.trim().is_empty();
        if blank(&self.state) {
            missing.push("state");
        }
        if blank(&self.city) {
            missing.push("city");
        }
        if blank(&self.department) {
            missing.push("department");
        }
        if blank(&self.description) {
            missing.push("description");
        }
        let amount = parse_amount_input(&self.amount);
        if amount.is_none() {
            missing.push("amount");
        }
        let Some(amount) = amount else {
            return Err(MissingFields(missing));
        };
        if !missing.is_empty() {
            return Err(MissingFields(missing));
        }

        let optional = |s: &str| {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        };
        Ok(NewReportInput {
            department: self.department.trim().to_string(),
            amount,
            state: self.state.trim().to_uppercase(),
            district: optional(&self.district),
            city: optional(&self.city),
            description: self.description.trim().to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// District dropdown
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DistrictSelect {
    pub options: Vec<String>,
    pub loading: bool,
    /// False until a state is chosen.
    pub enabled: bool,
}

impl DistrictSelect {
    pub fn placeholder(&self) -> &'static str {
        if self.loading {
            "Loading..."
        } else {
            "Select District"
        }
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitStatus {
    Idle,
    Submitting,
    /// Shown until `until`.
    Success { until: Instant },
    Error(String),
}

impl SubmitStatus {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::Success { .. } => "success",
            Self::Error(_) => "error",
        }
    }
}

// ---------------------------------------------------------------------------
// Form
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SubmissionForm {
    pub fields: FormFields,
    pub districts: DistrictSelect,
    pub status: SubmitStatus,
    success_display: Duration,
}

impl Default for SubmissionForm {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

impl SubmissionForm {
    pub fn new(success_display: Duration) -> Self {
        Self {
            fields: FormFields::default(),
            districts: DistrictSelect::default(),
            status: SubmitStatus::Idle,
            success_display,
        }
    }

    /// Choose a state and reload its districts. An empty code clears and
    /// disables the district list; a failed fetch leaves it empty.
    pub fn set_state<A: ReportsApi + ?Sized>(&mut self, code: &str, api: &A) {
        self.fields.state = code.trim().to_string();
        self.fields.district.clear();
        self.districts.options.clear();

        if self.fields.state.is_empty() {
            self.districts.enabled = false;
            self.districts.loading = false;
            return;
        }

        self.districts.enabled = true;
        self.districts.loading = true;
        self.districts.options = api.districts(&self.fields.state).unwrap_or_default();
        self.districts.loading = false;
    }

    /// Pick a district from the loaded options; empty clears it.
    pub fn set_district(&mut self, district: &str) -> Result<(), String> {
        let district = district.trim();
        if district.is_empty() {
            self.fields.district.clear();
            return Ok(());
        }
        if !self.districts.enabled {
            return Err("choose a state before a district".to_string());
        }
        match self.districts.options.iter().find(|d| d.eq_ignore_ascii_case(district)) {
            Some(found) => {
                self.fields.district = found.clone();
                Ok(())
            }
            None => Err(format!(
                "unknown district '{district}' for {}",
                self.fields.state
            )),
        }
    }

    /// Set a free-form field. The amount is reformatted as typed.
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<(), String> {
        match name {
            "city" => self.fields.city = value.to_string(),
            "department" => self.fields.department = value.to_string(),
            "description" => self.fields.description = value.to_string(),
            "amount" => self.fields.amount = format_amount_input(value),
            other => return Err(format!("unknown form field '{other}'")),
        }
        Ok(())
    }

    /// Validate and enter `Submitting`. The status is untouched when
    /// required fields are missing.
    pub fn begin_submit(&mut self) -> Result<NewReportInput, MissingFields> {
        let input = self.fields.to_input()?;
        self.status = SubmitStatus::Submitting;
        Ok(input)
    }

    /// Apply the API outcome.
    pub fn finish_submit(&mut self, result: Result<Report, ApiError>, now: Instant) {
        match result {
            Ok(_) => {
                self.fields = FormFields::default();
                self.districts = DistrictSelect::default();
                self.status = SubmitStatus::Success {
                    until: now + self.success_display,
                };
            }
            Err(err) => {
                self.status = SubmitStatus::Error(err.user_message(SUBMIT_FAILED_MESSAGE));
            }
        }
    }

    /// Submit through `api` and return the created report, if any.
    pub fn submit<A: ReportsApi + ?Sized>(
        &mut self,
        api: &A,
        now: Instant,
    ) -> Result<Option<Report>, MissingFields> {
        let input = self.begin_submit()?;
        let result = api.create_report(&input);
        let created = result.as_ref().ok().cloned();
        self.finish_submit(result, now);
        Ok(created)
    }

    /// Advance time; a success past its display window reverts to idle.
    /// Returns whether the status changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if let SubmitStatus::Success { until } = self.status
            && now >= until
        {
            self.status = SubmitStatus::Idle;
            return true;
        }
        false
    }

    pub fn is_submitting(&self) -> bool {
        self.status == SubmitStatus::Submitting
    }

    /// Message for the status banner, if one is showing.
    pub fn banner(&self) -> Option<String> {
        match &self.status {
            SubmitStatus::Success { .. } => {
                Some("Report submitted successfully. Thank you for your contribution.".to_string())
            }
            SubmitStatus::Error(message) => Some(message.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_input_is_grouped() {
        assert_eq!(format_amount_input("1500000"), "15,00,000");
        assert_eq!(format_amount_input("₹ 12a34"), "1,234");
        assert_eq!(format_amount_input("000750"), "750");
        assert_eq!(format_amount_input("00"), "0");
        assert_eq!(format_amount_input("abc"), "");
    }

    #[test]
    fn amount_input_parses_back() {
        assert_eq!(parse_amount_input("15,00,000"), Some(1_500_000.0));
        assert_eq!(parse_amount_input(""), None);
    }

    #[test]
    fn missing_fields_are_listed_in_order() {
        let fields = FormFields {
            state: "mh".to_string(),
            ..Default::default()
        };
        let err = fields.to_input().unwrap_err();
        assert_eq!(err.0, vec!["city", "department", "description", "amount"]);
        assert_eq!(
            err.to_string(),
            "missing required fields: city, department, description, amount"
        );
    }

    #[test]
    fn input_is_normalized() {
        let fields = FormFields {
            state: "mh".to_string(),
            district: String::new(),
            city: "Pune".to_string(),
            department: "Police".to_string(),
            description: "Asked for a fee to register an FIR".to_string(),
            amount: "2,500".to_string(),
        };
        let input = fields.to_input().unwrap();
        assert_eq!(input.state, "MH");
        assert_eq!(input.amount, 2500.0);
        assert_eq!(input.district, None);
        assert_eq!(input.city.as_deref(), Some("Pune"));
    }

    #[test]
    fn tick_only_reverts_success_after_window() {
        let start = Instant::now();
        let mut form = SubmissionForm::new(Duration::from_secs(5));
        form.status = SubmitStatus::Success {
            until: start + Duration::from_secs(5),
        };
        assert!(!form.tick(start + Duration::from_secs(4)));
        assert!(form.tick(start + Duration::from_secs(5)));
        assert_eq!(form.status, SubmitStatus::Idle);

        form.status = SubmitStatus::Error("nope".to_string());
        assert!(!form.tick(start + Duration::from_secs(60)));
        assert_eq!(form.banner().as_deref(), Some("nope"));
    }

    #[test]
    fn district_requires_loaded_option() {
        let mut form = SubmissionForm::default();
        assert!(form.set_district("Pune").is_err());
        form.districts.enabled = true;
        form.districts.options = vec!["Pune".to_string()];
        form.set_district("pune").unwrap();
        assert_eq!(form.fields.district, "Pune");
        assert!(form.set_district("Nagpur").is_err());
    }
}
