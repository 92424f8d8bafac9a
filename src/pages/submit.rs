//! Submit: the report form plus the choices it offers.

use std::time::Duration;

use crate::form::{DEPARTMENTS, SubmissionForm};
use crate::states::INDIAN_STATES;

#[derive(Debug, Clone, Default)]
pub struct SubmitPage {
    pub form: SubmissionForm,
}

impl SubmitPage {
    pub fn new(success_display: Duration) -> Self {
        Self {
            form: SubmissionForm::new(success_display),
        }
    }

    /// `(code, "Name (CODE)")` for the state dropdown.
    pub fn state_options() -> Vec<(&'static str, String)> {
        INDIAN_STATES
            .iter()
            .map(|s| (s.code, format!("{} ({})", s.name, s.code)))
            .collect()
    }

    /// `(value, label)` for the department dropdown.
    pub fn department_options() -> &'static [(&'static str, &'static str)] {
        &DEPARTMENTS
    }
}
