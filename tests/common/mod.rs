//! Shared fixtures: an in-memory `ReportsApi` and `TopologySource`.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use bribemap::api::{
    ApiError, GetReportsParams, HealthStatus, HeatmapEntry, NewReportInput, Report,
    ReportListResponse, ReportsApi, StateSummaryStats, SummaryStats, TopologySource,
};

pub fn report(id: &str, state: &str, department: &str, amount: f64, date: &str) -> Report {
    Report {
        id: id.to_string(),
        department: department.to_string(),
        amount,
        state: state.to_string(),
        district: None,
        city: Some("Town".to_string()),
        description: format!("{department} asked for {amount}"),
        date_reported: date.to_string(),
    }
}

pub fn network_error() -> ApiError {
    ApiError::Network {
        message: "connection refused".to_string(),
    }
}

/// Canned backend. Every call is counted; `fail` makes every call fail.
#[derive(Default)]
pub struct MockApi {
    pub reports: Vec<Report>,
    pub heatmap: Vec<HeatmapEntry>,
    pub districts: Vec<String>,
    pub state_summary: Option<StateSummaryStats>,
    pub create_error: Option<ApiError>,
    pub fail: bool,
    pub calls: Cell<usize>,
    pub created: RefCell<Vec<NewReportInput>>,
}

impl MockApi {
    fn hit(&self) -> Result<(), ApiError> {
        self.calls.set(self.calls.get() + 1);
        if self.fail { Err(network_error()) } else { Ok(()) }
    }
}

impl ReportsApi for MockApi {
    fn list_reports(&self, params: &GetReportsParams) -> Result<ReportListResponse, ApiError> {
        self.hit()?;
        let data: Vec<Report> = self
            .reports
            .iter()
            .filter(|r| params.state.as_ref().is_none_or(|s| &r.state == s))
            .cloned()
            .collect();
        Ok(ReportListResponse {
            total: data.len() as u64,
            data,
        })
    }

    fn all_reports(&self) -> Result<Vec<Report>, ApiError> {
        self.hit()?;
        Ok(self.reports.clone())
    }

    fn create_report(&self, input: &NewReportInput) -> Result<Report, ApiError> {
        self.hit()?;
        if let Some(err) = &self.create_error {
            return Err(err.clone());
        }
        self.created.borrow_mut().push(input.clone());
        Ok(Report {
            id: format!("r-{}", self.created.borrow().len()),
            department: input.department.clone(),
            amount: input.amount,
            state: input.state.clone(),
            district: input.district.clone(),
            city: input.city.clone(),
            description: input.description.clone(),
            date_reported: "2025-06-01T12:00:00Z".to_string(),
        })
    }

    fn delete_all_reports(&self) -> Result<(), ApiError> {
        self.hit()
    }

    fn summary_stats(&self) -> Result<SummaryStats, ApiError> {
        self.hit()?;
        Ok(SummaryStats {
            total_corruption_amount: self.reports.iter().map(|r| r.amount).sum(),
            median_bribe: 1500.0,
            most_reported_department: "Police".to_string(),
            total_reports: self.reports.len() as u64,
        })
    }

    fn heatmap(&self) -> Result<Vec<HeatmapEntry>, ApiError> {
        self.hit()?;
        Ok(self.heatmap.clone())
    }

    fn state_summary(&self, _state_code: &str) -> Result<StateSummaryStats, ApiError> {
        self.hit()?;
        self.state_summary.clone().ok_or(ApiError::Server {
            status: 404,
            error: Some("Not Found".to_string()),
            message: None,
        })
    }

    fn districts(&self, _state_code: &str) -> Result<Vec<String>, ApiError> {
        self.hit()?;
        Ok(self.districts.clone())
    }

    fn health(&self) -> Result<HealthStatus, ApiError> {
        self.hit()?;
        Ok(HealthStatus {
            status: "ok".to_string(),
            timestamp: "2025-06-01T12:00:00Z".to_string(),
            service: "mock".to_string(),
        })
    }
}

/// Geometry names, or a failure when `None`.
pub struct MockTopology(pub Option<Vec<String>>);

impl TopologySource for MockTopology {
    fn state_names(&self) -> Result<Vec<String>, ApiError> {
        self.0.clone().ok_or_else(network_error)
    }
}
