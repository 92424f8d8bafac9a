//! Page models.
//!
//! Each page fetches its data once when first mounted and keeps the result
//! for rendering. A failed fetch sets an inline error and leaves whatever
//! was loaded before untouched.

pub mod explore;
pub mod home;
pub mod state_details;
pub mod submit;

use serde::Serialize;

use crate::api::ApiError;

pub use explore::ExplorePage;
pub use home::HomePage;
pub use state_details::StateDetailsPage;
pub use submit::SubmitPage;

/// One-shot flag: the first `try_begin` wins, later calls are no-ops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchGuard {
    fetched: bool,
}

impl FetchGuard {
    pub fn try_begin(&mut self) -> bool {
        !std::mem::replace(&mut self.fetched, true)
    }

    pub fn fetched(&self) -> bool {
        self.fetched
    }
}

/// A page's view of one remote value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resource<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for Resource<T> {
    /// Pages start out loading.
    fn default() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
        }
    }
}

impl<T> Resource<T> {
    pub fn begin(&mut self) {
        self.loading = true;
    }

    /// Store a fetch outcome. Failures keep the previous data and show the
    /// server's message or `fallback`.
    pub fn resolve(&mut self, result: Result<T, ApiError>, fallback: &str) {
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(err) => self.error = Some(err.user_message(fallback)),
        }
        self.loading = false;
    }

    pub fn ready(&self) -> Option<&T> {
        self.data.as_ref()
    }
}

/// Headline number shown on a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricCard {
    pub title: String,
    pub value: String,
    pub label: String,
}

impl MetricCard {
    pub fn new(title: &str, value: String, label: &str) -> Self {
        Self {
            title: title.to_string(),
            value,
            label: label.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_fires_once() {
        let mut guard = FetchGuard::default();
        assert!(guard.try_begin());
        assert!(!guard.try_begin());
        assert!(guard.fetched());
    }

    #[test]
    fn failure_keeps_previous_data() {
        let mut resource: Resource<u32> = Resource::default();
        assert!(resource.loading);
        resource.resolve(Ok(7), "Failed");
        resource.begin();
        resource.resolve(
            Err(ApiError::Network {
                message: "refused".to_string(),
            }),
            "Failed to load",
        );
        assert!(!resource.loading);
        assert_eq!(resource.ready(), Some(&7));
        assert_eq!(resource.error.as_deref(), Some("Failed to load"));
    }
}
