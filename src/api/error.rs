//! Failure taxonomy for API calls.

use super::types::{ApiErrorBody, FieldError, ValidationErrorBody};

/// Fallback shown when the server did not say anything useful.
pub const GENERIC_MESSAGE: &str = "Something went wrong. Please try again.";

/// Why an API call failed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The request never got a response (DNS, refused, timeout, TLS).
    #[error("network error: {message}")]
    Network { message: String },
    /// Non-2xx response. `message` is set when the body was `{error, message}`.
    #[error("server error {status}{}", server_detail(.error, .message))]
    Server {
        status: u16,
        error: Option<String>,
        message: Option<String>,
    },
    /// Non-2xx response carrying field-level details.
    #[error("validation error {status}: {error} ({} field(s))", .details.len())]
    Validation {
        status: u16,
        error: String,
        details: Vec<FieldError>,
    },
    /// A response arrived but was not what the client expected.
    #[error("unexpected response: {message}")]
    Parse { message: String },
    /// The call was refused before any request was made.
    #[error("invalid request: {message}")]
    InvalidInput { message: String },
}

impl ApiError {
    /// Classify a non-2xx response from its status and raw body.
    pub fn from_response(status: u16, body: &str) -> Self {
        if let Ok(validation) = serde_json::from_str::<ValidationErrorBody>(body) {
            return Self::Validation {
                status,
                error: validation.error,
                details: validation.details,
            };
        }

        match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(parsed) => Self::Server {
                status,
                error: parsed.error,
                message: parsed.message,
            },
            Err(_) => Self::Server {
                status,
                error: None,
                message: None,
            },
        }
    }

    /// Short machine-friendly kind, used in the diagnostics log.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Network { .. } => "network",
            Self::Server { .. } => "server",
            Self::Validation { .. } => "validation",
            Self::Parse { .. } => "parse",
            Self::InvalidInput { .. } => "invalid-input",
        }
    }

    /// HTTP status, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } | Self::Validation { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The message the server supplied for end users, if any.
    ///
    /// Validation failures render their field details.
    pub fn server_message(&self) -> Option<String> {
        match self {
            Self::Server {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => Some(message.clone()),
            Self::Validation { details, .. } if !details.is_empty() => Some(
                details
                    .iter()
                    .map(|d| format!("{}: {}", d.field, d.message))
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
            Self::Validation { error, .. } if !error.trim().is_empty() => Some(error.clone()),
            _ => None,
        }
    }

    /// What to show a user: the server's message or the given fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message()
            .unwrap_or_else(|| fallback.to_string())
    }
}

fn server_detail(error: &Option<String>, message: &Option<String>) -> String {
    let mut detail = String::new();
    if let Some(error) = error {
        detail.push_str(&format!(": {error}"));
    }
    if let Some(message) = message {
        detail.push_str(&format!(" ({message})"));
    }
    detail
}
