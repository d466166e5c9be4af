// Reporting client error types
use reqwest::StatusCode;
use thiserror::Error;

/// Failure to obtain a bearer credential from the identity endpoint
#[derive(Debug, Error)]
pub enum AuthenticationError {
    #[error("Identity endpoint unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    #[error("Identity endpoint rejected credentials with status {status}: {body}")]
    Rejected { status: StatusCode, body: String },

    #[error("Invalid credential payload: {0}")]
    InvalidResponse(String),
}

/// Failure of a report or query call
#[derive(Debug, Error)]
pub enum ReportClientError {
    #[error("Authentication failed: {0}")]
    Authentication(#[from] AuthenticationError),

    #[error("Report endpoint unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Report endpoint returned status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Malformed report payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid report endpoint: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ReportClientError {
    /// Status code returned by the reporting service, when the call got that far
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ReportClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T, E = ReportClientError> = std::result::Result<T, E>;
