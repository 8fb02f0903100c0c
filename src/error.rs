//! Application error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Message shown alongside upstream errors, pointing at the usual culprits.
const UPSTREAM_HINT: &str = "Failed to fetch data from Meta. Check your access token and permissions.";

/// Structured error body returned by the Graph API, passed through verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, serde::Deserialize)]
pub struct UpstreamError {
    #[serde(default)]
    pub message: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
}

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Credentials not configured: {0}")]
    Configuration(String),

    #[error("Missing parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Meta API error: {}", .0.message)]
    UpstreamApi(UpstreamError),

    #[error("HTTP request error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed response body: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("No ads found: {0}")]
    NoData(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status the error is surfaced with
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Configuration(_)
            | Self::MissingParameter(_)
            | Self::InvalidParameter(_)
            | Self::UpstreamApi(_) => StatusCode::BAD_REQUEST,
            Self::NoData(_) => StatusCode::NOT_FOUND,
            Self::Transport(_) | Self::MalformedResponse(_) | Self::Io(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "CONFIG_ERROR",
            Self::MissingParameter(_) => "MISSING_PARAMETER",
            Self::InvalidParameter(_) => "INVALID_PARAMETER",
            Self::UpstreamApi(_) => "UPSTREAM_API_ERROR",
            Self::Transport(_) => "TRANSPORT_ERROR",
            Self::MalformedResponse(_) => "MALFORMED_RESPONSE",
            Self::NoData(_) => "NO_DATA",
            Self::Io(_) => "IO_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether this is a server-side failure rather than a caller/config problem
    pub fn is_internal(&self) -> bool {
        self.status_code().is_server_error()
    }
}

/// Serializable error response for the dashboard
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        match err {
            AppError::Configuration(msg) => ErrorResponse {
                error: "Credentials not configured".to_string(),
                message: msg.clone(),
                error_type: None,
                code: None,
            },
            AppError::MissingParameter(msg) => ErrorResponse {
                error: "Missing parameters".to_string(),
                message: msg.clone(),
                error_type: None,
                code: None,
            },
            AppError::InvalidParameter(msg) => ErrorResponse {
                error: "Invalid parameters".to_string(),
                message: msg.clone(),
                error_type: None,
                code: None,
            },
            AppError::UpstreamApi(upstream) => ErrorResponse {
                error: upstream.message.clone(),
                message: UPSTREAM_HINT.to_string(),
                error_type: upstream.error_type.clone(),
                code: upstream.code,
            },
            AppError::NoData(msg) => ErrorResponse {
                error: "No ads found".to_string(),
                message: msg.clone(),
                error_type: None,
                code: None,
            },
            AppError::Transport(_)
            | AppError::MalformedResponse(_)
            | AppError::Io(_)
            | AppError::Internal(_) => ErrorResponse {
                error: "Internal server error".to_string(),
                message: err.to_string(),
                error_type: None,
                code: None,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse::from(&self);

        if self.is_internal() {
            tracing::error!(
                error_code = self.code(),
                error_message = %self,
                status = %status,
                "Request failed"
            );
        } else {
            tracing::warn!(
                error_code = self.code(),
                error_message = %self,
                status = %status,
                "Request rejected"
            );
        }

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
