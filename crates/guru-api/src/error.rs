//! Error types for guru-api

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

/// guru-api error type
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or malformed request fields, rejected before any upstream call
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A provider failed or returned nothing usable
    #[error("{error}: {details}")]
    Upstream { error: String, details: String },

    /// Failure with no details exposed to the client
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    pub fn upstream(error: impl Into<String>, details: impl std::fmt::Display) -> Self {
        Self::Upstream {
            error: error.into(),
            details: details.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Upstream { .. } | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::InvalidRequest(error) => {
                debug!("Rejected request: {}", error);
                ErrorResponse {
                    error,
                    details: None,
                }
            }
            Self::Upstream { error, details } => {
                error!("{}: {}", error, details);
                ErrorResponse {
                    error,
                    details: Some(details),
                }
            }
            Self::Internal(error) => {
                error!("{}", error);
                ErrorResponse {
                    error,
                    details: None,
                }
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ApiError>;
