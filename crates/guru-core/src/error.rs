//! Error types for guru-core

use thiserror::Error;

/// Main error type for guru-core
#[derive(Error, Debug)]
pub enum Error {
    /// The provider answered with a non-success status
    #[error("Upstream returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for guru-core
pub type Result<T> = std::result::Result<T, Error>;
