//! Error types for guru-voice

use thiserror::Error;

/// guru-voice error type
#[derive(Error, Debug)]
pub enum VoiceError {
    /// The speech provider rejected the request
    #[error("Speech API returned {status}: {body}")]
    Upstream { status: u16, body: String },

    /// The audio stream broke after it started
    #[error("Audio stream error: {0}")]
    Stream(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, VoiceError>;
