//! OpenAI API client and types
//!
//! Covers chat completions, the Responses API, realtime client secrets
//! and image generation.

mod client;
mod provider;
mod types;

pub use client::OpenAiClient;
pub use provider::OpenAiApi;
pub use types::*;
