//! guru-api: HTTP API for pocket-guru
//!
//! Provides the chat, realtime credential, meditation and artwork
//! endpoints. Built with axum for async HTTP handling.

pub mod error;
pub mod handlers;
pub mod meditation;
pub mod routes;
pub mod server;

pub use error::{ApiError, Result};
pub use server::{AppState, app, start_server};
