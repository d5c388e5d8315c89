//! Route definitions
//!
//! Defines all HTTP API endpoints.

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers::{chat, ephemeral_key, generate_image, health, image_themes};
use crate::meditation::meditation;
use crate::server::AppState;

/// Create the API router
pub fn routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(health))
        // Text chat
        .route("/api/chat", post(chat))
        // Realtime voice credential
        .route("/api/ephemeral-key", post(ephemeral_key))
        // Streamed guided meditation
        .route("/api/meditation", post(meditation))
        // Meditation artwork
        .route("/api/generate-images", get(image_themes).post(generate_image))
}
