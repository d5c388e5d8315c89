//! HTTP API handlers
//!
//! Text chat, realtime credential issuance and meditation artwork.
//! The meditation audio endpoint lives in [`crate::meditation`].

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, error, info};

use guru_core::llm::{ChatCompletionRequest, ChatMessage, ClientSecretRequest, ImageRequest};
use guru_core::persona::{
    GURU_SYSTEM_MESSAGE, REALTIME_INSTRUCTIONS, REALTIME_SPEED, REALTIME_VOICE, SILENT_REPLY,
};

use crate::error::{ApiError, Result};
use crate::server::AppState;

/// Sampling temperature for chat replies
pub const CHAT_TEMPERATURE: f32 = 0.7;

/// Output token ceiling for chat replies
pub const CHAT_MAX_TOKENS: u64 = 500;

// ============================================================================
// Request/Response types
// ============================================================================

/// Chat request payload
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// User message
    #[serde(default)]
    pub message: Option<String>,
}

/// Chat response payload
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Realtime credential handed to the browser
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EphemeralKeyResponse {
    pub ephemeral_key: String,
    pub session_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ImageRequestBody {
    #[serde(default)]
    pub theme: Option<String>,
}

/// Artwork prompt catalog
#[derive(Debug, Serialize, Deserialize)]
pub struct ImageThemesResponse {
    pub themes: Vec<String>,
    pub prompts: BTreeMap<String, String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedImageResponse {
    pub success: bool,
    pub theme: String,
    pub image_url: String,
    pub message: String,
}

/// Unwrap a JSON body, turning extractor rejections into 400s
pub(crate) fn parse_body<T: DeserializeOwned>(
    payload: std::result::Result<Json<T>, JsonRejection>,
) -> Result<T> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        debug!("Rejected request body: {}", rejection.body_text());
        ApiError::invalid(format!("Invalid request body: {}", rejection.body_text()))
    })
}

// ============================================================================
// Handler functions
// ============================================================================

/// Health check endpoint
pub async fn health() -> &'static str {
    "OK"
}

/// Chat endpoint - one prompt, one reply
pub async fn chat(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>> {
    let req = parse_body(payload)?;

    let message = req
        .message
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| ApiError::invalid("Message is required"))?;

    debug!("Chat request: {} chars", message.len());

    let request = ChatCompletionRequest {
        model: state.config.openai.chat_model.clone(),
        messages: vec![
            ChatMessage::system(GURU_SYSTEM_MESSAGE),
            ChatMessage::user(message),
        ],
        temperature: Some(CHAT_TEMPERATURE),
        max_tokens: Some(CHAT_MAX_TOKENS),
    };

    let completion = state.openai.chat_completion(request).await.map_err(|e| {
        error!("Error calling OpenAI: {}", e);
        ApiError::Internal("Failed to get response from guru".to_string())
    })?;

    let response = completion.first_text().unwrap_or(SILENT_REPLY).to_string();

    info!("Chat response: {} chars", response.len());

    Ok(Json(ChatResponse { response }))
}

/// Mint a short-lived realtime session credential
pub async fn ephemeral_key(State(state): State<AppState>) -> Result<Json<EphemeralKeyResponse>> {
    const FAILURE: &str = "Failed to create ephemeral key";

    let request = ClientSecretRequest::realtime(
        state.config.openai.realtime_model.clone(),
        REALTIME_INSTRUCTIONS,
        REALTIME_VOICE,
        REALTIME_SPEED,
    );

    let secret = state
        .openai
        .create_client_secret(request)
        .await
        .map_err(|e| ApiError::upstream(FAILURE, e))?;

    if secret.value.is_empty() {
        return Err(ApiError::upstream(FAILURE, "No client secret returned"));
    }

    let session_id = secret.session_id().unwrap_or("unknown").to_string();
    info!("Issued realtime credential for session {}", session_id);

    Ok(Json(EphemeralKeyResponse {
        ephemeral_key: secret.value,
        session_id,
    }))
}

/// List artwork prompts per practice
pub async fn image_themes(State(state): State<AppState>) -> Json<ImageThemesResponse> {
    let themes = state
        .catalog
        .iter()
        .map(|(practice, _)| practice.to_string())
        .collect();
    let prompts = state
        .catalog
        .iter()
        .map(|(practice, template)| (practice.to_string(), template.image_prompt.to_string()))
        .collect();

    Json(ImageThemesResponse { themes, prompts })
}

/// Generate the artwork for one practice
pub async fn generate_image(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ImageRequestBody>, JsonRejection>,
) -> Result<Json<GeneratedImageResponse>> {
    const FAILURE: &str = "Failed to generate image";

    let req = parse_body(payload)?;

    let (practice, template) = req
        .theme
        .as_deref()
        .and_then(|theme| state.catalog.lookup(theme))
        .ok_or_else(|| ApiError::invalid("Invalid or missing theme parameter"))?;

    info!("Generating image for {}...", practice);

    let request = ImageRequest::square(state.config.openai.image_model.clone(), template.image_prompt);
    let response = state
        .openai
        .generate_image(request)
        .await
        .map_err(|e| ApiError::upstream(FAILURE, e))?;

    let image_url = response
        .first_url()
        .ok_or_else(|| ApiError::upstream(FAILURE, "No image URL returned from API"))?;

    Ok(Json(GeneratedImageResponse {
        success: true,
        theme: practice.to_string(),
        image_url,
        message: format!("Generated image for {}", practice),
    }))
}
