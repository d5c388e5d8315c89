//! Guided meditation synthesis
//!
//! Per request: validate, generate a script, start speech synthesis, relay
//! the audio as it arrives. Each step runs once; any failure ends the
//! request.

use std::fmt;

use axum::{
    Json,
    body::Body,
    extract::{State, rejection::JsonRejection},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::{debug, info, warn};

use guru_core::llm::{OpenAiApi, Reasoning, ResponsesRequest};
use guru_core::persona::MEDITATION_INSTRUCTIONS;
use guru_core::{PracticeCatalog, PracticeTemplate, PracticeType, script_token_budget};
use guru_voice::{DEFAULT_RELAY_CAPACITY, SpeechRequest, relay};

use crate::error::{ApiError, Result};
use crate::handlers::parse_body;
use crate::server::AppState;

const FAILURE: &str = "Failed to create meditation";

/// Meditation request payload
#[derive(Debug, Default, Deserialize)]
pub struct MeditationRequest {
    /// Practice key, e.g. `anxiety-relief`
    #[serde(rename = "type", default)]
    pub practice: Option<String>,
    #[serde(default)]
    pub minutes: Option<u32>,
}

/// Request lifecycle; `Failed` is reachable from every other stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeditationStage {
    Validating,
    GeneratingScript,
    SynthesizingAudio,
    Relaying,
    Complete,
    Failed,
}

impl fmt::Display for MeditationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Validating => "validating",
            Self::GeneratingScript => "generating_script",
            Self::SynthesizingAudio => "synthesizing_audio",
            Self::Relaying => "relaying",
            Self::Complete => "complete",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

fn enter(stage: MeditationStage, practice: &str) {
    info!(%stage, practice, "Meditation stage");
}

/// A request that passed validation
#[derive(Debug)]
pub struct ValidatedMeditation<'a> {
    pub practice: PracticeType,
    pub minutes: u32,
    pub template: &'a PracticeTemplate,
}

/// Check fields and resolve the practice template.
///
/// Unknown practice keys are always rejected.
pub fn validate<'a>(
    catalog: &'a PracticeCatalog,
    req: &MeditationRequest,
) -> Result<ValidatedMeditation<'a>> {
    let (Some(key), Some(minutes)) = (
        req.practice.as_deref().filter(|k| !k.is_empty()),
        req.minutes.filter(|m| *m > 0),
    ) else {
        return Err(ApiError::invalid("Missing type or minutes parameter"));
    };

    let (practice, template) = catalog
        .lookup(key)
        .ok_or_else(|| ApiError::invalid("Invalid meditation type"))?;

    Ok(ValidatedMeditation {
        practice,
        minutes,
        template,
    })
}

/// Script generation request for a validated meditation
pub fn script_request(model: &str, meditation: &ValidatedMeditation<'_>) -> ResponsesRequest {
    ResponsesRequest {
        model: model.to_string(),
        reasoning: Some(Reasoning::low()),
        instructions: Some(MEDITATION_INSTRUCTIONS.to_string()),
        input: meditation.template.render_prompt(meditation.minutes),
        max_output_tokens: Some(script_token_budget(meditation.minutes)),
    }
}

/// Run script generation, treating an empty result as an upstream failure
pub async fn generate_script(openai: &dyn OpenAiApi, request: ResponsesRequest) -> Result<String> {
    let response = openai
        .create_response(request)
        .await
        .map_err(|e| ApiError::upstream(FAILURE, e))?;

    debug!(
        "Script response: id={}, status={:?}, output_items={}",
        response.id,
        response.status,
        response.output.len()
    );

    response.text().ok_or_else(|| {
        warn!("No script text in response {}", response.id);
        ApiError::upstream(
            FAILURE,
            "Failed to generate meditation script - no content returned",
        )
    })
}

/// Meditation endpoint - streams MP3 narration
pub async fn meditation(
    State(state): State<AppState>,
    payload: std::result::Result<Json<MeditationRequest>, JsonRejection>,
) -> Result<Response> {
    let req = parse_body(payload)?;
    let requested = req.practice.as_deref().unwrap_or_default();
    enter(MeditationStage::Validating, requested);

    let meditation = validate(&state.catalog, &req).inspect_err(|e| {
        debug!(
            stage = %MeditationStage::Failed,
            practice = requested,
            "Meditation rejected: {}",
            e
        );
    })?;
    let practice = meditation.practice.as_str();

    let result = synthesize(&state, &meditation).await;
    if result.is_err() {
        enter(MeditationStage::Failed, practice);
    }
    result
}

async fn synthesize(state: &AppState, meditation: &ValidatedMeditation<'_>) -> Result<Response> {
    let practice = meditation.practice.as_str();

    enter(MeditationStage::GeneratingScript, practice);
    let request = script_request(&state.config.openai.script_model, meditation);
    let script = generate_script(state.openai.as_ref(), request).await?;
    info!(
        "Generated {}-minute {} script: {} chars",
        meditation.minutes,
        practice,
        script.len()
    );

    enter(MeditationStage::SynthesizingAudio, practice);
    let speech = SpeechRequest::new(script, state.config.elevenlabs.model_id.clone());
    let content_type = speech.output_format.content_type();
    let audio = state
        .speech
        .stream_speech(meditation.template.voice_id, &speech)
        .await
        .map_err(|e| ApiError::upstream(FAILURE, e))?;

    enter(MeditationStage::Relaying, practice);
    let (body, outcome) = relay(audio, DEFAULT_RELAY_CAPACITY);

    let practice = meditation.practice;
    tokio::spawn(async move {
        match outcome.await {
            Ok(outcome) => {
                let stage = if outcome.is_completed() {
                    MeditationStage::Complete
                } else {
                    MeditationStage::Failed
                };
                info!(
                    %stage,
                    practice = practice.as_str(),
                    chunks = outcome.chunks(),
                    "Meditation stage"
                );
            }
            Err(e) => {
                warn!("Audio relay task ended abnormally: {}", e);
                enter(MeditationStage::Failed, practice.as_str());
            }
        }
    });

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        Body::from_stream(body),
    )
        .into_response())
}
