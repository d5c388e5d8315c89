//! Streaming text-to-speech via the ElevenLabs API

use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use futures::stream::BoxStream;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use guru_core::ElevenLabsConfig;

use crate::error::{Result, VoiceError};

/// Incrementally produced encoded audio
pub type AudioStream = BoxStream<'static, Result<Bytes>>;

/// Output codec requested from the provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// MP3, 44.1 kHz, 128 kbps
    #[default]
    #[serde(rename = "mp3_44100_128")]
    Mp3_44100_128,
}

impl OutputFormat {
    pub fn content_type(&self) -> &'static str {
        "audio/mpeg"
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mp3_44100_128 => write!(f, "mp3_44100_128"),
        }
    }
}

/// Voice shaping parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceSettings {
    /// eleven_v3 accepts only 0.0, 0.5 or 1.0
    pub stability: f32,
    pub similarity_boost: f32,
    pub style: f32,
    pub use_speaker_boost: bool,
    pub speed: f32,
}

impl VoiceSettings {
    /// Slow, natural narration for guided meditations
    pub fn meditative() -> Self {
        Self {
            stability: 0.5,
            similarity_boost: 0.8,
            style: 0.0,
            use_speaker_boost: true,
            speed: 0.85,
        }
    }
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self::meditative()
    }
}

/// Body of a text-to-speech request
#[derive(Debug, Clone, Serialize)]
pub struct SpeechRequest {
    pub text: String,
    pub model_id: String,
    pub voice_settings: VoiceSettings,
    #[serde(skip)]
    pub output_format: OutputFormat,
}

impl SpeechRequest {
    pub fn new(text: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model_id: model_id.into(),
            voice_settings: VoiceSettings::default(),
            output_format: OutputFormat::default(),
        }
    }
}

/// Something that turns text into a stream of encoded audio
#[async_trait]
pub trait SpeechStreamer: Send + Sync {
    /// Start synthesis. Fails before any audio when the provider rejects the request.
    async fn stream_speech(&self, voice_id: &str, request: &SpeechRequest) -> Result<AudioStream>;
}

/// ElevenLabs client for streaming speech synthesis
#[derive(Clone)]
pub struct ElevenLabsClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl ElevenLabsClient {
    /// Create a new client
    pub fn new(config: &ElevenLabsConfig) -> Result<Self> {
        // No overall timeout: a long meditation streams for minutes
        let client = Client::builder()
            .connect_timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| VoiceError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn stream_url(&self, voice_id: &str) -> String {
        format!("{}/text-to-speech/{}/stream", self.base_url, voice_id)
    }
}

#[async_trait]
impl SpeechStreamer for ElevenLabsClient {
    async fn stream_speech(&self, voice_id: &str, request: &SpeechRequest) -> Result<AudioStream> {
        let url = self.stream_url(voice_id);

        info!(
            "Streaming speech: {} chars using ElevenLabs voice {}",
            request.text.len(),
            voice_id
        );
        debug!(
            "Model: {}, format: {}",
            request.model_id, request.output_format
        );

        let response = self
            .client
            .post(&url)
            .query(&[("output_format", request.output_format.to_string())])
            .header("xi-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!("ElevenLabs API error: {} - {}", status, body);
            return Err(VoiceError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let stream = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| VoiceError::Stream(e.to_string())));

        Ok(stream.boxed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> ElevenLabsClient {
        let config = ElevenLabsConfig {
            api_key: "xi-test".to_string(),
            base_url: server.uri(),
            ..ElevenLabsConfig::default()
        };
        ElevenLabsClient::new(&config).unwrap()
    }

    #[test]
    fn test_meditative_voice_settings() {
        let settings = VoiceSettings::meditative();
        assert_eq!(settings.stability, 0.5);
        assert_eq!(settings.similarity_boost, 0.8);
        assert_eq!(settings.style, 0.0);
        assert!(settings.use_speaker_boost);
        assert_eq!(settings.speed, 0.85);
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Mp3_44100_128.to_string(), "mp3_44100_128");
        assert_eq!(OutputFormat::default().content_type(), "audio/mpeg");
    }

    #[test]
    fn test_speech_request_body_omits_format() {
        let request = SpeechRequest::new("Breathe.", "eleven_v3");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["text"], "Breathe.");
        assert_eq!(json["model_id"], "eleven_v3");
        assert_eq!(json["voice_settings"]["use_speaker_boost"], true);
        assert!(json.get("output_format").is_none());
    }

    #[test]
    fn test_stream_url() {
        let config = ElevenLabsConfig {
            api_key: "k".to_string(),
            base_url: "https://api.elevenlabs.io/v1/".to_string(),
            ..ElevenLabsConfig::default()
        };
        let client = ElevenLabsClient::new(&config).unwrap();
        assert_eq!(
            client.stream_url("voice-123"),
            "https://api.elevenlabs.io/v1/text-to-speech/voice-123/stream"
        );
    }

    #[tokio::test]
    async fn test_stream_speech_yields_audio() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/text-to-speech/voice-123/stream"))
            .and(query_param("output_format", "mp3_44100_128"))
            .and(header("xi-api-key", "xi-test"))
            .and(body_partial_json(serde_json::json!({
                "text": "Om shanti",
                "model_id": "eleven_v3"
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "audio/mpeg")
                    .set_body_bytes(b"ID3fake-mp3-bytes".to_vec()),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let mut stream = client
            .stream_speech("voice-123", &SpeechRequest::new("Om shanti", "eleven_v3"))
            .await
            .unwrap();

        let mut audio = Vec::new();
        while let Some(chunk) = stream.next().await {
            audio.extend_from_slice(&chunk.unwrap());
        }
        assert_eq!(audio, b"ID3fake-mp3-bytes");
    }

    #[tokio::test]
    async fn test_stream_speech_rejects_before_streaming() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/text-to-speech/voice-123/stream"))
            .respond_with(ResponseTemplate::new(422).set_body_string(r#"{"detail":"invalid voice"}"#))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let result = client
            .stream_speech("voice-123", &SpeechRequest::new("text", "eleven_v3"))
            .await;

        match result {
            Err(VoiceError::Upstream { status, body }) => {
                assert_eq!(status, 422);
                assert!(body.contains("invalid voice"));
            }
            Err(other) => panic!("unexpected error: {other:?}"),
            Ok(_) => panic!("expected upstream error"),
        }
    }
}
