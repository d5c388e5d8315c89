//! Stub providers shared by the router tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use bytes::Bytes;
use futures::{StreamExt, stream};
use serde_json::Value;
use tower::ServiceExt;

use guru_api::{AppState, app};
use guru_core::llm::*;
use guru_core::{Config, PracticeCatalog};
use guru_voice::{AudioStream, SpeechRequest, SpeechStreamer, VoiceError};

/// OpenAI stand-in that records every request
#[derive(Default)]
pub struct StubOpenAi {
    /// Chat reply; `None` means the provider sends `content: null`
    pub chat_text: Option<String>,
    /// Script text; `None` means no output
    pub script: Option<String>,
    pub secret_value: String,
    pub session_id: Option<String>,
    pub image_url: Option<String>,
    /// Every call fails with a 503
    pub fail: bool,

    pub calls: AtomicUsize,
    pub chat_requests: Mutex<Vec<ChatCompletionRequest>>,
    pub script_requests: Mutex<Vec<ResponsesRequest>>,
    pub secret_requests: Mutex<Vec<ClientSecretRequest>>,
    pub image_requests: Mutex<Vec<ImageRequest>>,
}

impl StubOpenAi {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self) -> guru_core::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(guru_core::Error::Upstream {
                status: 503,
                body: r#"{"error":"overloaded"}"#.to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl OpenAiApi for StubOpenAi {
    async fn chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> guru_core::Result<ChatCompletionResponse> {
        self.chat_requests.lock().unwrap().push(request);
        self.record()?;
        Ok(serde_json::from_value(serde_json::json!({
            "id": "chatcmpl-stub",
            "model": "gpt-4o",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": self.chat_text},
                "finish_reason": "stop"
            }]
        }))?)
    }

    async fn create_response(&self, request: ResponsesRequest) -> guru_core::Result<ResponsesResponse> {
        self.script_requests.lock().unwrap().push(request);
        self.record()?;
        Ok(ResponsesResponse {
            id: "resp-stub".to_string(),
            output_text: self.script.clone(),
            ..ResponsesResponse::default()
        })
    }

    async fn create_client_secret(
        &self,
        request: ClientSecretRequest,
    ) -> guru_core::Result<ClientSecretResponse> {
        self.secret_requests.lock().unwrap().push(request);
        self.record()?;
        let n = self.calls();
        Ok(ClientSecretResponse {
            // Distinct value per call
            value: format!("{}-{}", self.secret_value, n),
            expires_at: Some(1_700_000_000),
            session: self.session_id.clone().map(|id| IssuedSession { id: Some(id) }),
        })
    }

    async fn generate_image(&self, request: ImageRequest) -> guru_core::Result<ImageResponse> {
        self.image_requests.lock().unwrap().push(request);
        self.record()?;
        Ok(ImageResponse {
            data: self
                .image_url
                .clone()
                .map(|url| {
                    vec![ImageData {
                        url: Some(url),
                        b64_json: None,
                    }]
                })
                .unwrap_or_default(),
        })
    }
}

/// Speech stand-in emitting fixed chunks
#[derive(Default)]
pub struct StubSpeech {
    pub chunks: Vec<&'static [u8]>,
    /// Emit an error after this many chunks
    pub fail_after: Option<usize>,
    /// Reject the request before streaming
    pub reject: bool,

    pub calls: AtomicUsize,
    pub voices: Mutex<Vec<String>>,
    pub texts: Mutex<Vec<String>>,
}

impl StubSpeech {
    pub fn with_chunks(chunks: Vec<&'static [u8]>) -> Self {
        Self {
            chunks,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechStreamer for StubSpeech {
    async fn stream_speech(
        &self,
        voice_id: &str,
        request: &SpeechRequest,
    ) -> guru_voice::Result<AudioStream> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.voices.lock().unwrap().push(voice_id.to_string());
        self.texts.lock().unwrap().push(request.text.clone());

        if self.reject {
            return Err(VoiceError::Upstream {
                status: 401,
                body: "invalid api key".to_string(),
            });
        }

        let mut items: Vec<guru_voice::Result<Bytes>> = self
            .chunks
            .iter()
            .map(|c| Ok(Bytes::from_static(c)))
            .collect();
        if let Some(n) = self.fail_after {
            items.truncate(n);
            items.push(Err(VoiceError::Stream("connection reset".to_string())));
        }

        Ok(stream::iter(items).boxed())
    }
}

pub fn test_app(openai: Arc<StubOpenAi>, speech: Arc<StubSpeech>) -> Router {
    let state = AppState::new(
        Config::default(),
        openai,
        speech,
        PracticeCatalog::standard(),
    );
    app(state)
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
