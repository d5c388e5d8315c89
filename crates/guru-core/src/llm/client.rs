//! OpenAI HTTP client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, info, warn};

use crate::config::OpenAiConfig;
use crate::error::{Error, Result};

use super::provider::OpenAiApi;
use super::types::*;

/// OpenAI API client
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    /// Create a new client from configuration
    pub fn new(config: &OpenAiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .map_err(Error::Http)?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// POST a JSON body and decode the JSON reply.
    ///
    /// Non-success statuses become [`Error::Upstream`] carrying the raw body.
    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);

        debug!("Sending request to OpenAI API: {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(Error::Http)?;

        let status = response.status();
        let text = response.text().await.map_err(Error::Http)?;

        if !status.is_success() {
            warn!("OpenAI API error: {} - {}", status, text);
            return Err(Error::Upstream {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(Error::Json)
    }
}

#[async_trait]
impl OpenAiApi for OpenAiClient {
    async fn chat_completion(&self, request: ChatCompletionRequest) -> Result<ChatCompletionResponse> {
        let response: ChatCompletionResponse = self.post_json("/chat/completions", &request).await?;

        info!(
            "Chat completion: model={}, choices={}, tokens={}",
            response.model,
            response.choices.len(),
            response.usage.as_ref().map(|u| u.completion_tokens).unwrap_or(0)
        );

        Ok(response)
    }

    async fn create_response(&self, request: ResponsesRequest) -> Result<ResponsesResponse> {
        let response: ResponsesResponse = self.post_json("/responses", &request).await?;

        info!(
            "Response created: id={}, model={}, status={:?}, output_items={}",
            response.id,
            response.model,
            response.status,
            response.output.len()
        );

        Ok(response)
    }

    async fn create_client_secret(&self, request: ClientSecretRequest) -> Result<ClientSecretResponse> {
        let response: ClientSecretResponse =
            self.post_json("/realtime/client_secrets", &request).await?;

        info!(
            "Realtime client secret issued: session={}",
            response.session_id().unwrap_or("unknown")
        );

        Ok(response)
    }

    async fn generate_image(&self, request: ImageRequest) -> Result<ImageResponse> {
        let response: ImageResponse = self.post_json("/images/generations", &request).await?;

        info!("Image generation returned {} image(s)", response.data.len());

        Ok(response)
    }
}
