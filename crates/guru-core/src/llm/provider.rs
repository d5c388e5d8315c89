//! Provider trait for the OpenAI endpoints the service calls
//!
//! Handlers depend on this trait instead of the concrete client so the
//! upstream can be replaced in tests.

use async_trait::async_trait;

use crate::Result;

use super::types::*;

#[async_trait]
pub trait OpenAiApi: Send + Sync {
    /// `POST /chat/completions`
    async fn chat_completion(&self, request: ChatCompletionRequest) -> Result<ChatCompletionResponse>;

    /// `POST /responses`
    async fn create_response(&self, request: ResponsesRequest) -> Result<ResponsesResponse>;

    /// `POST /realtime/client_secrets`
    async fn create_client_secret(&self, request: ClientSecretRequest) -> Result<ClientSecretResponse>;

    /// `POST /images/generations`
    async fn generate_image(&self, request: ImageRequest) -> Result<ImageResponse>;
}
