//! OpenAI-compatible chat-completions client.
//!
//! Works against any endpoint that speaks the `/chat/completions` wire
//! format; the default base URL targets NVIDIA's hosted inference service.

pub mod types;
pub mod util;

pub use types::{ChatChoice, ChatMessage, ChatRequest, ChatResponse, Role};

use anyhow::{anyhow, Result};
use tracing::debug;

const NVIDIA_API_URL: &str = "https://integrate.api.nvidia.com/v1";

#[derive(Clone)]
pub struct LlmClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl LlmClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: NVIDIA_API_URL.to_string(),
            model: model.into(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Send a chat request and return the first choice's content.
    pub async fn chat(&self, request: &ChatRequest) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);

        debug!(model = %request.model, "LLM chat request");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow!("LLM API error ({}): {}", status, error_text));
        }

        let chat_response: ChatResponse = response.json().await?;

        chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| anyhow!("No completion content in LLM response"))
    }

    /// Convenience wrapper: one system instruction, one user turn, bounded
    /// low-temperature generation for structured output.
    pub async fn complete(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
            temperature: Some(temperature),
            max_tokens: Some(max_tokens),
        };
        self.chat(&request).await
    }
}
