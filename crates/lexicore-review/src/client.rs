//! OpenRouter completion client.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "mistralai/mistral-7b-instruct";

/// Upstream calls are bounded so a hung provider cannot wedge a request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },
}

/// Seam between the orchestrator and the completion API. The server runs
/// the real OpenRouter client; tests swap in a mock.
pub trait CompletionBackend: Send + Sync {
    /// Turn a single instruction into an answer.
    fn complete(
        &self,
        instruction: &str,
    ) -> impl Future<Output = Result<String, CompletionError>> + Send;
}

#[derive(Serialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<Message>,
}

#[derive(Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

/// Non-streaming client for OpenRouter's chat-completions endpoint.
pub struct OpenRouterClient {
    client: Client,
    api_key: String,
    model: String,
}

impl OpenRouterClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Build a client from `OPENROUTER_API_KEY` / `OPENROUTER_MODEL`.
    pub fn from_env() -> Self {
        let api_key = std::env::var("OPENROUTER_API_KEY").unwrap_or_default();
        if api_key.is_empty() {
            warn!("OPENROUTER_API_KEY is not set; completion calls will fail");
        }
        let model =
            std::env::var("OPENROUTER_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Self::new(api_key, model)
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl CompletionBackend for OpenRouterClient {
    async fn complete(&self, instruction: &str) -> Result<String, CompletionError> {
        let body = CompletionRequest {
            model: self.model.clone(),
            messages: vec![Message {
                role: "user".into(),
                content: instruction.to_string(),
            }],
        };

        debug!("Requesting completion from {} ({})", OPENROUTER_API_URL, self.model);

        let resp = self
            .client
            .post(OPENROUTER_API_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(CompletionError::Api { status, message });
        }

        let data: CompletionResponse = resp.json().await?;
        let answer = data
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .unwrap_or_default();

        Ok(answer)
    }
}
