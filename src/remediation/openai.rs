//! OpenAI-compatible chat completions backend

use super::{CompletionProvider, FixPrompt};
use crate::config::LlmConfig;
use crate::error::{FixError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, warn};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Client for a chat completions endpoint
pub struct OpenAiClient {
    http_client: Client,
    api_url: String,
    api_key: Secret<String>,
    model: String,
}

impl OpenAiClient {
    /// Create a new chat completions client
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(FixError::Network)?;

        Ok(Self {
            http_client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(&self, prompt: &FixPrompt) -> std::result::Result<String, FixError> {
        if self.api_key.expose_secret().is_empty() {
            return Err(FixError::MissingCredential);
        }

        let user = prompt.user();
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage { role: "system", content: prompt.system() },
                ChatMessage { role: "user", content: &user },
            ],
        };

        debug!("Requesting chat completion from {}", self.api_url);
        let response = self
            .http_client
            .post(&self.api_url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        match status {
            StatusCode::OK => {
                let chat: ChatResponse = response.json().await?;
                chat.choices
                    .into_iter()
                    .next()
                    .and_then(|choice| choice.message.content)
                    .ok_or(FixError::EmptyCompletion)
            }
            StatusCode::UNAUTHORIZED => {
                error!("Chat completion authentication failed");
                Err(FixError::AuthenticationFailed)
            }
            StatusCode::TOO_MANY_REQUESTS => {
                warn!("Chat completion rate limit exceeded");
                Err(FixError::RateLimited)
            }
            _ => {
                let body = response.text().await.unwrap_or_default();
                Err(FixError::Api {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }

    fn backend(&self) -> &'static str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn is_configured(&self) -> bool {
        !self.api_key.expose_secret().is_empty()
    }
}
