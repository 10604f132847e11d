//! Ollama `/api/generate` backend

use super::{CompletionProvider, FixPrompt};
use crate::config::LlmConfig;
use crate::error::{FixError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Client for a local Ollama server. Ollama has no roles on this endpoint, so
/// the system framing is folded into the prompt.
pub struct OllamaClient {
    http_client: Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(FixError::Network)?;

        Ok(Self {
            http_client,
            base_url: config.ollama_url.trim_end_matches('/').to_string(),
            model: config.ollama_model.clone(),
        })
    }
}

#[async_trait]
impl CompletionProvider for OllamaClient {
    async fn complete(&self, prompt: &FixPrompt) -> std::result::Result<String, FixError> {
        let text = prompt.combined();
        let request = GenerateRequest {
            model: &self.model,
            prompt: &text,
            stream: false,
        };

        let url = format!("{}/api/generate", self.base_url);
        debug!("Requesting generation from {}", url);
        let response = self.http_client.post(&url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FixError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let generated: GenerateResponse = response.json().await?;
        Ok(generated.response)
    }

    fn backend(&self) -> &'static str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn is_configured(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LlmProvider;
    use mockito::Matcher;
    use serde_json::json;

    fn config_for(server: &mockito::ServerGuard) -> LlmConfig {
        LlmConfig {
            provider: LlmProvider::Ollama,
            ollama_url: format!("{}/", server.url()),
            ollama_model: "granite3.1-moe".to_string(),
            timeout_secs: 5,
            ..LlmConfig::default()
        }
    }

    #[tokio::test]
    async fn test_generate_non_streaming() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/generate")
            .match_body(Matcher::AllOf(vec![
                Matcher::PartialJson(json!({"model": "granite3.1-moe", "stream": false})),
                Matcher::Regex("AWS security expert".to_string()),
                Matcher::Regex("unencrypted volume".to_string()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"model": "granite3.1-moe", "response": "Enable EBS encryption.", "done": true}).to_string())
            .create_async()
            .await;

        let client = OllamaClient::new(&config_for(&server)).unwrap();
        let text = client.complete(&FixPrompt::new("unencrypted volume")).await.unwrap();

        assert_eq!(text, "Enable EBS encryption.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/generate")
            .with_status(404)
            .with_body("model not found")
            .create_async()
            .await;

        let client = OllamaClient::new(&config_for(&server)).unwrap();
        let err = client.complete(&FixPrompt::new("x")).await.unwrap_err();
        match err {
            FixError::Api { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, "model not found");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
