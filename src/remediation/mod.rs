//! Remediation text generated by an LLM completion backend

pub mod issue;
pub mod models;
pub mod ollama;
pub mod openai;
pub mod parser;
pub mod prompt;

pub use issue::{SecurityIssue, SecurityIssueMetadata};
pub use models::{FixRequest, FixResponse};
pub use ollama::OllamaClient;
pub use openai::OpenAiClient;
pub use parser::RemediationDetails;
pub use prompt::FixPrompt;

use crate::config::{LlmConfig, LlmProvider};
use crate::error::{FixError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

/// Trait for completion backends
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Raw generated text for the prompt
    async fn complete(&self, prompt: &FixPrompt) -> std::result::Result<String, FixError>;

    /// Backend name, e.g. `openai`
    fn backend(&self) -> &'static str;

    /// Model identifier sent to the backend
    fn model(&self) -> &str;

    /// Whether the backend has what it needs to succeed (credential, etc.)
    fn is_configured(&self) -> bool;
}

/// Build the backend selected in configuration
pub fn build_provider(config: &LlmConfig) -> Result<Arc<dyn CompletionProvider>> {
    let provider: Arc<dyn CompletionProvider> = match config.provider {
        LlmProvider::OpenAi => Arc::new(OpenAiClient::new(config)?),
        LlmProvider::Ollama => Arc::new(OllamaClient::new(config)?),
    };
    Ok(provider)
}

/// Result of one fix generation.
///
/// Failures are a value, not an error: callers always get a fix text, which
/// is empty when generation failed.
#[derive(Debug)]
pub enum FixOutcome {
    Generated(String),
    Failed(FixError),
}

impl FixOutcome {
    pub fn is_generated(&self) -> bool {
        matches!(self, FixOutcome::Generated(_))
    }

    /// The fix text, or an empty string on failure
    pub fn into_text(self) -> String {
        match self {
            FixOutcome::Generated(text) => text,
            FixOutcome::Failed(_) => String::new(),
        }
    }
}

impl From<FixOutcome> for FixResponse {
    fn from(outcome: FixOutcome) -> Self {
        FixResponse {
            fix: outcome.into_text(),
        }
    }
}

/// Turns issue descriptions into remediation text
pub struct FixGenerator {
    provider: Arc<dyn CompletionProvider>,
}

impl FixGenerator {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &Arc<dyn CompletionProvider> {
        &self.provider
    }

    /// Ask the backend for a fix; the text is trimmed
    pub async fn generate(&self, context: &str) -> FixOutcome {
        let prompt = FixPrompt::new(context);
        match self.provider.complete(&prompt).await {
            Ok(text) => {
                debug!("Generated fix of {} bytes", text.len());
                FixOutcome::Generated(text.trim().to_string())
            }
            Err(e) => {
                warn!(backend = self.provider.backend(), "Fix generation failed: {}", e);
                FixOutcome::Failed(e)
            }
        }
    }
}
