//! HTTP client for the embedding and fix services

use crate::embedding::{EmbeddingRequest, EmbeddingResponse, EmbeddingsRequest, EmbeddingsResponse};
use crate::error::{ClientError, Result};
use crate::remediation::{FixRequest, FixResponse, RemediationDetails, SecurityIssue, SecurityIssueMetadata};
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use tracing::debug;

/// Client used by the scanner side to call the services
#[derive(Debug, Clone)]
pub struct ServicesClient {
    http_client: Client,
    base_url: String,
}

impl ServicesClient {
    /// Create a client for a service at `base_url` (e.g. `http://localhost:8000`)
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ClientError::Network)?;

        Ok(Self::with_http_client(base_url, http_client))
    }

    /// Create client with custom HTTP client
    pub fn with_http_client(base_url: impl Into<String>, http_client: Client) -> Self {
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> std::result::Result<R, ClientError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let response = self.http_client.post(&url).json(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }

    /// `POST /embedding` on the fix service
    pub async fn generate_embedding(&self, text: &str) -> Result<Vec<f32>> {
        let response: EmbeddingResponse = self
            .post("/embedding", &EmbeddingRequest { inp: text.to_string() })
            .await?;
        non_empty(response.embedding)
    }

    /// `POST /embeddings` on the embedding service
    pub async fn embed_text(&self, text: &str) -> Result<Vec<f32>> {
        let response: EmbeddingsResponse = self
            .post("/embeddings", &EmbeddingsRequest { text: text.to_string() })
            .await?;
        non_empty(response.embeddings)
    }

    /// `POST /fix`; an empty string means the service could not generate one
    pub async fn generate_fix(&self, context: &str) -> Result<String> {
        let response: FixResponse = self
            .post("/fix", &FixRequest { context: context.to_string() })
            .await?;
        Ok(response.fix)
    }

    /// Request a fix for a finding and split it into code and steps.
    ///
    /// `prior_fix` is a previously known fix for a similar issue, if any.
    pub async fn remediate(
        &self,
        issue: &SecurityIssue,
        prior_fix: Option<&str>,
    ) -> Result<(String, RemediationDetails)> {
        let metadata = match prior_fix {
            Some(fix) => SecurityIssueMetadata::new(issue, fix),
            None => SecurityIssueMetadata::without_prior_fix(issue),
        };

        let fix = self.generate_fix(&metadata.describe()).await?;
        let details = RemediationDetails::parse(&fix);
        Ok((fix, details))
    }
}

fn non_empty(embedding: Vec<f32>) -> Result<Vec<f32>> {
    if embedding.is_empty() {
        return Err(ClientError::EmptyEmbedding.into());
    }
    Ok(embedding)
}
