//! Shared helpers for the HTTP integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use sec_aws_services::{
    api::{build_embedding_router, build_fix_router, EmbeddingServiceState, FixServiceState},
    embedding::EmbeddingProvider,
    error::{EmbeddingError, FixError, Result},
    observability::HealthChecker,
    remediation::{CompletionProvider, FixGenerator, FixPrompt},
};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::net::SocketAddr;
use std::sync::Arc;

pub const DIMENSION: usize = 384;
const BODY_LIMIT: usize = 1024 * 1024;

/// Deterministic stand-in for the sentence transformer: a normalized vector
/// derived from the text hash.
pub struct HashEmbedder;

impl HashEmbedder {
    pub fn vector_for(text: &str) -> Vec<f32> {
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        let mut seed = hasher.finish();

        let mut embedding: Vec<f32> = (0..DIMENSION)
            .map(|i| {
                seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407) ^ i as u64;
                ((seed >> 11) as f64 / (1u64 << 53) as f64 * 2.0 - 1.0) as f32
            })
            .collect();

        let norm = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        for value in &mut embedding {
            *value /= norm;
        }
        embedding
    }
}

#[async_trait]
impl EmbeddingProvider for HashEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(Self::vector_for(text))
    }

    fn dimension(&self) -> usize {
        DIMENSION
    }

    fn model_name(&self) -> &str {
        "hash-embedder"
    }
}

/// Embedder whose inference always fails
pub struct FailingEmbedder;

#[async_trait]
impl EmbeddingProvider for FailingEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Err(EmbeddingError::Task("inference crashed".to_string()).into())
    }

    fn dimension(&self) -> usize {
        DIMENSION
    }

    fn model_name(&self) -> &str {
        "failing-embedder"
    }
}

/// Backend that answers with a padded echo of the issue
pub struct EchoProvider;

#[async_trait]
impl CompletionProvider for EchoProvider {
    async fn complete(&self, prompt: &FixPrompt) -> std::result::Result<String, FixError> {
        Ok(format!("\n  fix for: {}  \n", prompt.context()))
    }

    fn backend(&self) -> &'static str {
        "echo"
    }

    fn model(&self) -> &str {
        "echo"
    }

    fn is_configured(&self) -> bool {
        true
    }
}

pub fn embedding_app(embedder: Arc<dyn EmbeddingProvider>) -> Router {
    let health_checker = Arc::new(HealthChecker::new("embedding-service").with_embedder(embedder.as_ref()));
    build_embedding_router(
        EmbeddingServiceState {
            embedder,
            health_checker,
        },
        BODY_LIMIT,
    )
}

pub fn fix_app(embedder: Arc<dyn EmbeddingProvider>, provider: Arc<dyn CompletionProvider>) -> Router {
    let health_checker = Arc::new(
        HealthChecker::new("fix-service")
            .with_embedder(embedder.as_ref())
            .with_completion_provider(provider.as_ref()),
    );
    build_fix_router(
        FixServiceState {
            embedder,
            fix_generator: Arc::new(FixGenerator::new(provider)),
            health_checker,
        },
        BODY_LIMIT,
    )
}

/// Serve `app` on an ephemeral local port and return its base URL
pub async fn spawn_app(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}
