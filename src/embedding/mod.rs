//! Sentence embeddings produced in-process by an ONNX model

pub mod models;
pub mod onnx;

pub use models::{EmbeddingRequest, EmbeddingResponse, EmbeddingsRequest, EmbeddingsResponse};
pub use onnx::SentenceEmbedder;

use async_trait::async_trait;
use crate::error::Result;

/// Trait for embedding providers
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate the embedding for a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Get the dimension of embeddings
    fn dimension(&self) -> usize;

    /// Name of the underlying model
    fn model_name(&self) -> &str;
}
