//! Error types for the embedding and remediation services

use thiserror::Error;

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Main error type for the services
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("Fix generation error: {0}")]
    Fix(#[from] FixError),

    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors related to loading the sentence-embedding model and encoding text
#[derive(Error, Debug)]
pub enum EmbeddingError {
    #[error("Model file not found: {0}")]
    ModelNotFound(String),

    #[error("Failed to load model: {0}")]
    ModelLoad(String),

    #[error("Model download failed: {0}")]
    Download(String),

    #[error("Tokenizer error: {0}")]
    Tokenizer(String),

    #[error("ONNX runtime error: {0}")]
    Runtime(#[from] ort::Error),

    #[error("Tensor shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("Invalid embedding dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    #[error("Unexpected model output shape: {0:?}")]
    UnexpectedOutput(Vec<usize>),

    #[error("Inference task failed: {0}")]
    Task(String),
}

/// Errors raised while asking the LLM backend for a fix.
///
/// These never reach HTTP callers; the fix endpoint collapses them into an
/// empty fix.
#[derive(Error, Debug)]
pub enum FixError {
    #[error("No API credential configured")]
    MissingCredential,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("API returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Completion contained no message")]
    EmptyCompletion,
}

/// Errors returned by [`crate::client::ServicesClient`]
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Service returned an empty embedding")]
    EmptyEmbedding,
}

impl From<config::ConfigError> for ServiceError {
    fn from(err: config::ConfigError) -> Self {
        ServiceError::Config(err.to_string())
    }
}
