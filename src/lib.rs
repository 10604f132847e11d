//! Embedding and AI remediation services for AWS security findings
//!
//! Two small HTTP services built on the same library:
//!
//! - the **embedding service** (`embedding-server`) runs the
//!   `all-MiniLM-L6-v2` sentence transformer in-process and serves
//!   `POST /embeddings`;
//! - the **fix service** (`fix-server`) serves `POST /embedding` with the same
//!   model and `POST /fix`, which asks an LLM for a remediation of a security
//!   issue. A failed generation yields an empty fix, never an error status.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sec_aws_services::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!
//!     let provider = build_provider(&config.llm)?;
//!     let generator = FixGenerator::new(provider);
//!
//!     // Empty when the backend is unreachable or the credential is missing
//!     let fix = generator.generate("[S3] logs - bucket is public (Severity: HIGH)").await;
//!     println!("{}", fix.into_text());
//!
//!     let embedder = Arc::new(SentenceEmbedder::load(config.embedding).await?);
//!     let vector = embedder.embed("bucket is public").await?;
//!     assert_eq!(vector.len(), 384);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod embedding;
pub mod error;
pub mod observability;
pub mod remediation;
pub mod server;
pub mod shutdown;

pub use config::Config;
pub use error::{Result, ServiceError};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::client::ServicesClient;
    pub use crate::config::Config;
    pub use crate::embedding::{EmbeddingProvider, SentenceEmbedder};
    pub use crate::error::{Result, ServiceError};
    pub use crate::observability::HealthChecker;
    pub use crate::remediation::{
        build_provider, CompletionProvider, FixGenerator, FixOutcome, RemediationDetails, SecurityIssue,
    };
}
