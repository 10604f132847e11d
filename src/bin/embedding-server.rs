//! Embedding Service Binary
//!
//! Loads the sentence-embedding model once and serves `POST /embeddings`.

use sec_aws_services::{
    api::{build_embedding_router, EmbeddingServiceState},
    config::{loader, Config},
    embedding::{EmbeddingProvider, SentenceEmbedder},
    observability::{init_observability, HealthChecker},
    server::start_server,
};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_file = loader::load_env_file();
    let config = Config::load()?;
    init_observability(&config.logging);

    info!("Starting embedding service");
    if let Some(path) = env_file {
        info!("Environment loaded from {}", path.display());
    }

    let embedder: Arc<dyn EmbeddingProvider> =
        Arc::new(SentenceEmbedder::load(config.embedding.clone()).await?);

    let health_checker = Arc::new(
        HealthChecker::new("embedding-service").with_embedder(embedder.as_ref()),
    );

    let app = build_embedding_router(
        EmbeddingServiceState {
            embedder,
            health_checker,
        },
        config.server.max_body_bytes(),
    );

    start_server(&config.server, app).await
}
