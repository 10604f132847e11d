//! Fix Service Binary
//!
//! Serves `POST /embedding` with the shared sentence-embedding model and
//! `POST /fix` backed by the configured LLM. The LLM credential comes from the
//! dotenv file or the environment; without it every fix is empty.

use sec_aws_services::{
    api::{build_fix_router, FixServiceState},
    config::{loader, Config},
    embedding::{EmbeddingProvider, SentenceEmbedder},
    observability::{init_observability, HealthChecker},
    remediation::{build_provider, CompletionProvider, FixGenerator},
    server::start_server,
};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_file = loader::load_env_file();
    let config = Config::load()?;
    init_observability(&config.logging);

    info!("Starting fix service");
    match env_file {
        Some(path) => info!("Environment loaded from {}", path.display()),
        None => info!("No dotenv file found, using process environment"),
    }

    let provider = build_provider(&config.llm)?;
    if provider.is_configured() {
        info!("Fix backend: {} ({})", provider.backend(), provider.model());
    } else {
        warn!("No {} credential configured; /fix will return empty fixes", provider.backend());
    }

    let embedder: Arc<dyn EmbeddingProvider> =
        Arc::new(SentenceEmbedder::load(config.embedding.clone()).await?);

    let health_checker = Arc::new(
        HealthChecker::new("fix-service")
            .with_embedder(embedder.as_ref())
            .with_completion_provider(provider.as_ref()),
    );

    let app = build_fix_router(
        FixServiceState {
            embedder,
            fix_generator: Arc::new(FixGenerator::new(provider)),
            health_checker,
        },
        config.server.max_body_bytes(),
    );

    start_server(&config.server, app).await
}
