//! HTTP surfaces of the embedding and fix services

pub mod handlers;
pub mod routes;

pub use handlers::{EmbeddingServiceState, FixServiceState};
pub use routes::{build_embedding_router, build_fix_router};
