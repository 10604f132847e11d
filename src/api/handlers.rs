//! API request handlers

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::error;

use crate::{
    embedding::{EmbeddingProvider, EmbeddingRequest, EmbeddingResponse, EmbeddingsRequest, EmbeddingsResponse},
    error::ServiceError,
    observability::{HealthChecker, HealthStatus},
    remediation::{FixGenerator, FixRequest, FixResponse},
};

/// State of the embedding service
#[derive(Clone)]
pub struct EmbeddingServiceState {
    pub embedder: Arc<dyn EmbeddingProvider>,
    pub health_checker: Arc<HealthChecker>,
}

/// State of the fix service
#[derive(Clone)]
pub struct FixServiceState {
    pub embedder: Arc<dyn EmbeddingProvider>,
    pub fix_generator: Arc<FixGenerator>,
    pub health_checker: Arc<HealthChecker>,
}

impl FromRef<EmbeddingServiceState> for Arc<dyn EmbeddingProvider> {
    fn from_ref(state: &EmbeddingServiceState) -> Self {
        state.embedder.clone()
    }
}

impl FromRef<EmbeddingServiceState> for Arc<HealthChecker> {
    fn from_ref(state: &EmbeddingServiceState) -> Self {
        state.health_checker.clone()
    }
}

impl FromRef<FixServiceState> for Arc<dyn EmbeddingProvider> {
    fn from_ref(state: &FixServiceState) -> Self {
        state.embedder.clone()
    }
}

impl FromRef<FixServiceState> for Arc<FixGenerator> {
    fn from_ref(state: &FixServiceState) -> Self {
        state.fix_generator.clone()
    }
}

impl FromRef<FixServiceState> for Arc<HealthChecker> {
    fn from_ref(state: &FixServiceState) -> Self {
        state.health_checker.clone()
    }
}

/// Generic error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Embedding failures surface as 500 with a JSON body
pub struct ApiError(ServiceError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("Request failed: {}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

impl<E> From<E> for ApiError
where
    E: Into<ServiceError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

/// `POST /embeddings` on the embedding service
pub async fn embed_text(
    State(embedder): State<Arc<dyn EmbeddingProvider>>,
    Json(req): Json<EmbeddingsRequest>,
) -> Result<Json<EmbeddingsResponse>, ApiError> {
    let embeddings = embedder.embed(&req.text).await?;
    Ok(Json(EmbeddingsResponse { embeddings }))
}

/// `POST /embedding` on the fix service
pub async fn generate_embedding(
    State(embedder): State<Arc<dyn EmbeddingProvider>>,
    Json(req): Json<EmbeddingRequest>,
) -> Result<Json<EmbeddingResponse>, ApiError> {
    let embedding = embedder.embed(&req.inp).await?;
    Ok(Json(EmbeddingResponse { embedding }))
}

/// `POST /fix`. Always 200; the fix is empty when generation failed.
pub async fn generate_fix(
    State(fix_generator): State<Arc<FixGenerator>>,
    Json(req): Json<FixRequest>,
) -> Json<FixResponse> {
    let outcome = fix_generator.generate(&req.context).await;
    Json(outcome.into())
}

/// Health check handler
pub async fn health(State(health_checker): State<Arc<HealthChecker>>) -> impl IntoResponse {
    let status = health_checker.check_health();
    let status_code = match status.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(status))
}
