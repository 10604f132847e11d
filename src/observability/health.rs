//! Health reporting for the services

use crate::embedding::EmbeddingProvider;
use crate::remediation::CompletionProvider;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Health status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Component health
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    /// Component name
    pub name: String,

    /// Health status
    pub status: HealthStatus,

    /// Optional message
    pub message: Option<String>,
}

/// Overall service health
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemHealth {
    pub status: HealthStatus,
    pub service: String,
    pub version: String,
    pub uptime_secs: u64,
    pub components: Vec<ComponentHealth>,
    pub timestamp: i64,
}

/// Reports the static state of a service's dependencies.
///
/// Components are described once at startup; nothing is probed per request.
pub struct HealthChecker {
    service: String,
    start_time: Instant,
    components: Vec<ComponentHealth>,
}

impl HealthChecker {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            start_time: Instant::now(),
            components: Vec::new(),
        }
    }

    /// Report the loaded embedding model
    pub fn with_embedder(mut self, embedder: &dyn EmbeddingProvider) -> Self {
        self.components.push(ComponentHealth {
            name: "embedding_model".to_string(),
            status: HealthStatus::Healthy,
            message: Some(format!(
                "{} ({} dimensions)",
                embedder.model_name(),
                embedder.dimension()
            )),
        });
        self
    }

    /// Report the completion backend; without a credential fixes come back empty
    pub fn with_completion_provider(mut self, provider: &dyn CompletionProvider) -> Self {
        let (status, message) = if provider.is_configured() {
            (
                HealthStatus::Healthy,
                format!("{} ({})", provider.backend(), provider.model()),
            )
        } else {
            (
                HealthStatus::Degraded,
                format!("{}: no API credential configured, fixes will be empty", provider.backend()),
            )
        };
        self.components.push(ComponentHealth {
            name: "llm".to_string(),
            status,
            message: Some(message),
        });
        self
    }

    pub fn check_health(&self) -> SystemHealth {
        let status = self
            .components
            .iter()
            .map(|c| c.status)
            .max()
            .unwrap_or(HealthStatus::Healthy);

        SystemHealth {
            status,
            service: self.service.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_secs: self.start_time.elapsed().as_secs(),
            components: self.components.clone(),
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}
