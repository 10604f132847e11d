//! Configuration management for the embedding and fix services

use serde::{Deserialize, Serialize};
use std::path::Path;
use secrecy::{ExposeSecret, Secret};

pub mod loader;
pub mod validation;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host
    #[serde(default = "default_server_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_server_port")]
    pub port: u16,

    /// Maximum request body size in MB
    #[serde(default = "default_max_body_size")]
    pub max_body_size_mb: usize,
}

/// Configuration for the in-process sentence-embedding model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Hugging Face model id
    #[serde(default = "default_model_id")]
    pub model_id: String,

    /// Local directory holding `onnx/model.onnx` and `tokenizer.json`.
    /// When unset the files are fetched from the hub and cached.
    #[serde(default)]
    pub model_dir: Option<String>,

    /// Expected output dimension
    #[serde(default = "default_dimension")]
    pub dimension: usize,

    /// Maximum number of tokens fed to the model
    #[serde(default = "default_max_length")]
    pub max_length: usize,

    /// ONNX Runtime intra-op threads
    #[serde(default = "default_intra_threads")]
    pub intra_threads: usize,
}

/// Which completion backend generates fixes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    #[default]
    OpenAi,
    Ollama,
}

/// Configuration for the LLM completion backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub provider: LlmProvider,

    /// Chat completions endpoint
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// API credential (secured). Empty means every fix request degrades to an empty fix.
    #[serde(
        default = "empty_secret",
        serialize_with = "serialize_secret",
        deserialize_with = "deserialize_secret"
    )]
    pub api_key: Secret<String>,

    /// Chat model identifier
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// Ollama base URL
    #[serde(default = "default_ollama_url")]
    pub ollama_url: String,

    /// Ollama model name
    #[serde(default = "default_ollama_model")]
    pub ollama_model: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (pretty, compact or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_server_host() -> String { "0.0.0.0".to_string() }
fn default_server_port() -> u16 { 8000 }
fn default_max_body_size() -> usize { 10 }
fn default_model_id() -> String { "sentence-transformers/all-MiniLM-L6-v2".to_string() }
fn default_dimension() -> usize { 384 }
fn default_max_length() -> usize { 256 }
fn default_intra_threads() -> usize { 4 }
fn default_api_url() -> String { "https://api.openai.com/v1/chat/completions".to_string() }
fn default_llm_model() -> String { "gpt-4o-mini".to_string() }
fn default_ollama_url() -> String { "http://localhost:11434".to_string() }
fn default_ollama_model() -> String { "granite3.1-moe".to_string() }
fn default_timeout() -> u64 { 60 }
fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "pretty".to_string() }
fn empty_secret() -> Secret<String> { Secret::new(String::new()) }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            max_body_size_mb: default_max_body_size(),
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model_id: default_model_id(),
            model_dir: None,
            dimension: default_dimension(),
            max_length: default_max_length(),
            intra_threads: default_intra_threads(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::default(),
            api_url: default_api_url(),
            api_key: empty_secret(),
            model: default_llm_model(),
            ollama_url: default_ollama_url(),
            ollama_model: default_ollama_model(),
            timeout_secs: default_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl ServerConfig {
    /// Body limit in bytes
    pub fn max_body_bytes(&self) -> usize {
        self.max_body_size_mb * 1024 * 1024
    }
}

impl LlmConfig {
    /// Whether a non-empty credential is present
    pub fn has_api_key(&self) -> bool {
        !self.api_key.expose_secret().is_empty()
    }
}

impl Config {
    /// Load the process configuration: dotenv file, optional TOML file, then
    /// `SEC_AWS__*` environment overrides.
    pub fn load() -> crate::error::Result<Self> {
        let config = loader::load_runtime_config()?;
        validation::validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file with environment variable overrides
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::error::Result<Self> {
        let config = loader::load_config(path)?;
        validation::validate_config(&config)?;
        Ok(config)
    }

    /// Validate this configuration
    pub fn validate(&self) -> crate::error::Result<()> {
        validation::validate_config(self)
    }
}

/// Custom serializer for Secret<String>
fn serialize_secret<S>(secret: &Secret<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(secret.expose_secret())
}

/// Custom deserializer for Secret<String>
fn deserialize_secret<'de, D>(deserializer: D) -> Result<Secret<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(Secret::new(s))
}
