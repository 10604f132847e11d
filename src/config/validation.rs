//! Configuration validation

use super::*;
use crate::error::{Result, ServiceError};

const LOG_FORMATS: &[&str] = &["pretty", "compact", "json"];

/// Validate complete configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_server_config(&config.server)?;
    validate_embedding_config(&config.embedding)?;
    validate_llm_config(&config.llm)?;
    validate_logging_config(&config.logging)?;
    Ok(())
}

/// Validate server configuration
pub fn validate_server_config(config: &ServerConfig) -> Result<()> {
    if config.port == 0 {
        return Err(ServiceError::Config(
            "Server port cannot be 0".to_string()
        ));
    }

    if config.host.is_empty() {
        return Err(ServiceError::Config(
            "Server host cannot be empty".to_string()
        ));
    }

    if config.max_body_size_mb == 0 {
        return Err(ServiceError::Config(
            "Max body size must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate embedding model configuration
fn validate_embedding_config(config: &EmbeddingConfig) -> Result<()> {
    if config.model_id.is_empty() && config.model_dir.is_none() {
        return Err(ServiceError::Config(
            "Either an embedding model id or a model directory is required".to_string()
        ));
    }

    if config.dimension == 0 {
        return Err(ServiceError::Config(
            "Embedding dimension must be greater than 0".to_string()
        ));
    }

    if config.max_length == 0 || config.max_length > 512 {
        return Err(ServiceError::Config(
            "Embedding max length must be between 1 and 512 tokens".to_string()
        ));
    }

    if config.intra_threads == 0 {
        return Err(ServiceError::Config(
            "Intra-op thread count must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate LLM backend configuration.
///
/// A missing API key is accepted: fix generation then degrades to empty fixes.
fn validate_llm_config(config: &LlmConfig) -> Result<()> {
    for (name, url) in [("LLM API URL", &config.api_url), ("Ollama URL", &config.ollama_url)] {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ServiceError::Config(
                format!("{} must start with http:// or https://", name)
            ));
        }
    }

    let model = match config.provider {
        LlmProvider::OpenAi => &config.model,
        LlmProvider::Ollama => &config.ollama_model,
    };
    if model.is_empty() {
        return Err(ServiceError::Config(
            "LLM model name cannot be empty".to_string()
        ));
    }

    if config.timeout_secs == 0 {
        return Err(ServiceError::Config(
            "LLM timeout must be greater than 0".to_string()
        ));
    }

    if config.timeout_secs > 300 {
        return Err(ServiceError::Config(
            "LLM timeout too large (max: 300 seconds)".to_string()
        ));
    }

    Ok(())
}

fn validate_logging_config(config: &LoggingConfig) -> Result<()> {
    if !LOG_FORMATS.contains(&config.format.as_str()) {
        return Err(ServiceError::Config(
            format!("Unknown log format '{}' (expected one of {:?})", config.format, LOG_FORMATS)
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        // No API key: still valid, fixes just come back empty
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_invalid_port() {
        let mut config = Config::default();
        config.server.port = 0;

        assert!(validate_server_config(&config.server).is_err());
    }

    #[test]
    fn test_invalid_llm_url() {
        let mut config = Config::default();
        config.llm.api_url = "api.openai.com".to_string();

        assert!(validate_llm_config(&config.llm).is_err());
    }

    #[test]
    fn test_empty_ollama_model_only_matters_for_ollama() {
        let mut config = Config::default();
        config.llm.ollama_model = String::new();
        assert!(validate_llm_config(&config.llm).is_ok());

        config.llm.provider = LlmProvider::Ollama;
        assert!(validate_llm_config(&config.llm).is_err());
    }

    #[test]
    fn test_invalid_max_length() {
        let mut config = Config::default();
        config.embedding.max_length = 1024;

        assert!(validate_embedding_config(&config.embedding).is_err());
    }

    #[test]
    fn test_unknown_log_format() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();

        assert!(validate_logging_config(&config.logging).is_err());
    }
}
