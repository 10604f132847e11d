//! Configuration loader with dotenv and environment variable support

use super::Config;
use crate::error::Result;
use config::{Environment, File, FileFormat};
use secrecy::{ExposeSecret, Secret};
use std::path::{Path, PathBuf};

/// Dotenv file read at startup, relative to the working directory
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Optional TOML configuration file
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Prefix for environment overrides, e.g. `SEC_AWS__SERVER__PORT`
pub const ENV_PREFIX: &str = "SEC_AWS";

/// Environment variable holding the LLM credential
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Load the dotenv file into the process environment.
///
/// The path comes from `ENV_FILE`, falling back to [`DEFAULT_ENV_FILE`].
/// A missing or unreadable file is not an error; the credential simply stays
/// unset. Returns the path that was loaded, if any.
pub fn load_env_file() -> Option<PathBuf> {
    let path = PathBuf::from(
        std::env::var("ENV_FILE").unwrap_or_else(|_| DEFAULT_ENV_FILE.to_string()),
    );
    dotenvy::from_path(&path).ok().map(|_| path)
}

/// Build the runtime configuration from `CONFIG_PATH` (or [`DEFAULT_CONFIG_FILE`])
/// and the process environment.
pub fn load_runtime_config() -> Result<Config> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
    load_config(path)
}

/// Load configuration from an optional TOML file with environment variable overrides
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let mut cfg = build_config(path.as_ref(), env_source())?;
    apply_credential_fallback(&mut cfg, std::env::var(API_KEY_VAR).ok());
    Ok(cfg)
}

fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}

fn build_config(path: &Path, env: Environment) -> Result<Config> {
    let config = config::Config::builder()
        .add_source(File::from(path).format(FileFormat::Toml).required(false))
        .add_source(env)
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    Ok(cfg)
}

/// Fill an empty `llm.api_key` from the plain credential variable
fn apply_credential_fallback(config: &mut Config, api_key: Option<String>) {
    if config.llm.api_key.expose_secret().is_empty() {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            config.llm.api_key = Secret::new(key.trim().to_string());
        }
    }
}
