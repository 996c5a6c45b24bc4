//! Configuration loading from disk and environment.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variables that override file or default values.
pub const ENV_SERVER_URL: &str = "SNAKE_AUTH_SERVER_URL";
pub const ENV_REALM: &str = "SNAKE_AUTH_REALM";
pub const ENV_CLIENT_ID: &str = "SNAKE_AUTH_CLIENT_ID";
pub const ENV_MOUNT_POINT: &str = "SNAKE_SHELL_MOUNT_POINT";
pub const ENV_LOG_LEVEL: &str = "SNAKE_LOG_LEVEL";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config file {} is not valid TOML: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid snake-app configuration: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Load, override from the process environment, and validate a TOML file.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: AppConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    finish(config)
}

/// Build the configuration from defaults and the process environment only.
pub fn load_from_env() -> Result<AppConfig, ConfigError> {
    finish(AppConfig::default())
}

fn finish(mut config: AppConfig) -> Result<AppConfig, ConfigError> {
    apply_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply overrides from `lookup`. Blank values leave the field untouched.
pub fn apply_overrides<F>(config: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let read = |key: &str| lookup(key).as_deref().and_then(normalize);

    if let Some(value) = read(ENV_SERVER_URL) {
        config.auth.server_url = value;
    }
    if let Some(value) = read(ENV_REALM) {
        config.auth.realm = value;
    }
    if let Some(value) = read(ENV_CLIENT_ID) {
        config.auth.client_id = value;
    }
    if let Some(value) = read(ENV_MOUNT_POINT) {
        config.shell.mount_point = value;
    }
    if let Some(value) = read(ENV_LOG_LEVEL) {
        config.observability.log_level = value;
    }
}

fn normalize(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
