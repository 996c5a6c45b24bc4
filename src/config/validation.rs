//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the identity-provider URL is absolute http(s)
//! - Check realm and client identifiers are usable path segments
//! - Check the shell mount point is a socket address
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before the auth client is constructed

use std::fmt;
use std::net::SocketAddr;

use url::Url;

use crate::auth::OnLoad;
use crate::config::schema::AppConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field (e.g., "auth.realm").
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration, collecting every error.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(message) = check_http_url(&config.auth.server_url) {
        errors.push(ValidationError::new("auth.server_url", message));
    }
    if let Err(message) = check_segment(&config.auth.realm) {
        errors.push(ValidationError::new("auth.realm", message));
    }
    if let Err(message) = check_segment(&config.auth.client_id) {
        errors.push(ValidationError::new("auth.client_id", message));
    }

    if config.init.scope.trim().is_empty() {
        errors.push(ValidationError::new("init.scope", "must not be empty"));
    }
    if let (OnLoad::CheckSso, Some(uri)) =
        (config.init.on_load, &config.init.silent_check_sso_redirect_uri)
    {
        if let Err(message) = check_http_url(uri) {
            errors.push(ValidationError::new(
                "init.silent_check_sso_redirect_uri",
                message,
            ));
        }
    }

    if config.shell.mount_point.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "shell.mount_point",
            format!("'{}' is not a socket address", config.shell.mount_point),
        ));
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::new(
            "observability.log_level",
            format!("unknown level '{}'", config.observability.log_level),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_http_url(value: &str) -> Result<(), String> {
    let url = Url::parse(value).map_err(|e| format!("'{}' is not a URL: {}", value, e))?;
    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(()),
        "http" | "https" => Err(format!("'{}' has no host", value)),
        other => Err(format!("unsupported scheme '{}'", other)),
    }
}

fn check_segment(value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err("must not be empty".to_string());
    }
    if value.contains('/') {
        return Err(format!("'{}' must not contain '/'", value));
    }
    Ok(())
}
