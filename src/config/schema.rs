//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the bootstrap.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::auth::OnLoad;

/// Root configuration for the application bootstrap.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Identity-provider client settings.
    pub auth: AuthClientConfig,

    /// Options passed to the client's initialization.
    pub init: InitConfig,

    /// Application shell settings.
    pub shell: ShellConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Identity-provider server, realm and client the application authenticates against.
///
/// Immutable once constructed; no validation happens here.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthClientConfig {
    /// Absolute URL of the identity provider (e.g., "http://localhost:8080").
    pub server_url: String,

    /// Realm the client is registered in.
    pub realm: String,

    /// Registered client identifier.
    pub client_id: String,
}

impl AuthClientConfig {
    pub fn new(
        server_url: impl Into<String>,
        realm: impl Into<String>,
        client_id: impl Into<String>,
    ) -> Self {
        Self {
            server_url: server_url.into(),
            realm: realm.into(),
            client_id: client_id.into(),
        }
    }
}

impl Default for AuthClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080", "snake", "snake-app")
    }
}

/// Initialization options.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InitConfig {
    /// Interaction mode ("login-required" or "check-sso").
    pub on_load: OnLoad,

    /// Same-origin page used by the silent SSO check.
    pub silent_check_sso_redirect_uri: Option<String>,

    /// OpenID Connect scope requested at login.
    pub scope: String,
}

impl Default for InitConfig {
    fn default() -> Self {
        Self {
            on_load: OnLoad::LoginRequired,
            silent_check_sso_redirect_uri: None,
            scope: "openid".to_string(),
        }
    }
}

/// Application shell configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Address the shell is mounted on (e.g., "127.0.0.1:5173").
    pub mount_point: String,

    /// Page title of the served application.
    pub title: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            mount_point: "127.0.0.1:5173".to_string(),
            title: "Snake".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
