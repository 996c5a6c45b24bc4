//! Initialization options.

use serde::{Deserialize, Serialize};

use crate::config::InitConfig;

/// How `init` establishes a principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OnLoad {
    /// Do not resolve until the user has logged in (or declined).
    #[default]
    LoginRequired,
    /// Only report an existing session; never prompt for login.
    CheckSso,
}

/// Options for [`AuthClient::init`](crate::auth::AuthClient::init).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitOptions {
    pub on_load: OnLoad,
    pub silent_check_sso_redirect_uri: Option<String>,
    pub scope: String,
}

impl InitOptions {
    pub fn login_required() -> Self {
        Self {
            on_load: OnLoad::LoginRequired,
            silent_check_sso_redirect_uri: None,
            scope: "openid".to_string(),
        }
    }

    pub fn check_sso(silent_check_sso_redirect_uri: Option<String>) -> Self {
        Self {
            on_load: OnLoad::CheckSso,
            silent_check_sso_redirect_uri,
            scope: "openid".to_string(),
        }
    }
}

impl Default for InitOptions {
    fn default() -> Self {
        Self::login_required()
    }
}

impl From<&InitConfig> for InitOptions {
    fn from(config: &InitConfig) -> Self {
        Self {
            on_load: config.on_load,
            silent_check_sso_redirect_uri: config.silent_check_sso_redirect_uri.clone(),
            scope: config.scope.clone(),
        }
    }
}
