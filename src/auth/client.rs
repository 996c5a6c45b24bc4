//! Keycloak client.
//!
//! # Responsibilities
//! - Hold the server / realm / client identity for one application
//! - Discover the realm's endpoints on `init`
//! - Establish a principal according to the requested [`OnLoad`] mode
//! - Keep the resulting session in memory for the shell
//!
//! # Design Decisions
//! - Construction is pure: no validation and no network I/O
//! - `init` runs at most once per client
//! - Tokens are never refreshed or persisted

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

use crate::auth::device::{self, LoginOutcome, Session};
use crate::auth::discovery::{self, ProviderMetadata};
use crate::auth::error::{AuthError, AuthResult};
use crate::auth::options::{InitOptions, OnLoad};
use crate::auth::AuthClient;
use crate::config::AuthClientConfig;

/// Authentication client bound to one Keycloak realm and client id.
pub struct Keycloak {
    config: AuthClientConfig,
    http: reqwest::Client,
    initialized: AtomicBool,
    session: OnceLock<Session>,
}

impl Keycloak {
    /// Create a client for `config`. Never fails and performs no I/O.
    pub fn new(config: AuthClientConfig) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Create a client that talks to the provider through `http`.
    pub fn with_http_client(config: AuthClientConfig, http: reqwest::Client) -> Self {
        Self {
            config,
            http,
            initialized: AtomicBool::new(false),
            session: OnceLock::new(),
        }
    }

    /// Session established by a successful `init`.
    pub fn session(&self) -> Option<&Session> {
        self.session.get()
    }

    /// Current access token, if logged in.
    pub fn token(&self) -> Option<&str> {
        self.session().map(|s| s.access_token.as_str())
    }

    /// Whether `init` has been invoked.
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    async fn login(&self, metadata: &ProviderMetadata, options: &InitOptions) -> AuthResult<bool> {
        let endpoint = metadata
            .device_authorization_endpoint
            .as_deref()
            .ok_or(AuthError::Unsupported("device authorization grant"))?;

        let authorization =
            device::request_device_code(&self.http, endpoint, &self.config.client_id, &options.scope)
                .await?;

        tracing::info!(
            login_uri = %authorization.login_uri(),
            user_code = %authorization.user_code,
            expires_in_secs = authorization.expires_in,
            "Login required, complete sign-in in a browser"
        );

        let outcome = device::poll_for_token(
            &self.http,
            &metadata.token_endpoint,
            &self.config.client_id,
            &authorization,
        )
        .await?;

        match outcome {
            LoginOutcome::Granted(session) => {
                // init runs once, so the cell is always empty here
                let _ = self.session.set(session);
                Ok(true)
            }
            LoginOutcome::Declined(reason) => {
                tracing::debug!(reason, "Login not completed");
                Ok(false)
            }
        }
    }
}

impl AuthClient for Keycloak {
    fn config(&self) -> &AuthClientConfig {
        &self.config
    }

    fn authenticated(&self) -> bool {
        self.session.get().is_some()
    }

    async fn init(&self, options: &InitOptions) -> AuthResult<bool> {
        if self.initialized.swap(true, Ordering::SeqCst) {
            return Err(AuthError::AlreadyInitialized);
        }

        let url = discovery::discovery_url(&self.config);
        tracing::debug!(url = %url, "Fetching provider metadata");
        let metadata = discovery::fetch_metadata(&self.http, &url).await?;
        tracing::debug!(issuer = %metadata.issuer, "Provider metadata loaded");

        match options.on_load {
            OnLoad::LoginRequired => self.login(&metadata, options).await,
            OnLoad::CheckSso => {
                // Sessions are never persisted, so there is nothing to restore silently.
                tracing::debug!(
                    redirect_uri = ?options.silent_check_sso_redirect_uri,
                    "No existing session found"
                );
                Ok(false)
            }
        }
    }
}
