//! Application shell construction.
//!
//! # Responsibilities
//! - Create Axum Router with the shell's handlers
//! - Inject the authenticated client as shared state
//! - Wire up middleware (request ID, tracing)

use std::sync::Arc;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::auth::AuthClient;
use crate::config::ShellConfig;
use crate::shell::handlers::{health, index, session};
use crate::shell::request::RequestIdGenerator;

/// State injected into every handler.
///
/// Carries the authenticated client so any part of the shell can reach it
/// without re-deriving it.
pub struct ShellState<C> {
    keycloak: Arc<C>,
    config: Arc<ShellConfig>,
}

impl<C> Clone for ShellState<C> {
    fn clone(&self) -> Self {
        Self {
            keycloak: Arc::clone(&self.keycloak),
            config: Arc::clone(&self.config),
        }
    }
}

impl<C: AuthClient> ShellState<C> {
    /// The authenticated client.
    pub fn keycloak(&self) -> &Arc<C> {
        &self.keycloak
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }
}

/// The application shell, built but not yet mounted.
pub struct AppShell<C> {
    state: ShellState<C>,
}

impl<C: AuthClient> AppShell<C> {
    /// Build the shell with `keycloak` injected into its state.
    pub fn new(config: ShellConfig, keycloak: Arc<C>) -> Self {
        Self {
            state: ShellState {
                keycloak,
                config: Arc::new(config),
            },
        }
    }

    pub fn state(&self) -> &ShellState<C> {
        &self.state
    }

    /// Build the Axum router with all middleware layers.
    pub fn into_router(self) -> Router {
        Router::new()
            .route("/", get(index::<C>))
            .route("/session", get(session::<C>))
            .route("/health", get(health))
            .with_state(self.state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(RequestIdGenerator))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
    }
}
