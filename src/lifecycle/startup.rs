//! Startup orchestration.
//!
//! # Responsibilities
//! - Initialize the auth client exactly once
//! - Branch on the result: mount the shell, or leave it unmounted
//! - Report every outcome on the diagnostic channel
//!
//! # Outcomes
//! ```text
//! init → Ok(true)  → info  "Authenticated"     → build shell → mount
//! init → Ok(false) → warn  "Not authenticated" → nothing mounted
//! init → Err(e)    → error "init failed" + e   → nothing mounted
//! ```
//!
//! # Design Decisions
//! - `init` is the only suspension point; everything after it is synchronous
//! - No retry, no fallback mode, no timeout of our own
//! - Declined and failed logins are terminal but never crash the process

use std::sync::Arc;

use crate::auth::{AuthClient, AuthError, InitOptions};
use crate::config::ShellConfig;
use crate::shell::{AppShell, Mount, MountError};

/// How startup ended.
#[derive(Debug)]
pub enum StartupOutcome<M> {
    /// A principal was established and the shell is mounted.
    Mounted(M),
    /// Initialization resolved without a principal.
    Declined,
    /// Initialization failed.
    Failed(AuthError),
}

impl<M> StartupOutcome<M> {
    pub fn is_mounted(&self) -> bool {
        matches!(self, StartupOutcome::Mounted(_))
    }
}

/// Sequences client initialization and shell mounting.
pub struct StartupSequencer<C> {
    keycloak: Arc<C>,
    options: InitOptions,
    shell: ShellConfig,
}

impl<C: AuthClient> StartupSequencer<C> {
    pub fn new(keycloak: Arc<C>, options: InitOptions, shell: ShellConfig) -> Self {
        Self {
            keycloak,
            options,
            shell,
        }
    }

    /// Run startup once, consuming the sequencer.
    ///
    /// Only a failure to mount after a successful login is returned as an error.
    pub async fn run<M>(self, mount: &mut M) -> Result<StartupOutcome<M::Mounted>, MountError>
    where
        M: Mount<C>,
    {
        let config = self.keycloak.config();
        tracing::debug!(
            server_url = %config.server_url,
            realm = %config.realm,
            client_id = %config.client_id,
            on_load = ?self.options.on_load,
            "Initializing auth client"
        );

        match self.keycloak.init(&self.options).await {
            Ok(true) => {
                tracing::info!(realm = %config.realm, "Authenticated");
                let shell = AppShell::new(self.shell, Arc::clone(&self.keycloak));
                let mounted = mount.mount(shell)?;
                Ok(StartupOutcome::Mounted(mounted))
            }
            Ok(false) => {
                tracing::warn!(realm = %config.realm, "Not authenticated");
                Ok(StartupOutcome::Declined)
            }
            Err(error) => {
                tracing::error!(error = %error, "Auth client init failed");
                Ok(StartupOutcome::Failed(error))
            }
        }
    }
}
