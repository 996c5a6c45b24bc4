//! Authentication subsystem.
//!
//! # Data Flow
//! ```text
//! AuthClientConfig
//!     → client.rs (Keycloak::new, no I/O)
//!     → init(options)
//!         → discovery.rs (realm metadata)
//!         → device.rs (interactive login, login-required only)
//!     → Ok(true) | Ok(false) | Err(AuthError)
//! ```
//!
//! # Design Decisions
//! - The startup sequencer depends on the [`AuthClient`] trait, not on Keycloak
//! - Construction never fails; misconfiguration surfaces as an init error
//! - A declined login is `Ok(false)`, never an error

use std::future::Future;

use crate::config::AuthClientConfig;

pub mod client;
pub mod device;
pub mod discovery;
pub mod error;
pub mod options;

pub use client::Keycloak;
pub use device::Session;
pub use error::{AuthError, AuthResult};
pub use options::{InitOptions, OnLoad};

/// An authentication client the application can be initialized against.
pub trait AuthClient: Send + Sync + 'static {
    /// Configuration the client was built from.
    fn config(&self) -> &AuthClientConfig;

    /// Whether a principal has been established.
    fn authenticated(&self) -> bool;

    /// Initialize the client, resolving to whether a principal was established.
    fn init(&self, options: &InitOptions) -> impl Future<Output = AuthResult<bool>> + Send;
}
