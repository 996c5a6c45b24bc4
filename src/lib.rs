//! Authenticated application-shell bootstrap.
//!
//! Builds a Keycloak client, initializes it once, and mounts the
//! application shell only when a principal has been established.
//!
//! # Architecture Overview
//!
//! ```text
//!   config ──▶ auth (Keycloak::new) ──▶ lifecycle::startup
//!                                          │ init(options)
//!                    ┌─────────────────────┼─────────────────────┐
//!                    ▼                     ▼                     ▼
//!             Ok(true): info         Ok(false): warn        Err(e): error
//!             shell::AppShell        nothing mounted        nothing mounted
//!             mount → serve
//! ```

pub mod auth;
pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod shell;

pub use auth::{AuthClient, Keycloak};
pub use config::{AppConfig, AuthClientConfig};
pub use lifecycle::{StartupOutcome, StartupSequencer};
