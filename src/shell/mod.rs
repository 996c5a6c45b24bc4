//! Application shell subsystem.
//!
//! # Data Flow
//! ```text
//! authenticated client (Arc)
//!     → server.rs (AppShell::new, client injected as state)
//!     → mount.rs (bind mount point → MountedShell)
//!     → serve: request.rs (request ID) → handlers.rs (page, session, health)
//! ```
//!
//! # Design Decisions
//! - The shell only exists after authentication succeeds
//! - Handlers reach the client through state, never through a global
//! - Tokens stay server-side; the session endpoint exposes metadata only

pub mod handlers;
pub mod mount;
pub mod request;
pub mod server;

pub use mount::{Mount, MountError, MountedShell, TcpMount};
pub use request::X_REQUEST_ID;
pub use server::{AppShell, ShellState};
