//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Auth client init → Authenticated? → Build shell → Mount
//!
//! Signals (signals.rs):
//!     SIGINT → Stop serving the mounted shell
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then auth, then the shell
//! - The shell is mounted only after a principal exists
//! - Serving starts last (traffic only when ready)

pub mod signals;
pub mod startup;

pub use startup::{StartupOutcome, StartupSequencer};
