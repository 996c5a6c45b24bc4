//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (structured fields)
//!     → logging.rs (filter + fmt layer to stdout)
//! ```
//!
//! # Design Decisions
//! - Structured logging through the tracing crate
//! - `RUST_LOG` takes precedence over the configured level

#[cfg(test)]
pub mod capture;
pub mod logging;
