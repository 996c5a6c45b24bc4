//! Mounting the shell onto its attachment point.
//!
//! # Responsibilities
//! - Bind the configured mount point
//! - Hand back a handle that serves the shell until shutdown
//!
//! # Design Decisions
//! - Mounting is synchronous: the socket is bound before `mount` returns
//! - Serving is a separate step driven by the binary
//! - Shutdown on Ctrl+C, draining in-flight requests

use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::auth::AuthClient;
use crate::config::ShellConfig;
use crate::lifecycle::signals::shutdown_signal;
use crate::shell::server::AppShell;

/// Errors that can occur while mounting the shell.
#[derive(Debug, Error)]
pub enum MountError {
    /// Mount point is not a socket address.
    #[error("invalid mount point '{0}'")]
    InvalidMountPoint(String),

    /// Socket could not be bound (address in use, permission denied).
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

/// Something the shell can be mounted onto.
pub trait Mount<C: AuthClient> {
    /// Handle returned once the shell is mounted.
    type Mounted;

    fn mount(&mut self, shell: AppShell<C>) -> Result<Self::Mounted, MountError>;
}

/// Mounts the shell on a TCP socket address.
#[derive(Debug, Clone)]
pub struct TcpMount {
    mount_point: String,
}

impl TcpMount {
    pub fn new(mount_point: impl Into<String>) -> Self {
        Self {
            mount_point: mount_point.into(),
        }
    }

    pub fn mount_point(&self) -> &str {
        &self.mount_point
    }
}

impl From<&ShellConfig> for TcpMount {
    fn from(config: &ShellConfig) -> Self {
        Self::new(config.mount_point.clone())
    }
}

impl<C: AuthClient> Mount<C> for TcpMount {
    type Mounted = MountedShell;

    /// Must be called from within a Tokio runtime.
    fn mount(&mut self, shell: AppShell<C>) -> Result<MountedShell, MountError> {
        let addr: SocketAddr = self
            .mount_point
            .parse()
            .map_err(|_| MountError::InvalidMountPoint(self.mount_point.clone()))?;

        let bind = |source| MountError::Bind { addr, source };
        let std_listener = std::net::TcpListener::bind(addr).map_err(bind)?;
        std_listener.set_nonblocking(true).map_err(bind)?;
        let listener = TcpListener::from_std(std_listener).map_err(bind)?;
        let local_addr = listener.local_addr().map_err(bind)?;

        tracing::info!(address = %local_addr, "Shell mounted");

        Ok(MountedShell {
            listener,
            local_addr,
            router: shell.into_router(),
        })
    }
}

/// A shell bound to its socket, ready to serve.
pub struct MountedShell {
    listener: TcpListener,
    local_addr: SocketAddr,
    router: Router,
}

impl MountedShell {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serve until Ctrl+C.
    pub async fn serve(self) -> Result<(), std::io::Error> {
        self.serve_with_shutdown(shutdown_signal()).await
    }

    /// Serve until `signal` completes.
    pub async fn serve_with_shutdown<F>(self, signal: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        tracing::info!(address = %self.local_addr, "Shell serving");

        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(signal)
            .await?;

        tracing::info!("Shell stopped");
        Ok(())
    }
}
