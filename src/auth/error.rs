//! Identity-provider error definitions.

use thiserror::Error;

/// Errors that can occur while initializing the auth client.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Identity provider unreachable or the request failed in transit.
    #[error("network error: {0}")]
    Network(String),

    /// Discovery document could not be fetched (unknown realm, wrong server).
    #[error("discovery failed with HTTP {status} at {url}")]
    Discovery { status: u16, url: String },

    /// Provider answered with a body we could not understand.
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),

    /// Provider rejected a request with an OAuth 2.0 error.
    #[error("provider error '{error}'{}", describe(.description))]
    Provider {
        error: String,
        description: Option<String>,
    },

    /// Provider does not offer a capability the requested mode needs.
    #[error("provider does not support {0}")]
    Unsupported(&'static str),

    /// `init` was already invoked on this client.
    #[error("client already initialized")]
    AlreadyInitialized,
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AuthError::InvalidResponse(err.to_string())
        } else {
            AuthError::Network(err.to_string())
        }
    }
}

fn describe(description: &Option<String>) -> String {
    description
        .as_deref()
        .map(|d| format!(": {}", d))
        .unwrap_or_default()
}

/// Result type for auth operations.
pub type AuthResult<T> = Result<T, AuthError>;
