//! Interactive login through the OAuth 2.0 device authorization grant.
//!
//! # Flow
//! ```text
//! POST device_authorization_endpoint (client_id, scope)
//!     → device_code + user_code + verification_uri
//!     → user signs in at verification_uri in any browser
//! POST token_endpoint (device_code) every `interval` seconds
//!     → authorization_pending: keep waiting
//!     → slow_down: interval += 5s
//!     → access_denied / expired_token: login declined
//!     → 200: session established
//! ```
//!
//! # Design Decisions
//! - The polling cadence is dictated by the provider, not by this client
//! - The device code lifetime bounds the wait; no extra timeout
//! - Declines are a normal outcome, not an error

use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use tokio::time::{sleep, Instant};

use crate::auth::error::{AuthError, AuthResult};

pub const DEVICE_CODE_GRANT: &str = "urn:ietf:params:oauth:grant-type:device_code";

const SLOW_DOWN_STEP: Duration = Duration::from_secs(5);

fn default_interval() -> u64 {
    5
}

/// Device authorization response.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceAuthorization {
    pub device_code: String,
    pub user_code: String,
    pub verification_uri: String,
    #[serde(default)]
    pub verification_uri_complete: Option<String>,
    pub expires_in: u64,
    #[serde(default = "default_interval")]
    pub interval: u64,
}

impl DeviceAuthorization {
    /// URI to show the user, preferring the one with the code pre-filled.
    pub fn login_uri(&self) -> &str {
        self.verification_uri_complete
            .as_deref()
            .unwrap_or(&self.verification_uri)
    }
}

/// Tokens issued after a successful login. Held in memory only.
#[derive(Clone, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub id_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub scope: Option<String>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"<redacted>")
            .field("id_token", &self.id_token.as_ref().map(|_| "<redacted>"))
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("scope", &self.scope)
            .finish()
    }
}

/// OAuth 2.0 error response body.
#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Result of waiting for the user.
#[derive(Debug)]
pub enum LoginOutcome {
    Granted(Session),
    /// User refused, or the code expired before they signed in.
    Declined(&'static str),
}

/// Request a device code for `client_id`.
pub async fn request_device_code(
    http: &reqwest::Client,
    endpoint: &str,
    client_id: &str,
    scope: &str,
) -> AuthResult<DeviceAuthorization> {
    let response = http
        .post(endpoint)
        .form(&[("client_id", client_id), ("scope", scope)])
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(provider_error(status, &body));
    }

    serde_json::from_str(&body).map_err(|e| AuthError::InvalidResponse(e.to_string()))
}

/// Poll the token endpoint until the provider grants, denies, or the code expires.
pub async fn poll_for_token(
    http: &reqwest::Client,
    token_endpoint: &str,
    client_id: &str,
    authorization: &DeviceAuthorization,
) -> AuthResult<LoginOutcome> {
    // A lifetime too large to represent never expires on our side.
    let deadline = Instant::now().checked_add(Duration::from_secs(authorization.expires_in));
    let mut interval = Duration::from_secs(authorization.interval);

    loop {
        if deadline.is_some_and(|d| Instant::now() >= d) {
            return Ok(LoginOutcome::Declined("device code expired"));
        }
        sleep(interval).await;

        let response = http
            .post(token_endpoint)
            .form(&[
                ("grant_type", DEVICE_CODE_GRANT),
                ("client_id", client_id),
                ("device_code", authorization.device_code.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if status.is_success() {
            let session: Session = serde_json::from_str(&body)
                .map_err(|e| AuthError::InvalidResponse(e.to_string()))?;
            return Ok(LoginOutcome::Granted(session));
        }

        match serde_json::from_str::<TokenErrorResponse>(&body) {
            Ok(err) => match err.error.as_str() {
                "authorization_pending" => {
                    tracing::trace!("Authorization pending");
                }
                "slow_down" => {
                    interval = slowed_down(interval);
                    tracing::debug!(interval_secs = interval.as_secs(), "Provider asked to slow down");
                }
                "access_denied" => return Ok(LoginOutcome::Declined("access denied")),
                "expired_token" => return Ok(LoginOutcome::Declined("device code expired")),
                _ => {
                    return Err(AuthError::Provider {
                        error: err.error,
                        description: err.error_description,
                    })
                }
            },
            Err(_) => return Err(provider_error(status, &body)),
        }
    }
}

fn slowed_down(interval: Duration) -> Duration {
    interval.saturating_add(SLOW_DOWN_STEP)
}

fn provider_error(status: reqwest::StatusCode, body: &str) -> AuthError {
    match serde_json::from_str::<TokenErrorResponse>(body) {
        Ok(err) => AuthError::Provider {
            error: err.error,
            description: err.error_description,
        },
        Err(_) => AuthError::Provider {
            error: format!("http_{}", status.as_u16()),
            description: (!body.is_empty()).then(|| body.to_string()),
        },
    }
}
