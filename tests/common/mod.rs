//! Shared utilities for integration testing: a scriptable Keycloak stand-in.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;

use snake_app::auth::Keycloak;
use snake_app::config::AuthClientConfig;

/// How the token endpoint answers device-code polls.
#[derive(Clone, Copy)]
pub enum TokenScript {
    /// Answer `authorization_pending` this many times, then issue tokens.
    GrantAfter(usize),
    /// The user refuses the login.
    Deny,
    /// Any other OAuth error code.
    Fail(&'static str),
    /// Ask the client to `slow_down` once, then issue tokens.
    SlowDownThenGrant,
    /// Report the device code as expired.
    Expired,
}

/// Lifetime and polling interval handed out with the device code, in seconds.
#[derive(Clone, Copy)]
pub struct DeviceTiming {
    pub expires_in: u64,
    pub interval: u64,
}

impl Default for DeviceTiming {
    fn default() -> Self {
        Self {
            expires_in: 60,
            interval: 0,
        }
    }
}

#[derive(Clone)]
struct MockState {
    addr: SocketAddr,
    realm: &'static str,
    device_grant: bool,
    script: TokenScript,
    timing: DeviceTiming,
    hits: Arc<AtomicUsize>,
    polls: Arc<AtomicUsize>,
}

/// A running mock identity provider.
pub struct MockIdp {
    pub addr: SocketAddr,
    hits: Arc<AtomicUsize>,
    polls: Arc<AtomicUsize>,
}

impl MockIdp {
    /// Total requests served.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Token endpoint polls served.
    pub fn polls(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn config(&self, realm: &str) -> AuthClientConfig {
        AuthClientConfig::new(self.url(), realm, "snake-app")
    }
}

/// Start a mock provider serving `realm` on an ephemeral port.
pub async fn start_mock_idp(realm: &'static str, device_grant: bool, script: TokenScript) -> MockIdp {
    start_mock_idp_with(realm, device_grant, script, DeviceTiming::default()).await
}

/// Like [`start_mock_idp`], with explicit device code timing.
pub async fn start_mock_idp_with(
    realm: &'static str,
    device_grant: bool,
    script: TokenScript,
    timing: DeviceTiming,
) -> MockIdp {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let polls = Arc::new(AtomicUsize::new(0));

    let state = MockState {
        addr,
        realm,
        device_grant,
        script,
        timing,
        hits: hits.clone(),
        polls: polls.clone(),
    };

    let app = Router::new()
        .route(
            "/realms/{realm}/.well-known/openid-configuration",
            get(discovery),
        )
        .route(
            "/realms/{realm}/protocol/openid-connect/auth/device",
            post(device_authorization),
        )
        .route("/realms/{realm}/protocol/openid-connect/token", post(token))
        .with_state(state);

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockIdp { addr, hits, polls }
}

/// An address nothing listens on.
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// HTTP client that never goes through a proxy.
pub fn direct_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// Keycloak client wired to talk to local mocks directly.
pub fn keycloak_for(config: AuthClientConfig) -> Keycloak {
    Keycloak::with_http_client(config, direct_client())
}

fn realm_base(state: &MockState) -> String {
    format!("http://{}/realms/{}", state.addr, state.realm)
}

fn oauth_error(status: StatusCode, error: &str) -> Response {
    (status, Json(json!({ "error": error, "error_description": format!("mock {error}") })))
        .into_response()
}

async fn discovery(State(state): State<MockState>, Path(realm): Path<String>) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    if realm != state.realm {
        return (StatusCode::NOT_FOUND, Json(json!({ "error": "Realm does not exist" })))
            .into_response();
    }

    let base = realm_base(&state);
    let mut metadata = json!({
        "issuer": base.clone(),
        "token_endpoint": format!("{base}/protocol/openid-connect/token"),
        "userinfo_endpoint": format!("{base}/protocol/openid-connect/userinfo"),
        "end_session_endpoint": format!("{base}/protocol/openid-connect/logout"),
    });
    if state.device_grant {
        metadata["device_authorization_endpoint"] =
            json!(format!("{base}/protocol/openid-connect/auth/device"));
    }
    Json(metadata).into_response()
}

async fn device_authorization(
    State(state): State<MockState>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    if form.get("client_id").map(String::as_str) != Some("snake-app") {
        return oauth_error(StatusCode::UNAUTHORIZED, "invalid_client");
    }

    let base = realm_base(&state);
    Json(json!({
        "device_code": "mock-device-code",
        "user_code": "WDJB-MJHT",
        "verification_uri": format!("{base}/device"),
        "verification_uri_complete": format!("{base}/device?user_code=WDJB-MJHT"),
        "expires_in": state.timing.expires_in,
        "interval": state.timing.interval,
    }))
    .into_response()
}

async fn token(State(state): State<MockState>, Form(form): Form<HashMap<String, String>>) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let poll = state.polls.fetch_add(1, Ordering::SeqCst);

    if form.get("device_code").map(String::as_str) != Some("mock-device-code") {
        return oauth_error(StatusCode::BAD_REQUEST, "invalid_grant");
    }

    match state.script {
        TokenScript::GrantAfter(pending) if poll < pending => {
            oauth_error(StatusCode::BAD_REQUEST, "authorization_pending")
        }
        TokenScript::GrantAfter(_) => granted(),
        TokenScript::Deny => oauth_error(StatusCode::BAD_REQUEST, "access_denied"),
        TokenScript::Fail(code) => oauth_error(StatusCode::BAD_REQUEST, code),
        TokenScript::SlowDownThenGrant if poll == 0 => {
            oauth_error(StatusCode::BAD_REQUEST, "slow_down")
        }
        TokenScript::SlowDownThenGrant => granted(),
        TokenScript::Expired => oauth_error(StatusCode::BAD_REQUEST, "expired_token"),
    }
}

fn granted() -> Response {
    Json(json!({
        "access_token": "mock-access-token",
        "id_token": "mock-id-token",
        "token_type": "Bearer",
        "expires_in": 300,
        "scope": "openid profile",
    }))
    .into_response()
}
