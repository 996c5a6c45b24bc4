use axum::{
    extract::State,
    response::Html,
    Json,
};
use serde::Serialize;

use crate::auth::AuthClient;
use crate::shell::server::ShellState;

/// Public view of the session. Tokens are never exposed.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub authenticated: bool,
    pub server_url: String,
    pub realm: String,
    pub client_id: String,
}

pub async fn index<C: AuthClient>(State(state): State<ShellState<C>>) -> Html<String> {
    let auth = state.keycloak().config();
    Html(format!(
        concat!(
            "<!doctype html>\n",
            "<html lang=\"en\">\n",
            "<head><meta charset=\"utf-8\"><title>{title}</title></head>\n",
            "<body>\n",
            "<div id=\"app\" data-realm=\"{realm}\" data-client-id=\"{client_id}\"></div>\n",
            "</body>\n",
            "</html>\n"
        ),
        title = escape(&state.config().title),
        realm = escape(&auth.realm),
        client_id = escape(&auth.client_id),
    ))
}

pub async fn session<C: AuthClient>(State(state): State<ShellState<C>>) -> Json<SessionView> {
    let keycloak = state.keycloak();
    let config = keycloak.config();
    Json(SessionView {
        authenticated: keycloak.authenticated(),
        server_url: config.server_url.clone(),
        realm: config.realm.clone(),
        client_id: config.client_id.clone(),
    })
}

pub async fn health() -> &'static str {
    "ok"
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
