//! OpenID Connect provider discovery.

use serde::Deserialize;

use crate::auth::error::{AuthError, AuthResult};
use crate::config::AuthClientConfig;

/// Subset of the provider metadata document the client relies on.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderMetadata {
    pub issuer: String,
    pub token_endpoint: String,
    #[serde(default)]
    pub device_authorization_endpoint: Option<String>,
    #[serde(default)]
    pub userinfo_endpoint: Option<String>,
    #[serde(default)]
    pub end_session_endpoint: Option<String>,
}

/// Well-known discovery URL for a realm on a Keycloak server.
pub fn discovery_url(config: &AuthClientConfig) -> String {
    format!(
        "{}/realms/{}/.well-known/openid-configuration",
        config.server_url.trim_end_matches('/'),
        config.realm
    )
}

/// Fetch and parse the provider metadata.
pub async fn fetch_metadata(http: &reqwest::Client, url: &str) -> AuthResult<ProviderMetadata> {
    let response = http.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(AuthError::Discovery {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| AuthError::InvalidResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discovery_url() {
        let config = AuthClientConfig::default();
        assert_eq!(
            discovery_url(&config),
            "http://localhost:8080/realms/snake/.well-known/openid-configuration"
        );
    }

    #[test]
    fn test_discovery_url_trailing_slash() {
        let config = AuthClientConfig::new("https://sso.example.com/", "arcade", "snake-app");
        assert_eq!(
            discovery_url(&config),
            "https://sso.example.com/realms/arcade/.well-known/openid-configuration"
        );
    }

    #[test]
    fn test_metadata_ignores_unknown_fields() {
        let metadata: ProviderMetadata = serde_json::from_str(
            r#"{
                "issuer": "http://localhost:8080/realms/snake",
                "token_endpoint": "http://localhost:8080/realms/snake/protocol/openid-connect/token",
                "grant_types_supported": ["authorization_code"]
            }"#,
        )
        .unwrap();

        assert_eq!(metadata.issuer, "http://localhost:8080/realms/snake");
        assert!(metadata.device_authorization_endpoint.is_none());
    }
}
