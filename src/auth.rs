//! Client-credentials token exchange against Microsoft Entra ID

use crate::config::Config;
use crate::error::{Error, Result};
use serde::Deserialize;

/// Scope requested for the downstream Graph API (application permissions)
const GRAPH_DEFAULT_SCOPE: &str = "https://graph.microsoft.com/.default";

/// Opaque bearer token returned by the identity provider
///
/// Owned by a single pipeline run; never persisted or reused.
#[derive(Clone)]
pub struct AccessToken(String);

impl AccessToken {
    pub(crate) fn new(token: String) -> Self {
        Self(token)
    }

    /// The raw token string, for use in an `Authorization: Bearer` header
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the provider returned an empty token
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Redact the secret from debug output and logs.
impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Token endpoint response format
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Exchange application credentials for a bearer token
///
/// Performs a fresh client-credentials grant on every call; there is no
/// token cache and no refresh handling.
///
/// # Errors
///
/// Returns [`Error::Auth`] on transport failure, a non-2xx response
/// (the message includes status and response body), or a body without an
/// `access_token` field.
pub async fn acquire_token(client: &reqwest::Client, config: &Config) -> Result<AccessToken> {
    let params = [
        ("client_id", config.client_id.as_str()),
        ("client_secret", config.client_secret.as_str()),
        ("grant_type", "client_credentials"),
        ("scope", GRAPH_DEFAULT_SCOPE),
    ];

    let response = client
        .post(config.token_url())
        .form(&params)
        .send()
        .await
        .map_err(|e| Error::Auth(format!("request to token endpoint failed: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Auth(format!("HTTP {}: {}", status, body)));
    }

    let token: TokenResponse = response
        .json()
        .await
        .map_err(|e| Error::Auth(format!("invalid token response: {}", e)))?;

    Ok(AccessToken::new(token.access_token))
}
