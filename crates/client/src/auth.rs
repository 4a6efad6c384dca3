//! OAuth client-credentials token exchange.

use reqwest::StatusCode;
use serde::Deserialize;
use soldrank_core::{Credentials, Error, Result};
use std::fmt;
use tracing::{debug, info};

/// Bearer token returned by the token endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    token: String,
    /// Lifetime in seconds, if the endpoint reported one.
    pub expires_in: Option<u64>,
}

impl AccessToken {
    /// Raw token value for the `Authorization: Bearer` header.
    pub fn secret(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// Exchange client credentials for an application access token.
///
/// Anything other than HTTP 200 is reported as [`Error::Auth`].
pub async fn fetch_access_token(
    http: &reqwest::Client,
    token_url: &str,
    credentials: &Credentials,
    scope: &str,
) -> Result<AccessToken> {
    debug!(token_url, scope, "requesting access token");

    let response = http
        .post(token_url)
        .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
        .form(&[("grant_type", "client_credentials"), ("scope", scope)])
        .send()
        .await
        .map_err(|e| Error::transport(format!("token request to {token_url} failed: {e}")))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| Error::transport(format!("reading token response failed: {e}")))?;

    if status != StatusCode::OK {
        return Err(Error::auth(status.as_u16(), body));
    }

    let parsed: TokenResponse = serde_json::from_str(&body)?;
    info!(expires_in = ?parsed.expires_in, "access token acquired");

    Ok(AccessToken {
        token: parsed.access_token,
        expires_in: parsed.expires_in,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stub::StubServer;

    fn credentials() -> Credentials {
        Credentials::new("id", "secret")
    }

    #[tokio::test]
    async fn test_token_exchange_success() {
        let server = StubServer::start(vec![(
            200,
            r#"{"access_token":"tok-123","expires_in":7200,"token_type":"Application Access Token"}"#
                .to_string(),
        )])
        .await;
        let http = reqwest::Client::new();

        let token = fetch_access_token(&http, &server.url("/token"), &credentials(), "scope-a")
            .await
            .unwrap();

        assert_eq!(token.secret(), "tok-123");
        assert_eq!(token.expires_in, Some(7200));

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        let req = requests[0].to_ascii_lowercase();
        assert!(req.starts_with("post /token "));
        assert!(req.contains("authorization: basic awq6c2vjcmv0"));
        assert!(req.contains("grant_type=client_credentials"));
        assert!(req.contains("scope=scope-a"));
    }

    #[tokio::test]
    async fn test_token_exchange_rejected() {
        let server = StubServer::start(vec![(401, r#"{"error":"invalid_client"}"#.to_string())]).await;
        let http = reqwest::Client::new();

        let err = fetch_access_token(&http, &server.url("/token"), &credentials(), "s")
            .await
            .unwrap_err();

        match err {
            Error::Auth { status, body } => {
                assert_eq!(status, 401);
                assert!(body.contains("invalid_client"));
            }
            other => panic!("expected auth error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_token_response_without_token_is_json_error() {
        let server = StubServer::start(vec![(200, "{}".to_string())]).await;
        let http = reqwest::Client::new();

        let err = fetch_access_token(&http, &server.url("/token"), &credentials(), "s")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_token_debug_redacted() {
        let token = AccessToken {
            token: "very-secret".to_string(),
            expires_in: None,
        };
        assert!(!format!("{token:?}").contains("very-secret"));
    }
}
