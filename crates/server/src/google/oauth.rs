//! Google OAuth client for admin sign-in.
//!
//! Handles the authorization-code flow and access-token refresh. Offline
//! access is requested so Google issues a refresh token; the Drive scope is
//! included so uploads can act on the admin's behalf.

use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;
use url::Url;

use catalogo_core::{Email, EmailError};

use crate::config::GoogleOAuthConfig;
use crate::models::session::DEFAULT_TOKEN_LIFETIME_SECS;

/// Google OAuth consent screen.
const AUTH_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
/// Google OAuth token endpoint (code exchange and refresh).
const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
/// OpenID Connect userinfo endpoint.
const USERINFO_ENDPOINT: &str = "https://openidconnect.googleapis.com/v1/userinfo";

/// Scopes requested at sign-in. `drive.file` limits Drive access to files
/// this application creates.
const OAUTH_SCOPES: &str = "openid email profile https://www.googleapis.com/auth/drive.file";

/// Errors from the OAuth flow.
#[derive(Debug, Error)]
pub enum OAuthError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The authorization code exchange was rejected.
    #[error("Code exchange failed: {0}")]
    ExchangeFailed(String),

    /// The refresh grant was rejected.
    #[error("Token refresh failed: {0}")]
    RefreshFailed(String),

    /// Google's userinfo response had no email claim.
    #[error("No email in userinfo response")]
    MissingEmail,

    /// The email claim did not parse.
    #[error("Invalid email in userinfo response: {0}")]
    InvalidEmail(#[from] EmailError),
}

/// Token pair obtained from a code exchange.
#[derive(Debug, Clone)]
pub struct TokenSet {
    pub access_token: String,
    /// Absent when Google decides not to re-issue one (e.g. repeat consent).
    pub refresh_token: Option<String>,
    /// Unix timestamp when the access token expires.
    pub expires_at: i64,
}

/// Replacement access token obtained from a refresh grant.
#[derive(Debug, Clone)]
pub struct RefreshedToken {
    pub access_token: String,
    pub expires_at: i64,
}

/// Response from Google's token endpoint.
#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    /// Token lifetime in seconds.
    #[serde(default)]
    expires_in: Option<i64>,
}

/// Error response from Google's token endpoint.
#[derive(Deserialize)]
struct TokenErrorResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

impl TokenErrorResponse {
    fn message(self) -> String {
        self.error_description
            .or(self.error)
            .unwrap_or_else(|| "Unknown error".to_string())
    }
}

/// Userinfo response (only the claim we use).
#[derive(Deserialize)]
struct UserInfo {
    #[serde(default)]
    email: Option<String>,
}

/// Google OAuth client.
#[derive(Clone)]
pub struct GoogleOAuth {
    client: reqwest::Client,
    client_id: String,
    client_secret: SecretString,
    redirect_uri: String,
}

impl std::fmt::Debug for GoogleOAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleOAuth")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("redirect_uri", &self.redirect_uri)
            .finish_non_exhaustive()
    }
}

impl GoogleOAuth {
    /// Create a new OAuth client.
    #[must_use]
    pub fn new(client: reqwest::Client, config: &GoogleOAuthConfig, redirect_uri: String) -> Self {
        Self {
            client,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_uri,
        }
    }

    /// Build the consent-screen URL for the given CSRF `state` nonce.
    ///
    /// `access_type=offline` + `prompt=consent` make Google issue a refresh
    /// token on every sign-in.
    ///
    /// # Panics
    ///
    /// Never panics in practice; the endpoint constant is a valid URL.
    #[must_use]
    pub fn authorize_url(&self, state: &str) -> String {
        let mut url = Url::parse(AUTH_ENDPOINT).expect("valid auth endpoint");
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("scope", OAUTH_SCOPES)
            .append_pair("access_type", "offline")
            .append_pair("prompt", "consent")
            .append_pair("state", state);
        url.into()
    }

    /// Exchange an authorization code for a token pair.
    ///
    /// # Errors
    ///
    /// Returns `OAuthError::ExchangeFailed` if Google rejects the code.
    #[instrument(skip(self, code))]
    pub async fn exchange_code(&self, code: &str) -> Result<TokenSet, OAuthError> {
        let now = Utc::now().timestamp();

        let response = self
            .client
            .post(TOKEN_ENDPOINT)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.expose_secret()),
                ("code", code),
                ("grant_type", "authorization_code"),
                ("redirect_uri", &self.redirect_uri),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let error: TokenErrorResponse =
                response.json().await.unwrap_or(TokenErrorResponse {
                    error: None,
                    error_description: None,
                });
            return Err(OAuthError::ExchangeFailed(error.message()));
        }

        let token: TokenResponse = response.json().await?;
        Ok(TokenSet {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            expires_at: now + token.expires_in.unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS),
        })
    }

    /// Obtain a fresh access token from a refresh token.
    ///
    /// Exactly one attempt; the caller decides what a failure means (leave
    /// the stale token in place and let the next privileged call fail).
    ///
    /// # Errors
    ///
    /// Returns `OAuthError::RefreshFailed` if Google rejects the grant.
    #[instrument(skip(self, refresh_token))]
    pub async fn refresh_access_token(
        &self,
        refresh_token: &str,
    ) -> Result<RefreshedToken, OAuthError> {
        let now = Utc::now().timestamp();

        let response = self
            .client
            .post(TOKEN_ENDPOINT)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.expose_secret()),
                ("refresh_token", refresh_token),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let error: TokenErrorResponse =
                response.json().await.unwrap_or(TokenErrorResponse {
                    error: None,
                    error_description: None,
                });
            return Err(OAuthError::RefreshFailed(error.message()));
        }

        let token: TokenResponse = response.json().await?;
        Ok(RefreshedToken {
            access_token: token.access_token,
            expires_at: now + token.expires_in.unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS),
        })
    }

    /// Fetch the authenticated user's email from the userinfo endpoint.
    ///
    /// # Errors
    ///
    /// Returns `OAuthError::MissingEmail` if the response carries no email
    /// claim.
    #[instrument(skip(self, access_token))]
    pub async fn fetch_email(&self, access_token: &str) -> Result<Email, OAuthError> {
        let info: UserInfo = self
            .client
            .get(USERINFO_ENDPOINT)
            .bearer_auth(access_token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let email = info.email.ok_or(OAuthError::MissingEmail)?;
        Ok(Email::parse(&email)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client() -> GoogleOAuth {
        GoogleOAuth {
            client: reqwest::Client::new(),
            client_id: "client-id-123".to_string(),
            client_secret: SecretString::from("shhh"),
            redirect_uri: "https://catalogo.example.mx/auth/callback".to_string(),
        }
    }

    #[test]
    fn test_authorize_url_requests_offline_access() {
        let url = client().authorize_url("nonce-abc");
        let parsed = Url::parse(&url).unwrap();
        let pairs: std::collections::HashMap<_, _> = parsed.query_pairs().collect();

        assert_eq!(parsed.host_str(), Some("accounts.google.com"));
        assert_eq!(pairs["access_type"], "offline");
        assert_eq!(pairs["prompt"], "consent");
        assert_eq!(pairs["state"], "nonce-abc");
        assert!(pairs["scope"].contains("drive.file"));
    }

    #[test]
    fn test_token_error_prefers_description() {
        let error = TokenErrorResponse {
            error: Some("invalid_grant".to_string()),
            error_description: Some("Token has been revoked".to_string()),
        };
        assert_eq!(error.message(), "Token has been revoked");

        let bare = TokenErrorResponse {
            error: Some("invalid_grant".to_string()),
            error_description: None,
        };
        assert_eq!(bare.message(), "invalid_grant");
    }

    #[test]
    fn test_debug_redacts_client_secret() {
        let debug_output = format!("{:?}", client());
        assert!(debug_output.contains("client-id-123"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("shhh"));
    }
}
