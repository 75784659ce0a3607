//! Service-account authentication for the Sheets API.
//!
//! Signs an RS256 JWT assertion with the service account's private key and
//! exchanges it for a short-lived bearer token.

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::SheetsError;
use crate::config::ServiceAccountConfig;

/// Google OAuth token endpoint.
const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";

/// Grant type for service-account JWT assertions.
const JWT_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Scopes granted to the service account: spreadsheet access plus
/// application-created Drive files.
const SERVICE_SCOPES: &str =
    "https://www.googleapis.com/auth/spreadsheets https://www.googleapis.com/auth/drive.file";

/// Assertion lifetime in seconds (the maximum Google accepts).
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Bearer token obtained from a service-account grant.
#[derive(Debug, Clone)]
pub struct ServiceToken {
    /// Bearer token for Sheets API requests.
    pub access_token: SecretString,
    /// Unix timestamp when the token expires.
    pub expires_at: i64,
}

impl ServiceToken {
    /// Check if the token will expire within the given number of seconds.
    #[must_use]
    pub fn expires_within(&self, seconds: i64) -> bool {
        Utc::now().timestamp() >= self.expires_at - seconds
    }

    /// Check if the token has expired (with a 60 second safety buffer).
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_within(60)
    }
}

/// JWT claims for the assertion.
#[derive(Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

/// Response from the token endpoint.
#[derive(Deserialize)]
struct GrantResponse {
    access_token: String,
    /// Token lifetime in seconds.
    expires_in: i64,
}

/// Obtain a bearer token for the configured service account.
///
/// # Errors
///
/// Returns `SheetsError::Credentials` if the private key is not a valid RSA
/// PEM, and `SheetsError::Auth` if the grant is rejected.
#[instrument(skip(client, credentials), fields(client_email = %credentials.client_email))]
pub async fn fetch_token(
    client: &reqwest::Client,
    credentials: &ServiceAccountConfig,
) -> Result<ServiceToken, SheetsError> {
    let now = Utc::now().timestamp();

    let key = EncodingKey::from_rsa_pem(credentials.private_key.expose_secret().as_bytes())
        .map_err(|e| SheetsError::Credentials(e.to_string()))?;

    let claims = Claims {
        iss: &credentials.client_email,
        scope: SERVICE_SCOPES,
        aud: TOKEN_ENDPOINT,
        iat: now,
        exp: now + ASSERTION_LIFETIME_SECS,
    };

    let assertion = jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &key)
        .map_err(|e| SheetsError::Credentials(e.to_string()))?;

    let response = client
        .post(TOKEN_ENDPOINT)
        .form(&[
            ("grant_type", JWT_GRANT_TYPE),
            ("assertion", assertion.as_str()),
        ])
        .send()
        .await?;

    if !response.status().is_success() {
        let detail = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(SheetsError::Auth(detail));
    }

    let grant: GrantResponse = response.json().await?;

    Ok(ServiceToken {
        access_token: SecretString::from(grant.access_token),
        expires_at: now + grant.expires_in,
    })
}
