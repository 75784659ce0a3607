//! Session-stored authentication state.
//!
//! The full token pair lives server-side in the session store. Handlers only
//! ever see [`CurrentAdmin`], which carries the access token but not the
//! refresh token.

use serde::{Deserialize, Serialize};

use catalogo_core::Email;

/// How close to expiry a token may get before a refresh is attempted.
pub const REFRESH_WINDOW_SECS: i64 = 5 * 60;

/// Default access-token lifetime when the provider omits `expires_in`.
pub const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 3600;

/// OAuth session state for a signed-in admin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminSession {
    /// Authenticated Google account email.
    pub email: Email,
    /// Bearer token for Google API calls on the admin's behalf.
    pub access_token: String,
    /// Refresh token; present when Google granted offline access.
    pub refresh_token: Option<String>,
    /// Unix timestamp (seconds) when `access_token` expires.
    pub expires_at: Option<i64>,
}

impl AdminSession {
    /// Whether the access token is unset, expired, or within the refresh
    /// window of expiring.
    ///
    /// Exactly one refresh attempt is made per request that observes this;
    /// a failed refresh leaves the session unchanged and the failure
    /// surfaces on the next privileged Google call.
    #[must_use]
    pub fn needs_refresh(&self, now: i64) -> bool {
        match self.expires_at {
            Some(expires_at) => expires_at < now + REFRESH_WINDOW_SECS,
            None => true,
        }
    }
}

/// The identity handed to route handlers after authentication.
///
/// Deliberately excludes the refresh token: it never leaves the session
/// store.
#[derive(Debug, Clone)]
pub struct CurrentAdmin {
    pub email: Email,
    pub access_token: String,
}

/// Session keys for authentication data.
pub mod session_keys {
    /// Key for the signed-in admin's token state.
    pub const ADMIN_SESSION: &str = "admin_session";

    /// Key for the OAuth `state` nonce during the login round-trip.
    pub const OAUTH_STATE: &str = "oauth_state";
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn session(expires_at: Option<i64>) -> AdminSession {
        AdminSession {
            email: Email::parse("admin@azurabeauty.mx").unwrap(),
            access_token: "ya29.test".to_string(),
            refresh_token: Some("1//refresh".to_string()),
            expires_at,
        }
    }

    #[test]
    fn test_fresh_token_needs_no_refresh() {
        let now = 1_700_000_000;
        // Expires 10 minutes out - comfortably past the 5 minute window
        assert!(!session(Some(now + 600)).needs_refresh(now));
    }

    #[test]
    fn test_near_expiry_token_needs_refresh() {
        let now = 1_700_000_000;
        // Expires 2 minutes out - inside the window
        assert!(session(Some(now + 120)).needs_refresh(now));
    }

    #[test]
    fn test_expired_token_needs_refresh() {
        let now = 1_700_000_000;
        assert!(session(Some(now - 1)).needs_refresh(now));
    }

    #[test]
    fn test_unset_expiry_needs_refresh() {
        let now = 1_700_000_000;
        assert!(session(None).needs_refresh(now));
    }

    #[test]
    fn test_window_boundary() {
        let now = 1_700_000_000;
        // Exactly at the window edge is still considered fresh
        assert!(!session(Some(now + REFRESH_WINDOW_SECS)).needs_refresh(now));
        assert!(session(Some(now + REFRESH_WINDOW_SECS - 1)).needs_refresh(now));
    }
}
