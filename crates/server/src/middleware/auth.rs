//! Authentication extractor for route handlers.
//!
//! `RequireAuth` loads the admin's session, transparently refreshing the
//! access token when it is within five minutes of expiring, and hands the
//! handler a [`CurrentAdmin`] carrying only the access token - the refresh
//! token stays in the session store.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use serde_json::json;
use tower_sessions::Session;

use crate::models::{AdminSession, CurrentAdmin, session_keys};
use crate::state::AppState;

/// Extractor that requires an authenticated admin.
///
/// API requests without a session get `401`; page requests are redirected
/// to the sign-in flow.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(admin): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hola, {}!", admin.email)
/// }
/// ```
pub struct RequireAuth(pub CurrentAdmin);

/// Error returned when authentication is required but missing.
pub enum AuthRejection {
    /// Redirect to the sign-in flow (for page requests).
    RedirectToLogin,
    /// 401 with a JSON body (for API requests).
    Unauthorized,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/auth/login").into_response(),
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "No autorizado" })),
            )
                .into_response(),
        }
    }
}

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or(AuthRejection::Unauthorized)?;

        let admin: AdminSession = session
            .get(session_keys::ADMIN_SESSION)
            .await
            .ok()
            .flatten()
            .ok_or_else(|| {
                let is_api = parts.uri.path().starts_with("/api/");
                if is_api {
                    AuthRejection::Unauthorized
                } else {
                    AuthRejection::RedirectToLogin
                }
            })?;

        let admin = refresh_if_needed(state, &session, admin).await;

        Ok(Self(CurrentAdmin {
            email: admin.email,
            access_token: admin.access_token,
        }))
    }
}

/// Refresh the access token when it is near expiry.
///
/// Exactly one refresh attempt per observing request; on failure the stale
/// session is returned unchanged and the next Google call surfaces the auth
/// error. Concurrent requests serialize on a per-session guard so only one
/// of them actually calls the token endpoint.
async fn refresh_if_needed(
    state: &AppState,
    session: &Session,
    stale: AdminSession,
) -> AdminSession {
    let now = Utc::now().timestamp();
    if !stale.needs_refresh(now) || stale.refresh_token.is_none() {
        return stale;
    }

    let key = session
        .id()
        .map_or_else(|| stale.email.to_string(), |id| id.to_string());
    let lock = state.refresh_lock(&key).await;
    let _guard = lock.lock().await;

    // Re-read under the guard: the racing request may have refreshed already
    let current: AdminSession = session
        .get(session_keys::ADMIN_SESSION)
        .await
        .ok()
        .flatten()
        .unwrap_or(stale);

    let now = Utc::now().timestamp();
    if !current.needs_refresh(now) {
        return current;
    }
    let Some(refresh_token) = current.refresh_token.clone() else {
        return current;
    };

    match state.oauth().refresh_access_token(&refresh_token).await {
        Ok(refreshed) => {
            let updated = AdminSession {
                access_token: refreshed.access_token,
                expires_at: Some(refreshed.expires_at),
                ..current
            };
            if let Err(e) = session.insert(session_keys::ADMIN_SESSION, &updated).await {
                tracing::warn!(error = %e, "Failed to persist refreshed token in session");
            }
            tracing::debug!(email = %updated.email, "Access token refreshed");
            updated
        }
        Err(e) => {
            // Leave the session unchanged; the next privileged call will
            // fail with an auth error and the admin must sign in again.
            tracing::warn!(error = %e, "Token refresh failed, keeping stale token");
            current
        }
    }
}

/// Helper to store the admin session after the OAuth callback.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_admin_session(
    session: &Session,
    admin: &AdminSession,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::ADMIN_SESSION, admin).await
}
