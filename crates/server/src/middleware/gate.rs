//! Admin allow-list gate.
//!
//! Route-layer middleware for the `/admin` path space. The same allow-list
//! check also runs inside the OAuth callback; the two layers deny
//! independently so neither is load-bearing alone.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::{AdminSession, session_keys};
use crate::state::AppState;

/// Deny access to admins that are not on the allow-list.
///
/// - No session: redirect to sign-in.
/// - Session with an email that is not allowed: destroy the session and
///   redirect to sign-in (force sign-out).
pub async fn require_allowed_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(session) = request.extensions().get::<Session>().cloned() else {
        return Redirect::to("/auth/login").into_response();
    };

    let admin: Option<AdminSession> = session
        .get(session_keys::ADMIN_SESSION)
        .await
        .ok()
        .flatten();

    match admin {
        None => Redirect::to("/auth/login").into_response(),
        Some(admin) if !state.config().allow_list.allows(admin.email.as_str()) => {
            tracing::warn!(email = %admin.email, "Admin email not on allow-list, forcing sign-out");
            if let Err(e) = session.flush().await {
                tracing::warn!(error = %e, "Failed to destroy disallowed session");
            }
            Redirect::to("/auth/login").into_response()
        }
        Some(_) => next.run(request).await,
    }
}
