//! Google OAuth sign-in route handlers.
//!
//! The allow-list check here is the second layer of the dual gate: even if
//! the `/admin` path gate were bypassed, a disallowed email never gets a
//! session in the first place.

use axum::{
    extract::{Query, State},
    response::Redirect,
};
use rand::{Rng, distr::Alphanumeric};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::auth::set_admin_session;
use crate::models::{AdminSession, session_keys};
use crate::state::AppState;

/// `GET /auth/login` - redirect to Google's consent screen with a fresh
/// CSRF nonce stored in the session.
#[instrument(skip(state, session))]
pub async fn login(State(state): State<AppState>, session: Session) -> Result<Redirect> {
    let nonce: String = rand::rng()
        .sample_iter(Alphanumeric)
        .take(32)
        .map(char::from)
        .collect();

    session
        .insert(session_keys::OAUTH_STATE, &nonce)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Redirect::to(&state.oauth().authorize_url(&nonce)))
}

/// Query parameters Google appends to the callback redirect.
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// `GET /auth/callback` - exchange the code, check the allow-list, create
/// the session.
///
/// Every denial path lands back on the public homepage without a session.
#[instrument(skip(state, session, params))]
pub async fn callback(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<CallbackParams>,
) -> Result<Redirect> {
    if let Some(error) = params.error {
        tracing::warn!(%error, "OAuth consent denied or failed");
        return Ok(Redirect::to("/"));
    }

    let (Some(code), Some(returned_state)) = (params.code, params.state) else {
        return Ok(Redirect::to("/"));
    };

    let expected: Option<String> = session
        .remove(session_keys::OAUTH_STATE)
        .await
        .ok()
        .flatten();
    if expected.as_deref() != Some(returned_state.as_str()) {
        tracing::warn!("OAuth state mismatch, rejecting callback");
        return Ok(Redirect::to("/"));
    }

    let tokens = state.oauth().exchange_code(&code).await?;
    let email = state.oauth().fetch_email(&tokens.access_token).await?;

    // Sign-in layer of the allow-list gate: no session for strangers
    if !state.config().allow_list.allows(email.as_str()) {
        tracing::warn!(email = %email, "Sign-in rejected: email not on allow-list");
        if let Err(e) = session.flush().await {
            tracing::warn!(error = %e, "Failed to flush rejected session");
        }
        return Ok(Redirect::to("/"));
    }

    set_admin_session(
        &session,
        &AdminSession {
            email,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            expires_at: Some(tokens.expires_at),
        },
    )
    .await
    .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Redirect::to("/admin"))
}

/// `GET /auth/logout` - destroy the session.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Redirect {
    if let Err(e) = session.flush().await {
        tracing::warn!(error = %e, "Failed to destroy session on logout");
    }
    Redirect::to("/")
}
