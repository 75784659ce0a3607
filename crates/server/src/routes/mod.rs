//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health              - Liveness check
//!
//! # Public storefront data
//! GET    /api/catalog         - List catalog items
//! GET    /api/home            - Homepage content (defaults when unset)
//!
//! # Admin mutations (session required)
//! POST   /api/catalog         - Append an item
//! PUT    /api/catalog         - Overwrite an item row
//! DELETE /api/catalog?rowIndex=N - Delete a row (+ best-effort image cascade)
//! PUT    /api/home            - Overwrite homepage content
//! POST   /api/upload          - Upload an image to Drive
//!
//! # Auth (Google OAuth)
//! GET    /auth/login          - Redirect to the consent screen
//! GET    /auth/callback       - Code exchange + allow-list check
//! GET    /auth/logout         - Destroy the session
//!
//! # Admin pages (allow-list gated)
//! GET    /admin               - Admin panel shell
//! ```

pub mod auth;
pub mod catalog;
pub mod home;
pub mod upload;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use serde::Serialize;

use crate::middleware::gate;
use crate::state::AppState;

/// Uploads may reach 10 MiB; leave headroom for the multipart envelope.
const UPLOAD_BODY_LIMIT: usize = 12 * 1024 * 1024;

/// Generic `{ "message": ... }` response for successful mutations.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub(crate) fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let admin_pages = Router::new()
        .route("/admin", get(admin_index))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            gate::require_allowed_admin,
        ));

    Router::new()
        .route("/health", get(health))
        .route(
            "/api/catalog",
            get(catalog::list)
                .post(catalog::create)
                .put(catalog::update)
                .delete(catalog::remove),
        )
        .route("/api/home", get(home::get_content).put(home::update_content))
        .route(
            "/api/upload",
            post(upload::upload).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/auth/login", get(auth::login))
        .route("/auth/callback", get(auth::callback))
        .route("/auth/logout", get(auth::logout))
        .merge(admin_pages)
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Admin panel shell.
///
/// The panel itself is a client-side app talking to the JSON API; this
/// route exists so the allow-list gate has a protected page to cover.
async fn admin_index() -> &'static str {
    "Panel de administración"
}
