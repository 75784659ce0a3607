//! Homepage content route handlers.

use axum::{Json, extract::State};
use tracing::instrument;

use super::MessageResponse;
use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::HomeContent;
use crate::state::AppState;

/// `GET /api/home` - the homepage content. Public.
///
/// Never fails: blocks missing from the sheet come back as hardcoded
/// defaults so the storefront always has something to render.
#[instrument(skip(state))]
pub async fn get_content(State(state): State<AppState>) -> Json<HomeContent> {
    Json(state.sheets().get_home_content().await)
}

/// `PUT /api/home` - overwrite the homepage content ranges. Session
/// required. Accepts a subset; omitted blocks are written out empty and
/// fall back to defaults on the next read.
#[instrument(skip(_admin, state, content))]
pub async fn update_content(
    RequireAuth(_admin): RequireAuth,
    State(state): State<AppState>,
    Json(content): Json<HomeContent>,
) -> Result<Json<MessageResponse>> {
    state.sheets().update_home_content(&content).await?;
    Ok(Json(MessageResponse::new(
        "Contenido del inicio actualizado correctamente",
    )))
}
