//! Catalog CRUD route handlers.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use catalogo_core::RowIndex;

use super::MessageResponse;
use crate::error::Result;
use crate::google::drive::urls::extract_file_id;
use crate::middleware::RequireAuth;
use crate::models::{CatalogItem, NewCatalogItem, UpdateCatalogItem};
use crate::state::AppState;

/// `GET /api/catalog` - list all items. Public.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<CatalogItem>>> {
    Ok(Json(state.sheets().list_items().await?))
}

/// `POST /api/catalog` - append an item. Session required.
#[instrument(skip(_admin, state, item), fields(id = %item.id))]
pub async fn create(
    RequireAuth(_admin): RequireAuth,
    State(state): State<AppState>,
    Json(item): Json<NewCatalogItem>,
) -> Result<Json<MessageResponse>> {
    state.sheets().append_item(&item).await?;
    Ok(Json(MessageResponse::new("Ítem agregado correctamente")))
}

/// `PUT /api/catalog` - overwrite the row named in the payload. Session
/// required. Last writer wins.
#[instrument(skip(_admin, state, payload), fields(row_index = %payload.row_index))]
pub async fn update(
    RequireAuth(_admin): RequireAuth,
    State(state): State<AppState>,
    Json(payload): Json<UpdateCatalogItem>,
) -> Result<Json<MessageResponse>> {
    state
        .sheets()
        .update_item(payload.row_index, &payload.item)
        .await?;
    Ok(Json(MessageResponse::new("Ítem actualizado correctamente")))
}

/// Query parameters for `DELETE /api/catalog`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteParams {
    pub row_index: RowIndex,
}

/// `DELETE /api/catalog?rowIndex=N` - delete the row, then best-effort
/// delete its Drive image. Session required.
///
/// The image cascade never fails the request: once the row is gone the
/// operation has succeeded, and an orphaned Drive file is only logged.
#[instrument(skip(admin, state, params), fields(row_index = %params.row_index))]
pub async fn remove(
    RequireAuth(admin): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<DeleteParams>,
) -> Result<Json<MessageResponse>> {
    // Find the victim's image before the row disappears
    let items = state.sheets().list_items().await?;
    let file_id = items
        .iter()
        .find(|item| item.row_index == params.row_index)
        .and_then(|item| extract_file_id(&item.image));

    state.sheets().delete_item(params.row_index).await?;

    if let Some(file_id) = file_id {
        // Best-effort: DriveClient::delete logs and swallows failures
        state.drive().delete(&file_id, &admin.access_token).await;
    }

    Ok(Json(MessageResponse::new("Ítem eliminado correctamente")))
}
