//! Image upload route handler.

use axum::{Json, extract::Multipart, extract::State};
use serde::Serialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Response for a successful upload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    /// Thumbnail-service URL ready for the item's `image` field.
    pub url: String,
    pub file_id: String,
}

/// `POST /api/upload` - upload an image to Drive. Session required.
///
/// Expects a multipart body with a `file` field. Validation (type, size)
/// happens before any Drive call; a token without the Drive scope yields
/// `403` with `requiresReauth` so the client can prompt a full re-login.
#[instrument(skip(state, admin, multipart), fields(email = %admin.email))]
pub async fn upload(
    RequireAuth(admin): RequireAuth,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    if admin.access_token.is_empty() {
        return Err(AppError::Unauthorized);
    }

    let mut file: Option<(String, String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.to_string()))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("imagen").to_string();
            let mime_type = field.content_type().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(e.to_string()))?
                .to_vec();
            file = Some((filename, mime_type, bytes));
            break;
        }
    }

    let Some((filename, mime_type, bytes)) = file else {
        return Err(AppError::Validation(
            "No se proporcionó ningún archivo".to_string(),
        ));
    };

    let stored = state
        .drive()
        .upload(bytes, &filename, &mime_type, &admin.access_token)
        .await?;

    Ok(Json(UploadResponse {
        success: true,
        url: stored.public_url,
        file_id: stored.id,
    }))
}
