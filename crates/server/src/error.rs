//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures upstream failures to
//! Sentry before responding to the client with a JSON body. All route
//! handlers return `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::google::drive::DriveError;
use crate::google::oauth::OAuthError;
use crate::google::sheets::SheetsError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Sheets API operation failed.
    #[error("Sheets error: {0}")]
    Sheets(#[from] SheetsError),

    /// Drive API operation failed.
    #[error("Drive error: {0}")]
    Drive(DriveError),

    /// Bad request from client, with a user-facing message.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Missing or invalid session.
    #[error("Unauthorized")]
    Unauthorized,

    /// The OAuth token lacks a required permission; a full re-login fixes it.
    #[error("Insufficient scope: {0}")]
    Scope(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DriveError> for AppError {
    fn from(err: DriveError) -> Self {
        match err {
            DriveError::InvalidFileType(_) => Self::Validation(
                "Tipo de archivo no válido. Solo se permiten imágenes (JPEG, PNG, GIF, WebP)"
                    .to_string(),
            ),
            DriveError::FileTooLarge { .. } => Self::Validation(
                "El archivo es demasiado grande. Tamaño máximo: 10MB".to_string(),
            ),
            DriveError::Unauthorized => Self::Unauthorized,
            DriveError::InsufficientScope => Self::Scope(
                "Por favor, cierra sesión y vuelve a iniciar sesión para otorgar permisos de Google Drive."
                    .to_string(),
            ),
            other => Self::Drive(other),
        }
    }
}

impl From<OAuthError> for AppError {
    fn from(err: OAuthError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Sheets(_) | Self::Drive(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Sheets(_) | Self::Drive(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Scope(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };

        // Don't expose upstream error details to clients
        let body = match &self {
            Self::Sheets(_) | Self::Drive(_) | Self::Internal(_) => {
                json!({ "error": "Error interno del servidor" })
            }
            Self::Validation(message) => json!({ "error": message }),
            Self::Unauthorized => json!({ "error": "No autorizado" }),
            Self::Scope(message) => json!({ "error": message, "requiresReauth": true }),
            Self::NotFound(message) => json!({ "error": message }),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            get_status(AppError::Validation("bad".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(get_status(AppError::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(
            get_status(AppError::Scope("re-login".to_string())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            get_status(AppError::NotFound("item".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Internal("boom".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_errors_map_from_drive() {
        let err: AppError = DriveError::FileTooLarge { size: 99 }.into();
        assert!(matches!(err, AppError::Validation(_)));

        let err: AppError = DriveError::InvalidFileType("text/html".to_string()).into();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_scope_error_maps_from_drive() {
        let err: AppError = DriveError::InsufficientScope.into();
        assert!(matches!(err, AppError::Scope(_)));
        assert_eq!(get_status(err), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_drive_unauthorized_maps_to_401() {
        let err: AppError = DriveError::Unauthorized.into();
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[test]
    fn test_upstream_details_are_not_exposed() {
        let err = AppError::Internal("connection string leaked".to_string());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        // Body carries the generic message only; detail stays in the logs
    }
}
