//! Drive upload/delete operations.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;
use tracing::{instrument, warn};

use super::DriveError;
use super::urls::thumbnail_url;

/// Multipart upload endpoint.
const UPLOAD_ENDPOINT: &str =
    "https://www.googleapis.com/upload/drive/v3/files?uploadType=multipart";

/// Files endpoint (permissions, deletion).
const FILES_ENDPOINT: &str = "https://www.googleapis.com/drive/v3/files";

/// Maximum accepted upload size (10 MiB).
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Accepted image MIME types.
const ALLOWED_IMAGE_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

/// Multipart boundary for `multipart/related` upload bodies.
const UPLOAD_BOUNDARY: &str = "catalogo_upload_boundary";

/// A file stored in Drive, referenced by its thumbnail URL.
#[derive(Debug, Clone)]
pub struct DriveFile {
    /// Drive file id.
    pub id: String,
    /// Thumbnail-service URL for reliable inline embedding.
    pub public_url: String,
}

/// Metadata subset of a created file.
#[derive(Deserialize)]
struct CreatedFile {
    id: String,
}

/// Whether the MIME type is an accepted image type.
#[must_use]
pub fn is_valid_image_type(mime_type: &str) -> bool {
    ALLOWED_IMAGE_TYPES.contains(&mime_type)
}

/// Validate an upload before any network call.
///
/// # Errors
///
/// Returns `DriveError::InvalidFileType` or `DriveError::FileTooLarge`.
pub fn validate_upload(size: usize, mime_type: &str) -> Result<(), DriveError> {
    if !is_valid_image_type(mime_type) {
        return Err(DriveError::InvalidFileType(mime_type.to_string()));
    }
    if size > MAX_FILE_SIZE {
        return Err(DriveError::FileTooLarge { size });
    }
    Ok(())
}

/// Google Drive API client.
///
/// Holds no credentials of its own: every call takes the signed-in admin's
/// access token.
#[derive(Clone)]
pub struct DriveClient {
    inner: Arc<DriveClientInner>,
}

struct DriveClientInner {
    http: reqwest::Client,
    /// Target folder for uploads; Drive root when unset.
    folder_id: Option<String>,
}

impl std::fmt::Debug for DriveClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DriveClient")
            .field("folder_id", &self.inner.folder_id)
            .finish_non_exhaustive()
    }
}

impl DriveClient {
    /// Create a new Drive client.
    #[must_use]
    pub fn new(http: reqwest::Client, folder_id: Option<String>) -> Self {
        Self {
            inner: Arc::new(DriveClientInner { http, folder_id }),
        }
    }

    /// Upload an image and make it publicly readable.
    ///
    /// Validates type and size before touching the network. On success the
    /// file has an anyone-with-link reader permission (an already-existing
    /// permission is fine) and is referenced by its thumbnail URL.
    ///
    /// # Errors
    ///
    /// Returns `DriveError::InvalidFileType` / `FileTooLarge` on validation
    /// failure, `Unauthorized` / `InsufficientScope` on token problems, and
    /// `Api` for other upstream failures.
    #[instrument(skip(self, bytes, access_token), fields(filename = %filename, size = bytes.len()))]
    pub async fn upload(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        mime_type: &str,
        access_token: &str,
    ) -> Result<DriveFile, DriveError> {
        validate_upload(bytes.len(), mime_type)?;

        let metadata = match &self.inner.folder_id {
            Some(folder) => json!({ "name": filename, "parents": [folder] }),
            None => json!({ "name": filename }),
        };

        let response = self
            .inner
            .http
            .post(UPLOAD_ENDPOINT)
            .bearer_auth(access_token)
            .header(
                reqwest::header::CONTENT_TYPE,
                format!("multipart/related; boundary={UPLOAD_BOUNDARY}"),
            )
            .body(multipart_related_body(&metadata, mime_type, &bytes))
            .send()
            .await?;

        let created: CreatedFile = Self::check(response).await?.json().await?;

        // Public read permission; 409 means it already exists, which is fine
        self.create_public_permission(&created.id, access_token)
            .await;

        Ok(DriveFile {
            public_url: thumbnail_url(&created.id),
            id: created.id,
        })
    }

    /// Grant the anyone-with-link reader permission, swallowing failures.
    async fn create_public_permission(&self, file_id: &str, access_token: &str) {
        let result = self
            .inner
            .http
            .post(format!("{FILES_ENDPOINT}/{file_id}/permissions"))
            .bearer_auth(access_token)
            .json(&json!({ "role": "reader", "type": "anyone" }))
            .send()
            .await;

        match result {
            Ok(response) => {
                let status = response.status();
                if !status.is_success() && status != reqwest::StatusCode::CONFLICT {
                    warn!(%file_id, %status, "Could not set public permission on uploaded file");
                }
            }
            Err(e) => {
                warn!(%file_id, error = %e, "Could not set public permission on uploaded file");
            }
        }
    }

    /// Delete a file, best-effort.
    ///
    /// Failures are logged and swallowed: a missing Drive file must never
    /// block the spreadsheet row deletion that triggered the cascade.
    #[instrument(skip(self, access_token))]
    pub async fn delete(&self, file_id: &str, access_token: &str) {
        let result = self
            .inner
            .http
            .delete(format!("{FILES_ENDPOINT}/{file_id}"))
            .bearer_auth(access_token)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                tracing::debug!(%file_id, "Deleted file from Drive");
            }
            Ok(response) => {
                warn!(%file_id, status = %response.status(), "Failed to delete file from Drive");
            }
            Err(e) => {
                warn!(%file_id, error = %e, "Failed to delete file from Drive");
            }
        }
    }

    /// Map non-success statuses to the Drive error taxonomy.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, DriveError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(DriveError::Unauthorized);
        }

        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        if status == reqwest::StatusCode::FORBIDDEN
            && message.contains("insufficient authentication scopes")
        {
            return Err(DriveError::InsufficientScope);
        }

        Err(DriveError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// Build a `multipart/related` body: JSON metadata part + media part.
fn multipart_related_body(
    metadata: &serde_json::Value,
    mime_type: &str,
    bytes: &[u8],
) -> Vec<u8> {
    let mut body = Vec::with_capacity(bytes.len() + 512);
    body.extend_from_slice(
        format!(
            "--{UPLOAD_BOUNDARY}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{metadata}\r\n--{UPLOAD_BOUNDARY}\r\nContent-Type: {mime_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{UPLOAD_BOUNDARY}--").as_bytes());
    body
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_image_types() {
        assert!(is_valid_image_type("image/jpeg"));
        assert!(is_valid_image_type("image/png"));
        assert!(is_valid_image_type("image/webp"));
        assert!(!is_valid_image_type("image/svg+xml"));
        assert!(!is_valid_image_type("application/pdf"));
        assert!(!is_valid_image_type(""));
    }

    #[test]
    fn test_oversized_upload_rejected_before_network() {
        // 15 MB JPEG
        let result = validate_upload(15 * 1024 * 1024, "image/jpeg");
        assert!(matches!(result, Err(DriveError::FileTooLarge { .. })));
    }

    #[test]
    fn test_small_png_passes_validation() {
        assert!(validate_upload(1024 * 1024, "image/png").is_ok());
        // Exactly at the limit is accepted
        assert!(validate_upload(MAX_FILE_SIZE, "image/png").is_ok());
    }

    #[test]
    fn test_invalid_type_rejected_regardless_of_size() {
        let result = validate_upload(10, "text/html");
        assert!(matches!(result, Err(DriveError::InvalidFileType(_))));
    }

    #[test]
    fn test_public_url_shape() {
        let file = DriveFile {
            id: "abc123".to_string(),
            public_url: thumbnail_url("abc123"),
        };
        assert_eq!(
            file.public_url,
            "https://drive.google.com/thumbnail?id=abc123&sz=w1000"
        );
    }

    #[test]
    fn test_multipart_related_body_layout() {
        let body = multipart_related_body(&json!({"name": "foto.png"}), "image/png", b"PNGDATA");
        let text = String::from_utf8_lossy(&body);

        assert!(text.starts_with(&format!("--{UPLOAD_BOUNDARY}\r\n")));
        assert!(text.contains(r#"{"name":"foto.png"}"#));
        assert!(text.contains("Content-Type: image/png"));
        assert!(text.contains("PNGDATA"));
        assert!(text.ends_with(&format!("\r\n--{UPLOAD_BOUNDARY}--")));
    }
}
