//! Google Drive image storage adapter.
//!
//! Uploads act on the signed-in admin's behalf using the session's OAuth
//! access token (scope `drive.file`). Uploaded images are made readable by
//! anyone with the link and are referenced through Drive's thumbnail
//! service, which embeds reliably where the raw file links do not.

pub mod client;
pub mod urls;

pub use client::{DriveClient, DriveFile};

use thiserror::Error;

/// Errors that can occur when interacting with the Drive API.
#[derive(Debug, Error)]
pub enum DriveError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The file's MIME type is not an accepted image type.
    #[error("Invalid file type: {0}")]
    InvalidFileType(String),

    /// The file exceeds the upload size limit.
    #[error("File too large: {size} bytes")]
    FileTooLarge { size: usize },

    /// The access token was rejected (expired or revoked).
    #[error("Drive rejected the access token")]
    Unauthorized,

    /// The token lacks the Drive scope; a full re-login is required.
    #[error("Access token lacks the required Drive scope")]
    InsufficientScope,

    /// The API returned some other non-success status.
    #[error("Drive API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },
}
