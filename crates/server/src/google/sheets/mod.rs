//! Google Sheets datastore adapter.
//!
//! The spreadsheet is the only persistent store: catalog items are rows on
//! the "Catalogo" sheet, homepage content lives in fixed cell ranges on
//! "Inicio". Authentication uses a service-account JWT grant, independent of
//! any signed-in admin.
//!
//! # Row identity
//!
//! Catalog rows are addressed by 1-based position, which is also the
//! mutation key. Deleting a row shifts all later rows down, so indices from
//! a previous read become stale after any mutation - callers must refetch.

pub mod auth;
pub mod catalog;
pub mod client;
pub mod home;

pub use client::SheetsClient;

use thiserror::Error;

/// Errors that can occur when talking to the Sheets API.
#[derive(Debug, Error)]
pub enum SheetsError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status.
    #[error("Sheets API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The service-account key could not be used to sign the JWT grant.
    #[error("Service account credentials error: {0}")]
    Credentials(String),

    /// The token grant was rejected.
    #[error("Service account token grant failed: {0}")]
    Auth(String),

    /// The spreadsheet has no sheet to operate on.
    #[error("Sheet not found: {0}")]
    MissingSheet(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheets_error_display() {
        let err = SheetsError::Api {
            status: 429,
            message: "Quota exceeded".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Sheets API error (HTTP 429): Quota exceeded"
        );

        let err = SheetsError::MissingSheet("Catalogo".to_string());
        assert_eq!(err.to_string(), "Sheet not found: Catalogo");
    }
}
