//! Sheets REST transport.
//!
//! Thin wrapper over the `spreadsheets.values` and `spreadsheets.batchUpdate`
//! endpoints. The service-account token is cached in memory and refreshed
//! when close to expiring.

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::json;
use tokio::sync::RwLock;
use tracing::instrument;

use super::SheetsError;
use super::auth::{ServiceToken, fetch_token};
use crate::config::ServiceAccountConfig;

/// Sheets API base URL.
const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Google Sheets API client for one spreadsheet.
///
/// Cheaply cloneable via `Arc`. The bearer token is lazily fetched on first
/// use and refreshed when within 60 seconds of expiry.
#[derive(Clone)]
pub struct SheetsClient {
    inner: Arc<SheetsClientInner>,
}

struct SheetsClientInner {
    http: reqwest::Client,
    spreadsheet_id: String,
    credentials: ServiceAccountConfig,
    /// In-memory token cache
    token: RwLock<Option<ServiceToken>>,
}

/// A single range of values.
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Option<Vec<Vec<String>>>,
}

/// Response from `values:batchGet`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatchGetResponse {
    #[serde(default)]
    value_ranges: Vec<ValueRange>,
}

/// Spreadsheet metadata (sheet list only).
#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetMeta>,
}

#[derive(Debug, Deserialize)]
struct SheetMeta {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SheetProperties {
    sheet_id: i64,
    title: String,
}

/// Error payload returned by Google APIs.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: String,
}

impl SheetsClient {
    /// Create a client for the given spreadsheet.
    #[must_use]
    pub fn new(
        http: reqwest::Client,
        spreadsheet_id: String,
        credentials: ServiceAccountConfig,
    ) -> Self {
        Self {
            inner: Arc::new(SheetsClientInner {
                http,
                spreadsheet_id,
                credentials,
                token: RwLock::new(None),
            }),
        }
    }

    /// Get a valid bearer token, fetching or refreshing as needed.
    async fn bearer(&self) -> Result<String, SheetsError> {
        if let Some(token) = self.inner.token.read().await.as_ref()
            && !token.is_expired()
        {
            return Ok(token.access_token.expose_secret().to_string());
        }

        // Re-check under the write lock: a concurrent request may have
        // refreshed while we waited.
        let mut guard = self.inner.token.write().await;
        if let Some(token) = guard.as_ref()
            && !token.is_expired()
        {
            return Ok(token.access_token.expose_secret().to_string());
        }

        let token = fetch_token(&self.inner.http, &self.inner.credentials).await?;
        let access_token = token.access_token.expose_secret().to_string();
        *guard = Some(token);
        Ok(access_token)
    }

    fn url(&self, suffix: &str) -> String {
        format!("{SHEETS_API_BASE}/{}{suffix}", self.inner.spreadsheet_id)
    }

    /// Convert a non-success response into `SheetsError::Api`.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, SheetsError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .json::<ApiErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error)
            .map_or_else(|| "Unknown error".to_string(), |detail| detail.message);
        Err(SheetsError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Read a single value range. An empty range yields an empty vec.
    #[instrument(skip(self))]
    pub async fn get_values(&self, range: &str) -> Result<Vec<Vec<String>>, SheetsError> {
        let bearer = self.bearer().await?;
        let response = self
            .inner
            .http
            .get(self.url(&format!("/values/{range}")))
            .bearer_auth(bearer)
            .send()
            .await?;

        let range: ValueRange = Self::check(response).await?.json().await?;
        Ok(range.values.unwrap_or_default())
    }

    /// Read several ranges in one call. Ranges with no data come back as
    /// `None`, preserving positional correspondence with the request.
    #[instrument(skip(self))]
    pub async fn batch_get(
        &self,
        ranges: &[&str],
    ) -> Result<Vec<Option<Vec<Vec<String>>>>, SheetsError> {
        let bearer = self.bearer().await?;
        let query: Vec<(&str, &str)> = ranges.iter().map(|r| ("ranges", *r)).collect();
        let response = self
            .inner
            .http
            .get(self.url("/values:batchGet"))
            .query(&query)
            .bearer_auth(bearer)
            .send()
            .await?;

        let batch: BatchGetResponse = Self::check(response).await?.json().await?;
        Ok(batch.value_ranges.into_iter().map(|r| r.values).collect())
    }

    /// Append one row at the end of the range.
    #[instrument(skip(self, row))]
    pub async fn append_row(&self, range: &str, row: Vec<String>) -> Result<(), SheetsError> {
        let bearer = self.bearer().await?;
        let response = self
            .inner
            .http
            .post(self.url(&format!(
                "/values/{range}:append?valueInputOption=USER_ENTERED"
            )))
            .bearer_auth(bearer)
            .json(&json!({ "values": [row] }))
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    /// Overwrite a range with the given rows.
    #[instrument(skip(self, rows))]
    pub async fn update_values(
        &self,
        range: &str,
        rows: Vec<Vec<String>>,
    ) -> Result<(), SheetsError> {
        let bearer = self.bearer().await?;
        let response = self
            .inner
            .http
            .put(self.url(&format!("/values/{range}?valueInputOption=USER_ENTERED")))
            .bearer_auth(bearer)
            .json(&json!({ "values": rows }))
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    /// Resolve the numeric sheet id for a title, falling back to the first
    /// sheet when no title matches.
    #[instrument(skip(self))]
    pub async fn sheet_id(&self, title: &str) -> Result<i64, SheetsError> {
        let bearer = self.bearer().await?;
        let response = self
            .inner
            .http
            .get(self.url("?fields=sheets.properties"))
            .bearer_auth(bearer)
            .send()
            .await?;

        let meta: SpreadsheetMeta = Self::check(response).await?.json().await?;
        meta.sheets
            .iter()
            .find(|s| s.properties.title == title)
            .or_else(|| meta.sheets.first())
            .map(|s| s.properties.sheet_id)
            .ok_or_else(|| SheetsError::MissingSheet(title.to_string()))
    }

    /// Structurally delete a row span (0-based, exclusive end).
    #[instrument(skip(self))]
    pub async fn delete_rows(
        &self,
        sheet_id: i64,
        start_index: u32,
        end_index: u32,
    ) -> Result<(), SheetsError> {
        let bearer = self.bearer().await?;
        let response = self
            .inner
            .http
            .post(self.url(":batchUpdate"))
            .bearer_auth(bearer)
            .json(&delete_rows_body(sheet_id, start_index, end_index))
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }
}

impl std::fmt::Debug for SheetsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetsClient")
            .field("spreadsheet_id", &self.inner.spreadsheet_id)
            .finish_non_exhaustive()
    }
}

/// Build the `deleteDimension` request body for a row span.
pub(crate) fn delete_rows_body(sheet_id: i64, start_index: u32, end_index: u32) -> serde_json::Value {
    json!({
        "requests": [
            {
                "deleteDimension": {
                    "range": {
                        "sheetId": sheet_id,
                        "dimension": "ROWS",
                        "startIndex": start_index,
                        "endIndex": end_index,
                    }
                }
            }
        ]
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn test_client() -> SheetsClient {
        SheetsClient::new(
            reqwest::Client::new(),
            "sheet-123".to_string(),
            ServiceAccountConfig {
                client_email: "svc@project.iam.gserviceaccount.com".to_string(),
                private_key: SecretString::from("not-a-real-key"),
            },
        )
    }

    #[test]
    fn test_url_building() {
        let client = test_client();
        assert_eq!(
            client.url("/values/Catalogo!A:F"),
            "https://sheets.googleapis.com/v4/spreadsheets/sheet-123/values/Catalogo!A:F"
        );
        assert_eq!(
            client.url(":batchUpdate"),
            "https://sheets.googleapis.com/v4/spreadsheets/sheet-123:batchUpdate"
        );
    }

    #[test]
    fn test_delete_rows_body_shape() {
        let body = delete_rows_body(42, 1, 2);
        let range = &body["requests"][0]["deleteDimension"]["range"];
        assert_eq!(range["sheetId"], 42);
        assert_eq!(range["dimension"], "ROWS");
        assert_eq!(range["startIndex"], 1);
        assert_eq!(range["endIndex"], 2);
    }

    #[test]
    fn test_batch_get_response_parsing() {
        let raw = r#"{
            "spreadsheetId": "sheet-123",
            "valueRanges": [
                {"range": "Inicio!A1:B4", "values": [["imageUrl", "altText"]]},
                {"range": "Inicio!A6:D10"}
            ]
        }"#;
        let parsed: BatchGetResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.value_ranges.len(), 2);
        assert!(parsed.value_ranges[0].values.is_some());
        assert!(parsed.value_ranges[1].values.is_none());
    }
}
