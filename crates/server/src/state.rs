//! Application state shared across handlers.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::AppConfig;
use crate::google::{DriveClient, GoogleOAuth, SheetsClient};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; holds the startup configuration and the
/// Google API clients, which share one HTTP connection pool.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    sheets: SheetsClient,
    drive: DriveClient,
    oauth: GoogleOAuth,
    /// Per-session single-flight guards for token refresh. Concurrent
    /// requests racing to refresh the same session serialize here; the
    /// losers re-read the session and reuse the winner's token.
    refresh_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl AppState {
    /// Create a new application state from the loaded configuration.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created. This should never happen
    /// under normal circumstances as we use standard TLS configuration.
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        let sheets = SheetsClient::new(
            http.clone(),
            config.spreadsheet_id.clone(),
            config.service_account.clone(),
        );
        let drive = DriveClient::new(http.clone(), config.drive_folder_id.clone());
        let oauth = GoogleOAuth::new(http, &config.google_oauth, config.oauth_redirect_uri());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                sheets,
                drive,
                oauth,
                refresh_locks: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get a reference to the Sheets datastore client.
    #[must_use]
    pub fn sheets(&self) -> &SheetsClient {
        &self.inner.sheets
    }

    /// Get a reference to the Drive image-storage client.
    #[must_use]
    pub fn drive(&self) -> &DriveClient {
        &self.inner.drive
    }

    /// Get a reference to the OAuth client.
    #[must_use]
    pub fn oauth(&self) -> &GoogleOAuth {
        &self.inner.oauth
    }

    /// Get (or create) the refresh guard for a session key.
    pub async fn refresh_lock(&self, key: &str) -> Arc<Mutex<()>> {
        let mut locks = self.inner.refresh_locks.lock().await;
        locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
