//! Integration tests for Catálogo Pro.
//!
//! Tests drive the assembled router in-process with `tower::ServiceExt`;
//! no network access and no real Google credentials are involved. Requests
//! that would reach Google are exercised only up to the point where they
//! short-circuit (missing session, failed validation).
//!
//! # Test Categories
//!
//! - `auth_gate` - session checks on mutating routes, the `/admin` gate
//! - `home_defaults` - homepage fallback content and wire shape

use secrecy::SecretString;

use catalogo_server::config::{AllowList, AppConfig, GoogleOAuthConfig, ServiceAccountConfig};
use catalogo_server::middleware::create_session_layer;
use catalogo_server::routes;
use catalogo_server::state::AppState;

/// A complete configuration with dummy credentials.
///
/// Nothing here is ever sent to Google: tests only hit code paths that
/// reject before any remote call.
#[must_use]
pub fn test_config() -> AppConfig {
    AppConfig {
        host: "127.0.0.1".parse().expect("valid host"),
        port: 0,
        base_url: "http://localhost:3000".to_string(),
        session_secret: SecretString::from("k".repeat(64)),
        allow_list: AllowList::parse("admin@azurabeauty.mx"),
        google_oauth: GoogleOAuthConfig {
            client_id: "test-client-id".to_string(),
            client_secret: SecretString::from("test-oauth-credential"),
        },
        service_account: ServiceAccountConfig {
            client_email: "svc@project.iam.gserviceaccount.com".to_string(),
            private_key: SecretString::from("not-a-real-key"),
        },
        spreadsheet_id: "test-spreadsheet".to_string(),
        drive_folder_id: None,
        sentry_dsn: None,
        sentry_environment: None,
    }
}

/// The full application router with the session layer applied, as served
/// in production minus tracing and Sentry.
#[must_use]
pub fn test_app() -> axum::Router {
    let config = test_config();
    let session_layer = create_session_layer(&config);
    routes::router(AppState::new(config)).layer(session_layer)
}
