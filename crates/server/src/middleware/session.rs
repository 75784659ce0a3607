//! Session middleware configuration.
//!
//! Sessions live in an in-memory store and are referenced by a signed
//! cookie; the token pair never reaches the browser. There is no database
//! in this system, so sessions do not survive a restart - admins simply
//! sign in again.

use secrecy::ExposeSecret;
use sha2::{Digest, Sha512};
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer, cookie::Key, service::SignedCookie};

use crate::config::AppConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "catalogo_session";

/// Session expiry time in seconds (24 hours of inactivity).
const SESSION_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

/// Create the session layer with an in-memory store and signed cookies.
#[must_use]
pub fn create_session_layer(config: &AppConfig) -> SessionManagerLayer<MemoryStore, SignedCookie> {
    let store = MemoryStore::default();

    // Stretch AUTH_SECRET to the 64 bytes the cookie key requires
    let digest = Sha512::digest(config.session_secret.expose_secret().as_bytes());
    let key = Key::from(&digest);

    // Secure cookies in production (HTTPS base URL)
    let is_secure = config.base_url.starts_with("https://");

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(is_secure)
        // Lax so the OAuth redirect back from Google carries the cookie
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
        .with_signed(key)
}
