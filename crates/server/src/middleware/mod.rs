//! Request middleware: sessions, authentication, the admin allow-list gate.

pub mod auth;
pub mod gate;
pub mod session;

pub use auth::RequireAuth;
pub use session::create_session_layer;
