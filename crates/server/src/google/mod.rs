//! Google API clients.
//!
//! Three independent integrations share one `reqwest::Client`:
//!
//! - [`oauth`] - user sign-in and token refresh against Google's OAuth
//!   endpoints. The resulting access token acts on the admin's behalf
//!   (Drive uploads).
//! - [`sheets`] - the spreadsheet datastore, authenticated with a
//!   service-account JWT grant independent of any user session.
//! - [`drive`] - image storage, authenticated with the signed-in admin's
//!   access token.

pub mod drive;
pub mod oauth;
pub mod sheets;

pub use drive::DriveClient;
pub use oauth::GoogleOAuth;
pub use sheets::SheetsClient;
