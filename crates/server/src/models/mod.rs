//! Domain and wire types for the catalog server.

pub mod catalog;
pub mod home;
pub mod session;

pub use catalog::{CatalogItem, NewCatalogItem, UpdateCatalogItem};
pub use home::{CarouselSlide, Feature, FooterContent, HomeContent, SectionTexts, Stat};
pub use session::{AdminSession, CurrentAdmin, session_keys};
