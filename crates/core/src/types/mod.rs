//! Core types for Catálogo Pro.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod row_index;

pub use email::{Email, EmailError};
pub use row_index::RowIndex;
