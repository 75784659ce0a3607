//! Catálogo Pro Core - Shared types library.
//!
//! This crate provides common types used across the Catálogo Pro components:
//! - `server` - Public catalog + admin JSON API
//! - `integration-tests` - Cross-crate test suite
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for emails and spreadsheet row indices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
