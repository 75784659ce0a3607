//! Catálogo Pro server library.
//!
//! This crate provides the catalog server as a library, allowing it to be
//! tested and reused.
//!
//! # Architecture
//!
//! - Axum web framework serving a JSON API
//! - Google Sheets as the catalog/homepage datastore
//! - Google Drive as image storage
//! - Google OAuth sign-in restricted to an email allow-list

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod google;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
