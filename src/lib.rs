//! Sitecms - content store and seeding for a small CMS website backend
//!
//! This library crate exposes the core functionality for integration testing
//! and for the route handlers that consume the content store.

pub mod auth;
pub mod config;
pub mod seed;
pub mod store;

pub use store::ContentStore;
