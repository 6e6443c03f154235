//! Sitecms-Common: Shared types and utilities.
//!
//! This crate provides common functionality used across sitecms:
//!
//! - **Typed IDs**: Type-safe UUID wrappers for admins and content articles
//! - **Error Handling**: Common error type and result alias
//!
//! # Examples
//!
//! ```
//! use sitecms_common::{AdminId, Error, Result};
//!
//! let admin_id = AdminId::new();
//!
//! fn lookup(id: AdminId) -> Result<()> {
//!     Err(Error::not_found("admin", id))
//! }
//! assert!(lookup(admin_id).is_err());
//! ```

pub mod error;
pub mod ids;

pub use error::{Error, Result};
pub use ids::*;
