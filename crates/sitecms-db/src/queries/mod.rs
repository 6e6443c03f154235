//! Database query modules.
//!
//! One module per entity, each exposing the same shape of operations:
//! - admins: administrator accounts
//! - contents: articles authored by admins
//! - games: gallery entries keyed by label
//!
//! Every function issues a single parameterized statement.

pub mod admins;
pub mod contents;
pub mod games;

use rusqlite::ErrorCode;
use sitecms_common::Error;

/// Convert a rusqlite error from a write into the common error type.
///
/// UNIQUE and FOREIGN KEY failures become [`Error::Conflict`] with `context`
/// as the message; everything else is a storage error.
pub(crate) fn write_error(e: rusqlite::Error, context: impl FnOnce() -> String) -> Error {
    match e.sqlite_error_code() {
        Some(ErrorCode::ConstraintViolation) => Error::conflict(context()),
        _ => Error::database(e.to_string()),
    }
}

/// Reject empty or whitespace-only values for required fields.
pub(crate) fn require(field: &str, value: &str) -> sitecms_common::Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation(format!("{field} must not be empty")));
    }
    Ok(())
}
