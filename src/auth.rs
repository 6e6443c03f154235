//! Admin password hashing and credential checks.

use sitecms_common::{Error, Result};
use sitecms_db::models::Admin;

use crate::store::ContentStore;

/// Work factor for new password hashes.
pub const DEFAULT_COST: u32 = 10;
/// Lowest work factor bcrypt accepts.
pub const MIN_COST: u32 = 4;
/// Highest work factor bcrypt accepts.
pub const MAX_COST: u32 = 31;

/// Generate a salted bcrypt hash of `password`.
pub fn hash_password(password: &str, cost: u32) -> std::result::Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, cost)
}

/// Check `password` against a stored bcrypt hash.
///
/// A malformed stored hash counts as a mismatch.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match bcrypt::verify(password, hash) {
        Ok(matches) => matches,
        Err(e) => {
            tracing::warn!("Stored password hash could not be verified: {}", e);
            false
        }
    }
}

/// Look up `username` and check its password.
///
/// Returns the admin when the credentials match and `None` otherwise; an
/// unknown username and a wrong password are indistinguishable to the caller.
pub async fn verify_credentials(
    store: &ContentStore,
    username: &str,
    password: &str,
) -> Result<Option<Admin>> {
    let Some(admin) = store.admins().find_by_username(username).await? else {
        return Ok(None);
    };

    let password = password.to_string();
    let hash = admin.password.clone();
    let matches = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| Error::internal(format!("spawn_blocking join error: {e}")))?;

    Ok(matches.then_some(admin))
}
