//! Admin database queries.
//!
//! Admins are created at seed time and never mutated or deleted here.
//! Passwords arrive already hashed; this module never sees plaintext.

use chrono::Utc;
use rusqlite::Connection;
use sitecms_common::{AdminId, Error, Result};

use super::{require, write_error};
use crate::models::Admin;

const ADMIN_COLUMNS: &str = "id, username, password, created_at";

/// Create a new admin.
///
/// # Arguments
///
/// * `conn` - Database connection
/// * `username` - Unique username
/// * `password_hash` - Hashed password
///
/// # Returns
///
/// * `Ok(Admin)` - The created admin
/// * `Err(Error::Conflict)` - If the username already exists
/// * `Err(Error)` - On validation or database failure
pub fn insert(conn: &Connection, username: &str, password_hash: &str) -> Result<Admin> {
    require("username", username)?;
    require("password", password_hash)?;

    let id = AdminId::new();
    let created_at = Utc::now();

    conn.execute(
        "INSERT INTO admins (id, username, password, created_at)
         VALUES (:id, :username, :password, :created_at)",
        rusqlite::named_params! {
            ":id": id.to_string(),
            ":username": username,
            ":password": password_hash,
            ":created_at": created_at.to_rfc3339(),
        },
    )
    .map_err(|e| write_error(e, || format!("Username '{username}' already exists")))?;

    Ok(Admin {
        id,
        username: username.to_string(),
        password: password_hash.to_string(),
        created_at,
    })
}

/// Create an admin unless one with this username already exists.
///
/// The existing row, including its password, is left untouched.
///
/// # Returns
///
/// * `Ok(true)` - A new admin was created
/// * `Ok(false)` - The username was already taken
pub fn insert_if_absent(conn: &Connection, username: &str, password_hash: &str) -> Result<bool> {
    require("username", username)?;
    require("password", password_hash)?;

    let rows_affected = conn
        .execute(
            "INSERT OR IGNORE INTO admins (id, username, password, created_at)
             VALUES (:id, :username, :password, :created_at)",
            rusqlite::named_params! {
                ":id": AdminId::new().to_string(),
                ":username": username,
                ":password": password_hash,
                ":created_at": Utc::now().to_rfc3339(),
            },
        )
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(rows_affected > 0)
}

/// List all admins, sorted by username.
pub fn find_all(conn: &Connection) -> Result<Vec<Admin>> {
    let mut stmt = conn
        .prepare(&format!("SELECT {ADMIN_COLUMNS} FROM admins ORDER BY username ASC"))
        .map_err(|e| Error::database(e.to_string()))?;

    let admins = stmt
        .query_map([], Admin::from_row)
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(admins)
}

/// Get an admin by ID.
pub fn find_by_id(conn: &Connection, id: AdminId) -> Result<Option<Admin>> {
    let result = conn.query_row(
        &format!("SELECT {ADMIN_COLUMNS} FROM admins WHERE id = :id"),
        rusqlite::named_params! { ":id": id.to_string() },
        Admin::from_row,
    );

    match result {
        Ok(admin) => Ok(Some(admin)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e.to_string())),
    }
}

/// Get an admin by username.
pub fn find_by_username(conn: &Connection, username: &str) -> Result<Option<Admin>> {
    let result = conn.query_row(
        &format!("SELECT {ADMIN_COLUMNS} FROM admins WHERE username = :username"),
        rusqlite::named_params! { ":username": username },
        Admin::from_row,
    );

    match result {
        Ok(admin) => Ok(Some(admin)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e.to_string())),
    }
}
