use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Schema definition applied by `sitecms seed`
    #[serde(default = "default_schema")]
    pub schema: PathBuf,

    /// SQLite database file (default: `website.db` next to the schema file)
    #[serde(default)]
    pub path: Option<PathBuf>,
}

fn default_schema() -> PathBuf {
    PathBuf::from("database/schema.sql")
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            schema: default_schema(),
            path: None,
        }
    }
}

impl DatabaseConfig {
    /// The database file to open, falling back to `website.db` alongside
    /// the schema definition.
    pub fn db_path(&self) -> PathBuf {
        match &self.path {
            Some(path) => path.clone(),
            None => self
                .schema
                .parent()
                .unwrap_or_else(|| Path::new(""))
                .join("website.db"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SeedConfig {
    /// Username of the default admin account
    #[serde(default = "default_admin_username")]
    pub admin_username: String,

    /// Plaintext password hashed into the default admin account
    #[serde(default = "default_admin_password")]
    pub admin_password: String,

    /// bcrypt work factor for the admin password (default: 10)
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,

    /// Insert the sample articles
    #[serde(default = "default_sample_content")]
    pub sample_content: bool,
}

fn default_admin_username() -> String {
    "admin".to_string()
}
fn default_admin_password() -> String {
    "admin123".to_string()
}
fn default_bcrypt_cost() -> u32 {
    crate::auth::DEFAULT_COST
}
fn default_sample_content() -> bool {
    true
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            admin_username: default_admin_username(),
            admin_password: default_admin_password(),
            bcrypt_cost: default_bcrypt_cost(),
            sample_content: default_sample_content(),
        }
    }
}
