//! One-shot database initialization.
//!
//! Applies the schema definition, creates the default admin if it is
//! missing, and adds the sample articles. With a schema written using
//! `IF NOT EXISTS`, such as the bundled one, a second run changes nothing.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use sitecms_db::migrations::SCHEMA_SQL;
use thiserror::Error;

use crate::auth;
use crate::config::{Config, SeedConfig};
use crate::store::ContentStore;

/// Articles inserted on a fresh database.
pub const SAMPLE_CONTENTS: &[(&str, &str)] = &[
    (
        "Welcome to Our Website",
        "This is our first article. We hope you enjoy your stay!",
    ),
    (
        "Getting Started Guide",
        "Here are some tips to help you get started with our platform...",
    ),
];

/// Seed error types
#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Failed to read schema file {path:?}: {source}")]
    Schema {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to hash admin password: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("Password hashing task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Store(#[from] sitecms_common::Error),
}

/// What the seed routine should do.
#[derive(Debug, Clone)]
pub struct SeedOptions {
    /// Schema file to apply; the bundled schema is used when `None`.
    pub schema: Option<PathBuf>,
    pub admin_username: String,
    pub admin_password: String,
    pub bcrypt_cost: u32,
    pub sample_content: bool,
}

impl SeedOptions {
    /// Options from configuration. A schema file that does not exist falls
    /// back to the bundled schema.
    pub fn from_config(config: &Config) -> Self {
        let schema = &config.database.schema;
        let schema = if schema.exists() {
            Some(schema.clone())
        } else {
            tracing::warn!(
                "Schema file {:?} not found, using the bundled schema",
                schema
            );
            None
        };

        Self {
            schema,
            admin_username: config.seed.admin_username.clone(),
            admin_password: config.seed.admin_password.clone(),
            bcrypt_cost: config.seed.bcrypt_cost,
            sample_content: config.seed.sample_content,
        }
    }
}

impl Default for SeedOptions {
    fn default() -> Self {
        let seed = SeedConfig::default();
        Self {
            schema: None,
            admin_username: seed.admin_username,
            admin_password: seed.admin_password,
            bcrypt_cost: seed.bcrypt_cost,
            sample_content: seed.sample_content,
        }
    }
}

/// Outcome of a seed run.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct SeedReport {
    /// Schema statements executed.
    pub statements: usize,
    /// Whether the default admin was created by this run.
    pub admin_created: bool,
    /// Sample articles inserted by this run.
    pub articles_inserted: usize,
}

/// Read the schema definition to apply.
pub fn load_schema(path: Option<&Path>) -> Result<Cow<'static, str>, SeedError> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .map(Cow::Owned)
            .map_err(|source| SeedError::Schema {
                path: path.to_path_buf(),
                source,
            }),
        None => Ok(Cow::Borrowed(SCHEMA_SQL)),
    }
}

/// Run the seed routine against `store`.
///
/// The schema definition is applied before anything else, so `store` should
/// come from [`ContentStore::open_unmigrated`] when seeding a fresh database
/// with a schema file of its own.
pub async fn run(store: &ContentStore, options: &SeedOptions) -> Result<SeedReport, SeedError> {
    let mut report = SeedReport::default();

    let schema = load_schema(options.schema.as_deref())?;
    report.statements = store.apply_schema(schema.into_owned()).await?;
    tracing::info!("Applied {} schema statements", report.statements);

    // Record the schema version so later opens do not re-create tables
    let migrated = store.run_migrations().await?;
    tracing::debug!("Recorded {} schema migrations", migrated);

    let admins = store.admins();
    if admins.find_by_username(&options.admin_username).await?.is_some() {
        tracing::info!("Admin '{}' already exists", options.admin_username);
    } else {
        let password = options.admin_password.clone();
        let cost = options.bcrypt_cost;
        let hash =
            tokio::task::spawn_blocking(move || auth::hash_password(&password, cost)).await??;

        report.admin_created = admins
            .insert_if_absent(&options.admin_username, &hash)
            .await?;
        if report.admin_created {
            tracing::info!("Created admin '{}'", options.admin_username);
        }
    }

    if options.sample_content {
        for (title, body) in SAMPLE_CONTENTS {
            let inserted = store
                .contents()
                .insert_by_author(title, body, &options.admin_username)
                .await?;
            if inserted {
                report.articles_inserted += 1;
            } else {
                tracing::debug!("Sample article '{}' already present", title);
            }
        }
        tracing::info!("Inserted {} sample articles", report.articles_inserted);
    }

    Ok(report)
}
