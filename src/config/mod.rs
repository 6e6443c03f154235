mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Environment variable overriding `database.path`.
pub const DB_PATH_VAR: &str = "DB_PATH";
/// Environment variable overriding `database.schema`.
pub const SCHEMA_PATH_VAR: &str = "SCHEMA_PATH";

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./sitecms.toml",
        "~/.config/sitecms/config.toml",
        "/etc/sitecms/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Apply `DB_PATH` / `SCHEMA_PATH` from the process environment.
pub fn apply_env_overrides(config: &mut Config) -> Result<()> {
    apply_overrides(config, |key| std::env::var(key).ok())
}

/// Apply overrides from any key lookup; empty values are ignored.
pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(path) = non_empty(DB_PATH_VAR) {
        config.database.path = Some(expand(&path));
    }
    if let Some(path) = non_empty(SCHEMA_PATH_VAR) {
        config.database.schema = expand(&path);
    }

    validate_config(config)
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    if config.database.schema.as_os_str().is_empty() {
        anyhow::bail!("database.schema cannot be empty");
    }

    if let Some(ref path) = config.database.path {
        if path.as_os_str().is_empty() {
            anyhow::bail!("database.path cannot be empty");
        }
    }

    if config.seed.admin_username.trim().is_empty() {
        anyhow::bail!("seed.admin_username cannot be empty");
    }

    if config.seed.admin_password.is_empty() {
        anyhow::bail!("seed.admin_password cannot be empty");
    }

    if !(crate::auth::MIN_COST..=crate::auth::MAX_COST).contains(&config.seed.bcrypt_cost) {
        anyhow::bail!(
            "seed.bcrypt_cost must be between {} and {}",
            crate::auth::MIN_COST,
            crate::auth::MAX_COST
        );
    }

    Ok(())
}
