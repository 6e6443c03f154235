//! End-to-end tests that drive the `sitecms` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Site {
    dir: TempDir,
    config: PathBuf,
}

impl Site {
    /// A temp dir with a config pointing at the bundled schema and a cheap
    /// bcrypt cost.
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let schema = Path::new(env!("CARGO_MANIFEST_DIR")).join("database/schema.sql");
        let config = dir.path().join("sitecms.toml");
        std::fs::write(
            &config,
            format!(
                "[database]\nschema = {:?}\npath = {:?}\n\n[seed]\nbcrypt_cost = 4\n",
                schema,
                dir.path().join("website.db")
            ),
        )
        .unwrap();
        Self { dir, config }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("sitecms").unwrap();
        cmd.current_dir(self.dir.path())
            .env_remove("DB_PATH")
            .env_remove("SCHEMA_PATH")
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(&self.config);
        cmd
    }

    fn seeded() -> Self {
        let site = Self::new();
        site.cmd().arg("seed").assert().success();
        site
    }
}

#[test]
fn help_lists_commands() {
    Command::cargo_bin("sitecms")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("seed"))
        .stdout(predicate::str::contains("games"));
}

#[test]
fn version_prints_package_version() {
    Command::cargo_bin("sitecms")
        .unwrap()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn seed_prints_credentials_once() {
    let site = Site::new();

    site.cmd()
        .arg("seed")
        .assert()
        .success()
        .stdout(predicate::str::contains("Database seeded successfully!"))
        .stdout(predicate::str::contains("Username: admin"))
        .stdout(predicate::str::contains("Password: admin123"));
    assert!(site.dir.path().join("website.db").exists());

    site.cmd()
        .arg("seed")
        .assert()
        .success()
        .stdout(predicate::str::contains("Database seeded successfully!"))
        .stdout(predicate::str::contains("Password:").not());
}

#[test]
fn seed_with_missing_schema_file_fails() {
    let site = Site::new();

    site.cmd()
        .args(["seed", "--schema"])
        .arg(site.dir.path().join("nope.sql"))
        .assert()
        .failure();
}

#[test]
fn seeded_site_has_admin_and_articles() {
    let site = Site::seeded();

    site.cmd()
        .args(["admins", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("admin"));

    site.cmd()
        .args(["contents", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome to Our Website"))
        .stdout(predicate::str::contains("Getting Started Guide"));
}

#[test]
fn game_lifecycle() {
    let site = Site::seeded();

    site.cmd()
        .args([
            "games",
            "add",
            "pong",
            "--name",
            "Pong",
            "--description",
            "Paddles",
            "--image-main",
            "pong.png",
            "--image-1",
            "pong-1.png",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added game 'pong'"));

    site.cmd()
        .args(["games", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pong"));

    site.cmd()
        .args([
            "games",
            "update",
            "pong",
            "--name",
            "Pong Deluxe",
            "--description",
            "More paddles",
        ])
        .assert()
        .success();

    site.cmd()
        .args(["games", "show", "pong", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pong Deluxe"))
        .stdout(predicate::str::contains("pong-1.png"));

    site.cmd()
        .args(["games", "remove", "pong"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed game 'pong'"));

    site.cmd().args(["games", "show", "pong"]).assert().failure();
}

#[test]
fn duplicate_game_label_fails() {
    let site = Site::seeded();
    let add = |site: &Site| {
        site.cmd()
            .args([
                "games",
                "add",
                "pong",
                "--name",
                "Pong",
                "--description",
                "Paddles",
                "--image-main",
                "pong.png",
            ])
            .assert()
    };

    add(&site).success();
    add(&site).failure();
}

#[test]
fn update_unknown_game_is_noop() {
    let site = Site::seeded();

    site.cmd()
        .args([
            "games",
            "update",
            "ghost",
            "--name",
            "Ghost",
            "--description",
            "Boo",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing changed"));
}

#[test]
fn hash_password_outputs_bcrypt_hash() {
    Command::cargo_bin("sitecms")
        .unwrap()
        .args(["hash-password", "admin123", "--cost", "4"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("$2"));
}

#[test]
fn validate_reports_database_path() {
    let site = Site::new();

    Command::cargo_bin("sitecms")
        .unwrap()
        .env_remove("DB_PATH")
        .env_remove("SCHEMA_PATH")
        .arg("validate")
        .arg(&site.config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("website.db"));
}

#[test]
fn validate_reports_env_database_path() {
    let site = Site::new();
    let env_db = site.dir.path().join("from-env.db");

    Command::cargo_bin("sitecms")
        .unwrap()
        .env("DB_PATH", &env_db)
        .env_remove("SCHEMA_PATH")
        .arg("validate")
        .arg(&site.config)
        .assert()
        .success()
        .stdout(predicate::str::contains("from-env.db"));
}

#[test]
fn seed_applies_plain_schema_file() {
    let site = Site::new();
    let schema = site.dir.path().join("plain.sql");
    std::fs::write(
        &schema,
        "CREATE TABLE admins (id TEXT PRIMARY KEY, username TEXT UNIQUE NOT NULL, \
         password TEXT NOT NULL, created_at TEXT NOT NULL);\n\
         CREATE TABLE contents (id TEXT PRIMARY KEY, title TEXT NOT NULL, body TEXT NOT NULL, \
         created_by TEXT NOT NULL REFERENCES admins(id), created_at TEXT NOT NULL);\n",
    )
    .unwrap();

    site.cmd()
        .arg("seed")
        .arg("--schema")
        .arg(&schema)
        .assert()
        .success()
        .stdout(predicate::str::contains("Database seeded successfully!"));

    site.cmd()
        .args(["contents", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome to Our Website"));
}
