//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`], which wraps a [`ContentStore`] backed by a
//! private in-memory database, and [`FileHarness`] for tests that need a
//! database file on disk.

#![allow(dead_code)]

use std::path::PathBuf;

use sitecms::seed::SeedOptions;
use sitecms::ContentStore;
use sitecms_db::pool::PooledConnection;
use sitecms_db::queries::games::NewGame;
use tempfile::TempDir;

/// Seed options with a cheap bcrypt cost so tests stay fast.
pub fn fast_seed_options() -> SeedOptions {
    SeedOptions {
        bcrypt_cost: sitecms::auth::MIN_COST,
        ..SeedOptions::default()
    }
}

/// A game with only the required fields set.
pub fn game(label: &str) -> NewGame {
    NewGame::new(
        label,
        format!("Game {label}"),
        format!("About {label}"),
        format!("{label}.png"),
    )
}

/// A game with all four image slots filled.
pub fn game_with_images(label: &str) -> NewGame {
    NewGame {
        image_1: Some(format!("{label}-1.png")),
        image_2: Some(format!("{label}-2.png")),
        image_3: Some(format!("{label}-3.png")),
        ..game(label)
    }
}

pub struct TestHarness {
    pub store: ContentStore,
}

impl TestHarness {
    /// Create a new harness with an empty in-memory database.
    pub fn new() -> Self {
        let store = ContentStore::in_memory().expect("failed to create in-memory store");
        Self { store }
    }

    /// Create a harness and run the seed routine against it.
    pub async fn seeded() -> Self {
        let harness = Self::new();
        sitecms::seed::run(&harness.store, &fast_seed_options())
            .await
            .expect("seed failed");
        harness
    }

    /// Get a database connection from the pool.
    pub fn conn(&self) -> PooledConnection {
        sitecms_db::pool::get_conn(self.store.pool()).expect("failed to get db connection")
    }

    /// Count rows in `table`.
    pub fn count(&self, table: &str) -> i64 {
        self.conn()
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
            .expect("count failed")
    }
}

/// A temporary directory holding a database file.
pub struct FileHarness {
    pub dir: TempDir,
}

impl FileHarness {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create temp dir"),
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.dir.path().join("website.db")
    }

    pub fn open(&self) -> ContentStore {
        ContentStore::open(&self.db_path()).expect("failed to open store")
    }

    /// Open the database file without creating any tables.
    pub fn open_unmigrated(&self) -> ContentStore {
        ContentStore::open_unmigrated(&self.db_path()).expect("failed to open store")
    }
}
