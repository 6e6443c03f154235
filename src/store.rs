//! Async content store handle.
//!
//! [`ContentStore`] owns the connection pool and is passed explicitly to
//! whatever needs it. Each method checks out one pooled connection and runs
//! a single query function on Tokio's blocking pool, so an operation
//! suspends exactly once, at the storage call.

use std::path::Path;

use rusqlite::Connection;
use sitecms_common::{AdminId, ContentId, Error, Result};
use sitecms_db::models::{Admin, Content, Game};
use sitecms_db::migrations;
use sitecms_db::pool::{get_conn, init_memory_pool, init_pool, init_pool_unmigrated, DbPool};
use sitecms_db::queries::games::{GameUpdate, NewGame};
use sitecms_db::queries::{admins, contents, games};
use sitecms_db::schema;

/// Cloneable handle over the SQLite pool.
#[derive(Clone)]
pub struct ContentStore {
    pool: DbPool,
}

impl ContentStore {
    /// Wrap an existing pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Open (creating if needed) the database file at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        create_parent_dir(path)?;
        let pool = init_pool(&path.to_string_lossy())?;
        Ok(Self::new(pool))
    }

    /// Open the database file at `path` without creating any tables.
    ///
    /// The seed routine uses this so its schema definition is the first
    /// thing applied to a fresh database.
    pub fn open_unmigrated(path: &Path) -> Result<Self> {
        create_parent_dir(path)?;
        let pool = init_pool_unmigrated(&path.to_string_lossy())?;
        Ok(Self::new(pool))
    }

    /// A store backed by a private in-memory database.
    pub fn in_memory() -> Result<Self> {
        Ok(Self::new(init_memory_pool()?))
    }

    /// The underlying pool, for callers that need raw connections.
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Admin accounts.
    pub fn admins(&self) -> Admins<'_> {
        Admins(self)
    }

    /// Articles.
    pub fn contents(&self) -> Contents<'_> {
        Contents(self)
    }

    /// Games.
    pub fn games(&self) -> Games<'_> {
        Games(self)
    }

    /// Apply a schema definition statement by statement.
    pub async fn apply_schema(&self, sql: String) -> Result<usize> {
        self.run(move |conn| schema::apply_schema(conn, &sql)).await
    }

    /// Apply pending embedded migrations, returning how many ran.
    pub async fn run_migrations(&self) -> Result<usize> {
        self.run(migrations::run_migrations).await
    }

    async fn run<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = get_conn(&pool)?;
            f(&*conn)
        })
        .await
        .map_err(|e| Error::internal(format!("spawn_blocking join error: {e}")))?
    }
}

fn create_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Admin operations.
pub struct Admins<'a>(&'a ContentStore);

impl Admins<'_> {
    /// Create an admin; a taken username is a conflict.
    pub async fn insert(&self, username: &str, password_hash: &str) -> Result<Admin> {
        let (username, password_hash) = (username.to_string(), password_hash.to_string());
        self.0
            .run(move |conn| admins::insert(conn, &username, &password_hash))
            .await
    }

    /// Create an admin unless the username exists. Returns whether a row was added.
    pub async fn insert_if_absent(&self, username: &str, password_hash: &str) -> Result<bool> {
        let (username, password_hash) = (username.to_string(), password_hash.to_string());
        self.0
            .run(move |conn| admins::insert_if_absent(conn, &username, &password_hash))
            .await
    }

    /// All admins, by username.
    pub async fn find_all(&self) -> Result<Vec<Admin>> {
        self.0.run(admins::find_all).await
    }

    /// Get an admin by ID.
    pub async fn find_by_id(&self, id: AdminId) -> Result<Option<Admin>> {
        self.0.run(move |conn| admins::find_by_id(conn, id)).await
    }

    /// Get an admin by username.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<Admin>> {
        let username = username.to_string();
        self.0
            .run(move |conn| admins::find_by_username(conn, &username))
            .await
    }
}

/// Article operations.
pub struct Contents<'a>(&'a ContentStore);

impl Contents<'_> {
    /// Create an article; an unknown author is a conflict.
    pub async fn insert(&self, title: &str, body: &str, created_by: AdminId) -> Result<Content> {
        let (title, body) = (title.to_string(), body.to_string());
        self.0
            .run(move |conn| contents::insert(conn, &title, &body, created_by))
            .await
    }

    /// Insert with the author resolved from `username`; see
    /// [`contents::insert_by_author`].
    pub async fn insert_by_author(&self, title: &str, body: &str, username: &str) -> Result<bool> {
        let (title, body, username) = (title.to_string(), body.to_string(), username.to_string());
        self.0
            .run(move |conn| contents::insert_by_author(conn, &title, &body, &username))
            .await
    }

    /// All articles, oldest first.
    pub async fn find_all(&self) -> Result<Vec<Content>> {
        self.0.run(contents::find_all).await
    }

    /// Get an article by ID.
    pub async fn find_by_id(&self, id: ContentId) -> Result<Option<Content>> {
        self.0.run(move |conn| contents::find_by_id(conn, id)).await
    }

    /// Articles written by one admin, oldest first.
    pub async fn find_by_author(&self, created_by: AdminId) -> Result<Vec<Content>> {
        self.0
            .run(move |conn| contents::find_by_author(conn, created_by))
            .await
    }

    /// Replace title and body. Returns `false` when no article has this ID.
    pub async fn modify(&self, id: ContentId, title: &str, body: &str) -> Result<bool> {
        let (title, body) = (title.to_string(), body.to_string());
        self.0
            .run(move |conn| contents::modify(conn, id, &title, &body))
            .await
    }

    /// Delete an article. Returns `false` when no article has this ID.
    pub async fn destroy(&self, id: ContentId) -> Result<bool> {
        self.0.run(move |conn| contents::destroy(conn, id)).await
    }
}

/// Game operations, keyed by label.
pub struct Games<'a>(&'a ContentStore);

impl Games<'_> {
    /// Create a game; a taken label is a conflict.
    pub async fn insert(&self, game: NewGame) -> Result<()> {
        self.0.run(move |conn| games::insert(conn, &game)).await
    }

    /// All games, by label.
    pub async fn find_all(&self) -> Result<Vec<Game>> {
        self.0.run(games::find_all).await
    }

    /// Get a game by its exact label.
    pub async fn find_by_label(&self, label: &str) -> Result<Option<Game>> {
        let label = label.to_string();
        self.0
            .run(move |conn| games::find_by_label(conn, &label))
            .await
    }

    /// Returns `false` without error when no game has this label.
    pub async fn modify(&self, label: &str, update: GameUpdate) -> Result<bool> {
        let label = label.to_string();
        self.0
            .run(move |conn| games::modify(conn, &label, &update))
            .await
    }

    /// Returns `false` without error when no game has this label.
    pub async fn destroy(&self, label: &str) -> Result<bool> {
        let label = label.to_string();
        self.0.run(move |conn| games::destroy(conn, &label)).await
    }
}
