//! Sitecms-DB: Database schema, migrations, and query operations
//!
//! This crate provides the content store for sitecms using SQLite
//! with rusqlite and r2d2 connection pooling.
//!
//! # Modules
//!
//! - `migrations` - Embedded schema and version tracking
//! - `schema` - Applying a schema definition file statement by statement
//! - `pool` - Connection pool management
//! - `models` - Rust models matching database schema
//! - `queries` - Per-entity database operations
//!
//! # Example
//!
//! ```no_run
//! use sitecms_db::pool::{init_pool, get_conn};
//! use sitecms_db::queries::games::{self, NewGame};
//!
//! let pool = init_pool("/var/lib/sitecms/website.db").unwrap();
//! let conn = get_conn(&pool).unwrap();
//!
//! games::insert(&conn, &NewGame::new("pong", "Pong", "Paddles and a ball", "pong.png")).unwrap();
//! let game = games::find_by_label(&conn, "pong").unwrap();
//! println!("Found: {:?}", game.map(|g| g.name));
//! ```

pub mod migrations;
pub mod models;
pub mod pool;
pub mod queries;
pub mod schema;
