//! Game database queries.
//!
//! Games are keyed by their human-chosen `label`. Lookups use exact
//! equality on the label, and updates or deletes that match nothing
//! complete without error.

use rusqlite::Connection;
use sitecms_common::{Error, Result};

use super::{require, write_error};
use crate::models::Game;

const GAME_COLUMNS: &str = "label, name, description, image_main, image_1, image_2, image_3";

/// Fields for a new game row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewGame {
    pub label: String,
    pub name: String,
    pub description: String,
    pub image_main: String,
    pub image_1: Option<String>,
    pub image_2: Option<String>,
    pub image_3: Option<String>,
}

impl NewGame {
    /// A game with only the required fields set.
    pub fn new(
        label: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        image_main: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            name: name.into(),
            description: description.into(),
            image_main: image_main.into(),
            ..Default::default()
        }
    }

    fn validate(&self) -> Result<()> {
        require("label", &self.label)?;
        require("name", &self.name)?;
        require("description", &self.description)?;
        require("image_main", &self.image_main)?;
        validate_optional_images(&self.image_1, &self.image_2, &self.image_3)
    }
}

/// Changes applied by [`modify`].
///
/// `name` and `description` are always written. Each image is written only
/// when it is `Some` and non-blank; otherwise the stored value is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameUpdate {
    pub name: String,
    pub description: String,
    pub image_main: Option<String>,
    pub image_1: Option<String>,
    pub image_2: Option<String>,
    pub image_3: Option<String>,
}

impl GameUpdate {
    /// An update touching only name and description.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    fn validate(&self) -> Result<()> {
        require("name", &self.name)?;
        require("description", &self.description)
    }
}

/// A supplied image counts only when it is non-blank.
fn supplied(image: &Option<String>) -> Option<&String> {
    image.as_ref().filter(|value| !value.trim().is_empty())
}

fn validate_optional_images(
    image_1: &Option<String>,
    image_2: &Option<String>,
    image_3: &Option<String>,
) -> Result<()> {
    for (field, image) in [("image_1", image_1), ("image_2", image_2), ("image_3", image_3)] {
        if let Some(image) = image {
            require(field, image)?;
        }
    }
    Ok(())
}

/// Insert a new game.
///
/// # Returns
///
/// * `Ok(())` - The row was written
/// * `Err(Error::Validation)` - A required field is empty
/// * `Err(Error::Conflict)` - The label is already taken
/// * `Err(Error::Database)` - Any other database failure
pub fn insert(conn: &Connection, game: &NewGame) -> Result<()> {
    game.validate()?;

    conn.execute(
        "INSERT INTO games (label, name, description, image_main, image_1, image_2, image_3)
         VALUES (:label, :name, :description, :image_main, :image_1, :image_2, :image_3)",
        rusqlite::named_params! {
            ":label": game.label,
            ":name": game.name,
            ":description": game.description,
            ":image_main": game.image_main,
            ":image_1": game.image_1,
            ":image_2": game.image_2,
            ":image_3": game.image_3,
        },
    )
    .map_err(|e| write_error(e, || format!("Game label '{}' already exists", game.label)))?;

    tracing::debug!(label = %game.label, "Inserted game");
    Ok(())
}

/// List all games, sorted by label.
pub fn find_all(conn: &Connection) -> Result<Vec<Game>> {
    let mut stmt = conn
        .prepare(&format!("SELECT {GAME_COLUMNS} FROM games ORDER BY label ASC"))
        .map_err(|e| Error::database(e.to_string()))?;

    let games = stmt
        .query_map([], Game::from_row)
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(games)
}

/// Get a game by its exact label.
///
/// # Returns
///
/// * `Ok(Some(Game))` - The game if found
/// * `Ok(None)` - If no game has this label
/// * `Err(Error)` - If a database error occurs
pub fn find_by_label(conn: &Connection, label: &str) -> Result<Option<Game>> {
    let result = conn.query_row(
        &format!("SELECT {GAME_COLUMNS} FROM games WHERE label = :label"),
        rusqlite::named_params! { ":label": label },
        Game::from_row,
    );

    match result {
        Ok(game) => Ok(Some(game)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e.to_string())),
    }
}

/// Update the game with the given label.
///
/// Name and description are always overwritten; images only when supplied
/// with a non-blank value.
///
/// # Returns
///
/// * `Ok(true)` - A row was updated
/// * `Ok(false)` - No game has this label; nothing changed
/// * `Err(Error)` - Validation or database failure
pub fn modify(conn: &Connection, label: &str, update: &GameUpdate) -> Result<bool> {
    update.validate()?;

    let mut query = String::from("UPDATE games SET name = :name, description = :description");
    let mut params: Vec<(&str, &dyn rusqlite::ToSql)> = vec![
        (":label", &label),
        (":name", &update.name),
        (":description", &update.description),
    ];

    let images = [
        ("image_main", ":image_main", &update.image_main),
        ("image_1", ":image_1", &update.image_1),
        ("image_2", ":image_2", &update.image_2),
        ("image_3", ":image_3", &update.image_3),
    ];
    for (column, param, value) in images {
        if let Some(value) = supplied(value) {
            query.push_str(&format!(", {column} = {param}"));
            params.push((param, value));
        }
    }

    query.push_str(" WHERE label = :label");

    let rows_affected = conn
        .execute(&query, params.as_slice())
        .map_err(|e| write_error(e, || format!("Update of game '{label}' violates a constraint")))?;

    if rows_affected == 0 {
        tracing::debug!(label, "No game to update");
    }

    Ok(rows_affected > 0)
}

/// Delete the game with the given label.
///
/// # Returns
///
/// * `Ok(true)` - If the game was deleted
/// * `Ok(false)` - If no game had this label
/// * `Err(Error)` - If a database error occurs
pub fn destroy(conn: &Connection, label: &str) -> Result<bool> {
    let rows_affected = conn
        .execute(
            "DELETE FROM games WHERE label = :label",
            rusqlite::named_params! { ":label": label },
        )
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::init_memory_pool;

    fn full_game(label: &str) -> NewGame {
        NewGame {
            image_1: Some(format!("{label}-1.png")),
            image_2: Some(format!("{label}-2.png")),
            image_3: Some(format!("{label}-3.png")),
            ..NewGame::new(label, "Name", "Description", format!("{label}.png"))
        }
    }

    #[test]
    fn test_insert_and_find() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();

        insert(&conn, &NewGame::new("pong", "Pong", "Paddles and a ball", "pong.png")).unwrap();

        let game = find_by_label(&conn, "pong").unwrap().unwrap();
        assert_eq!(game.label, "pong");
        assert_eq!(game.name, "Pong");
        assert_eq!(game.description, "Paddles and a ball");
        assert_eq!(game.image_main, "pong.png");
        assert_eq!(game.image_1, None);
        assert_eq!(game.image_2, None);
        assert_eq!(game.image_3, None);
    }

    #[test]
    fn test_insert_duplicate_label() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();

        insert(&conn, &NewGame::new("pong", "Pong", "d", "a.png")).unwrap();
        let result = insert(&conn, &NewGame::new("pong", "Other", "d", "b.png"));
        assert!(matches!(result, Err(Error::Conflict(_))));

        let game = find_by_label(&conn, "pong").unwrap().unwrap();
        assert_eq!(game.name, "Pong");
    }

    #[test]
    fn test_insert_rejects_missing_fields() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();

        let cases = [
            NewGame::new("", "Pong", "d", "a.png"),
            NewGame::new("pong", " ", "d", "a.png"),
            NewGame::new("pong", "Pong", "", "a.png"),
            NewGame::new("pong", "Pong", "d", ""),
            NewGame {
                image_2: Some(String::new()),
                ..NewGame::new("pong", "Pong", "d", "a.png")
            },
        ];
        for game in &cases {
            assert!(
                matches!(insert(&conn, game), Err(Error::Validation(_))),
                "{game:?} should be rejected"
            );
        }

        assert!(find_all(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_find_by_label_not_found() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();

        assert!(find_by_label(&conn, "missing").unwrap().is_none());
    }

    #[test]
    fn test_find_by_label_is_exact() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();

        insert(&conn, &NewGame::new("pong", "Pong", "d", "a.png")).unwrap();
        assert!(find_by_label(&conn, "Pong").unwrap().is_none());
        assert!(find_by_label(&conn, "pon").unwrap().is_none());
        assert!(find_by_label(&conn, "pong ").unwrap().is_none());
    }

    #[test]
    fn test_find_all_sorted_by_label() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();

        for label in ["c", "a", "b"] {
            insert(&conn, &NewGame::new(label, "Name", "d", "x.png")).unwrap();
        }

        let labels: Vec<_> = find_all(&conn)
            .unwrap()
            .into_iter()
            .map(|g| g.label)
            .collect();
        assert_eq!(labels, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_modify_without_images_keeps_images() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();

        insert(&conn, &full_game("tetris")).unwrap();
        let updated = modify(&conn, "tetris", &GameUpdate::new("Tetris", "Falling blocks")).unwrap();
        assert!(updated);

        let game = find_by_label(&conn, "tetris").unwrap().unwrap();
        assert_eq!(game.name, "Tetris");
        assert_eq!(game.description, "Falling blocks");
        assert_eq!(game.image_main, "tetris.png");
        assert_eq!(game.image_1.as_deref(), Some("tetris-1.png"));
        assert_eq!(game.image_2.as_deref(), Some("tetris-2.png"));
        assert_eq!(game.image_3.as_deref(), Some("tetris-3.png"));
    }

    #[test]
    fn test_modify_single_image() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();

        insert(&conn, &full_game("tetris")).unwrap();
        let update = GameUpdate {
            image_1: Some("new-1.png".into()),
            ..GameUpdate::new("Tetris", "Falling blocks")
        };
        modify(&conn, "tetris", &update).unwrap();

        let game = find_by_label(&conn, "tetris").unwrap().unwrap();
        assert_eq!(game.image_main, "tetris.png");
        assert_eq!(game.image_1.as_deref(), Some("new-1.png"));
        assert_eq!(game.image_2.as_deref(), Some("tetris-2.png"));
        assert_eq!(game.image_3.as_deref(), Some("tetris-3.png"));
    }

    #[test]
    fn test_modify_blank_image_keeps_stored_value() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();

        insert(&conn, &full_game("tetris")).unwrap();
        let update = GameUpdate {
            image_main: Some("   ".into()),
            image_1: Some(String::new()),
            image_2: Some("new-2.png".into()),
            ..GameUpdate::new("Tetris2", "Blocks2")
        };
        assert!(modify(&conn, "tetris", &update).unwrap());

        let game = find_by_label(&conn, "tetris").unwrap().unwrap();
        assert_eq!(game.name, "Tetris2");
        assert_eq!(game.description, "Blocks2");
        assert_eq!(game.image_main, "tetris.png");
        assert_eq!(game.image_1.as_deref(), Some("tetris-1.png"));
        assert_eq!(game.image_2.as_deref(), Some("new-2.png"));
        assert_eq!(game.image_3.as_deref(), Some("tetris-3.png"));
    }

    #[test]
    fn test_modify_fills_empty_slot() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();

        insert(&conn, &NewGame::new("pong", "Pong", "d", "a.png")).unwrap();
        let update = GameUpdate {
            image_main: Some("b.png".into()),
            image_3: Some("c.png".into()),
            ..GameUpdate::new("Pong", "d")
        };
        modify(&conn, "pong", &update).unwrap();

        let game = find_by_label(&conn, "pong").unwrap().unwrap();
        assert_eq!(game.image_main, "b.png");
        assert_eq!(game.image_1, None);
        assert_eq!(game.image_3.as_deref(), Some("c.png"));
    }

    #[test]
    fn test_modify_missing_label_is_noop() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();

        insert(&conn, &NewGame::new("pong", "Pong", "d", "a.png")).unwrap();
        let updated = modify(&conn, "PONG", &GameUpdate::new("Changed", "Changed")).unwrap();
        assert!(!updated);

        let game = find_by_label(&conn, "pong").unwrap().unwrap();
        assert_eq!(game.name, "Pong");
    }

    #[test]
    fn test_modify_rejects_empty_name() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();

        insert(&conn, &NewGame::new("pong", "Pong", "d", "a.png")).unwrap();
        let result = modify(&conn, "pong", &GameUpdate::new("", "d"));
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_destroy() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();

        insert(&conn, &NewGame::new("pong", "Pong", "d", "a.png")).unwrap();
        assert!(destroy(&conn, "pong").unwrap());
        assert!(find_by_label(&conn, "pong").unwrap().is_none());
    }

    #[test]
    fn test_destroy_missing_label() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();

        assert!(!destroy(&conn, "missing").unwrap());
    }

    #[test]
    fn test_label_reusable_after_destroy() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();

        insert(&conn, &NewGame::new("pong", "Pong", "d", "a.png")).unwrap();
        destroy(&conn, "pong").unwrap();
        insert(&conn, &NewGame::new("pong", "Pong II", "d", "b.png")).unwrap();

        let game = find_by_label(&conn, "pong").unwrap().unwrap();
        assert_eq!(game.name, "Pong II");
    }
}
