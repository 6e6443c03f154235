//! Applying a schema definition file.
//!
//! The seed routine reads a `.sql` file and executes it one statement at a
//! time, in file order. Splitting happens on `;` outside of quoted literals
//! and comments; `CREATE TRIGGER` bodies (which contain `;`) are not
//! supported.

use rusqlite::Connection;
use sitecms_common::{Error, Result};

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    SingleQuote,
    DoubleQuote,
    LineComment,
    BlockComment,
}

/// Split schema text into individual statements.
///
/// Comments are stripped, surrounding whitespace is trimmed and empty
/// statements are dropped. A trailing statement without a `;` is kept.
pub fn split_statements(sql: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut state = State::Normal;
    let mut chars = sql.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            State::Normal => match c {
                '\'' => {
                    state = State::SingleQuote;
                    current.push(c);
                }
                '"' => {
                    state = State::DoubleQuote;
                    current.push(c);
                }
                '-' if chars.peek() == Some(&'-') => {
                    chars.next();
                    state = State::LineComment;
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    state = State::BlockComment;
                }
                ';' => {
                    push_statement(&mut statements, &mut current);
                }
                _ => current.push(c),
            },
            State::SingleQuote => {
                current.push(c);
                if c == '\'' {
                    state = State::Normal;
                }
            }
            State::DoubleQuote => {
                current.push(c);
                if c == '"' {
                    state = State::Normal;
                }
            }
            State::LineComment => {
                if c == '\n' {
                    current.push('\n');
                    state = State::Normal;
                }
            }
            State::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    current.push(' ');
                    state = State::Normal;
                }
            }
        }
    }
    push_statement(&mut statements, &mut current);

    statements
}

fn push_statement(statements: &mut Vec<String>, current: &mut String) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        statements.push(trimmed.to_string());
    }
    current.clear();
}

/// Execute every statement of `sql` against `conn`, in order.
///
/// Each statement runs on its own; a failure stops the run and reports the
/// 1-based position of the offending statement. Returns the number of
/// statements executed.
pub fn apply_schema(conn: &Connection, sql: &str) -> Result<usize> {
    let statements = split_statements(sql);

    for (i, statement) in statements.iter().enumerate() {
        tracing::trace!(statement = i + 1, "Executing schema statement");
        conn.execute_batch(statement).map_err(|e| {
            Error::database(format!("Schema statement {} failed: {e}", i + 1))
        })?;
    }

    Ok(statements.len())
}
