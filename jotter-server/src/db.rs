//! SQLite database layer for jotter entries
//!
//! Uses rusqlite with idempotent schema setup on open.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::ServerResult;
use crate::models::Entry;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS entries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    text TEXT NOT NULL,
    category TEXT NOT NULL
);
"#;

/// Thread-safe database wrapper
///
/// rusqlite's `Connection` is `Send` but not `Sync`, so every operation
/// takes the mutex for the duration of a single statement.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
    path: PathBuf,
}

impl Database {
    /// Open or create the database at the given path
    pub fn open(path: impl Into<PathBuf>) -> ServerResult<Self> {
        let path = path.into();

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&path)?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
            path,
        };

        db.init_schema()?;
        Ok(db)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> ServerResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
            path: PathBuf::from(":memory:"),
        };
        db.init_schema()?;
        Ok(db)
    }

    /// Get the database file path
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Get database file size in bytes
    pub fn size_bytes(&self) -> Option<u64> {
        std::fs::metadata(&self.path).ok().map(|m| m.len())
    }

    fn init_schema(&self) -> ServerResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    // ========================================================================
    // Entries
    // ========================================================================

    /// List entries newest first, optionally restricted to one category.
    pub fn list_entries(&self, category: Option<&str>) -> ServerResult<Vec<Entry>> {
        let conn = self.conn.lock().unwrap();

        let entries = match category {
            Some(category) => {
                let mut stmt = conn.prepare(
                    "SELECT id, title, text, category FROM entries \
                     WHERE category = ? ORDER BY id DESC",
                )?;
                let rows = stmt.query_map([category], row_to_entry)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
            None => {
                let mut stmt = conn.prepare(
                    "SELECT id, title, text, category FROM entries ORDER BY id DESC",
                )?;
                let rows = stmt.query_map([], row_to_entry)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
        };

        Ok(entries)
    }

    /// Distinct categories currently stored, alphabetical.
    pub fn list_categories(&self) -> ServerResult<Vec<String>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare("SELECT DISTINCT category FROM entries ORDER BY category ASC")?;

        let categories = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(categories)
    }

    pub fn get_entry(&self, id: i64) -> ServerResult<Option<Entry>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare("SELECT id, title, text, category FROM entries WHERE id = ?")?;

        let entry = stmt.query_row([id], row_to_entry).optional()?;

        Ok(entry)
    }

    /// Insert a new entry and return its assigned id.
    pub fn insert_entry(&self, title: &str, text: &str, category: &str) -> ServerResult<i64> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO entries (title, text, category) VALUES (?, ?, ?)",
            params![title, text, category],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Replace the mutable fields of an entry. Returns false if no row matched.
    pub fn update_entry(
        &self,
        id: i64,
        title: &str,
        text: &str,
        category: &str,
    ) -> ServerResult<bool> {
        let conn = self.conn.lock().unwrap();
        let changed = conn.execute(
            "UPDATE entries SET title = ?, text = ?, category = ? WHERE id = ?",
            params![title, text, category, id],
        )?;

        Ok(changed > 0)
    }

    /// Delete an entry. Returns false if no row matched.
    pub fn delete_entry(&self, id: i64) -> ServerResult<bool> {
        let conn = self.conn.lock().unwrap();
        let deleted = conn.execute("DELETE FROM entries WHERE id = ?", params![id])?;

        Ok(deleted > 0)
    }

    pub fn count_entries(&self) -> ServerResult<i64> {
        let conn = self.conn.lock().unwrap();
        let count = conn.query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))?;

        Ok(count)
    }
}

fn row_to_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<Entry> {
    Ok(Entry {
        id: row.get(0)?,
        title: row.get(1)?,
        text: row.get(2)?,
        category: row.get(3)?,
    })
}
