use std::path::Path;

use rusqlite::{params, Connection};

use crate::usage_store::{Entry, KeyValueStore, StoreError};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS entry (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    section TEXT NOT NULL
)";

/// Usage and style entries kept in a SQLite table instead of the text file.
pub struct SqliteStore {
    db: Connection,
}

impl SqliteStore {
    pub fn open_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    pub fn open_file(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Self::with_connection(Connection::open(path)?)
    }

    pub fn with_connection(db: Connection) -> Result<Self, StoreError> {
        db.execute(SCHEMA, [])?;
        Ok(Self { db })
    }

    fn is_empty(&self) -> Result<bool, StoreError> {
        let rows: i64 = self
            .db
            .query_row("SELECT COUNT(*) FROM entry", [], |row| row.get(0))?;
        Ok(rows == 0)
    }
}

impl KeyValueStore for SqliteStore {
    fn read_entries(&self) -> Result<Option<Vec<Entry>>, StoreError> {
        if self.is_empty()? {
            return Ok(None);
        }

        let mut stmt = self
            .db
            .prepare("SELECT key, value FROM entry ORDER BY section DESC, rowid")?;
        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
        let entries = rows.collect::<Result<Vec<Entry>, rusqlite::Error>>()?;
        Ok(Some(entries))
    }

    fn write_entries(&mut self, style: &[Entry], counts: &[Entry]) -> Result<(), StoreError> {
        let tx = self.db.transaction()?;
        tx.execute("DELETE FROM entry", [])?;
        {
            let mut insert = tx.prepare(
                "INSERT INTO entry (key, value, section) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value=excluded.value, section=excluded.section",
            )?;
            for (key, value) in style {
                insert.execute(params![key, value, "style"])?;
            }
            for (key, value) in counts {
                insert.execute(params![key, value, "count"])?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}
