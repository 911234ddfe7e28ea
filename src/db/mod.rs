mod schema;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;

use crate::models::Note;

/// Default database filename when `NOTEBOARD_DB` is not set.
const DEFAULT_DB_FILE: &str = "tweets.db";

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open the database at the path named by `NOTEBOARD_DB`, falling back
    /// to `tweets.db` in the working directory.
    pub fn open_default() -> Result<Self> {
        let path = std::env::var("NOTEBOARD_DB")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DB_FILE));
        Self::open(path)
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        schema::run_migrations(&conn)
    }

    // ============================================================
    // Note operations
    // ============================================================

    /// Append a note. The store assigns `id` (monotonic, never reused) and
    /// `created_at` (UTC, insertion time); the returned note carries both.
    pub fn insert_note(&self, author: &str, text: &str) -> Result<Note> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let now = Utc::now();

        conn.execute(
            "INSERT INTO tweets (author, text, created_at) VALUES (?, ?, ?)",
            (author, text, now.to_rfc3339()),
        )?;

        Ok(Note {
            id: conn.last_insert_rowid(),
            author: author.to_string(),
            text: text.to_string(),
            created_at: now,
        })
    }

    /// Notes ordered newest first (descending id), truncated to `limit`.
    /// A snapshot as of call time; no live updates.
    pub fn list_recent_notes(&self, limit: u32) -> Result<Vec<Note>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, author, text, created_at
             FROM tweets ORDER BY id DESC LIMIT ?",
        )?;

        let notes = stmt
            .query_map([limit], |row| {
                Ok(Note {
                    id: row.get(0)?,
                    author: row.get(1)?,
                    text: row.get(2)?,
                    created_at: parse_datetime(row.get::<_, String>(3)?),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(notes)
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
        }
    }
}

fn parse_datetime(s: String) -> chrono::DateTime<Utc> {
    chrono::DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}
