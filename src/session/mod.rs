//! Server-side session storage.
//!
//! Sessions are keyed by a random UUID carried in a cookie. Each record holds
//! the session's todo lists in their plain stored shape plus any pending flash
//! messages, serialized as JSON into SQLite (on disk or in memory).

mod flash;
mod schema;
mod state;

pub use flash::*;
pub use state::*;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension};
use uuid::Uuid;

pub struct SessionStore {
    conn: Arc<Mutex<Connection>>,
}

impl SessionStore {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Session database path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)
            .with_context(|| format!("Failed to open session database {}", path.display()))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().expect("session store lock poisoned");
        schema::run_migrations(&conn)
    }

    /// Load an unexpired session. Unreadable records are treated as absent.
    pub fn load(&self, id: Uuid) -> Result<Option<SessionData>> {
        let conn = self.conn.lock().expect("session store lock poisoned");
        let data: Option<String> = conn
            .query_row(
                "SELECT data FROM sessions WHERE id = ? AND expires_at > ?",
                (id.to_string(), timestamp(Utc::now())),
                |row| row.get(0),
            )
            .optional()?;

        Ok(data.and_then(|json| match serde_json::from_str(&json) {
            Ok(data) => Some(data),
            Err(e) => {
                tracing::warn!(session_id = %id, "Ignoring unreadable session record: {}", e);
                None
            }
        }))
    }

    /// Insert or replace a session, pushing its expiry to `ttl` from now.
    pub fn save(&self, id: Uuid, data: &SessionData, ttl: chrono::Duration) -> Result<()> {
        let json = serde_json::to_string(data)?;
        let now = Utc::now();
        let conn = self.conn.lock().expect("session store lock poisoned");
        conn.execute(
            "INSERT INTO sessions (id, data, expires_at, updated_at) VALUES (?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                data = excluded.data,
                expires_at = excluded.expires_at,
                updated_at = excluded.updated_at",
            (id.to_string(), json, timestamp(now + ttl), timestamp(now)),
        )?;
        Ok(())
    }

    pub fn destroy(&self, id: Uuid) -> Result<bool> {
        let conn = self.conn.lock().expect("session store lock poisoned");
        let rows = conn.execute("DELETE FROM sessions WHERE id = ?", [id.to_string()])?;
        Ok(rows > 0)
    }

    /// Delete every expired session, returning how many were removed.
    pub fn purge_expired(&self) -> Result<usize> {
        let conn = self.conn.lock().expect("session store lock poisoned");
        let rows = conn.execute(
            "DELETE FROM sessions WHERE expires_at <= ?",
            [timestamp(Utc::now())],
        )?;
        Ok(rows)
    }

    /// Number of stored sessions, expired or not.
    pub fn count(&self) -> Result<usize> {
        let conn = self.conn.lock().expect("session store lock poisoned");
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM sessions", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

impl Clone for SessionStore {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
        }
    }
}

/// Fixed-width UTC timestamps so stored values compare correctly as text.
fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
