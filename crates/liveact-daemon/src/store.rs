//! SQLite persistence for live-activity content states, allowing active
//! sessions to survive daemon restarts.

use std::path::Path;
use std::sync::{Mutex, PoisonError};

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use tokio::sync::broadcast;

use liveact_core::{ActivityKind, ContentState};

use crate::error::StoreError;

/// One observed write to the store. A `None` state means the record was
/// cleared (no active session for that kind).
#[derive(Debug, Clone, PartialEq)]
pub struct StateChange {
    pub kind: ActivityKind,
    pub state: Option<ContentState>,
}

/// SQLite-backed store holding one nullable content state record per kind.
///
/// This is the sole source of truth for "is a live activity currently
/// active"; the platform notification is a derived projection of it.
/// Writes are last-write-wins; concurrent writers race and the most recent
/// write wins. Every write, including writes of null, is published on the
/// change stream.
pub struct ContentStateStore {
    conn: Mutex<Connection>,
    changes: broadcast::Sender<StateChange>,
}

impl ContentStateStore {
    /// Open (or create) a database at the given filesystem path and run
    /// migrations.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        Self::from_connection(Connection::open(path)?)
    }

    /// Open an in-memory database. Useful for testing.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        let (changes, _) = broadcast::channel(64);
        let store = Self {
            conn: Mutex::new(conn),
            changes,
        };
        store.migrate()?;
        Ok(store)
    }

    /// Create the schema if it does not already exist.
    fn migrate(&self) -> Result<(), StoreError> {
        self.lock_conn().execute_batch(
            "CREATE TABLE IF NOT EXISTS live_activity_states (
                kind       TEXT PRIMARY KEY,
                content    TEXT,
                updated_at TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Read the latest content state for a kind. `None` means no record
    /// exists or the record was cleared; the two are indistinguishable.
    pub fn read(&self, kind: ActivityKind) -> Result<Option<ContentState>, StoreError> {
        let content: Option<Option<String>> = self
            .lock_conn()
            .query_row(
                "SELECT content FROM live_activity_states WHERE kind = ?1",
                params![kind.identifier()],
                |row| row.get(0),
            )
            .optional()?;

        match content.flatten() {
            Some(raw) => {
                let payload = serde_json::from_str(&raw)?;
                Ok(Some(ContentState::decode(kind, payload)?))
            }
            None => Ok(None),
        }
    }

    /// Upsert the record for a kind, superseding any prior value, and
    /// publish the write on the change stream.
    pub fn write(
        &self,
        kind: ActivityKind,
        state: Option<ContentState>,
    ) -> Result<(), StoreError> {
        let content: Option<String> = match &state {
            Some(state) => Some(serde_json::to_string(&state.to_payload()?)?),
            None => None,
        };

        self.lock_conn().execute(
            "INSERT OR REPLACE INTO live_activity_states (kind, content, updated_at)
             VALUES (?1, ?2, ?3)",
            params![kind.identifier(), content, Utc::now().to_rfc3339()],
        )?;

        // Nobody listening is fine; the stream is best-effort.
        let _ = self.changes.send(StateChange { kind, state });
        Ok(())
    }

    /// Subscribe to the change stream. Receivers see every subsequent write,
    /// including writes of null.
    pub fn subscribe(&self) -> broadcast::Receiver<StateChange> {
        self.changes.subscribe()
    }

    fn lock_conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
