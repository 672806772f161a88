/*!
 * Key-value stores for session flags.
 *
 * The flags outlive a single page load, so the default store is a small
 * SQLite file; tests and embedders can use the in-memory store.
 */

use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::errors::SessionError;

/// Default database filename
const DEFAULT_DB_FILENAME: &str = "session.db";

/// Default directory name under the user's data directory
const DEFAULT_DB_DIRNAME: &str = "jobvocab";

/// String key-value storage with local-storage semantics
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `None` when the key was never set
    fn get(&self, key: &str) -> Result<Option<String>, SessionError>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> Result<(), SessionError>;
}

/// Process-local store
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        let entries = self.entries.lock().map_err(|_| SessionError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let mut entries = self.entries.lock().map_err(|_| SessionError::LockPoisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// SQLite-backed store that persists flags between invocations
pub struct SqliteStore {
    /// Path to the database file
    db_path: PathBuf,
    connection: Mutex<Connection>,
}

impl SqliteStore {
    /// Open the store at the default location
    pub fn open_default() -> Result<Self, SessionError> {
        let db_path = Self::default_path()?;
        Self::open(&db_path)
    }

    /// Open or create the store at the specified path
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self, SessionError> {
        let db_path = db_path.as_ref().to_path_buf();

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    SessionError::Store(format!("Failed to create store directory {:?}: {}", parent, e))
                })?;
            }
        }

        info!("Opening session store at: {:?}", db_path);
        let conn = Connection::open(&db_path)?;
        Self::initialize(&conn)?;

        Ok(Self {
            db_path,
            connection: Mutex::new(conn),
        })
    }

    /// Create an in-memory store (for testing)
    pub fn open_in_memory() -> Result<Self, SessionError> {
        debug!("Creating in-memory session store");
        let conn = Connection::open_in_memory()?;
        Self::initialize(&conn)?;

        Ok(Self {
            db_path: PathBuf::from(":memory:"),
            connection: Mutex::new(conn),
        })
    }

    /// Default store location under the user's data directory
    pub fn default_path() -> Result<PathBuf, SessionError> {
        let base_dir = dirs::data_local_dir()
            .or_else(dirs::data_dir)
            .or_else(|| dirs::home_dir().map(|h| h.join(".local").join("share")))
            .ok_or_else(|| SessionError::Store("Could not determine data directory".to_string()))?;

        Ok(base_dir.join(DEFAULT_DB_DIRNAME).join(DEFAULT_DB_FILENAME))
    }

    /// Get the database file path
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    fn initialize(conn: &Connection) -> Result<(), SessionError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT (datetime('now'))
            );
            "#,
        )?;
        Ok(())
    }
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore").field("db_path", &self.db_path).finish()
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        let conn = self.connection.lock().map_err(|_| SessionError::LockPoisoned)?;
        let value = conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let conn = self.connection.lock().map_err(|_| SessionError::LockPoisoned)?;
        conn.execute(
            "INSERT OR REPLACE INTO kv (key, value, updated_at) VALUES (?1, ?2, datetime('now'))",
            params![key, value],
        )?;
        Ok(())
    }
}
