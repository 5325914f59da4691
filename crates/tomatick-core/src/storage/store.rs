//! SQLite-backed key-value persistence.
//!
//! Two independent JSON records live in a single `kv` table: `config` and
//! `stats`. Both are read once at startup -- a missing or unparsable row
//! falls back to defaults and is never surfaced to the user -- and
//! rewritten after every mutation of the corresponding state.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{params, Connection};

use crate::error::Result;
use crate::stats::TimerStats;
use crate::storage::TimerConfig;

use super::data_dir;

const CONFIG_KEY: &str = "config";
const STATS_KEY: &str = "stats";

/// Cloneable handle to the key-value store.
#[derive(Clone)]
pub struct Store {
    conn: Arc<Mutex<Connection>>,
}

impl Store {
    /// Open the store at `~/.config/tomatick/tomatick.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        Self::open_at(data_dir()?.join("tomatick.db"))
    }

    /// Open a store at an explicit path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory store (for tests).
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<()> {
        self.lock_conn().execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    fn lock_conn(&self) -> MutexGuard<'_, Connection> {
        self.conn
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn kv_get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.lock_conn();
        let mut stmt = conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let mut rows = stmt.query(params![key])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    pub fn kv_set(&self, key: &str, value: &str) -> Result<()> {
        self.lock_conn().execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Read the persisted configuration record.
    pub fn load_config(&self) -> TimerConfig {
        self.load_record(CONFIG_KEY)
    }

    /// Read the persisted statistics record.
    pub fn load_stats(&self) -> TimerStats {
        self.load_record(STATS_KEY)
    }

    /// Rewrite the configuration record.
    ///
    /// # Errors
    /// Returns an error if the write fails; callers at the engine boundary
    /// swallow it and keep the in-memory state authoritative.
    pub fn save_config(&self, config: &TimerConfig) -> Result<()> {
        self.save_record(CONFIG_KEY, config)
    }

    /// Rewrite the statistics record.
    ///
    /// # Errors
    /// Returns an error if the write fails; callers at the engine boundary
    /// swallow it and keep the in-memory state authoritative.
    pub fn save_stats(&self, stats: &TimerStats) -> Result<()> {
        self.save_record(STATS_KEY, stats)
    }

    fn load_record<T>(&self, key: &str) -> T
    where
        T: Default + serde::de::DeserializeOwned,
    {
        match self.kv_get(key) {
            Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|err| {
                tracing::warn!("malformed {key} record, using defaults: {err}");
                T::default()
            }),
            Ok(None) => T::default(),
            Err(err) => {
                tracing::warn!("failed to read {key} record, using defaults: {err}");
                T::default()
            }
        }
    }

    fn save_record<T: serde::Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.kv_set(key, &json)
    }
}
