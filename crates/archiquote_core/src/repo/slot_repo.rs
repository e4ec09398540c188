//! Key-value slot storage contracts and implementations.
//!
//! # Responsibility
//! - Provide the durable `get`/`set` medium the record store persists its
//!   snapshot into.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `set` replaces the whole value of a slot; there is no partial patch.
//! - A read immediately after a successful `set` observes that value.

use crate::db::{open_db, open_db_in_memory, DbError};
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

pub type RepoResult<T> = Result<T, RepoError>;

/// Slot storage failure.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Medium refused the operation for a non-database reason.
    Unavailable(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(message) => write!(f, "slot storage unavailable: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Synchronous single-value-per-key durable medium.
pub trait SlotStorage {
    fn get(&self, key: &str) -> RepoResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> RepoResult<()>;
}

impl<T: SlotStorage + ?Sized> SlotStorage for &T {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> RepoResult<()> {
        (**self).set(key, value)
    }
}

/// SQLite-backed slot storage over the `kv_slots` table.
pub struct SqliteSlotStorage {
    conn: Connection,
}

impl SqliteSlotStorage {
    /// Wraps a connection that already has migrations applied.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Opens a database file, applying migrations first.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        Ok(Self::new(open_db(path)?))
    }

    pub fn open_in_memory() -> RepoResult<Self> {
        Ok(Self::new(open_db_in_memory()?))
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl SlotStorage for SqliteSlotStorage {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_slots WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO kv_slots (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

/// Process-local slot storage for hosts without a database file.
#[derive(Debug, Default)]
pub struct MemorySlotStorage {
    slots: RefCell<BTreeMap<String, String>>,
}

impl MemorySlotStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a slot, e.g. with a payload saved by an older build.
    pub fn with_slot(key: impl Into<String>, value: impl Into<String>) -> Self {
        let storage = Self::default();
        storage.slots.borrow_mut().insert(key.into(), value.into());
        storage
    }
}

impl SlotStorage for MemorySlotStorage {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> RepoResult<()> {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{MemorySlotStorage, SlotStorage, SqliteSlotStorage};

    #[test]
    fn sqlite_set_replaces_previous_value() {
        let storage = SqliteSlotStorage::open_in_memory().unwrap();
        assert_eq!(storage.get("slot").unwrap(), None);

        storage.set("slot", "first").unwrap();
        storage.set("slot", "second").unwrap();
        assert_eq!(storage.get("slot").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn memory_slots_are_independent() {
        let storage = MemorySlotStorage::with_slot("a", "1");
        storage.set("b", "2").unwrap();
        assert_eq!(storage.get("a").unwrap().as_deref(), Some("1"));
        assert_eq!(storage.get("b").unwrap().as_deref(), Some("2"));
        assert_eq!(storage.get("c").unwrap(), None);
    }
}
