//! Session-scoped key/value storage.
//!
//! Mirrors the shape of web session storage: string keys, string values,
//! a per-session identity, and a (approximate) byte quota. Backed by the
//! `session_store` table; with an in-memory database the stored values live
//! exactly as long as the session.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::params;
use uuid::Uuid;

use crate::database::Database;
use crate::types::errors::StorageError;

/// Default storage quota, roughly what browsers grant session storage.
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// Trait defining session-scoped key/value storage.
pub trait SessionStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
    fn clear(&self) -> Result<(), StorageError>;
    /// Number of stored keys.
    fn len(&self) -> Result<usize, StorageError>;

    fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.len()? == 0)
    }
}

/// Session storage backed by SQLite.
pub struct SqliteSessionStore {
    db: Arc<Database>,
    session_id: String,
    quota_bytes: usize,
}

impl SqliteSessionStore {
    /// Creates a store with the default quota and records the session in
    /// `session_meta`.
    pub fn new(db: Arc<Database>) -> Result<Self, StorageError> {
        Self::with_quota(db, DEFAULT_QUOTA_BYTES)
    }

    /// Creates a store with an explicit quota (in key+value characters).
    pub fn with_quota(db: Arc<Database>, quota_bytes: usize) -> Result<Self, StorageError> {
        let session_id = Uuid::new_v4().to_string();
        let started_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64;

        db.connection()
            .execute(
                "INSERT INTO session_meta (id, started_at) VALUES (?1, ?2)",
                params![session_id, started_at],
            )
            .map_err(|e| StorageError::DatabaseError(e.to_string()))?;

        Ok(Self {
            db,
            session_id,
            quota_bytes,
        })
    }

    /// The UUID assigned to this session on open.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Total characters currently held (keys plus values).
    fn used(&self) -> Result<usize, StorageError> {
        let used: i64 = self
            .db
            .connection()
            .query_row(
                "SELECT COALESCE(SUM(LENGTH(key) + LENGTH(value)), 0) FROM session_store",
                [],
                |row| row.get(0),
            )
            .map_err(|e| StorageError::DatabaseError(e.to_string()))?;
        Ok(used as usize)
    }

    /// Characters held by one key's current entry, 0 if absent.
    fn entry_size(&self, key: &str) -> Result<usize, StorageError> {
        let size: i64 = self
            .db
            .connection()
            .query_row(
                "SELECT COALESCE(LENGTH(key) + LENGTH(value), 0) FROM session_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .unwrap_or(0);
        Ok(size as usize)
    }
}

impl SessionStorage for SqliteSessionStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let result = self.db.connection().query_row(
            "SELECT value FROM session_store WHERE key = ?1",
            params![key],
            |row| row.get(0),
        );
        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StorageError::DatabaseError(e.to_string())),
        }
    }

    /// Stores a value, replacing any previous value for the key.
    /// Rejects the write if it would push total usage past the quota.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let projected =
            self.used()? - self.entry_size(key)? + key.chars().count() + value.chars().count();
        if projected > self.quota_bytes {
            return Err(StorageError::QuotaExceeded(format!(
                "{} of {} bytes",
                projected, self.quota_bytes
            )));
        }

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64;
        self.db
            .connection()
            .execute(
                "INSERT OR REPLACE INTO session_store (key, value, updated_at) VALUES (?1, ?2, ?3)",
                params![key, value, now],
            )
            .map_err(|e| StorageError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.db
            .connection()
            .execute("DELETE FROM session_store WHERE key = ?1", params![key])
            .map_err(|e| StorageError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.db
            .connection()
            .execute("DELETE FROM session_store", [])
            .map_err(|e| StorageError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    fn len(&self) -> Result<usize, StorageError> {
        let count: i64 = self
            .db
            .connection()
            .query_row("SELECT COUNT(*) FROM session_store", [], |row| row.get(0))
            .map_err(|e| StorageError::DatabaseError(e.to_string()))?;
        Ok(count as usize)
    }
}
