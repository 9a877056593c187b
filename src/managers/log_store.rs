//! The event log store.
//!
//! A bounded, session-scoped log of navigation/lifecycle events, persisted
//! as a single JSON array under one storage key. Reads never fail: absent,
//! malformed, or unreadable stored data all degrade to the empty log, with
//! the cause reported to the diagnostic channel. Writes keep at most
//! [`MAX_LOG_LENGTH`] entries, silently dropping the oldest.

use serde_json::Value;
use tracing::warn;

use super::session_store::SessionStorage;
use crate::types::errors::LogError;
use crate::types::log::LogEntry;
use crate::types::page::PageContext;

/// Storage key holding the serialized log.
pub const LOG_KEY: &str = "webview-nav-log";

/// Maximum number of entries kept; oldest entries are dropped first.
pub const MAX_LOG_LENGTH: usize = 200;

/// Trait defining the event log store operations.
pub trait EventLogStoreTrait {
    fn read_log(&self) -> Vec<LogEntry>;
    fn write_log(&self, entries: Vec<LogEntry>) -> Result<(), LogError>;
    fn append_event(
        &self,
        page: &PageContext,
        kind: &str,
        details: Value,
    ) -> Result<LogEntry, LogError>;
    fn clear(&self) -> Result<(), LogError>;
}

/// Event log store over an injected session storage.
pub struct EventLogStore {
    storage: Box<dyn SessionStorage>,
}

impl EventLogStore {
    pub fn new(storage: Box<dyn SessionStorage>) -> Self {
        Self { storage }
    }
}

impl EventLogStoreTrait for EventLogStore {
    /// Reads the persisted log.
    ///
    /// Absent key, storage failure, non-JSON data, and non-array JSON all
    /// return the empty log. This operation never raises.
    fn read_log(&self) -> Vec<LogEntry> {
        let raw = match self.storage.get_item(LOG_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("failed to read nav log, treating as empty: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<LogEntry>>(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("stored nav log is not a JSON array, treating as empty: {}", e);
                Vec::new()
            }
        }
    }

    /// Serializes and persists `entries`, keeping only the most recent
    /// [`MAX_LOG_LENGTH`]. Overwrites the previous stored value entirely.
    fn write_log(&self, mut entries: Vec<LogEntry>) -> Result<(), LogError> {
        if entries.len() > MAX_LOG_LENGTH {
            entries = entries.split_off(entries.len() - MAX_LOG_LENGTH);
        }

        let json = serde_json::to_string(&entries)
            .map_err(|e| LogError::SerializationError(e.to_string()))?;
        self.storage
            .set_item(LOG_KEY, &json)
            .map_err(|e| LogError::StorageError(e.to_string()))?;
        Ok(())
    }

    /// Builds an entry for the given page, appends it, and persists the
    /// capped result. Returns the appended entry.
    ///
    /// Callers that must never block navigation are expected to ignore the
    /// error after reporting it; the log itself stays readable either way.
    fn append_event(
        &self,
        page: &PageContext,
        kind: &str,
        details: Value,
    ) -> Result<LogEntry, LogError> {
        let entry = LogEntry::new(kind, &page.resolve_id(), details);
        let mut log = self.read_log();
        log.push(entry.clone());
        self.write_log(log)?;
        Ok(entry)
    }

    /// Removes the stored log entirely.
    fn clear(&self) -> Result<(), LogError> {
        self.storage
            .remove_item(LOG_KEY)
            .map_err(|e| LogError::StorageError(e.to_string()))
    }
}
