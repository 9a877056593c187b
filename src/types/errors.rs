use std::fmt;

// === StorageError ===

/// Errors raised by the session-scoped storage layer.
#[derive(Debug)]
pub enum StorageError {
    /// The backing storage cannot be reached.
    Unavailable(String),
    /// Writing the value would exceed the storage quota.
    QuotaExceeded(String),
    /// Database operation failed.
    DatabaseError(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable(msg) => write!(f, "Storage unavailable: {}", msg),
            StorageError::QuotaExceeded(msg) => write!(f, "Storage quota exceeded: {}", msg),
            StorageError::DatabaseError(msg) => write!(f, "Storage database error: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

// === LogError ===

/// Errors raised by the event log store's mutating operations.
///
/// Reads never raise; all read failures degrade to an empty log.
#[derive(Debug)]
pub enum LogError {
    /// The underlying session storage rejected the operation.
    StorageError(String),
    /// Failed to serialize the log for persistence.
    SerializationError(String),
}

impl fmt::Display for LogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogError::StorageError(msg) => write!(f, "Log storage error: {}", msg),
            LogError::SerializationError(msg) => {
                write!(f, "Log serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for LogError {}
