use navprobe::types::errors::*;

// === StorageError Tests ===

#[test]
fn storage_error_display_variants() {
    assert_eq!(
        StorageError::Unavailable("backing file gone".to_string()).to_string(),
        "Storage unavailable: backing file gone"
    );
    assert_eq!(
        StorageError::QuotaExceeded("5242881 of 5242880 bytes".to_string()).to_string(),
        "Storage quota exceeded: 5242881 of 5242880 bytes"
    );
    assert_eq!(
        StorageError::DatabaseError("disk I/O error".to_string()).to_string(),
        "Storage database error: disk I/O error"
    );
}

#[test]
fn storage_error_implements_error_trait() {
    let err: Box<dyn std::error::Error> =
        Box::new(StorageError::Unavailable("gone".to_string()));
    assert!(err.source().is_none());
}

// === LogError Tests ===

#[test]
fn log_error_display_variants() {
    assert_eq!(
        LogError::StorageError("quota exceeded".to_string()).to_string(),
        "Log storage error: quota exceeded"
    );
    assert_eq!(
        LogError::SerializationError("key must be a string".to_string()).to_string(),
        "Log serialization error: key must be a string"
    );
}

#[test]
fn log_error_implements_error_trait() {
    let err: Box<dyn std::error::Error> =
        Box::new(LogError::StorageError("unavailable".to_string()));
    assert!(err.source().is_none());
}
