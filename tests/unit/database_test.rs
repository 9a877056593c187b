//! Unit tests for the navprobe database layer (connection + migrations).

use navprobe::database::{migrations, Database};

#[test]
fn test_open_in_memory_succeeds() {
    let db = Database::open_in_memory();
    assert!(db.is_ok(), "open_in_memory should succeed");
}

#[test]
fn test_migrations_create_all_tables() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    let conn = db.connection();

    let expected_tables = ["schema_version", "session_meta", "session_store"];

    for table in &expected_tables {
        let exists: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name=?1",
                [table],
                |row| row.get(0),
            )
            .unwrap_or(false);
        assert!(exists, "Table '{}' should exist after migrations", table);
    }
}

#[test]
fn test_schema_version_recorded() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    assert_eq!(
        migrations::get_schema_version(db.connection()),
        migrations::CURRENT_SCHEMA_VERSION
    );
}

#[test]
fn test_migrations_are_idempotent() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    // Running migrations again must not fail or bump the version.
    migrations::run_all(db.connection()).expect("second run_all failed");
    assert_eq!(
        migrations::get_schema_version(db.connection()),
        migrations::CURRENT_SCHEMA_VERSION
    );
}

#[test]
fn test_open_on_disk_and_reopen() {
    let tmp = tempfile::tempdir().expect("tempdir failed");
    let path = tmp.path().join("navprobe.db");

    {
        let db = Database::open(&path).expect("open failed");
        db.connection()
            .execute(
                "INSERT INTO session_store (key, value, updated_at) VALUES ('k', 'v', 0)",
                [],
            )
            .unwrap();
    }

    let db = Database::open(&path).expect("reopen failed");
    let value: String = db
        .connection()
        .query_row("SELECT value FROM session_store WHERE key = 'k'", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(value, "v");
}
