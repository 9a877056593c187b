//! navprobe database layer.
//!
//! Provides SQLite connection management and schema migrations for the
//! session-scoped storage backing the navigation log.
//!
//! # Usage
//!
//! ```no_run
//! use navprobe::database::Database;
//!
//! // In-memory: storage lives exactly as long as the session.
//! let db = Database::open_in_memory().expect("failed to open database");
//!
//! // File-backed: keeps the log around for post-mortem inspection.
//! let db = Database::open("navprobe.db").expect("failed to open database");
//!
//! let conn = db.connection();
//! ```

pub mod connection;
pub mod migrations;

pub use connection::Database;
