//! App core for navprobe.
//!
//! Central struct wiring the database, session storage, event log store,
//! and navigation probe together, and managing harness lifecycle.

use std::sync::Arc;

use crate::database::Database;
use crate::managers::log_store::EventLogStore;
use crate::managers::navigation_host::NavigationHost;
use crate::managers::session_store::SqliteSessionStore;
use crate::services::navigation_probe::NavigationProbe;

/// URL of the first probe page.
pub const START_URL: &str = "probe://localhost/a";

/// Central application struct holding the probe and its backing database.
pub struct App {
    pub db: Arc<Database>,
    pub probe: NavigationProbe,
}

impl App {
    /// Creates a new App.
    ///
    /// Pass `":memory:"` for a database scoped to this session (the normal
    /// mode), or a file path to keep the log for post-mortem inspection.
    pub fn new(db_path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let db = Arc::new(Database::open(db_path)?);

        let storage = SqliteSessionStore::new(db.clone())
            .map_err(|e| format!("Session store init failed: {}", e))?;
        let store = Arc::new(EventLogStore::new(Box::new(storage)));

        let mut host = NavigationHost::new(START_URL);
        host.register_page("/a", "page-a");
        host.register_page("/b", "page-b");

        let probe = NavigationProbe::new(store, host);

        Ok(Self { db, probe })
    }

    /// Startup sequence: render the existing log and record the page load.
    pub fn startup(&mut self) {
        self.probe.init();
    }

    /// Shutdown sequence: drive the unload events so teardown is logged.
    pub fn shutdown(&mut self) {
        self.probe.shutdown();
    }
}
