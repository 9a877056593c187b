use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One recorded navigation/lifecycle event.
///
/// The serialized shape is `{"time":..,"page":..,"type":..,"details":{..}}`.
/// `details` is an arbitrary JSON object whose meaning depends on `type`;
/// stored entries without a `details` field deserialize to an empty object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Milliseconds since the UNIX epoch, set at creation.
    pub time: i64,
    /// Identifier of the page that produced the entry.
    pub page: String,
    /// Event tag: "init", "action", "popstate", "pageshow", "pagehide",
    /// "beforeunload", "unload", "visibilitychange", "popstate-like".
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default = "empty_details")]
    pub details: Value,
}

/// Default payload for entries stored without one.
pub fn empty_details() -> Value {
    Value::Object(serde_json::Map::new())
}

/// Current wall-clock time in milliseconds since the UNIX epoch.
pub fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}

impl LogEntry {
    /// Creates an entry stamped with the current time.
    pub fn new(kind: &str, page: &str, details: Value) -> Self {
        Self {
            time: now_millis(),
            page: page.to_string(),
            kind: kind.to_string(),
            details,
        }
    }
}
