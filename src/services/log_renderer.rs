//! Rendering of the event log and the navigation info panel.
//!
//! The renderer is a consumer of the store: it formats whatever entries it
//! is given, most recent first, and never fails. Unrenderable details fall
//! back to their debug representation.

use chrono::{Local, LocalResult, TimeZone};
use serde_json::Value;

use crate::types::log::LogEntry;
use crate::types::navigation::PageSnapshot;
use crate::types::page::url_path_and_query;

/// Trait defining the log/info rendering operations.
pub trait LogRendererTrait {
    fn render_log(&self, entries: &[LogEntry]) -> String;
    fn render_log_html(&self, entries: &[LogEntry]) -> String;
    fn render_info(&self, snapshot: &PageSnapshot) -> String;
}

/// Plain-text and HTML renderer for the navigation log.
pub struct LogRenderer;

impl LogRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Entries ordered for display: most recent first.
    fn ordered(entries: &[LogEntry]) -> Vec<&LogEntry> {
        let mut ordered: Vec<&LogEntry> = entries.iter().collect();
        ordered.sort_by(|a, b| b.time.cmp(&a.time));
        ordered
    }
}

impl Default for LogRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl LogRendererTrait for LogRenderer {
    /// Renders one line per entry: `TYPE  HH:MM:SS.mmm · page  details`.
    fn render_log(&self, entries: &[LogEntry]) -> String {
        let mut out = String::new();
        for entry in Self::ordered(entries) {
            out.push_str(&format!(
                "{:<16} {} · {}  {}\n",
                entry.kind,
                format_time(entry.time),
                entry.page,
                format_details(&entry.details)
            ));
        }
        out
    }

    /// Renders the log as markup for the WebView shell.
    fn render_log_html(&self, entries: &[LogEntry]) -> String {
        let mut html = String::with_capacity(entries.len() * 128);
        for entry in Self::ordered(entries) {
            let kind = if entry.kind.is_empty() {
                "unknown".to_string()
            } else {
                entry.kind.to_lowercase()
            };
            html.push_str("<div class=\"log-entry\"><div><div class=\"log-type event-");
            html.push_str(&escape_html(&kind));
            html.push_str("\">");
            html.push_str(&escape_html(&entry.kind));
            html.push_str("</div><div class=\"log-meta\">");
            html.push_str(&escape_html(&format_time(entry.time)));
            html.push_str(" · ");
            html.push_str(&escape_html(&entry.page));
            html.push_str("</div></div><div class=\"log-details\">");
            html.push_str(&escape_html(&format_details(&entry.details)));
            html.push_str("</div></div>");
        }
        html
    }

    /// Renders the navigation info panel.
    fn render_info(&self, snapshot: &PageSnapshot) -> String {
        let referrer = if snapshot.referrer.is_empty() {
            "(empty)"
        } else {
            &snapshot.referrer
        };
        let state = match &snapshot.state {
            Some(state) => serde_json::to_string_pretty(state)
                .unwrap_or_else(|_| format!("{:?}", state)),
            None => "null".to_string(),
        };
        format!(
            "url: {}\npath: {}\nreferrer: {}\nhistory length: {}\nstate: {}\n",
            snapshot.page.url,
            url_path_and_query(&snapshot.page.url),
            referrer,
            snapshot.history_length,
            state
        )
    }
}

/// Formats epoch milliseconds as `HH:MM:SS.mmm` local time.
pub fn format_time(time_ms: i64) -> String {
    match Local.timestamp_millis_opt(time_ms) {
        LocalResult::Single(dt) => dt.format("%H:%M:%S%.3f").to_string(),
        _ => "??:??:??.???".to_string(),
    }
}

/// Compact serialization of an entry's details. Absent details render as an
/// empty object; anything unserializable falls back to its debug form.
fn format_details(details: &Value) -> String {
    if details.is_null() {
        return "{}".to_string();
    }
    serde_json::to_string(details).unwrap_or_else(|_| format!("{:?}", details))
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
