//! The navigation probe.
//!
//! Wires the navigation host into the event log store: every user action
//! and every lifecycle event the host dispatches becomes one log entry, and
//! the rendered log is refreshed after each mutation. Store failures are
//! reported to the diagnostic channel and otherwise ignored. Recording must
//! never block the navigation being observed, so none of the probe's
//! methods return errors.

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::warn;

use crate::managers::log_store::{EventLogStore, EventLogStoreTrait};
use crate::managers::navigation_host::NavigationHost;
use crate::services::log_renderer::{LogRenderer, LogRendererTrait};
use crate::types::log::LogEntry;
use crate::types::navigation::{
    HistoryState, LifecycleEvent, NavigationMethod, PageSnapshot, Visibility,
};
use crate::types::page::{with_variant_param, PageContext};

/// Details payload for a lifecycle event, in the shapes the log format uses.
fn event_details(event: &LifecycleEvent) -> Value {
    match event {
        LifecycleEvent::Popstate { state } => json!({ "state": state }),
        LifecycleEvent::Pageshow { persisted } => json!({ "persisted": persisted }),
        LifecycleEvent::Pagehide { persisted } => json!({ "persisted": persisted }),
        LifecycleEvent::Beforeunload | LifecycleEvent::Unload => json!({}),
        LifecycleEvent::VisibilityChange { state } => {
            json!({ "visibilityState": state.as_str() })
        }
    }
}

/// Probe over a navigation host, recording into an event log store.
pub struct NavigationProbe {
    host: NavigationHost,
    store: Arc<EventLogStore>,
    renderer: LogRenderer,
    last_render: String,
}

impl NavigationProbe {
    /// Wires the store into the host's lifecycle events and returns the
    /// probe. Call [`init`](Self::init) to record the initial page load.
    pub fn new(store: Arc<EventLogStore>, mut host: NavigationHost) -> Self {
        let listener_store = store.clone();
        host.add_listener(Box::new(move |event, snapshot| {
            let details = event_details(event);
            if let Err(e) = listener_store.append_event(&snapshot.page, event.kind(), details) {
                warn!("failed to record {} event: {}", event.kind(), e);
            }
        }));

        Self {
            host,
            store,
            renderer: LogRenderer::new(),
            last_render: String::new(),
        }
    }

    fn log_event(&self, kind: &str, details: Value) {
        if let Err(e) = self
            .store
            .append_event(&self.host.page_context(), kind, details)
        {
            warn!("failed to record {} event: {}", kind, e);
        }
    }

    fn refresh(&mut self) {
        self.last_render = self.renderer.render_log(&self.store.read_log());
    }

    /// Entry-point sequence: render whatever log the session already holds,
    /// then record the page load itself.
    pub fn init(&mut self) {
        self.refresh();
        let page = self.host.page_context();
        self.log_event(
            "init",
            json!({ "url": self.host.current_url(), "page": page.resolve_id() }),
        );
        self.refresh();
    }

    /// Teardown: drives the host through its unload sequence so the end of
    /// the session is observable in the log.
    pub fn shutdown(&mut self) {
        self.host.close();
        self.refresh();
    }

    // ─── Manual navigation actions ───

    pub fn back(&mut self) {
        self.log_event("action", json!({ "action": "history.back" }));
        self.host.back();
        self.refresh();
    }

    pub fn forward(&mut self) {
        self.log_event("action", json!({ "action": "history.forward" }));
        self.host.forward();
        self.refresh();
    }

    pub fn reload(&mut self) {
        self.log_event("action", json!({ "action": "location.reload" }));
        self.host.reload();
        self.refresh();
    }

    pub fn go(&mut self, delta: i64) {
        self.log_event("action", json!({ "action": "history.go", "delta": delta }));
        self.host.go(delta);
        self.refresh();
    }

    pub fn assign(&mut self, target: &str) {
        self.log_event(
            "action",
            json!({ "action": "location.assign", "target": target }),
        );
        self.host.assign(target);
        self.refresh();
    }

    pub fn replace(&mut self, target: &str) {
        self.log_event(
            "action",
            json!({ "action": "location.replace", "target": target }),
        );
        self.host.replace(target);
        self.refresh();
    }

    pub fn click_anchor(&mut self, href: &str) {
        self.log_event("action", json!({ "action": "anchor-click", "href": href }));
        self.host.click_anchor(href);
        self.refresh();
    }

    // ─── Soft navigation ───

    /// Pushes a history entry whose URL carries `v=<variant>`.
    pub fn push_variant(&mut self, variant: &str) {
        let url = with_variant_param(self.host.current_url(), variant);
        let state = HistoryState {
            page: self.host.page_context().resolve_id(),
            method: NavigationMethod::PushState,
            variant: variant.to_string(),
        };
        self.host.push_state(Some(state.clone()), &url);
        self.log_event(
            "popstate-like",
            json!({ "action": "history.pushState", "url": url, "state": state }),
        );
        self.refresh();
    }

    /// Replaces the current history entry with one carrying `v=<variant>`.
    pub fn replace_variant(&mut self, variant: &str) {
        let url = with_variant_param(self.host.current_url(), variant);
        let state = HistoryState {
            page: self.host.page_context().resolve_id(),
            method: NavigationMethod::ReplaceState,
            variant: variant.to_string(),
        };
        self.host.replace_state(Some(state.clone()), &url);
        self.log_event(
            "popstate-like",
            json!({ "action": "history.replaceState", "url": url, "state": state }),
        );
        self.refresh();
    }

    // ─── Passive inputs ───

    pub fn set_visibility(&mut self, visibility: Visibility) {
        self.host.set_visibility(visibility);
        self.refresh();
    }

    /// Records an event reported from outside the simulation (the WebView
    /// page). When no page identity is supplied, the host's current page is
    /// used.
    pub fn record(&mut self, page: Option<PageContext>, kind: &str, details: Value) {
        let page = page.unwrap_or_else(|| self.host.page_context());
        if let Err(e) = self.store.append_event(&page, kind, details) {
            warn!("failed to record {} event: {}", kind, e);
        }
        self.refresh();
    }

    /// Drops the stored log.
    pub fn clear_log(&mut self) {
        if let Err(e) = self.store.clear() {
            warn!("failed to clear nav log: {}", e);
        }
        self.refresh();
    }

    // ─── Views ───

    /// The log rendering produced by the latest mutation.
    pub fn rendered_log(&self) -> &str {
        &self.last_render
    }

    pub fn render_log_html(&self) -> String {
        self.renderer.render_log_html(&self.store.read_log())
    }

    pub fn render_info(&self) -> String {
        self.renderer.render_info(&self.host.snapshot())
    }

    pub fn snapshot(&self) -> PageSnapshot {
        self.host.snapshot()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.store.read_log()
    }

    pub fn host(&self) -> &NavigationHost {
        &self.host
    }
}
