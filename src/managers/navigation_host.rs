//! In-memory simulation of a browsing context.
//!
//! Maintains the history stack, current document, referrer, and visibility,
//! and dispatches lifecycle events to registered listeners in registration
//! order. The host is the collaborator the probe observes; it performs no
//! logging of its own.
//!
//! Event sequences follow the browser model the harness is meant to
//! exercise: hard loads fire beforeunload / pagehide(false) / unload and
//! then pageshow(false) on the new document; history traversal between
//! documents uses the back/forward-cache shape (pagehide(true), no unload,
//! pageshow(true)); same-document traversal fires popstate only.

use std::collections::HashMap;

use crate::types::navigation::{HistoryState, LifecycleEvent, PageSnapshot, Visibility};
use crate::types::page::{resolve_url, url_path, PageContext};

/// Callback invoked for every dispatched lifecycle event, together with the
/// snapshot of the page the event belongs to.
pub type NavigationListener = Box<dyn FnMut(&LifecycleEvent, &PageSnapshot)>;

/// One entry on the simulated history stack.
#[derive(Debug, Clone)]
struct HistoryRecord {
    url: String,
    state: Option<HistoryState>,
    /// Records created by push/replace-state share their page's document;
    /// hard loads allocate a fresh one.
    document: u64,
}

/// Simulated browsing context.
pub struct NavigationHost {
    records: Vec<HistoryRecord>,
    index: usize,
    next_document: u64,
    referrer: String,
    visibility: Visibility,
    /// Explicit page ids by URL path, standing in for an id attached to the
    /// page's root element.
    page_ids: HashMap<String, String>,
    listeners: Vec<NavigationListener>,
}

impl NavigationHost {
    /// Creates a host whose history contains the single starting document.
    pub fn new(start_url: &str) -> Self {
        Self {
            records: vec![HistoryRecord {
                url: start_url.to_string(),
                state: None,
                document: 0,
            }],
            index: 0,
            next_document: 1,
            referrer: String::new(),
            visibility: Visibility::Visible,
            page_ids: HashMap::new(),
            listeners: Vec::new(),
        }
    }

    /// Declares the explicit page id served at `path`.
    pub fn register_page(&mut self, path: &str, page_id: &str) {
        self.page_ids.insert(path.to_string(), page_id.to_string());
    }

    /// Registers a lifecycle-event listener. Dispatch order is registration
    /// order.
    pub fn add_listener(&mut self, listener: NavigationListener) {
        self.listeners.push(listener);
    }

    fn current(&self) -> &HistoryRecord {
        &self.records[self.index]
    }

    pub fn current_url(&self) -> &str {
        &self.current().url
    }

    pub fn state(&self) -> Option<HistoryState> {
        self.current().state.clone()
    }

    pub fn history_length(&self) -> usize {
        self.records.len()
    }

    pub fn history_index(&self) -> usize {
        self.index
    }

    pub fn referrer(&self) -> &str {
        &self.referrer
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Identity of the current page.
    pub fn page_context(&self) -> PageContext {
        let path = url_path(self.current_url());
        PageContext {
            page_id: self.page_ids.get(&path).cloned(),
            url: self.current_url().to_string(),
        }
    }

    /// Snapshot of the current navigation state.
    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            page: self.page_context(),
            referrer: self.referrer.clone(),
            history_length: self.records.len(),
            state: self.current().state.clone(),
        }
    }

    fn dispatch(&mut self, event: LifecycleEvent) {
        let snapshot = self.snapshot();
        for listener in &mut self.listeners {
            listener(&event, &snapshot);
        }
    }

    /// The teardown half of a document transition.
    fn unload_current(&mut self, persisted: bool) {
        self.dispatch(LifecycleEvent::Beforeunload);
        self.dispatch(LifecycleEvent::Pagehide { persisted });
        if !persisted {
            self.dispatch(LifecycleEvent::Unload);
        }
    }

    /// Hard navigation that appends a history entry (dropping any forward
    /// entries), like `location.assign` or following a plain link.
    pub fn assign(&mut self, target: &str) {
        let url = resolve_url(self.current_url(), target);
        let old_url = self.current_url().to_string();
        self.unload_current(false);
        self.records.truncate(self.index + 1);
        self.records.push(HistoryRecord {
            url,
            state: None,
            document: self.next_document,
        });
        self.next_document += 1;
        self.index += 1;
        self.referrer = old_url;
        self.dispatch(LifecycleEvent::Pageshow { persisted: false });
    }

    /// Hard navigation that replaces the current history entry, like
    /// `location.replace`.
    pub fn replace(&mut self, target: &str) {
        let url = resolve_url(self.current_url(), target);
        let old_url = self.current_url().to_string();
        self.unload_current(false);
        self.records[self.index] = HistoryRecord {
            url,
            state: None,
            document: self.next_document,
        };
        self.next_document += 1;
        self.referrer = old_url;
        self.dispatch(LifecycleEvent::Pageshow { persisted: false });
    }

    /// Full reload of the current entry. History state survives a reload.
    pub fn reload(&mut self) {
        self.unload_current(false);
        self.dispatch(LifecycleEvent::Pageshow { persisted: false });
    }

    /// Traverses the history stack by `delta`. Out-of-range deltas are
    /// no-ops; `go(0)` reloads.
    pub fn go(&mut self, delta: i64) {
        if delta == 0 {
            self.reload();
            return;
        }
        let target = self.index as i64 + delta;
        if target < 0 || target as usize >= self.records.len() {
            return;
        }
        let target = target as usize;

        if self.records[target].document == self.current().document {
            self.index = target;
            let state = self.current().state.clone();
            self.dispatch(LifecycleEvent::Popstate { state });
        } else {
            self.unload_current(true);
            self.index = target;
            self.dispatch(LifecycleEvent::Pageshow { persisted: true });
        }
    }

    pub fn back(&mut self) {
        self.go(-1);
    }

    pub fn forward(&mut self) {
        self.go(1);
    }

    /// Same-document history append, like `history.pushState`.
    pub fn push_state(&mut self, state: Option<HistoryState>, url: &str) {
        let url = resolve_url(self.current_url(), url);
        let document = self.current().document;
        self.records.truncate(self.index + 1);
        self.records.push(HistoryRecord {
            url,
            state,
            document,
        });
        self.index += 1;
    }

    /// Same-document replacement of the current entry, like
    /// `history.replaceState`.
    pub fn replace_state(&mut self, state: Option<HistoryState>, url: &str) {
        let url = resolve_url(self.current_url(), url);
        let record = &mut self.records[self.index];
        record.url = url;
        record.state = state;
    }

    /// Follows an anchor. Fragment-only hrefs are same-document jumps that
    /// append a history entry and fire popstate; everything else is a hard
    /// navigation.
    pub fn click_anchor(&mut self, href: &str) {
        if href.starts_with('#') {
            let url = resolve_url(self.current_url(), href);
            if url == self.current_url() {
                return;
            }
            let document = self.current().document;
            self.records.truncate(self.index + 1);
            self.records.push(HistoryRecord {
                url,
                state: None,
                document,
            });
            self.index += 1;
            self.dispatch(LifecycleEvent::Popstate { state: None });
        } else {
            self.assign(href);
        }
    }

    /// Final teardown of the current document, as when the window closes.
    pub fn close(&mut self) {
        self.unload_current(false);
    }

    /// Changes document visibility, dispatching an event on transitions.
    pub fn set_visibility(&mut self, visibility: Visibility) {
        if self.visibility != visibility {
            self.visibility = visibility;
            self.dispatch(LifecycleEvent::VisibilityChange { state: visibility });
        }
    }
}
