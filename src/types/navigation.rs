use serde::{Deserialize, Serialize};

use super::page::PageContext;

/// How a soft-navigation entry was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationMethod {
    #[serde(rename = "pushState")]
    PushState,
    #[serde(rename = "replaceState")]
    ReplaceState,
}

/// The state object attached to a history entry by a soft navigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryState {
    pub page: String,
    pub method: NavigationMethod,
    pub variant: String,
}

/// Document visibility, as reported by visibility-change events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Visible,
    Hidden,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Visible => "visible",
            Visibility::Hidden => "hidden",
        }
    }
}

/// A passive lifecycle event dispatched by the navigation host.
#[derive(Debug, Clone, PartialEq)]
pub enum LifecycleEvent {
    Popstate { state: Option<HistoryState> },
    Pageshow { persisted: bool },
    Pagehide { persisted: bool },
    Beforeunload,
    Unload,
    VisibilityChange { state: Visibility },
}

impl LifecycleEvent {
    /// The event's log tag.
    pub fn kind(&self) -> &'static str {
        match self {
            LifecycleEvent::Popstate { .. } => "popstate",
            LifecycleEvent::Pageshow { .. } => "pageshow",
            LifecycleEvent::Pagehide { .. } => "pagehide",
            LifecycleEvent::Beforeunload => "beforeunload",
            LifecycleEvent::Unload => "unload",
            LifecycleEvent::VisibilityChange { .. } => "visibilitychange",
        }
    }
}

/// Snapshot of the current navigation state, as shown in the info panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSnapshot {
    pub page: PageContext,
    pub referrer: String,
    pub history_length: usize,
    pub state: Option<HistoryState>,
}
