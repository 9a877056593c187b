//! Unit tests for the simulated browsing context.
//!
//! Listeners collect dispatched events so the tests can assert on both the
//! event sequences and the page each event was attributed to.

use std::cell::RefCell;
use std::rc::Rc;

use navprobe::managers::navigation_host::NavigationHost;
use navprobe::types::navigation::{
    HistoryState, LifecycleEvent, NavigationMethod, Visibility,
};

type Recorded = Rc<RefCell<Vec<(LifecycleEvent, String)>>>;

/// Host on page A with a recording listener attached.
fn setup() -> (NavigationHost, Recorded) {
    let mut host = NavigationHost::new("probe://localhost/a");
    host.register_page("/a", "page-a");
    host.register_page("/b", "page-b");

    let recorded: Recorded = Rc::new(RefCell::new(Vec::new()));
    let sink = recorded.clone();
    host.add_listener(Box::new(move |event, snapshot| {
        sink.borrow_mut()
            .push((event.clone(), snapshot.page.resolve_id()));
    }));
    (host, recorded)
}

fn kinds(recorded: &Recorded) -> Vec<&'static str> {
    recorded.borrow().iter().map(|(e, _)| e.kind()).collect()
}

fn state(variant: &str) -> HistoryState {
    HistoryState {
        page: "page-a".to_string(),
        method: NavigationMethod::PushState,
        variant: variant.to_string(),
    }
}

#[test]
fn test_initial_state() {
    let (host, recorded) = setup();
    assert_eq!(host.current_url(), "probe://localhost/a");
    assert_eq!(host.history_length(), 1);
    assert_eq!(host.history_index(), 0);
    assert_eq!(host.state(), None);
    assert_eq!(host.referrer(), "");
    assert_eq!(host.visibility(), Visibility::Visible);
    assert!(recorded.borrow().is_empty());
}

#[test]
fn test_push_state_appends_silently() {
    let (mut host, recorded) = setup();
    host.push_state(Some(state("v1")), "/a?v=v1");

    assert_eq!(host.current_url(), "probe://localhost/a?v=v1");
    assert_eq!(host.history_length(), 2);
    assert_eq!(host.history_index(), 1);
    assert_eq!(host.state(), Some(state("v1")));
    // pushState itself fires no lifecycle event.
    assert!(recorded.borrow().is_empty());
}

#[test]
fn test_replace_state_keeps_length() {
    let (mut host, recorded) = setup();
    host.replace_state(Some(state("v2")), "/a?v=v2");

    assert_eq!(host.current_url(), "probe://localhost/a?v=v2");
    assert_eq!(host.history_length(), 1);
    assert_eq!(host.state(), Some(state("v2")));
    assert!(recorded.borrow().is_empty());
}

#[test]
fn test_same_document_back_and_forward_fire_popstate() {
    let (mut host, recorded) = setup();
    host.push_state(Some(state("v1")), "/a?v=v1");

    host.back();
    assert_eq!(host.history_index(), 0);
    host.forward();
    assert_eq!(host.history_index(), 1);

    let events = recorded.borrow();
    assert_eq!(events.len(), 2);
    // Back lands on the original entry (no state), forward on the pushed one.
    assert_eq!(events[0].0, LifecycleEvent::Popstate { state: None });
    assert_eq!(
        events[1].0,
        LifecycleEvent::Popstate {
            state: Some(state("v1"))
        }
    );
}

#[test]
fn test_out_of_range_go_is_noop() {
    let (mut host, recorded) = setup();
    host.back();
    host.forward();
    host.go(5);
    host.go(-5);

    assert_eq!(host.history_index(), 0);
    assert!(recorded.borrow().is_empty());
}

#[test]
fn test_go_zero_reloads() {
    let (mut host, recorded) = setup();
    host.go(0);
    assert_eq!(
        kinds(&recorded),
        vec!["beforeunload", "pagehide", "unload", "pageshow"]
    );
}

#[test]
fn test_assign_fires_full_unload_sequence() {
    let (mut host, recorded) = setup();
    host.assign("/b");

    assert_eq!(host.current_url(), "probe://localhost/b");
    assert_eq!(host.history_length(), 2);
    assert_eq!(host.referrer(), "probe://localhost/a");
    assert_eq!(
        kinds(&recorded),
        vec!["beforeunload", "pagehide", "unload", "pageshow"]
    );

    // Teardown events belong to the old page, pageshow to the new one.
    let events = recorded.borrow();
    assert_eq!(events[1], (LifecycleEvent::Pagehide { persisted: false }, "page-a".to_string()));
    assert_eq!(events[3], (LifecycleEvent::Pageshow { persisted: false }, "page-b".to_string()));
}

#[test]
fn test_assign_truncates_forward_entries() {
    let (mut host, _recorded) = setup();
    host.push_state(Some(state("v1")), "/a?v=v1");
    host.push_state(Some(state("v2")), "/a?v=v2");
    host.back();
    host.back();
    assert_eq!(host.history_index(), 0);

    host.assign("/b");
    assert_eq!(host.history_length(), 2);
    assert_eq!(host.history_index(), 1);
}

#[test]
fn test_replace_keeps_history_length() {
    let (mut host, recorded) = setup();
    host.replace("/b");

    assert_eq!(host.current_url(), "probe://localhost/b");
    assert_eq!(host.history_length(), 1);
    assert_eq!(
        kinds(&recorded),
        vec!["beforeunload", "pagehide", "unload", "pageshow"]
    );
}

#[test]
fn test_cross_document_traversal_uses_bfcache_shape() {
    let (mut host, recorded) = setup();
    host.assign("/b");
    recorded.borrow_mut().clear();

    host.back();
    assert_eq!(host.current_url(), "probe://localhost/a");
    // No unload: the old document is persisted.
    assert_eq!(kinds(&recorded), vec!["beforeunload", "pagehide", "pageshow"]);

    let events = recorded.borrow();
    assert_eq!(events[1].0, LifecycleEvent::Pagehide { persisted: true });
    assert_eq!(events[2].0, LifecycleEvent::Pageshow { persisted: true });
}

#[test]
fn test_reload_preserves_state_and_length() {
    let (mut host, recorded) = setup();
    host.push_state(Some(state("v1")), "/a?v=v1");
    recorded.borrow_mut().clear();

    host.reload();
    assert_eq!(host.history_length(), 2);
    assert_eq!(host.state(), Some(state("v1")));
    assert_eq!(
        kinds(&recorded),
        vec!["beforeunload", "pagehide", "unload", "pageshow"]
    );
}

#[test]
fn test_fragment_anchor_is_same_document_jump() {
    let (mut host, recorded) = setup();
    host.click_anchor("#bottom");

    assert_eq!(host.current_url(), "probe://localhost/a#bottom");
    assert_eq!(host.history_length(), 2);
    assert_eq!(kinds(&recorded), vec!["popstate"]);

    // Clicking the same fragment again changes nothing.
    recorded.borrow_mut().clear();
    host.click_anchor("#bottom");
    assert_eq!(host.history_length(), 2);
    assert!(recorded.borrow().is_empty());
}

#[test]
fn test_non_fragment_anchor_is_hard_navigation() {
    let (mut host, recorded) = setup();
    host.click_anchor("/b");
    assert_eq!(host.current_url(), "probe://localhost/b");
    assert_eq!(
        kinds(&recorded),
        vec!["beforeunload", "pagehide", "unload", "pageshow"]
    );
}

#[test]
fn test_visibility_changes_fire_only_on_transition() {
    let (mut host, recorded) = setup();
    host.set_visibility(Visibility::Visible);
    assert!(recorded.borrow().is_empty());

    host.set_visibility(Visibility::Hidden);
    host.set_visibility(Visibility::Hidden);
    host.set_visibility(Visibility::Visible);

    let events = recorded.borrow();
    assert_eq!(events.len(), 2);
    assert_eq!(
        events[0].0,
        LifecycleEvent::VisibilityChange {
            state: Visibility::Hidden
        }
    );
}

#[test]
fn test_page_context_resolution() {
    let (mut host, _recorded) = setup();
    assert_eq!(host.page_context().resolve_id(), "page-a");

    // Unregistered path: falls back to the URL path.
    host.assign("/somewhere-else");
    assert_eq!(host.page_context().page_id, None);
    assert_eq!(host.page_context().resolve_id(), "/somewhere-else");
}

#[test]
fn test_close_fires_teardown_only() {
    let (mut host, recorded) = setup();
    host.close();
    assert_eq!(kinds(&recorded), vec!["beforeunload", "pagehide", "unload"]);
    assert_eq!(host.current_url(), "probe://localhost/a");
}
