//! navprobe — a diagnostic harness for browser history APIs.
//!
//! Entry point: with the `gui` feature, opens the WebView shell with the
//! instrumented probe pages. Without it, runs a scripted console scenario
//! against the simulated browsing context.

#[cfg(feature = "gui")]
fn main() {
    tracing_subscriber::fmt::init();
    navprobe::ui::webview_app::run();
}

#[cfg(not(feature = "gui"))]
fn main() {
    tracing_subscriber::fmt::init();

    println!();
    println!("navprobe v{} — console scenario", env!("CARGO_PKG_VERSION"));
    println!("Exercises history APIs against the simulated browsing context");
    println!();

    demo_log_store();
    demo_navigation_host();
    demo_probe_scenario();
}

#[cfg(not(feature = "gui"))]
fn section(name: &str) {
    println!("───────────────────────────────────────────────");
    println!("  {}", name);
    println!("───────────────────────────────────────────────");
}

#[cfg(not(feature = "gui"))]
fn demo_log_store() {
    use std::sync::Arc;

    use navprobe::database::Database;
    use navprobe::managers::log_store::{EventLogStore, EventLogStoreTrait, MAX_LOG_LENGTH};
    use navprobe::managers::session_store::SqliteSessionStore;
    use navprobe::types::page::PageContext;

    section("Event Log Store");

    let db = Arc::new(Database::open_in_memory().expect("Failed to open database"));
    let storage = SqliteSessionStore::new(db).expect("Failed to open session store");
    println!("  Session id: {}", storage.session_id());

    let store = EventLogStore::new(Box::new(storage));
    let page = PageContext::new(Some("page-a"), "probe://localhost/a");

    for i in 0..(MAX_LOG_LENGTH + 10) {
        store
            .append_event(&page, "action", serde_json::json!({ "n": i }))
            .expect("append failed");
    }
    let log = store.read_log();
    println!(
        "  Appended {} events, kept {} (cap {})",
        MAX_LOG_LENGTH + 10,
        log.len(),
        MAX_LOG_LENGTH
    );
    println!("  Oldest kept: {}", log[0].details["n"]);
    println!();
}

#[cfg(not(feature = "gui"))]
fn demo_navigation_host() {
    use navprobe::managers::navigation_host::NavigationHost;

    section("Navigation Host");

    let mut host = NavigationHost::new("probe://localhost/a");
    host.register_page("/a", "page-a");
    host.add_listener(Box::new(|event, snapshot| {
        println!("  [{}] on {}", event.kind(), snapshot.page.resolve_id());
    }));

    host.push_state(None, "/a?v=v1");
    println!("  Pushed /a?v=v1, history length = {}", host.history_length());
    host.back();
    host.forward();
    host.assign("/b");
    println!("  Now at {} (referrer {})", host.current_url(), host.referrer());
    println!();
}

#[cfg(not(feature = "gui"))]
fn demo_probe_scenario() {
    use navprobe::app::App;
    use navprobe::types::navigation::Visibility;

    section("Probe scenario");

    let mut app = App::new(":memory:").expect("Failed to initialize navprobe");
    app.startup();

    app.probe.push_variant("v1");
    app.probe.push_variant("v2");
    app.probe.back();
    app.probe.forward();
    app.probe.go(-2);
    app.probe.reload();
    app.probe.assign("/b");
    app.probe.set_visibility(Visibility::Hidden);
    app.probe.set_visibility(Visibility::Visible);
    app.probe.click_anchor("#details");

    println!("{}", app.probe.render_info());
    println!("{}", app.probe.rendered_log());

    app.shutdown();
    println!("  {} entries recorded", app.probe.entries().len());
}
