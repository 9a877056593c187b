//! WebView shell using `wry` + `tao`.
//!
//! Architecture:
//! - Two probe pages are served via the `probe://` custom protocol, so
//!   cross-document navigations (assign/replace/back across pages) can be
//!   exercised for real.
//! - The in-page script calls the actual history APIs and forwards every
//!   action and lifecycle event over IPC (`window.ipc.postMessage()`).
//! - Rust appends the event to the session log and evaluates a script that
//!   injects the freshly rendered log back into the page.

use std::sync::{Arc, Mutex};

use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoop, EventLoopBuilder};
use tao::window::WindowBuilder;
use wry::WebViewBuilder;

use crate::app::App;
use crate::rpc_handler::handle_method;

#[derive(Debug)]
enum UserEvent {
    EvalScript(String),
}

const PROBE_JS: &str = include_str!("../../resources/ui/probe.js");
const PROBE_CSS: &str = include_str!("../../resources/ui/probe.css");

/// Builds one probe page. The page id travels on `<body data-page-id>`,
/// which is where the in-page script picks it up.
fn probe_page(page_id: &str, title: &str, accent: &str) -> String {
    let mut html = String::with_capacity(PROBE_JS.len() + PROBE_CSS.len() + 4000);
    html.push_str("<!DOCTYPE html><html><head><meta charset=\"UTF-8\"><title>");
    html.push_str(title);
    html.push_str("</title><style>");
    html.push_str(PROBE_CSS);
    html.push_str(":root{--accent:");
    html.push_str(accent);
    html.push_str("}</style></head><body data-page-id=\"");
    html.push_str(page_id);
    html.push_str("\"><h1>");
    html.push_str(title);
    html.push_str("</h1>");
    html.push_str(
        r##"<section class="panel" id="info">
<h2>Navigation state</h2>
<dl>
<dt>URL</dt><dd id="current-url"></dd>
<dt>Path</dt><dd id="current-path"></dd>
<dt>Referrer</dt><dd id="referrer"></dd>
<dt>history.length</dt><dd id="history-length"></dd>
</dl>
<pre id="history-state"></pre>
</section>
<section class="panel">
<h2>Hard navigation</h2>
<button id="btn-back">history.back()</button>
<button id="btn-forward">history.forward()</button>
<button id="btn-reload">location.reload()</button>
<button id="btn-go-back-2">history.go(-2)</button>
<button id="btn-go-forward-2">history.go(2)</button>
<button class="btn-assign" data-target="/a">assign /a</button>
<button class="btn-assign" data-target="/b">assign /b</button>
<button class="btn-replace" data-target="/b">replace /b</button>
<a href="#bottom" data-link-kind="anchor">anchor #bottom</a>
</section>
<section class="panel">
<h2>Soft navigation</h2>
<button class="btn-pushstate" data-variant="v1">pushState v1</button>
<button class="btn-pushstate" data-variant="v2">pushState v2</button>
<button class="btn-replacestate" data-variant="v1">replaceState v1</button>
<button class="btn-replacestate" data-variant="v2">replaceState v2</button>
</section>
<section class="panel">
<h2>Event log</h2>
<button id="btn-clear-log">clear</button>
<div id="event-log"></div>
</section>
<div id="bottom"></div>
<script>"##,
    );
    html.push_str(PROBE_JS);
    html.push_str("</script></body></html>");
    html
}

// ─── IPC handler ───

fn handle_ipc(app: &Mutex<App>, message: &str) -> Option<UserEvent> {
    let msg: serde_json::Value = serde_json::from_str(message).ok()?;
    let cmd = msg.get("cmd")?.as_str()?;

    match cmd {
        "record" => {
            if let Err(e) = handle_method(app, "log.record", &msg) {
                eprintln!("[IPC] record failed: {}", e);
            }
            Some(UserEvent::EvalScript(apply_log_script(app)))
        }
        "ui_ready" => Some(UserEvent::EvalScript(apply_log_script(app))),
        "clear" => {
            let _ = handle_method(app, "log.clear", &serde_json::json!({}));
            Some(UserEvent::EvalScript(apply_log_script(app)))
        }
        _ => None,
    }
}

/// Script that replaces the page's log view with the current rendering.
fn apply_log_script(app: &Mutex<App>) -> String {
    let html = handle_method(app, "log.render", &serde_json::json!({}))
        .ok()
        .and_then(|v| v.get("html").cloned())
        .unwrap_or(serde_json::Value::String(String::new()));
    format!("if(window.__navprobe_applyLog)__navprobe_applyLog({})", html)
}

// ─── Main entry point ───

pub fn run() {
    let app = App::new(":memory:").expect("Failed to initialize navprobe");
    let state = Arc::new(Mutex::new(app));

    let event_loop: EventLoop<UserEvent> = EventLoopBuilder::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let window = WindowBuilder::new()
        .with_title("navprobe")
        .with_inner_size(tao::dpi::LogicalSize::new(1100.0, 800.0))
        .build(&event_loop)
        .expect("Failed to create window");

    let ipc_state = state.clone();
    let ipc_proxy = proxy.clone();

    let builder = WebViewBuilder::new()
        .with_custom_protocol("probe".into(), move |_wv_id, request| {
            let html = match request.uri().path() {
                "/b" => probe_page("page-b", "Probe page B", "#a371f7"),
                _ => probe_page("page-a", "Probe page A", "#58a6ff"),
            };
            wry::http::Response::builder()
                .header("Content-Type", "text/html; charset=utf-8")
                .body(html.into_bytes().into())
                .unwrap()
        })
        .with_url("probe://localhost/a")
        .with_ipc_handler(move |msg: wry::http::Request<String>| {
            let body = msg.body().as_str();
            if let Some(event) = handle_ipc(&ipc_state, body) {
                let _ = ipc_proxy.send_event(event);
            }
        })
        .with_devtools(cfg!(debug_assertions));

    #[cfg(target_os = "linux")]
    let webview = {
        use tao::platform::unix::WindowExtUnix;
        use wry::WebViewBuilderExtUnix;
        let vbox = window.default_vbox().expect("Failed to get GTK vbox");
        builder.build_gtk(vbox).expect("Failed to create WebView")
    };

    #[cfg(not(target_os = "linux"))]
    let webview = builder.build(&window).expect("Failed to create WebView");

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                // IPC delivery is unreliable while the page tears down, so
                // the host-side shutdown record is the authoritative one.
                let mut s = state.lock().unwrap();
                s.shutdown();
                *control_flow = ControlFlow::Exit;
            }

            Event::UserEvent(UserEvent::EvalScript(js)) => {
                let _ = webview.evaluate_script(&js);
            }

            _ => {}
        }
    });
}
