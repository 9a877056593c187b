//! JSON method dispatch for navprobe.
//!
//! The `handle_method` function routes method calls from the WebView shell
//! (and from tests, which exercise the same code path) to the probe.

use std::sync::Mutex;

use serde_json::{json, Value};

use crate::app::App;
use crate::types::navigation::Visibility;
use crate::types::page::PageContext;

/// Dispatch a method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Log ───
        "log.record" => {
            let kind = params
                .get("type")
                .and_then(|v| v.as_str())
                .ok_or("missing type")?;
            let details = params.get("details").cloned().unwrap_or_else(|| json!({}));
            let page = params.get("url").and_then(|v| v.as_str()).map(|url| {
                PageContext::new(params.get("page_id").and_then(|v| v.as_str()), url)
            });
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.probe.record(page, kind, details);
            Ok(json!({"ok": true}))
        }
        "log.entries" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            serde_json::to_value(a.probe.entries()).map_err(|e| e.to_string())
        }
        "log.render" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            Ok(json!({
                "text": a.probe.rendered_log(),
                "html": a.probe.render_log_html(),
            }))
        }
        "log.clear" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.probe.clear_log();
            Ok(json!({"ok": true}))
        }

        // ─── Info panel ───
        "info.get" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            serde_json::to_value(a.probe.snapshot()).map_err(|e| e.to_string())
        }
        "info.render" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            Ok(json!({"text": a.probe.render_info()}))
        }

        // ─── Simulated navigation actions ───
        "probe.action" => {
            let action = params
                .get("action")
                .and_then(|v| v.as_str())
                .ok_or("missing action")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            match action {
                "back" => a.probe.back(),
                "forward" => a.probe.forward(),
                "reload" => a.probe.reload(),
                "go" => {
                    let delta = params
                        .get("delta")
                        .and_then(|v| v.as_i64())
                        .ok_or("missing delta")?;
                    a.probe.go(delta);
                }
                "assign" => {
                    let target = params
                        .get("target")
                        .and_then(|v| v.as_str())
                        .ok_or("missing target")?;
                    a.probe.assign(target);
                }
                "replace" => {
                    let target = params
                        .get("target")
                        .and_then(|v| v.as_str())
                        .ok_or("missing target")?;
                    a.probe.replace(target);
                }
                "anchor" => {
                    let href = params
                        .get("href")
                        .and_then(|v| v.as_str())
                        .ok_or("missing href")?;
                    a.probe.click_anchor(href);
                }
                "pushState" => {
                    let variant = params
                        .get("variant")
                        .and_then(|v| v.as_str())
                        .unwrap_or("v1");
                    a.probe.push_variant(variant);
                }
                "replaceState" => {
                    let variant = params
                        .get("variant")
                        .and_then(|v| v.as_str())
                        .unwrap_or("v1");
                    a.probe.replace_variant(variant);
                }
                "visibility" => {
                    let state = params
                        .get("state")
                        .and_then(|v| v.as_str())
                        .ok_or("missing state")?;
                    let visibility = match state {
                        "visible" => Visibility::Visible,
                        "hidden" => Visibility::Hidden,
                        other => return Err(format!("invalid visibility: {}", other)),
                    };
                    a.probe.set_visibility(visibility);
                }
                other => return Err(format!("unknown action: {}", other)),
            }
            Ok(json!({"ok": true}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
