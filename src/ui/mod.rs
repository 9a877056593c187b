//! navprobe UI layer.
//!
//! Uses `wry` for cross-platform WebView rendering and `tao` for the window.
//! The probe pages are served over a custom protocol; the in-page script
//! (resources/ui/probe.js) drives the real history APIs and reports every
//! event over wry IPC to the Rust-side store.

pub mod webview_app;
