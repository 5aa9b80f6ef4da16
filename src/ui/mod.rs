//! Kestrel UI layer.
//!
//! Uses `wry` for the embedded engine:
//! - Windows: WebView2
//! - Linux: WebKitGTK
//! - macOS: WKWebView
//!
//! The browser chrome is an HTML/JS overlay injected into each page; it talks
//! to Rust over wry IPC.

pub mod webview_app;
pub mod wry_surface;
