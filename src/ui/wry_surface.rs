//! `ContentSurface` backed by a `wry::WebView`.
//!
//! Every tab is its own webview inside its browser window. Engine callbacks
//! are forwarded to the event loop as [`UserEvent`]s tagged with the window
//! and tab ids; nothing here touches browser state directly.

use std::borrow::Cow;
use std::path::PathBuf;
use std::rc::Rc;

use tao::event_loop::EventLoopProxy;
use tao::window::{Window, WindowId};
use tracing::{debug, warn};
use wry::{PageLoadEvent, Rect, WebView, WebViewBuilder};

use crate::services::download_negotiator::DownloadNegotiator;
use crate::services::url_classifier::BLANK_URL;
use crate::surface::{ContentSurface, FindFlags, NavigationStack, SurfaceEvent, SurfaceFactory};
use crate::types::errors::SurfaceError;
use crate::types::history::HistoryEntry;
use crate::types::tab::TabId;

/// Events delivered to the tao event loop.
#[derive(Debug)]
pub enum UserEvent {
    Surface {
        window: WindowId,
        tab: TabId,
        event: SurfaceEvent,
    },
    /// Raw JSON posted inside a tab, with the URL of the posting document.
    Ipc {
        window: WindowId,
        tab: TabId,
        sender: String,
        body: String,
    },
}

pub const TOOLBAR_JS: &str = include_str!("../../resources/ui/toolbar.js");

const PROTOCOL: &str = "kestrel";

/// Where `about:blank` is served from. Initialization scripts do not run on
/// `about:blank`, so the chrome needs a page of its own.
#[cfg(not(target_os = "windows"))]
pub const BLANK_PAGE_URL: &str = "kestrel://localhost/blank";
#[cfg(target_os = "windows")]
pub const BLANK_PAGE_URL: &str = "http://kestrel.localhost/blank";

/// The URL handed to the engine for a user-facing URL.
pub fn engine_url(url: &str) -> &str {
    if url == BLANK_URL {
        BLANK_PAGE_URL
    } else {
        url
    }
}

/// The user-facing URL for a URL the engine reports.
pub fn public_url(url: &str) -> String {
    if url.starts_with(BLANK_PAGE_URL) {
        BLANK_URL.to_string()
    } else {
        url.to_string()
    }
}

/// The overlay with the session token bound as `KESTREL_TOKEN`. The token
/// stays inside the wrapper's scope; page scripts cannot read it.
pub fn overlay_script(token: &str) -> String {
    let token = serde_json::to_string(token).unwrap_or_else(|_| "\"\"".to_string());
    format!("(function (KESTREL_TOKEN) {{\n{}\n}})({});", TOOLBAR_JS, token)
}

/// Blank page with the chrome inlined. Custom-protocol pages do not get
/// initialization scripts on WebView2.
fn blank_page(script: &str) -> String {
    let mut html = String::with_capacity(script.len() + 256);
    html.push_str("<!DOCTYPE html><html><head><meta charset=\"UTF-8\"><title></title></head><body>");
    html.push_str("<script>");
    html.push_str(script);
    html.push_str("</script></body></html>");
    html
}

/// What a page-load notification means for the tab. The address bar follows
/// a load as soon as it starts; the URL is committed when it finishes.
fn page_load_events(event: PageLoadEvent, url: &str) -> Vec<SurfaceEvent> {
    match event {
        PageLoadEvent::Started => vec![
            SurfaceEvent::LoadStarted,
            SurfaceEvent::ProvisionalUrl(public_url(url)),
        ],
        // The engine gives no success flag; a finished load counts as successful.
        PageLoadEvent::Finished => vec![
            SurfaceEvent::UrlChanged(public_url(url)),
            SurfaceEvent::LoadProgress(100),
            SurfaceEvent::LoadFinished { success: true },
        ],
    }
}

/// A JavaScript call into the chrome overlay with one JSON argument.
fn overlay_call(function: &str, json: &str) -> String {
    format!("window.{0} && window.{0}({1})", function, json)
}

fn find_script(text: &str, flags: FindFlags) -> String {
    if text.is_empty() {
        return "window.getSelection() && window.getSelection().removeAllRanges()".to_string();
    }
    let needle = serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string());
    format!(
        "window.find({}, {}, {}, true)",
        needle, flags.case_sensitive, flags.backward
    )
}

/// Bounds covering the whole client area of `window`.
pub fn content_bounds(window: &Window) -> Rect {
    let size = window.inner_size();
    Rect {
        position: wry::dpi::PhysicalPosition::new(0, 0).into(),
        size: wry::dpi::PhysicalSize::new(size.width, size.height).into(),
    }
}

pub struct WrySurface {
    id: TabId,
    webview: WebView,
    history: NavigationStack,
}

impl WrySurface {
    /// Pushes serialized chrome state into the overlay.
    pub fn render_chrome(&self, state_json: &str) {
        self.eval(&overlay_call("__kestrel_render", state_json));
    }

    pub fn show_history(&self, entries: &[HistoryEntry]) {
        match serde_json::to_string(entries) {
            Ok(json) => self.eval(&overlay_call("__kestrel_show_history", &json)),
            Err(err) => warn!("cannot serialize history: {}", err),
        }
    }

    pub fn set_bounds(&self, bounds: Rect) {
        if let Err(err) = self.webview.set_bounds(bounds) {
            debug!(tab = %self.id, "set_bounds failed: {}", err);
        }
    }

    fn eval(&self, script: &str) {
        if let Err(err) = self.webview.evaluate_script(script) {
            debug!(tab = %self.id, "script failed: {}", err);
        }
    }
}

impl ContentSurface for WrySurface {
    fn navigate(&mut self, url: &str) {
        if let Err(err) = self.webview.load_url(engine_url(url)) {
            warn!(tab = %self.id, "cannot load {}: {}", url, err);
        }
    }

    fn go_back(&mut self) {
        if self.history.go_back() {
            self.eval("history.back()");
        }
    }

    fn go_forward(&mut self) {
        if self.history.go_forward() {
            self.eval("history.forward()");
        }
    }

    fn reload(&mut self) {
        if let Err(err) = self.webview.reload() {
            warn!(tab = %self.id, "reload failed: {}", err);
        }
    }

    fn stop(&mut self) {
        self.eval("window.stop()");
    }

    fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    fn can_go_forward(&self) -> bool {
        self.history.can_go_forward()
    }

    fn set_zoom_factor(&mut self, factor: f64) {
        if let Err(err) = self.webview.zoom(factor) {
            warn!(tab = %self.id, "zoom failed: {}", err);
        }
    }

    fn find_in_page(&mut self, text: &str, flags: FindFlags) {
        self.eval(&find_script(text, flags));
    }

    fn set_visible(&mut self, visible: bool) {
        if let Err(err) = self.webview.set_visible(visible) {
            debug!(tab = %self.id, "set_visible failed: {}", err);
        }
    }

    fn clear_browsing_data(&mut self) {
        if let Err(err) = self.webview.clear_all_browsing_data() {
            warn!(tab = %self.id, "clearing browsing data failed: {}", err);
        }
    }

    // wry exposes no cache-only call; this also drops cookies and storage.
    fn clear_cache(&mut self) {
        debug!(tab = %self.id, "clearing cache through clear_all_browsing_data");
        self.clear_browsing_data();
    }

    fn url_committed(&mut self, url: &str) {
        self.history.commit(url);
    }
}

/// Sends surface events for one tab to the event loop.
#[derive(Clone)]
struct TabSender {
    proxy: EventLoopProxy<UserEvent>,
    window: WindowId,
    tab: TabId,
}

impl TabSender {
    fn send(&self, event: SurfaceEvent) {
        let _ = self.proxy.send_event(UserEvent::Surface {
            window: self.window,
            tab: self.tab.clone(),
            event,
        });
    }

    fn post(&self, sender: String, body: String) {
        let _ = self.proxy.send_event(UserEvent::Ipc {
            window: self.window,
            tab: self.tab.clone(),
            sender,
            body,
        });
    }
}

/// Builds one webview per tab inside one browser window.
pub struct WrySurfaceFactory {
    window: Rc<Window>,
    proxy: EventLoopProxy<UserEvent>,
    downloads: DownloadNegotiator,
    script: String,
}

impl WrySurfaceFactory {
    /// `token` is bound into the overlay of every tab this factory creates.
    pub fn new(
        window: Rc<Window>,
        proxy: EventLoopProxy<UserEvent>,
        downloads: DownloadNegotiator,
        token: &str,
    ) -> Self {
        Self {
            window,
            proxy,
            downloads,
            script: overlay_script(token),
        }
    }

    fn builder(&self, id: &TabId) -> WebViewBuilder<'static> {
        let sender = TabSender {
            proxy: self.proxy.clone(),
            window: self.window.id(),
            tab: id.clone(),
        };
        let (load, title, ipc, popup, download) = (
            sender.clone(),
            sender.clone(),
            sender.clone(),
            sender.clone(),
            sender,
        );
        let downloads = self.downloads.clone();
        let page = blank_page(&self.script);

        WebViewBuilder::new()
            .with_custom_protocol(PROTOCOL.into(), move |_wv_id, _request| {
                wry::http::Response::builder()
                    .header("Content-Type", "text/html; charset=utf-8")
                    .body(Cow::Owned(page.clone().into_bytes()))
                    .unwrap_or_else(|_| wry::http::Response::new(Cow::Owned(Vec::new())))
            })
            .with_initialization_script(self.script.as_str())
            .with_on_page_load_handler(move |event, url| {
                for event in page_load_events(event, &url) {
                    load.send(event);
                }
            })
            .with_document_title_changed_handler(move |text| {
                title.send(SurfaceEvent::TitleChanged(text));
            })
            .with_ipc_handler(move |request: wry::http::Request<String>| {
                let origin = public_url(&request.uri().to_string());
                ipc.post(origin, request.body().clone());
            })
            .with_new_window_req_handler(move |url, _features| {
                popup.send(SurfaceEvent::NewWindowRequested(url));
                wry::NewWindowResponse::Deny
            })
            .with_download_started_handler(move |url: String, path: &mut PathBuf| {
                let suggested = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .filter(|name| !name.is_empty())
                    .unwrap_or_else(|| url.rsplit('/').next().unwrap_or_default().to_string());
                match downloads.destination_for(&suggested) {
                    Some(destination) => {
                        debug!("saving {} to {}", url, destination.display());
                        *path = destination;
                        true
                    }
                    None => false,
                }
            })
            .with_download_completed_handler(move |_url, path, success| {
                download.send(SurfaceEvent::DownloadFinished { path, success });
            })
            .with_devtools(cfg!(debug_assertions))
    }
}

impl SurfaceFactory for WrySurfaceFactory {
    type Surface = WrySurface;

    fn create_surface(&mut self, id: &TabId) -> Result<WrySurface, SurfaceError> {
        let builder = self.builder(id);

        #[cfg(target_os = "linux")]
        let webview = {
            use tao::platform::unix::WindowExtUnix;
            use wry::WebViewBuilderExtUnix;
            let vbox = self
                .window
                .default_vbox()
                .ok_or_else(|| SurfaceError::Creation("window has no GTK container".into()))?;
            builder.build_gtk(vbox)
        };

        #[cfg(not(target_os = "linux"))]
        let webview = builder
            .with_bounds(content_bounds(&self.window))
            .build_as_child(&*self.window);

        let webview = webview.map_err(|err| SurfaceError::Creation(err.to_string()))?;
        Ok(WrySurface {
            id: id.clone(),
            webview,
            history: NavigationStack::new(),
        })
    }
}
