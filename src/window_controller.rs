//! Window Controller for Kestrel.
//!
//! Owns the tabs of one browser window and shares the profile's bookmarks,
//! history and theme with every other window. Turns user actions into
//! surface calls and folds engine events back into the state the chrome
//! displays. Persistence failures are logged and never interrupt browsing.

use std::cell::{Ref, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::app::App;
use crate::managers::bookmark_manager::{BookmarkManager, BookmarkManagerTrait};
use crate::managers::history_manager::{HistoryManager, HistoryManagerTrait};
use crate::managers::tab_manager::TabManager;
use crate::services::find_controller::{self, FindBar, FindRequest};
use crate::services::preferences::Preferences;
use crate::services::theme_engine::{ThemeEngine, ThemeEngineTrait};
use crate::services::url_classifier::{classify, host_of, same_origin, BLANK_URL};
use crate::services::zoom;
use crate::surface::{ContentSurface, SurfaceEvent, SurfaceFactory};
use crate::types::bookmark::MenuItem;
use crate::types::errors::{BookmarkError, TabError};
use crate::types::history::HistoryEntry;
use crate::types::settings::ThemeMode;
use crate::types::tab::TabId;

const SHORT_STATUS_MS: u32 = 2000;
const LONG_STATUS_MS: u32 = 3000;

/// A transient message for the status area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusMessage {
    pub text: String,
    pub timeout_ms: u32,
}

/// One entry of the tab strip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabView {
    pub index: usize,
    pub id: String,
    pub label: String,
    pub title: String,
    pub url: String,
    pub loading: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FindView {
    pub visible: bool,
    pub query: String,
    pub case_sensitive: bool,
}

/// Everything the chrome overlay renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChromeState {
    pub tabs: Vec<TabView>,
    pub current: usize,
    pub address: String,
    pub progress: u8,
    pub loading: bool,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub bookmarks: Vec<MenuItem>,
    pub bookmarked: bool,
    pub zoom: f64,
    pub theme: ThemeMode,
    pub css: BTreeMap<String, String>,
    pub home_page: String,
    pub find: FindView,
    pub status: Option<StatusMessage>,
}

pub struct WindowController<F: SurfaceFactory> {
    tabs: TabManager<F>,
    history: Rc<RefCell<HistoryManager>>,
    bookmarks: Rc<RefCell<BookmarkManager>>,
    preferences: Preferences,
    theme: Rc<RefCell<ThemeEngine>>,
    find_bar: FindBar,
    address_bar: String,
    status: Option<StatusMessage>,
}

impl<F: SurfaceFactory> WindowController<F> {
    /// A window over the profile in `app`. No tab is open until
    /// [`start`](Self::start) or [`start_at_home`](Self::start_at_home).
    pub fn new(app: &App, factory: F) -> Self {
        Self {
            tabs: TabManager::new(factory),
            history: app.history(),
            bookmarks: app.bookmarks(),
            preferences: app.preferences(),
            theme: app.theme(),
            find_bar: FindBar::new(),
            address_bar: String::new(),
            status: None,
        }
    }

    /// Opens the first tab with the classified `target`.
    pub fn start(&mut self, target: Option<&str>) -> Result<TabId, TabError> {
        let url = classify(target.unwrap_or_default());
        let id = self.tabs.open_tab(&url)?;
        self.address_bar = url;
        Ok(id)
    }

    /// Opens the first tab on the home page, as for a new window.
    pub fn start_at_home(&mut self) -> Result<TabId, TabError> {
        let home = self.home_page();
        let id = self.tabs.open_tab(&home)?;
        self.address_bar = home;
        Ok(id)
    }

    // === Navigation ===

    /// Classifies `input` and loads it into the current tab.
    pub fn navigate_to(&mut self, input: &str) {
        let url = classify(input);
        match self.tabs.current_mut() {
            Some(tab) => {
                tab.surface.navigate(&url);
                tab.state.url = url.clone();
            }
            None => {
                if let Err(err) = self.tabs.open_tab(&url) {
                    warn!("cannot open tab for {}: {}", url, err);
                    return;
                }
            }
        }
        self.address_bar = url;
    }

    /// Handles Enter in the address bar. Blank input is ignored.
    pub fn submit_address_bar(&mut self, text: &str) {
        if text.trim().is_empty() {
            debug!("ignoring empty address bar submission");
            return;
        }
        self.navigate_to(text);
    }

    pub fn back(&mut self) {
        if let Some(tab) = self.tabs.current_mut() {
            if tab.surface.can_go_back() {
                tab.surface.go_back();
            }
        }
    }

    pub fn forward(&mut self) {
        if let Some(tab) = self.tabs.current_mut() {
            if tab.surface.can_go_forward() {
                tab.surface.go_forward();
            }
        }
    }

    pub fn reload(&mut self) {
        if let Some(tab) = self.tabs.current_mut() {
            tab.surface.reload();
        }
    }

    pub fn stop(&mut self) {
        if let Some(tab) = self.tabs.current_mut() {
            tab.surface.stop();
        }
    }

    pub fn home(&mut self) {
        let home = self.home_page();
        self.navigate_to(&home);
    }

    // === Tabs ===

    /// Opens a tab on the home page.
    pub fn new_tab(&mut self) -> Option<TabId> {
        let home = self.home_page();
        match self.tabs.open_tab(&home) {
            Ok(id) => {
                self.address_bar = home;
                Some(id)
            }
            Err(err) => {
                warn!("cannot open tab: {}", err);
                None
            }
        }
    }

    pub fn close_tab(&mut self, index: usize) {
        match self.tabs.close_tab(index) {
            Ok(_) => self.refresh_from_current(),
            Err(TabError::LastTab) => debug!("keeping the last tab open"),
            Err(err) => debug!("ignoring close request: {}", err),
        }
    }

    pub fn close_current_tab(&mut self) {
        let index = self.tabs.current_index();
        self.close_tab(index);
    }

    pub fn close_tab_by_id(&mut self, id: &TabId) {
        match self.tabs.index_of(id) {
            Some(index) => self.close_tab(index),
            None => debug!("ignoring close request: {}", TabError::NotFound(id.to_string())),
        }
    }

    pub fn switch_to(&mut self, index: usize) {
        match self.tabs.switch_to(index) {
            Ok(()) => self.refresh_from_current(),
            Err(err) => debug!("ignoring switch request: {}", err),
        }
    }

    pub fn switch_to_id(&mut self, id: &TabId) {
        match self.tabs.index_of(id) {
            Some(index) => self.switch_to(index),
            None => debug!("ignoring switch request: {}", TabError::NotFound(id.to_string())),
        }
    }

    /// Creates a tab for a page-initiated window. The caller loads the URL.
    pub fn on_external_open_request(&mut self) -> Result<TabId, TabError> {
        let id = self.tabs.on_external_open_request()?;
        self.address_bar.clear();
        Ok(id)
    }

    /// Opens `url` in a fresh tab, as for `target="_blank"` links.
    pub fn open_link_in_new_tab(&mut self, url: &str) {
        if let Err(err) = self.on_external_open_request() {
            warn!("cannot open tab for {}: {}", url, err);
            return;
        }
        self.navigate_to(url);
    }

    /// Resets the address bar and the find highlight from the current tab.
    fn refresh_from_current(&mut self) {
        let Some(tab) = self.tabs.current_mut() else {
            return;
        };
        self.address_bar = tab.state.url.clone();
        if self.find_bar.is_visible() {
            if let Some(request) = self.find_bar.find_next() {
                find_controller::find(&mut tab.surface, &request.text, true, request.case_sensitive);
            }
        }
    }

    // === Zoom ===

    pub fn zoom_in(&mut self) {
        self.apply_zoom(zoom::zoom_in);
    }

    pub fn zoom_out(&mut self) {
        self.apply_zoom(zoom::zoom_out);
    }

    pub fn zoom_reset(&mut self) {
        self.apply_zoom(|_| zoom::zoom_reset());
    }

    fn apply_zoom(&mut self, step: impl Fn(f64) -> f64) {
        if let Some(tab) = self.tabs.current_mut() {
            tab.state.zoom_factor = step(tab.state.zoom_factor);
            tab.surface.set_zoom_factor(tab.state.zoom_factor);
        }
    }

    // === Bookmarks ===

    /// Bookmarks the current page.
    pub fn add_bookmark(&mut self) {
        let Some(tab) = self.tabs.current() else {
            return;
        };
        let (title, url) = (tab.state.title.clone(), tab.state.url.clone());
        let added = self.bookmarks.borrow_mut().add(&title, &url);
        match added {
            Ok(bookmark) => self.set_status(format!("Bookmarked: {}", bookmark.title), SHORT_STATUS_MS),
            Err(BookmarkError::InvalidUrl(url)) => debug!("not bookmarking {:?}", url),
            Err(err) => warn!("failed to save bookmark: {}", err),
        }
    }

    /// Removes the bookmark for the current page.
    pub fn remove_bookmark(&mut self) {
        let Some(url) = self.tabs.current().map(|tab| tab.state.url.clone()) else {
            return;
        };
        if url.is_empty() {
            return;
        }
        let removed = self.bookmarks.borrow_mut().remove(&url);
        match removed {
            Ok(_) => self.set_status("Bookmark removed", SHORT_STATUS_MS),
            Err(BookmarkError::NotFound(_)) => {
                self.set_status("Current page is not bookmarked", SHORT_STATUS_MS)
            }
            Err(err) => warn!("failed to remove bookmark: {}", err),
        }
    }

    pub fn remove_bookmark_at(&mut self, index: usize) {
        let removed = self.bookmarks.borrow_mut().remove_at(index);
        match removed {
            Ok(_) => {}
            Err(BookmarkError::InvalidIndex(index)) => debug!("no bookmark at {}", index),
            Err(err) => warn!("failed to remove bookmark: {}", err),
        }
    }

    pub fn clear_bookmarks(&mut self) {
        let cleared = self.bookmarks.borrow_mut().clear();
        match cleared {
            Ok(()) => self.set_status("All bookmarks cleared", LONG_STATUS_MS),
            Err(err) => warn!("failed to clear bookmarks: {}", err),
        }
    }

    pub fn open_bookmark(&mut self, index: usize) {
        let url = self.bookmarks.borrow().get(index).map(|b| b.url.clone());
        match url {
            Some(url) if !url.is_empty() => self.navigate_to(&url),
            _ => debug!("no bookmark at {}", index),
        }
    }

    pub fn bookmarks(&self) -> Ref<'_, BookmarkManager> {
        self.bookmarks.borrow()
    }

    // === Preferences ===

    /// Makes the current page the home page.
    pub fn set_home_page(&mut self) {
        let Some(url) = self.tabs.current().map(|tab| tab.state.url.clone()) else {
            return;
        };
        if url.is_empty() || url == BLANK_URL {
            debug!("not using {:?} as home page", url);
            return;
        }
        match self.preferences.set_home_page(&url) {
            Ok(()) => self.set_status(format!("Home page set to: {}", url), SHORT_STATUS_MS),
            Err(err) => warn!("failed to save home page: {}", err),
        }
    }

    pub fn reset_home_page(&mut self) {
        match self.preferences.reset_home_page() {
            Ok(url) => self.set_status(format!("Home page reset to {}", url), LONG_STATUS_MS),
            Err(err) => warn!("failed to reset home page: {}", err),
        }
    }

    pub fn home_page(&self) -> String {
        self.preferences.home_page().unwrap_or_else(|err| {
            warn!("failed to read home page: {}", err);
            crate::services::preferences::DEFAULT_HOME_PAGE.to_string()
        })
    }

    pub fn set_theme(&mut self, mode: ThemeMode) {
        self.theme.borrow_mut().set_theme(mode);
        if let Err(err) = self.preferences.set_theme(mode) {
            warn!("failed to save theme: {}", err);
        }
        self.set_status(format!("Theme changed to {}", mode), SHORT_STATUS_MS);
    }

    pub fn theme(&self) -> ThemeMode {
        self.theme.borrow().theme()
    }

    // === History ===

    pub fn clear_history(&mut self) {
        let cleared = self.history.borrow_mut().clear();
        match cleared {
            Ok(()) => self.set_status("History cleared", SHORT_STATUS_MS),
            Err(err) => warn!("failed to clear history: {}", err),
        }
    }

    /// Snapshot for the history dialog, most recent first.
    pub fn history_view(&self) -> Vec<HistoryEntry> {
        self.history.borrow().entries().to_vec()
    }

    pub fn open_history_entry(&mut self, index: usize) {
        let url = self.history.borrow().entry(index).map(|entry| entry.url.clone());
        match url {
            Some(url) => self.navigate_to(&url),
            None => debug!("no history entry at {}", index),
        }
    }

    pub fn history(&self) -> Ref<'_, HistoryManager> {
        self.history.borrow()
    }

    // === Find ===

    pub fn find_show(&mut self) {
        let request = self.find_bar.show();
        self.run_find(request);
    }

    pub fn find_close(&mut self) {
        let request = self.find_bar.close();
        self.run_find(Some(request));
    }

    pub fn find_query(&mut self, text: &str) {
        let request = self.find_bar.set_query(text);
        self.run_find(Some(request));
    }

    pub fn find_next(&mut self) {
        let request = self.find_bar.find_next();
        self.run_find(request);
    }

    pub fn find_previous(&mut self) {
        let request = self.find_bar.find_previous();
        self.run_find(request);
    }

    pub fn find_case_sensitive(&mut self, enabled: bool) {
        let request = self.find_bar.set_case_sensitive(enabled);
        self.run_find(request);
    }

    fn run_find(&mut self, request: Option<FindRequest>) {
        let (Some(request), Some(tab)) = (request, self.tabs.current_mut()) else {
            return;
        };
        find_controller::find(&mut tab.surface, &request.text, request.forward, request.case_sensitive);
    }

    // === Privacy ===

    /// Drops cookies, cache and session data in the engine.
    pub fn clear_browsing_data(&mut self) {
        for surface in self.tabs.surfaces_mut() {
            surface.clear_browsing_data();
        }
        self.set_status("Cookies and session data cleared", LONG_STATUS_MS);
    }

    pub fn clear_cache(&mut self) {
        for surface in self.tabs.surfaces_mut() {
            surface.clear_cache();
        }
        self.set_status("Cache cleared", LONG_STATUS_MS);
    }

    // === Engine events ===

    /// Applies an engine notification from the tab `id`.
    pub fn handle_surface_event(&mut self, id: &TabId, event: SurfaceEvent) {
        match event {
            SurfaceEvent::NewWindowRequested(url) => {
                self.open_link_in_new_tab(&url);
                return;
            }
            SurfaceEvent::DownloadFinished { path, success } => {
                if success {
                    if let Some(path) = path {
                        info!("download saved to {}", path.display());
                    }
                    self.set_status("Download finished", LONG_STATUS_MS);
                } else {
                    self.set_status("Download failed", LONG_STATUS_MS);
                }
                return;
            }
            _ => {}
        }

        let is_current = self.tabs.is_current(id);
        let Some(tab) = self.tabs.get_mut(id) else {
            debug!(tab = %id, "event for a closed tab: {:?}", event);
            return;
        };

        match event {
            SurfaceEvent::UrlChanged(url) => {
                tab.surface.url_committed(&url);
                tab.state.url = url.clone();
                tab.state.committed_url = url.clone();
                if is_current {
                    self.address_bar = url;
                }
            }
            SurfaceEvent::ProvisionalUrl(url) => {
                tab.state.url = url.clone();
                if is_current {
                    self.address_bar = url;
                }
            }
            SurfaceEvent::TitleChanged(title) => tab.state.title = title,
            SurfaceEvent::LoadStarted => {
                tab.state.loading = true;
                tab.state.progress = 0;
            }
            SurfaceEvent::LoadProgress(progress) => tab.state.progress = progress.min(100),
            SurfaceEvent::LoadFinished { success } => {
                tab.state.loading = false;
                tab.state.progress = 100;
                if success {
                    let url = tab.state.url.clone();
                    let title = if tab.state.title.is_empty() {
                        host_of(&url).unwrap_or_default()
                    } else {
                        tab.state.title.clone()
                    };
                    let recorded = self.history.borrow_mut().record_visit(&url, &title);
                    if let Err(err) = recorded {
                        warn!("failed to record visit: {}", err);
                    }
                }
            }
            SurfaceEvent::NewWindowRequested(_) | SurfaceEvent::DownloadFinished { .. } => {}
        }
    }

    /// Applies a same-document navigation the overlay saw in tab `id`
    /// (history API, fragment change). Returns `false` when `url` leaves the
    /// origin of the committed document.
    pub fn navigated_in_page(&mut self, id: &TabId, url: &str, title: &str) -> bool {
        let Some(tab) = self.tabs.get(id) else {
            debug!(tab = %id, "in-page navigation for a closed tab");
            return false;
        };
        let committed = if tab.state.committed_url.is_empty() {
            &tab.state.url
        } else {
            &tab.state.committed_url
        };
        if !same_origin(committed, url) {
            warn!(tab = %id, "rejecting in-page navigation from {} to {}", committed, url);
            return false;
        }
        self.handle_surface_event(id, SurfaceEvent::UrlChanged(url.to_string()));
        if !title.is_empty() {
            self.handle_surface_event(id, SurfaceEvent::TitleChanged(title.to_string()));
        }
        true
    }

    /// Whether a chrome message posted from `sender_url` may act on tab `id`:
    /// the sender must share an origin with the page the tab shows or is
    /// loading.
    pub fn accepts_sender(&self, id: &TabId, sender_url: &str) -> bool {
        self.tabs.get(id).is_some_and(|tab| {
            same_origin(&tab.state.url, sender_url) || same_origin(&tab.state.committed_url, sender_url)
        })
    }

    // === Chrome ===

    fn set_status(&mut self, text: impl Into<String>, timeout_ms: u32) {
        let text = text.into();
        info!("{}", text);
        self.status = Some(StatusMessage { text, timeout_ms });
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn address_bar(&self) -> &str {
        &self.address_bar
    }

    pub fn find_bar(&self) -> &FindBar {
        &self.find_bar
    }

    /// The full chrome model. The pending status message is handed over and
    /// cleared.
    pub fn chrome_state(&mut self) -> ChromeState {
        let current = self.tabs.current();
        let url = current.map(|tab| tab.state.url.clone()).unwrap_or_default();
        let bookmarks = self.bookmarks.borrow();
        let theme = self.theme.borrow();

        ChromeState {
            tabs: self
                .tabs
                .tabs()
                .iter()
                .enumerate()
                .map(|(index, tab)| TabView {
                    index,
                    id: tab.state.id.to_string(),
                    label: tab.state.label(),
                    title: tab.state.title.clone(),
                    url: tab.state.url.clone(),
                    loading: tab.state.loading,
                })
                .collect(),
            current: self.tabs.current_index(),
            address: self.address_bar.clone(),
            progress: current.map(|tab| tab.state.progress).unwrap_or(100),
            loading: current.map(|tab| tab.state.loading).unwrap_or(false),
            can_go_back: current.map(|tab| tab.surface.can_go_back()).unwrap_or(false),
            can_go_forward: current.map(|tab| tab.surface.can_go_forward()).unwrap_or(false),
            bookmarks: bookmarks.menu_items(),
            bookmarked: bookmarks.contains(&url),
            zoom: current.map(|tab| tab.state.zoom_factor).unwrap_or(zoom::DEFAULT_ZOOM),
            theme: theme.theme(),
            css: theme.css_variables(),
            home_page: self.home_page(),
            find: FindView {
                visible: self.find_bar.is_visible(),
                query: self.find_bar.query().to_string(),
                case_sensitive: self.find_bar.case_sensitive(),
            },
            status: self.status.take(),
        }
    }

    pub fn tabs(&self) -> &TabManager<F> {
        &self.tabs
    }

    pub fn tabs_mut(&mut self) -> &mut TabManager<F> {
        &mut self.tabs
    }

    pub fn current_surface_mut(&mut self) -> Option<&mut F::Surface> {
        self.tabs.current_mut().map(|tab| &mut tab.surface)
    }
}
