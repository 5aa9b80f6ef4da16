//! The engine-side page handle behind each tab.
//!
//! A [`ContentSurface`] is one live page in the embedded web engine. Surfaces
//! never call back into the browser: everything the engine reports comes
//! back as a [`SurfaceEvent`] tagged with the owning tab's id.

use std::path::PathBuf;

use crate::types::errors::SurfaceError;
use crate::types::tab::TabId;

/// Options for an in-page text search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FindFlags {
    pub backward: bool,
    pub case_sensitive: bool,
}

/// Notifications emitted by a surface, delivered in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    /// The engine committed a document at this URL.
    UrlChanged(String),
    /// A load started for this URL; nothing is committed yet.
    ProvisionalUrl(String),
    TitleChanged(String),
    LoadStarted,
    /// Load progress in percent.
    LoadProgress(u8),
    LoadFinished { success: bool },
    /// The page asked for a new window, e.g. a `target="_blank"` link.
    NewWindowRequested(String),
    DownloadFinished { path: Option<PathBuf>, success: bool },
}

/// Operations the browser needs from one engine page.
pub trait ContentSurface {
    fn navigate(&mut self, url: &str);
    fn go_back(&mut self);
    fn go_forward(&mut self);
    fn reload(&mut self);
    fn stop(&mut self);
    fn can_go_back(&self) -> bool;
    fn can_go_forward(&self) -> bool;
    fn set_zoom_factor(&mut self, factor: f64);
    /// Searches the rendered page; an empty `text` clears the highlight.
    fn find_in_page(&mut self, text: &str, flags: FindFlags);
    fn set_visible(&mut self, visible: bool);
    /// Drops cookies, cache and session data held by the engine.
    fn clear_browsing_data(&mut self);
    /// Drops the engine's HTTP cache.
    fn clear_cache(&mut self);

    /// Told about every committed URL so surfaces without engine-side
    /// history can keep their own.
    fn url_committed(&mut self, _url: &str) {}
}

/// Creates surfaces for new tabs.
pub trait SurfaceFactory {
    type Surface: ContentSurface;

    fn create_surface(&mut self, id: &TabId) -> Result<Self::Surface, SurfaceError>;
}

/// Back/forward bookkeeping for engines that only expose `history.back()`
/// and `history.forward()` without reporting whether either is possible.
#[derive(Debug, Default, Clone)]
pub struct NavigationStack {
    entries: Vec<String>,
    index: usize,
    pending: Pending,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum Pending {
    #[default]
    None,
    Back,
    Forward,
}

impl NavigationStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a committed URL. Completes a pending back/forward move, or
    /// otherwise truncates the forward entries and pushes `url`.
    pub fn commit(&mut self, url: &str) {
        match std::mem::take(&mut self.pending) {
            Pending::Back if self.can_go_back() => {
                self.index -= 1;
                self.entries[self.index] = url.to_string();
                return;
            }
            Pending::Forward if self.can_go_forward() => {
                self.index += 1;
                self.entries[self.index] = url.to_string();
                return;
            }
            _ => {}
        }

        if self.entries.get(self.index).map(String::as_str) == Some(url) {
            return;
        }
        if !self.entries.is_empty() {
            self.entries.truncate(self.index + 1);
            self.index += 1;
        }
        self.entries.push(url.to_string());
    }

    /// Marks a back move as in flight. Returns false when there is nowhere to go.
    pub fn go_back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.pending = Pending::Back;
        true
    }

    /// Marks a forward move as in flight. Returns false when there is nowhere to go.
    pub fn go_forward(&mut self) -> bool {
        if !self.can_go_forward() {
            return false;
        }
        self.pending = Pending::Forward;
        true
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn current(&self) -> Option<&str> {
        self.entries.get(self.index).map(String::as_str)
    }
}
