use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Label shown for a tab whose page has no title yet.
pub const UNTITLED_TAB: &str = "New Tab";

/// Longest tab label before it is shortened with an ellipsis.
pub const MAX_TAB_LABEL_CHARS: usize = 30;

/// Opaque handle to an open tab. Stays valid while the tab is open,
/// independent of the tab's position in the tab strip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TabId(String);

impl TabId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TabId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TabId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Page state mirrored from the engine's events for one tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabState {
    pub id: TabId,
    /// What the address bar shows for this tab; may run ahead of the page.
    pub url: String,
    /// URL of the document the engine last committed; empty before the first.
    pub committed_url: String,
    pub title: String,
    /// Load progress in percent, 0..=100.
    pub progress: u8,
    pub loading: bool,
    pub zoom_factor: f64,
}

impl TabState {
    pub fn new(id: TabId, url: &str) -> Self {
        Self {
            id,
            url: url.to_string(),
            committed_url: String::new(),
            title: String::new(),
            progress: 100,
            loading: false,
            zoom_factor: 1.0,
        }
    }

    /// The text shown on the tab strip for this tab.
    pub fn label(&self) -> String {
        tab_label(&self.title)
    }
}

/// Shortens a page title for the tab strip.
///
/// Empty titles read "New Tab"; titles longer than 30 characters keep
/// their first 27 characters followed by "...".
pub fn tab_label(title: &str) -> String {
    if title.is_empty() {
        return UNTITLED_TAB.to_string();
    }
    if title.chars().count() > MAX_TAB_LABEL_CHARS {
        let head: String = title.chars().take(MAX_TAB_LABEL_CHARS - 3).collect();
        return format!("{}...", head);
    }
    title.to_string()
}
