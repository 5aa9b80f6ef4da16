use serde::{Deserialize, Serialize};

/// A saved bookmark. Order in the owning list is insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub title: String,
    pub url: String,
}

/// One entry of the rebuilt bookmarks menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    /// Position of the bookmark in the backing list.
    pub index: usize,
    pub label: String,
    pub url: String,
}
