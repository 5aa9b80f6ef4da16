//! Find-in-page: forwards searches to the surface's built-in text search and
//! keeps the state of the find bar.

use crate::surface::{ContentSurface, FindFlags};

/// Runs a search on `surface`. An empty `text` clears the current highlight.
pub fn find<S: ContentSurface + ?Sized>(surface: &mut S, text: &str, forward: bool, case_sensitive: bool) {
    surface.find_in_page(
        text,
        FindFlags {
            backward: !forward,
            case_sensitive,
        },
    );
}

/// A search the find bar wants issued against the current surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindRequest {
    pub text: String,
    pub forward: bool,
    pub case_sensitive: bool,
}

/// What the find bar shows. Every change re-issues the search so matches
/// are highlighted while typing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindBar {
    query: String,
    case_sensitive: bool,
    visible: bool,
}

impl FindBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Opens the bar. A remembered query is searched again.
    pub fn show(&mut self) -> Option<FindRequest> {
        self.visible = true;
        if self.query.is_empty() {
            None
        } else {
            Some(self.request(true))
        }
    }

    /// Closes the bar and clears the highlight.
    pub fn close(&mut self) -> FindRequest {
        self.visible = false;
        FindRequest {
            text: String::new(),
            forward: true,
            case_sensitive: self.case_sensitive,
        }
    }

    pub fn set_query(&mut self, text: &str) -> FindRequest {
        self.query = text.to_string();
        self.request(true)
    }

    pub fn find_next(&self) -> Option<FindRequest> {
        self.repeat(true)
    }

    pub fn find_previous(&self) -> Option<FindRequest> {
        self.repeat(false)
    }

    pub fn set_case_sensitive(&mut self, enabled: bool) -> Option<FindRequest> {
        self.case_sensitive = enabled;
        self.repeat(true)
    }

    fn repeat(&self, forward: bool) -> Option<FindRequest> {
        if self.query.is_empty() {
            None
        } else {
            Some(self.request(forward))
        }
    }

    fn request(&self, forward: bool) -> FindRequest {
        FindRequest {
            text: self.query.clone(),
            forward,
            case_sensitive: self.case_sensitive,
        }
    }
}
