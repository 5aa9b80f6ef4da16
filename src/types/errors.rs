use thiserror::Error;

// === SettingsError ===

/// Errors raised by the key-value settings store.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The underlying SQLite operation failed.
    #[error("Settings database error: {0}")]
    Database(#[from] rusqlite::Error),
    /// A stored value could not be interpreted.
    #[error("Invalid value for settings key '{key}': {value}")]
    InvalidValue { key: String, value: String },
    /// The profile directory could not be prepared.
    #[error("Settings I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// === HistoryError ===

/// Errors related to browsing history operations.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Persisting the history list failed.
    #[error("History storage error: {0}")]
    Storage(#[from] SettingsError),
}

// === BookmarkError ===

/// Errors related to bookmark operations.
#[derive(Debug, Error)]
pub enum BookmarkError {
    /// The URL is empty or carries no scheme.
    #[error("Invalid bookmark URL: '{0}'")]
    InvalidUrl(String),
    /// No bookmark matches the given URL.
    #[error("Bookmark not found: {0}")]
    NotFound(String),
    /// The index is outside the bookmark list.
    #[error("Invalid bookmark index: {0}")]
    InvalidIndex(usize),
    /// Persisting the bookmark list failed.
    #[error("Bookmark storage error: {0}")]
    Storage(#[from] SettingsError),
}

// === SurfaceError ===

/// Errors raised while creating a content surface in the web engine.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Failed to create content surface: {0}")]
    Creation(String),
}

// === TabError ===

/// Errors related to tab lifecycle operations.
#[derive(Debug, Error)]
pub enum TabError {
    /// Tab with the given ID was not found.
    #[error("Tab not found: {0}")]
    NotFound(String),
    /// The provided tab index is out of bounds.
    #[error("Invalid tab index: {0}")]
    InvalidIndex(usize),
    /// The window must keep at least one tab open.
    #[error("Cannot close the last remaining tab")]
    LastTab,
    /// The engine could not create a surface for the new tab.
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

// === CommandError ===

/// Errors raised while admitting a command posted by the browser chrome.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Malformed chrome command: {0}")]
    Malformed(#[from] serde_json::Error),
    /// The message came from a document the tab has not loaded.
    #[error("Chrome command from foreign document: {0}")]
    ForeignSender(String),
    /// The message did not carry this session's overlay token.
    #[error("Chrome command without a valid token")]
    BadToken,
}
