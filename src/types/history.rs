use serde::{Deserialize, Serialize};

/// A single visited page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub url: String,
    pub title: String,
    /// Wall-clock time of the visit in milliseconds since the UNIX epoch.
    pub timestamp: i64,
}
