//! History Manager for Kestrel.
//!
//! Implements `HistoryManagerTrait`: a most-recent-first list of visited
//! pages with at most one entry per URL, capped at [`MAX_HISTORY_ENTRIES`].
//! The full list is written back to the settings store after every change.

use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

use crate::services::settings_store::{Record, SettingsStoreTrait};
use crate::services::url_classifier::{scheme_of, BLANK_URL};
use crate::types::errors::{HistoryError, SettingsError};
use crate::types::history::HistoryEntry;

/// Most entries kept; older visits are evicted from the tail.
pub const MAX_HISTORY_ENTRIES: usize = 500;

const ARRAY_NAME: &str = "history";
const FIELDS: [&str; 3] = ["url", "title", "timestamp"];

/// Trait defining history management operations.
pub trait HistoryManagerTrait {
    /// Records a visit. Returns `Ok(false)` when the URL is not recordable.
    fn record_visit(&mut self, url: &str, title: &str) -> Result<bool, HistoryError>;
    fn clear(&mut self) -> Result<(), HistoryError>;
    /// Entries, most recent first.
    fn entries(&self) -> &[HistoryEntry];
    fn entry(&self, index: usize) -> Option<&HistoryEntry>;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// History manager holding the list in memory, backed by the settings store.
pub struct HistoryManager {
    store: Rc<dyn SettingsStoreTrait>,
    entries: Vec<HistoryEntry>,
}

impl HistoryManager {
    /// Loads the stored history list.
    pub fn load(store: Rc<dyn SettingsStoreTrait>) -> Result<Self, SettingsError> {
        let mut entries: Vec<HistoryEntry> = store
            .read_array(ARRAY_NAME, &FIELDS)?
            .into_iter()
            .filter(|record| !record["url"].is_empty())
            .map(|record| HistoryEntry {
                timestamp: record["timestamp"].parse().unwrap_or_default(),
                url: record["url"].clone(),
                title: record["title"].clone(),
            })
            .collect();
        entries.truncate(MAX_HISTORY_ENTRIES);
        Ok(Self { store, entries })
    }

    /// Returns the current UNIX timestamp in milliseconds.
    fn now_millis() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as i64
    }

    /// Whether a URL belongs in history at all.
    pub fn is_recordable(url: &str) -> bool {
        !url.is_empty()
            && url != BLANK_URL
            && !scheme_of(url).is_some_and(|scheme| scheme.eq_ignore_ascii_case("data"))
    }

    /// Records a visit with an explicit timestamp.
    pub fn record_visit_at(&mut self, url: &str, title: &str, timestamp: i64) -> Result<bool, HistoryError> {
        if !Self::is_recordable(url) {
            debug!("not recording visit to {:?}", url);
            return Ok(false);
        }

        if let Some(pos) = self.entries.iter().position(|e| e.url == url) {
            self.entries.remove(pos);
        }
        self.entries.insert(
            0,
            HistoryEntry {
                url: url.to_string(),
                title: title.to_string(),
                timestamp,
            },
        );
        self.entries.truncate(MAX_HISTORY_ENTRIES);
        self.persist()?;
        Ok(true)
    }

    fn persist(&self) -> Result<(), HistoryError> {
        let records: Vec<Record> = self
            .entries
            .iter()
            .map(|entry| {
                let mut record = Record::new();
                record.insert("url".into(), entry.url.clone());
                record.insert("title".into(), entry.title.clone());
                record.insert("timestamp".into(), entry.timestamp.to_string());
                record
            })
            .collect();
        self.store.write_array(ARRAY_NAME, &records)?;
        Ok(())
    }
}

impl HistoryManagerTrait for HistoryManager {
    fn record_visit(&mut self, url: &str, title: &str) -> Result<bool, HistoryError> {
        self.record_visit_at(url, title, Self::now_millis())
    }

    fn clear(&mut self) -> Result<(), HistoryError> {
        self.entries.clear();
        self.persist()
    }

    fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    fn entry(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
