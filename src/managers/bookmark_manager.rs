//! Bookmark Manager for Kestrel.
//!
//! Implements `BookmarkManagerTrait`: an ordered bookmark list, persisted to
//! the settings store after every change, plus the menu model rebuilt from it.

use std::rc::Rc;

use crate::services::settings_store::{Record, SettingsStoreTrait};
use crate::services::url_classifier::{host_of, scheme_of};
use crate::types::bookmark::{Bookmark, MenuItem};
use crate::types::errors::{BookmarkError, SettingsError};

const ARRAY_NAME: &str = "bookmarks";
const FIELDS: [&str; 2] = ["title", "url"];

/// Trait defining bookmark management operations.
pub trait BookmarkManagerTrait {
    /// Appends a bookmark. An empty title falls back to the URL's host.
    fn add(&mut self, title: &str, url: &str) -> Result<Bookmark, BookmarkError>;
    /// Removes the first bookmark with exactly this URL.
    fn remove(&mut self, url: &str) -> Result<Bookmark, BookmarkError>;
    fn remove_at(&mut self, index: usize) -> Result<Bookmark, BookmarkError>;
    fn clear(&mut self) -> Result<(), BookmarkError>;
    fn bookmarks(&self) -> &[Bookmark];
    fn get(&self, index: usize) -> Option<&Bookmark>;
    fn contains(&self, url: &str) -> bool;
    /// The bookmarks menu, in list order.
    fn menu_items(&self) -> Vec<MenuItem>;
}

/// Bookmark manager holding the list in memory, backed by the settings store.
pub struct BookmarkManager {
    store: Rc<dyn SettingsStoreTrait>,
    bookmarks: Vec<Bookmark>,
}

impl BookmarkManager {
    /// Loads the stored bookmark list.
    pub fn load(store: Rc<dyn SettingsStoreTrait>) -> Result<Self, SettingsError> {
        let bookmarks = store
            .read_array(ARRAY_NAME, &FIELDS)?
            .into_iter()
            .filter(|record| !record["url"].is_empty())
            .map(|record| Bookmark {
                title: record["title"].clone(),
                url: record["url"].clone(),
            })
            .collect();
        Ok(Self { store, bookmarks })
    }

    pub fn len(&self) -> usize {
        self.bookmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }

    fn persist(&self) -> Result<(), BookmarkError> {
        let records: Vec<Record> = self
            .bookmarks
            .iter()
            .map(|bookmark| {
                let mut record = Record::new();
                record.insert("title".into(), bookmark.title.clone());
                record.insert("url".into(), bookmark.url.clone());
                record
            })
            .collect();
        self.store.write_array(ARRAY_NAME, &records)?;
        Ok(())
    }
}

impl BookmarkManagerTrait for BookmarkManager {
    fn add(&mut self, title: &str, url: &str) -> Result<Bookmark, BookmarkError> {
        if url.is_empty() || scheme_of(url).is_none() {
            return Err(BookmarkError::InvalidUrl(url.to_string()));
        }
        let title = if title.is_empty() {
            host_of(url).unwrap_or_else(|| url.to_string())
        } else {
            title.to_string()
        };

        let bookmark = Bookmark {
            title,
            url: url.to_string(),
        };
        self.bookmarks.push(bookmark.clone());
        if let Err(err) = self.persist() {
            self.bookmarks.pop();
            return Err(err);
        }
        Ok(bookmark)
    }

    fn remove(&mut self, url: &str) -> Result<Bookmark, BookmarkError> {
        let index = self
            .bookmarks
            .iter()
            .position(|b| b.url == url)
            .ok_or_else(|| BookmarkError::NotFound(url.to_string()))?;
        self.remove_at(index)
    }

    fn remove_at(&mut self, index: usize) -> Result<Bookmark, BookmarkError> {
        if index >= self.bookmarks.len() {
            return Err(BookmarkError::InvalidIndex(index));
        }
        let removed = self.bookmarks.remove(index);
        if let Err(err) = self.persist() {
            self.bookmarks.insert(index, removed);
            return Err(err);
        }
        Ok(removed)
    }

    fn clear(&mut self) -> Result<(), BookmarkError> {
        let previous = std::mem::take(&mut self.bookmarks);
        if let Err(err) = self.persist() {
            self.bookmarks = previous;
            return Err(err);
        }
        Ok(())
    }

    fn bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    fn get(&self, index: usize) -> Option<&Bookmark> {
        self.bookmarks.get(index)
    }

    fn contains(&self, url: &str) -> bool {
        self.bookmarks.iter().any(|b| b.url == url)
    }

    fn menu_items(&self) -> Vec<MenuItem> {
        self.bookmarks
            .iter()
            .enumerate()
            .map(|(index, bookmark)| MenuItem {
                index,
                label: bookmark.title.clone(),
                url: bookmark.url.clone(),
            })
            .collect()
    }
}
