//! App context for Kestrel.
//!
//! Holds the process-scoped profile: the settings store, and the history,
//! bookmarks and theme every window shares. Constructed once in `main` and
//! passed explicitly to each window controller.

use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use tracing::{debug, info};

use crate::database::Database;
use crate::managers::bookmark_manager::BookmarkManager;
use crate::managers::history_manager::{HistoryManager, HistoryManagerTrait};
use crate::services::preferences::Preferences;
use crate::services::settings_store::{SettingsStoreTrait, SqliteSettingsStore};
use crate::services::theme_engine::ThemeEngine;
use crate::types::errors::SettingsError;

/// File name of the profile database inside the data directory.
pub const DATABASE_FILE: &str = "kestrel.db";

/// Namespace every settings key is stored under.
pub const SETTINGS_NAMESPACE: &str = "kestrel";

pub struct App {
    store: Rc<dyn SettingsStoreTrait>,
    history: Rc<RefCell<HistoryManager>>,
    bookmarks: Rc<RefCell<BookmarkManager>>,
    theme: Rc<RefCell<ThemeEngine>>,
}

impl App {
    /// Opens the profile in `data_dir`, creating the directory if needed.
    pub fn open(data_dir: &Path) -> Result<Self, SettingsError> {
        fs::create_dir_all(data_dir)?;
        Self::from_database(Database::open(data_dir.join(DATABASE_FILE))?)
    }

    /// A throwaway profile; nothing survives the process.
    pub fn open_in_memory() -> Result<Self, SettingsError> {
        Self::from_database(Database::open_in_memory()?)
    }

    fn from_database(db: Database) -> Result<Self, SettingsError> {
        match db.path() {
            Some(path) => info!("opened profile at {}", path.display()),
            None => debug!("opened in-memory profile"),
        }
        let store: Rc<dyn SettingsStoreTrait> =
            Rc::new(SqliteSettingsStore::new(Rc::new(db), SETTINGS_NAMESPACE));

        let theme = ThemeEngine::new(Preferences::new(store.clone()).theme()?);
        let history = HistoryManager::load(store.clone())?;
        let bookmarks = BookmarkManager::load(store.clone())?;
        info!(
            "loaded {} bookmarks and {} history entries",
            bookmarks.len(),
            history.len()
        );

        Ok(Self {
            store,
            history: Rc::new(RefCell::new(history)),
            bookmarks: Rc::new(RefCell::new(bookmarks)),
            theme: Rc::new(RefCell::new(theme)),
        })
    }

    pub fn store(&self) -> Rc<dyn SettingsStoreTrait> {
        self.store.clone()
    }

    pub fn preferences(&self) -> Preferences {
        Preferences::new(self.store())
    }

    pub fn history(&self) -> Rc<RefCell<HistoryManager>> {
        self.history.clone()
    }

    pub fn bookmarks(&self) -> Rc<RefCell<BookmarkManager>> {
        self.bookmarks.clone()
    }

    pub fn theme(&self) -> Rc<RefCell<ThemeEngine>> {
        self.theme.clone()
    }
}
