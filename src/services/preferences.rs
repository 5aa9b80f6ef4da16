//! Preference scalars kept in the settings store: the chrome theme and the
//! home page.

use std::rc::Rc;

use tracing::warn;

use crate::services::settings_store::SettingsStoreTrait;
use crate::types::errors::SettingsError;
use crate::types::settings::ThemeMode;

pub const THEME_KEY: &str = "theme";
pub const HOME_PAGE_KEY: &str = "homePage";

/// Home page used until the user sets one.
pub const DEFAULT_HOME_PAGE: &str = "https://duckduckgo.com";

/// Typed access to the preference scalars. Last write wins.
#[derive(Clone)]
pub struct Preferences {
    store: Rc<dyn SettingsStoreTrait>,
}

impl Preferences {
    pub fn new(store: Rc<dyn SettingsStoreTrait>) -> Self {
        Self { store }
    }

    /// The stored theme. Unknown values read as `System`.
    pub fn theme(&self) -> Result<ThemeMode, SettingsError> {
        match self.store.value(THEME_KEY)? {
            None => Ok(ThemeMode::default()),
            Some(raw) => Ok(raw.parse().unwrap_or_else(|err| {
                warn!("ignoring stored theme: {}", err);
                ThemeMode::default()
            })),
        }
    }

    pub fn set_theme(&self, mode: ThemeMode) -> Result<(), SettingsError> {
        self.store.set_value(THEME_KEY, mode.as_str())
    }

    pub fn home_page(&self) -> Result<String, SettingsError> {
        Ok(self
            .store
            .value(HOME_PAGE_KEY)?
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_HOME_PAGE.to_string()))
    }

    pub fn set_home_page(&self, url: &str) -> Result<(), SettingsError> {
        self.store.set_value(HOME_PAGE_KEY, url)
    }

    /// Restores the default home page and returns it.
    pub fn reset_home_page(&self) -> Result<&'static str, SettingsError> {
        self.store.set_value(HOME_PAGE_KEY, DEFAULT_HOME_PAGE)?;
        Ok(DEFAULT_HOME_PAGE)
    }
}
