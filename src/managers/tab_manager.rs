use tracing::info;

use crate::surface::{ContentSurface, SurfaceFactory};
use crate::types::errors::TabError;
use crate::types::tab::{TabId, TabState};

/// One open tab: the engine surface plus the page state mirrored from it.
pub struct Tab<S> {
    pub state: TabState,
    pub surface: S,
}

impl<S> Tab<S> {
    pub fn id(&self) -> &TabId {
        &self.state.id
    }
}

/// Owns every open tab and the current-tab marker.
///
/// Tabs keep their strip order; `current` indexes into that order and is
/// fixed up in the same call that removes a tab.
pub struct TabManager<F: SurfaceFactory> {
    factory: F,
    tabs: Vec<Tab<F::Surface>>,
    current: usize,
}

impl<F: SurfaceFactory> TabManager<F> {
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            tabs: Vec::new(),
            current: 0,
        }
    }

    /// Opens a tab, makes it current and loads `url` into it unless empty.
    pub fn open_tab(&mut self, url: &str) -> Result<TabId, TabError> {
        let id = TabId::new();
        let mut surface = self.factory.create_surface(&id)?;

        if let Some(previous) = self.tabs.get_mut(self.current) {
            previous.surface.set_visible(false);
        }
        surface.set_visible(true);
        if !url.is_empty() {
            surface.navigate(url);
        }

        self.tabs.push(Tab {
            state: TabState::new(id.clone(), url),
            surface,
        });
        self.current = self.tabs.len() - 1;
        info!(tab = %id, "opened tab {} of {}", self.current + 1, self.tabs.len());
        Ok(id)
    }

    /// Creates an empty tab for a page-initiated new-window request. The
    /// caller loads the requested URL into it before the event turn ends.
    pub fn on_external_open_request(&mut self) -> Result<TabId, TabError> {
        self.open_tab("")
    }

    /// Closes the tab at `index` and destroys its surface.
    pub fn close_tab(&mut self, index: usize) -> Result<TabId, TabError> {
        if index >= self.tabs.len() {
            return Err(TabError::InvalidIndex(index));
        }
        if self.tabs.len() == 1 {
            return Err(TabError::LastTab);
        }

        let closed = self.tabs.remove(index);
        if index < self.current {
            self.current -= 1;
        } else if index == self.current {
            self.current = index.min(self.tabs.len() - 1);
            self.tabs[self.current].surface.set_visible(true);
        }

        info!(tab = %closed.state.id, "closed tab, {} remaining", self.tabs.len());
        Ok(closed.state.id)
    }

    /// Makes the tab at `index` current, hiding the previous one.
    pub fn switch_to(&mut self, index: usize) -> Result<(), TabError> {
        if index >= self.tabs.len() {
            return Err(TabError::InvalidIndex(index));
        }
        if index == self.current {
            return Ok(());
        }
        self.tabs[self.current].surface.set_visible(false);
        self.tabs[index].surface.set_visible(true);
        self.current = index;
        Ok(())
    }

    pub fn index_of(&self, id: &TabId) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.id() == id)
    }

    pub fn get(&self, id: &TabId) -> Option<&Tab<F::Surface>> {
        self.tabs.iter().find(|tab| tab.id() == id)
    }

    pub fn get_mut(&mut self, id: &TabId) -> Option<&mut Tab<F::Surface>> {
        self.tabs.iter_mut().find(|tab| tab.id() == id)
    }

    pub fn current(&self) -> Option<&Tab<F::Surface>> {
        self.tabs.get(self.current)
    }

    pub fn current_mut(&mut self) -> Option<&mut Tab<F::Surface>> {
        self.tabs.get_mut(self.current)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn is_current(&self, id: &TabId) -> bool {
        self.current().map(|tab| tab.id() == id).unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn tabs(&self) -> &[Tab<F::Surface>] {
        &self.tabs
    }

    /// Every surface, for engine-wide operations such as clearing data or
    /// laying out after a resize.
    pub fn surfaces_mut(&mut self) -> impl Iterator<Item = &mut F::Surface> {
        self.tabs.iter_mut().map(|tab| &mut tab.surface)
    }
}
