//! Shared test doubles: a recording content surface and its factory.
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use kestrel::app::App;
use kestrel::surface::{ContentSurface, FindFlags, NavigationStack, SurfaceFactory};
use kestrel::types::errors::SurfaceError;
use kestrel::types::tab::TabId;
use kestrel::window_controller::WindowController;

/// Calls made on every surface, in order, as `"<tab id> <call>"`.
pub type CallLog = Rc<RefCell<Vec<String>>>;

pub struct MockSurface {
    id: TabId,
    log: CallLog,
    history: NavigationStack,
    pub visible: bool,
    pub zoom: f64,
}

impl MockSurface {
    fn record(&self, call: String) {
        self.log.borrow_mut().push(format!("{} {}", self.id, call));
    }
}

impl ContentSurface for MockSurface {
    fn navigate(&mut self, url: &str) {
        self.record(format!("navigate {}", url));
    }

    fn go_back(&mut self) {
        self.history.go_back();
        self.record("back".into());
    }

    fn go_forward(&mut self) {
        self.history.go_forward();
        self.record("forward".into());
    }

    fn reload(&mut self) {
        self.record("reload".into());
    }

    fn stop(&mut self) {
        self.record("stop".into());
    }

    fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    fn can_go_forward(&self) -> bool {
        self.history.can_go_forward()
    }

    fn set_zoom_factor(&mut self, factor: f64) {
        self.zoom = factor;
        self.record(format!("zoom {:.2}", factor));
    }

    fn find_in_page(&mut self, text: &str, flags: FindFlags) {
        self.record(format!(
            "find {:?} backward={} case={}",
            text, flags.backward, flags.case_sensitive
        ));
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn clear_browsing_data(&mut self) {
        self.record("clear_data".into());
    }

    fn clear_cache(&mut self) {
        self.record("clear_cache".into());
    }

    fn url_committed(&mut self, url: &str) {
        self.history.commit(url);
    }
}

#[derive(Default)]
pub struct MockFactory {
    pub log: CallLog,
    /// When set, surface creation fails.
    pub fail: Rc<RefCell<bool>>,
}

impl MockFactory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SurfaceFactory for MockFactory {
    type Surface = MockSurface;

    fn create_surface(&mut self, id: &TabId) -> Result<MockSurface, SurfaceError> {
        if *self.fail.borrow() {
            return Err(SurfaceError::Creation("engine unavailable".into()));
        }
        Ok(MockSurface {
            id: id.clone(),
            log: self.log.clone(),
            history: NavigationStack::new(),
            visible: true,
            zoom: 1.0,
        })
    }
}

/// Calls logged for tab `id`, without the id prefix.
pub fn calls_for(log: &CallLog, id: &TabId) -> Vec<String> {
    let prefix = format!("{} ", id);
    log.borrow()
        .iter()
        .filter_map(|line| line.strip_prefix(&prefix).map(str::to_string))
        .collect()
}

/// A started window controller over an in-memory profile.
pub fn controller(target: Option<&str>) -> (WindowController<MockFactory>, CallLog, App) {
    let app = App::open_in_memory().unwrap();
    let factory = MockFactory::new();
    let log = factory.log.clone();
    let mut controller = WindowController::new(&app, factory);
    controller.start(target).unwrap();
    (controller, log, app)
}
