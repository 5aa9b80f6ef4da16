//! Browser windows built on `tao` + `wry`.
//!
//! Architecture:
//! - Any number of `tao` windows, each with its own [`WindowController`] and
//!   one webview per tab created by a [`WrySurfaceFactory`]. Bookmarks,
//!   history and theme live in the shared [`App`] profile.
//! - Every page gets the chrome overlay (tab strip, address bar, menus, find
//!   bar) as an initialization script, with the session token bound in.
//! - The event loop owns the [`Browser`]. Engine callbacks and IPC from the
//!   overlay arrive as [`UserEvent`]s tagged with their window and are
//!   handled in order; IPC goes through the [`CommandGate`] first.
//! - After every event the chrome state is pushed to the current tab of
//!   each window.

use std::collections::HashMap;
use std::rc::Rc;

use anyhow::Context;
use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoop, EventLoopBuilder, EventLoopProxy, EventLoopWindowTarget};
use tao::window::{Window, WindowBuilder, WindowId};
use tracing::{debug, info, warn};

use super::wry_surface::{UserEvent, WrySurfaceFactory};
use crate::app::App;
use crate::command_handler::{dispatch, CommandGate, CommandOutcome};
use crate::platform;
use crate::services::download_negotiator::DownloadNegotiator;
use crate::types::errors::TabError;
use crate::types::tab::TabId;
use crate::window_controller::WindowController;

const WINDOW_TITLE: &str = "Kestrel";

type Controller = WindowController<WrySurfaceFactory>;

struct BrowserWindow {
    // Declared first so the webviews are dropped before their window.
    controller: Controller,
    window: Rc<Window>,
}

impl BrowserWindow {
    /// Sends the chrome state to the current tab and mirrors its title in
    /// the window title.
    fn render(&mut self) {
        let state = self.controller.chrome_state();
        let title = state
            .tabs
            .get(state.current)
            .map(|tab| format!("{} - {}", tab.label, WINDOW_TITLE))
            .unwrap_or_else(|| WINDOW_TITLE.to_string());
        self.window.set_title(&title);

        match serde_json::to_string(&state) {
            Ok(json) => {
                if let Some(surface) = self.controller.current_surface_mut() {
                    surface.render_chrome(&json);
                }
            }
            Err(err) => warn!("cannot serialize chrome state: {}", err),
        }
    }
}

struct Browser {
    app: App,
    proxy: EventLoopProxy<UserEvent>,
    downloads: DownloadNegotiator,
    gate: CommandGate,
    windows: HashMap<WindowId, BrowserWindow>,
}

impl Browser {
    /// Creates a window and opens its first tab with `first_tab`.
    fn open_window(
        &mut self,
        target: &EventLoopWindowTarget<UserEvent>,
        first_tab: impl FnOnce(&mut Controller) -> Result<TabId, TabError>,
    ) -> anyhow::Result<WindowId> {
        let window = Rc::new(
            WindowBuilder::new()
                .with_title(WINDOW_TITLE)
                .with_inner_size(tao::dpi::LogicalSize::new(1280.0, 800.0))
                .build(target)
                .context("failed to create a browser window")?,
        );
        let factory = WrySurfaceFactory::new(
            window.clone(),
            self.proxy.clone(),
            self.downloads.clone(),
            self.gate.token(),
        );
        let mut controller = WindowController::new(&self.app, factory);
        first_tab(&mut controller).context("failed to open the first tab")?;

        let id = window.id();
        let mut entry = BrowserWindow { controller, window };
        entry.render();
        self.windows.insert(id, entry);
        info!(windows = self.windows.len(), "browser window ready");
        Ok(id)
    }

    fn close_window(&mut self, id: WindowId) {
        if self.windows.remove(&id).is_some() {
            info!(windows = self.windows.len(), "window closed");
        }
    }

    fn handle_user_event(&mut self, target: &EventLoopWindowTarget<UserEvent>, event: UserEvent) {
        let window = match &event {
            UserEvent::Surface { window, .. } | UserEvent::Ipc { window, .. } => *window,
        };
        let Some(entry) = self.windows.get_mut(&window) else {
            debug!("event for a closed window: {:?}", event);
            return;
        };

        let outcome = match event {
            UserEvent::Surface { tab, event, .. } => {
                entry.controller.handle_surface_event(&tab, event);
                CommandOutcome::Render
            }
            UserEvent::Ipc { tab, sender, body, .. } => {
                match self.gate.admit(&entry.controller, &tab, &sender, &body) {
                    Ok(command) => dispatch(&mut entry.controller, &tab, command),
                    Err(err) => {
                        debug!(tab = %tab, "ignoring chrome message: {}", err);
                        CommandOutcome::Render
                    }
                }
            }
        };

        match outcome {
            CommandOutcome::Render => {}
            CommandOutcome::ShowHistory(entries) => {
                if let Some(surface) = entry.controller.current_surface_mut() {
                    surface.show_history(&entries);
                }
            }
            CommandOutcome::OpenWindow => {
                if let Err(err) = self.open_window(target, Controller::start_at_home) {
                    warn!("cannot open window: {:#}", err);
                }
            }
        }
    }

    fn render_all(&mut self) {
        for entry in self.windows.values_mut() {
            entry.render();
        }
    }
}

/// Opens the first browser window and runs the event loop until the last
/// window is closed.
pub fn run(app: App, target: Option<String>) -> anyhow::Result<()> {
    let event_loop: EventLoop<UserEvent> = EventLoopBuilder::with_user_event().build();

    let mut browser = Browser {
        app,
        proxy: event_loop.create_proxy(),
        downloads: DownloadNegotiator::new(platform::get_download_dir()),
        gate: CommandGate::new(),
        windows: HashMap::new(),
    };
    browser.open_window(&event_loop, |controller| controller.start(target.as_deref()))?;

    event_loop.run(move |event, target, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::WindowEvent {
                window_id,
                event: WindowEvent::CloseRequested,
                ..
            } => {
                browser.close_window(window_id);
                if browser.windows.is_empty() {
                    *control_flow = ControlFlow::Exit;
                }
            }

            #[cfg(not(target_os = "linux"))]
            Event::WindowEvent {
                window_id,
                event: WindowEvent::Resized(_),
                ..
            } => {
                if let Some(entry) = browser.windows.get_mut(&window_id) {
                    let bounds = super::wry_surface::content_bounds(&entry.window);
                    for surface in entry.controller.tabs_mut().surfaces_mut() {
                        surface.set_bounds(bounds);
                    }
                }
            }

            Event::UserEvent(user_event) => {
                browser.handle_user_event(target, user_event);
                browser.render_all();
            }

            _ => {}
        }
    })
}
