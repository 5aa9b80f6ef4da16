//! Commands posted by the browser chrome over the engine's IPC channel.
//!
//! The toolbar overlay sends JSON objects such as
//! `{"cmd":"navigate","input":"rust book","token":"…"}`. Every page can post
//! to the same channel, so a [`CommandGate`] admits a message only when it
//! carries the session token handed to the overlay and comes from the
//! document the tab actually shows. `dispatch` applies admitted commands to
//! the window controller.

use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::surface::SurfaceFactory;
use crate::types::errors::CommandError;
use crate::types::history::HistoryEntry;
use crate::types::settings::ThemeMode;
use crate::types::tab::TabId;
use crate::window_controller::WindowController;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum BrowserCommand {
    /// The overlay finished loading in a page and wants the chrome state.
    UiReady,
    Navigate { input: String },
    NewTab,
    NewWindow,
    CloseTab { index: usize },
    CloseCurrentTab,
    SwitchTab { index: usize },
    Back,
    Forward,
    Reload,
    Stop,
    Home,
    ZoomIn,
    ZoomOut,
    ZoomReset,
    AddBookmark,
    RemoveBookmark,
    RemoveBookmarkAt { index: usize },
    ClearBookmarks,
    OpenBookmark { index: usize },
    SetHomePage,
    ResetHomePage,
    SetTheme { theme: ThemeMode },
    ShowHistory,
    OpenHistoryEntry { index: usize },
    ClearHistory,
    FindShow,
    FindClose,
    FindQuery { text: String },
    FindNext,
    FindPrevious,
    FindCaseSensitive { enabled: bool },
    ClearBrowsingData,
    ClearCache,
    /// In-page navigation the engine does not report (history API, fragments).
    UrlChanged {
        url: String,
        #[serde(default)]
        title: String,
    },
}

/// What the UI has to do after a command was applied.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// Push the new chrome state.
    Render,
    /// Push the chrome state and open the history dialog with these entries.
    ShowHistory(Vec<HistoryEntry>),
    /// Open another browser window on the same profile.
    OpenWindow,
}

/// One message as posted by the overlay.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChromeMessage {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(flatten)]
    pub command: BrowserCommand,
}

pub fn parse_message(message: &str) -> Result<ChromeMessage, CommandError> {
    Ok(serde_json::from_str(message)?)
}

/// Admits chrome messages for one browser session.
pub struct CommandGate {
    token: String,
}

impl CommandGate {
    /// A gate with a fresh random token.
    pub fn new() -> Self {
        Self {
            token: Uuid::new_v4().simple().to_string(),
        }
    }

    /// The token the overlay has to echo in every message.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Decodes `message`, posted from `sender_url` inside tab `source`.
    ///
    /// # Errors
    /// [`CommandError::ForeignSender`] when the sender is not the tab's
    /// document, [`CommandError::BadToken`] when the token is missing or
    /// wrong, and [`CommandError::Malformed`] for undecodable JSON.
    pub fn admit<F: SurfaceFactory>(
        &self,
        controller: &WindowController<F>,
        source: &TabId,
        sender_url: &str,
        message: &str,
    ) -> Result<BrowserCommand, CommandError> {
        if !controller.accepts_sender(source, sender_url) {
            return Err(CommandError::ForeignSender(sender_url.to_string()));
        }
        let message = parse_message(message)?;
        if message.token.as_deref() != Some(self.token.as_str()) {
            return Err(CommandError::BadToken);
        }
        Ok(message.command)
    }
}

impl Default for CommandGate {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies `command`, posted by the overlay inside tab `source`.
pub fn dispatch<F: SurfaceFactory>(
    controller: &mut WindowController<F>,
    source: &TabId,
    command: BrowserCommand,
) -> CommandOutcome {
    debug!(tab = %source, "chrome command {:?}", command);
    match command {
        BrowserCommand::UiReady => {}
        BrowserCommand::Navigate { input } => controller.submit_address_bar(&input),
        BrowserCommand::NewTab => {
            controller.new_tab();
        }
        BrowserCommand::NewWindow => return CommandOutcome::OpenWindow,
        BrowserCommand::CloseTab { index } => controller.close_tab(index),
        BrowserCommand::CloseCurrentTab => controller.close_current_tab(),
        BrowserCommand::SwitchTab { index } => controller.switch_to(index),
        BrowserCommand::Back => controller.back(),
        BrowserCommand::Forward => controller.forward(),
        BrowserCommand::Reload => controller.reload(),
        BrowserCommand::Stop => controller.stop(),
        BrowserCommand::Home => controller.home(),
        BrowserCommand::ZoomIn => controller.zoom_in(),
        BrowserCommand::ZoomOut => controller.zoom_out(),
        BrowserCommand::ZoomReset => controller.zoom_reset(),
        BrowserCommand::AddBookmark => controller.add_bookmark(),
        BrowserCommand::RemoveBookmark => controller.remove_bookmark(),
        BrowserCommand::RemoveBookmarkAt { index } => controller.remove_bookmark_at(index),
        BrowserCommand::ClearBookmarks => controller.clear_bookmarks(),
        BrowserCommand::OpenBookmark { index } => controller.open_bookmark(index),
        BrowserCommand::SetHomePage => controller.set_home_page(),
        BrowserCommand::ResetHomePage => controller.reset_home_page(),
        BrowserCommand::SetTheme { theme } => controller.set_theme(theme),
        BrowserCommand::ShowHistory => return CommandOutcome::ShowHistory(controller.history_view()),
        BrowserCommand::OpenHistoryEntry { index } => controller.open_history_entry(index),
        BrowserCommand::ClearHistory => controller.clear_history(),
        BrowserCommand::FindShow => controller.find_show(),
        BrowserCommand::FindClose => controller.find_close(),
        BrowserCommand::FindQuery { text } => controller.find_query(&text),
        BrowserCommand::FindNext => controller.find_next(),
        BrowserCommand::FindPrevious => controller.find_previous(),
        BrowserCommand::FindCaseSensitive { enabled } => controller.find_case_sensitive(enabled),
        BrowserCommand::ClearBrowsingData => controller.clear_browsing_data(),
        BrowserCommand::ClearCache => controller.clear_cache(),
        BrowserCommand::UrlChanged { url, title } => {
            controller.navigated_in_page(source, &url, &title);
        }
    }
    CommandOutcome::Render
}
