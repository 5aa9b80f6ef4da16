// Kestrel state managers
// Managers own the browser's mutable state: open tabs, bookmarks and history.

pub mod bookmark_manager;
pub mod history_manager;
pub mod tab_manager;
