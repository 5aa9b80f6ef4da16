//! Kestrel: a small tabbed web browser around the system web engine.
//!
//! Opens the profile, then runs the browser window. When built without the
//! `gui` feature it prints what the window would open and the stored
//! bookmarks and history instead.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use kestrel::app::App;
use kestrel::platform;

/// Kestrel - a small tabbed web browser
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// URL or search terms to open in the first tab
    target: Option<String>,

    /// Profile directory holding kestrel.db
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kestrel=info")),
        )
        .init();

    let data_dir = args.data_dir.unwrap_or_else(platform::get_data_dir);
    let app = App::open(&data_dir)
        .with_context(|| format!("failed to open profile in {}", data_dir.display()))?;
    info!("Kestrel v{}", env!("CARGO_PKG_VERSION"));

    run(app, args.target)
}

#[cfg(feature = "gui")]
fn run(app: App, target: Option<String>) -> Result<()> {
    kestrel::ui::webview_app::run(app, target)
}

#[cfg(not(feature = "gui"))]
fn run(app: App, target: Option<String>) -> Result<()> {
    use kestrel::managers::bookmark_manager::BookmarkManagerTrait;
    use kestrel::managers::history_manager::HistoryManagerTrait;
    use kestrel::services::url_classifier::classify;

    let (bookmarks, history) = (app.bookmarks(), app.history());
    let (bookmarks, history) = (bookmarks.borrow(), history.borrow());
    let preferences = app.preferences();

    println!("open:      {}", classify(target.as_deref().unwrap_or_default()));
    println!("home page: {}", preferences.home_page()?);
    println!("theme:     {}", preferences.theme()?);

    println!("bookmarks ({}):", bookmarks.len());
    for item in bookmarks.menu_items() {
        println!("  [{}] {}  {}", item.index, item.label, item.url);
    }
    println!("history ({}):", history.len());
    for entry in history.entries() {
        println!("  {}  {}", entry.url, entry.title);
    }
    Ok(())
}
