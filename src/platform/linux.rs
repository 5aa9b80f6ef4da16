// Kestrel platform paths for Linux
// Data:      $XDG_DATA_HOME/kestrel or ~/.local/share/kestrel
// Downloads: $XDG_DOWNLOAD_DIR or ~/Downloads

use std::env;
use std::path::PathBuf;

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// Non-empty value of an XDG variable.
fn xdg_var(name: &str) -> Option<PathBuf> {
    env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

pub fn get_data_dir() -> PathBuf {
    match xdg_var("XDG_DATA_HOME") {
        Some(xdg) => xdg.join("kestrel"),
        None => home_dir().join(".local").join("share").join("kestrel"),
    }
}

pub fn get_download_dir() -> PathBuf {
    xdg_var("XDG_DOWNLOAD_DIR").unwrap_or_else(|| home_dir().join("Downloads"))
}
