// Kestrel platform paths for macOS
// Data:      ~/Library/Application Support/Kestrel
// Downloads: ~/Downloads

use std::env;
use std::path::PathBuf;

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

pub fn get_data_dir() -> PathBuf {
    home_dir()
        .join("Library")
        .join("Application Support")
        .join("Kestrel")
}

pub fn get_download_dir() -> PathBuf {
    home_dir().join("Downloads")
}
