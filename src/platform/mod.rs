// Kestrel platform paths
// Where the profile database lives and where downloads are saved, per OS.

use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

/// Returns the directory holding `kestrel.db`.
///
/// - **Linux**: `$XDG_DATA_HOME/kestrel`, else `~/.local/share/kestrel`
/// - **macOS**: `~/Library/Application Support/Kestrel`
/// - **Windows**: `%APPDATA%/Kestrel`
pub fn get_data_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_data_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_data_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_data_dir()
    }
}

/// Returns the directory finished downloads are written to.
///
/// - **Linux**: `$XDG_DOWNLOAD_DIR`, else `~/Downloads`
/// - **macOS**: `~/Downloads`
/// - **Windows**: `%USERPROFILE%/Downloads`
pub fn get_download_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_download_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_download_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_download_dir()
    }
}
