// Platform paths
// Resolves where the preference database lives on Windows, macOS, and Linux.
//
// Uses `cfg(target_os)` for conditional compilation to select the correct
// platform-specific implementation at compile time.

use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "TABDEDUP_DATA_DIR";

/// File name of the preference database inside the data directory.
pub const DATABASE_FILE: &str = "tabdedup.db";

/// Returns the platform-specific data directory.
///
/// - **Linux**: `~/.local/share/tabdedup` (or `$XDG_DATA_HOME/tabdedup`)
/// - **macOS**: `~/Library/Application Support/TabDedup`
/// - **Windows**: `%APPDATA%/TabDedup`
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

/// Picks the data directory: `override_dir` when set, otherwise the platform default.
pub fn resolve_data_dir(override_dir: Option<String>) -> PathBuf {
    match override_dir {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => get_data_dir(),
    }
}

/// Path of the preference database, honoring [`DATA_DIR_ENV`].
pub fn database_path() -> PathBuf {
    resolve_data_dir(std::env::var(DATA_DIR_ENV).ok()).join(DATABASE_FILE)
}
