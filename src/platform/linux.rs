// Platform paths for Linux
// Data: ~/.local/share/tabdedup

use std::env;
use std::path::PathBuf;

/// Uses `$XDG_DATA_HOME/tabdedup` if set, otherwise `~/.local/share/tabdedup`.
pub fn get_data_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg).join("tabdedup")
    } else {
        let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
        PathBuf::from(home)
            .join(".local")
            .join("share")
            .join("tabdedup")
    }
}
