// Platform paths for macOS
// Data: ~/Library/Application Support/TabDedup

use std::env;
use std::path::PathBuf;

/// `~/Library/Application Support/TabDedup`
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
        .join("Library")
        .join("Application Support")
        .join("TabDedup")
}
