// Platform paths for Windows
// Data: %APPDATA%/TabDedup

use std::env;
use std::path::PathBuf;

/// `%APPDATA%/TabDedup`, falling back to the user profile when unset.
pub fn get_data_dir() -> PathBuf {
    let base = env::var("APPDATA")
        .or_else(|_| env::var("USERPROFILE"))
        .unwrap_or_else(|_| String::from("C:\\Temp"));
    PathBuf::from(base).join("TabDedup")
}
