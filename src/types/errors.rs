use std::fmt;

use super::tab::TabId;

// === HostError ===

/// Errors raised at the boundary with the tab host.
#[derive(Debug)]
pub enum HostError {
    /// Querying the tab inventory failed.
    Query(String),
    /// Closing tabs failed.
    Remove(String),
    /// Activating a tab or focusing its window failed.
    Focus(String),
    /// The host has no tab with the given ID.
    TabNotFound(TabId),
    /// A close request carried no tab IDs.
    EmptyRemoval,
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::Query(msg) => write!(f, "Tab query failed: {}", msg),
            HostError::Remove(msg) => write!(f, "Tab removal failed: {}", msg),
            HostError::Focus(msg) => write!(f, "Tab focus failed: {}", msg),
            HostError::TabNotFound(id) => write!(f, "No tab with id: {}", id),
            HostError::EmptyRemoval => write!(f, "Tab removal requested with no tab ids"),
        }
    }
}

impl std::error::Error for HostError {}

// === SettingsError ===

/// Errors related to loading, updating, and persisting preferences.
#[derive(Debug)]
pub enum SettingsError {
    /// The preference store could not be read or written.
    Storage(String),
    /// Settings could not be converted to or from JSON.
    Serialization(String),
    /// The settings key does not exist.
    InvalidKey(String),
    /// The value does not fit the settings field.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Storage(msg) => write!(f, "Settings storage error: {}", msg),
            SettingsError::Serialization(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => write!(f, "Invalid settings value: {}", msg),
        }
    }
}

impl std::error::Error for SettingsError {}

impl From<rusqlite::Error> for SettingsError {
    fn from(err: rusqlite::Error) -> Self {
        SettingsError::Storage(err.to_string())
    }
}

// === SessionError ===

/// Errors surfaced by session operations that touch both the host and storage.
#[derive(Debug)]
pub enum SessionError {
    /// The tab host rejected a request.
    Host(HostError),
    /// Settings could not be updated or persisted.
    Settings(SettingsError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Host(err) => write!(f, "{}", err),
            SessionError::Settings(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Host(err) => Some(err),
            SessionError::Settings(err) => Some(err),
        }
    }
}

impl From<HostError> for SessionError {
    fn from(err: HostError) -> Self {
        SessionError::Host(err)
    }
}

impl From<SettingsError> for SessionError {
    fn from(err: SettingsError) -> Self {
        SessionError::Settings(err)
    }
}
