use serde::{Deserialize, Serialize};

/// Host-assigned tab identifier, stable for the tab's lifetime.
pub type TabId = i64;

/// Host-assigned window identifier.
pub type WindowId = i64;

/// One open tab as reported by the host.
///
/// Field names follow the host's camelCase wire format so records can be
/// deserialized straight from a tab query response.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TabRecord {
    pub id: TabId,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub window_id: WindowId,
    #[serde(default)]
    pub index: usize,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub discarded: bool,
    #[serde(default)]
    pub audible: bool,
    /// Milliseconds since the epoch; absent when the host never recorded a focus.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_accessed: Option<f64>,
}

impl TabRecord {
    /// Returns the url when one is present and non-empty.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.is_empty())
    }

    /// Last access time with absent or non-finite values mapped to 0.
    pub fn last_accessed_or_zero(&self) -> f64 {
        self.last_accessed.filter(|t| t.is_finite()).unwrap_or(0.0)
    }

    /// Minimized copy of the record kept inside a duplicate set.
    pub fn snapshot(&self) -> TabSnapshot {
        TabSnapshot {
            id: self.id,
            title: self.title.clone(),
            url: self.url.clone().unwrap_or_default(),
            window_id: self.window_id,
            index: self.index,
            active: self.active,
            pinned: self.pinned,
            discarded: self.discarded,
            audible: self.audible,
            last_accessed: self.last_accessed_or_zero(),
        }
    }
}

/// Read-only snapshot of a tab stored in a duplicate set.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TabSnapshot {
    pub id: TabId,
    pub title: String,
    pub url: String,
    pub window_id: WindowId,
    pub index: usize,
    pub active: bool,
    pub pinned: bool,
    pub discarded: bool,
    pub audible: bool,
    #[serde(default)]
    pub last_accessed: f64,
}

/// Filter passed to the host when querying open tabs.
///
/// An empty filter means every tab in every window.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TabQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_window: Option<bool>,
}

impl TabQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn current_window() -> Self {
        Self {
            current_window: Some(true),
        }
    }
}
