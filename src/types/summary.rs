use serde::{Deserialize, Serialize};

use super::tab::TabSnapshot;

/// Two or more tabs sharing one comparison token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateSet {
    pub token: String,
    pub normalized_url: String,
    /// Host with a leading `www.` removed. Used for ordering and display only.
    pub hostname: String,
    /// Members in ascending `last_accessed` order.
    pub tabs: Vec<TabSnapshot>,
}

impl DuplicateSet {
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Number of members that would be closed, keeping one.
    pub fn closable(&self) -> usize {
        self.tabs.len().saturating_sub(1)
    }
}

/// Aggregate view over every duplicate set found in one tab snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_tabs: usize,
    pub eligible_tabs: usize,
    pub duplicate_sets: Vec<DuplicateSet>,
    pub possible_closures: usize,
}

/// Result of a full deduplication pass.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DedupOutcome {
    pub removed: usize,
    /// Summary computed before anything was closed.
    pub summary: Summary,
}
