//! The tab host: the inventory of open tabs that deduplication reads from and
//! sends close and focus requests to.

use std::sync::{Mutex, MutexGuard};
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;

use crate::types::errors::HostError;
use crate::types::tab::{TabId, TabQuery, TabRecord, WindowId};

/// Interface to whatever owns the open tabs.
#[async_trait]
pub trait TabHost: Send + Sync {
    /// Returns a snapshot of the open tabs matching `query`.
    async fn query_tabs(&self, query: &TabQuery) -> Result<Vec<TabRecord>, HostError>;
    /// Closes the given tabs. Must not be called with an empty slice.
    async fn remove_tabs(&self, ids: &[TabId]) -> Result<(), HostError>;
    /// Activates a tab and focuses its window.
    async fn focus_tab(&self, id: TabId, window_id: WindowId) -> Result<(), HostError>;
}

struct HostState {
    tabs: Vec<TabRecord>,
    next_id: TabId,
    current_window: WindowId,
    remove_calls: usize,
}

/// In-memory tab host.
///
/// Tabs are kept in window order. The current window is the one the last
/// focus request targeted, or the window of the first tab opened.
pub struct InMemoryTabHost {
    state: Mutex<HostState>,
}

impl InMemoryTabHost {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(HostState {
                tabs: Vec::new(),
                next_id: 1,
                current_window: 1,
                remove_calls: 0,
            }),
        }
    }

    /// Creates a host pre-populated with `tabs`, kept as given.
    pub fn with_tabs(tabs: Vec<TabRecord>) -> Self {
        let host = Self::new();
        for tab in tabs {
            host.insert(tab);
        }
        host
    }

    fn state(&self) -> MutexGuard<'_, HostState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn now_ms() -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as f64
    }

    /// Opens a tab at the end of `window_id` and returns its ID.
    ///
    /// The new tab becomes the active tab of its window.
    pub fn open_tab(&self, url: &str, title: &str, window_id: WindowId, pinned: bool) -> TabId {
        let mut state = self.state();
        let id = state.next_id;
        let index = state.tabs.iter().filter(|t| t.window_id == window_id).count();
        for tab in state.tabs.iter_mut().filter(|t| t.window_id == window_id) {
            tab.active = false;
        }
        if state.tabs.is_empty() {
            state.current_window = window_id;
        }
        state.tabs.push(TabRecord {
            id,
            title: title.to_string(),
            url: Some(url.to_string()),
            window_id,
            index,
            active: true,
            pinned,
            discarded: false,
            audible: false,
            last_accessed: Some(Self::now_ms()),
        });
        state.next_id = state.next_id.saturating_add(1);
        id
    }

    /// Adds a fully specified record, replacing any tab with the same ID.
    pub fn insert(&self, tab: TabRecord) {
        let mut state = self.state();
        if state.tabs.is_empty() {
            state.current_window = tab.window_id;
        }
        state.next_id = state.next_id.max(tab.id.saturating_add(1));
        match state.tabs.iter().position(|t| t.id == tab.id) {
            Some(pos) => state.tabs[pos] = tab,
            None => state.tabs.push(tab),
        }
    }

    pub fn get_tab(&self, id: TabId) -> Option<TabRecord> {
        self.state().tabs.iter().find(|t| t.id == id).cloned()
    }

    pub fn tab_count(&self) -> usize {
        self.state().tabs.len()
    }

    pub fn current_window(&self) -> WindowId {
        self.state().current_window
    }

    pub fn set_current_window(&self, window_id: WindowId) {
        self.state().current_window = window_id;
    }

    /// Number of accepted close requests so far.
    pub fn remove_calls(&self) -> usize {
        self.state().remove_calls
    }
}

impl Default for InMemoryTabHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostState {
    /// Re-packs indices in `window_id` and makes sure it has an active tab.
    fn reindex_window(&mut self, window_id: WindowId, removed_at: usize) {
        let mut in_window: Vec<&mut TabRecord> = self
            .tabs
            .iter_mut()
            .filter(|t| t.window_id == window_id)
            .collect();
        for (index, tab) in in_window.iter_mut().enumerate() {
            tab.index = index;
        }
        if !in_window.is_empty() && !in_window.iter().any(|t| t.active) {
            let neighbor = removed_at.min(in_window.len() - 1);
            in_window[neighbor].active = true;
        }
    }
}

#[async_trait]
impl TabHost for InMemoryTabHost {
    async fn query_tabs(&self, query: &TabQuery) -> Result<Vec<TabRecord>, HostError> {
        let state = self.state();
        let tabs = match query.current_window {
            Some(true) => state
                .tabs
                .iter()
                .filter(|t| t.window_id == state.current_window)
                .cloned()
                .collect(),
            _ => state.tabs.clone(),
        };
        Ok(tabs)
    }

    /// Closes every listed tab, or none if any ID is unknown.
    async fn remove_tabs(&self, ids: &[TabId]) -> Result<(), HostError> {
        if ids.is_empty() {
            return Err(HostError::EmptyRemoval);
        }
        let mut state = self.state();
        if let Some(missing) = ids.iter().find(|id| !state.tabs.iter().any(|t| t.id == **id)) {
            return Err(HostError::TabNotFound(*missing));
        }

        let mut touched: Vec<(WindowId, usize)> = Vec::new();
        for tab in state.tabs.iter().filter(|t| ids.contains(&t.id)) {
            match touched.iter_mut().find(|(w, _)| *w == tab.window_id) {
                Some(entry) => entry.1 = entry.1.min(tab.index),
                None => touched.push((tab.window_id, tab.index)),
            }
        }
        state.tabs.retain(|t| !ids.contains(&t.id));
        for (window_id, removed_at) in touched {
            state.reindex_window(window_id, removed_at);
        }
        state.remove_calls += 1;
        Ok(())
    }

    async fn focus_tab(&self, id: TabId, window_id: WindowId) -> Result<(), HostError> {
        let mut state = self.state();
        let pos = state
            .tabs
            .iter()
            .position(|t| t.id == id)
            .ok_or(HostError::TabNotFound(id))?;
        if state.tabs[pos].window_id != window_id {
            return Err(HostError::Focus(format!(
                "tab {} is not in window {}",
                id, window_id
            )));
        }
        for tab in state.tabs.iter_mut().filter(|t| t.window_id == window_id) {
            tab.active = tab.id == id;
        }
        state.tabs[pos].last_accessed = Some(Self::now_ms());
        state.current_window = window_id;
        Ok(())
    }
}
