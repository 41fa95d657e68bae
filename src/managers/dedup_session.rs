//! Caller-side state for an interactive deduplication session.
//!
//! A session owns the current settings and the last summary shown to the
//! user. Refreshes are stamped with a monotonically increasing run number and
//! a result is applied only if no newer refresh was started in the meantime.

use serde_json::Value;
use tracing::{error, warn};

use crate::services::deduplicator::{determine_keeper, select_tabs_to_close, Deduplicator};
use crate::services::settings_engine::SettingsEngine;
use crate::types::errors::{HostError, SessionError, SettingsError};
use crate::types::settings::Settings;
use crate::types::summary::{DuplicateSet, Summary};
use crate::types::tab::{TabId, TabSnapshot, WindowId};

/// Name of the keyboard command that deduplicates every tab in scope.
pub const DEDUPLICATE_COMMAND: &str = "deduplicate-tabs";

/// Stamp identifying one refresh run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshTicket {
    run_id: u64,
    settings: Settings,
}

impl RefreshTicket {
    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    /// Settings captured when the run started.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

pub struct DedupSession {
    deduplicator: Deduplicator,
    settings_engine: SettingsEngine,
    summary: Option<Summary>,
    refresh_token: u64,
}

impl DedupSession {
    pub fn new(deduplicator: Deduplicator, settings_engine: SettingsEngine) -> Self {
        Self {
            deduplicator,
            settings_engine,
            summary: None,
            refresh_token: 0,
        }
    }

    pub fn settings(&self) -> &Settings {
        self.settings_engine.get_settings()
    }

    /// Summary from the most recent refresh that was applied.
    pub fn summary(&self) -> Option<&Summary> {
        self.summary.as_ref()
    }

    pub fn deduplicator(&self) -> &Deduplicator {
        &self.deduplicator
    }

    pub fn settings_engine(&self) -> &SettingsEngine {
        &self.settings_engine
    }

    /// Loads stored settings and computes the first summary.
    pub async fn init(&mut self) -> Result<(), SessionError> {
        self.settings_engine.load().await;
        self.refresh().await?;
        Ok(())
    }

    /// Starts a refresh run, invalidating every earlier one.
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.refresh_token += 1;
        RefreshTicket {
            run_id: self.refresh_token,
            settings: self.settings().clone(),
        }
    }

    /// Whether `ticket` belongs to the latest run started.
    pub fn is_current(&self, ticket: &RefreshTicket) -> bool {
        ticket.run_id == self.refresh_token
    }

    /// Stores `summary` if `ticket` is still current. Returns whether it was applied.
    pub fn apply_refresh(&mut self, ticket: &RefreshTicket, summary: Summary) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.summary = Some(summary);
        true
    }

    /// Recomputes the summary under the current settings.
    pub async fn refresh(&mut self) -> Result<bool, HostError> {
        let ticket = self.begin_refresh();
        let summary = self
            .deduplicator
            .compute_duplicate_summary(ticket.settings())
            .await?;
        Ok(self.apply_refresh(&ticket, summary))
    }

    /// Updates one setting in memory, persists it, then refreshes.
    ///
    /// A rejected key or value fails without changing anything. A persistence
    /// failure is logged and the in-memory change stands.
    pub async fn change_setting(&mut self, key: &str, value: Value) -> Result<(), SessionError> {
        match self.settings_engine.set_value(key, value).await {
            Ok(()) => {}
            Err(e @ (SettingsError::InvalidKey(_) | SettingsError::InvalidValue(_))) => {
                return Err(e.into())
            }
            Err(e) => warn!(error = %e, key, "failed to save settings"),
        }
        self.refresh().await?;
        Ok(())
    }

    /// Restores the built-in defaults, then refreshes.
    ///
    /// Like [`change_setting`](Self::change_setting), a persistence failure
    /// is only logged.
    pub async fn reset_settings(&mut self) -> Result<(), SessionError> {
        if let Err(e) = self.settings_engine.reset().await {
            warn!(error = %e, "failed to save settings");
        }
        self.refresh().await?;
        Ok(())
    }

    /// Persists settings, closes every duplicate, and refreshes.
    ///
    /// Returns how many tabs were closed.
    pub async fn deduplicate(&mut self) -> Result<usize, SessionError> {
        self.settings_engine.save().await?;
        let outcome = self
            .deduplicator
            .deduplicate_tabs(self.settings_engine.get_settings())
            .await?;
        self.refresh().await?;
        Ok(outcome.removed)
    }

    /// Closes the non-keepers of the displayed set at `index`, then refreshes.
    ///
    /// Returns how many tabs were closed; nothing is sent to the host when
    /// there is nothing to close.
    pub async fn close_group(&mut self, index: usize) -> Result<usize, SessionError> {
        let ids: Vec<TabId> = match self.summary.as_ref().and_then(|s| s.duplicate_sets.get(index)) {
            Some(group) => select_tabs_to_close(std::slice::from_ref(group), self.settings().strategy),
            None => Vec::new(),
        };
        if ids.is_empty() {
            return Ok(0);
        }
        self.deduplicator.close_specific_tabs(&ids).await?;
        self.refresh().await?;
        Ok(ids.len())
    }

    /// Activates a tab and focuses its window. Failures are only logged.
    pub async fn focus(&self, id: TabId, window_id: WindowId) {
        if let Err(e) = self.deduplicator.host().focus_tab(id, window_id).await {
            warn!(error = %e, tab = id, "failed to focus tab");
        }
    }

    /// Keeper of `group` under the current strategy.
    pub fn keeper_for<'a>(&self, group: &'a DuplicateSet) -> Option<&'a TabSnapshot> {
        determine_keeper(&group.tabs, self.settings().strategy)
    }

    /// Handles a keyboard command and returns the badge text to show.
    ///
    /// Only [`DEDUPLICATE_COMMAND`] is recognised. The command uses freshly
    /// loaded settings, not the session's in-memory ones. `None` means the
    /// badge stays as it is: the command was not recognised or the pass failed.
    pub async fn run_command(&self, command: &str) -> Option<String> {
        if command != DEDUPLICATE_COMMAND {
            return None;
        }
        let settings = self.settings_engine.load_settings().await;
        match self.deduplicator.deduplicate_tabs(&settings).await {
            Ok(outcome) if outcome.removed > 0 => Some(format!("-{}", outcome.removed)),
            Ok(_) => Some(String::new()),
            Err(e) => {
                error!(error = %e, "deduplicate command failed");
                None
            }
        }
    }
}
