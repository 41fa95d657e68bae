//! Deduplication operations that talk to the tab host.
//!
//! The pure pieces (normalization, grouping, keeper selection) live in their
//! own modules and are re-exported here so callers have one entry point.

use std::sync::Arc;

use tracing::{debug, info};

use crate::managers::tab_host::TabHost;
use crate::services::grouping_engine::group_tabs_by_duplicate;
use crate::types::errors::HostError;
use crate::types::settings::{Settings, Strategy};
use crate::types::summary::{DedupOutcome, Summary};
use crate::types::tab::{TabId, TabSnapshot};

pub use crate::services::keeper_selector::select_tabs_to_close;
pub use crate::services::url_normalizer::normalize_url;

/// Keeper of `members` under `strategy`; `None` only when `members` is empty.
pub fn determine_keeper(members: &[TabSnapshot], strategy: Strategy) -> Option<&TabSnapshot> {
    crate::services::keeper_selector::pick_keeper(members, strategy)
}

/// Runs grouping against the host's current tabs and closes duplicates on request.
#[derive(Clone)]
pub struct Deduplicator {
    host: Arc<dyn TabHost>,
}

impl Deduplicator {
    pub fn new(host: Arc<dyn TabHost>) -> Self {
        Self { host }
    }

    pub fn host(&self) -> &Arc<dyn TabHost> {
        &self.host
    }

    /// Queries the tabs in scope and groups them.
    pub async fn compute_duplicate_summary(&self, settings: &Settings) -> Result<Summary, HostError> {
        let tabs = self.host.query_tabs(&settings.scope.query()).await?;
        Ok(group_tabs_by_duplicate(&tabs, settings))
    }

    /// Closes every duplicate except each set's keeper.
    ///
    /// No close request is sent when there is nothing to close.
    pub async fn deduplicate_tabs(&self, settings: &Settings) -> Result<DedupOutcome, HostError> {
        let summary = self.compute_duplicate_summary(settings).await?;
        let ids = select_tabs_to_close(&summary.duplicate_sets, settings.strategy);
        if ids.is_empty() {
            debug!("no duplicate tabs to close");
            return Ok(DedupOutcome { removed: 0, summary });
        }
        self.host.remove_tabs(&ids).await?;
        info!(removed = ids.len(), sets = summary.duplicate_sets.len(), "closed duplicate tabs");
        Ok(DedupOutcome {
            removed: ids.len(),
            summary,
        })
    }

    /// Closes exactly the given tabs; an empty list is a no-op.
    pub async fn close_specific_tabs(&self, ids: &[TabId]) -> Result<(), HostError> {
        if ids.is_empty() {
            return Ok(());
        }
        self.host.remove_tabs(ids).await
    }
}
