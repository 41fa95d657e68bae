//! Application wiring.
//!
//! Central struct holding the tab host, preference storage, and the
//! interactive deduplication session.

use std::sync::Arc;

use crate::database::preferences::{MemoryPreferenceStore, PreferenceStore, SqlitePreferenceStore};
use crate::managers::dedup_session::DedupSession;
use crate::managers::tab_host::InMemoryTabHost;
use crate::services::deduplicator::Deduplicator;
use crate::services::settings_engine::SettingsEngine;

pub struct App {
    pub host: Arc<InMemoryTabHost>,
    pub session: DedupSession,
}

impl App {
    /// Creates an App whose preferences live in the SQLite database at `db_path`.
    pub fn new(db_path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let store = SqlitePreferenceStore::open(db_path)?;
        Ok(Self::with_parts(Arc::new(InMemoryTabHost::new()), Arc::new(store)))
    }

    /// Creates an App with nothing persisted.
    pub fn in_memory() -> Self {
        Self::with_parts(
            Arc::new(InMemoryTabHost::new()),
            Arc::new(MemoryPreferenceStore::new()),
        )
    }

    pub fn with_parts(host: Arc<InMemoryTabHost>, store: Arc<dyn PreferenceStore>) -> Self {
        let deduplicator = Deduplicator::new(host.clone());
        let session = DedupSession::new(deduplicator, SettingsEngine::new(store));
        Self { host, session }
    }
}
