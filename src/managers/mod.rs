// Tab deduplication state managers
// Managers hold stateful pieces: the tab host and the interactive session.

pub mod dedup_session;
pub mod tab_host;
