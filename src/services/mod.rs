// Tab deduplication services
// Services provide the core functionality: URL normalization, grouping, keeper
// selection, host-facing deduplication, settings, and presentation helpers.

pub mod deduplicator;
pub mod grouping_engine;
pub mod keeper_selector;
pub mod presentation;
pub mod settings_engine;
pub mod url_normalizer;
