//! Partitions a tab snapshot into duplicate sets.

use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::debug;

use crate::services::url_normalizer::{self, Classification};
use crate::types::settings::Settings;
use crate::types::summary::{DuplicateSet, Summary};
use crate::types::tab::TabRecord;

/// Groups `tabs` by comparison token and keeps the groups with two or more members.
///
/// Members of a set are ordered by ascending `last_accessed`, ties keeping the
/// order in which the tabs were encountered. Sets are ordered by descending
/// size, then ascending hostname.
pub fn group_tabs_by_duplicate(tabs: &[TabRecord], settings: &Settings) -> Summary {
    let mut buckets: Vec<DuplicateSet> = Vec::new();
    let mut by_token: HashMap<String, usize> = HashMap::new();
    let mut eligible_tabs = 0;

    for tab in tabs {
        let token = match url_normalizer::classify(tab, settings.include_pinned, settings.ignore_query) {
            Classification::Token(token) => token,
            Classification::Excluded(_) => continue,
        };
        eligible_tabs += 1;

        let slot = match by_token.get(&token) {
            Some(&slot) => slot,
            None => {
                let raw = tab.url().unwrap_or_default();
                buckets.push(DuplicateSet {
                    token: token.clone(),
                    normalized_url: url_normalizer::normalize_url(raw, settings.ignore_query),
                    hostname: url_normalizer::display_hostname(raw),
                    tabs: Vec::new(),
                });
                by_token.insert(token, buckets.len() - 1);
                buckets.len() - 1
            }
        };
        buckets[slot].tabs.push(tab.snapshot());
    }

    let mut duplicate_sets: Vec<DuplicateSet> = buckets
        .into_iter()
        .filter(|set| set.len() > 1)
        .map(|mut set| {
            // sort_by is stable: tabs with equal access times stay in encounter order
            set.tabs.sort_by(|a, b| {
                a.last_accessed
                    .partial_cmp(&b.last_accessed)
                    .unwrap_or(Ordering::Equal)
            });
            set
        })
        .collect();
    duplicate_sets.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.hostname.cmp(&b.hostname)));

    let possible_closures = duplicate_sets.iter().map(DuplicateSet::closable).sum();

    debug!(
        total = tabs.len(),
        eligible = eligible_tabs,
        sets = duplicate_sets.len(),
        possible_closures,
        "grouped tabs"
    );

    Summary {
        total_tabs: tabs.len(),
        eligible_tabs,
        duplicate_sets,
        possible_closures,
    }
}
