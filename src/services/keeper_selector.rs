//! Keeper selection: which member of a duplicate set stays open.

use std::cmp::Ordering;

use crate::types::settings::Strategy;
use crate::types::summary::DuplicateSet;
use crate::types::tab::{TabId, TabSnapshot};

/// Picks the member to keep under `strategy`.
///
/// `KeepOldest` keeps the lowest `last_accessed` (smallest id on ties),
/// `KeepNewest` the highest (largest id on ties). A never-accessed tab counts
/// as the oldest possible. Returns `None` only for an empty slice.
pub fn pick_keeper(members: &[TabSnapshot], strategy: Strategy) -> Option<&TabSnapshot> {
    let (first, rest) = members.split_first()?;
    Some(rest.iter().fold(first, |keeper, tab| {
        let wanted = match strategy {
            Strategy::KeepOldest => Ordering::Less,
            Strategy::KeepNewest => Ordering::Greater,
        };
        if compare_age(tab, keeper) == wanted {
            tab
        } else {
            keeper
        }
    }))
}

/// IDs of every non-keeper, in set order then member order.
///
/// Sets with fewer than two members are skipped.
pub fn select_tabs_to_close(groups: &[DuplicateSet], strategy: Strategy) -> Vec<TabId> {
    let mut ids = Vec::new();
    for group in groups {
        if group.len() < 2 {
            continue;
        }
        let Some(keeper) = pick_keeper(&group.tabs, strategy) else {
            continue;
        };
        ids.extend(
            group
                .tabs
                .iter()
                .filter(|tab| tab.id != keeper.id)
                .map(|tab| tab.id),
        );
    }
    ids
}

fn compare_age(a: &TabSnapshot, b: &TabSnapshot) -> Ordering {
    a.last_accessed
        .partial_cmp(&b.last_accessed)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.id.cmp(&b.id))
}
