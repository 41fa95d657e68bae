//! View helpers for showing duplicate sets to a user.
//!
//! Everything here is pure: callers pass the current time in.

use serde::{Deserialize, Serialize};

use crate::services::keeper_selector::pick_keeper;
use crate::types::settings::Strategy;
use crate::types::summary::Summary;
use crate::types::tab::{TabId, TabSnapshot, WindowId};

const DAY_MS: f64 = 86_400_000.0;
const HOUR_MS: f64 = 3_600_000.0;
const MINUTE_MS: f64 = 60_000.0;

/// One tab row inside a group view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TabRow {
    pub id: TabId,
    pub window_id: WindowId,
    pub title: String,
    pub keep: bool,
    pub flags: Vec<String>,
    pub last_active: String,
}

/// A duplicate set as shown to the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GroupView {
    pub title: String,
    pub badge: String,
    pub rows: Vec<TabRow>,
}

/// Status flags for a tab: Active, Pinned, Audio, Sleeping, in that order.
pub fn tab_flags(tab: &TabSnapshot) -> Vec<&'static str> {
    let mut flags = Vec::new();
    if tab.active {
        flags.push("Active");
    }
    if tab.pinned {
        flags.push("Pinned");
    }
    if tab.audible {
        flags.push("Audio");
    }
    if tab.discarded {
        flags.push("Sleeping");
    }
    flags
}

/// Formats how long ago `timestamp` was, relative to `now` (both epoch ms).
pub fn format_relative_time(timestamp: f64, now: f64) -> String {
    if timestamp == 0.0 {
        return "unknown".to_string();
    }
    let diff = now - timestamp;
    if diff < 1000.0 {
        return "just now".to_string();
    }
    for (label, unit) in [("d", DAY_MS), ("h", HOUR_MS), ("m", MINUTE_MS)] {
        if diff >= unit {
            return format!("{}{} ago", (diff / unit).floor() as u64, label);
        }
    }
    format!("{}s ago", (diff / 1000.0).floor() as u64)
}

pub fn pluralize<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 {
        one
    } else {
        many
    }
}

/// Status line after a deduplication pass.
pub fn closed_status(removed: usize) -> String {
    if removed == 0 {
        return "No duplicates to close.".to_string();
    }
    format!(
        "Closed {} duplicate {}.",
        removed,
        pluralize(removed, "tab", "tabs")
    )
}

/// Short line describing how many sets were found and how many tabs can go.
pub fn groups_note(summary: &Summary) -> String {
    let count = summary.duplicate_sets.len();
    if count == 0 {
        return "No duplicates detected".to_string();
    }
    format!(
        "{} {} • {} closable",
        count,
        pluralize(count, "set", "sets"),
        summary.possible_closures
    )
}

/// Builds one view per duplicate set, marking each set's keeper.
pub fn group_views(summary: &Summary, strategy: Strategy, now: f64) -> Vec<GroupView> {
    summary
        .duplicate_sets
        .iter()
        .map(|group| {
            let keeper_id = pick_keeper(&group.tabs, strategy).map(|k| k.id);
            let title = if group.hostname.is_empty() {
                group.normalized_url.clone()
            } else {
                group.hostname.clone()
            };
            let rows = group
                .tabs
                .iter()
                .map(|tab| TabRow {
                    id: tab.id,
                    window_id: tab.window_id,
                    title: if tab.title.is_empty() {
                        "(Untitled tab)".to_string()
                    } else {
                        tab.title.clone()
                    },
                    keep: keeper_id == Some(tab.id),
                    flags: tab_flags(tab).into_iter().map(String::from).collect(),
                    last_active: format_relative_time(tab.last_accessed, now),
                })
                .collect();
            GroupView {
                title,
                badge: format!("{} tabs", group.len()),
                rows,
            }
        })
        .collect()
}
