use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::tab::TabQuery;

/// Storage key under which the preferences object is persisted.
pub const STORAGE_KEY: &str = "simpleTabDeduplicate.preferences";

/// Which windows a deduplication pass looks at.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Scope {
    #[default]
    AllWindows,
    CurrentWindow,
}

impl Scope {
    /// Host query filter for this scope.
    pub fn query(self) -> TabQuery {
        match self {
            Scope::AllWindows => TabQuery::all(),
            Scope::CurrentWindow => TabQuery::current_window(),
        }
    }
}

/// Policy for choosing the tab that stays open in a duplicate set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    #[default]
    KeepOldest,
    KeepNewest,
}

/// User preferences for deduplication.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub scope: Scope,
    pub strategy: Strategy,
    pub include_pinned: bool,
    pub ignore_query: bool,
}

impl Settings {
    /// Wire names of every settings field, in declaration order.
    pub const KEYS: [&'static str; 4] = ["scope", "strategy", "includePinned", "ignoreQuery"];

    /// Returns a copy of `self` with every field present in `overrides` replaced.
    pub fn merge(&self, overrides: &PartialSettings) -> Settings {
        Settings {
            scope: overrides.scope.unwrap_or(self.scope),
            strategy: overrides.strategy.unwrap_or(self.strategy),
            include_pinned: overrides.include_pinned.unwrap_or(self.include_pinned),
            ignore_query: overrides.ignore_query.unwrap_or(self.ignore_query),
        }
    }

    /// Built-in defaults merged with a stored preferences object.
    pub fn from_stored(stored: &Value) -> Settings {
        Settings::default().merge(&PartialSettings::from_stored(stored))
    }
}

/// A set of per-field overrides, as read back from storage.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PartialSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<Strategy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_pinned: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_query: Option<bool>,
}

impl PartialSettings {
    /// Reads overrides field by field.
    ///
    /// Unknown keys are ignored. A key whose value does not fit the field's
    /// type is treated as missing, so one bad entry never discards the others.
    /// Anything other than a JSON object yields no overrides.
    pub fn from_stored(stored: &Value) -> PartialSettings {
        let Some(map) = stored.as_object() else {
            return PartialSettings::default();
        };
        PartialSettings {
            scope: field(map, "scope"),
            strategy: field(map, "strategy"),
            include_pinned: field(map, "includePinned"),
            ignore_query: field(map, "ignoreQuery"),
        }
    }
}

fn field<T: DeserializeOwned>(map: &Map<String, Value>, key: &str) -> Option<T> {
    map.get(key)
        .and_then(|value| serde_json::from_value(value.clone()).ok())
}
