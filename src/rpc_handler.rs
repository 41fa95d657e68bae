//! RPC method handler for the JSON-RPC protocol.
//!
//! Extracted from `rpc_server.rs` so it can be unit-tested independently.
//! `handle_method` dispatches a call to the session and tab host held by
//! [`App`].

use std::time::{SystemTime, UNIX_EPOCH};

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tokio::sync::Mutex;

use crate::app::App;
use crate::managers::dedup_session::DEDUPLICATE_COMMAND;
use crate::managers::tab_host::TabHost;
use crate::services::deduplicator::{determine_keeper, normalize_url, select_tabs_to_close};
use crate::services::presentation::{closed_status, group_views, groups_note};
use crate::types::settings::Strategy;
use crate::types::summary::{DuplicateSet, Summary};
use crate::types::tab::{TabId, TabQuery, TabSnapshot, WindowId};

/// Reads a required parameter.
fn param<T: DeserializeOwned>(params: &Value, key: &str) -> Result<T, String> {
    let value = params.get(key).ok_or_else(|| format!("missing {}", key))?;
    serde_json::from_value(value.clone()).map_err(|e| format!("invalid {}: {}", key, e))
}

/// Reads an optional parameter; `null` counts as absent.
fn optional<T: DeserializeOwned>(params: &Value, key: &str) -> Result<Option<T>, String> {
    match params.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(_) => param(params, key).map(Some),
    }
}

fn now_ms() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as f64
}

fn summary_json(summary: &Summary) -> Result<Value, String> {
    let mut value = serde_json::to_value(summary).map_err(|e| e.to_string())?;
    value["groupsNote"] = json!(groups_note(summary));
    Ok(value)
}

/// Dispatch a JSON-RPC method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub async fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Tab inventory ───
        "tabs.open" => {
            let url: String = param(params, "url")?;
            let title: String = optional(params, "title")?.unwrap_or_default();
            let pinned: bool = optional(params, "pinned")?.unwrap_or(false);
            let a = app.lock().await;
            let window_id: WindowId = match optional(params, "windowId")? {
                Some(w) => w,
                None => a.host.current_window(),
            };
            let id = a.host.open_tab(&url, &title, window_id, pinned);
            Ok(json!({"id": id, "windowId": window_id}))
        }
        "tabs.list" => {
            let current_window: bool = optional(params, "currentWindow")?.unwrap_or(false);
            let query = if current_window {
                TabQuery::current_window()
            } else {
                TabQuery::all()
            };
            let a = app.lock().await;
            let tabs = a.host.query_tabs(&query).await.map_err(|e| e.to_string())?;
            serde_json::to_value(tabs).map_err(|e| e.to_string())
        }
        "tabs.focus" => {
            let id: TabId = param(params, "id")?;
            let window_id: WindowId = param(params, "windowId")?;
            let a = app.lock().await;
            a.session.focus(id, window_id).await;
            Ok(json!({"ok": true}))
        }

        // ─── Deduplication ───
        "tabs.summary" => {
            let mut a = app.lock().await;
            a.session.refresh().await.map_err(|e| e.to_string())?;
            let summary = a.session.summary().cloned().unwrap_or_default();
            summary_json(&summary)
        }
        "tabs.view" => {
            let mut a = app.lock().await;
            if a.session.summary().is_none() {
                a.session.refresh().await.map_err(|e| e.to_string())?;
            }
            let summary = a.session.summary().cloned().unwrap_or_default();
            let views = group_views(&summary, a.session.settings().strategy, now_ms());
            Ok(json!({"groups": views, "groupsNote": groups_note(&summary)}))
        }
        "tabs.deduplicate" => {
            let mut a = app.lock().await;
            let removed = a.session.deduplicate().await.map_err(|e| e.to_string())?;
            Ok(json!({"removed": removed, "status": closed_status(removed)}))
        }
        "tabs.close_group" => {
            let index: usize = param(params, "index")?;
            let mut a = app.lock().await;
            let closed = a.session.close_group(index).await.map_err(|e| e.to_string())?;
            Ok(json!({"closed": closed}))
        }
        "tabs.close" => {
            let ids: Vec<TabId> = param(params, "ids")?;
            let mut a = app.lock().await;
            a.session
                .deduplicator()
                .close_specific_tabs(&ids)
                .await
                .map_err(|e| e.to_string())?;
            if !ids.is_empty() {
                a.session.refresh().await.map_err(|e| e.to_string())?;
            }
            Ok(json!({"closed": ids.len()}))
        }
        "tabs.select_to_close" => {
            let groups: Vec<DuplicateSet> = param(params, "groups")?;
            let a = app.lock().await;
            let strategy: Strategy = optional(params, "strategy")?.unwrap_or(a.session.settings().strategy);
            Ok(json!(select_tabs_to_close(&groups, strategy)))
        }
        "tabs.keeper" => {
            let tabs: Vec<TabSnapshot> = param(params, "tabs")?;
            let a = app.lock().await;
            let strategy: Strategy = optional(params, "strategy")?.unwrap_or(a.session.settings().strategy);
            let keeper = determine_keeper(&tabs, strategy).ok_or("empty tab list")?;
            serde_json::to_value(keeper).map_err(|e| e.to_string())
        }
        "url.normalize" => {
            let url: String = param(params, "url")?;
            let ignore_query: bool = optional(params, "ignoreQuery")?.unwrap_or(false);
            Ok(json!({"token": normalize_url(&url, ignore_query)}))
        }

        // ─── Settings ───
        "settings.get" => {
            let a = app.lock().await;
            serde_json::to_value(a.session.settings()).map_err(|e| e.to_string())
        }
        "settings.set" => {
            let key: String = param(params, "key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            let mut a = app.lock().await;
            a.session
                .change_setting(&key, value)
                .await
                .map_err(|e| e.to_string())?;
            serde_json::to_value(a.session.settings()).map_err(|e| e.to_string())
        }
        "settings.reset" => {
            let mut a = app.lock().await;
            a.session.reset_settings().await.map_err(|e| e.to_string())?;
            serde_json::to_value(a.session.settings()).map_err(|e| e.to_string())
        }

        // ─── Commands ───
        "command.run" => {
            let command: String = param(params, "command")?;
            let a = app.lock().await;
            // A null badge means the current badge text stays as it is.
            let badge = a.session.run_command(&command).await;
            Ok(json!({"handled": command == DEDUPLICATE_COMMAND, "badge": badge}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
