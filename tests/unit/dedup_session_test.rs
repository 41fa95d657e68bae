//! Tests for the interactive deduplication session.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use tabdedup::database::preferences::{MemoryPreferenceStore, PreferenceStore};
use tabdedup::managers::dedup_session::DedupSession;
use tabdedup::managers::tab_host::{InMemoryTabHost, TabHost};
use tabdedup::services::deduplicator::Deduplicator;
use tabdedup::services::settings_engine::SettingsEngine;
use tabdedup::types::errors::{HostError, SessionError, SettingsError};
use tabdedup::types::settings::{Strategy, STORAGE_KEY};
use tabdedup::types::summary::Summary;
use tabdedup::types::tab::{TabId, TabQuery, TabRecord, WindowId};

struct ReadOnlyStore;

#[async_trait]
impl PreferenceStore for ReadOnlyStore {
    async fn get(&self, _key: &str) -> Result<Option<Value>, SettingsError> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &Value) -> Result<(), SettingsError> {
        Err(SettingsError::Storage("read-only".to_string()))
    }
}

struct DisconnectedHost;

#[async_trait]
impl TabHost for DisconnectedHost {
    async fn query_tabs(&self, _query: &TabQuery) -> Result<Vec<TabRecord>, HostError> {
        Err(HostError::Query("host disconnected".to_string()))
    }

    async fn remove_tabs(&self, _ids: &[TabId]) -> Result<(), HostError> {
        Err(HostError::Remove("host disconnected".to_string()))
    }

    async fn focus_tab(&self, _id: TabId, _window_id: WindowId) -> Result<(), HostError> {
        Err(HostError::Focus("host disconnected".to_string()))
    }
}

fn record(id: i64, url: &str, last_accessed: f64) -> TabRecord {
    TabRecord {
        id,
        title: format!("Tab {}", id),
        url: Some(url.to_string()),
        window_id: 1,
        last_accessed: Some(last_accessed),
        ..Default::default()
    }
}

fn host() -> Arc<InMemoryTabHost> {
    Arc::new(InMemoryTabHost::with_tabs(vec![
        record(1, "https://a.com/", 100.0),
        record(2, "https://a.com", 50.0),
        record(3, "https://b.com/?q=1", 10.0),
        record(4, "https://b.com/?q=2", 20.0),
    ]))
}

fn session_with(host: Arc<InMemoryTabHost>, store: Arc<dyn PreferenceStore>) -> DedupSession {
    DedupSession::new(Deduplicator::new(host), SettingsEngine::new(store))
}

#[tokio::test]
async fn test_init_loads_settings_and_summary() {
    let store = Arc::new(MemoryPreferenceStore::new());
    store
        .set(STORAGE_KEY, &json!({"strategy": "keep-newest"}))
        .await
        .unwrap();
    let mut session = session_with(host(), store);

    session.init().await.unwrap();

    assert_eq!(session.settings().strategy, Strategy::KeepNewest);
    let summary = session.summary().unwrap();
    assert_eq!(summary.total_tabs, 4);
    assert_eq!(summary.duplicate_sets.len(), 1);
}

#[tokio::test]
async fn test_stale_refresh_is_discarded() {
    let mut session = session_with(host(), Arc::new(MemoryPreferenceStore::new()));

    let first = session.begin_refresh();
    let second = session.begin_refresh();
    assert!(second.run_id() > first.run_id());

    let newer = Summary {
        total_tabs: 2,
        ..Default::default()
    };
    let older = Summary {
        total_tabs: 1,
        ..Default::default()
    };
    assert!(session.apply_refresh(&second, newer.clone()));
    assert!(!session.apply_refresh(&first, older));
    assert_eq!(session.summary(), Some(&newer));
}

#[tokio::test]
async fn test_refresh_started_after_ticket_wins() {
    let mut session = session_with(host(), Arc::new(MemoryPreferenceStore::new()));
    let stale = session.begin_refresh();
    assert!(session.refresh().await.unwrap());
    let fresh = session.summary().cloned();
    assert!(!session.apply_refresh(&stale, Summary::default()));
    assert_eq!(session.summary().cloned(), fresh);
}

#[tokio::test]
async fn test_change_setting_refreshes_with_new_value() {
    let mut session = session_with(host(), Arc::new(MemoryPreferenceStore::new()));
    session.init().await.unwrap();
    assert_eq!(session.summary().unwrap().duplicate_sets.len(), 1);

    session.change_setting("ignoreQuery", json!(true)).await.unwrap();

    assert!(session.settings().ignore_query);
    assert_eq!(session.summary().unwrap().duplicate_sets.len(), 2);
}

#[tokio::test]
async fn test_change_setting_survives_failed_save() {
    let mut session = session_with(host(), Arc::new(ReadOnlyStore));
    session.init().await.unwrap();

    session.change_setting("strategy", json!("keep-newest")).await.unwrap();
    assert_eq!(session.settings().strategy, Strategy::KeepNewest);
}

#[tokio::test]
async fn test_reset_settings_survives_failed_save() {
    let mut session = session_with(host(), Arc::new(ReadOnlyStore));
    session.change_setting("ignoreQuery", json!(true)).await.unwrap();
    session.reset_settings().await.unwrap();
    assert!(!session.settings().ignore_query);
    assert_eq!(session.summary().unwrap().duplicate_sets.len(), 1);
}

#[tokio::test]
async fn test_change_setting_rejects_bad_value() {
    let mut session = session_with(host(), Arc::new(ReadOnlyStore));
    let result = session.change_setting("strategy", json!("keep-random")).await;
    assert!(matches!(
        result,
        Err(SessionError::Settings(SettingsError::InvalidValue(_)))
    ));
    assert_eq!(session.settings().strategy, Strategy::KeepOldest);
    assert!(session.summary().is_none());
}

#[tokio::test]
async fn test_change_setting_rejects_unknown_key() {
    let mut session = session_with(host(), Arc::new(MemoryPreferenceStore::new()));
    let result = session.change_setting("colour", json!("blue")).await;
    assert!(matches!(
        result,
        Err(SessionError::Settings(SettingsError::InvalidKey(_)))
    ));
}

#[tokio::test]
async fn test_deduplicate_closes_and_refreshes() {
    let tabs = host();
    let mut session = session_with(tabs.clone(), Arc::new(MemoryPreferenceStore::new()));
    session.init().await.unwrap();

    let removed = session.deduplicate().await.unwrap();

    assert_eq!(removed, 1);
    assert!(tabs.get_tab(1).is_none());
    assert!(session.summary().unwrap().duplicate_sets.is_empty());
}

#[tokio::test]
async fn test_deduplicate_aborts_when_settings_cannot_be_saved() {
    let tabs = host();
    let mut session = session_with(tabs.clone(), Arc::new(ReadOnlyStore));
    session.init().await.unwrap();

    let result = session.deduplicate().await;

    assert!(matches!(result, Err(SessionError::Settings(_))));
    assert_eq!(tabs.tab_count(), 4);
    assert_eq!(tabs.remove_calls(), 0);
}

#[tokio::test]
async fn test_close_group() {
    let tabs = host();
    let mut session = session_with(tabs.clone(), Arc::new(MemoryPreferenceStore::new()));
    session.init().await.unwrap();

    assert_eq!(session.close_group(7).await.unwrap(), 0);
    assert_eq!(tabs.remove_calls(), 0);

    assert_eq!(session.close_group(0).await.unwrap(), 1);
    assert_eq!(tabs.tab_count(), 3);
    assert!(session.summary().unwrap().duplicate_sets.is_empty());
}

#[tokio::test]
async fn test_keeper_follows_strategy() {
    let mut session = session_with(host(), Arc::new(MemoryPreferenceStore::new()));
    session.init().await.unwrap();
    let group = session.summary().unwrap().duplicate_sets[0].clone();

    assert_eq!(session.keeper_for(&group).unwrap().id, 2);
    session.change_setting("strategy", json!("keep-newest")).await.unwrap();
    assert_eq!(session.keeper_for(&group).unwrap().id, 1);
}

#[tokio::test]
async fn test_focus_is_best_effort() {
    let tabs = host();
    let session = session_with(tabs.clone(), Arc::new(MemoryPreferenceStore::new()));
    session.focus(999, 1).await;
    session.focus(2, 1).await;
    assert!(tabs.get_tab(2).unwrap().active);
}

#[tokio::test]
async fn test_run_command_badge() {
    let tabs = host();
    let session = session_with(tabs.clone(), Arc::new(MemoryPreferenceStore::new()));

    assert_eq!(session.run_command("open-popup").await, None);
    assert_eq!(session.run_command("deduplicate-tabs").await, Some("-1".to_string()));
    assert_eq!(session.run_command("deduplicate-tabs").await, Some(String::new()));
    assert_eq!(tabs.tab_count(), 3);
}

#[tokio::test]
async fn test_failed_command_keeps_badge() {
    let session = DedupSession::new(
        Deduplicator::new(Arc::new(DisconnectedHost)),
        SettingsEngine::new(Arc::new(MemoryPreferenceStore::new())),
    );
    assert_eq!(session.run_command("deduplicate-tabs").await, None);
}

#[tokio::test]
async fn test_reset_settings() {
    let mut session = session_with(host(), Arc::new(MemoryPreferenceStore::new()));
    session.change_setting("includePinned", json!(true)).await.unwrap();
    session.reset_settings().await.unwrap();
    assert!(!session.settings().include_pinned);
}
