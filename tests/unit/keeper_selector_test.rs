//! Tests for keeper selection and close-list derivation.

use rstest::rstest;

use tabdedup::services::grouping_engine::group_tabs_by_duplicate;
use tabdedup::services::keeper_selector::{pick_keeper, select_tabs_to_close};
use tabdedup::types::settings::{Settings, Strategy};
use tabdedup::types::summary::DuplicateSet;
use tabdedup::types::tab::{TabRecord, TabSnapshot};

fn snap(id: i64, last_accessed: f64) -> TabSnapshot {
    TabSnapshot {
        id,
        last_accessed,
        ..Default::default()
    }
}

fn set(host: &str, tabs: Vec<TabSnapshot>) -> DuplicateSet {
    DuplicateSet {
        token: format!("https://{}/", host),
        normalized_url: format!("https://{}/", host),
        hostname: host.to_string(),
        tabs,
    }
}

fn reference_tabs() -> Vec<TabRecord> {
    [(1, "https://a.com/", 100.0), (2, "https://a.com", 50.0), (3, "https://b.com/", 10.0)]
        .into_iter()
        .map(|(id, url, last)| TabRecord {
            id,
            url: Some(url.to_string()),
            last_accessed: Some(last),
            ..Default::default()
        })
        .collect()
}

#[rstest]
#[case(Strategy::KeepOldest, 2, vec![1])]
#[case(Strategy::KeepNewest, 1, vec![2])]
fn test_reference_scenario(
    #[case] strategy: Strategy,
    #[case] keeper: i64,
    #[case] closed: Vec<i64>,
) {
    let summary = group_tabs_by_duplicate(&reference_tabs(), &Settings::default());
    let group = &summary.duplicate_sets[0];
    assert_eq!(pick_keeper(&group.tabs, strategy).unwrap().id, keeper);
    assert_eq!(select_tabs_to_close(&summary.duplicate_sets, strategy), closed);
}

#[rstest]
#[case(Strategy::KeepOldest, 3)]
#[case(Strategy::KeepNewest, 8)]
fn test_zero_access_tie_break(#[case] strategy: Strategy, #[case] expected: i64) {
    let members = vec![snap(5, 0.0), snap(8, 0.0), snap(3, 0.0)];
    for _ in 0..3 {
        assert_eq!(pick_keeper(&members, strategy).unwrap().id, expected);
    }
}

#[test]
fn test_never_accessed_is_oldest() {
    let members = vec![snap(1, 10.0), snap(2, 0.0)];
    assert_eq!(pick_keeper(&members, Strategy::KeepOldest).unwrap().id, 2);
    assert_eq!(pick_keeper(&members, Strategy::KeepNewest).unwrap().id, 1);
}

#[test]
fn test_keeper_is_a_member() {
    let members = vec![snap(10, 4.0), snap(11, 9.0), snap(12, 1.0)];
    for strategy in [Strategy::KeepOldest, Strategy::KeepNewest] {
        let keeper = pick_keeper(&members, strategy).unwrap();
        assert!(members.contains(keeper));
    }
}

#[test]
fn test_close_list_order_follows_groups_then_members() {
    let groups = vec![
        set("a.com", vec![snap(4, 1.0), snap(2, 2.0), snap(9, 3.0)]),
        set("b.com", vec![snap(7, 1.0), snap(1, 5.0)]),
    ];
    assert_eq!(
        select_tabs_to_close(&groups, Strategy::KeepOldest),
        vec![2, 9, 1]
    );
    assert_eq!(
        select_tabs_to_close(&groups, Strategy::KeepNewest),
        vec![4, 2, 7]
    );
}

#[test]
fn test_small_groups_are_skipped() {
    let groups = vec![
        set("solo.com", vec![snap(1, 1.0)]),
        set("none.com", vec![]),
        set("pair.com", vec![snap(2, 1.0), snap(3, 2.0)]),
    ];
    assert_eq!(select_tabs_to_close(&groups, Strategy::KeepOldest), vec![3]);
}
