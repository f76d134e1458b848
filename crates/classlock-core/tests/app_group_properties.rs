use std::collections::{BTreeSet, HashSet};

use classlock_core::app_group::{App, AppGroupStore, Catalog};
use classlock_core::seed;

fn seeded_store() -> AppGroupStore {
    AppGroupStore::new(Catalog::new(seed::default_catalog()).unwrap())
}

fn ids(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn test_group_ids_are_pairwise_distinct() {
    let mut store = seeded_store();
    let created: Vec<String> = (0..200)
        .map(|i| store.create_group(&format!("Group {i}")).unwrap().id)
        .collect();

    let unique: HashSet<&String> = created.iter().collect();
    assert_eq!(unique.len(), created.len());
}

#[test]
fn test_blank_names_leave_collection_unchanged() {
    let mut store = seeded_store();
    store.create_group("Existing").unwrap();
    let before = store.groups().to_vec();

    assert!(store.create_group("").unwrap_err().is_validation());
    assert!(store.create_group("   ").unwrap_err().is_validation());

    assert_eq!(store.groups(), before.as_slice());
}

#[test]
fn test_session_edits_do_not_leak_before_commit() {
    let mut store = seeded_store();
    let group = store.create_group("Focus").unwrap();
    let session = store.begin_edit_session(&group.id).unwrap();

    let session = store.toggle_staged(&session, "1").unwrap();
    let session = store.toggle_staged(&session, "6").unwrap();

    assert_eq!(session.staged_member_ids(), &ids(&["1", "6"]));
    assert!(store.get_group(&group.id).unwrap().members.is_empty());
}

#[test]
fn test_toggle_twice_restores_staged_set() {
    let mut store = seeded_store();
    let group = store.create_group("Focus").unwrap();
    let session = store.begin_edit_session(&group.id).unwrap();
    let session = store.toggle_staged(&session, "2").unwrap();

    for app_id in ["2", "7"] {
        let once = store.toggle_staged(&session, app_id).unwrap();
        let twice = store.toggle_staged(&once, app_id).unwrap();
        assert_ne!(once.staged_member_ids(), session.staged_member_ids());
        assert_eq!(twice.staged_member_ids(), session.staged_member_ids());
    }
}

#[test]
fn test_commit_overwrites_membership() {
    let catalog = Catalog::new(vec![
        App::new("A", "Alpha", "Games"),
        App::new("B", "Beta", "Games"),
        App::new("C", "Gamma", "Games"),
    ])
    .unwrap();
    let mut store = AppGroupStore::with_groups(
        catalog,
        vec![("Pair", vec!["A".to_string(), "B".to_string()])],
    )
    .unwrap();
    let group_id = store.groups()[0].id.clone();

    let session = store.begin_edit_session(&group_id).unwrap();
    assert_eq!(session.staged_member_ids(), &ids(&["A", "B"]));
    let session = store.toggle_staged(&session, "A").unwrap();
    let session = store.toggle_staged(&session, "C").unwrap();

    let updated = store.commit_edit_session(&session).unwrap();

    assert_eq!(updated.members, vec!["B", "C"]);
    assert_eq!(store.get_group(&group_id).unwrap().members, vec!["B", "C"]);
}

#[test]
fn test_commit_after_delete_fails_without_mutation() {
    let mut store = seeded_store();
    let doomed = store.create_group("Doomed").unwrap();
    let survivor = store.create_group("Survivor").unwrap();
    let session = store.begin_edit_session(&doomed.id).unwrap();
    let session = store.toggle_staged(&session, "1").unwrap();

    let removed = store.delete_group(&doomed.id).unwrap();
    assert_eq!(removed.name, "Doomed");
    let before = store.groups().to_vec();

    let err = store.commit_edit_session(&session).unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(store.groups(), before.as_slice());
    assert_eq!(store.groups(), &[survivor]);
}

#[test]
fn test_filter_catalog_social() {
    let store = seeded_store();

    let found: Vec<&str> = store
        .filter_catalog("social")
        .into_iter()
        .map(|a| a.name.as_str())
        .collect();
    let expected: Vec<&str> = store
        .list_catalog()
        .iter()
        .filter(|a| {
            a.name.to_lowercase().contains("social") || a.category.to_lowercase().contains("social")
        })
        .map(|a| a.name.as_str())
        .collect();

    assert_eq!(found, expected);
    assert_eq!(found, vec!["Instagram", "TikTok", "Snapchat"]);
}

#[test]
fn test_empty_filter_is_full_catalog_in_order() {
    let store = seeded_store();
    let filtered: Vec<&App> = store.filter_catalog("");
    let all: Vec<&App> = store.list_catalog().iter().collect();
    assert_eq!(filtered, all);
}

#[test]
fn test_focus_group_end_to_end() {
    let catalog = Catalog::new(vec![
        App::new("1", "Instagram", "Social Media"),
        App::new("4", "Minecraft", "Games"),
    ])
    .unwrap();
    let mut store = AppGroupStore::new(catalog);

    let group = store.create_group("Focus").unwrap();
    assert_eq!(group.name, "Focus");
    assert!(group.members.is_empty());

    let session = store.begin_edit_session(&group.id).unwrap();
    assert!(session.staged_member_ids().is_empty());

    let session = store.toggle_staged(&session, "1").unwrap();
    assert_eq!(session.staged_member_ids(), &ids(&["1"]));

    let committed = store.commit_edit_session(&session).unwrap();
    assert_eq!(committed.id, group.id);
    assert_eq!(committed.name, "Focus");
    assert_eq!(committed.members, vec!["1"]);
}
