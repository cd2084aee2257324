//! End-to-end provisioning chains: bulk add with ranges, name lists and
//! copy-from templates, and the two-step delete confirmation.

use fleet_core::{
    create_named, create_range, DeletePlan, FilterSessionStore, NameRange, SearchCriteria,
    SessionId,
};
use fleet_registry::NodeRegistry;
use fleet_test_utils::{node_name, seeded_registry};
use pretty_assertions::assert_eq;

#[test]
fn add_agents_by_span() {
    let registry = seeded_registry();
    let before = registry.len();

    let range = NameRange::new("slave", 6, 8, 2).unwrap();
    let report = create_range(&registry, &range, None).unwrap();

    assert!(report.is_complete());
    assert!(registry.get(&node_name("slave06")).is_some());
    assert!(registry.get(&node_name("slave07")).is_some());
    assert!(registry.get(&node_name("slave08")).is_some());
    assert_eq!(registry.len(), before + 3);
}

#[test]
fn add_agents_by_unique_names() {
    let registry = seeded_registry();
    let before = registry.len();

    let report = create_named(
        &registry,
        &[node_name("slave10"), node_name("slave11"), node_name("slave12")],
        None,
    );

    assert_eq!(report.created.len(), 3);
    assert!(registry.get(&node_name("slave10")).is_some());
    assert!(registry.get(&node_name("slave11")).is_some());
    assert!(registry.get(&node_name("slave12")).is_some());
    assert_eq!(registry.len(), before + 3);
}

#[test]
fn redundant_names_create_one_agent() {
    let registry = seeded_registry();
    let before = registry.len();

    let report = create_named(&registry, &[node_name("slave10"), node_name("slave10")], None);

    assert_eq!(report.created, vec![node_name("slave10")]);
    assert_eq!(registry.len(), before + 1);
}

#[test]
fn copy_from_existing_agent() {
    let registry = seeded_registry();
    let before = registry.len();
    let template = registry.get(&node_name("slave2")).unwrap();

    create_named(
        &registry,
        &[node_name("slave13"), node_name("slave14"), node_name("slave15")],
        Some(&template),
    );

    assert_eq!(registry.get(&node_name("slave13")).unwrap().num_executors, 2);
    assert_eq!(
        registry.get(&node_name("slave14")).unwrap().description,
        "This is the description on dumbSlave1"
    );
    assert_eq!(
        registry.get(&node_name("slave15")).unwrap().remote_fs,
        "HOME/slave2"
    );
    assert_eq!(registry.len(), before + 3);
}

#[test]
fn delete_all_confirmed_empties_registry() {
    let registry = seeded_registry();
    let store = FilterSessionStore::new();
    let session = SessionId::from("admin");

    let targets = store.search(&session, SearchCriteria::any(), &registry.list_all());
    let report = DeletePlan::new(targets).confirm(&registry);

    assert_eq!(report.deleted.len(), 4);
    assert!(registry.is_empty());
}

#[test]
fn delete_all_cancelled_leaves_registry_unchanged() {
    let registry = seeded_registry();
    let store = FilterSessionStore::new();
    let session = SessionId::from("admin");
    let before = registry.len();

    let targets = store.search(&session, SearchCriteria::any(), &registry.list_all());
    DeletePlan::new(targets).cancel();

    assert_eq!(registry.len(), before);
}

#[test]
fn delete_filtered_subset_spares_the_rest() {
    let registry = seeded_registry();
    let store = FilterSessionStore::new();
    let session = SessionId::from("admin");

    let targets = store.search(
        &session,
        SearchCriteria::any().with_label("LABEL1"),
        &registry.list_all(),
    );
    let report = DeletePlan::new(targets).confirm(&registry);

    assert_eq!(report.deleted, vec![node_name("slave2")]);
    assert_eq!(registry.len(), 3);
    assert!(registry.get(&node_name("slave3")).is_some());
}
