//! Integration tests for mi-graph.

use std::collections::HashSet;

use mi_core::{ComponentKind, InteractionKind, MiError};
use mi_graph::{GraphStore, InteractionKey};
use proptest::prelude::*;

#[test]
fn build_small_pathway() {
    // Glucose -[Hexokinase]-> G6P, with ATP as a parameter.
    let mut store = GraphStore::new();
    store.add_component("Glucose", ComponentKind::Species).unwrap();
    store.add_component("G6P", ComponentKind::Species).unwrap();
    store.add_component("Hexokinase", ComponentKind::Reaction).unwrap();
    store.add_component("ATP", ComponentKind::Parameter).unwrap();
    store.add_component("Cytosol", ComponentKind::Compartment).unwrap();

    store
        .add_interaction("Hexokinase", "Glucose", InteractionKind::Catalysis)
        .unwrap();
    store
        .add_interaction("Glucose", "G6P", InteractionKind::Activation)
        .unwrap();
    store
        .add_interaction("G6P", "Hexokinase", InteractionKind::Inhibition)
        .unwrap();

    let names: Vec<String> = store
        .list_components()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, ["Glucose", "G6P", "Hexokinase", "ATP", "Cytosol"]);
    assert_eq!(store.interaction_count(), 3);
    store.validate().unwrap();
}

#[test]
fn activation_then_inhibition_leaves_one_edge() {
    let mut store = GraphStore::new();
    store.add_component("A", ComponentKind::Species).unwrap();
    store.add_component("B", ComponentKind::Species).unwrap();
    store.add_interaction("A", "B", InteractionKind::Activation).unwrap();
    store.add_interaction("A", "B", InteractionKind::Inhibition).unwrap();

    let edges: Vec<_> = store
        .list_interactions()
        .into_iter()
        .filter(|i| i.key() == InteractionKey::new("A", "B"))
        .collect();
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].kind, InteractionKind::Inhibition);
}

#[test]
fn rejected_mutations_leave_store_unchanged() {
    let mut store = GraphStore::new();
    store.add_component("A", ComponentKind::Species).unwrap();
    let before = store.snapshot();

    assert!(matches!(
        store.add_component("A", ComponentKind::Reaction),
        Err(MiError::DuplicateIdentity { .. })
    ));
    assert!(matches!(
        store.add_interaction("A", "B", InteractionKind::Activation),
        Err(MiError::NotFound { .. })
    ));
    assert!(matches!(
        store.remove_component("B"),
        Err(MiError::NotFound { .. })
    ));

    assert_eq!(store.snapshot(), before);
}

#[test]
fn custom_kinds_are_stored_verbatim() {
    let mut store = GraphStore::new();
    store
        .add_component("lacI", ComponentKind::from("gene"))
        .unwrap();
    store.add_component("lacZ", ComponentKind::Species).unwrap();
    store
        .add_interaction("lacI", "lacZ", InteractionKind::from("repression"))
        .unwrap();
    assert_eq!(store.component("lacI").unwrap().kind.as_str(), "gene");
    assert_eq!(
        store.interaction("lacI", "lacZ").unwrap().kind.as_str(),
        "repression"
    );
}

#[derive(Debug, Clone)]
enum Op {
    AddComponent(usize),
    RemoveComponent(usize),
    AddInteraction(usize, usize, u8),
    RemoveInteraction(usize, usize),
}

const NAMES: [&str; 6] = ["A", "B", "C", "D", "E", "F"];

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..NAMES.len()).prop_map(Op::AddComponent),
        (0..NAMES.len()).prop_map(Op::RemoveComponent),
        (0..NAMES.len(), 0..NAMES.len(), 0u8..3).prop_map(|(s, t, k)| Op::AddInteraction(s, t, k)),
        (0..NAMES.len(), 0..NAMES.len()).prop_map(|(s, t)| Op::RemoveInteraction(s, t)),
    ]
}

fn interaction_kind(k: u8) -> InteractionKind {
    match k {
        0 => InteractionKind::Activation,
        1 => InteractionKind::Inhibition,
        _ => InteractionKind::Catalysis,
    }
}

proptest! {
    #[test]
    fn no_interaction_ever_dangles(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let mut store = GraphStore::new();
        for op in ops {
            let _ = match op {
                Op::AddComponent(i) => store.add_component(NAMES[i], ComponentKind::Species).map(|_| ()),
                Op::RemoveComponent(i) => store.remove_component(NAMES[i]).map(|_| ()),
                Op::AddInteraction(s, t, k) => store
                    .add_interaction(NAMES[s], NAMES[t], interaction_kind(k))
                    .map(|_| ()),
                Op::RemoveInteraction(s, t) => store.remove_interaction(NAMES[s], NAMES[t]).map(|_| ()),
            };

            let names: HashSet<String> = store.list_components().into_iter().map(|c| c.name).collect();
            for edge in store.list_interactions() {
                prop_assert!(names.contains(&edge.source));
                prop_assert!(names.contains(&edge.target));
            }
            let keys: HashSet<InteractionKey> = store.list_interactions().iter().map(|i| i.key()).collect();
            prop_assert_eq!(keys.len(), store.interaction_count());
            prop_assert!(store.validate().is_ok());
        }
    }

    #[test]
    fn duplicate_add_never_changes_type(first in 0u8..4, second in 0u8..4) {
        let kinds = ["species", "reaction", "parameter", "compartment"];
        let mut store = GraphStore::new();
        store.add_component("X", ComponentKind::from(kinds[first as usize])).unwrap();
        let second_add = store.add_component("X", ComponentKind::from(kinds[second as usize]));
        prop_assert!(
            matches!(second_add, Err(MiError::DuplicateIdentity { .. })),
            "expected DuplicateIdentity"
        );
        prop_assert_eq!(store.component("X").unwrap().kind.as_str(), kinds[first as usize]);
    }
}
