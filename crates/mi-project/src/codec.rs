//! Mapping between the in-memory graph and its wire representation.
//!
//! Everything here is a pure function of its input. Types are never
//! normalized: a custom type string comes back out exactly as it went in.

use mi_core::MiResult;
use mi_graph::{Component, GraphSnapshot, GraphStore, Interaction};

use crate::schema::{
    DEFAULT_MODEL_NAME, ModelInfo, WireComponent, WireInteraction, WireModel, WirePayload,
};

/// Serialize the store's graph, preserving insertion order.
pub fn to_wire_payload(graph: &GraphStore) -> WirePayload {
    payload_from_snapshot(&graph.snapshot())
}

/// Serialize a detached snapshot, preserving its order.
pub fn payload_from_snapshot(snapshot: &GraphSnapshot) -> WirePayload {
    WirePayload {
        components: snapshot
            .components
            .iter()
            .map(|c| WireComponent {
                id: c.name.clone(),
                kind: c.kind.clone(),
            })
            .collect(),
        interactions: snapshot
            .interactions
            .iter()
            .map(|i| WireInteraction {
                source: i.source.clone(),
                target: i.target.clone(),
                kind: i.kind.clone(),
            })
            .collect(),
    }
}

/// Extract the persistence-relevant fields of a model record.
pub fn from_wire_model(model: &WireModel) -> ModelInfo {
    ModelInfo {
        id: model.id,
        name: model
            .name
            .clone()
            .unwrap_or_else(|| DEFAULT_MODEL_NAME.to_string()),
        description: model.description.clone().unwrap_or_default(),
    }
}

/// Map a payload back onto graph entries, entry for entry and in order.
///
/// No validation happens here; [`replay_payload`] checks the result.
pub fn graph_from_payload(payload: &WirePayload) -> GraphSnapshot {
    GraphSnapshot {
        components: payload
            .components
            .iter()
            .map(|c| Component {
                name: c.id.clone(),
                kind: c.kind.clone(),
            })
            .collect(),
        interactions: payload
            .interactions
            .iter()
            .map(|i| Interaction {
                source: i.source.clone(),
                target: i.target.clone(),
                kind: i.kind.clone(),
            })
            .collect(),
    }
}

/// Replace `store`'s graph with the payload's, replaying components then
/// interactions. On error the store is left untouched.
pub fn replay_payload(store: &mut GraphStore, payload: &WirePayload) -> MiResult<()> {
    store.replace_with(&graph_from_payload(payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mi_core::{ComponentKind, InteractionKind, MiError};

    fn sample_store() -> GraphStore {
        let mut store = GraphStore::new();
        store.add_component("S1", ComponentKind::Species).unwrap();
        store.add_component("R1", ComponentKind::Reaction).unwrap();
        store.add_component("k1", ComponentKind::Parameter).unwrap();
        store.add_component("cell", ComponentKind::from("membrane")).unwrap();
        store.add_interaction("R1", "S1", InteractionKind::Catalysis).unwrap();
        store.add_interaction("k1", "R1", InteractionKind::from("modulation")).unwrap();
        store
    }

    #[test]
    fn payload_preserves_order_and_types() {
        let payload = to_wire_payload(&sample_store());
        let ids: Vec<&str> = payload.components.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["S1", "R1", "k1", "cell"]);
        assert_eq!(payload.components[3].kind.as_str(), "membrane");
        assert_eq!(payload.interactions[1].kind.as_str(), "modulation");
    }

    #[test]
    fn payload_json_shape() {
        let payload = to_wire_payload(&sample_store());
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["components"][0]["id"], "S1");
        assert_eq!(value["components"][0]["type"], "species");
        assert_eq!(value["interactions"][0]["source"], "R1");
        assert_eq!(value["interactions"][0]["type"], "catalysis");
    }

    #[test]
    fn round_trip_restores_graph() {
        let store = sample_store();
        let payload = to_wire_payload(&store);
        assert_eq!(graph_from_payload(&payload), store.snapshot());

        let mut rebuilt = GraphStore::new();
        replay_payload(&mut rebuilt, &payload).unwrap();
        assert_eq!(rebuilt.snapshot(), store.snapshot());
    }

    #[test]
    fn replay_rejects_dangling_interaction() {
        let mut store = sample_store();
        let before = store.snapshot();
        let payload = WirePayload {
            components: vec![WireComponent {
                id: "A".into(),
                kind: ComponentKind::Species,
            }],
            interactions: vec![WireInteraction {
                source: "A".into(),
                target: "B".into(),
                kind: InteractionKind::Activation,
            }],
        };
        let err = replay_payload(&mut store, &payload).unwrap_err();
        assert!(matches!(err, MiError::NotFound { .. }));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn wire_model_defaults() {
        let model: WireModel = serde_json::from_str(r#"{"id": 3, "name": "Glycolysis"}"#).unwrap();
        let info = from_wire_model(&model);
        assert_eq!(info.id, Some(3));
        assert_eq!(info.name, "Glycolysis");
        assert_eq!(info.description, "");

        let info = from_wire_model(&WireModel::default());
        assert_eq!(info.name, DEFAULT_MODEL_NAME);
        assert!(!info.is_saved());
    }
}
