use mi_core::{ComponentKind, InteractionKind};
use mi_graph::GraphStore;
use mi_project::*;

fn glycolysis_store() -> GraphStore {
    let mut store = GraphStore::new();
    store.add_component("Glucose", ComponentKind::Species).unwrap();
    store.add_component("Hexokinase", ComponentKind::Reaction).unwrap();
    store.add_component("G6P", ComponentKind::Species).unwrap();
    store.add_component("Km", ComponentKind::Parameter).unwrap();
    store
        .add_interaction("Hexokinase", "Glucose", InteractionKind::Catalysis)
        .unwrap();
    store
        .add_interaction("Glucose", "G6P", InteractionKind::Activation)
        .unwrap();
    store
        .add_interaction("G6P", "Hexokinase", InteractionKind::Inhibition)
        .unwrap();
    store
}

#[test]
fn roundtrip_yaml_document() {
    let store = glycolysis_store();
    let info = ModelInfo {
        id: Some(12),
        name: "Glycolysis".to_string(),
        description: "Upper glycolysis".to_string(),
    };
    let doc = ModelDocument::capture(&info, &store);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("glycolysis.yaml");
    save_document(&path, &doc).unwrap();
    let loaded = load_document(&path).unwrap();

    assert_eq!(loaded, doc);
    assert_eq!(loaded.info(), info);
    assert_eq!(loaded.to_store().unwrap().snapshot(), store.snapshot());
}

#[test]
fn roundtrip_json_document() {
    let store = glycolysis_store();
    let doc = ModelDocument::capture(&ModelInfo::unsaved("Draft", ""), &store);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("draft.json");
    save_document(&path, &doc).unwrap();
    let loaded = load_document(&path).unwrap();

    assert_eq!(loaded.model_id, None);
    assert_eq!(to_wire_payload(&loaded.to_store().unwrap()), doc.graph);
}

#[test]
fn load_rejects_dangling_graph() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(
        &path,
        r#"{
            "version": 1,
            "name": "Broken",
            "graph": {
                "components": [{"id": "A", "type": "species"}],
                "interactions": [{"source": "A", "target": "B", "type": "activation"}]
            }
        }"#,
    )
    .unwrap();

    let err = load_document(&path).unwrap_err();
    assert!(matches!(err, ProjectError::Graph(_)));
}

#[test]
fn load_rejects_duplicate_components() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dupes.yaml");
    std::fs::write(
        &path,
        "version: 1\nname: Dupes\ngraph:\n  components:\n    - id: A\n    - id: A\n      type: reaction\n",
    )
    .unwrap();

    assert!(matches!(
        load_document(&path),
        Err(ProjectError::Graph(mi_core::MiError::DuplicateIdentity { .. }))
    ));
}

#[test]
fn wire_payload_parses_backend_json() {
    let json = r#"{
        "components": [
            {"id": "X", "type": "species"},
            {"id": "Y", "type": "transporter"}
        ],
        "interactions": [
            {"source": "X", "target": "Y", "type": "inhibition"}
        ]
    }"#;
    let payload: WirePayload = serde_json::from_str(json).unwrap();
    let snapshot = graph_from_payload(&payload);
    assert_eq!(snapshot.components[1].kind, ComponentKind::from("transporter"));
    assert_eq!(payload_from_snapshot(&snapshot), payload);
}

#[test]
fn model_list_parses_database_rows() {
    let json = r#"{"models": [
        {"id": 4, "name": "Krebs", "description": "TCA", "created_at": "2024-05-01"},
        {"id": 3, "name": null}
    ]}"#;
    let list: ModelList = serde_json::from_str(json).unwrap();
    let infos: Vec<ModelInfo> = list.models.iter().map(from_wire_model).collect();
    assert_eq!(infos[0].id, Some(4));
    assert_eq!(infos[0].description, "TCA");
    assert_eq!(infos[1].name, DEFAULT_MODEL_NAME);
}
