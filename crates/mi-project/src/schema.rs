//! Wire and document schema definitions.
//!
//! Field names follow what the backend emits (snake_case); `type` is renamed
//! onto `kind` fields.

use std::collections::BTreeMap;

use mi_core::{ComponentKind, InteractionKind};
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier the persistence API assigns to a saved model.
pub type ModelId = u64;

pub const DEFAULT_MODEL_NAME: &str = "Untitled Model";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WireComponent {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: ComponentKind,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WireInteraction {
    pub source: String,
    pub target: String,
    #[serde(rename = "type", default)]
    pub kind: InteractionKind,
}

/// Graph topology as submitted to the simulator (`model_data`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct WirePayload {
    #[serde(default)]
    pub components: Vec<WireComponent>,
    #[serde(default)]
    pub interactions: Vec<WireInteraction>,
}

/// A model record as returned by the persistence API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct WireModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ModelId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_data: Option<WirePayload>,
}

/// `GET /models/{id}` response body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelEnvelope {
    pub model: WireModel,
}

/// `GET /models` response body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ModelList {
    #[serde(default)]
    pub models: Vec<WireModel>,
}

/// The persistence-relevant fields of a model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelInfo {
    pub id: Option<ModelId>,
    pub name: String,
    pub description: String,
}

impl ModelInfo {
    pub fn unsaved(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
        }
    }

    pub fn is_saved(&self) -> bool {
        self.id.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateModelRequest {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddComponentRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ComponentKind,
}

/// `POST /models/{id}/simulate` request body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SimulateRequest {
    pub steps: u32,
    pub method: String,
    pub model_data: WirePayload,
}

/// `POST /models/{id}/simulate` response body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SimulationStarted {
    #[serde(deserialize_with = "deserialize_opaque_id")]
    pub simulation_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SbmlExport {
    pub content: String,
    pub filename: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CsvExport {
    pub csv: String,
}

/// `GET /simulations/{id}/status` response body; fields beyond `status` are kept verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SimulationStatus {
    #[serde(default)]
    pub status: String,
    #[serde(flatten)]
    pub details: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct HealthReport {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub services: BTreeMap<String, serde_json::Value>,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// A model saved to disk: metadata plus its graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelDocument {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<ModelId>,
    #[serde(default)]
    pub graph: WirePayload,
}

/// Simulation ids are opaque: accept either a JSON string or a number.
pub fn deserialize_opaque_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OpaqueId {
        Text(String),
        Int(i64),
        Uint(u64),
    }

    Ok(match OpaqueId::deserialize(deserializer)? {
        OpaqueId::Text(s) => s,
        OpaqueId::Int(n) => n.to_string(),
        OpaqueId::Uint(n) => n.to_string(),
    })
}
