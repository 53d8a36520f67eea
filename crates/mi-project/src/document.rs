//! Model documents on disk (JSON or YAML).

use std::path::Path;

use mi_graph::GraphStore;

use crate::codec::{replay_payload, to_wire_payload};
use crate::schema::{ModelDocument, ModelInfo};
use crate::{ProjectError, ProjectResult};

pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> ProjectResult<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(DocumentFormat::Json),
            Some("yaml") | Some("yml") => Ok(DocumentFormat::Yaml),
            _ => Err(ProjectError::UnknownFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

impl ModelDocument {
    /// Capture a model and its graph.
    pub fn capture(info: &ModelInfo, graph: &GraphStore) -> Self {
        Self {
            version: LATEST_VERSION,
            name: info.name.clone(),
            description: info.description.clone(),
            model_id: info.id,
            graph: to_wire_payload(graph),
        }
    }

    pub fn info(&self) -> ModelInfo {
        ModelInfo {
            id: self.model_id,
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }

    /// Rebuild the document's graph into a fresh store.
    pub fn to_store(&self) -> ProjectResult<GraphStore> {
        let mut store = GraphStore::new();
        replay_payload(&mut store, &self.graph)?;
        Ok(store)
    }
}

/// Check version and graph integrity.
pub fn validate_document(doc: &ModelDocument) -> ProjectResult<()> {
    if doc.version == 0 || doc.version > LATEST_VERSION {
        return Err(ProjectError::UnsupportedVersion {
            version: doc.version,
        });
    }
    doc.to_store()?;
    Ok(())
}

pub fn load_document(path: &Path) -> ProjectResult<ModelDocument> {
    let format = DocumentFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)?;
    let doc: ModelDocument = match format {
        DocumentFormat::Json => serde_json::from_str(&content)?,
        DocumentFormat::Yaml => serde_yaml::from_str(&content)?,
    };
    validate_document(&doc)?;
    Ok(doc)
}

pub fn save_document(path: &Path, doc: &ModelDocument) -> ProjectResult<()> {
    validate_document(doc)?;
    let content = match DocumentFormat::from_path(path)? {
        DocumentFormat::Json => serde_json::to_string_pretty(doc)?,
        DocumentFormat::Yaml => serde_yaml::to_string(doc)?,
    };
    std::fs::write(path, content)?;
    Ok(())
}
