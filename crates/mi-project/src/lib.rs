//! mi-project: wire format, model codec and on-disk model documents.

pub mod codec;
pub mod document;
pub mod schema;

pub use codec::{
    from_wire_model, graph_from_payload, payload_from_snapshot, replay_payload, to_wire_payload,
};
pub use document::{DocumentFormat, LATEST_VERSION, load_document, save_document, validate_document};
pub use schema::*;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Graph error: {0}")]
    Graph(#[from] mi_core::MiError),

    #[error("Unsupported document version: {version}")]
    UnsupportedVersion { version: u32 },

    #[error("Unknown document format: {}", path.display())]
    UnknownFormat { path: std::path::PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
