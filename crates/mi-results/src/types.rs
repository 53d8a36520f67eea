//! Run metadata.

use mi_project::ModelId;
use serde::{Deserialize, Serialize};

pub type RunId = String;

/// Record of what was submitted for a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunManifest {
    pub simulation_id: RunId,
    pub model_id: ModelId,
    /// RFC 3339 wall-clock time the run was accepted.
    pub started_at: String,
    pub steps: u32,
    pub method: String,
    pub component_count: usize,
    pub interaction_count: usize,
    pub fingerprint: String,
}
