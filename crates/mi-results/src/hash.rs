//! Content-based fingerprint of a submitted graph.

use mi_project::WirePayload;
use sha2::{Digest, Sha256};

/// SHA-256 over the payload's JSON form plus the run settings.
pub fn fingerprint_payload(payload: &WirePayload, steps: u32, method: &str) -> String {
    let mut hasher = Sha256::new();

    let payload_json = serde_json::to_string(payload).unwrap_or_default();
    hasher.update(payload_json.as_bytes());
    hasher.update(steps.to_le_bytes());
    hasher.update(method.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}
