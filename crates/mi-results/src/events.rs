//! Streamed simulation events.
//!
//! The push channel delivers loosely shaped JSON under an event name. Each
//! message is validated into a tagged [`StreamEvent`] before it reaches the
//! reconciler.

use std::collections::BTreeMap;

use mi_core::{MiError, MiResult};
use serde::{Deserialize, Serialize};

pub const UPDATE_EVENT: &str = "simulation_update";
pub const COMPLETE_EVENT: &str = "simulation_complete";
pub const ERROR_EVENT: &str = "simulation_error";

/// One partial sample: a time point and a value per component.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PartialUpdate {
    pub time: f64,
    #[serde(default)]
    pub values: BTreeMap<String, f64>,
}

/// The authoritative result set delivered when a run finishes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FinalResult {
    #[serde(default)]
    pub time_points: Vec<f64>,
    #[serde(default)]
    pub component_values: BTreeMap<String, Vec<f64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CompletePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<FinalResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationFailure {
    #[serde(default)]
    pub message: String,
}

/// A validated stream event.
///
/// Serialized with the wire event name as the tag, which is also the line
/// format of recorded streams: `{"event": "simulation_update", "data": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", content = "data")]
pub enum StreamEvent {
    #[serde(rename = "simulation_update")]
    Partial(PartialUpdate),
    #[serde(rename = "simulation_complete")]
    Complete(CompletePayload),
    #[serde(rename = "simulation_error")]
    Error(SimulationFailure),
}

impl StreamEvent {
    /// Validate a raw push message.
    pub fn from_wire(name: &str, data: serde_json::Value) -> MiResult<Self> {
        let event = match name {
            UPDATE_EVENT => StreamEvent::Partial(parse(name, data)?),
            COMPLETE_EVENT => StreamEvent::Complete(parse(name, data)?),
            ERROR_EVENT => StreamEvent::Error(parse(name, data)?),
            other => return Err(MiError::invalid(format!("unknown stream event: {other}"))),
        };
        Ok(event)
    }

    /// Parse one line of a recorded stream.
    pub fn from_json_line(line: &str) -> MiResult<Self> {
        serde_json::from_str(line)
            .map_err(|e| MiError::invalid(format!("malformed stream record: {e}")))
    }

    pub fn name(&self) -> &'static str {
        match self {
            StreamEvent::Partial(_) => UPDATE_EVENT,
            StreamEvent::Complete(_) => COMPLETE_EVENT,
            StreamEvent::Error(_) => ERROR_EVENT,
        }
    }
}

fn parse<T: serde::de::DeserializeOwned>(name: &str, data: serde_json::Value) -> MiResult<T> {
    serde_json::from_value(data).map_err(|e| MiError::invalid(format!("malformed {name}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn update_parses() {
        let event = StreamEvent::from_wire(
            "simulation_update",
            json!({"time": 1.5, "values": {"X": 0.5, "Y": 2.0}}),
        )
        .unwrap();
        let StreamEvent::Partial(update) = event else {
            panic!("expected partial update");
        };
        assert_eq!(update.time, 1.5);
        assert_eq!(update.values["Y"], 2.0);
    }

    #[test]
    fn complete_without_results_is_accepted() {
        let event = StreamEvent::from_wire("simulation_complete", json!({})).unwrap();
        assert_eq!(event, StreamEvent::Complete(CompletePayload { results: None }));
    }

    #[test]
    fn complete_with_results() {
        let event = StreamEvent::from_wire(
            "simulation_complete",
            json!({"results": {"time_points": [0, 1], "component_values": {"X": [1.0, 0.5]}}}),
        )
        .unwrap();
        let StreamEvent::Complete(CompletePayload { results: Some(r) }) = event else {
            panic!("expected final results");
        };
        assert_eq!(r.time_points, vec![0.0, 1.0]);
    }

    #[test]
    fn malformed_and_unknown_are_rejected() {
        let err = StreamEvent::from_wire("simulation_update", json!({"values": {}})).unwrap_err();
        assert!(matches!(err, MiError::InvalidArgument { .. }));
        let err = StreamEvent::from_wire("connect", json!({})).unwrap_err();
        assert!(matches!(err, MiError::InvalidArgument { .. }));
    }

    #[test]
    fn recorded_line_format() {
        let line = r#"{"event":"simulation_error","data":{"message":"solver diverged"}}"#;
        let event = StreamEvent::from_json_line(line).unwrap();
        assert_eq!(event.name(), ERROR_EVENT);
        assert_eq!(serde_json::to_string(&event).unwrap(), line);
    }
}
