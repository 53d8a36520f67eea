//! HTTP implementation of the backend contracts.

use std::time::Duration;

use mi_project::{
    AddComponentRequest, CreateModelRequest, CsvExport, HealthReport, ModelEnvelope, ModelId,
    ModelList, SbmlExport, SimulateRequest, SimulationStarted, SimulationStatus, WireModel,
};
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::backend::{ModelApi, SimulationApi};
use crate::config::BackendConfig;
use crate::error::{AppError, AppResult};

/// Blocking JSON client for the persistence and simulation API.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    config: BackendConfig,
    client: Client,
}

impl HttpBackend {
    pub fn new(config: BackendConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(self.config.endpoint(path))
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.client.post(self.config.endpoint(path))
    }

    fn send(&self, request: RequestBuilder) -> AppResult<Response> {
        let response = request.send()?;
        let status = response.status();
        debug!(url = %response.url(), status = status.as_u16(), "backend response");
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        Err(AppError::Backend {
            status: status.as_u16(),
            message: error_message(&body),
        })
    }

    fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> AppResult<T> {
        Ok(self.send(request)?.json::<T>()?)
    }
}

/// Pull `{"error": "..."}` out of a failure body, falling back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

impl ModelApi for HttpBackend {
    #[instrument(skip(self, request), fields(name = %request.name))]
    fn create_model(&self, request: &CreateModelRequest) -> AppResult<WireModel> {
        self.send_json(self.post("models").json(request))
    }

    #[instrument(skip(self))]
    fn list_models(&self) -> AppResult<Vec<WireModel>> {
        let list: ModelList = self.send_json(self.get("models"))?;
        Ok(list.models)
    }

    #[instrument(skip(self))]
    fn get_model(&self, id: ModelId) -> AppResult<WireModel> {
        let envelope: ModelEnvelope = self.send_json(self.get(&format!("models/{id}")))?;
        Ok(envelope.model)
    }

    #[instrument(skip(self))]
    fn delete_model(&self, id: ModelId) -> AppResult<()> {
        self.send(self.client.delete(self.config.endpoint(&format!("models/{id}"))))?;
        Ok(())
    }

    #[instrument(skip(self, request), fields(component = %request.name))]
    fn add_component(&self, id: ModelId, request: &AddComponentRequest) -> AppResult<()> {
        self.send(self.post(&format!("models/{id}/components")).json(request))?;
        Ok(())
    }

    #[instrument(skip(self))]
    fn export_sbml(&self, id: ModelId) -> AppResult<SbmlExport> {
        self.send_json(self.get(&format!("models/{id}/export/sbml")))
    }

    fn health(&self) -> AppResult<HealthReport> {
        let url = format!("{}/health", self.config.service_root());
        self.send_json(self.client.get(url))
    }
}

impl SimulationApi for HttpBackend {
    #[instrument(skip(self, request), fields(steps = request.steps, method = %request.method))]
    fn simulate(&self, model: ModelId, request: &SimulateRequest) -> AppResult<SimulationStarted> {
        self.send_json(self.post(&format!("models/{model}/simulate")).json(request))
    }

    #[instrument(skip(self))]
    fn stop(&self, simulation_id: &str) -> AppResult<()> {
        self.send(self.post(&format!("simulations/{simulation_id}/stop")))?;
        Ok(())
    }

    #[instrument(skip(self))]
    fn status(&self, simulation_id: &str) -> AppResult<SimulationStatus> {
        self.send_json(self.get(&format!("simulations/{simulation_id}/status")))
    }

    #[instrument(skip(self))]
    fn export_csv(&self, simulation_id: &str) -> AppResult<CsvExport> {
        self.send_json(self.get(&format!("simulations/{simulation_id}/export/csv")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_json_error_field() {
        assert_eq!(error_message(r#"{"error": "Model not found"}"#), "Model not found");
        assert_eq!(error_message("  Bad Gateway \n"), "Bad Gateway");
    }

    #[test]
    fn unreachable_backend_is_transport_error() {
        // Port 9 (discard) on localhost is closed in test environments.
        let backend = HttpBackend::new(BackendConfig {
            api_url: "http://127.0.0.1:9/api".to_string(),
            timeout_secs: 2,
        })
        .unwrap();
        let err = backend.get_model(1).unwrap_err();
        assert!(err.is_external());
    }
}
