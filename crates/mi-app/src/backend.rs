//! Contracts for the remote services the session drives.
//!
//! The session only talks to these traits; [`crate::http::HttpBackend`] is the
//! production implementation and tests substitute an in-memory one.

use mi_project::{
    AddComponentRequest, CreateModelRequest, CsvExport, HealthReport, ModelId, SbmlExport,
    SimulateRequest, SimulationStarted, SimulationStatus, WireModel,
};

use crate::error::AppResult;

/// Model persistence service.
pub trait ModelApi {
    /// `POST /models`
    fn create_model(&self, request: &CreateModelRequest) -> AppResult<WireModel>;

    /// `GET /models`
    fn list_models(&self) -> AppResult<Vec<WireModel>>;

    /// `GET /models/{id}`
    fn get_model(&self, id: ModelId) -> AppResult<WireModel>;

    /// `DELETE /models/{id}`
    fn delete_model(&self, id: ModelId) -> AppResult<()>;

    /// `POST /models/{id}/components`
    fn add_component(&self, id: ModelId, request: &AddComponentRequest) -> AppResult<()>;

    /// `GET /models/{id}/export/sbml`
    fn export_sbml(&self, id: ModelId) -> AppResult<SbmlExport>;

    /// `GET /health`
    fn health(&self) -> AppResult<HealthReport>;
}

/// Simulation control service.
pub trait SimulationApi {
    /// `POST /models/{id}/simulate`
    fn simulate(&self, model: ModelId, request: &SimulateRequest) -> AppResult<SimulationStarted>;

    /// `POST /simulations/{id}/stop`
    fn stop(&self, simulation_id: &str) -> AppResult<()>;

    /// `GET /simulations/{id}/status`
    fn status(&self, simulation_id: &str) -> AppResult<SimulationStatus>;

    /// `GET /simulations/{id}/export/csv`
    fn export_csv(&self, simulation_id: &str) -> AppResult<CsvExport>;
}
