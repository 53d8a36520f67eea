//! Session orchestration: one active model, one graph, one simulation run.
//!
//! Every entry point takes `&mut self` and runs to completion; stream events
//! are handed in one at a time through [`SessionController::on_stream_event`].
//! Backend calls happen before any local mutation, so a failed call leaves the
//! graph, the active model and the series exactly as they were. The one
//! exception is a model created on the fly by
//! [`SessionController::add_component`]: it exists remotely once created and
//! stays active even if registering the component then fails.
//!
//! Switching models discards the previous model's finished run.

use chrono::Utc;
use mi_core::{ComponentKind, InteractionKind, MiError};
use mi_graph::{Component, GraphSnapshot, GraphStore, Interaction};
use mi_project::{
    AddComponentRequest, CreateModelRequest, DEFAULT_MODEL_NAME, HealthReport, ModelDocument,
    ModelId, ModelInfo, SbmlExport, SimulateRequest, SimulationStatus, WireModel, WirePayload,
    from_wire_model, payload_from_snapshot, replay_payload, to_wire_payload,
};
use mi_results::{
    RunManifest, RunState, SeriesSet, StreamEvent, StreamReconciler, fingerprint_payload,
    series_to_csv,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::backend::{ModelApi, SimulationApi};
use crate::config::SimulationOptions;
use crate::error::{AppError, AppResult};

/// What happened to one stream event.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamOutcome {
    /// Applied; carries the run state afterwards.
    Applied(RunState),
    /// Arrived outside an active run, or out of order. Nothing changed.
    Dropped { reason: String },
    /// Malformed. A rejected final snapshot also leaves the run `Errored`.
    Rejected(MiError),
}

impl StreamOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, StreamOutcome::Applied(_))
    }
}

pub struct SessionController<B> {
    id: Uuid,
    backend: B,
    graph: GraphStore,
    active_model: Option<ModelInfo>,
    reconciler: StreamReconciler,
    manifest: Option<RunManifest>,
}

impl<B: ModelApi + SimulationApi> SessionController<B> {
    pub fn new(backend: B) -> Self {
        let id = Uuid::new_v4();
        info!(session = %id, "session opened");
        Self {
            id,
            backend,
            graph: GraphStore::new(),
            active_model: None,
            reconciler: StreamReconciler::new(),
            manifest: None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    // ------------------------------------------------------------------
    // Model lifecycle
    // ------------------------------------------------------------------

    /// Start over with an empty, unsaved model.
    pub fn new_model(&mut self) -> AppResult<()> {
        self.ensure_no_run("start a new model")?;
        self.discard_run()?;
        self.graph.clear();
        self.active_model = None;
        info!(session = %self.id, "new model");
        Ok(())
    }

    /// Make `info` the active model with `graph` as its topology.
    ///
    /// The graph is replayed into a staging store first; if any entry is
    /// rejected the session is unchanged.
    pub fn set_active_model(&mut self, info: ModelInfo, graph: &WirePayload) -> AppResult<()> {
        self.ensure_no_run("switch models")?;
        replay_payload(&mut self.graph, graph)?;
        self.discard_run()?;
        info!(
            model_id = ?info.id,
            name = %info.name,
            components = self.graph.component_count(),
            interactions = self.graph.interaction_count(),
            "active model set"
        );
        self.active_model = Some(info);
        Ok(())
    }

    /// Create the model on the persistence service and make it active.
    ///
    /// The current graph is kept as the new model's topology.
    pub fn save_model(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> AppResult<ModelInfo> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(MiError::invalid("model name must not be empty").into());
        }
        let request = CreateModelRequest {
            name,
            description: description.into(),
        };
        let (_, info) = self.create_remote_model(&request)?;
        self.active_model = Some(info.clone());
        Ok(info)
    }

    /// Fetch a model and make it active.
    ///
    /// The graph is replaced only when the record carries `model_data`;
    /// otherwise the current graph is kept.
    pub fn load_model(&mut self, id: ModelId) -> AppResult<ModelInfo> {
        self.ensure_no_run("load a model")?;
        let record = self.backend.get_model(id)?;
        let mut info = from_wire_model(&record);
        if info.id.is_none() {
            info.id = Some(id);
        }
        match &record.model_data {
            Some(payload) => replay_payload(&mut self.graph, payload)?,
            None => warn!(model_id = id, "model record has no graph; keeping current graph"),
        }
        self.discard_run()?;
        info!(model_id = id, name = %info.name, "model loaded");
        self.active_model = Some(info.clone());
        Ok(info)
    }

    /// Models stored on the persistence service.
    pub fn list_models(&self) -> AppResult<Vec<ModelInfo>> {
        Ok(self.backend.list_models()?.iter().map(from_wire_model).collect())
    }

    /// Delete a stored model. Deleting the active model clears it and its
    /// finished run; the graph stays in place.
    pub fn delete_model(&mut self, id: ModelId) -> AppResult<()> {
        let is_active = self.active_model.as_ref().and_then(|m| m.id) == Some(id);
        if is_active {
            self.ensure_no_run("delete the active model")?;
        }
        self.backend.delete_model(id)?;
        if is_active {
            self.discard_run()?;
            self.active_model = None;
        }
        info!(model_id = id, active = is_active, "model deleted");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Graph edits
    // ------------------------------------------------------------------

    /// Add a component locally and register it with the persistence service.
    ///
    /// When no saved model is active one is created first, named after the
    /// current unsaved model or `"Untitled Model"`.
    pub fn add_component(
        &mut self,
        name: impl Into<String>,
        kind: ComponentKind,
    ) -> AppResult<Component> {
        let name = name.into();
        self.graph.check_new_component(&name)?;

        let model_id = match self.active_model.as_ref().and_then(|m| m.id) {
            Some(id) => id,
            None => {
                let request = match &self.active_model {
                    Some(unsaved) => CreateModelRequest {
                        name: unsaved.name.clone(),
                        description: unsaved.description.clone(),
                    },
                    None => CreateModelRequest {
                        name: DEFAULT_MODEL_NAME.to_string(),
                        description: String::new(),
                    },
                };
                let (id, info) = self.create_remote_model(&request)?;
                self.active_model = Some(info);
                id
            }
        };

        let request = AddComponentRequest {
            name: name.clone(),
            kind: kind.clone(),
        };
        self.backend.add_component(model_id, &request)?;
        Ok(self.graph.add_component(name, kind)?)
    }

    pub fn remove_component(&mut self, name: &str) -> AppResult<Component> {
        Ok(self.graph.remove_component(name)?)
    }

    pub fn add_interaction(
        &mut self,
        source: impl Into<String>,
        target: impl Into<String>,
        kind: InteractionKind,
    ) -> AppResult<Interaction> {
        Ok(self.graph.add_interaction(source, target, kind)?)
    }

    pub fn remove_interaction(&mut self, source: &str, target: &str) -> AppResult<Interaction> {
        Ok(self.graph.remove_interaction(source, target)?)
    }

    pub fn clear_graph(&mut self) {
        self.graph.clear();
    }

    // ------------------------------------------------------------------
    // Simulation runs
    // ------------------------------------------------------------------

    /// Submit `graph` for simulation against the active saved model.
    ///
    /// A finished run is discarded once the simulator accepts the new one;
    /// a run still in flight is a [`MiError::Conflict`].
    pub fn start_simulation(
        &mut self,
        graph: &GraphSnapshot,
        options: &SimulationOptions,
    ) -> AppResult<String> {
        self.ensure_no_run("start a simulation")?;
        options.validate()?;
        let model_id = self.saved_model_id()?;

        let request = SimulateRequest {
            steps: options.steps,
            method: options.method.clone(),
            model_data: payload_from_snapshot(graph),
        };
        let started = self.backend.simulate(model_id, &request)?;
        if started.simulation_id.is_empty() {
            return Err(AppError::UnexpectedResponse(
                "simulator returned an empty simulation id".into(),
            ));
        }

        if self.reconciler.state().is_terminal() {
            self.reconciler.reset()?;
        }
        self.reconciler.start(started.simulation_id.clone())?;
        self.manifest = Some(RunManifest {
            simulation_id: started.simulation_id.clone(),
            model_id,
            started_at: Utc::now().to_rfc3339(),
            steps: options.steps,
            method: options.method.clone(),
            component_count: graph.components.len(),
            interaction_count: graph.interactions.len(),
            fingerprint: fingerprint_payload(&request.model_data, options.steps, &options.method),
        });
        info!(
            session = %self.id,
            model_id,
            simulation_id = %started.simulation_id,
            steps = options.steps,
            method = %options.method,
            "simulation submitted"
        );
        Ok(started.simulation_id)
    }

    /// Simulate the current graph.
    pub fn run_simulation(&mut self, options: &SimulationOptions) -> AppResult<String> {
        let snapshot = self.graph.snapshot();
        self.start_simulation(&snapshot, options)
    }

    /// Stop the run in flight. The simulator is notified best effort: a
    /// failed notification is logged and the run is stopped locally anyway.
    pub fn stop_active_simulation(&mut self) -> AppResult<()> {
        let Some(run_id) = self.active_run_id() else {
            return Err(MiError::not_found("simulation", "no simulation in flight").into());
        };
        if let Err(err) = self.backend.stop(&run_id) {
            warn!(simulation_id = %run_id, error = %err, "stop request failed; stopping locally");
        }
        self.reconciler.stop()?;
        Ok(())
    }

    /// Dispatch one validated stream event to the reconciler.
    pub fn on_stream_event(&mut self, event: StreamEvent) -> StreamOutcome {
        let result = match event {
            StreamEvent::Partial(update) => self.reconciler.ingest_partial(&update),
            StreamEvent::Complete(payload) => match payload.results {
                Some(results) => self.reconciler.complete(&results),
                None => self.reconciler.finish_without_snapshot(),
            },
            StreamEvent::Error(failure) => {
                if self.reconciler.state().is_active() {
                    self.reconciler.fail(failure.message);
                    Ok(())
                } else {
                    Err(MiError::out_of_order(format!(
                        "simulation error while run is {}: {}",
                        self.reconciler.state(),
                        failure.message
                    )))
                }
            }
        };

        match result {
            Ok(()) => StreamOutcome::Applied(self.reconciler.state()),
            Err(MiError::OutOfOrderEvent { what }) => StreamOutcome::Dropped { reason: what },
            Err(err) => StreamOutcome::Rejected(err),
        }
    }

    /// Validate a raw push message and dispatch it.
    pub fn on_stream_message(&mut self, name: &str, data: serde_json::Value) -> StreamOutcome {
        match StreamEvent::from_wire(name, data) {
            Ok(event) => self.on_stream_event(event),
            Err(err) => {
                warn!(event = name, error = %err, "stream message rejected");
                StreamOutcome::Rejected(err)
            }
        }
    }

    // ------------------------------------------------------------------
    // Remote queries and exports
    // ------------------------------------------------------------------

    /// Status of the current (or most recent) run.
    pub fn simulation_status(&self) -> AppResult<SimulationStatus> {
        self.backend.status(self.run_id()?)
    }

    pub fn export_sbml(&self) -> AppResult<SbmlExport> {
        self.backend.export_sbml(self.saved_model_id()?)
    }

    /// Server-side CSV of the current (or most recent) run.
    pub fn export_simulation_csv(&self) -> AppResult<String> {
        Ok(self.backend.export_csv(self.run_id()?)?.csv)
    }

    pub fn health(&self) -> AppResult<HealthReport> {
        self.backend.health()
    }

    // ------------------------------------------------------------------
    // Read-only views
    // ------------------------------------------------------------------

    pub fn session_id(&self) -> Uuid {
        self.id
    }

    pub fn active_model(&self) -> Option<&ModelInfo> {
        self.active_model.as_ref()
    }

    pub fn graph(&self) -> &GraphStore {
        &self.graph
    }

    pub fn series(&self) -> &SeriesSet {
        self.reconciler.series()
    }

    pub fn run_state(&self) -> RunState {
        self.reconciler.state()
    }

    /// Id of the run in flight, if any.
    pub fn active_simulation(&self) -> Option<&str> {
        if self.reconciler.state().is_active() {
            self.reconciler.run_id()
        } else {
            None
        }
    }

    pub fn run_manifest(&self) -> Option<&RunManifest> {
        self.manifest.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.reconciler.last_error()
    }

    pub fn wire_payload(&self) -> WirePayload {
        to_wire_payload(&self.graph)
    }

    pub fn series_csv(&self) -> String {
        series_to_csv(self.reconciler.series())
    }

    /// The active model and graph as an on-disk document.
    pub fn document(&self) -> ModelDocument {
        let info = self
            .active_model
            .clone()
            .unwrap_or_else(|| ModelInfo::unsaved(DEFAULT_MODEL_NAME, ""));
        ModelDocument::capture(&info, &self.graph)
    }

    fn ensure_no_run(&self, action: &str) -> AppResult<()> {
        let state = self.reconciler.state();
        if state.is_active() {
            return Err(MiError::conflict(format!(
                "cannot {action} while simulation {} is {state}",
                self.reconciler.run_id().unwrap_or("?")
            ))
            .into());
        }
        Ok(())
    }

    fn saved_model_id(&self) -> AppResult<ModelId> {
        self.active_model
            .as_ref()
            .and_then(|m| m.id)
            .ok_or_else(|| MiError::not_found("model", "no saved model is active").into())
    }

    fn run_id(&self) -> AppResult<&str> {
        self.reconciler
            .run_id()
            .ok_or_else(|| MiError::not_found("simulation", "no simulation has been started").into())
    }

    fn active_run_id(&self) -> Option<String> {
        self.active_simulation().map(str::to_string)
    }

    /// Drop a finished run and its manifest.
    fn discard_run(&mut self) -> AppResult<()> {
        self.reconciler.reset()?;
        self.manifest = None;
        Ok(())
    }

    fn create_remote_model(&self, request: &CreateModelRequest) -> AppResult<(ModelId, ModelInfo)> {
        let record: WireModel = self.backend.create_model(request)?;
        let mut info = from_wire_model(&record);
        if record.name.is_none() {
            info.name = request.name.clone();
        }
        if record.description.is_none() {
            info.description = request.description.clone();
        }
        let Some(id) = info.id else {
            return Err(AppError::UnexpectedResponse(format!(
                "created model {:?} has no id",
                request.name
            )));
        };
        info!(model_id = id, name = %info.name, "model saved");
        Ok((id, info))
    }
}
