use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use mi_app::{
    AppResult, BackendConfig, HttpBackend, ModelApi, SessionController, SimulationApi,
    SimulationOptions,
};
use mi_core::MiError;
use mi_project::{ModelInfo, ModelId, from_wire_model, load_document, validate_document};
use mi_results::{StreamEvent, StreamReconciler, series_to_csv, summarize};
use tracing::warn;

#[derive(Parser)]
#[command(name = "mi-cli")]
#[command(about = "ModelIT CLI - biochemical model graphs and simulation runs", long_about = None)]
struct Cli {
    /// Backend API base URL (overrides MODELIT_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a model document
    Validate {
        /// Path to the model document (.json, .yaml or .yml)
        doc_path: PathBuf,
    },
    /// Print the wire payload of a model document
    Payload {
        /// Path to the model document
        doc_path: PathBuf,
    },
    /// Replay a recorded event stream (JSON lines) and summarize the result
    Replay {
        /// Path to the recorded stream
        events_path: PathBuf,
        /// Write the reconciled series as CSV
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Submit a model document for simulation
    Simulate {
        /// Path to the model document
        doc_path: PathBuf,
        /// Number of simulation steps
        #[arg(long, default_value_t = 100)]
        steps: u32,
        /// Simulation method
        #[arg(long, default_value = "java-advanced")]
        method: String,
    },
    /// Show the status of a simulation
    Status {
        /// Simulation ID
        simulation_id: String,
    },
    /// Export a saved model as SBML
    ExportSbml {
        /// Model ID
        model_id: ModelId,
        /// Output file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export simulation results as CSV
    ExportCsv {
        /// Simulation ID
        simulation_id: String,
        /// Output file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List models stored on the backend
    Models,
    /// Delete a stored model
    DeleteModel {
        /// Model ID
        model_id: ModelId,
    },
    /// Check backend health
    Health,
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let api_url = cli.api_url.as_deref();

    match cli.command {
        Commands::Validate { doc_path } => cmd_validate(&doc_path),
        Commands::Payload { doc_path } => cmd_payload(&doc_path),
        Commands::Replay {
            events_path,
            output,
        } => cmd_replay(&events_path, output.as_deref()),
        Commands::Simulate {
            doc_path,
            steps,
            method,
        } => cmd_simulate(&doc_path, SimulationOptions { steps, method }, api_url),
        Commands::Status { simulation_id } => cmd_status(&simulation_id, api_url),
        Commands::ExportSbml { model_id, output } => {
            cmd_export_sbml(model_id, output.as_deref(), api_url)
        }
        Commands::ExportCsv {
            simulation_id,
            output,
        } => cmd_export_csv(&simulation_id, output.as_deref(), api_url),
        Commands::Models => cmd_models(api_url),
        Commands::DeleteModel { model_id } => cmd_delete_model(model_id, api_url),
        Commands::Health => cmd_health(api_url),
    }
}

fn backend(api_url: Option<&str>) -> AppResult<HttpBackend> {
    let mut config = BackendConfig::from_env()?;
    if let Some(url) = api_url {
        config = config.with_api_url(url);
    }
    HttpBackend::new(config)
}

fn write_or_print(output: Option<&Path>, content: &str, what: &str) -> AppResult<()> {
    if let Some(path) = output {
        std::fs::write(path, content)?;
        println!("✓ Exported {} to {}", what, path.display());
    } else {
        print!("{}", content);
    }
    Ok(())
}

fn cmd_validate(doc_path: &Path) -> AppResult<()> {
    println!("Validating model: {}", doc_path.display());
    let doc = load_document(doc_path)?;
    validate_document(&doc)?;
    println!(
        "✓ Model is valid: {} ({} components, {} interactions)",
        doc.name,
        doc.graph.components.len(),
        doc.graph.interactions.len()
    );
    Ok(())
}

fn cmd_payload(doc_path: &Path) -> AppResult<()> {
    let doc = load_document(doc_path)?;
    let json = serde_json::to_string_pretty(&doc.graph).map_err(std::io::Error::from)?;
    println!("{}", json);
    Ok(())
}

/// Feed a recorded stream into `reconciler`, returning how many events were
/// skipped. Malformed and out-of-order events are skipped with a warning.
fn replay_stream(text: &str, reconciler: &mut StreamReconciler) -> AppResult<usize> {
    let mut skipped = 0;
    for (lineno, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let result = StreamEvent::from_json_line(line).and_then(|event| match event {
            StreamEvent::Partial(update) => reconciler.ingest_partial(&update),
            StreamEvent::Complete(payload) => match payload.results {
                Some(results) => reconciler.complete(&results),
                None => reconciler.finish_without_snapshot(),
            },
            StreamEvent::Error(failure) => {
                reconciler.fail(failure.message);
                Ok(())
            }
        });
        match result {
            Ok(()) => {}
            Err(err @ (MiError::OutOfOrderEvent { .. } | MiError::InvalidArgument { .. })) => {
                warn!(line = lineno + 1, error = %err, "event skipped");
                skipped += 1;
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(skipped)
}

fn cmd_replay(events_path: &Path, output: Option<&Path>) -> AppResult<()> {
    let text = std::fs::read_to_string(events_path)?;
    let mut reconciler = StreamReconciler::new();
    reconciler.start(events_path.display().to_string())?;
    let skipped = replay_stream(&text, &mut reconciler)?;

    let summary = summarize(reconciler.series());
    let stats = reconciler.stats();
    println!("Run state: {}", reconciler.state());
    if let Some(message) = reconciler.last_error() {
        println!("  Error: {}", message);
    }
    println!("  Events: {} applied, {} skipped", stats.applied, skipped);
    if let Some((start, end)) = summary.time_range {
        println!("  Time range: {:.3} - {:.3}", start, end);
    }
    println!(
        "  Series: {} ({} samples)",
        summary.series_count, summary.sample_count
    );
    for series in reconciler.series().series() {
        println!("    {} {}", series.id, series.color);
    }

    if let Some(path) = output {
        write_or_print(Some(path), &series_to_csv(reconciler.series()), "series")?;
    }
    Ok(())
}

fn cmd_simulate(doc_path: &Path, options: SimulationOptions, api_url: Option<&str>) -> AppResult<()> {
    let doc = load_document(doc_path)?;
    let mut session = SessionController::new(backend(api_url)?);

    match doc.model_id {
        Some(_) => session.set_active_model(doc.info(), &doc.graph)?,
        None => {
            session.set_active_model(ModelInfo::unsaved(&doc.name, &doc.description), &doc.graph)?;
            let info = session.save_model(doc.name.clone(), doc.description.clone())?;
            if let Some(id) = info.id {
                println!("✓ Saved model {} as id {}", info.name, id);
            }
        }
    }

    println!(
        "Submitting {} ({} steps, {})",
        doc.name, options.steps, options.method
    );
    let simulation_id = session.run_simulation(&options)?;
    println!("✓ Simulation started: {}", simulation_id);
    if let Some(manifest) = session.run_manifest() {
        println!("  Started at: {}", manifest.started_at);
        println!("  Fingerprint: {}", manifest.fingerprint);
    }
    Ok(())
}

fn cmd_status(simulation_id: &str, api_url: Option<&str>) -> AppResult<()> {
    let status = backend(api_url)?.status(simulation_id)?;
    println!("Simulation {}: {}", simulation_id, status.status);
    for (key, value) in &status.details {
        println!("  {}: {}", key, value);
    }
    Ok(())
}

fn cmd_export_sbml(model_id: ModelId, output: Option<&Path>, api_url: Option<&str>) -> AppResult<()> {
    let export = backend(api_url)?.export_sbml(model_id)?;
    write_or_print(output, &export.content, &export.filename)
}

fn cmd_export_csv(simulation_id: &str, output: Option<&Path>, api_url: Option<&str>) -> AppResult<()> {
    let export = backend(api_url)?.export_csv(simulation_id)?;
    write_or_print(output, &export.csv, "simulation results")
}

fn cmd_models(api_url: Option<&str>) -> AppResult<()> {
    let models = backend(api_url)?.list_models()?;
    if models.is_empty() {
        println!("No models stored");
    } else {
        println!("Models:");
        for model in models.iter().map(from_wire_model) {
            let id = model.id.map(|id| id.to_string()).unwrap_or_else(|| "?".to_string());
            if model.description.is_empty() {
                println!("  {} - {}", id, model.name);
            } else {
                println!("  {} - {} ({})", id, model.name, model.description);
            }
        }
    }
    Ok(())
}

fn cmd_delete_model(model_id: ModelId, api_url: Option<&str>) -> AppResult<()> {
    backend(api_url)?.delete_model(model_id)?;
    println!("✓ Deleted model {}", model_id);
    Ok(())
}

fn cmd_health(api_url: Option<&str>) -> AppResult<()> {
    let report = backend(api_url)?.health()?;
    if report.is_healthy() {
        println!("✓ Backend is healthy");
    } else {
        println!("✗ Backend reports: {}", report.status);
    }
    for (service, state) in &report.services {
        println!("  {}: {}", service, state);
    }
    Ok(())
}
