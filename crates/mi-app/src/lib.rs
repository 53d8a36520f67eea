//! Application service layer for ModelIT.
//!
//! Ties the graph store, the model codec and the stream reconciler to the
//! remote persistence and simulation services behind one session object, so
//! the CLI and any embedding UI share the same lifecycle rules.

pub mod backend;
pub mod config;
pub mod error;
pub mod http;
pub mod session;

pub use backend::{ModelApi, SimulationApi};
pub use config::{BackendConfig, SimulationOptions};
pub use error::{AppError, AppResult};
pub use http::HttpBackend;
pub use session::{SessionController, StreamOutcome};
