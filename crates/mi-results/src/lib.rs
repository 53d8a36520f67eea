//! mi-results: stream reconciliation and render-ready time series.

pub mod events;
pub mod export;
pub mod hash;
pub mod reconciler;
pub mod series;
pub mod types;

pub use events::{
    COMPLETE_EVENT, CompletePayload, ERROR_EVENT, FinalResult, PartialUpdate, SimulationFailure,
    StreamEvent, UPDATE_EVENT,
};
pub use export::{SeriesSummary, series_to_csv, summarize};
pub use hash::fingerprint_payload;
pub use reconciler::{IngestStats, RunState, StreamReconciler};
pub use series::{PALETTE, Palette, Sample, Series, SeriesSet};
pub use types::*;
