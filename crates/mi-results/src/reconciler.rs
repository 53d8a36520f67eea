//! Run state machine that merges streamed results into a [`SeriesSet`].
//!
//! Partial updates are appended cheaply as they arrive and may be noisy; the
//! terminal snapshot delivered on completion is authoritative and replaces
//! everything received before it.

use mi_core::{MiError, MiResult};
use tracing::{debug, info, warn};

use crate::events::{FinalResult, PartialUpdate};
use crate::series::{Palette, Sample, Series, SeriesSet};

/// Lifecycle of a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    Started,
    Receiving,
    Completed,
    Stopped,
    Errored,
}

impl RunState {
    /// Accepting stream events.
    pub fn is_active(self) -> bool {
        matches!(self, RunState::Started | RunState::Receiving)
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            RunState::Completed | RunState::Stopped | RunState::Errored
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RunState::Idle => "idle",
            RunState::Started => "started",
            RunState::Receiving => "receiving",
            RunState::Completed => "completed",
            RunState::Stopped => "stopped",
            RunState::Errored => "errored",
        }
    }
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counters over the events a run has seen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub applied: usize,
    pub dropped: usize,
}

#[derive(Debug, Default)]
pub struct StreamReconciler {
    state: RunState,
    run_id: Option<String>,
    series: SeriesSet,
    palette: Palette,
    last_error: Option<String>,
    stats: IngestStats,
}

impl StreamReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn run_id(&self) -> Option<&str> {
        self.run_id.as_deref()
    }

    pub fn series(&self) -> &SeriesSet {
        &self.series
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn stats(&self) -> IngestStats {
        self.stats
    }

    /// Begin a run. Only valid from `Idle`.
    pub fn start(&mut self, run_id: impl Into<String>) -> MiResult<()> {
        let run_id = run_id.into();
        if run_id.is_empty() {
            return Err(MiError::invalid("run id must not be empty"));
        }
        if self.state != RunState::Idle {
            return Err(MiError::conflict(format!(
                "cannot start run {run_id} while the reconciler is {}",
                self.state
            )));
        }

        self.series = SeriesSet::new();
        self.palette.reset();
        self.last_error = None;
        self.stats = IngestStats::default();
        info!(run_id = %run_id, "run started");
        self.run_id = Some(run_id);
        self.state = RunState::Started;
        Ok(())
    }

    /// Append one partial update.
    ///
    /// Repeated time labels are appended, not merged. An update older than the
    /// last accepted label, or one arriving outside `Started`/`Receiving`, is
    /// dropped with [`MiError::OutOfOrderEvent`].
    pub fn ingest_partial(&mut self, update: &PartialUpdate) -> MiResult<()> {
        if !self.state.is_active() {
            return Err(self.drop_event(format!(
                "update at t={} while run is {}",
                update.time, self.state
            )));
        }
        if !update.time.is_finite() {
            self.stats.dropped += 1;
            return Err(MiError::invalid(format!(
                "update time must be finite, got {}",
                update.time
            )));
        }
        if let Some(last) = self.series.last_label()
            && update.time < last
        {
            return Err(self.drop_event(format!(
                "update at t={} precedes last label t={last}",
                update.time
            )));
        }

        if self.state == RunState::Started {
            debug!(run_id = ?self.run_id, "first update received");
            self.state = RunState::Receiving;
        }

        self.series.push_label(update.time);
        let palette = &mut self.palette;
        for (id, &value) in &update.values {
            self.series.push_sample(
                id,
                Sample {
                    time: update.time,
                    value,
                },
                || palette.next_color(),
            );
        }
        self.stats.applied += 1;
        Ok(())
    }

    /// Replace all partial data with the final snapshot.
    ///
    /// Every value list must match `time_points` in length, and time points
    /// must be finite and non-decreasing. A malformed snapshot marks the run
    /// `Errored` and keeps the partial series for inspection.
    pub fn complete(&mut self, result: &FinalResult) -> MiResult<()> {
        if !self.state.is_active() {
            return Err(self.drop_event(format!("completion while run is {}", self.state)));
        }
        if let Err(err) = validate_final(result) {
            self.state = RunState::Errored;
            self.last_error = Some(err.to_string());
            warn!(run_id = ?self.run_id, error = %err, "final snapshot rejected");
            return Err(err);
        }

        let mut next = SeriesSet::new();
        next.set_labels(result.time_points.clone());
        for (id, values) in &result.component_values {
            let color = match self.series.get(id) {
                Some(existing) => existing.color,
                None => self.palette.next_color(),
            };
            let mut series = Series::new(id.clone(), color);
            series.samples = result
                .time_points
                .iter()
                .zip(values)
                .map(|(&time, &value)| Sample { time, value })
                .collect();
            next.insert_series(series);
        }

        self.series = next;
        self.state = RunState::Completed;
        self.stats.applied += 1;
        info!(
            run_id = ?self.run_id,
            series = self.series.len(),
            points = result.time_points.len(),
            "run completed"
        );
        Ok(())
    }

    /// Mark the run completed without a final snapshot; partial series stand.
    pub fn finish_without_snapshot(&mut self) -> MiResult<()> {
        if !self.state.is_active() {
            return Err(self.drop_event(format!("completion while run is {}", self.state)));
        }
        self.state = RunState::Completed;
        self.stats.applied += 1;
        warn!(run_id = ?self.run_id, "run completed without final results; keeping partial series");
        Ok(())
    }

    /// Stop an active run; the partial series are retained.
    pub fn stop(&mut self) -> MiResult<()> {
        if !self.state.is_active() {
            return Err(MiError::conflict(format!(
                "cannot stop a run that is {}",
                self.state
            )));
        }
        self.state = RunState::Stopped;
        info!(run_id = ?self.run_id, samples = self.series.sample_count(), "run stopped");
        Ok(())
    }

    /// Mark the run errored from any state.
    pub fn fail(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!(run_id = ?self.run_id, previous = %self.state, message = %message, "run errored");
        self.state = RunState::Errored;
        self.last_error = Some(message);
    }

    /// Return to `Idle`, discarding the run and its series.
    pub fn reset(&mut self) -> MiResult<()> {
        if self.state.is_active() {
            return Err(MiError::conflict(format!(
                "cannot reset while run {} is {}",
                self.run_id.as_deref().unwrap_or("?"),
                self.state
            )));
        }
        *self = Self::default();
        Ok(())
    }

    fn drop_event(&mut self, what: String) -> MiError {
        self.stats.dropped += 1;
        warn!(run_id = ?self.run_id, "{what}; event dropped");
        MiError::out_of_order(what)
    }
}

fn validate_final(result: &FinalResult) -> MiResult<()> {
    let n = result.time_points.len();
    for (id, values) in &result.component_values {
        if values.len() != n {
            return Err(MiError::invalid(format!(
                "series {id} has {} values for {n} time points",
                values.len()
            )));
        }
    }
    for pair in result.time_points.windows(2) {
        if pair[1] < pair[0] {
            return Err(MiError::invalid(format!(
                "time points decrease from {} to {}",
                pair[0], pair[1]
            )));
        }
    }
    if let Some(t) = result.time_points.iter().find(|t| !t.is_finite()) {
        return Err(MiError::invalid(format!("time point {t} is not finite")));
    }
    Ok(())
}
