//! Render-ready time series.

use std::collections::HashMap;

use serde::Serialize;

/// Fixed display palette; series colors cycle through it.
pub const PALETTE: [&str; 10] = [
    "#0d6efd", "#198754", "#dc3545", "#0dcaf0", "#ffc107", "#6c757d", "#d63384", "#6610f2",
    "#fd7e14", "#20c997",
];

/// Cycling cursor into [`PALETTE`].
#[derive(Debug, Clone, Default)]
pub struct Palette {
    cursor: usize,
}

impl Palette {
    pub fn next_color(&mut self) -> &'static str {
        let color = PALETTE[self.cursor];
        self.cursor = (self.cursor + 1) % PALETTE.len();
        color
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub time: f64,
    pub value: f64,
}

/// Samples for one component, in arrival order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub id: String,
    pub color: &'static str,
    pub samples: Vec<Sample>,
}

impl Series {
    pub fn new(id: impl Into<String>, color: &'static str) -> Self {
        Self {
            id: id.into(),
            color,
            samples: Vec::new(),
        }
    }

    pub fn last_time(&self) -> Option<f64> {
        self.samples.last().map(|s| s.time)
    }

    pub fn points(&self) -> Vec<(f64, f64)> {
        self.samples.iter().map(|s| (s.time, s.value)).collect()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// All series of a run plus the shared time labels.
///
/// Labels are appended once per accepted partial event (duplicates included)
/// and replaced by the final time points when the run completes.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SeriesSet {
    labels: Vec<f64>,
    series: Vec<Series>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl SeriesSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn labels(&self) -> &[f64] {
        &self.labels
    }

    pub fn last_label(&self) -> Option<f64> {
        self.labels.last().copied()
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn get(&self, id: &str) -> Option<&Series> {
        self.index.get(id).map(|&i| &self.series[i])
    }

    pub fn ids(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Total number of samples across all series.
    pub fn sample_count(&self) -> usize {
        self.series.iter().map(Series::len).sum()
    }

    pub(crate) fn push_label(&mut self, time: f64) {
        self.labels.push(time);
    }

    pub(crate) fn set_labels(&mut self, labels: Vec<f64>) {
        self.labels = labels;
    }

    /// Append a sample, creating the series with `color` on first sight.
    pub(crate) fn push_sample(
        &mut self,
        id: &str,
        sample: Sample,
        color: impl FnOnce() -> &'static str,
    ) {
        let idx = match self.index.get(id) {
            Some(&idx) => idx,
            None => {
                self.index.insert(id.to_string(), self.series.len());
                self.series.push(Series::new(id, color()));
                self.series.len() - 1
            }
        };
        self.series[idx].samples.push(sample);
    }

    pub(crate) fn insert_series(&mut self, series: Series) {
        match self.index.get(&series.id) {
            Some(&idx) => self.series[idx] = series,
            None => {
                self.index.insert(series.id.clone(), self.series.len());
                self.series.push(series);
            }
        }
    }
}
