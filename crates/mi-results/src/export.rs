//! Flat projections of a series set.

use crate::series::SeriesSet;

/// Long-format CSV: one `component,time,value` row per sample, series in
/// display order.
pub fn series_to_csv(set: &SeriesSet) -> String {
    let mut csv = String::from("component,time,value\n");
    for series in set.series() {
        for sample in &series.samples {
            csv.push_str(&format!("{},{},{}\n", series.id, sample.time, sample.value));
        }
    }
    csv
}

/// Summary of a series set's extent.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSummary {
    pub time_range: Option<(f64, f64)>,
    pub label_count: usize,
    pub series_count: usize,
    pub sample_count: usize,
}

pub fn summarize(set: &SeriesSet) -> SeriesSummary {
    let labels = set.labels();
    let time_range = match (labels.first(), labels.last()) {
        (Some(&first), Some(&last)) => Some((first, last)),
        _ => None,
    };
    SeriesSummary {
        time_range,
        label_count: labels.len(),
        series_count: set.len(),
        sample_count: set.sample_count(),
    }
}
