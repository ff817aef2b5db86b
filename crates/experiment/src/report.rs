//! Flat results table

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ExperimentError;

/// Score of one pipeline on one dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentResult {
    pub dataset: String,
    pub pipeline: String,
    pub rows: usize,
    pub splits: usize,
    pub test_size: f64,
    pub mean_f1: f64,
    pub std_f1: f64,
}

/// Write results as CSV with a header row
pub fn write_results(path: &Path, results: &[ExperimentResult]) -> Result<(), ExperimentError> {
    let report_err = |source: csv::Error| ExperimentError::Report {
        path: path.display().to_string(),
        source,
    };
    let mut writer = csv::Writer::from_path(path).map_err(report_err)?;
    for result in results {
        writer.serialize(result).map_err(report_err)?;
    }
    writer
        .flush()
        .map_err(|e| report_err(csv::Error::from(e)))?;
    Ok(())
}
