//! Rig Classification Experiments
//!
//! Turns loaded trials into per-target datasets, sweeps feature pipelines
//! over repeated shuffle splits and scores a classifier with macro-F1.

mod config;
mod dataset;
mod estimator;
mod report;
mod runner;
mod scoring;
mod split;

pub use config::{ExperimentConfig, SensorSource};
pub use dataset::{build_datasets, Dataset, Target};
pub use estimator::{Estimator, NearestCentroid};
pub use report::{write_results, ExperimentResult};
pub use runner::{cross_validate, label_and_windowize, run, run_sweep};
pub use scoring::{f1_macro, ScoreSummary};
pub use split::ShuffleSplit;

use feature_engine::TransformError;
use label_assigner::LabelError;
use rig_data::DataError;
use thiserror::Error;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use windowizer::WindowError;

/// Errors surfaced by an experiment run
#[derive(Debug, Error)]
pub enum ExperimentError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load settings: {0}")]
    Settings(#[from] ::config::ConfigError),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Label(#[from] LabelError),

    #[error(transparent)]
    Window(#[from] WindowError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error("Dataset has {rows} rows, too few for a {test_size} test split")]
    TooFewRows { rows: usize, test_size: f64 },

    #[error("Estimator error: {0}")]
    Estimator(String),

    #[error("Failed to write results to {path}: {source}")]
    Report {
        path: String,
        #[source]
        source: csv::Error,
    },
}

/// Install the global tracing subscriber; `RUST_LOG` overrides the `info` default
pub fn init_logging() -> Result<(), ExperimentError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| ExperimentError::Config(format!("Failed to set tracing subscriber: {e}")))
}
