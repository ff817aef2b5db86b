//! Rock-Cutting Rig Data
//!
//! Trial metadata, per-sample records and loaders for the capacitive and
//! strain-gauge recordings produced by the cutting rig.

pub mod conversions;
mod error;
pub mod loader;
mod trial;

pub use conversions::CapacitanceCalibration;
pub use error::DataError;
pub use loader::{load_capacitive_trials, load_strain_gauge_trials, StrainGaugeMode};
pub use trial::{Penetration, Sample, SensorType, TrialMetadata, TrialRecording, WearLevel};
