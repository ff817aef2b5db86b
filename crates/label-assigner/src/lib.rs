//! Label Assigner
//!
//! Derives a per-sample (material, wear) label from the sample's time within
//! the cutting pass and the trial it belongs to. This is the only place that
//! knows which trial configurations expose the material boundary.

mod assigner;
mod config;
mod label;

pub use assigner::LabelAssigner;
pub use config::LabelConfig;
pub use label::{Material, PointLabel, WearLabel};

use thiserror::Error;

/// Errors building a label assigner
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LabelError {
    #[error("{field} must be finite and non-negative, got {value}")]
    InvalidDuration { field: &'static str, value: f64 },

    #[error("Invalid time layout: {0}")]
    InvalidLayout(String),

    #[error("Line range is empty: first {first} > last {last}")]
    EmptyLineRange { first: u32, last: u32 },
}
