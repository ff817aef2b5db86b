//! Windowizer
//!
//! Slices labeled multi-channel sample sequences into fixed-length weighted
//! windows. Each window becomes one row of a rectangular array, flattened
//! channel-major, with a single label reduced from its point labels.

mod config;
mod label;
mod weighting;
mod windowizer;

pub use config::WindowConfig;
pub use label::WindowLabel;
pub use weighting::{window_size_for, WeightingWindow, WindowShape};
pub use windowizer::{WindowedData, Windowizer};

use thiserror::Error;

/// Windowing configuration and precondition errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WindowError {
    #[error("Overlap must be in [0, 1), got {0}")]
    InvalidOverlap(f64),

    #[error("Overlap {overlap} gives a zero step for window size {window_size}")]
    ZeroStep { window_size: usize, overlap: f64 },

    #[error("Weighting window has no coefficients")]
    EmptyWindow,

    #[error("Unknown window shape: '{0}'")]
    UnknownShape(String),

    #[error("Got {samples} samples but {labels} labels")]
    LengthMismatch { samples: usize, labels: usize },

    #[error("Sample {index} has {actual} channels, expected {expected}")]
    ChannelMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Cannot combine windows of width {expected} and {actual}")]
    WidthMismatch { expected: usize, actual: usize },
}
