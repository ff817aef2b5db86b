//! Feature Engineering Engine
//!
//! Fit/transform operators over windowed data (one row per window,
//! channel-major columns) and a pipeline that chains them.

mod pipeline;
mod scaling;
mod spectrum;
mod statistics;
mod transform;

pub use pipeline::{FeaturePipeline, FrequencyKind, PipelineSpec, ScalerKind};
pub use scaling::{Identity, PerChannelScaler, PerSampleScaler, StandardScaler};
pub use spectrum::{MagnitudeSpectrum, SpectrumMode};
pub use statistics::Moments;
pub use transform::Transform;

use thiserror::Error;

/// Errors raised by feature transforms
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    #[error("Channel count must be at least 1")]
    ZeroChannels,

    #[error("Row width {width} does not split into {channels} equal channel segments")]
    ChannelLayout { width: usize, channels: usize },

    #[error("Channel segments are empty")]
    EmptySegment,

    #[error("{0} used before fit")]
    NotFitted(&'static str),

    #[error("Expected {expected} columns, got {actual}")]
    WidthMismatch { expected: usize, actual: usize },
}

/// Length of each channel segment in a row of `width` columns
pub(crate) fn segment_len(width: usize, channels: usize) -> Result<usize, TransformError> {
    if channels == 0 {
        return Err(TransformError::ZeroChannels);
    }
    if width % channels != 0 {
        return Err(TransformError::ChannelLayout { width, channels });
    }
    Ok(width / channels)
}
