//! Scaling transforms

use ndarray::{Array2, Axis};
use tracing::debug;

use crate::statistics::{standardize, Moments};
use crate::{segment_len, Transform, TransformError};

/// Pass-through stage
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Transform for Identity {
    fn name(&self) -> String {
        "none".to_string()
    }

    fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>, TransformError> {
        Ok(x.clone())
    }

    fn output_width(&self, input_width: usize) -> Result<usize, TransformError> {
        Ok(input_width)
    }
}

/// Standardizes each window by its own mean and standard deviation.
///
/// Statistics span every value of the row, across channels and positions.
/// A row with zero spread maps to all zeros.
#[derive(Debug, Clone, Copy, Default)]
pub struct PerSampleScaler;

impl Transform for PerSampleScaler {
    fn name(&self) -> String {
        "samp".to_string()
    }

    fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>, TransformError> {
        let mut out = x.to_owned();
        for row in out.rows_mut() {
            standardize(row);
        }
        Ok(out)
    }

    fn output_width(&self, input_width: usize) -> Result<usize, TransformError> {
        Ok(input_width)
    }
}

/// Standardizes each channel segment of each window independently.
///
/// Rows are split into `channels` contiguous equal segments (channel-major
/// layout). A segment with zero spread maps to zeros. Output shape equals
/// input shape.
#[derive(Debug, Clone, Copy)]
pub struct PerChannelScaler {
    channels: usize,
}

impl PerChannelScaler {
    pub fn new(channels: usize) -> Result<Self, TransformError> {
        if channels == 0 {
            return Err(TransformError::ZeroChannels);
        }
        Ok(Self { channels })
    }

    pub fn channels(&self) -> usize {
        self.channels
    }
}

impl Transform for PerChannelScaler {
    fn name(&self) -> String {
        "chan".to_string()
    }

    fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>, TransformError> {
        let seg = segment_len(x.ncols(), self.channels)?;
        if seg == 0 {
            return Err(TransformError::EmptySegment);
        }
        let mut out = x.to_owned();
        for mut row in out.rows_mut() {
            for segment in row.exact_chunks_mut(seg) {
                standardize(segment);
            }
        }
        Ok(out)
    }

    fn output_width(&self, input_width: usize) -> Result<usize, TransformError> {
        segment_len(input_width, self.channels)?;
        Ok(input_width)
    }
}

/// Column-wise standardization learned on the training rows.
///
/// Columns with zero spread in the fitted data are only centered.
#[derive(Debug, Clone, Default)]
pub struct StandardScaler {
    /// Per-column (mean, scale)
    params: Option<Vec<(f64, f64)>>,
}

impl StandardScaler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_fitted(&self) -> bool {
        self.params.is_some()
    }
}

impl Transform for StandardScaler {
    fn name(&self) -> String {
        "std".to_string()
    }

    fn fit(&mut self, x: &Array2<f64>) -> Result<(), TransformError> {
        let params = x
            .axis_iter(Axis(1))
            .map(|column| {
                let m = Moments::of(column);
                let scale = if m.is_degenerate() { 1.0 } else { m.std_dev };
                (m.mean, scale)
            })
            .collect::<Vec<_>>();
        debug!("Fitted standard scaler on {} rows x {} columns", x.nrows(), params.len());
        self.params = Some(params);
        Ok(())
    }

    fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>, TransformError> {
        let params = self
            .params
            .as_ref()
            .ok_or(TransformError::NotFitted("StandardScaler"))?;
        if params.len() != x.ncols() {
            return Err(TransformError::WidthMismatch {
                expected: params.len(),
                actual: x.ncols(),
            });
        }
        let mut out = x.to_owned();
        for (mut column, &(mean, scale)) in out.axis_iter_mut(Axis(1)).zip(params) {
            column.mapv_inplace(|v| (v - mean) / scale);
        }
        Ok(out)
    }

    fn output_width(&self, input_width: usize) -> Result<usize, TransformError> {
        match &self.params {
            Some(params) if params.len() != input_width => Err(TransformError::WidthMismatch {
                expected: params.len(),
                actual: input_width,
            }),
            _ => Ok(input_width),
        }
    }
}
