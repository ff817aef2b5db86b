//! Windowing configuration

use serde::{Deserialize, Serialize};

use crate::{window_size_for, WeightingWindow, WindowError, WindowShape, Windowizer};

/// Window length, overlap and shape, independent of sampling rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window length (seconds)
    pub duration_s: f64,

    /// Fraction of a window shared with the next, in [0, 1)
    pub overlap: f64,

    pub shape: WindowShape,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            duration_s: 0.1,
            overlap: 0.5,
            shape: WindowShape::Boxcar,
        }
    }
}

impl WindowConfig {
    /// Samples per window at `sampling_rate_hz`
    pub fn window_size(&self, sampling_rate_hz: f64) -> usize {
        window_size_for(self.duration_s, sampling_rate_hz)
    }

    /// Windowizer for a sensor sampled at `sampling_rate_hz`
    pub fn build(&self, sampling_rate_hz: f64) -> Result<Windowizer, WindowError> {
        let window = WeightingWindow::new(self.shape, self.window_size(sampling_rate_hz))?;
        Windowizer::new(window, self.overlap)
    }
}
