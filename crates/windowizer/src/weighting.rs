//! Weighting windows

use std::f64::consts::PI;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::WindowError;

/// Named window shapes (symmetric, as in `scipy.signal.windows`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowShape {
    /// Uniform weights
    #[default]
    Boxcar,
    Hann,
    Hamming,
}

impl FromStr for WindowShape {
    type Err = WindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "boxcar" | "rectangular" | "ones" => Ok(WindowShape::Boxcar),
            "hann" | "hanning" => Ok(WindowShape::Hann),
            "hamming" => Ok(WindowShape::Hamming),
            other => Err(WindowError::UnknownShape(other.to_string())),
        }
    }
}

/// Per-position weights applied to every channel of a window
#[derive(Debug, Clone, PartialEq)]
pub struct WeightingWindow {
    coefficients: Vec<f64>,
}

impl WeightingWindow {
    /// Build a window of `size` coefficients with the given shape
    pub fn new(shape: WindowShape, size: usize) -> Result<Self, WindowError> {
        if size == 0 {
            return Err(WindowError::EmptyWindow);
        }
        let coefficients = match shape {
            WindowShape::Boxcar => vec![1.0; size],
            WindowShape::Hann => Self::cosine(size, 0.5, 0.5),
            WindowShape::Hamming => Self::cosine(size, 0.54, 0.46),
        };
        Ok(Self { coefficients })
    }

    /// Build a window from a shape name such as "boxcar"
    pub fn from_name(name: &str, size: usize) -> Result<Self, WindowError> {
        Self::new(name.parse()?, size)
    }

    /// Use arbitrary coefficients
    pub fn from_coefficients(coefficients: Vec<f64>) -> Result<Self, WindowError> {
        if coefficients.is_empty() {
            return Err(WindowError::EmptyWindow);
        }
        Ok(Self { coefficients })
    }

    /// `a - b * cos(2πk / (n - 1))`
    fn cosine(size: usize, a: f64, b: f64) -> Vec<f64> {
        if size == 1 {
            return vec![1.0];
        }
        let denom = (size - 1) as f64;
        (0..size)
            .map(|k| a - b * (2.0 * PI * k as f64 / denom).cos())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }
}

/// Samples per window for a duration at a sampling rate, truncated
pub fn window_size_for(duration_s: f64, sampling_rate_hz: f64) -> usize {
    (duration_s * sampling_rate_hz).floor().max(0.0) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boxcar_is_uniform() {
        let w = WeightingWindow::from_name("boxcar", 7).unwrap();
        assert_eq!(w.coefficients(), &[1.0; 7]);
    }

    #[test]
    fn test_hann_endpoints_and_peak() {
        let w = WeightingWindow::new(WindowShape::Hann, 5).unwrap();
        let c = w.coefficients();
        assert!(c[0].abs() < 1e-12);
        assert!(c[4].abs() < 1e-12);
        assert!((c[2] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_hamming_endpoints() {
        let w = WeightingWindow::new(WindowShape::Hamming, 9).unwrap();
        assert!((w.coefficients()[0] - 0.08).abs() < 1e-12);
        assert!((w.coefficients()[8] - 0.08).abs() < 1e-12);
    }

    #[test]
    fn test_empty_and_unknown_rejected() {
        assert_eq!(WeightingWindow::new(WindowShape::Boxcar, 0), Err(WindowError::EmptyWindow));
        assert_eq!(WeightingWindow::from_coefficients(vec![]), Err(WindowError::EmptyWindow));
        assert!(matches!(
            "triangle".parse::<WindowShape>(),
            Err(WindowError::UnknownShape(_))
        ));
    }

    #[test]
    fn test_window_size_for_sensor_rates() {
        assert_eq!(window_size_for(0.1, 400.0), 40);
        assert_eq!(window_size_for(0.1, 537.6), 53);
    }
}
