//! Summary Statistics

use ndarray::{ArrayView1, ArrayViewMut1};

/// Spread, relative to the largest magnitude, below which a signal is constant.
/// A few ulps: only rounding noise counts as no spread.
const DEGENERATE_RATIO: f64 = 8.0 * f64::EPSILON;

/// Population moments of a run of values
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Moments {
    /// Mean value
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// Largest absolute value
    pub max_abs: f64,
}

impl Moments {
    /// Compute moments of a lane; an empty lane gives all zeros
    pub fn of(values: ArrayView1<'_, f64>) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let n = values.len() as f64;
        let rough = values.sum() / n;
        // correct the summation error; a constant lane gets exactly its value as mean
        let mean = rough + values.iter().map(|&v| v - rough).sum::<f64>() / n;

        let mut m2 = 0.0;
        let mut max_abs = 0.0f64;
        for &v in values {
            let d = v - mean;
            m2 += d * d;
            max_abs = max_abs.max(v.abs());
        }

        Self {
            mean,
            std_dev: (m2 / n).sqrt(),
            max_abs,
        }
    }

    /// Convenience for plain slices
    pub fn of_slice(values: &[f64]) -> Self {
        Self::of(ArrayView1::from(values))
    }

    /// Whether the spread is zero up to a few ulps of the largest value
    pub fn is_degenerate(&self) -> bool {
        !(self.std_dev > DEGENERATE_RATIO * self.max_abs)
    }
}

/// Zero-mean, unit-std a lane in place. A constant lane becomes all zeros.
pub(crate) fn standardize(mut lane: ArrayViewMut1<'_, f64>) {
    let m = Moments::of(lane.view());
    if m.is_degenerate() {
        lane.fill(0.0);
        return;
    }
    // a large offset leaves a rounded-mean residual on the order of the spread
    lane.mapv_inplace(|v| v - m.mean);
    let centered = Moments::of(lane.view());
    lane.mapv_inplace(|v| (v - centered.mean) / centered.std_dev);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array1;

    #[test]
    fn test_mean_computation() {
        let stats = Moments::of_slice(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert!((stats.mean - 3.0).abs() < 0.001);
        assert_eq!(stats.max_abs, 5.0);
    }

    #[test]
    fn test_std_dev_computation() {
        let stats = Moments::of_slice(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((stats.std_dev - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_values() {
        let stats = Moments::of_slice(&[]);
        assert_eq!(stats.mean, 0.0);
        assert!(stats.is_degenerate());
    }

    #[test]
    fn test_constant_is_degenerate_at_any_scale() {
        assert!(Moments::of_slice(&[0.1; 53]).is_degenerate());
        assert!(Moments::of_slice(&[3.3e-11; 40]).is_degenerate());
        assert!(!Moments::of_slice(&[3.3e-11, 3.4e-11]).is_degenerate());
    }

    #[test]
    fn test_small_spread_on_large_offset_is_not_degenerate() {
        let m = Moments::of_slice(&[1e6, 1e6 + 1e-5, 1e6 + 2e-5, 1e6 + 3e-5]);
        assert!(!m.is_degenerate());
        assert!(m.std_dev > 0.0);
    }

    #[test]
    fn test_standardize_large_offset() {
        let mut lane = Array1::from(vec![1e6, 1e6 + 1e-5, 1e6 + 2e-5, 1e6 + 3e-5]);
        standardize(lane.view_mut());
        let m = Moments::of(lane.view());
        assert!(m.mean.abs() < 1e-9, "mean {}", m.mean);
        assert!((m.std_dev - 1.0).abs() < 1e-9, "std {}", m.std_dev);
    }

    #[test]
    fn test_standardize_constant_to_zeros() {
        let mut lane = Array1::from_elem(8, 7.5);
        standardize(lane.view_mut());
        assert!(lane.iter().all(|&v| v == 0.0));
    }
}
