//! FFT-based Frequency Features

use ndarray::Array2;
use rustfft::{num_complex::Complex, FftPlanner};
use serde::{Deserialize, Serialize};

use crate::{segment_len, Transform, TransformError};

/// Elementwise post-processing of spectrum magnitudes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpectrumMode {
    /// |X|
    #[default]
    None,
    /// |X|^2
    Square,
    /// sqrt(|X|)
    SquareRoot,
}

impl SpectrumMode {
    fn apply(&self, magnitude: f64) -> f64 {
        match self {
            SpectrumMode::None => magnitude,
            SpectrumMode::Square => magnitude * magnitude,
            SpectrumMode::SquareRoot => magnitude.sqrt(),
        }
    }
}

/// Magnitude of the real-input spectrum of each channel segment.
///
/// Each row is split into `channels` contiguous segments of length `L`; every
/// segment becomes `L / 2 + 1` one-sided spectrum magnitudes (DC through
/// Nyquist), and the per-channel spectra are concatenated in channel order.
#[derive(Debug, Clone, Copy)]
pub struct MagnitudeSpectrum {
    channels: usize,
    mode: SpectrumMode,
}

impl MagnitudeSpectrum {
    pub fn new(channels: usize, mode: SpectrumMode) -> Result<Self, TransformError> {
        if channels == 0 {
            return Err(TransformError::ZeroChannels);
        }
        Ok(Self { channels, mode })
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn mode(&self) -> SpectrumMode {
        self.mode
    }

    /// Spectrum bins produced per channel segment of length `segment`
    pub fn bins(segment: usize) -> usize {
        segment / 2 + 1
    }
}

impl Transform for MagnitudeSpectrum {
    fn name(&self) -> String {
        match self.mode {
            SpectrumMode::None => "abs",
            SpectrumMode::Square => "power",
            SpectrumMode::SquareRoot => "sqrt",
        }
        .to_string()
    }

    fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>, TransformError> {
        let seg = segment_len(x.ncols(), self.channels)?;
        if seg == 0 {
            return Err(TransformError::EmptySegment);
        }
        let bins = Self::bins(seg);
        let mut out = Array2::zeros((x.nrows(), self.channels * bins));

        let mut planner = FftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(seg);
        let mut buffer = vec![Complex::new(0.0, 0.0); seg];
        let mut scratch = vec![Complex::new(0.0, 0.0); fft.get_inplace_scratch_len()];

        for (row, mut out_row) in x.rows().into_iter().zip(out.rows_mut()) {
            for ch in 0..self.channels {
                let segment = row.slice(ndarray::s![ch * seg..(ch + 1) * seg]);
                for (slot, &v) in buffer.iter_mut().zip(segment.iter()) {
                    *slot = Complex::new(v, 0.0);
                }
                fft.process_with_scratch(&mut buffer, &mut scratch);
                for (k, c) in buffer.iter().take(bins).enumerate() {
                    out_row[ch * bins + k] = self.mode.apply(c.norm());
                }
            }
        }
        Ok(out)
    }

    fn output_width(&self, input_width: usize) -> Result<usize, TransformError> {
        let seg = segment_len(input_width, self.channels)?;
        if seg == 0 {
            return Err(TransformError::EmptySegment);
        }
        Ok(self.channels * Self::bins(seg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};
    use proptest::prelude::*;
    use std::f64::consts::PI;

    #[test]
    fn test_sine_peak_bin() {
        // 5 cycles across 64 samples lands exactly on bin 5
        let n = 64;
        let x = Array2::from_shape_fn((1, n), |(_, i)| (2.0 * PI * 5.0 * i as f64 / n as f64).sin());
        let spectrum = MagnitudeSpectrum::new(1, SpectrumMode::None).unwrap();
        let out = spectrum.transform(&x).unwrap();
        assert_eq!(out.ncols(), 33);
        let (peak, _) = out
            .row(0)
            .iter()
            .enumerate()
            .fold((0, f64::MIN), |best, (i, &v)| if v > best.1 { (i, v) } else { best });
        assert_eq!(peak, 5);
        assert!((out[[0, 5]] - n as f64 / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_dc_and_modes() {
        let x = array![[2.0, 2.0, 2.0, 2.0]];
        let abs = MagnitudeSpectrum::new(1, SpectrumMode::None).unwrap().transform(&x).unwrap();
        assert_eq!(abs.ncols(), 3);
        assert!((abs[[0, 0]] - 8.0).abs() < 1e-12);
        assert!(abs[[0, 1]].abs() < 1e-12);

        let power = MagnitudeSpectrum::new(1, SpectrumMode::Square).unwrap().transform(&x).unwrap();
        assert!((power[[0, 0]] - 64.0).abs() < 1e-9);

        let root = MagnitudeSpectrum::new(1, SpectrumMode::SquareRoot).unwrap().transform(&x).unwrap();
        assert!((root[[0, 0]] - 8f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_channels_transformed_independently() {
        // channel 0 constant, channel 1 alternating (Nyquist only)
        let x = array![[1.0, 1.0, 1.0, 1.0, 1.0, -1.0, 1.0, -1.0]];
        let out = MagnitudeSpectrum::new(2, SpectrumMode::None).unwrap().transform(&x).unwrap();
        assert_eq!(out.ncols(), 6);
        let row = out.row(0).to_vec();
        assert!((row[0] - 4.0).abs() < 1e-12);
        assert!(row[1].abs() < 1e-12 && row[2].abs() < 1e-12);
        assert!(row[3].abs() < 1e-12);
        assert!((row[5] - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_layout_errors() {
        assert_eq!(
            MagnitudeSpectrum::new(0, SpectrumMode::None).unwrap_err(),
            TransformError::ZeroChannels
        );
        let spectrum = MagnitudeSpectrum::new(3, SpectrumMode::None).unwrap();
        assert!(matches!(
            spectrum.transform(&Array2::zeros((1, 10))),
            Err(TransformError::ChannelLayout { width: 10, channels: 3 })
        ));
        assert_eq!(spectrum.output_width(0).unwrap_err(), TransformError::EmptySegment);
    }

    #[test]
    fn test_names() {
        assert_eq!(MagnitudeSpectrum::new(1, SpectrumMode::None).unwrap().name(), "abs");
        assert_eq!(MagnitudeSpectrum::new(1, SpectrumMode::Square).unwrap().name(), "power");
        assert_eq!(MagnitudeSpectrum::new(1, SpectrumMode::SquareRoot).unwrap().name(), "sqrt");
    }

    proptest! {
        #[test]
        fn prop_output_dimensions(rows in 0usize..6, channels in 1usize..5, seg in 1usize..80) {
            let cols = channels * seg;
            let x = Array2::from_shape_fn((rows, cols), |(r, c)| ((r * 31 + c * 7) % 13) as f64);
            let spectrum = MagnitudeSpectrum::new(channels, SpectrumMode::None).unwrap();
            let out = spectrum.transform(&x).unwrap();
            prop_assert_eq!(out.nrows(), rows);
            prop_assert_eq!(out.ncols(), channels * (seg / 2 + 1));
            prop_assert_eq!(spectrum.output_width(cols).unwrap(), out.ncols());
            // per channel: within [L/2, L]
            prop_assert!(out.ncols() * 2 >= cols);
            prop_assert!(out.ncols() <= cols);
        }
    }
}
