//! Sliding-window segmentation

use label_assigner::PointLabel;
use ndarray::{s, Array2};
use rig_data::Sample;
use tracing::debug;

use crate::{WeightingWindow, WindowError, WindowLabel};

/// Windows produced from one or more labeled sequences
#[derive(Debug, Clone, PartialEq)]
pub struct WindowedData {
    /// One row per window, `window_size * channels` columns, channel-major
    pub data: Array2<f64>,
    /// One label per row
    pub labels: Vec<WindowLabel>,
    pub channels: usize,
    pub window_size: usize,
}

impl WindowedData {
    fn empty(channels: usize, window_size: usize) -> Self {
        Self {
            data: Array2::zeros((0, channels * window_size)),
            labels: Vec::new(),
            channels,
            window_size,
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Stack windows from several sequences; parts with no windows are skipped
    pub fn concat(parts: Vec<WindowedData>) -> Result<Self, WindowError> {
        let (channels, window_size, width) = match parts
            .iter()
            .find(|p| !p.is_empty())
            .or_else(|| parts.first())
        {
            Some(reference) => (reference.channels, reference.window_size, reference.data.ncols()),
            None => return Ok(Self::empty(0, 0)),
        };

        let mut blocks = Vec::with_capacity(parts.len());
        let mut labels = Vec::new();
        for part in parts.into_iter().filter(|p| !p.is_empty()) {
            if part.data.ncols() != width {
                return Err(WindowError::WidthMismatch {
                    expected: width,
                    actual: part.data.ncols(),
                });
            }
            labels.extend(part.labels);
            blocks.push(part.data);
        }
        if blocks.is_empty() {
            return Ok(Self::empty(channels, window_size));
        }

        let mut data = Array2::zeros((labels.len(), width));
        let mut offset = 0;
        for block in &blocks {
            data.slice_mut(s![offset..offset + block.nrows(), ..]).assign(block);
            offset += block.nrows();
        }

        Ok(Self {
            data,
            labels,
            channels,
            window_size,
        })
    }
}

/// Cuts labeled sample sequences into weighted, possibly overlapping windows
#[derive(Debug, Clone)]
pub struct Windowizer {
    window: WeightingWindow,
    overlap: f64,
    step: usize,
}

impl Windowizer {
    /// Create a windowizer; `overlap` is the fraction of a window shared with the next
    pub fn new(window: WeightingWindow, overlap: f64) -> Result<Self, WindowError> {
        if !overlap.is_finite() || !(0.0..1.0).contains(&overlap) {
            return Err(WindowError::InvalidOverlap(overlap));
        }
        if window.is_empty() {
            return Err(WindowError::EmptyWindow);
        }
        let window_size = window.len();
        let step = (window_size as f64 * (1.0 - overlap)).round() as usize;
        if step == 0 {
            return Err(WindowError::ZeroStep {
                window_size,
                overlap,
            });
        }
        debug!(
            "Creating windowizer: window_size={}, overlap={}, step={}",
            window_size, overlap, step
        );
        Ok(Self {
            window,
            overlap,
            step,
        })
    }

    pub fn window_size(&self) -> usize {
        self.window.len()
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn overlap(&self) -> f64 {
        self.overlap
    }

    /// Number of windows produced from `n` samples
    pub fn window_count(&self, n: usize) -> usize {
        let size = self.window_size();
        if n < size {
            0
        } else {
            (n - size) / self.step + 1
        }
    }

    /// Cut one labeled sequence into windows.
    ///
    /// Windows start at multiples of the step while a full window fits; a
    /// trailing remainder shorter than the window is dropped.
    pub fn windowize(
        &self,
        samples: &[Sample],
        labels: &[PointLabel],
    ) -> Result<WindowedData, WindowError> {
        if samples.len() != labels.len() {
            return Err(WindowError::LengthMismatch {
                samples: samples.len(),
                labels: labels.len(),
            });
        }
        let channels = samples.first().map(Sample::channels).unwrap_or(0);
        if let Some((index, bad)) = samples
            .iter()
            .enumerate()
            .find(|(_, s)| s.channels() != channels)
        {
            return Err(WindowError::ChannelMismatch {
                index,
                expected: channels,
                actual: bad.channels(),
            });
        }

        let size = self.window_size();
        let count = self.window_count(samples.len());
        let weights = self.window.coefficients();
        let mut data = Array2::zeros((count, size * channels));
        let mut window_labels = Vec::with_capacity(count);

        for (row_idx, mut row) in data.rows_mut().into_iter().enumerate() {
            let start = row_idx * self.step;
            let span = &samples[start..start + size];
            for (pos, (sample, &weight)) in span.iter().zip(weights).enumerate() {
                for (ch, &value) in sample.values.iter().enumerate() {
                    row[ch * size + pos] = value * weight;
                }
            }
            window_labels.push(WindowLabel::reduce(&labels[start..start + size]));
        }

        debug!("Windowized {} samples into {} windows", samples.len(), count);

        Ok(WindowedData {
            data,
            labels: window_labels,
            channels,
            window_size: size,
        })
    }

    /// Windowize several sequences independently and stack the results, so no
    /// window spans two recordings
    pub fn windowize_trials<'a, I>(&self, trials: I) -> Result<WindowedData, WindowError>
    where
        I: IntoIterator<Item = (&'a [Sample], &'a [PointLabel])>,
    {
        let parts = trials
            .into_iter()
            .map(|(samples, labels)| self.windowize(samples, labels))
            .collect::<Result<Vec<_>, _>>()?;
        WindowedData::concat(parts)
    }
}
