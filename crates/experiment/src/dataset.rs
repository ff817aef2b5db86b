//! Per-target dataset assembly

use std::fmt;

use ndarray::{Array2, Axis};
use rig_data::SensorType;
use serde::{Deserialize, Serialize};
use windowizer::{WindowLabel, WindowedData};

/// Field of the window label an estimator is trained to predict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    Material,
    Wear,
}

impl Target {
    pub const ALL: [Target; 2] = [Target::Material, Target::Wear];

    /// Encoded class of a window, or `None` when the field is NonClassified
    pub fn encode(&self, label: &WindowLabel) -> Option<usize> {
        match self {
            Target::Material => label.material.code(),
            Target::Wear => label.wear.code(),
        }
    }

    /// Number of possible classes
    pub fn class_count(&self) -> usize {
        match self {
            Target::Material => 2,
            Target::Wear => 3,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Target::Material => "material",
            Target::Wear => "wear",
        })
    }
}

/// Classified windows of one sensor for one target
#[derive(Debug, Clone)]
pub struct Dataset {
    pub sensor: SensorType,
    pub target: Target,
    /// One row per window
    pub x: Array2<f64>,
    /// Encoded class per row
    pub y: Vec<usize>,
    /// Channel segments per row
    pub channels: usize,
}

impl Dataset {
    /// Keep the windows whose target field is classified, encoding their labels
    pub fn from_windows(sensor: SensorType, target: Target, windows: &WindowedData) -> Self {
        let (rows, y): (Vec<usize>, Vec<usize>) = windows
            .labels
            .iter()
            .enumerate()
            .filter_map(|(i, label)| target.encode(label).map(|code| (i, code)))
            .unzip();
        Self {
            sensor,
            target,
            x: windows.data.select(Axis(0), &rows),
            y,
            channels: windows.channels,
        }
    }

    /// Identifier such as "cap wear"
    pub fn name(&self) -> String {
        format!("{} {}", self.sensor.short_name(), self.target)
    }

    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    /// Rows per class, indexed by class code
    pub fn class_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.target.class_count()];
        for &class in &self.y {
            counts[class] += 1;
        }
        counts
    }
}

/// Material and wear datasets from one sensor's windows
pub fn build_datasets(sensor: SensorType, windows: &WindowedData) -> Vec<Dataset> {
    Target::ALL
        .iter()
        .map(|&target| Dataset::from_windows(sensor, target, windows))
        .collect()
}
