//! Trial Metadata and Samples

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::DataError;

/// Tool wear level of a cutting pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WearLevel {
    New,
    Moderate,
    Worn,
}

impl WearLevel {
    /// All wear levels in encoding order
    pub const ALL: [WearLevel; 3] = [WearLevel::New, WearLevel::Moderate, WearLevel::Worn];
}

impl FromStr for WearLevel {
    type Err = DataError;

    /// Accepts the rig's spreadsheet spellings ("New", "Mod.", "Worn") as well
    /// as "Moderate", ignoring ASCII case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "new" => Ok(WearLevel::New),
            "mod." | "mod" | "moderate" => Ok(WearLevel::Moderate),
            "worn" => Ok(WearLevel::Worn),
            _ => Err(DataError::UnknownWear(trimmed.to_string())),
        }
    }
}

impl fmt::Display for WearLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WearLevel::New => "New",
            WearLevel::Moderate => "Moderate",
            WearLevel::Worn => "Worn",
        };
        f.write_str(name)
    }
}

/// Cutter penetration depth per pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Penetration {
    /// 0.1 in.
    Shallow,
    /// 0.2 in.
    Medium,
    /// 0.3 in.
    Deep,
}

impl Penetration {
    /// Depth in inches
    pub fn inches(&self) -> f64 {
        match self {
            Penetration::Shallow => 0.1,
            Penetration::Medium => 0.2,
            Penetration::Deep => 0.3,
        }
    }
}

impl FromStr for Penetration {
    type Err = DataError;

    /// Accepts "0.3 in.", "0.3in" or a bare "0.3".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let depth = trimmed
            .trim_end_matches('.')
            .trim_end_matches("in")
            .trim();
        match depth {
            "0.1" => Ok(Penetration::Shallow),
            "0.2" => Ok(Penetration::Medium),
            "0.3" => Ok(Penetration::Deep),
            _ => Err(DataError::UnknownPenetration(trimmed.to_string())),
        }
    }
}

impl fmt::Display for Penetration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} in.", self.inches())
    }
}

/// Which instrument produced a recording
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensorType {
    /// Capacitive probe, channels A-D
    Capacitive,
    /// LCM strain gauges, v1-v4
    StrainGauge,
}

impl SensorType {
    /// Short name used in dataset identifiers
    pub fn short_name(&self) -> &'static str {
        match self {
            SensorType::Capacitive => "cap",
            SensorType::StrainGauge => "sg",
        }
    }
}

/// Identifies a single recorded cutting pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrialMetadata {
    pub sensor: SensorType,
    pub wear: WearLevel,
    pub penetration: Penetration,
    pub line: u32,
}

impl fmt::Display for TrialMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}/{}/line {}",
            self.sensor.short_name(),
            self.wear,
            self.penetration,
            self.line
        )
    }
}

/// One time-indexed observation across all channels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Seconds relative to trial start
    pub timestamp: f64,
    /// Channel values in fixed order
    pub values: Vec<f64>,
}

impl Sample {
    pub fn new(timestamp: f64, values: Vec<f64>) -> Self {
        Self { timestamp, values }
    }

    pub fn channels(&self) -> usize {
        self.values.len()
    }
}

/// All samples of one trial, tagged with the trial's metadata
#[derive(Debug, Clone, PartialEq)]
pub struct TrialRecording {
    pub trial: TrialMetadata,
    pub samples: Vec<Sample>,
}

impl TrialRecording {
    /// Build a recording, checking that every sample has the same channel count
    pub fn new(trial: TrialMetadata, samples: Vec<Sample>) -> Result<Self, DataError> {
        if let Some(first) = samples.first() {
            let expected = first.channels();
            if let Some((index, bad)) = samples
                .iter()
                .enumerate()
                .find(|(_, s)| s.channels() != expected)
            {
                return Err(DataError::ChannelMismatch {
                    trial: trial.to_string(),
                    index,
                    expected,
                    actual: bad.channels(),
                });
            }
        }
        Ok(Self { trial, samples })
    }

    /// Sample timestamps in recording order
    pub fn timestamps(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.timestamp).collect()
    }

    /// Channel count shared by all samples (0 for an empty recording)
    pub fn channels(&self) -> usize {
        self.samples.first().map(Sample::channels).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
