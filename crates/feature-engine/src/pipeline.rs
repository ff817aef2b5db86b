//! Feature Pipeline Assembly

use std::fmt;

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    Identity, MagnitudeSpectrum, PerChannelScaler, PerSampleScaler, SpectrumMode, StandardScaler,
    Transform, TransformError,
};

/// Choice of scaling stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalerKind {
    /// Column-wise, fitted on training rows
    #[serde(rename = "std")]
    Standard,
    /// Per window
    #[serde(rename = "samp")]
    PerSample,
    /// Per channel segment of each window
    #[serde(rename = "chan")]
    PerChannel,
    #[serde(rename = "none")]
    None,
}

impl ScalerKind {
    pub const ALL: [ScalerKind; 4] = [
        ScalerKind::Standard,
        ScalerKind::PerSample,
        ScalerKind::PerChannel,
        ScalerKind::None,
    ];

    fn build(&self, channels: usize) -> Result<Box<dyn Transform>, TransformError> {
        Ok(match self {
            ScalerKind::Standard => Box::new(StandardScaler::new()),
            ScalerKind::PerSample => Box::new(PerSampleScaler),
            ScalerKind::PerChannel => Box::new(PerChannelScaler::new(channels)?),
            ScalerKind::None => Box::new(Identity),
        })
    }

    fn as_str(&self) -> &'static str {
        match self {
            ScalerKind::Standard => "std",
            ScalerKind::PerSample => "samp",
            ScalerKind::PerChannel => "chan",
            ScalerKind::None => "none",
        }
    }
}

/// Choice of frequency stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrequencyKind {
    /// abs(rfft)
    #[serde(rename = "abs")]
    Magnitude,
    /// abs(rfft)^2
    #[serde(rename = "power")]
    Power,
    /// sqrt(abs(rfft))
    #[serde(rename = "sqrt")]
    SqrtMagnitude,
    #[serde(rename = "none")]
    None,
}

impl FrequencyKind {
    pub const ALL: [FrequencyKind; 4] = [
        FrequencyKind::Magnitude,
        FrequencyKind::Power,
        FrequencyKind::SqrtMagnitude,
        FrequencyKind::None,
    ];

    fn build(&self, channels: usize) -> Result<Box<dyn Transform>, TransformError> {
        let mode = match self {
            FrequencyKind::Magnitude => SpectrumMode::None,
            FrequencyKind::Power => SpectrumMode::Square,
            FrequencyKind::SqrtMagnitude => SpectrumMode::SquareRoot,
            FrequencyKind::None => return Ok(Box::new(Identity)),
        };
        Ok(Box::new(MagnitudeSpectrum::new(channels, mode)?))
    }

    fn as_str(&self) -> &'static str {
        match self {
            FrequencyKind::Magnitude => "abs",
            FrequencyKind::Power => "power",
            FrequencyKind::SqrtMagnitude => "sqrt",
            FrequencyKind::None => "none",
        }
    }
}

/// Scale, then frequency transform, then scale again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PipelineSpec {
    pub scale1: ScalerKind,
    pub frequency: FrequencyKind,
    pub scale2: ScalerKind,
}

impl PipelineSpec {
    /// Every combination of the three stages
    pub fn sweep() -> Vec<PipelineSpec> {
        let mut specs = Vec::with_capacity(64);
        for scale1 in ScalerKind::ALL {
            for frequency in FrequencyKind::ALL {
                for scale2 in ScalerKind::ALL {
                    specs.push(PipelineSpec {
                        scale1,
                        frequency,
                        scale2,
                    });
                }
            }
        }
        specs
    }

    /// Instantiate the stages for data with `channels` channel segments per row
    pub fn build(&self, channels: usize) -> Result<FeaturePipeline, TransformError> {
        Ok(FeaturePipeline::new(vec![
            self.scale1.build(channels)?,
            self.frequency.build(channels)?,
            self.scale2.build(channels)?,
        ]))
    }
}

impl Default for PipelineSpec {
    fn default() -> Self {
        Self {
            scale1: ScalerKind::None,
            frequency: FrequencyKind::None,
            scale2: ScalerKind::Standard,
        }
    }
}

impl fmt::Display for PipelineSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}",
            self.scale1.as_str(),
            self.frequency.as_str(),
            self.scale2.as_str()
        )
    }
}

/// Ordered chain of transforms, itself a transform
#[derive(Debug, Default)]
pub struct FeaturePipeline {
    stages: Vec<Box<dyn Transform>>,
}

impl FeaturePipeline {
    pub fn new(stages: Vec<Box<dyn Transform>>) -> Self {
        Self { stages }
    }

    pub fn push(&mut self, stage: Box<dyn Transform>) {
        self.stages.push(stage);
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl Transform for FeaturePipeline {
    fn name(&self) -> String {
        self.stages
            .iter()
            .map(|s| s.name())
            .collect::<Vec<_>>()
            .join("|")
    }

    /// Fit each stage on the output of the stages before it
    fn fit(&mut self, x: &Array2<f64>) -> Result<(), TransformError> {
        let mut current = x.clone();
        for stage in &mut self.stages {
            current = stage.fit_transform(&current)?;
            debug!("Fitted stage {} -> {:?}", stage.name(), current.dim());
        }
        Ok(())
    }

    fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>, TransformError> {
        let mut current = x.clone();
        for stage in &self.stages {
            current = stage.transform(&current)?;
        }
        Ok(current)
    }

    fn output_width(&self, input_width: usize) -> Result<usize, TransformError> {
        self.stages
            .iter()
            .try_fold(input_width, |width, stage| stage.output_width(width))
    }
}
