//! Label Types

use std::fmt;

use rig_data::{TrialMetadata, WearLevel};
use serde::{Deserialize, Serialize};

/// Material being cut at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Material {
    Concrete,
    Limestone,
    NonClassified,
}

impl Material {
    /// Integer class for estimators (Concrete=0, Limestone=1)
    pub fn code(&self) -> Option<usize> {
        match self {
            Material::Concrete => Some(0),
            Material::Limestone => Some(1),
            Material::NonClassified => None,
        }
    }

    pub fn is_classified(&self) -> bool {
        !matches!(self, Material::NonClassified)
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Material::Concrete => "Concrete",
            Material::Limestone => "Limestone",
            Material::NonClassified => "NonClassified",
        };
        f.write_str(name)
    }
}

/// Tool wear as a label, with a sentinel for unreliable ground truth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WearLabel {
    New,
    Moderate,
    Worn,
    NonClassified,
}

impl WearLabel {
    /// Integer class for estimators (New=0, Moderate=1, Worn=2)
    pub fn code(&self) -> Option<usize> {
        match self {
            WearLabel::New => Some(0),
            WearLabel::Moderate => Some(1),
            WearLabel::Worn => Some(2),
            WearLabel::NonClassified => None,
        }
    }

    pub fn is_classified(&self) -> bool {
        !matches!(self, WearLabel::NonClassified)
    }
}

impl From<WearLevel> for WearLabel {
    fn from(level: WearLevel) -> Self {
        match level {
            WearLevel::New => WearLabel::New,
            WearLevel::Moderate => WearLabel::Moderate,
            WearLevel::Worn => WearLabel::Worn,
        }
    }
}

impl fmt::Display for WearLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WearLabel::New => "New",
            WearLabel::Moderate => "Moderate",
            WearLabel::Worn => "Worn",
            WearLabel::NonClassified => "NonClassified",
        };
        f.write_str(name)
    }
}

/// Label of a single sample, carrying its own copy of the trial metadata
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLabel {
    pub material: Material,
    pub wear: WearLabel,
    pub trial: TrialMetadata,
}

impl PointLabel {
    /// Both fields NonClassified
    pub fn non_classified(trial: TrialMetadata) -> Self {
        Self {
            material: Material::NonClassified,
            wear: WearLabel::NonClassified,
            trial,
        }
    }

    /// Wear from the trial, material unknown
    pub fn wear_only(trial: TrialMetadata) -> Self {
        Self {
            material: Material::NonClassified,
            wear: trial.wear.into(),
            trial,
        }
    }

    /// Wear from the trial and the given material
    pub fn with_material(trial: TrialMetadata, material: Material) -> Self {
        Self {
            material,
            wear: trial.wear.into(),
            trial,
        }
    }
}
