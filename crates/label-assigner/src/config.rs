//! Labeling configuration

use rig_data::{Penetration, WearLevel};
use serde::{Deserialize, Serialize};

use crate::LabelError;

/// Time breakpoints and trial exclusions used to label samples
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    /// Startup transient discarded at the start of every pass (seconds)
    pub initial_buffer_s: f64,

    /// End of the concrete section, measured from pass start (seconds)
    pub concrete_time_s: f64,

    /// Transition after the concrete section where material is ambiguous (seconds)
    pub material_buffer_s: f64,

    /// Length of a cutting pass (seconds)
    pub experiment_length_s: f64,

    /// First and last line of the cut; both are rig setup/teardown passes
    pub first_line: u32,
    pub last_line: u32,

    /// The one trial configuration cut through both materials
    pub material_wear: WearLevel,
    pub material_penetration: Penetration,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            initial_buffer_s: 0.1,
            concrete_time_s: 0.4,
            material_buffer_s: 0.4,
            experiment_length_s: 4.0,
            first_line: 0,
            last_line: 17,
            material_wear: WearLevel::New,
            material_penetration: Penetration::Deep,
        }
    }
}

impl LabelConfig {
    /// Start of the limestone section (seconds)
    pub fn limestone_start_s(&self) -> f64 {
        self.concrete_time_s + self.material_buffer_s
    }

    /// Check durations are usable and the breakpoints are ordered
    pub fn validate(&self) -> Result<(), LabelError> {
        let durations = [
            ("initial_buffer_s", self.initial_buffer_s),
            ("concrete_time_s", self.concrete_time_s),
            ("material_buffer_s", self.material_buffer_s),
            ("experiment_length_s", self.experiment_length_s),
        ];
        for (field, value) in durations {
            if !value.is_finite() || value < 0.0 {
                return Err(LabelError::InvalidDuration { field, value });
            }
        }

        if self.initial_buffer_s > self.concrete_time_s {
            return Err(LabelError::InvalidLayout(format!(
                "initial buffer {}s ends after concrete section {}s",
                self.initial_buffer_s, self.concrete_time_s
            )));
        }
        if self.limestone_start_s() > self.experiment_length_s {
            return Err(LabelError::InvalidLayout(format!(
                "limestone starts at {}s, after the {}s pass ends",
                self.limestone_start_s(),
                self.experiment_length_s
            )));
        }
        if self.first_line > self.last_line {
            return Err(LabelError::EmptyLineRange {
                first: self.first_line,
                last: self.last_line,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = LabelConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.limestone_start_s() - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_negative_duration_rejected() {
        let config = LabelConfig {
            material_buffer_s: -0.1,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LabelError::InvalidDuration { field: "material_buffer_s", .. })
        ));
    }

    #[test]
    fn test_unordered_breakpoints_rejected() {
        let late_buffer = LabelConfig {
            initial_buffer_s: 0.5,
            ..Default::default()
        };
        assert!(matches!(late_buffer.validate(), Err(LabelError::InvalidLayout(_))));

        let short_pass = LabelConfig {
            experiment_length_s: 0.6,
            ..Default::default()
        };
        assert!(matches!(short_pass.validate(), Err(LabelError::InvalidLayout(_))));
    }

    #[test]
    fn test_empty_line_range_rejected() {
        let config = LabelConfig {
            first_line: 10,
            last_line: 2,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(LabelError::EmptyLineRange { first: 10, last: 2 })
        );
    }
}
