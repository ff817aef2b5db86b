//! Per-sample label assignment

use rig_data::TrialMetadata;

use crate::{LabelConfig, LabelError, Material, PointLabel};

/// Assigns (material, wear) labels to samples from their time in the pass
#[derive(Debug, Clone)]
pub struct LabelAssigner {
    config: LabelConfig,
}

impl LabelAssigner {
    /// Create an assigner, rejecting an inconsistent configuration
    pub fn new(config: LabelConfig) -> Result<Self, LabelError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &LabelConfig {
        &self.config
    }

    /// One label per timestamp (seconds from pass start), in order
    pub fn assign(&self, timestamps: &[f64], trial: &TrialMetadata) -> Vec<PointLabel> {
        timestamps.iter().map(|&t| self.label_at(t, trial)).collect()
    }

    /// Label for a single sample at time `t`
    pub fn label_at(&self, t: f64, trial: &TrialMetadata) -> PointLabel {
        let trial = *trial;
        let cfg = &self.config;

        if self.is_edge_line(trial.line) {
            return PointLabel::non_classified(trial);
        }
        // written positively so a NaN timestamp lands outside the pass
        if !(t >= cfg.initial_buffer_s && t < cfg.experiment_length_s) {
            return PointLabel::non_classified(trial);
        }
        if !self.exposes_material(&trial) {
            return PointLabel::wear_only(trial);
        }

        // Wear stays valid across the concrete/limestone transition; only material is unknown there.
        if t < cfg.concrete_time_s {
            PointLabel::with_material(trial, Material::Concrete)
        } else if t < cfg.limestone_start_s() {
            PointLabel::wear_only(trial)
        } else {
            PointLabel::with_material(trial, Material::Limestone)
        }
    }

    /// Whether `line` is the first or last pass of the cut
    pub fn is_edge_line(&self, line: u32) -> bool {
        line == self.config.first_line || line == self.config.last_line
    }

    /// Whether this trial was cut through both concrete and limestone
    pub fn exposes_material(&self, trial: &TrialMetadata) -> bool {
        trial.wear == self.config.material_wear
            && trial.penetration == self.config.material_penetration
    }
}

impl Default for LabelAssigner {
    fn default() -> Self {
        Self {
            config: LabelConfig::default(),
        }
    }
}
