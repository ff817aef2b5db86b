//! Experiment configuration

use std::path::{Path, PathBuf};

use feature_engine::PipelineSpec;
use label_assigner::LabelConfig;
use rig_data::{CapacitanceCalibration, StrainGaugeMode};
use serde::{Deserialize, Serialize};
use windowizer::WindowConfig;

use crate::ExperimentError;

/// Prefix of environment variables that override file settings
const ENV_PREFIX: &str = "RIG";

/// Where a sensor's data files and manifest live
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorSource {
    /// Directory the manifest's file names are resolved against
    pub data_dir: PathBuf,
    pub manifest: PathBuf,
}

/// Experiment configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub window: WindowConfig,

    /// Samples per second per channel
    pub capacitive_rate_hz: f64,
    pub strain_gauge_rate_hz: f64,

    /// Number of random train/test splits
    pub splits: usize,

    /// Fraction of rows held out per split
    pub test_size: f64,

    pub random_seed: u64,

    pub labels: LabelConfig,

    /// Data sources; a missing source skips that sensor
    pub capacitive: Option<SensorSource>,
    pub strain_gauge: Option<SensorSource>,

    pub strain_gauge_mode: StrainGaugeMode,

    /// Convert capacitive counts to capacitance before windowing
    pub capacitance: Option<CapacitanceCalibration>,

    /// Pipelines to evaluate; the full sweep when absent
    pub pipelines: Option<Vec<PipelineSpec>>,

    /// Results table
    pub output_path: PathBuf,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            capacitive_rate_hz: 400.0,
            strain_gauge_rate_hz: 537.6,
            splits: 3,
            test_size: 0.25,
            random_seed: 711_711,
            labels: LabelConfig::default(),
            capacitive: Some(SensorSource {
                data_dir: PathBuf::from("data/capacitive"),
                manifest: PathBuf::from("data/capacitive/classifications.csv"),
            }),
            strain_gauge: Some(SensorSource {
                data_dir: PathBuf::from("data/strain_gauge"),
                manifest: PathBuf::from("data/strain_gauge/manifest.csv"),
            }),
            strain_gauge_mode: StrainGaugeMode::Voltages,
            capacitance: None,
            pipelines: None,
            output_path: PathBuf::from("results.csv"),
        }
    }
}

impl ExperimentConfig {
    /// Load from an optional TOML/YAML/JSON file layered under `RIG_*` environment variables.
    ///
    /// Nested keys use a double underscore, e.g. `RIG_LABELS__CONCRETE_TIME_S=0.5`.
    pub fn load(path: Option<&Path>) -> Result<Self, ExperimentError> {
        let mut builder = ::config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path));
        }
        let settings = builder
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: ExperimentConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that would otherwise fail deep inside a run
    pub fn validate(&self) -> Result<(), ExperimentError> {
        if !(self.window.duration_s > 0.0) {
            return Err(ExperimentError::Config(format!(
                "window.duration_s must be positive, got {}",
                self.window.duration_s
            )));
        }
        for (name, rate) in [
            ("capacitive_rate_hz", self.capacitive_rate_hz),
            ("strain_gauge_rate_hz", self.strain_gauge_rate_hz),
        ] {
            if !(rate > 0.0) || !rate.is_finite() {
                return Err(ExperimentError::Config(format!(
                    "{name} must be positive, got {rate}"
                )));
            }
        }
        if self.splits == 0 {
            return Err(ExperimentError::Config("splits must be at least 1".to_string()));
        }
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(ExperimentError::Config(format!(
                "test_size must be in (0, 1), got {}",
                self.test_size
            )));
        }
        self.labels.validate()?;
        Ok(())
    }

    /// Pipelines to evaluate
    pub fn pipeline_specs(&self) -> Vec<PipelineSpec> {
        self.pipelines.clone().unwrap_or_else(PipelineSpec::sweep)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feature_engine::{FrequencyKind, ScalerKind};
    use windowizer::WindowShape;

    #[test]
    fn test_defaults_are_valid() {
        let config = ExperimentConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.pipeline_specs().len(), 64);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let bad_split = ExperimentConfig {
            test_size: 1.0,
            ..Default::default()
        };
        assert!(matches!(bad_split.validate(), Err(ExperimentError::Config(_))));

        let bad_rate = ExperimentConfig {
            strain_gauge_rate_hz: 0.0,
            ..Default::default()
        };
        assert!(bad_rate.validate().is_err());

        let bad_labels = ExperimentConfig {
            labels: LabelConfig {
                concrete_time_s: -1.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(bad_labels.validate(), Err(ExperimentError::Label(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = std::env::temp_dir().join(format!("rig-experiment-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("experiment.toml");
        std::fs::write(
            &path,
            r#"
splits = 5
strain_gauge_mode = "drag_force"

[window]
overlap = 0.25
shape = "hann"

[labels]
concrete_time_s = 0.5

[[pipelines]]
scale1 = "samp"
frequency = "abs"
scale2 = "chan"
"#,
        )
        .unwrap();

        let config = ExperimentConfig::load(Some(&path)).unwrap();
        assert_eq!(config.window.overlap, 0.25);
        assert_eq!(config.window.shape, WindowShape::Hann);
        assert_eq!(config.window.duration_s, 0.1);
        assert_eq!(config.splits, 5);
        assert_eq!(config.strain_gauge_mode, StrainGaugeMode::DragForce);
        assert_eq!(config.labels.concrete_time_s, 0.5);
        // untouched fields keep their defaults
        assert_eq!(config.labels.initial_buffer_s, 0.1);
        assert_eq!(config.capacitive_rate_hz, 400.0);
        assert_eq!(
            config.pipeline_specs(),
            vec![PipelineSpec {
                scale1: ScalerKind::PerSample,
                frequency: FrequencyKind::Magnitude,
                scale2: ScalerKind::PerChannel,
            }]
        );

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = std::env::temp_dir().join(format!("rig-experiment-env-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("experiment.toml");
        std::fs::write(&path, "random_seed = 1\n").unwrap();

        // keys not asserted by other tests in this process
        std::env::set_var("RIG_RANDOM_SEED", "42");
        std::env::set_var("RIG_LABELS__MATERIAL_BUFFER_S", "0.3");
        let loaded = ExperimentConfig::load(Some(&path));
        std::env::remove_var("RIG_RANDOM_SEED");
        std::env::remove_var("RIG_LABELS__MATERIAL_BUFFER_S");
        std::fs::remove_dir_all(&dir).unwrap();

        let config = loaded.unwrap();
        assert_eq!(config.random_seed, 42);
        assert_eq!(config.labels.material_buffer_s, 0.3);
        assert_eq!(config.labels.concrete_time_s, 0.4);
    }
}
