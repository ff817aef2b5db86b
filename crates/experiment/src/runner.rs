//! Experiment orchestration

use feature_engine::{PipelineSpec, Transform};
use label_assigner::{LabelAssigner, PointLabel};
use ndarray::Axis;
use rig_data::{load_capacitive_trials, load_strain_gauge_trials, SensorType, TrialRecording};
use tracing::{debug, info, warn};
use windowizer::{WindowedData, Windowizer};

use crate::{
    build_datasets, f1_macro, Dataset, Estimator, ExperimentConfig, ExperimentError,
    ExperimentResult, NearestCentroid, ScoreSummary, ShuffleSplit,
};

/// Label every trial and windowize each one separately
pub fn label_and_windowize(
    trials: &[TrialRecording],
    assigner: &LabelAssigner,
    windowizer: &Windowizer,
) -> Result<WindowedData, ExperimentError> {
    let labels: Vec<Vec<PointLabel>> = trials
        .iter()
        .map(|t| assigner.assign(&t.timestamps(), &t.trial))
        .collect();
    let windows = windowizer.windowize_trials(
        trials
            .iter()
            .zip(&labels)
            .map(|(t, l)| (t.samples.as_slice(), l.as_slice())),
    )?;
    Ok(windows)
}

/// Fit `spec` and a fresh estimator on each training split, score on the held-out rows
pub fn cross_validate<E, F>(
    dataset: &Dataset,
    spec: &PipelineSpec,
    splitter: &ShuffleSplit,
    make_estimator: F,
) -> Result<ScoreSummary, ExperimentError>
where
    E: Estimator,
    F: Fn() -> E,
{
    let mut scores = Vec::with_capacity(splitter.n_splits());
    for (train, test) in splitter.split(dataset.len())? {
        let y_train: Vec<usize> = train.iter().map(|&i| dataset.y[i]).collect();
        let y_test: Vec<usize> = test.iter().map(|&i| dataset.y[i]).collect();

        let mut pipeline = spec.build(dataset.channels)?;
        let x_train = pipeline.fit_transform(&dataset.x.select(Axis(0), &train))?;
        let x_test = pipeline.transform(&dataset.x.select(Axis(0), &test))?;

        let mut estimator = make_estimator();
        estimator.fit(&x_train, &y_train)?;
        let predicted = estimator.predict(&x_test)?;
        scores.push(f1_macro(&y_test, &predicted));
    }
    Ok(ScoreSummary::from_scores(scores))
}

/// Evaluate every pipeline on every dataset.
///
/// Datasets too small to split are skipped with a warning.
pub fn run_sweep<E, F>(
    datasets: &[Dataset],
    specs: &[PipelineSpec],
    splitter: &ShuffleSplit,
    make_estimator: F,
) -> Result<Vec<ExperimentResult>, ExperimentError>
where
    E: Estimator,
    F: Fn() -> E,
{
    let mut results = Vec::with_capacity(datasets.len() * specs.len());
    for dataset in datasets {
        let n_test = splitter.test_count(dataset.len());
        if n_test == 0 || n_test >= dataset.len() {
            warn!("Skipping {}: only {} classified windows", dataset.name(), dataset.len());
            continue;
        }
        debug!("{} class counts: {:?}", dataset.name(), dataset.class_counts());

        for spec in specs {
            let summary = cross_validate(dataset, spec, splitter, &make_estimator)?;
            info!(
                "{} [{}]: using N={} random splits and test_size={:.2}, average score {:.2} with {:.4} std. dev.",
                dataset.name(),
                spec,
                splitter.n_splits(),
                splitter.test_size(),
                summary.mean,
                summary.std_dev
            );
            results.push(ExperimentResult {
                dataset: dataset.name(),
                pipeline: spec.to_string(),
                rows: dataset.len(),
                splits: splitter.n_splits(),
                test_size: splitter.test_size(),
                mean_f1: summary.mean,
                std_f1: summary.std_dev,
            });
        }
    }
    Ok(results)
}

fn sensor_datasets(
    sensor: SensorType,
    trials: &[TrialRecording],
    assigner: &LabelAssigner,
    windowizer: &Windowizer,
) -> Result<Vec<Dataset>, ExperimentError> {
    let windows = label_and_windowize(trials, assigner, windowizer)?;
    info!(
        "{}: {} trials -> {} windows of {} samples x {} channels",
        sensor.short_name(),
        trials.len(),
        windows.len(),
        windowizer.window_size(),
        windows.channels
    );
    Ok(build_datasets(sensor, &windows))
}

/// Load, label, windowize and evaluate everything the configuration names
pub fn run(config: &ExperimentConfig) -> Result<Vec<ExperimentResult>, ExperimentError> {
    config.validate()?;
    let assigner = LabelAssigner::new(config.labels.clone())?;
    let splitter = ShuffleSplit::new(config.splits, config.test_size, config.random_seed)?;

    let mut datasets = Vec::new();

    if let Some(source) = &config.capacitive {
        let mut trials = load_capacitive_trials(
            &source.data_dir,
            &source.manifest,
            config.labels.experiment_length_s,
        )?;
        if let Some(calibration) = &config.capacitance {
            for trial in &mut trials {
                calibration.apply(trial);
            }
        }
        let windowizer = config.window.build(config.capacitive_rate_hz)?;
        datasets.extend(sensor_datasets(SensorType::Capacitive, &trials, &assigner, &windowizer)?);
    }

    if let Some(source) = &config.strain_gauge {
        let trials =
            load_strain_gauge_trials(&source.data_dir, &source.manifest, config.strain_gauge_mode)?;
        let windowizer = config.window.build(config.strain_gauge_rate_hz)?;
        datasets.extend(sensor_datasets(SensorType::StrainGauge, &trials, &assigner, &windowizer)?);
    }

    run_sweep(&datasets, &config.pipeline_specs(), &splitter, NearestCentroid::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SensorSource, Target};
    use feature_engine::{FrequencyKind, ScalerKind};
    use label_assigner::WearLabel;
    use rig_data::{Penetration, Sample, TrialMetadata, WearLevel};
    use std::fmt::Write as _;
    use std::path::{Path, PathBuf};
    use windowizer::WindowConfig;

    const CAP_DT: f64 = 0.0025;

    /// Wear sets the vibration frequency; concrete is noisier than limestone
    fn signal(t: f64, wear: WearLevel, channel: usize) -> f64 {
        let freq = match wear {
            WearLevel::New => 20.0,
            WearLevel::Moderate => 45.0,
            WearLevel::Worn => 90.0,
        };
        let concrete = if t < 0.4 { 0.5 * (t * 700.0).sin() } else { 0.0 };
        (2.0 * std::f64::consts::PI * freq * t).sin() * (channel + 1) as f64 + concrete + 100.0
    }

    fn write_capacitive_fixture(dir: &Path, trials: &[(WearLevel, &str, u32)]) -> PathBuf {
        let mut manifest = String::new();
        for (i, (wear, pen, line)) in trials.iter().enumerate() {
            let start = 12.0;
            let mut body = String::new();
            // one second of lead-in before the pass starts, sampled mid-interval
            for k in 0..2000 {
                let abs_t = start - 1.0 + (k as f64 + 0.5) * CAP_DT;
                let t = abs_t - start;
                write!(body, "{abs_t}").unwrap();
                for ch in 0..4 {
                    write!(body, ",{}", signal(t, *wear, ch)).unwrap();
                }
                body.push('\n');
            }
            let name = format!("trial{i}.csv");
            std::fs::write(dir.join(&name), body).unwrap();
            let wear_name = match wear {
                WearLevel::New => "New",
                WearLevel::Moderate => "Mod.",
                WearLevel::Worn => "Worn",
            };
            writeln!(manifest, "{name},{start},{wear_name},{pen},{line}").unwrap();
        }
        let path = dir.join("classifications.csv");
        std::fs::write(&path, manifest).unwrap();
        path
    }

    fn synthetic_trial(wear: WearLevel, penetration: Penetration, line: u32) -> TrialRecording {
        let samples = (0..1600)
            .map(|k| {
                let t = (k as f64 + 0.5) * CAP_DT;
                Sample::new(t, (0..4).map(|ch| signal(t, wear, ch)).collect())
            })
            .collect();
        TrialRecording::new(
            TrialMetadata {
                sensor: SensorType::Capacitive,
                wear,
                penetration,
                line,
            },
            samples,
        )
        .unwrap()
    }

    #[test]
    fn test_label_and_windowize_counts() {
        let trials = vec![
            synthetic_trial(WearLevel::New, Penetration::Deep, 3),
            synthetic_trial(WearLevel::Worn, Penetration::Shallow, 0),
        ];
        let windowizer = WindowConfig::default().build(400.0).unwrap();
        let windows = label_and_windowize(&trials, &LabelAssigner::default(), &windowizer).unwrap();
        assert_eq!(windows.len(), 2 * 79);
        assert_eq!(windows.channels, 4);

        let datasets = build_datasets(SensorType::Capacitive, &windows);
        let material = &datasets[0];
        let wear = &datasets[1];
        // concrete: starts 40..=120; limestone: starts 320..=1560
        assert_eq!(material.class_counts(), vec![5, 63]);
        // line 0 is an edge trial and contributes nothing
        assert_eq!(wear.class_counts(), vec![77, 0, 0]);
        assert!(windows.labels[79..].iter().all(|l| l.wear == WearLabel::NonClassified));
    }

    #[test]
    fn test_cross_validate_separable_wear() {
        let trials = vec![
            synthetic_trial(WearLevel::New, Penetration::Shallow, 2),
            synthetic_trial(WearLevel::Moderate, Penetration::Shallow, 3),
            synthetic_trial(WearLevel::Worn, Penetration::Shallow, 4),
        ];
        let windowizer = WindowConfig::default().build(400.0).unwrap();
        let windows = label_and_windowize(&trials, &LabelAssigner::default(), &windowizer).unwrap();
        let dataset = Dataset::from_windows(SensorType::Capacitive, Target::Wear, &windows);

        let spec = PipelineSpec {
            scale1: ScalerKind::PerChannel,
            frequency: FrequencyKind::Magnitude,
            scale2: ScalerKind::Standard,
        };
        let splitter = ShuffleSplit::new(3, 0.25, 711_711).unwrap();
        let summary = cross_validate(&dataset, &spec, &splitter, NearestCentroid::new).unwrap();
        assert_eq!(summary.scores.len(), 3);
        // distinct vibration frequencies separate cleanly in the spectrum
        assert!(summary.mean > 0.8, "mean f1 {}", summary.mean);
    }

    #[test]
    fn test_run_end_to_end_from_files() {
        let dir = std::env::temp_dir().join(format!("rig-experiment-run-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let manifest = write_capacitive_fixture(
            &dir,
            &[
                (WearLevel::New, "0.3 in.", 1),
                (WearLevel::New, "0.3 in.", 2),
                (WearLevel::Moderate, "0.2 in.", 3),
                (WearLevel::Worn, "0.1 in.", 4),
            ],
        );

        let config = ExperimentConfig {
            capacitive: Some(SensorSource {
                data_dir: dir.clone(),
                manifest,
            }),
            strain_gauge: None,
            splits: 2,
            pipelines: Some(vec![PipelineSpec {
                scale1: ScalerKind::None,
                frequency: FrequencyKind::Magnitude,
                scale2: ScalerKind::Standard,
            }]),
            output_path: dir.join("results.csv"),
            ..Default::default()
        };

        let results = run(&config).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].dataset, "cap material");
        assert_eq!(results[0].rows, 2 * (5 + 63));
        assert_eq!(results[1].dataset, "cap wear");
        assert_eq!(results[1].rows, 4 * 77);
        for r in &results {
            assert_eq!(r.pipeline, "none|abs|std");
            assert!((0.0..=1.0).contains(&r.mean_f1));
        }

        // fixed seed: identical rerun
        assert_eq!(run(&config).unwrap(), results);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_sweep_skips_tiny_datasets() {
        let trials = vec![synthetic_trial(WearLevel::Worn, Penetration::Shallow, 17)];
        let windowizer = WindowConfig::default().build(400.0).unwrap();
        let windows = label_and_windowize(&trials, &LabelAssigner::default(), &windowizer).unwrap();
        let datasets = build_datasets(SensorType::Capacitive, &windows);
        assert!(datasets.iter().all(Dataset::is_empty));

        let splitter = ShuffleSplit::new(3, 0.25, 1).unwrap();
        let results = run_sweep(&datasets, &PipelineSpec::sweep(), &splitter, NearestCentroid::new).unwrap();
        assert!(results.is_empty());
    }
}
