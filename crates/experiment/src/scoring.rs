//! Classification scoring

use std::collections::BTreeSet;

/// Macro-averaged F1 over every class present in `truth` or `predicted`.
///
/// Classes with no true or predicted positives contribute an F1 of 0.
pub fn f1_macro(truth: &[usize], predicted: &[usize]) -> f64 {
    let classes: BTreeSet<usize> = truth.iter().chain(predicted).copied().collect();
    if classes.is_empty() {
        return 0.0;
    }

    let total: f64 = classes
        .iter()
        .map(|&class| {
            let mut tp = 0usize;
            let mut fp = 0usize;
            let mut fn_ = 0usize;
            for (&t, &p) in truth.iter().zip(predicted) {
                match (t == class, p == class) {
                    (true, true) => tp += 1,
                    (false, true) => fp += 1,
                    (true, false) => fn_ += 1,
                    (false, false) => {}
                }
            }
            let denom = 2 * tp + fp + fn_;
            if denom == 0 {
                0.0
            } else {
                2.0 * tp as f64 / denom as f64
            }
        })
        .sum();
    total / classes.len() as f64
}

/// Scores from repeated splits
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreSummary {
    pub scores: Vec<f64>,
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
}

impl ScoreSummary {
    pub fn from_scores(scores: Vec<f64>) -> Self {
        if scores.is_empty() {
            return Self {
                scores,
                mean: 0.0,
                std_dev: 0.0,
            };
        }
        let n = scores.len() as f64;
        let mean = scores.iter().sum::<f64>() / n;
        let variance = scores.iter().map(|s| (s - mean) * (s - mean)).sum::<f64>() / n;
        Self {
            scores,
            mean,
            std_dev: variance.sqrt(),
        }
    }
}
