//! Estimator seam and a nearest-centroid baseline

use std::collections::BTreeMap;

use ndarray::{Array1, Array2};

use crate::ExperimentError;

/// A classifier trained on feature rows and integer classes
pub trait Estimator {
    fn fit(&mut self, x: &Array2<f64>, y: &[usize]) -> Result<(), ExperimentError>;
    fn predict(&self, x: &Array2<f64>) -> Result<Vec<usize>, ExperimentError>;
}

/// Assigns each row the class whose training mean is closest in Euclidean distance
#[derive(Debug, Clone, Default)]
pub struct NearestCentroid {
    centroids: Vec<(usize, Array1<f64>)>,
}

impl NearestCentroid {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Estimator for NearestCentroid {
    fn fit(&mut self, x: &Array2<f64>, y: &[usize]) -> Result<(), ExperimentError> {
        if x.nrows() != y.len() {
            return Err(ExperimentError::Estimator(format!(
                "{} rows but {} labels",
                x.nrows(),
                y.len()
            )));
        }
        if y.is_empty() {
            return Err(ExperimentError::Estimator("no training rows".to_string()));
        }

        let mut sums: BTreeMap<usize, (Array1<f64>, usize)> = BTreeMap::new();
        for (row, &class) in x.rows().into_iter().zip(y) {
            let entry = sums
                .entry(class)
                .or_insert_with(|| (Array1::zeros(x.ncols()), 0));
            entry.0 += &row;
            entry.1 += 1;
        }
        self.centroids = sums
            .into_iter()
            .map(|(class, (sum, count))| (class, sum / count as f64))
            .collect();
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Vec<usize>, ExperimentError> {
        let Some((_, first)) = self.centroids.first() else {
            return Err(ExperimentError::Estimator("predict called before fit".to_string()));
        };
        if first.len() != x.ncols() {
            return Err(ExperimentError::Estimator(format!(
                "fitted on {} features, got {}",
                first.len(),
                x.ncols()
            )));
        }

        let predictions = x
            .rows()
            .into_iter()
            .map(|row| {
                let mut best = (self.centroids[0].0, f64::INFINITY);
                for (class, centroid) in &self.centroids {
                    let dist: f64 = row
                        .iter()
                        .zip(centroid.iter())
                        .map(|(a, b)| (a - b) * (a - b))
                        .sum();
                    if dist < best.1 {
                        best = (*class, dist);
                    }
                }
                best.0
            })
            .collect();
        Ok(predictions)
    }
}
