//! Randomized train/test splits

use rand::{seq::SliceRandom, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::ExperimentError;

/// Repeated random permutation splits with a fixed seed
#[derive(Debug, Clone)]
pub struct ShuffleSplit {
    n_splits: usize,
    test_size: f64,
    seed: u64,
}

impl ShuffleSplit {
    pub fn new(n_splits: usize, test_size: f64, seed: u64) -> Result<Self, ExperimentError> {
        if n_splits == 0 {
            return Err(ExperimentError::Config("n_splits must be at least 1".to_string()));
        }
        if !(test_size > 0.0 && test_size < 1.0) {
            return Err(ExperimentError::Config(format!(
                "test_size must be in (0, 1), got {test_size}"
            )));
        }
        Ok(Self {
            n_splits,
            test_size,
            seed,
        })
    }

    pub fn n_splits(&self) -> usize {
        self.n_splits
    }

    pub fn test_size(&self) -> f64 {
        self.test_size
    }

    /// Rows held out per split for `n` rows
    pub fn test_count(&self, n: usize) -> usize {
        (self.test_size * n as f64).ceil() as usize
    }

    /// `(train, test)` index sets for `n` rows; the same seed gives the same splits
    pub fn split(&self, n: usize) -> Result<Vec<(Vec<usize>, Vec<usize>)>, ExperimentError> {
        let n_test = self.test_count(n);
        if n_test == 0 || n_test >= n {
            return Err(ExperimentError::TooFewRows {
                rows: n,
                test_size: self.test_size,
            });
        }

        let mut rng = Pcg32::seed_from_u64(self.seed);
        let mut splits = Vec::with_capacity(self.n_splits);
        for _ in 0..self.n_splits {
            let mut order: Vec<usize> = (0..n).collect();
            order.shuffle(&mut rng);
            let train = order.split_off(n_test);
            splits.push((train, order));
        }
        Ok(splits)
    }
}
