//! Fit/transform contract

use std::fmt;

use ndarray::Array2;

use crate::TransformError;

/// A feature operator over windowed data.
///
/// Rows are windows. `transform` treats every row independently and never
/// aliases its input; `fit` may learn dataset statistics and is a no-op for
/// row-local transforms.
pub trait Transform: fmt::Debug + Send + Sync {
    /// Short name used in experiment reports
    fn name(&self) -> String;

    /// Learn any statistics needed by `transform`
    fn fit(&mut self, _x: &Array2<f64>) -> Result<(), TransformError> {
        Ok(())
    }

    /// Map every row of `x` to an output row
    fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>, TransformError>;

    /// Output row width for a given input row width
    fn output_width(&self, input_width: usize) -> Result<usize, TransformError>;

    fn fit_transform(&mut self, x: &Array2<f64>) -> Result<Array2<f64>, TransformError> {
        self.fit(x)?;
        self.transform(x)
    }
}
