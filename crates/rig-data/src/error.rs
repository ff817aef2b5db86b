//! Data Loading Error Types

use thiserror::Error;

/// Errors while reading or validating rig recordings
#[derive(Debug, Error)]
pub enum DataError {
    /// File could not be opened or read as delimited text
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: csv::Error,
    },

    /// Record has the wrong number of columns
    #[error("{path} record {record}: expected {expected} columns, got {actual}")]
    ColumnCount {
        path: String,
        record: usize,
        expected: usize,
        actual: usize,
    },

    /// Field is not a valid number
    #[error("{path} record {record}, column {column}: '{value}' is not a number")]
    InvalidNumber {
        path: String,
        record: usize,
        column: usize,
        value: String,
    },

    /// Wear level not in the recognized set
    #[error("Unknown wear level: '{0}'")]
    UnknownWear(String),

    /// Penetration depth not in the recognized set
    #[error("Unknown penetration depth: '{0}'")]
    UnknownPenetration(String),

    /// Samples within one trial disagree on channel count
    #[error("Trial {trial}: sample {index} has {actual} channels, expected {expected}")]
    ChannelMismatch {
        trial: String,
        index: usize,
        expected: usize,
        actual: usize,
    },
}
