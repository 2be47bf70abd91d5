//! Encoding Error Types

use thiserror::Error;

/// Errors while turning user input into a feature vector
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodingError {
    /// Furnishing label is not one of the three known statuses
    #[error("Unknown furnishing status: {0:?}")]
    UnknownFurnishing(String),

    /// Yes/No field received something else
    #[error("{field} expects \"Yes\" or \"No\", got {value:?}")]
    UnknownAnswer { field: &'static str, value: String },

    /// Value out of allowed range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// Value inside the range but not on the step grid
    #[error("{field} value {value} is not a multiple of {step} from {min}")]
    OffStep {
        field: &'static str,
        value: i64,
        min: i64,
        step: i64,
    },
}
