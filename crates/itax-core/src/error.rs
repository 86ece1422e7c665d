//! # Validation Errors
//!
//! The two recoverable failures of boundary input normalization. The
//! `Display` text of each variant is the exact message returned to clients,
//! so it must not change.

use thiserror::Error;

/// Rejection of a tax calculation request before any computation runs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// At least one required field is absent from the payload.
    #[error("All fields are required.")]
    MissingFields,

    /// A field is present but does not coerce to a finite number.
    #[error("Invalid input data. Please provide valid numbers.")]
    InvalidNumber {
        /// Wire name of the first offending field.
        field: &'static str,
    },
}

impl ValidationError {
    /// Machine-readable code, used for log fields and metric labels.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingFields => "missing_fields",
            Self::InvalidNumber { .. } => "invalid_number",
        }
    }
}
