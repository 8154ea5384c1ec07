//! # Error Types
//!
//! Structured error types for calc_core. Every fallible operation in the crate
//! returns a [`CalcResult`], so callers can match on the variant or serialize it
//! straight to JSON.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::errors::{CalcError, CalcResult};
//!
//! fn validate_length(length_m: f64) -> CalcResult<()> {
//!     if length_m <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "length",
//!             length_m.to_string(),
//!             "Beam length must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for calc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, unparsable, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Two quantities with incompatible dimensions were combined or converted
    #[error("Dimension mismatch in {operation}: expected {expected}, found {found}")]
    DimensionMismatch {
        operation: String,
        expected: String,
        found: String,
    },

    /// A unit name is not in the unit table
    #[error("Unknown unit: {unit}")]
    UnknownUnit { unit: String },

    /// Wire gauge not found in the active wire table
    #[error("Wire gauge not found: {gauge}")]
    WireGaugeNotFound { gauge: String },

    /// Calculation could not produce a result
    #[error("Calculation failed: {calculation_type} - {reason}")]
    CalculationFailed {
        calculation_type: String,
        reason: String,
    },

    /// The calculation set is past its expiration date
    #[error("Calculation set expired on {expired_on}")]
    Expired { expired_on: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON / CSV serialization or deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a DimensionMismatch error
    pub fn dimension_mismatch(
        operation: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        CalcError::DimensionMismatch {
            operation: operation.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create an UnknownUnit error
    pub fn unknown_unit(unit: impl Into<String>) -> Self {
        CalcError::UnknownUnit { unit: unit.into() }
    }

    /// Create a WireGaugeNotFound error
    pub fn wire_gauge_not_found(gauge: impl Into<String>) -> Self {
        CalcError::WireGaugeNotFound { gauge: gauge.into() }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(calculation_type: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::CalculationFailed {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError { reason: reason.into() }
    }

    /// Errors caused by the caller's inputs rather than the environment
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidInput { .. }
                | CalcError::DimensionMismatch { .. }
                | CalcError::UnknownUnit { .. }
                | CalcError::WireGaugeNotFound { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::DimensionMismatch { .. } => "DIMENSION_MISMATCH",
            CalcError::UnknownUnit { .. } => "UNKNOWN_UNIT",
            CalcError::WireGaugeNotFound { .. } => "WIRE_GAUGE_NOT_FOUND",
            CalcError::CalculationFailed { .. } => "CALCULATION_FAILED",
            CalcError::Expired { .. } => "EXPIRED",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::dimension_mismatch("add", "[length]", "[mass]*[length]/[time]**2");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"DimensionMismatch\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::unknown_unit("furlong").error_code(), "UNKNOWN_UNIT");
        assert_eq!(CalcError::wire_gauge_not_found("99").error_code(), "WIRE_GAUGE_NOT_FOUND");
        assert_eq!(
            CalcError::Expired { expired_on: "2024-01-01".into() }.error_code(),
            "EXPIRED"
        );
    }

    #[test]
    fn test_input_error_classification() {
        assert!(CalcError::invalid_input("a", "-1", "negative").is_input_error());
        assert!(!CalcError::file_error("open", "x.json", "missing").is_input_error());
    }
}
