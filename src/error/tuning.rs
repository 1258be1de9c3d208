// Tunable parameter error types and constants

use crate::error::ErrorCode;
use log::error;
use thiserror::Error;

/// Tuning error code constants
///
/// Error code range: 3001-3004
pub struct TuningErrorCodes;

impl TuningErrorCodes {
    /// Requested value lies outside the parameter's inclusive bounds
    pub const OUT_OF_RANGE: i32 = 3001;

    /// No parameter registered under the requested name
    pub const UNKNOWN_PARAMETER: i32 = 3002;

    /// Integer parameter received a fractional value
    pub const NOT_AN_INTEGER: i32 = 3003;

    /// Classifier or filter could not be reached from the update callback
    pub const COLLABORATOR_UNAVAILABLE: i32 = 3004;
}

/// Log a tuning error with structured context
pub fn log_tuning_error(err: &TuningError, context: &str) {
    error!(
        "Tuning error in {}: code={}, component=TunableRegistry, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Errors raised while changing a tunable parameter
///
/// `OutOfRange`, `UnknownParameter` and `NotAnInteger` are rejections: the
/// stored value is untouched. `CollaboratorUnavailable` is an integration
/// fault surfaced from the update callback.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuningError {
    #[error("{name} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("no tunable parameter named '{name}'")]
    UnknownParameter { name: String },

    #[error("{name} expects a whole number, got {value}")]
    NotAnInteger { name: String, value: f64 },

    #[error("{component} unavailable: {reason}")]
    CollaboratorUnavailable { component: String, reason: String },
}

impl ErrorCode for TuningError {
    fn code(&self) -> i32 {
        match self {
            TuningError::OutOfRange { .. } => TuningErrorCodes::OUT_OF_RANGE,
            TuningError::UnknownParameter { .. } => TuningErrorCodes::UNKNOWN_PARAMETER,
            TuningError::NotAnInteger { .. } => TuningErrorCodes::NOT_AN_INTEGER,
            TuningError::CollaboratorUnavailable { .. } => {
                TuningErrorCodes::COLLABORATOR_UNAVAILABLE
            }
        }
    }

    fn message(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tuning_error_codes() {
        let err = TuningError::OutOfRange {
            name: "Variability".to_string(),
            value: 0.05,
            min: 0.1,
            max: 5.0,
        };
        assert_eq!(err.code(), TuningErrorCodes::OUT_OF_RANGE);
        assert_eq!(
            TuningError::UnknownParameter {
                name: "Gain".to_string()
            }
            .code(),
            3002
        );
        assert_eq!(
            TuningError::NotAnInteger {
                name: "Timeout".to_string(),
                value: 1.5
            }
            .code(),
            3003
        );
        assert_eq!(
            TuningError::CollaboratorUnavailable {
                component: "classifier".to_string(),
                reason: "lock poisoned".to_string()
            }
            .code(),
            3004
        );
    }

    #[test]
    fn test_out_of_range_message() {
        let err = TuningError::OutOfRange {
            name: "Variability".to_string(),
            value: 0.05,
            min: 0.1,
            max: 5.0,
        };
        assert_eq!(err.message(), "Variability value 0.05 is out of range [0.1, 5]");
    }
}
