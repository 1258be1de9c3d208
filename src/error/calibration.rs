// Calibration error types and constants

use crate::error::ErrorCode;
use log::error;
use thiserror::Error;

/// Calibration error code constants
///
/// Error code range: 2001-2005
pub struct CalibrationErrorCodes;

impl CalibrationErrorCodes {
    /// Statistics requested over an empty sample batch
    pub const EMPTY_BATCH: i32 = 2001;

    /// A sample row did not carry the expected number of channels
    pub const CHANNEL_MISMATCH: i32 = 2002;

    /// Normalization requested before both reference poses were collected
    pub const NOT_CALIBRATED: i32 = 2003;

    /// Calibration state lock was poisoned
    pub const STATE_POISONED: i32 = 2004;

    /// Unknown pose label
    pub const UNKNOWN_POSE: i32 = 2005;
}

/// Log a calibration error with structured context
///
/// Logs the numeric code, the component and the message so the operator
/// display and the log agree on what went wrong.
pub fn log_calibration_error(err: &CalibrationError, context: &str) {
    error!(
        "Calibration error in {}: code={}, component=CalibrationProcedure, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Calibration-related errors
///
/// Advisory problems with a reference batch (asymmetry, noise) are not
/// errors; they travel as `CheckOutcome::Warning`. These variants cover
/// requests the calibration layer cannot serve at all.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalibrationError {
    /// Statistics requested over an empty sample batch
    #[error("sample batch is empty")]
    EmptyBatch,

    /// A sample row did not carry the expected number of channels
    #[error("sample {index} has {found} channels, expected {expected}")]
    ChannelMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },

    /// Normalization requested before both reference poses were collected
    #[error("calibration incomplete: collect both the upright and upside-down poses first")]
    NotCalibrated,

    /// Calibration state lock was poisoned
    #[error("calibration state lock poisoned")]
    StatePoisoned,

    /// Unknown pose label
    #[error("unknown calibration pose '{label}'")]
    UnknownPose { label: String },
}

impl ErrorCode for CalibrationError {
    fn code(&self) -> i32 {
        match self {
            CalibrationError::EmptyBatch => CalibrationErrorCodes::EMPTY_BATCH,
            CalibrationError::ChannelMismatch { .. } => CalibrationErrorCodes::CHANNEL_MISMATCH,
            CalibrationError::NotCalibrated => CalibrationErrorCodes::NOT_CALIBRATED,
            CalibrationError::StatePoisoned => CalibrationErrorCodes::STATE_POISONED,
            CalibrationError::UnknownPose { .. } => CalibrationErrorCodes::UNKNOWN_POSE,
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
    fn test_calibration_error_codes() {
        assert_eq!(
            CalibrationError::EmptyBatch.code(),
            CalibrationErrorCodes::EMPTY_BATCH
        );
        assert_eq!(
            CalibrationError::ChannelMismatch {
                index: 3,
                expected: 6,
                found: 5
            }
            .code(),
            CalibrationErrorCodes::CHANNEL_MISMATCH
        );
        assert_eq!(
            CalibrationError::NotCalibrated.code(),
            CalibrationErrorCodes::NOT_CALIBRATED
        );
        assert_eq!(
            CalibrationError::StatePoisoned.code(),
            CalibrationErrorCodes::STATE_POISONED
        );
        assert_eq!(
            CalibrationError::UnknownPose {
                label: "sideways".to_string()
            }
            .code(),
            CalibrationErrorCodes::UNKNOWN_POSE
        );
    }

    #[test]
    fn test_calibration_error_messages() {
        let err = CalibrationError::ChannelMismatch {
            index: 3,
            expected: 6,
            found: 5,
        };
        assert_eq!(err.message(), "sample 3 has 5 channels, expected 6");

        let err = CalibrationError::NotCalibrated;
        assert!(err.message().contains("calibration incomplete"));

        let err = CalibrationError::UnknownPose {
            label: "sideways".to_string(),
        };
        assert!(err.message().contains("sideways"));
    }

    #[test]
    fn test_error_code_trait_object() {
        let err: &dyn ErrorCode = &CalibrationError::NotCalibrated;
        assert_eq!(err.code(), 2003);
    }
}
