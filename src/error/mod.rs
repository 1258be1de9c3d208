// Error types for the gesture trainer core
//
// This module defines custom error types for calibration, pipeline and tuning operations,
// providing structured error handling with numeric codes suitable for an
// operator-facing surface.

mod calibration;
mod pipeline;
mod tuning;

pub use calibration::{log_calibration_error, CalibrationError, CalibrationErrorCodes};
pub use pipeline::{log_pipeline_error, PipelineError, PipelineErrorCodes};
pub use tuning::{log_tuning_error, TuningError, TuningErrorCodes};

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types, enabling consistent error handling across
/// the host boundary.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}
