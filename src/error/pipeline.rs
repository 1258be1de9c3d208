// Pipeline error types and constants

use crate::error::{CalibrationError, ErrorCode};
use log::error;
use thiserror::Error;

/// Pipeline error code constants
///
/// Error code range: 4001-4001. Wrapped calibration errors keep their own
/// 2001-2099 codes.
pub struct PipelineErrorCodes;

impl PipelineErrorCodes {
    /// Classifier or debounce filter lock was poisoned
    pub const STAGE_UNAVAILABLE: i32 = 4001;
}

/// Log a pipeline error with structured context
pub fn log_pipeline_error(err: &PipelineError, context: &str) {
    error!(
        "Pipeline error in {}: code={}, component=GesturePipeline, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Errors on the per-sample path (normalize, classify, filter)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    /// A stage panicked while holding its lock; the pipeline is miswired or
    /// the host collaborator is broken
    #[error("{stage} unavailable: lock poisoned")]
    StageUnavailable { stage: String },

    /// The reading could not be normalized
    #[error(transparent)]
    Calibration(#[from] CalibrationError),
}

impl ErrorCode for PipelineError {
    fn code(&self) -> i32 {
        match self {
            PipelineError::StageUnavailable { .. } => PipelineErrorCodes::STAGE_UNAVAILABLE,
            PipelineError::Calibration(inner) => inner.code(),
        }
    }

    fn message(&self) -> String {
        self.to_string()
    }
}
