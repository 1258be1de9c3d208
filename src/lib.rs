// Gesture Trainer Core - motion sensor calibration and gesture tuning
// Two-pose calibration, signal normalization, training quality checks and
// live tuning of the recognition pipeline

// Module declarations
pub mod analysis;
pub mod calibration;
pub mod config;
pub mod context;
pub mod error;
pub mod outcome;
pub mod pipeline;
pub mod report;
pub mod tuning;

// Re-exports for convenience
pub use config::AppConfig;
pub use context::AppContext;
pub use error::{CalibrationError, ErrorCode, PipelineError, TuningError};
pub use outcome::CheckOutcome;
pub use pipeline::GesturePipeline;
pub use report::{OperatorReport, ReportChannel};
