// Calibration module - two-pose sensor calibration workflow
//
// This module provides:
// 1. CalibrationPose: the upright and upside-down reference orientations
// 2. ReferenceChecks: symmetry and noise checks on each reference batch
// 3. CalibrationProfile: zero offsets and one-G range derived from both poses
// 4. CalibrationProcedure: the state machine tying them together
//
// The calibration workflow:
// 1. Create CalibrationProcedure
// 2. Submit one batch per pose, in either order
// 3. Once both are accepted, build a SignalNormalizer from the profile

pub mod checks;
pub mod pose;
pub mod procedure;
pub mod profile;

pub use checks::{AxisLevels, ReferenceChecks};
pub use pose::CalibrationPose;
pub use procedure::{CalibrationPhase, CalibrationProcedure};
pub use profile::{CalibrationProfile, CALIBRATION_AXIS};
