// CalibrationProcedure - two-pose reference collection state machine
//
// The operator rests the sensor upright and upside down on a flat surface
// and delivers one batch per pose, in either order. Each batch is checked
// on its own (symmetry, noise). Once both poses are on record the profile
// is recomputed from the latest batch of each, on every later submission
// as well, so recollecting a pose recalibrates.
//
// Phases: NoneCollected -> OneCollected(pose) -> BothCollected
// A restored profile reads Restored until both poses are collected again.

use crate::analysis::normalizer::SignalNormalizer;
use crate::analysis::sample::SampleBatch;
use crate::analysis::stats::BatchStatistics;
use crate::calibration::checks::ReferenceChecks;
use crate::calibration::pose::CalibrationPose;
use crate::calibration::profile::CalibrationProfile;
use crate::config::CalibrationConfig;
use crate::error::CalibrationError;
use crate::outcome::CheckOutcome;

/// Where the procedure stands in the two-pose workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum CalibrationPhase {
    NoneCollected,
    OneCollected(CalibrationPose),
    BothCollected,
    /// A saved profile is in effect and not both poses have been recollected
    Restored,
}

/// Latest accepted batch for one pose together with its statistics
#[derive(Debug, Clone)]
struct ReferenceBatch {
    batch: SampleBatch,
    stats: BatchStatistics,
}

/// CalibrationProcedure owns the reference batches and the derived profile
#[derive(Debug, Clone)]
pub struct CalibrationProcedure {
    checks: ReferenceChecks,
    upright: Option<ReferenceBatch>,
    upside_down: Option<ReferenceBatch>,
    profile: Option<CalibrationProfile>,
}

impl Default for CalibrationProcedure {
    fn default() -> Self {
        Self::new_default()
    }
}

impl CalibrationProcedure {
    /// Create a new calibration procedure with the given check tolerances
    pub fn new(config: &CalibrationConfig) -> Self {
        Self {
            checks: ReferenceChecks::new(config),
            upright: None,
            upside_down: None,
            profile: None,
        }
    }

    /// Create with default tolerances (10% symmetry, 5% noise)
    pub fn new_default() -> Self {
        Self::new(&CalibrationConfig::default())
    }

    /// Deliver the reference batch for one pose
    ///
    /// # Arguments
    /// * `pose` - Which orientation the batch was captured in
    /// * `batch` - Readings captured while the sensor rested in that pose
    ///
    /// # Returns
    /// * `Ok(CheckOutcome)` - Outcome of the symmetry and noise checks. A
    ///   `Fault` means the round was aborted: the batch is not stored and
    ///   the profile is left as it was.
    /// * `Err(CalibrationError::EmptyBatch)` - No readings to work with
    pub fn submit(
        &mut self,
        pose: CalibrationPose,
        batch: SampleBatch,
    ) -> Result<CheckOutcome, CalibrationError> {
        let stats = BatchStatistics::from_batch(&batch)?;
        let outcome = self.checks.evaluate(&stats);

        if outcome.is_fault() {
            tracing::error!(
                "[Calibration] {} batch rejected ({} samples): {}",
                pose,
                batch.len(),
                outcome
            );
            return Ok(outcome);
        }

        let candidate = match pose {
            CalibrationPose::Upright => self
                .upside_down
                .as_ref()
                .map(|other| CalibrationProfile::from_references(&stats, &other.stats)),
            CalibrationPose::UpsideDown => self
                .upright
                .as_ref()
                .map(|other| CalibrationProfile::from_references(&other.stats, &stats)),
        };

        if let Some(profile) = &candidate {
            if !profile.is_usable() {
                let fault = CheckOutcome::fault(
                    "Upright and upside-down readings have the same Z value. \
                     Recollect both poses, flipping the sensor over between them.",
                );
                tracing::error!("[Calibration] {} batch rejected: {}", pose, fault);
                return Ok(fault);
            }
        }

        tracing::info!(
            "[Calibration] {} batch accepted: {} samples, outcome={}",
            pose,
            batch.len(),
            outcome
        );
        *self.slot_mut(pose) = Some(ReferenceBatch { batch, stats });

        if let Some(profile) = candidate {
            tracing::info!(
                "[Calibration] Profile updated: zero_offsets={:?}, range={}",
                profile.zero_offsets,
                profile.range
            );
            self.profile = Some(profile);
        }

        if let CheckOutcome::Warning(message) = &outcome {
            tracing::warn!("[Calibration] {}: {}", pose, message);
        }

        Ok(outcome)
    }

    /// Current phase of the workflow
    ///
    /// Both poses on record always means a profile exists, since a pose is
    /// only stored when the profile it produces is usable.
    pub fn phase(&self) -> CalibrationPhase {
        match (&self.upright, &self.upside_down, &self.profile) {
            (Some(_), Some(_), _) => CalibrationPhase::BothCollected,
            (_, _, Some(_)) => CalibrationPhase::Restored,
            (None, None, None) => CalibrationPhase::NoneCollected,
            (Some(_), None, None) => CalibrationPhase::OneCollected(CalibrationPose::Upright),
            (None, Some(_), None) => CalibrationPhase::OneCollected(CalibrationPose::UpsideDown),
        }
    }

    /// Check if a profile is in effect, collected or restored
    pub fn is_complete(&self) -> bool {
        matches!(
            self.phase(),
            CalibrationPhase::BothCollected | CalibrationPhase::Restored
        )
    }

    /// Poses still missing, in collection order
    pub fn pending_poses(&self) -> Vec<CalibrationPose> {
        CalibrationPose::ALL
            .into_iter()
            .filter(|pose| self.slot(*pose).is_none())
            .collect()
    }

    /// Profile derived from both poses, `None` until calibration completes
    pub fn profile(&self) -> Option<&CalibrationProfile> {
        self.profile.as_ref()
    }

    /// Build a normalizer from the current profile
    ///
    /// # Errors
    /// `CalibrationError::NotCalibrated` until both poses have been collected
    pub fn normalizer(&self) -> Result<SignalNormalizer, CalibrationError> {
        let profile = self.profile.as_ref().ok_or(CalibrationError::NotCalibrated)?;
        SignalNormalizer::new(profile)
    }

    /// Latest accepted batch for a pose
    pub fn reference_batch(&self, pose: CalibrationPose) -> Option<&SampleBatch> {
        self.slot(pose).as_ref().map(|reference| &reference.batch)
    }

    /// Statistics of the latest accepted batch for a pose
    pub fn reference_statistics(&self, pose: CalibrationPose) -> Option<&BatchStatistics> {
        self.slot(pose).as_ref().map(|reference| &reference.stats)
    }

    /// Install a previously saved profile without collecting poses
    ///
    /// Reference batches are cleared and the phase reads `Restored`.
    /// Collecting both poses again replaces the restored profile and moves
    /// the phase to `BothCollected`.
    ///
    /// # Errors
    /// `CalibrationError::NotCalibrated` if the profile cannot normalize
    /// (zero or non-finite range, non-finite offsets)
    pub fn restore_profile(&mut self, profile: CalibrationProfile) -> Result<(), CalibrationError> {
        if !profile.is_usable() {
            return Err(CalibrationError::NotCalibrated);
        }
        self.upright = None;
        self.upside_down = None;
        self.profile = Some(profile);
        tracing::info!("[Calibration] Restored profile: range={}", profile.range);
        Ok(())
    }

    /// Forget both poses and the profile
    pub fn reset(&mut self) {
        self.upright = None;
        self.upside_down = None;
        self.profile = None;
    }

    fn slot(&self, pose: CalibrationPose) -> &Option<ReferenceBatch> {
        match pose {
            CalibrationPose::Upright => &self.upright,
            CalibrationPose::UpsideDown => &self.upside_down,
        }
    }

    fn slot_mut(&mut self, pose: CalibrationPose) -> &mut Option<ReferenceBatch> {
        match pose {
            CalibrationPose::Upright => &mut self.upright,
            CalibrationPose::UpsideDown => &mut self.upside_down,
        }
    }
}

#[cfg(test)]
#[path = "procedure_tests.rs"]
mod tests;
