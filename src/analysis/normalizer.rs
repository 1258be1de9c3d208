// SignalNormalizer - raw readings to calibrated units
//
// Runs once per incoming sample ahead of the classifier, so it works on
// fixed-size arrays only and never allocates.

use crate::analysis::sample::ChannelVector;
use crate::calibration::profile::CalibrationProfile;
use crate::error::CalibrationError;

/// Applies a completed calibration profile to raw readings
///
/// Only obtainable from a usable profile, so a normalizer with zeroed or
/// stale offsets cannot exist.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalNormalizer {
    profile: CalibrationProfile,
}

impl SignalNormalizer {
    /// Create a normalizer for a profile
    ///
    /// # Errors
    /// `CalibrationError::NotCalibrated` if the profile's range is zero or
    /// not finite
    pub fn new(profile: &CalibrationProfile) -> Result<Self, CalibrationError> {
        if !profile.is_usable() {
            return Err(CalibrationError::NotCalibrated);
        }
        Ok(Self { profile: *profile })
    }

    /// `(raw[i] - zero_offsets[i]) / range` for every channel
    pub fn normalize(&self, raw: &ChannelVector) -> ChannelVector {
        let mut out = [0.0; crate::analysis::sample::CHANNEL_COUNT];
        self.normalize_into(raw, &mut out);
        out
    }

    /// Same as `normalize`, writing into a caller-owned buffer
    pub fn normalize_into(&self, raw: &ChannelVector, out: &mut ChannelVector) {
        for ((dst, value), offset) in out.iter_mut().zip(raw).zip(&self.profile.zero_offsets) {
            *dst = (value - offset) / self.profile.range;
        }
    }

    pub fn profile(&self) -> &CalibrationProfile {
        &self.profile
    }
}
