// CalibrationProfile - per-channel zero offsets and the one-G range
//
// Derived from the upright and upside-down reference batches. Zero offsets
// sit halfway between the two poses on every channel; the range is half the
// accelerometer Z swing between them.

use serde::{Deserialize, Serialize};

use crate::analysis::sample::{ChannelVector, CHANNEL_COUNT};
use crate::analysis::stats::BatchStatistics;

/// Accelerometer Z channel, the axis gravity flips between the two poses
pub const CALIBRATION_AXIS: usize = 2;

/// Offsets and scale applied to every raw reading before classification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationProfile {
    /// Per-channel reading that corresponds to zero G / zero rate
    pub zero_offsets: ChannelVector,
    /// Raw units per G
    pub range: f64,
}

impl CalibrationProfile {
    /// Derive a profile from the statistics of both reference poses
    pub fn from_references(upright: &BatchStatistics, upside_down: &BatchStatistics) -> Self {
        let mut zero_offsets = [0.0; CHANNEL_COUNT];
        for (channel, offset) in zero_offsets.iter_mut().enumerate() {
            *offset = (upright.mean[channel] + upside_down.mean[channel]) / 2.0;
        }

        let range = (upright.mean[CALIBRATION_AXIS] - upside_down.mean[CALIBRATION_AXIS]) / 2.0;

        Self {
            zero_offsets,
            range,
        }
    }

    /// A zero or non-finite range cannot scale readings
    pub fn is_usable(&self) -> bool {
        self.range.is_finite() && self.range != 0.0 && self.zero_offsets.iter().all(|o| o.is_finite())
    }
}
