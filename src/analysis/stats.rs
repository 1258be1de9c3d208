// Per-channel batch statistics
//
// Standard deviation treats the batch as its own population (divides by n,
// no Bessel correction). Every threshold in calibration and quality checking
// is tuned against this convention, so all call sites go through here.

use crate::analysis::sample::{ChannelVector, SampleBatch, CHANNEL_COUNT};
use crate::error::CalibrationError;

/// Mean and population standard deviation for each channel of a batch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchStatistics {
    pub mean: ChannelVector,
    pub std_dev: ChannelVector,
}

impl BatchStatistics {
    /// Compute statistics for a non-empty batch
    ///
    /// # Returns
    /// * `Ok(BatchStatistics)` - per-channel mean and standard deviation
    /// * `Err(CalibrationError::EmptyBatch)` - the batch has no samples
    pub fn from_batch(batch: &SampleBatch) -> Result<Self, CalibrationError> {
        if batch.is_empty() {
            return Err(CalibrationError::EmptyBatch);
        }

        let n = batch.len() as f64;
        let mut mean = [0.0; CHANNEL_COUNT];
        for sample in batch.iter() {
            for (acc, value) in mean.iter_mut().zip(sample) {
                *acc += value;
            }
        }
        for value in mean.iter_mut() {
            *value /= n;
        }

        let mut variance = [0.0; CHANNEL_COUNT];
        for sample in batch.iter() {
            for channel in 0..CHANNEL_COUNT {
                let d = sample[channel] - mean[channel];
                variance[channel] += d * d;
            }
        }

        let mut std_dev = [0.0; CHANNEL_COUNT];
        for (sd, var) in std_dev.iter_mut().zip(variance) {
            *sd = (var / n).sqrt();
        }

        Ok(Self { mean, std_dev })
    }

    /// Largest per-channel standard deviation
    pub fn max_std_dev(&self) -> f64 {
        self.std_dev.iter().copied().fold(f64::MIN, f64::max)
    }
}
