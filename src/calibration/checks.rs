// Reference batch checks: axis symmetry and noise
//
// Both checks work from the batch statistics of a single pose. The
// accelerometer X/Y average stands in for the zero-G level and Z for the
// one-G level; the gyroscope channels are treated the same way. The
// difference between those levels is the range every other quantity is
// compared against.

use crate::analysis::stats::BatchStatistics;
use crate::config::CalibrationConfig;
use crate::outcome::CheckOutcome;

/// Zero-level and one-level estimates derived from one pose
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisLevels {
    /// |Z - mean(X, Y)| for the accelerometer
    pub accel_range: f64,
    /// |Z - mean(X, Y)| for the gyroscope
    pub gyro_range: f64,
    /// |X - Y| / accel_range
    pub accel_asymmetry: f64,
    /// |X - Y| / gyro_range
    pub gyro_asymmetry: f64,
}

impl AxisLevels {
    pub fn from_statistics(stats: &BatchStatistics) -> Self {
        let m = &stats.mean;

        let zero_g = (m[0] + m[1]) / 2.0;
        let one_g = m[2];
        let accel_range = (one_g - zero_g).abs();

        let zero_rate = (m[3] + m[4]) / 2.0;
        let one_rate = m[5];
        let gyro_range = (one_rate - zero_rate).abs();

        Self {
            accel_range,
            gyro_range,
            accel_asymmetry: (m[0] - m[1]).abs() / accel_range,
            gyro_asymmetry: (m[3] - m[4]).abs() / gyro_range,
        }
    }
}

fn is_degenerate(range: f64) -> bool {
    !range.is_finite() || range == 0.0
}

/// Advisory checks applied to every reference batch
#[derive(Debug, Clone, Copy)]
pub struct ReferenceChecks {
    symmetry_tolerance: f64,
    noise_tolerance: f64,
}

impl Default for ReferenceChecks {
    fn default() -> Self {
        Self::new(&CalibrationConfig::default())
    }
}

impl ReferenceChecks {
    pub fn new(config: &CalibrationConfig) -> Self {
        Self {
            symmetry_tolerance: config.symmetry_tolerance,
            noise_tolerance: config.noise_tolerance,
        }
    }

    /// Evaluate one reference batch
    ///
    /// # Returns
    /// * `Fault` - zero-level and one-level coincide on either sensor, so
    ///   the range is zero and nothing can be scaled against it
    /// * `Warning` - asymmetric X/Y axes or noisy channels; when both apply
    ///   only the noise warning is reported
    /// * `Success` - otherwise
    pub fn evaluate(&self, stats: &BatchStatistics) -> CheckOutcome {
        let levels = AxisLevels::from_statistics(stats);

        if is_degenerate(levels.accel_range) {
            return CheckOutcome::fault(
                "Accelerometer Z reads the same as X and Y, so no one-G range can be derived. \
                 Check the sensor wiring and that it rests flat.",
            );
        }
        if is_degenerate(levels.gyro_range) {
            return CheckOutcome::fault(
                "Gyro Z reads the same as X and Y, so no reference range can be derived. \
                 Check the sensor wiring and that it rests flat.",
            );
        }

        let mut outcome = CheckOutcome::Success;

        if levels.accel_asymmetry > self.symmetry_tolerance
            || levels.gyro_asymmetry > self.symmetry_tolerance
        {
            let deviation = levels.accel_asymmetry.max(levels.gyro_asymmetry) * 100.0;
            outcome = CheckOutcome::warning(format!(
                "X and Y axes differ by {:.2} percent. Check that accelerometer is flat.",
                deviation
            ));
        }

        // Noise is judged against the accelerometer range for all six channels.
        if stats
            .std_dev
            .iter()
            .any(|sd| sd / levels.accel_range > self.noise_tolerance)
        {
            outcome = CheckOutcome::warning("Accelerometer/Gyro data is noisy. Check circuit.");
        }

        outcome
    }
}
