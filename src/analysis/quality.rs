// Training data quality checks
//
// Both checkers are advisory. A warning is shown to the operator, who then
// decides whether to keep the recording; nothing here blocks the trainer.

use crate::analysis::classifier::ClassLabel;
use crate::analysis::sample::SampleBatch;
use crate::analysis::stats::BatchStatistics;
use crate::config::QualityConfig;
use crate::outcome::CheckOutcome;

pub const SHORT_SAMPLE_MESSAGE: &str = "Warning: Sample is short. Did you hold down the key for \
     the whole time you were making the gesture?";

pub const LOW_MOVEMENT_MESSAGE: &str = "Warning: Gesture contains very little movement.";

/// Validates one recorded gesture repetition before it joins the training set
#[derive(Debug, Clone, Copy)]
pub struct TrainingSampleChecker {
    min_samples: usize,
    min_movement: f64,
}

impl Default for TrainingSampleChecker {
    fn default() -> Self {
        Self::new(&QualityConfig::default())
    }
}

impl TrainingSampleChecker {
    pub fn new(config: &QualityConfig) -> Self {
        Self {
            min_samples: config.min_samples,
            min_movement: config.min_movement,
        }
    }

    /// Check a candidate training batch
    ///
    /// Rules, first failure wins:
    /// 1. fewer than `min_samples` readings -> short-sample warning
    /// 2. largest channel standard deviation below `min_movement` -> low-movement warning
    pub fn check(&self, batch: &SampleBatch) -> CheckOutcome {
        if batch.len() < self.min_samples {
            return CheckOutcome::warning(SHORT_SAMPLE_MESSAGE);
        }

        let stats = match BatchStatistics::from_batch(batch) {
            Ok(stats) => stats,
            // Only reachable with min_samples == 0
            Err(_) => return CheckOutcome::warning(SHORT_SAMPLE_MESSAGE),
        };

        if stats.max_std_dev() < self.min_movement {
            return CheckOutcome::warning(LOW_MOVEMENT_MESSAGE);
        }

        CheckOutcome::Success
    }
}

/// Per-class cross-validation rates reported by the trainer
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClassTrainingMetrics {
    pub class_label: ClassLabel,
    /// Fraction of this class's test samples recognized as this class
    pub true_positive_rate: f64,
    /// Fraction of this class's test samples rejected or given another label
    pub false_negative_rate: f64,
}

/// Flags gesture classes the trained model is unlikely to recognize reliably
#[derive(Debug, Clone, Copy)]
pub struct TrainingMetricsChecker {
    true_positive_threshold: f64,
    false_negative_threshold: f64,
}

impl Default for TrainingMetricsChecker {
    fn default() -> Self {
        Self::new(&QualityConfig::default())
    }
}

impl TrainingMetricsChecker {
    pub fn new(config: &QualityConfig) -> Self {
        Self {
            true_positive_threshold: config.true_positive_warning_threshold,
            false_negative_threshold: config.false_negative_warning_threshold,
        }
    }

    pub fn check(&self, metrics: &ClassTrainingMetrics) -> CheckOutcome {
        if metrics.true_positive_rate < self.true_positive_threshold {
            return CheckOutcome::warning(format!(
                "Gesture {} is only recognized {:.0} percent of the time. \
                 Try recording more varied examples.",
                metrics.class_label,
                metrics.true_positive_rate * 100.0
            ));
        }
        if metrics.false_negative_rate > self.false_negative_threshold {
            return CheckOutcome::warning(format!(
                "Gesture {} is missed {:.0} percent of the time. \
                 Try raising Variability or recording more examples.",
                metrics.class_label,
                metrics.false_negative_rate * 100.0
            ));
        }
        CheckOutcome::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Alternates +spread / -spread on every channel, so the population
    /// standard deviation equals `spread` exactly for even lengths
    fn alternating_batch(len: usize, spread: f64) -> SampleBatch {
        (0..len)
            .map(|i| {
                let v = if i % 2 == 0 { spread } else { -spread };
                [v; 6]
            })
            .collect()
    }

    #[test]
    fn test_nine_samples_is_short_regardless_of_variance() {
        let checker = TrainingSampleChecker::default();
        for spread in [0.0, 0.15, 10.0] {
            assert_eq!(
                checker.check(&alternating_batch(9, spread)),
                CheckOutcome::warning(SHORT_SAMPLE_MESSAGE)
            );
        }
    }

    #[test]
    fn test_empty_sample_is_short() {
        let checker = TrainingSampleChecker::default();
        assert_eq!(
            checker.check(&SampleBatch::default()),
            CheckOutcome::warning(SHORT_SAMPLE_MESSAGE)
        );
    }

    #[test]
    fn test_ten_samples_with_movement_succeeds() {
        let checker = TrainingSampleChecker::default();
        assert_eq!(
            checker.check(&alternating_batch(10, 0.15)),
            CheckOutcome::Success
        );
    }

    #[test]
    fn test_still_gesture_flagged() {
        let checker = TrainingSampleChecker::default();
        assert_eq!(
            checker.check(&alternating_batch(40, 0.05)),
            CheckOutcome::warning(LOW_MOVEMENT_MESSAGE)
        );
    }

    #[test]
    fn test_single_moving_channel_is_enough() {
        let checker = TrainingSampleChecker::default();
        let batch: SampleBatch = (0..12)
            .map(|i| {
                let gx = if i % 2 == 0 { 0.5 } else { -0.5 };
                [0.0, 0.0, 1.0, gx, 0.0, 0.0]
            })
            .collect();
        assert_eq!(checker.check(&batch), CheckOutcome::Success);
    }

    #[test]
    fn test_custom_min_samples() {
        let checker = TrainingSampleChecker::new(&QualityConfig {
            min_samples: 4,
            ..QualityConfig::default()
        });
        assert_eq!(checker.check(&alternating_batch(4, 1.0)), CheckOutcome::Success);
    }

    #[test]
    fn test_metrics_low_true_positive() {
        let checker = TrainingMetricsChecker::default();
        let outcome = checker.check(&ClassTrainingMetrics {
            class_label: 2,
            true_positive_rate: 0.5,
            false_negative_rate: 0.1,
        });
        match outcome {
            CheckOutcome::Warning(message) => {
                assert!(message.contains("Gesture 2"));
                assert!(message.contains("50 percent"));
            }
            other => panic!("Expected Warning, got {:?}", other),
        }
    }

    #[test]
    fn test_metrics_high_false_negative() {
        let checker = TrainingMetricsChecker::default();
        let outcome = checker.check(&ClassTrainingMetrics {
            class_label: 1,
            true_positive_rate: 0.65,
            false_negative_rate: 0.35,
        });
        match outcome {
            CheckOutcome::Warning(message) => assert!(message.contains("missed 35 percent")),
            other => panic!("Expected Warning, got {:?}", other),
        }
    }

    #[test]
    fn test_metrics_healthy_class() {
        let checker = TrainingMetricsChecker::default();
        let outcome = checker.check(&ClassTrainingMetrics {
            class_label: 3,
            true_positive_rate: 0.9,
            false_negative_rate: 0.05,
        });
        assert_eq!(outcome, CheckOutcome::Success);
    }
}
