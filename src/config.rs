//! Configuration management for calibration checks and live tuning
//!
//! This module provides runtime configuration loading from JSON files so the
//! check tolerances and the initial tunable values can be adjusted without
//! recompilation. Missing or invalid files fall back to defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::analysis::sample::{CHANNEL_COUNT, CHANNEL_LABELS};
use crate::tuning::registry::{TIMEOUT_MAX_MS, TIMEOUT_MIN_MS, VARIABILITY_MAX, VARIABILITY_MIN};

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub calibration: CalibrationConfig,
    pub quality: QualityConfig,
    pub tuning: TuningConfig,
    pub stream: StreamConfig,
}

/// Tolerances for reference-pose batches
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    /// Maximum |X - Y| difference relative to the one-G range before warning
    pub symmetry_tolerance: f64,
    /// Maximum per-channel standard deviation relative to the range before warning
    pub noise_tolerance: f64,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            symmetry_tolerance: 0.10,
            noise_tolerance: 0.05,
        }
    }
}

/// Training data quality gates
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    /// Fewer samples than this flags the gesture as too short
    pub min_samples: usize,
    /// Largest channel standard deviation below this flags too little movement
    pub min_movement: f64,
    /// Per-class true positive rate below this triggers a training warning
    pub true_positive_warning_threshold: f64,
    /// Per-class false negative rate above this triggers a training warning
    pub false_negative_warning_threshold: f64,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            min_samples: 10,
            min_movement: 0.10,
            true_positive_warning_threshold: 0.60,
            false_negative_warning_threshold: 0.30,
        }
    }
}

/// Initial values for the live tunables
///
/// Only the starting values are configurable. The bounds are fixed in
/// `tuning::registry`; bound keys in a config file are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuningConfig {
    /// Classifier rejection coefficient
    pub variability: f64,
    /// Post-recognition debounce, milliseconds
    pub timeout_ms: u32,
}

impl Default for TuningConfig {
    fn default() -> Self {
        Self {
            variability: 0.2,
            timeout_ms: 100,
        }
    }
}

impl TuningConfig {
    /// Check that the initial values lie inside the fixed bounds
    pub fn validate(&self) -> Result<(), String> {
        if !(VARIABILITY_MIN..=VARIABILITY_MAX).contains(&self.variability) {
            return Err(format!(
                "variability {} outside [{}, {}]",
                self.variability, VARIABILITY_MIN, VARIABILITY_MAX
            ));
        }
        if !(TIMEOUT_MIN_MS..=TIMEOUT_MAX_MS).contains(&self.timeout_ms) {
            return Err(format!(
                "timeout {} ms outside [{}, {}]",
                self.timeout_ms, TIMEOUT_MIN_MS, TIMEOUT_MAX_MS
            ));
        }
        Ok(())
    }
}

/// Input stream description
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Channel labels in stream order
    pub channel_labels: Vec<String>,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            channel_labels: CHANNEL_LABELS.iter().map(|l| l.to_string()).collect(),
        }
    }
}

impl AppConfig {
    /// Load configuration from JSON file
    ///
    /// # Arguments
    /// * `path` - Path to JSON config file
    ///
    /// # Returns
    /// Loaded configuration; if the file doesn't exist or the JSON is
    /// invalid, the defaults are returned and a warning is logged.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<AppConfig>(&contents) {
                Ok(config) => {
                    tracing::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                    config.validated()
                }
                Err(err) => {
                    tracing::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                tracing::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }

    /// Load configuration from the default location
    pub fn load() -> Self {
        Self::load_from_file("assets/gesture_config.json")
    }

    /// Replace sections that fail validation with their defaults
    pub fn validated(mut self) -> Self {
        if let Err(reason) = self.tuning.validate() {
            tracing::warn!("[Config] Invalid tuning section ({}). Using defaults.", reason);
            self.tuning = TuningConfig::default();
        }
        if self.stream.channel_labels.len() != CHANNEL_COUNT {
            tracing::warn!(
                "[Config] Expected {} channel labels, got {}. Using defaults.",
                CHANNEL_COUNT,
                self.stream.channel_labels.len()
            );
            self.stream = StreamConfig::default();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!(
            "gesture_trainer_{}_{}.json",
            name,
            std::process::id()
        ))
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.calibration.symmetry_tolerance, 0.10);
        assert_eq!(config.calibration.noise_tolerance, 0.05);
        assert_eq!(config.quality.min_samples, 10);
        assert_eq!(config.tuning.variability, 0.2);
        assert_eq!(config.tuning.timeout_ms, 100);
        assert_eq!(config.stream.channel_labels[5], "gZ");
        assert!(config.tuning.validate().is_ok());
    }

    #[test]
    fn test_json_roundtrip() {
        let config = AppConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.tuning, config.tuning);
        assert_eq!(parsed.quality.min_samples, config.quality.min_samples);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let parsed: AppConfig =
            serde_json::from_str(r#"{ "tuning": { "timeout_ms": 250 } }"#).unwrap();
        assert_eq!(parsed.tuning.timeout_ms, 250);
        assert_eq!(parsed.tuning.variability, 0.2);
        assert_eq!(parsed.calibration.noise_tolerance, 0.05);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = AppConfig::load_from_file("/nonexistent/gesture_config.json");
        assert_eq!(config.tuning, TuningConfig::default());
    }

    #[test]
    fn test_invalid_json_uses_defaults() {
        let path = temp_config_path("invalid");
        fs::write(&path, "{ not json").unwrap();
        let config = AppConfig::load_from_file(&path);
        assert_eq!(config.quality.min_samples, 10);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_out_of_bounds_tuning_replaced() {
        let path = temp_config_path("bounds");
        fs::write(&path, r#"{ "tuning": { "variability": 9.0 } }"#).unwrap();
        let config = AppConfig::load_from_file(&path);
        assert_eq!(config.tuning, TuningConfig::default());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_bound_keys_are_ignored() {
        let parsed: AppConfig = serde_json::from_str(
            r#"{ "tuning": { "variability_min": 0.01, "timeout_max_ms": 60000, "timeout_ms": 200 } }"#,
        )
        .unwrap();
        let config = parsed.validated();
        assert_eq!(config.tuning.timeout_ms, 200);
        assert_eq!(config.tuning.variability, 0.2);
    }

    #[test]
    fn test_initial_value_outside_fixed_bounds_replaced() {
        let config = AppConfig {
            tuning: TuningConfig {
                variability: 0.05,
                timeout_ms: 100,
            },
            ..AppConfig::default()
        }
        .validated();
        assert_eq!(config.tuning, TuningConfig::default());

        let config = AppConfig {
            tuning: TuningConfig {
                variability: 0.2,
                timeout_ms: 3001,
            },
            ..AppConfig::default()
        }
        .validated();
        assert_eq!(config.tuning, TuningConfig::default());
    }

    #[test]
    fn test_wrong_label_count_replaced() {
        let config = AppConfig {
            stream: StreamConfig {
                channel_labels: vec!["aX".to_string()],
            },
            ..AppConfig::default()
        }
        .validated();
        assert_eq!(config.stream.channel_labels.len(), CHANNEL_COUNT);
    }
}
