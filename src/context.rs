// AppContext: Dependency Injection Container
// Owns the calibration procedure, quality checkers, classification pipeline
// and tunable registry for one training session.

use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::broadcast;

use crate::analysis::classifier::{ClassLabel, DebounceFilter, SequenceClassifier};
use crate::analysis::normalizer::SignalNormalizer;
use crate::analysis::quality::{ClassTrainingMetrics, TrainingMetricsChecker, TrainingSampleChecker};
use crate::analysis::sample::{ChannelVector, SampleBatch};
use crate::calibration::pose::CalibrationPose;
use crate::calibration::procedure::{CalibrationPhase, CalibrationProcedure};
use crate::calibration::profile::CalibrationProfile;
use crate::config::AppConfig;
use crate::error::{
    log_calibration_error, log_tuning_error, CalibrationError, PipelineError, TuningError,
};
use crate::outcome::CheckOutcome;
use crate::pipeline::GesturePipeline;
use crate::report::{OperatorReport, ReportChannel};
use crate::tuning::{TunableDescriptor, TunableRegistry, TIMEOUT, VARIABILITY};

/// AppContext: Dependency injection container for all session state
///
/// Replaces process-wide globals with one explicitly owned object:
/// - CalibrationProcedure behind an RwLock (one writer, many readers)
/// - Training sample and training metrics checkers
/// - Classifier + debounce filter pipeline
/// - Tunable registry wired to the pipeline stages
/// - Operator report broadcast channel
///
/// Lock failures are mapped to typed errors, never unwrapped.
pub struct AppContext<C, F> {
    config: AppConfig,
    calibration: Arc<RwLock<CalibrationProcedure>>,
    sample_checker: TrainingSampleChecker,
    metrics_checker: TrainingMetricsChecker,
    pipeline: GesturePipeline<C, F>,
    tunables: Mutex<TunableRegistry>,
    reports: ReportChannel,
}

impl<C, F> AppContext<C, F>
where
    C: SequenceClassifier + 'static,
    F: DebounceFilter + 'static,
{
    /// Create a context around the given classifier and filter
    ///
    /// The initial tunable values from `config` are pushed into both stages
    /// before this returns.
    ///
    /// # Arguments
    /// * `config` - Application configuration (tolerances, tuning defaults)
    /// * `classifier` - Sequence classifier that receives normalized readings
    /// * `filter` - Debounce filter applied to the classifier output
    ///
    /// # Returns
    /// * `Ok(AppContext)` - Ready to calibrate
    /// * `Err(TuningError)` - A stage could not accept its initial value
    pub fn new(config: AppConfig, classifier: C, filter: F) -> Result<Self, TuningError> {
        let pipeline = GesturePipeline::new(classifier, filter);
        let mut tunables = TunableRegistry::attach(&pipeline, &config.tuning);
        tunables.sync().map_err(|err| {
            log_tuning_error(&err, "AppContext::new");
            err
        })?;

        tracing::info!(
            "[AppContext] Initialized: variability={}, timeout={} ms",
            tunables.variability(),
            tunables.timeout_ms()
        );

        Ok(Self {
            calibration: Arc::new(RwLock::new(CalibrationProcedure::new(&config.calibration))),
            sample_checker: TrainingSampleChecker::new(&config.quality),
            metrics_checker: TrainingMetricsChecker::new(&config.quality),
            pipeline,
            tunables: Mutex::new(tunables),
            reports: ReportChannel::new(),
            config,
        })
    }

    /// Create a context with default configuration
    pub fn with_defaults(classifier: C, filter: F) -> Result<Self, TuningError> {
        Self::new(AppConfig::default(), classifier, filter)
    }

    // ========================================================================
    // LOCK HELPER METHODS
    // Safe lock acquisition with typed error handling (no unwrap/expect)
    // ========================================================================

    /// Safely acquire read lock on the calibration procedure
    fn read_calibration(&self) -> Result<RwLockReadGuard<'_, CalibrationProcedure>, CalibrationError> {
        self.calibration
            .read()
            .map_err(|_| CalibrationError::StatePoisoned)
    }

    /// Safely acquire write lock on the calibration procedure
    fn write_calibration(
        &self,
    ) -> Result<RwLockWriteGuard<'_, CalibrationProcedure>, CalibrationError> {
        self.calibration
            .write()
            .map_err(|_| CalibrationError::StatePoisoned)
    }

    /// Safely acquire lock on the tunable registry
    fn lock_tunables(&self) -> Result<MutexGuard<'_, TunableRegistry>, TuningError> {
        self.tunables
            .lock()
            .map_err(|_| TuningError::CollaboratorUnavailable {
                component: "tunable_registry".to_string(),
                reason: "lock poisoned".to_string(),
            })
    }

    // ========================================================================
    // BUSINESS LOGIC METHODS - CALIBRATION
    // ========================================================================

    /// Deliver the reference batch for one pose
    ///
    /// # Arguments
    /// * `pose` - Orientation the batch was captured in
    /// * `batch` - Readings captured while the sensor rested in that pose
    ///
    /// # Returns
    /// * `Ok(CheckOutcome)` - Outcome of the round, also published as a report
    /// * `Err(CalibrationError)` - Empty batch or poisoned state
    pub fn collect_pose(
        &self,
        pose: CalibrationPose,
        batch: SampleBatch,
    ) -> Result<CheckOutcome, CalibrationError> {
        let (outcome, calibrated) = {
            let mut procedure = self.write_calibration().map_err(|err| {
                log_calibration_error(&err, "collect_pose");
                err
            })?;
            let outcome = procedure.submit(pose, batch).map_err(|err| {
                log_calibration_error(&err, "collect_pose");
                err
            })?;
            (outcome, procedure.is_complete())
        };

        self.reports.publish(OperatorReport::Calibration {
            pose,
            outcome: outcome.clone(),
            calibrated,
        });
        Ok(outcome)
    }

    /// Current phase of the calibration workflow
    pub fn calibration_phase(&self) -> Result<CalibrationPhase, CalibrationError> {
        Ok(self.read_calibration()?.phase())
    }

    /// Current calibration profile, `None` until both poses are collected
    pub fn calibration_profile(&self) -> Result<Option<CalibrationProfile>, CalibrationError> {
        Ok(self.read_calibration()?.profile().copied())
    }

    /// Install a saved profile (see `CalibrationProcedure::restore_profile`)
    pub fn restore_profile(&self, profile: CalibrationProfile) -> Result<(), CalibrationError> {
        self.write_calibration()?.restore_profile(profile).map_err(|err| {
            log_calibration_error(&err, "restore_profile");
            err
        })
    }

    /// Forget both reference poses and the profile
    pub fn reset_calibration(&self) -> Result<(), CalibrationError> {
        self.write_calibration()?.reset();
        tracing::info!("[AppContext] Calibration reset");
        Ok(())
    }

    /// Shared handle to the calibration procedure
    pub fn calibration_handle(&self) -> Arc<RwLock<CalibrationProcedure>> {
        Arc::clone(&self.calibration)
    }

    // ========================================================================
    // BUSINESS LOGIC METHODS - SAMPLE PATH
    // ========================================================================

    /// Normalizer built from the current profile
    ///
    /// # Errors
    /// `CalibrationError::NotCalibrated` before both poses are collected
    pub fn normalizer(&self) -> Result<SignalNormalizer, CalibrationError> {
        self.read_calibration()?.normalizer()
    }

    /// Normalize one raw reading with the current profile
    pub fn normalize(&self, raw: &ChannelVector) -> Result<ChannelVector, CalibrationError> {
        Ok(self.normalizer()?.normalize(raw))
    }

    /// Normalize one raw reading and run it through classifier and filter
    ///
    /// # Returns
    /// * `Ok(ClassLabel)` - Debounced label for this reading
    /// * `Err(PipelineError::Calibration)` - Not calibrated yet
    /// * `Err(PipelineError::StageUnavailable)` - Classifier or filter lock poisoned
    pub fn process_sample(&self, raw: &ChannelVector) -> Result<ClassLabel, PipelineError> {
        let normalized = self.normalize(raw)?;
        self.pipeline.process(&normalized)
    }

    /// Classification pipeline (classifier + debounce filter)
    pub fn pipeline(&self) -> &GesturePipeline<C, F> {
        &self.pipeline
    }

    // ========================================================================
    // BUSINESS LOGIC METHODS - TRAINING QUALITY
    // ========================================================================

    /// Check one recorded training gesture
    ///
    /// Advisory only: the verdict is logged and published, the sample is
    /// never rejected here.
    pub fn check_training_sample(&self, batch: &SampleBatch) -> CheckOutcome {
        let outcome = self.sample_checker.check(batch);
        if let Some(message) = outcome.message() {
            tracing::warn!("[Training] {}", message);
        }
        self.reports.publish(OperatorReport::TrainingSample {
            outcome: outcome.clone(),
        });
        outcome
    }

    /// Check the cross-validation rates of one gesture class
    pub fn check_training_metrics(&self, metrics: &ClassTrainingMetrics) -> CheckOutcome {
        let outcome = self.metrics_checker.check(metrics);
        if let Some(message) = outcome.message() {
            tracing::warn!("[Training] {}", message);
        }
        self.reports.publish(OperatorReport::TrainingMetrics {
            class_label: metrics.class_label,
            outcome: outcome.clone(),
        });
        outcome
    }

    // ========================================================================
    // BUSINESS LOGIC METHODS - TUNABLES
    // ========================================================================

    /// Set a tunable by name (case-insensitive)
    ///
    /// # Returns
    /// * `Ok(())` - Value stored and pushed into its pipeline stage
    /// * `Err(TuningError)` - Rejected; the previous value is still in effect
    pub fn set_tunable(&self, name: &str, value: f64) -> Result<(), TuningError> {
        let result = self.lock_tunables()?.set_by_name(name, value);
        self.report_change(name, value, result)
    }

    pub fn set_variability(&self, coefficient: f64) -> Result<(), TuningError> {
        let result = self.lock_tunables()?.set_variability(coefficient);
        self.report_change(VARIABILITY, coefficient, result)
    }

    pub fn set_timeout(&self, timeout_ms: u32) -> Result<(), TuningError> {
        let result = self.lock_tunables()?.set_timeout(timeout_ms);
        self.report_change(TIMEOUT, f64::from(timeout_ms), result)
    }

    /// Snapshot of every tunable for display
    pub fn tunables(&self) -> Result<Vec<TunableDescriptor>, TuningError> {
        Ok(self.lock_tunables()?.descriptors())
    }

    /// Subscribe to operator reports
    pub fn subscribe_reports(&self) -> broadcast::Receiver<OperatorReport> {
        self.reports.subscribe()
    }

    /// Configuration the context was built with
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn report_change(
        &self,
        name: &str,
        value: f64,
        result: Result<(), TuningError>,
    ) -> Result<(), TuningError> {
        match &result {
            Ok(()) => {
                self.reports.publish(OperatorReport::ParameterChanged {
                    name: name.to_string(),
                    value,
                });
            }
            Err(err) => {
                log_tuning_error(err, "set_tunable");
                self.reports.publish(OperatorReport::ParameterRejected {
                    name: name.to_string(),
                    value,
                    reason: err.to_string(),
                });
            }
        }
        result
    }
}
