// TunableRegistry - Variability and Timeout wired into a live pipeline
//
// Each callback holds a typed handle to the stage it adjusts, captured when
// the registry is attached, so an update can never land on the wrong stage.

use std::sync::{Arc, Mutex};

use crate::analysis::classifier::{DebounceFilter, SequenceClassifier};
use crate::config::TuningConfig;
use crate::error::TuningError;
use crate::pipeline::GesturePipeline;
use crate::tuning::parameter::{TunableDescriptor, TunableParameter};

pub const VARIABILITY: &str = "Variability";
pub const TIMEOUT: &str = "Timeout";

/// Inclusive bounds of the classifier rejection coefficient
pub const VARIABILITY_MIN: f64 = 0.1;
pub const VARIABILITY_MAX: f64 = 5.0;

/// Inclusive bounds of the debounce timeout, milliseconds
pub const TIMEOUT_MIN_MS: u32 = 1;
pub const TIMEOUT_MAX_MS: u32 = 3000;

const VARIABILITY_DESCRIPTION: &str = "How different from the training data a new gesture can be \
     and still be considered the same gesture. The higher the number, the more different it can be.";

const TIMEOUT_DESCRIPTION: &str = "How long (in milliseconds) to wait after recognizing a \
     gesture before recognizing another one.";

fn unavailable(component: &str) -> TuningError {
    TuningError::CollaboratorUnavailable {
        component: component.to_string(),
        reason: "lock poisoned".to_string(),
    }
}

/// The operator-facing parameters of the recognition chain
#[derive(Debug)]
pub struct TunableRegistry {
    variability: TunableParameter<f64>,
    timeout: TunableParameter<u32>,
}

impl TunableRegistry {
    /// Build the registry for a pipeline
    ///
    /// Values start from `config`; the bounds are always the fixed
    /// constants above. Nothing is pushed into the pipeline until a value
    /// changes or `sync` is called.
    pub fn attach<C, F>(pipeline: &GesturePipeline<C, F>, config: &TuningConfig) -> Self
    where
        C: SequenceClassifier + 'static,
        F: DebounceFilter + 'static,
    {
        let classifier = pipeline.classifier_handle();
        let filter = pipeline.filter_handle();

        Self {
            variability: TunableParameter::new(
                VARIABILITY,
                VARIABILITY_DESCRIPTION,
                config.variability,
                VARIABILITY_MIN,
                VARIABILITY_MAX,
                Box::new(move |coefficient: f64| update_variability(&classifier, coefficient)),
            ),
            timeout: TunableParameter::new(
                TIMEOUT,
                TIMEOUT_DESCRIPTION,
                config.timeout_ms,
                TIMEOUT_MIN_MS,
                TIMEOUT_MAX_MS,
                Box::new(move |timeout_ms: u32| update_timeout(&filter, timeout_ms)),
            ),
        }
    }

    pub fn variability(&self) -> f64 {
        self.variability.value()
    }

    pub fn timeout_ms(&self) -> u32 {
        self.timeout.value()
    }

    pub fn set_variability(&mut self, coefficient: f64) -> Result<(), TuningError> {
        self.variability.set(coefficient)
    }

    pub fn set_timeout(&mut self, timeout_ms: u32) -> Result<(), TuningError> {
        self.timeout.set(timeout_ms)
    }

    /// Set a parameter by its display name (case-insensitive)
    pub fn set_by_name(&mut self, name: &str, value: f64) -> Result<(), TuningError> {
        if name.eq_ignore_ascii_case(VARIABILITY) {
            self.variability.set_f64(value)
        } else if name.eq_ignore_ascii_case(TIMEOUT) {
            self.timeout.set_f64(value)
        } else {
            Err(TuningError::UnknownParameter {
                name: name.to_string(),
            })
        }
    }

    /// Push every stored value into the pipeline
    pub fn sync(&mut self) -> Result<(), TuningError> {
        self.variability.resync()?;
        self.timeout.resync()
    }

    pub fn descriptors(&self) -> Vec<TunableDescriptor> {
        vec![self.variability.descriptor(), self.timeout.descriptor()]
    }
}

fn update_variability<C: SequenceClassifier>(
    classifier: &Arc<Mutex<C>>,
    coefficient: f64,
) -> Result<(), TuningError> {
    let mut classifier = classifier.lock().map_err(|_| unavailable("classifier"))?;
    classifier.set_rejection_coefficient(coefficient);
    // Thresholds are derived from the coefficient and go stale otherwise
    classifier.recompute_rejection_thresholds();
    tracing::debug!("[Tuning] Classifier rejection coefficient -> {}", coefficient);
    Ok(())
}

fn update_timeout<F: DebounceFilter>(
    filter: &Arc<Mutex<F>>,
    timeout_ms: u32,
) -> Result<(), TuningError> {
    let mut filter = filter.lock().map_err(|_| unavailable("debounce filter"))?;
    filter.set_timeout_duration(timeout_ms);
    tracing::debug!("[Tuning] Debounce timeout -> {} ms", timeout_ms);
    Ok(())
}
