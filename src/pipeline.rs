// GesturePipeline - classifier followed by the debounce filter
//
// Both stages are held behind their own Arc<Mutex<_>> so the tunable
// callbacks can keep a typed handle to exactly the stage they adjust.

use std::sync::{Arc, Mutex};

use crate::analysis::classifier::{ClassLabel, DebounceFilter, SequenceClassifier};
use crate::analysis::sample::ChannelVector;
use crate::error::{log_pipeline_error, PipelineError};

fn stage_unavailable(stage: &str) -> PipelineError {
    let err = PipelineError::StageUnavailable {
        stage: stage.to_string(),
    };
    log_pipeline_error(&err, "GesturePipeline::process");
    err
}

/// Normalized readings in, debounced class labels out
pub struct GesturePipeline<C, F> {
    classifier: Arc<Mutex<C>>,
    filter: Arc<Mutex<F>>,
}

impl<C: SequenceClassifier, F: DebounceFilter> GesturePipeline<C, F> {
    pub fn new(classifier: C, filter: F) -> Self {
        Self {
            classifier: Arc::new(Mutex::new(classifier)),
            filter: Arc::new(Mutex::new(filter)),
        }
    }

    /// Run one normalized reading through the classifier and the filter
    ///
    /// # Returns
    /// * `Ok(ClassLabel)` - Debounced label, `NULL_CLASS_LABEL` when nothing is recognized
    /// * `Err(PipelineError::StageUnavailable)` - A stage lock was poisoned
    pub fn process(&self, sample: &ChannelVector) -> Result<ClassLabel, PipelineError> {
        let predicted = self
            .classifier
            .lock()
            .map_err(|_| stage_unavailable("classifier"))?
            .predict(sample);

        let filtered = self
            .filter
            .lock()
            .map_err(|_| stage_unavailable("debounce filter"))?
            .filter(predicted);
        Ok(filtered)
    }

    /// Shared handle to the classifier stage
    pub fn classifier_handle(&self) -> Arc<Mutex<C>> {
        Arc::clone(&self.classifier)
    }

    /// Shared handle to the debounce filter stage
    pub fn filter_handle(&self) -> Arc<Mutex<F>> {
        Arc::clone(&self.filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::classifier::NULL_CLASS_LABEL;

    /// Predicts class 1 whenever accelerometer X exceeds 0.5
    struct ThresholdClassifier;

    impl SequenceClassifier for ThresholdClassifier {
        fn predict(&mut self, sample: &ChannelVector) -> ClassLabel {
            if sample[0] > 0.5 {
                1
            } else {
                NULL_CLASS_LABEL
            }
        }

        fn set_rejection_coefficient(&mut self, _coefficient: f64) {}

        fn recompute_rejection_thresholds(&mut self) {}
    }

    /// Lets a label through once, then suppresses repeats
    #[derive(Default)]
    struct OnceFilter {
        last: ClassLabel,
        timeout_ms: u32,
    }

    impl DebounceFilter for OnceFilter {
        fn filter(&mut self, label: ClassLabel) -> ClassLabel {
            if label == self.last {
                return NULL_CLASS_LABEL;
            }
            self.last = label;
            label
        }

        fn set_timeout_duration(&mut self, timeout_ms: u32) {
            self.timeout_ms = timeout_ms;
        }
    }

    #[test]
    fn test_process_runs_both_stages() {
        let pipeline = GesturePipeline::new(ThresholdClassifier, OnceFilter::default());
        let moving = [0.9, 0.0, 1.0, 0.0, 0.0, 0.0];
        assert_eq!(pipeline.process(&moving), Ok(1));
        assert_eq!(pipeline.process(&moving), Ok(NULL_CLASS_LABEL));
        assert_eq!(pipeline.process(&[0.0; 6]), Ok(NULL_CLASS_LABEL));
    }

    #[test]
    fn test_poisoned_classifier_is_an_error() {
        let pipeline = GesturePipeline::new(ThresholdClassifier, OnceFilter::default());
        let handle = pipeline.classifier_handle();
        let _ = std::thread::spawn(move || {
            let _guard = handle.lock().unwrap();
            panic!("classifier crashed");
        })
        .join();

        assert_eq!(
            pipeline.process(&[0.9, 0.0, 1.0, 0.0, 0.0, 0.0]),
            Err(PipelineError::StageUnavailable {
                stage: "classifier".to_string()
            })
        );
    }

    #[test]
    fn test_poisoned_filter_is_an_error() {
        let pipeline = GesturePipeline::new(ThresholdClassifier, OnceFilter::default());
        let handle = pipeline.filter_handle();
        let _ = std::thread::spawn(move || {
            let _guard = handle.lock().unwrap();
            panic!("filter crashed");
        })
        .join();

        assert!(matches!(
            pipeline.process(&[0.0; 6]),
            Err(PipelineError::StageUnavailable { .. })
        ));
    }

    #[test]
    fn test_filter_handle_reaches_live_filter() {
        let pipeline = GesturePipeline::new(ThresholdClassifier, OnceFilter::default());
        pipeline.filter_handle().lock().unwrap().set_timeout_duration(250);
        assert_eq!(pipeline.filter_handle().lock().unwrap().timeout_ms, 250);
    }
}
