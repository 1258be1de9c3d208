// Collaborator interfaces for the recognition chain
//
// The sequence classifier and the post-recognition debounce filter are
// supplied by the host. This crate only drives them: it feeds normalized
// readings in, and pushes the live Variability and Timeout values into
// them whenever an operator changes a tunable.

use crate::analysis::sample::ChannelVector;

/// Gesture class identifier produced by the classifier
pub type ClassLabel = u32;

/// Label meaning "nothing recognized" (rejected or between gestures)
pub const NULL_CLASS_LABEL: ClassLabel = 0;

/// Trainable sequence classifier with a tunable rejection parameter
pub trait SequenceClassifier: Send {
    /// Feed one normalized reading and return the current prediction,
    /// `NULL_CLASS_LABEL` when nothing is recognized
    fn predict(&mut self, sample: &ChannelVector) -> ClassLabel;

    /// Set how far a new gesture may stray from the training data and
    /// still be accepted
    fn set_rejection_coefficient(&mut self, coefficient: f64);

    /// Rebuild the per-class rejection thresholds from the current coefficient
    fn recompute_rejection_thresholds(&mut self);
}

/// Post-processing stage that suppresses repeat recognitions
pub trait DebounceFilter: Send {
    /// Pass a classifier label through, returning what should be emitted
    fn filter(&mut self, label: ClassLabel) -> ClassLabel;

    /// Time to wait after a recognition before another is let through
    fn set_timeout_duration(&mut self, timeout_ms: u32);
}
