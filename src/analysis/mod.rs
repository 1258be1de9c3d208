// Analysis module - per-sample and per-batch signal processing
//
// Components:
// - sample: channel layout and the SampleBatch container
// - stats: per-channel mean and population standard deviation
// - normalizer: applies a calibration profile to raw readings
// - quality: advisory checks on recorded training gestures
// - classifier: interfaces of the external classifier and debounce filter
//
// Data flow:
// raw reading → SignalNormalizer → SequenceClassifier → DebounceFilter

pub mod classifier;
pub mod normalizer;
pub mod quality;
pub mod sample;
pub mod stats;

pub use classifier::{ClassLabel, DebounceFilter, SequenceClassifier, NULL_CLASS_LABEL};
pub use normalizer::SignalNormalizer;
pub use quality::{ClassTrainingMetrics, TrainingMetricsChecker, TrainingSampleChecker};
pub use sample::{ChannelVector, SampleBatch, CHANNEL_COUNT, CHANNEL_LABELS};
pub use stats::BatchStatistics;
