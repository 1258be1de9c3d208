//! Shared test doubles for the classifier and debounce filter

#![allow(dead_code)]

use gesture_trainer::analysis::{
    ChannelVector, ClassLabel, DebounceFilter, SampleBatch, SequenceClassifier, NULL_CLASS_LABEL,
};

/// Classifier double that records everything pushed into it
#[derive(Debug, Default)]
pub struct MockClassifier {
    pub coefficient: Option<f64>,
    pub coefficient_history: Vec<f64>,
    pub recompute_count: usize,
    pub inputs: Vec<ChannelVector>,
    /// Label returned when the normalized Z reading exceeds 0.5
    pub label_when_raised: ClassLabel,
}

impl MockClassifier {
    pub fn with_label(label: ClassLabel) -> Self {
        Self {
            label_when_raised: label,
            ..Self::default()
        }
    }
}

impl SequenceClassifier for MockClassifier {
    fn predict(&mut self, sample: &ChannelVector) -> ClassLabel {
        self.inputs.push(*sample);
        if sample[2] > 0.5 {
            self.label_when_raised
        } else {
            NULL_CLASS_LABEL
        }
    }

    fn set_rejection_coefficient(&mut self, coefficient: f64) {
        self.coefficient = Some(coefficient);
        self.coefficient_history.push(coefficient);
    }

    fn recompute_rejection_thresholds(&mut self) {
        self.recompute_count += 1;
    }
}

/// Filter double that suppresses a label repeated within `hold` ticks
#[derive(Debug, Default)]
pub struct MockFilter {
    pub timeout_ms: Option<u32>,
    pub hold: u32,
    remaining: u32,
}

impl DebounceFilter for MockFilter {
    fn filter(&mut self, label: ClassLabel) -> ClassLabel {
        if self.remaining > 0 {
            self.remaining -= 1;
            return NULL_CLASS_LABEL;
        }
        if label != NULL_CLASS_LABEL {
            self.remaining = self.hold;
        }
        label
    }

    fn set_timeout_duration(&mut self, timeout_ms: u32) {
        self.timeout_ms = Some(timeout_ms);
    }
}

/// Batch repeating one reading
pub fn constant_batch(reading: ChannelVector, len: usize) -> SampleBatch {
    (0..len).map(|_| reading).collect()
}

/// Batch alternating between `base - spread` and `base + spread` on every channel
pub fn noisy_batch(base: ChannelVector, spread: f64, len: usize) -> SampleBatch {
    (0..len)
        .map(|i| {
            let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
            let mut reading = base;
            for value in reading.iter_mut() {
                *value += sign * spread;
            }
            reading
        })
        .collect()
}

pub const UPRIGHT: ChannelVector = [0.0, 0.0, 1.0, 0.0, 0.0, 1.0];
pub const UPSIDE_DOWN: ChannelVector = [0.0, 0.0, -1.0, 0.0, 0.0, -1.0];
