// Sample types shared by calibration, normalization and quality checks

use serde::{Deserialize, Serialize};

use crate::error::CalibrationError;

/// Number of motion channels per reading (3 accelerometer + 3 gyroscope axes)
pub const CHANNEL_COUNT: usize = 6;

/// Default channel labels in stream order
pub const CHANNEL_LABELS: [&str; CHANNEL_COUNT] = ["aX", "aY", "aZ", "gX", "gY", "gZ"];

/// One reading: accelerometer X/Y/Z followed by gyroscope X/Y/Z
pub type ChannelVector = [f64; CHANNEL_COUNT];

/// Ordered readings captured during one calibration pose or one gesture
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SampleBatch {
    rows: Vec<ChannelVector>,
}

impl SampleBatch {
    pub fn new(rows: Vec<ChannelVector>) -> Self {
        Self { rows }
    }

    /// Build a batch from variable-width rows, rejecting any row that does
    /// not carry exactly `CHANNEL_COUNT` values.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, CalibrationError> {
        let mut batch = Vec::with_capacity(rows.len());
        for (index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let vector: ChannelVector =
                row.try_into()
                    .map_err(|_| CalibrationError::ChannelMismatch {
                        index,
                        expected: CHANNEL_COUNT,
                        found: row.len(),
                    })?;
            batch.push(vector);
        }
        Ok(Self::new(batch))
    }

    pub fn push(&mut self, sample: ChannelVector) {
        self.rows.push(sample);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[ChannelVector] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChannelVector> {
        self.rows.iter()
    }
}

impl FromIterator<ChannelVector> for SampleBatch {
    fn from_iter<I: IntoIterator<Item = ChannelVector>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl From<Vec<ChannelVector>> for SampleBatch {
    fn from(rows: Vec<ChannelVector>) -> Self {
        Self::new(rows)
    }
}
