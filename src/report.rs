// OperatorReport: events surfaced to whoever is driving a session
//
// Every calibration outcome, quality verdict and parameter change is
// published here so a host UI can show it alongside the log.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::analysis::classifier::ClassLabel;
use crate::calibration::pose::CalibrationPose;
use crate::outcome::CheckOutcome;

/// Buffer size of the report channel; lagging subscribers lose the oldest
pub const REPORT_CHANNEL_CAPACITY: usize = 100;

/// One operator-facing event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OperatorReport {
    /// A reference batch was evaluated
    Calibration {
        pose: CalibrationPose,
        outcome: CheckOutcome,
        /// Whether a usable profile exists after this round
        calibrated: bool,
    },
    /// A recorded training gesture was checked
    TrainingSample { outcome: CheckOutcome },
    /// Cross-validation rates for one class were checked
    TrainingMetrics {
        class_label: ClassLabel,
        outcome: CheckOutcome,
    },
    ParameterChanged { name: String, value: f64 },
    ParameterRejected {
        name: String,
        value: f64,
        reason: String,
    },
}

impl OperatorReport {
    /// Outcome carried by the report, if it is a check result
    pub fn outcome(&self) -> Option<&CheckOutcome> {
        match self {
            OperatorReport::Calibration { outcome, .. }
            | OperatorReport::TrainingSample { outcome }
            | OperatorReport::TrainingMetrics { outcome, .. } => Some(outcome),
            OperatorReport::ParameterChanged { .. } | OperatorReport::ParameterRejected { .. } => {
                None
            }
        }
    }
}

/// Broadcast channel for operator reports
///
/// Publishing never blocks and never fails: with no subscriber the report
/// is simply dropped.
#[derive(Debug, Clone)]
pub struct ReportChannel {
    sender: broadcast::Sender<OperatorReport>,
}

impl Default for ReportChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportChannel {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(REPORT_CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Publish a report to all current subscribers
    ///
    /// # Returns
    /// Number of subscribers that received it
    pub fn publish(&self, report: OperatorReport) -> usize {
        match self.sender.send(report) {
            Ok(receivers) => receivers,
            Err(_) => {
                tracing::trace!("[Reports] No subscribers, report dropped");
                0
            }
        }
    }

    /// Subscribe to reports published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<OperatorReport> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}
