// Reference poses collected during calibration

use std::fmt;
use std::str::FromStr;

use crate::error::CalibrationError;

/// The two flat-surface orientations used to derive offsets and range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum CalibrationPose {
    /// Sensor resting right-side up; accelerometer Z reads +1 G
    Upright,
    /// Sensor resting upside down; accelerometer Z reads -1 G
    UpsideDown,
}

impl CalibrationPose {
    pub const ALL: [CalibrationPose; 2] = [CalibrationPose::Upright, CalibrationPose::UpsideDown];

    /// Get human-readable name for display
    pub fn display_name(&self) -> &'static str {
        match self {
            CalibrationPose::Upright => "Upright",
            CalibrationPose::UpsideDown => "Upside Down",
        }
    }

    /// Instruction shown to the operator before collecting this pose
    pub fn instructions(&self) -> &'static str {
        match self {
            CalibrationPose::Upright => "Rest accelerometer upright on flat surface.",
            CalibrationPose::UpsideDown => "Rest accelerometer upside down on flat surface.",
        }
    }

    /// The pose that completes calibration after this one
    pub fn other(&self) -> CalibrationPose {
        match self {
            CalibrationPose::Upright => CalibrationPose::UpsideDown,
            CalibrationPose::UpsideDown => CalibrationPose::Upright,
        }
    }
}

impl fmt::Display for CalibrationPose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for CalibrationPose {
    type Err = CalibrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "upright" => Ok(CalibrationPose::Upright),
            "upsidedown" => Ok(CalibrationPose::UpsideDown),
            _ => Err(CalibrationError::UnknownPose {
                label: s.to_string(),
            }),
        }
    }
}
