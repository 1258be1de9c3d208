// CheckOutcome - verdict returned by calibration rounds and quality checks
//
// Calibration rounds can end in any of the three variants. The training
// sample checker only ever produces Success or Warning.

use std::fmt;

/// Result of checking a calibration batch or a training sample
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum CheckOutcome {
    /// Nothing to report
    Success,
    /// Advisory: the operation went through, the operator should take a look
    Warning(String),
    /// The operation was aborted and must be redone after fixing the setup
    Fault(String),
}

impl CheckOutcome {
    pub fn warning(message: impl Into<String>) -> Self {
        CheckOutcome::Warning(message.into())
    }

    pub fn fault(message: impl Into<String>) -> Self {
        CheckOutcome::Fault(message.into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CheckOutcome::Success)
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, CheckOutcome::Warning(_))
    }

    pub fn is_fault(&self) -> bool {
        matches!(self, CheckOutcome::Fault(_))
    }

    /// Operator-facing message, if any
    pub fn message(&self) -> Option<&str> {
        match self {
            CheckOutcome::Success => None,
            CheckOutcome::Warning(message) | CheckOutcome::Fault(message) => Some(message),
        }
    }
}

impl fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckOutcome::Success => write!(f, "SUCCESS"),
            CheckOutcome::Warning(message) => write!(f, "WARNING: {}", message),
            CheckOutcome::Fault(message) => write!(f, "FAULT: {}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates() {
        assert!(CheckOutcome::Success.is_success());
        assert!(CheckOutcome::warning("noisy").is_warning());
        assert!(CheckOutcome::fault("degenerate").is_fault());
        assert_eq!(CheckOutcome::Success.message(), None);
        assert_eq!(CheckOutcome::warning("noisy").message(), Some("noisy"));
    }

    #[test]
    fn test_display() {
        assert_eq!(CheckOutcome::Success.to_string(), "SUCCESS");
        assert_eq!(CheckOutcome::warning("tilted").to_string(), "WARNING: tilted");
        assert_eq!(CheckOutcome::fault("flat").to_string(), "FAULT: flat");
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_string(&CheckOutcome::warning("tilted")).unwrap();
        assert_eq!(json, r#"{"status":"warning","message":"tilted"}"#);
        let json = serde_json::to_string(&CheckOutcome::Success).unwrap();
        assert_eq!(json, r#"{"status":"success"}"#);
    }
}
