// TunableParameter - bounded value with an update callback

use std::fmt;

use crate::error::TuningError;

/// Called with the new value after it has been stored
pub type UpdateCallback<T> = Box<dyn FnMut(T) -> Result<(), TuningError> + Send>;

/// Numeric types a tunable can hold
pub trait TunableValue: Copy + PartialOrd + fmt::Display + Send + 'static {
    /// Whether only whole numbers are meaningful
    const INTEGER: bool;

    fn to_f64(self) -> f64;

    /// Convert an operator-supplied number, `None` if it cannot be represented
    fn from_f64(value: f64) -> Option<Self>;
}

impl TunableValue for f64 {
    const INTEGER: bool = false;

    fn to_f64(self) -> f64 {
        self
    }

    fn from_f64(value: f64) -> Option<Self> {
        value.is_finite().then_some(value)
    }
}

impl TunableValue for u32 {
    const INTEGER: bool = true;

    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    fn from_f64(value: f64) -> Option<Self> {
        if value.fract() == 0.0 && value >= 0.0 && value <= f64::from(u32::MAX) {
            Some(value as u32)
        } else {
            None
        }
    }
}

/// Serializable view of a parameter for an operator UI
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TunableDescriptor {
    pub name: String,
    pub description: String,
    pub value: f64,
    pub min: f64,
    pub max: f64,
    pub integer: bool,
}

/// A named value with inclusive bounds
///
/// The stored value is the single source of truth; the callback mirrors it
/// into whatever component consumes it.
pub struct TunableParameter<T: TunableValue> {
    name: String,
    description: String,
    value: T,
    min: T,
    max: T,
    on_update: UpdateCallback<T>,
}

impl<T: TunableValue> TunableParameter<T> {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        value: T,
        min: T,
        max: T,
        on_update: UpdateCallback<T>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            value,
            min,
            max,
            on_update,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn value(&self) -> T {
        self.value
    }

    pub fn bounds(&self) -> (T, T) {
        (self.min, self.max)
    }

    /// Store a new value and run the update callback
    ///
    /// # Errors
    /// * `OutOfRange` - value outside `[min, max]`; nothing changes and the
    ///   callback is not invoked
    /// * any error returned by the callback; the previous value is restored
    pub fn set(&mut self, value: T) -> Result<(), TuningError> {
        // Written as a negated range test so NaN is rejected as well
        if !(value >= self.min && value <= self.max) {
            return Err(self.out_of_range(value.to_f64()));
        }

        let previous = self.value;
        self.value = value;
        if let Err(err) = (self.on_update)(value) {
            self.value = previous;
            return Err(err);
        }

        tracing::info!("[Tuning] {} set to {}", self.name, value);
        Ok(())
    }

    /// Set from an operator-supplied number
    ///
    /// Fractional input for an integer parameter is rejected with
    /// `NotAnInteger`; anything outside the bounds with `OutOfRange`.
    pub fn set_f64(&mut self, value: f64) -> Result<(), TuningError> {
        if T::INTEGER && value.is_finite() && value.fract() != 0.0 {
            return Err(TuningError::NotAnInteger {
                name: self.name.clone(),
                value,
            });
        }
        if !(value >= self.min.to_f64() && value <= self.max.to_f64()) {
            return Err(self.out_of_range(value));
        }
        let converted = T::from_f64(value).ok_or_else(|| self.out_of_range(value))?;
        self.set(converted)
    }

    /// Re-run the callback with the stored value
    pub fn resync(&mut self) -> Result<(), TuningError> {
        (self.on_update)(self.value)
    }

    pub fn descriptor(&self) -> TunableDescriptor {
        TunableDescriptor {
            name: self.name.clone(),
            description: self.description.clone(),
            value: self.value.to_f64(),
            min: self.min.to_f64(),
            max: self.max.to_f64(),
            integer: T::INTEGER,
        }
    }

    fn out_of_range(&self, value: f64) -> TuningError {
        TuningError::OutOfRange {
            name: self.name.clone(),
            value,
            min: self.min.to_f64(),
            max: self.max.to_f64(),
        }
    }
}

impl<T: TunableValue + fmt::Debug> fmt::Debug for TunableParameter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TunableParameter")
            .field("name", &self.name)
            .field("value", &self.value)
            .field("min", &self.min)
            .field("max", &self.max)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recording_param(seen: Arc<Mutex<Vec<f64>>>) -> TunableParameter<f64> {
        TunableParameter::new(
            "Gain",
            "Test gain",
            1.0,
            0.5,
            2.0,
            Box::new(move |value: f64| {
                seen.lock().unwrap().push(value);
                Ok(())
            }),
        )
    }

    #[test]
    fn test_set_within_bounds_runs_callback() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut param = recording_param(Arc::clone(&seen));
        param.set(1.5).unwrap();
        assert_eq!(param.value(), 1.5);
        assert_eq!(*seen.lock().unwrap(), vec![1.5]);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut param = recording_param(Arc::clone(&seen));
        param.set(0.5).unwrap();
        param.set(2.0).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![0.5, 2.0]);
    }

    #[test]
    fn test_out_of_range_leaves_value_and_skips_callback() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut param = recording_param(Arc::clone(&seen));
        let err = param.set(2.5).unwrap_err();
        assert_eq!(
            err,
            TuningError::OutOfRange {
                name: "Gain".to_string(),
                value: 2.5,
                min: 0.5,
                max: 2.0
            }
        );
        assert!(param.set(f64::NAN).is_err());
        assert_eq!(param.value(), 1.0);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_callback_failure_restores_previous_value() {
        let mut param = TunableParameter::new(
            "Gain",
            "Test gain",
            1.0,
            0.5,
            2.0,
            Box::new(|_: f64| {
                Err(TuningError::CollaboratorUnavailable {
                    component: "amp".to_string(),
                    reason: "unplugged".to_string(),
                })
            }),
        );
        assert!(param.set(1.5).is_err());
        assert_eq!(param.value(), 1.0);
    }

    #[test]
    fn test_integer_parameter_from_f64() {
        let mut param: TunableParameter<u32> =
            TunableParameter::new("Timeout", "ms", 100, 1, 3000, Box::new(|_: u32| Ok(())));
        param.set_f64(250.0).unwrap();
        assert_eq!(param.value(), 250);

        assert!(matches!(
            param.set_f64(12.5),
            Err(TuningError::NotAnInteger { .. })
        ));
        assert!(matches!(
            param.set_f64(-5.0),
            Err(TuningError::OutOfRange { .. })
        ));
        assert!(matches!(
            param.set_f64(0.0),
            Err(TuningError::OutOfRange { .. })
        ));
        assert_eq!(param.value(), 250);
    }

    #[test]
    fn test_descriptor() {
        let param: TunableParameter<u32> =
            TunableParameter::new("Timeout", "ms", 100, 1, 3000, Box::new(|_: u32| Ok(())));
        let descriptor = param.descriptor();
        assert_eq!(descriptor.name, "Timeout");
        assert_eq!(descriptor.value, 100.0);
        assert_eq!(descriptor.max, 3000.0);
        assert!(descriptor.integer);
    }

    #[test]
    fn test_u32_conversion() {
        assert_eq!(u32::from_f64(3000.0), Some(3000));
        assert_eq!(u32::from_f64(1.5), None);
        assert_eq!(u32::from_f64(-1.0), None);
        assert_eq!(f64::from_f64(f64::INFINITY), None);
    }
}
