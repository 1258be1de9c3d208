// Tuning module - operator-adjustable parameters
//
// This module provides two components:
// 1. TunableParameter: a bounded value with a synchronous update callback
// 2. TunableRegistry: the Variability and Timeout parameters wired into a
//    live GesturePipeline

pub mod parameter;
pub mod registry;

pub use parameter::{TunableDescriptor, TunableParameter, TunableValue, UpdateCallback};
pub use registry::{
    TunableRegistry, TIMEOUT, TIMEOUT_MAX_MS, TIMEOUT_MIN_MS, VARIABILITY, VARIABILITY_MAX,
    VARIABILITY_MIN,
};
