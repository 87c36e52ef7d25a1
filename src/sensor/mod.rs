//! Platform sensor seam.
//!
//! This module defines the capability surface the bridge consumes: sensor
//! kinds and raw readings, the [`SensorManager`] service trait, and the
//! [`SensorEventListener`] callback trait. Hosts without a real sensor
//! subsystem use the [`SimulatedSensorManager`] implementation.

pub mod manager;
pub mod simulated;
pub mod types;

// Re-export commonly used types
pub use manager::{SensorEventListener, SensorHandle, SensorManager};
pub use simulated::SimulatedSensorManager;
pub use types::{Accuracy, HeartRateSample, RawReading, SamplingRate, SensorKind};
