//! Sensor service and listener traits.

use std::sync::Arc;

use crate::sensor::types::{Accuracy, RawReading, SamplingRate, SensorKind};

/// Opaque reference to a concrete sensor exposed by the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorHandle {
    /// Platform-assigned identifier
    pub id: u32,
    /// What the sensor measures
    pub kind: SensorKind,
    /// Human-readable sensor name
    pub name: String,
}

impl SensorHandle {
    pub fn new(id: u32, kind: SensorKind, name: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            name: name.into(),
        }
    }
}

/// Callback surface the platform invokes for a registered listener.
///
/// Callbacks arrive on whatever thread the platform delivers events from;
/// implementations must be safe to call from there.
pub trait SensorEventListener: Send + Sync {
    /// Invoked for every raw reading from a sensor the listener is
    /// registered against.
    fn on_sensor_changed(&self, reading: &RawReading);

    /// Invoked when the platform re-grades a sensor's accuracy.
    fn on_accuracy_changed(&self, sensor: &SensorHandle, accuracy: Accuracy) {
        let _ = (sensor, accuracy);
    }
}

/// The platform sensor service.
///
/// Registration carries no result: the platform owns duplicate-registration
/// semantics, and callers get no error channel for it.
pub trait SensorManager: Send + Sync {
    /// Resolve the default sensor for a kind, if the device has one.
    fn default_sensor(&self, kind: SensorKind) -> Option<SensorHandle>;

    /// Register a listener against a sensor at a sampling-rate hint.
    fn register_listener(
        &self,
        listener: Arc<dyn SensorEventListener>,
        sensor: &SensorHandle,
        rate: SamplingRate,
    );

    /// Remove every registration held by this listener.
    fn unregister_listener(&self, listener: &Arc<dyn SensorEventListener>);
}

/// Listener identity for unregistration, by data pointer.
pub(crate) fn same_listener(
    a: &Arc<dyn SensorEventListener>,
    b: &Arc<dyn SensorEventListener>,
) -> bool {
    Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
}
