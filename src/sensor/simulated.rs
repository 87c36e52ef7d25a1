//! In-process sensor service for hosts without a real sensor subsystem.
//!
//! This implementation backs tests, demos and the CLI. It reproduces the
//! platform's delivery semantics: readings fan out to every matching
//! registration, so a listener registered twice hears every reading twice.

use std::sync::{Arc, Mutex};

use crate::sensor::manager::{same_listener, SensorEventListener, SensorHandle, SensorManager};
use crate::sensor::types::{Accuracy, RawReading, SamplingRate, SensorKind};

struct Registration {
    listener: Arc<dyn SensorEventListener>,
    sensor: SensorHandle,
    #[allow(dead_code)]
    rate: SamplingRate,
}

/// A simulated platform sensor service.
pub struct SimulatedSensorManager {
    sensors: Vec<SensorHandle>,
    registrations: Mutex<Vec<Registration>>,
}

impl SimulatedSensorManager {
    /// A device carrying a heart-rate sensor.
    pub fn with_heart_rate() -> Self {
        Self::with_sensors(vec![SensorHandle::new(
            1,
            SensorKind::HeartRate,
            "Simulated Heart Rate Sensor",
        )])
    }

    /// A device with no sensors at all (emulator case).
    pub fn without_sensors() -> Self {
        Self::with_sensors(Vec::new())
    }

    /// A device with an explicit sensor inventory.
    pub fn with_sensors(sensors: Vec<SensorHandle>) -> Self {
        Self {
            sensors,
            registrations: Mutex::new(Vec::new()),
        }
    }

    /// Number of live registrations.
    pub fn registration_count(&self) -> usize {
        self.lock_registrations().len()
    }

    /// Deliver a raw reading to every listener registered against a sensor
    /// of the reading's kind.
    pub fn push_reading(&self, reading: RawReading) {
        let targets: Vec<Arc<dyn SensorEventListener>> = self
            .lock_registrations()
            .iter()
            .filter(|reg| reg.sensor.kind == reading.kind)
            .map(|reg| reg.listener.clone())
            .collect();

        // Deliver outside the lock; listeners may run arbitrary code.
        for listener in targets {
            listener.on_sensor_changed(&reading);
        }
    }

    /// Deliver an accuracy change for a sensor to its listeners.
    pub fn push_accuracy(&self, sensor: &SensorHandle, accuracy: Accuracy) {
        let targets: Vec<Arc<dyn SensorEventListener>> = self
            .lock_registrations()
            .iter()
            .filter(|reg| reg.sensor == *sensor)
            .map(|reg| reg.listener.clone())
            .collect();

        for listener in targets {
            listener.on_accuracy_changed(sensor, accuracy);
        }
    }

    fn lock_registrations(&self) -> std::sync::MutexGuard<'_, Vec<Registration>> {
        self.registrations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SensorManager for SimulatedSensorManager {
    fn default_sensor(&self, kind: SensorKind) -> Option<SensorHandle> {
        self.sensors.iter().find(|s| s.kind == kind).cloned()
    }

    fn register_listener(
        &self,
        listener: Arc<dyn SensorEventListener>,
        sensor: &SensorHandle,
        rate: SamplingRate,
    ) {
        self.lock_registrations().push(Registration {
            listener,
            sensor: sensor.clone(),
            rate,
        });
    }

    fn unregister_listener(&self, listener: &Arc<dyn SensorEventListener>) {
        self.lock_registrations()
            .retain(|reg| !same_listener(&reg.listener, listener));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    struct CountingListener {
        readings: AtomicU64,
        accuracy_changes: AtomicU64,
    }

    impl CountingListener {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                readings: AtomicU64::new(0),
                accuracy_changes: AtomicU64::new(0),
            })
        }
    }

    impl SensorEventListener for CountingListener {
        fn on_sensor_changed(&self, _reading: &RawReading) {
            self.readings.fetch_add(1, Ordering::SeqCst);
        }

        fn on_accuracy_changed(&self, _sensor: &SensorHandle, _accuracy: Accuracy) {
            self.accuracy_changes.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_default_sensor_resolution() {
        let manager = SimulatedSensorManager::with_heart_rate();
        assert!(manager.default_sensor(SensorKind::HeartRate).is_some());
        assert!(manager.default_sensor(SensorKind::Accelerometer).is_none());

        let empty = SimulatedSensorManager::without_sensors();
        assert!(empty.default_sensor(SensorKind::HeartRate).is_none());
    }

    #[test]
    fn test_register_deliver_unregister() {
        let manager = SimulatedSensorManager::with_heart_rate();
        let sensor = manager.default_sensor(SensorKind::HeartRate).unwrap();
        let listener = CountingListener::new();
        let as_dyn: Arc<dyn SensorEventListener> = listener.clone();

        manager.register_listener(as_dyn.clone(), &sensor, SamplingRate::Normal);
        assert_eq!(manager.registration_count(), 1);

        manager.push_reading(RawReading::heart_rate(70.0));
        assert_eq!(listener.readings.load(Ordering::SeqCst), 1);

        manager.unregister_listener(&as_dyn);
        assert_eq!(manager.registration_count(), 0);

        manager.push_reading(RawReading::heart_rate(71.0));
        assert_eq!(listener.readings.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_double_registration_delivers_twice() {
        let manager = SimulatedSensorManager::with_heart_rate();
        let sensor = manager.default_sensor(SensorKind::HeartRate).unwrap();
        let listener = CountingListener::new();
        let as_dyn: Arc<dyn SensorEventListener> = listener.clone();

        manager.register_listener(as_dyn.clone(), &sensor, SamplingRate::Normal);
        manager.register_listener(as_dyn.clone(), &sensor, SamplingRate::Normal);
        manager.push_reading(RawReading::heart_rate(70.0));
        assert_eq!(listener.readings.load(Ordering::SeqCst), 2);

        // Unregistration removes both entries at once.
        manager.unregister_listener(&as_dyn);
        assert_eq!(manager.registration_count(), 0);
    }

    #[test]
    fn test_delivery_routes_by_kind() {
        let manager = SimulatedSensorManager::with_heart_rate();
        let sensor = manager.default_sensor(SensorKind::HeartRate).unwrap();
        let listener = CountingListener::new();
        manager.register_listener(listener.clone(), &sensor, SamplingRate::Normal);

        manager.push_reading(RawReading::new(SensorKind::Accelerometer, vec![1.0]));
        assert_eq!(listener.readings.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_accuracy_delivery() {
        let manager = SimulatedSensorManager::with_heart_rate();
        let sensor = manager.default_sensor(SensorKind::HeartRate).unwrap();
        let listener = CountingListener::new();
        manager.register_listener(listener.clone(), &sensor, SamplingRate::Normal);

        manager.push_accuracy(&sensor, Accuracy::Low);
        assert_eq!(listener.accuracy_changes.load(Ordering::SeqCst), 1);
    }
}
