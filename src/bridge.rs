//! The sensor bridge.
//!
//! [`SensorBridge`] resolves the device's default heart-rate sensor once at
//! construction. With a sensor present, `start_monitoring` registers a
//! listener with the platform and every heart-rate reading becomes one
//! emitted sample. Without one, `start_monitoring` spawns a detached loop
//! that emits a mocked sample every second.
//!
//! Known behaviors, kept on purpose:
//!
//! - `stop_monitoring` does nothing on the mock path; the loop only ends
//!   when the application context (the subscriber side of the channel) is
//!   torn down.
//! - Calling `start_monitoring` twice with a sensor present registers the
//!   listener twice, and twice without one spawns a second loop. Duplicate
//!   registration is the platform's concern, not the bridge's.

use std::sync::Arc;
use std::thread;

use uuid::Uuid;

use crate::config::BridgeConfig;
use crate::emitter::{EmitStatus, EventEmitter};
use crate::sensor::{
    Accuracy, RawReading, SensorEventListener, SensorHandle, SensorKind, SensorManager,
};
use crate::stats::{BridgeStats, SharedBridgeStats};
use crate::synth::MetricSynth;

/// Module identity the application layer registers and looks up.
pub const MODULE_NAME: &str = "HeartRateModule";

/// Name of the outbound event every sample is emitted under.
pub const HEART_RATE_UPDATE: &str = "HeartRateUpdate";

/// The listener object registered with the platform.
///
/// Split out from the bridge so the platform can hold it as an
/// `Arc<dyn SensorEventListener>` while the bridge keeps ownership of the
/// rest of its state.
struct BridgeListener {
    emitter: EventEmitter,
    synth: Arc<MetricSynth>,
    stats: SharedBridgeStats,
}

impl BridgeListener {
    fn emit_real_sample(&self, bpm: i32) {
        let sample = self.synth.sample_from_bpm(bpm);
        self.stats.record_real_sample();
        match self.emitter.emit(HEART_RATE_UPDATE, &sample) {
            EmitStatus::Delivered => {}
            EmitStatus::Dropped => self.stats.record_dropped_event(),
            EmitStatus::Closed => {
                tracing::debug!("event channel closed; sample not observed");
            }
        }
    }
}

impl SensorEventListener for BridgeListener {
    fn on_sensor_changed(&self, reading: &RawReading) {
        match reading.bpm() {
            Some(bpm) => self.emit_real_sample(bpm),
            // Wrong kind or empty values: filtered, not reported.
            None => self.stats.record_ignored_reading(),
        }
    }

    fn on_accuracy_changed(&self, _sensor: &SensorHandle, _accuracy: Accuracy) {
        // Nothing to do.
    }
}

/// Bridges the platform heart-rate capability to the outbound event channel.
pub struct SensorBridge {
    manager: Arc<dyn SensorManager>,
    /// Resolved once at construction, fixed for the bridge's lifetime
    sensor: Option<SensorHandle>,
    listener: Arc<BridgeListener>,
    emitter: EventEmitter,
    synth: Arc<MetricSynth>,
    stats: SharedBridgeStats,
    config: BridgeConfig,
    instance_id: Uuid,
}

impl SensorBridge {
    /// Create a bridge with thread-local entropy behind the synthetic
    /// metrics.
    pub fn new(
        manager: Arc<dyn SensorManager>,
        emitter: EventEmitter,
        config: BridgeConfig,
    ) -> Self {
        Self::with_synth(manager, emitter, config, MetricSynth::new())
    }

    /// Create a bridge with an explicit metric synth (seeded in tests).
    pub fn with_synth(
        manager: Arc<dyn SensorManager>,
        emitter: EventEmitter,
        config: BridgeConfig,
        synth: MetricSynth,
    ) -> Self {
        let sensor = manager.default_sensor(SensorKind::HeartRate);
        let synth = Arc::new(synth);
        let stats: SharedBridgeStats = Arc::new(BridgeStats::new());
        let listener = Arc::new(BridgeListener {
            emitter: emitter.clone(),
            synth: synth.clone(),
            stats: stats.clone(),
        });

        Self {
            manager,
            sensor,
            listener,
            emitter,
            synth,
            stats,
            config,
            instance_id: Uuid::new_v4(),
        }
    }

    /// Module identity for registration and lookup.
    pub fn name(&self) -> &'static str {
        MODULE_NAME
    }

    /// Whether a heart-rate sensor was resolved at construction.
    pub fn has_sensor(&self) -> bool {
        self.sensor.is_some()
    }

    /// Unique identifier of this bridge instance.
    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    /// Shared handle to the bridge's activity counters.
    pub fn stats(&self) -> SharedBridgeStats {
        self.stats.clone()
    }

    /// Start delivering samples to the event channel.
    ///
    /// No return value and no error: with a sensor present the platform
    /// owns registration semantics; without one the mock loop is spawned
    /// unconditionally.
    pub fn start_monitoring(&self) {
        match &self.sensor {
            Some(sensor) => {
                tracing::debug!(
                    sensor = %sensor.name,
                    rate = ?self.config.sampling_rate,
                    "registering heart-rate listener"
                );
                let listener: Arc<dyn SensorEventListener> = self.listener.clone();
                self.manager
                    .register_listener(listener, sensor, self.config.sampling_rate);
            }
            None => self.spawn_mock_loop(),
        }
    }

    /// Stop delivering samples from the real sensor.
    ///
    /// On the mock path this is a no-op: the loop keeps emitting until the
    /// subscriber side of the channel is gone.
    pub fn stop_monitoring(&self) {
        if self.sensor.is_some() {
            tracing::debug!("unregistering heart-rate listener");
            let listener: Arc<dyn SensorEventListener> = self.listener.clone();
            self.manager.unregister_listener(&listener);
        }
    }

    /// Platform callback for a raw reading.
    ///
    /// Normally invoked on the registered listener by the platform itself;
    /// exposed here so callers driving the bridge directly get the same
    /// filtering and emission.
    pub fn on_sensor_changed(&self, reading: &RawReading) {
        self.listener.on_sensor_changed(reading);
    }

    /// Platform callback for an accuracy change. Accepted, ignored.
    pub fn on_accuracy_changed(&self, sensor: &SensorHandle, accuracy: Accuracy) {
        self.listener.on_accuracy_changed(sensor, accuracy);
    }

    fn spawn_mock_loop(&self) {
        let emitter = self.emitter.clone();
        let synth = self.synth.clone();
        let stats = self.stats.clone();
        let interval = self.config.mock_interval();

        tracing::info!(
            instance = %self.instance_id,
            interval_ms = interval.as_millis() as u64,
            "no heart-rate sensor present; starting mock emitter"
        );

        // The handle is deliberately not retained: nothing the bridge
        // exposes can stop this loop. It exits only when the subscriber
        // side of the channel has been torn down.
        thread::spawn(move || loop {
            thread::sleep(interval);
            let sample = synth.mock_sample();
            stats.record_mock_sample();
            match emitter.emit(HEART_RATE_UPDATE, &sample) {
                EmitStatus::Delivered => {}
                EmitStatus::Dropped => stats.record_dropped_event(),
                EmitStatus::Closed => {
                    tracing::warn!("event channel closed; mock emitter exiting");
                    break;
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::EventEmitter;
    use crate::sensor::SimulatedSensorManager;

    fn test_config() -> BridgeConfig {
        BridgeConfig {
            mock_interval_ms: 20,
            channel_capacity: 64,
            ..BridgeConfig::default()
        }
    }

    #[test]
    fn test_sensor_resolved_once_at_construction() {
        let (emitter, _subscriber) = EventEmitter::channel(8);
        let manager = Arc::new(SimulatedSensorManager::with_heart_rate());
        let bridge = SensorBridge::new(manager, emitter, test_config());
        assert!(bridge.has_sensor());
        assert_eq!(bridge.name(), "HeartRateModule");

        let (emitter, _subscriber) = EventEmitter::channel(8);
        let manager = Arc::new(SimulatedSensorManager::without_sensors());
        let bridge = SensorBridge::new(manager, emitter, test_config());
        assert!(!bridge.has_sensor());
    }

    #[test]
    fn test_direct_callback_filters_and_emits() {
        let (emitter, subscriber) = EventEmitter::channel(8);
        let manager = Arc::new(SimulatedSensorManager::with_heart_rate());
        let bridge =
            SensorBridge::with_synth(manager, emitter, test_config(), MetricSynth::seeded(3));

        bridge.on_sensor_changed(&RawReading::new(SensorKind::Accelerometer, vec![1.0]));
        bridge.on_sensor_changed(&RawReading::new(SensorKind::HeartRate, vec![]));
        assert!(subscriber.try_recv().is_none());
        assert_eq!(bridge.stats().snapshot().ignored_readings, 2);

        bridge.on_sensor_changed(&RawReading::heart_rate(88.4));
        let envelope = subscriber.try_recv().unwrap();
        assert_eq!(envelope.name, HEART_RATE_UPDATE);
        assert_eq!(envelope.payload["heartRate"], 88);
        assert_eq!(bridge.stats().snapshot().real_samples, 1);
    }

    #[test]
    fn test_accuracy_changes_are_ignored() {
        let (emitter, subscriber) = EventEmitter::channel(8);
        let manager = Arc::new(SimulatedSensorManager::with_heart_rate());
        let sensor = manager.default_sensor(SensorKind::HeartRate).unwrap();
        let bridge = SensorBridge::new(manager, emitter, test_config());

        bridge.on_accuracy_changed(&sensor, Accuracy::Unreliable);
        bridge.on_accuracy_changed(&sensor, Accuracy::High);
        assert!(subscriber.try_recv().is_none());
    }
}
