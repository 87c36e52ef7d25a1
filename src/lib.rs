//! Heart-rate sensor bridge.
//!
//! This library bridges a device's heart-rate sensor capability to a named
//! outbound event channel that an application layer can subscribe to. When
//! the device has no heart-rate sensor (emulators, desktop hosts), the
//! bridge falls back to a background loop that emits plausible mock samples
//! so the application keeps receiving data.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       heartrate-bridge                       │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌──────────────┐    ┌──────────────┐    ┌──────────────┐   │
//! │  │ SensorManager│───▶│ SensorBridge │───▶│ EventEmitter │   │
//! │  │  (platform)  │    │  (listener)  │    │ ("HeartRate  │   │
//! │  └──────────────┘    └──────────────┘    │   Update")   │   │
//! │         │                   │            └──────────────┘   │
//! │         ▼                   ▼                    │           │
//! │  ┌──────────────┐    ┌──────────────┐           ▼           │
//! │  │ mock emitter │    │ MetricSynth  │    ┌──────────────┐   │
//! │  │ (no sensor)  │    │ (spO2/stress)│    │  Subscriber  │   │
//! │  └──────────────┘    └──────────────┘    └──────────────┘   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use heartrate_bridge::{
//!     BridgeConfig, EventEmitter, SensorBridge, SimulatedSensorManager,
//! };
//!
//! let config = BridgeConfig::default();
//! let (emitter, subscriber) = EventEmitter::channel(config.channel_capacity);
//! let manager = Arc::new(SimulatedSensorManager::without_sensors());
//! let bridge = SensorBridge::new(manager, emitter, config);
//!
//! bridge.start_monitoring();
//! // Samples arrive on `subscriber` roughly once per second.
//! ```

pub mod bridge;
pub mod config;
pub mod emitter;
pub mod sensor;
pub mod stats;
pub mod synth;

// Re-export key types at crate root for convenience
pub use bridge::{SensorBridge, HEART_RATE_UPDATE, MODULE_NAME};
pub use config::{BridgeConfig, ConfigError};
pub use emitter::{EmitStatus, EventEmitter, EventEnvelope, EventSubscriber};
pub use sensor::{
    Accuracy, HeartRateSample, RawReading, SamplingRate, SensorEventListener, SensorHandle,
    SensorKind, SensorManager, SimulatedSensorManager,
};
pub use stats::{BridgeStats, SharedBridgeStats, StatsSnapshot};
pub use synth::{EntropySource, MetricSynth, SeededEntropy, ThreadEntropy};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_identity_is_stable() {
        // The application layer looks the module up by this name and
        // subscribes to this event; neither string may drift.
        assert_eq!(MODULE_NAME, "HeartRateModule");
        assert_eq!(HEART_RATE_UPDATE, "HeartRateUpdate");
    }
}
