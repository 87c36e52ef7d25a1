//! Demonstration of the heart-rate bridge on both paths.
//!
//! This example shows how to:
//! 1. Probe for the heart-rate capability
//! 2. Start the bridge without a sensor (mock fallback)
//! 3. Start the bridge with a simulated sensor and drive the real path
//! 4. Read emitted `HeartRateUpdate` events from the subscriber
//!
//! Run with: cargo run --example monitor_demo

use std::sync::Arc;
use std::time::Duration;

use heartrate_bridge::{
    BridgeConfig, EventEmitter, EventSubscriber, HeartRateSample, RawReading, SensorBridge,
    SensorKind, SensorManager, SimulatedSensorManager,
};

fn print_events(subscriber: &EventSubscriber, count: usize) {
    let mut seen = 0;
    while seen < count {
        match subscriber.recv_timeout(Duration::from_secs(3)) {
            Some(envelope) => {
                let sample: HeartRateSample =
                    serde_json::from_value(envelope.payload).expect("sample payload");
                seen += 1;
                println!(
                    "  {} #{seen}: heartRate={} spO2={} stress={}",
                    envelope.name, sample.heart_rate, sample.sp_o2, sample.stress
                );
            }
            None => {
                println!("  (no event within 3s, giving up)");
                break;
            }
        }
    }
}

fn main() {
    println!("Heart-Rate Bridge - Monitor Demo");
    println!("================================");
    println!();

    // --- Mock path: a device with no heart-rate sensor -------------------
    let config = BridgeConfig {
        mock_interval_ms: 500,
        ..BridgeConfig::default()
    };

    let manager = Arc::new(SimulatedSensorManager::without_sensors());
    let (emitter, subscriber) = EventEmitter::channel(config.channel_capacity);
    let bridge = SensorBridge::new(manager, emitter, config.clone());

    println!("Module: {}", bridge.name());
    println!("Sensor present: {}", bridge.has_sensor());
    println!();
    println!("Starting mock monitoring (500 ms cadence)...");
    bridge.start_monitoring();
    print_events(&subscriber, 4);

    // stop_monitoring is a no-op on this path; the loop dies with the
    // subscriber when it goes out of scope below.
    bridge.stop_monitoring();
    println!();
    println!("{}", bridge.stats().summary());
    drop(subscriber);
    println!();

    // --- Real path: a simulated device with a heart-rate sensor ----------
    let manager = Arc::new(SimulatedSensorManager::with_heart_rate());
    let (emitter, subscriber) = EventEmitter::channel(config.channel_capacity);
    let bridge = SensorBridge::new(
        manager.clone() as Arc<dyn SensorManager>,
        emitter,
        config.clone(),
    );

    let sensor = manager
        .default_sensor(SensorKind::HeartRate)
        .expect("simulated sensor");
    println!("Sensor present: {} ({})", bridge.has_sensor(), sensor.name);
    println!();
    println!("Starting sensor monitoring and pushing readings...");
    bridge.start_monitoring();

    for bpm in [68.0, 72.4, 75.9, 71.2] {
        manager.push_reading(RawReading::heart_rate(bpm));
    }
    print_events(&subscriber, 4);

    bridge.stop_monitoring();
    manager.push_reading(RawReading::heart_rate(99.0));
    match subscriber.recv_timeout(Duration::from_millis(300)) {
        Some(_) => println!("  unexpected event after stop"),
        None => println!("  no events after stop_monitoring, as expected"),
    }

    println!();
    println!("{}", bridge.stats().summary());
    println!();
    println!("Demo complete!");
}
