//! Heart-rate bridge CLI.
//!
//! Runs the bridge against the simulated platform sensor service and prints
//! every `HeartRateUpdate` event it emits.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use heartrate_bridge::{
    BridgeConfig, EventEmitter, HeartRateSample, MetricSynth, RawReading, SensorBridge,
    SensorKind, SensorManager, SimulatedSensorManager, HEART_RATE_UPDATE, MODULE_NAME, VERSION,
};

#[derive(Parser)]
#[command(name = "heartrate-bridge")]
#[command(version = VERSION)]
#[command(about = "Heart-rate sensor bridge with a mock fallback emitter", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bridge and print emitted events
    Monitor {
        /// Simulate a device that has a heart-rate sensor
        #[arg(long)]
        simulate_sensor: bool,

        /// Seed the synthetic metrics for a reproducible stream
        #[arg(long)]
        seed: Option<u64>,

        /// Mock emitter cadence in milliseconds
        #[arg(long)]
        interval_ms: Option<u64>,

        /// Stop after this many seconds (runs until Ctrl+C if omitted)
        #[arg(long)]
        duration_secs: Option<u64>,
    },

    /// Report whether a heart-rate capability is present
    Probe {
        /// Simulate a device that has a heart-rate sensor
        #[arg(long)]
        simulate_sensor: bool,
    },

    /// Show the effective configuration
    Config,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Monitor {
            simulate_sensor,
            seed,
            interval_ms,
            duration_secs,
        } => cmd_monitor(simulate_sensor, seed, interval_ms, duration_secs),
        Commands::Probe { simulate_sensor } => cmd_probe(simulate_sensor),
        Commands::Config => cmd_config(),
    }
}

fn cmd_monitor(
    simulate_sensor: bool,
    seed: Option<u64>,
    interval_ms: Option<u64>,
    duration_secs: Option<u64>,
) {
    println!("heartrate-bridge v{VERSION}");
    println!();

    let mut config = load_config();
    if let Some(ms) = interval_ms {
        config.mock_interval_ms = ms;
    }

    let manager = if simulate_sensor {
        Arc::new(SimulatedSensorManager::with_heart_rate())
    } else {
        Arc::new(SimulatedSensorManager::without_sensors())
    };

    let (emitter, subscriber) = EventEmitter::channel(config.channel_capacity);
    let bridge = match seed {
        Some(seed) => SensorBridge::with_synth(
            manager.clone() as Arc<dyn SensorManager>,
            emitter,
            config.clone(),
            MetricSynth::seeded(seed),
        ),
        None => SensorBridge::new(manager.clone() as Arc<dyn SensorManager>, emitter, config.clone()),
    };

    println!("Module: {}", bridge.name());
    println!("Device: {}", config.device_id);
    println!(
        "Sensor: {}",
        if bridge.has_sensor() {
            "present"
        } else {
            "absent (mock fallback)"
        }
    );
    println!();

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    }) {
        eprintln!("Error setting Ctrl+C handler: {e}");
        std::process::exit(1);
    }

    bridge.start_monitoring();

    // With a simulated sensor present, nothing would drive the real path;
    // feed plausible readings through the platform at the mock cadence.
    if simulate_sensor {
        let feeder_manager = manager.clone();
        let feeder_running = running.clone();
        let interval = config.mock_interval();
        thread::spawn(move || {
            use rand::Rng;
            let mut rng = rand::thread_rng();
            let mut bpm = 72.0_f32;
            while feeder_running.load(Ordering::SeqCst) {
                thread::sleep(interval);
                // Random walk around a resting rate.
                bpm = (bpm + rng.gen_range(-2.0..=2.0)).clamp(55.0, 110.0);
                feeder_manager.push_reading(RawReading::heart_rate(bpm));
            }
        });
    }

    println!("Listening for {HEART_RATE_UPDATE} events (Ctrl+C to stop)...");
    println!();

    let started = Instant::now();
    let mut event_count = 0u64;
    while running.load(Ordering::SeqCst) {
        if let Some(limit) = duration_secs {
            if started.elapsed() >= Duration::from_secs(limit) {
                break;
            }
        }

        let Some(envelope) = subscriber.recv_timeout(Duration::from_millis(100)) else {
            continue;
        };

        match serde_json::from_value::<HeartRateSample>(envelope.payload) {
            Ok(sample) => {
                event_count += 1;
                println!(
                    "[{}] {}  heartRate={}  spO2={}  stress={}",
                    Utc::now().format("%H:%M:%S"),
                    envelope.name,
                    sample.heart_rate,
                    sample.sp_o2,
                    sample.stress
                );
            }
            Err(e) => {
                eprintln!("Unexpected payload on {}: {e}", envelope.name);
            }
        }
    }

    println!();
    println!("Stopping monitoring...");
    bridge.stop_monitoring();

    println!();
    println!("{}", bridge.stats().summary());
    println!("Events observed: {event_count}");
}

fn cmd_probe(simulate_sensor: bool) {
    let manager = if simulate_sensor {
        SimulatedSensorManager::with_heart_rate()
    } else {
        SimulatedSensorManager::without_sensors()
    };

    println!("Module identity: {MODULE_NAME}");
    println!("Outbound event:  {HEART_RATE_UPDATE}");

    match manager.default_sensor(SensorKind::HeartRate) {
        Some(sensor) => {
            println!("Heart-rate sensor: present");
            println!("  id:   {}", sensor.id);
            println!("  name: {}", sensor.name);
        }
        None => {
            println!("Heart-rate sensor: absent");
            println!("  startMonitoring falls back to the mock emitter");
        }
    }
}

fn cmd_config() {
    let config = load_config();

    println!("heartrate-bridge configuration");
    println!("==============================");
    println!();
    println!("  Mock interval:    {} ms", config.mock_interval_ms);
    println!("  Channel capacity: {}", config.channel_capacity);
    println!("  Sampling rate:    {:?}", config.sampling_rate);
    println!("  Device ID:        {}", config.device_id);
    println!();
    println!("  Config file: {:?}", BridgeConfig::config_path());
}

fn load_config() -> BridgeConfig {
    match BridgeConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: could not load config, using defaults: {e}");
            BridgeConfig::default()
        }
    }
}
