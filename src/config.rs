//! Configuration for the heart-rate bridge.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::sensor::SamplingRate;

/// Main configuration for the bridge and its CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Cadence of the mock emitter in milliseconds
    pub mock_interval_ms: u64,

    /// Capacity of the outbound event channel
    pub channel_capacity: usize,

    /// Sampling-rate hint passed at listener registration
    pub sampling_rate: SamplingRate,

    /// Device identifier reported in diagnostics
    pub device_id: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            mock_interval_ms: 1000,
            channel_capacity: 256,
            sampling_rate: SamplingRate::Normal,
            device_id: detect_device_id(),
        }
    }
}

impl BridgeConfig {
    /// Load configuration from the default location, falling back to
    /// defaults when no file exists.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .map_err(|e| ConfigError::IoError(e.to_string()))?;
            let config: BridgeConfig = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(&config_path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Get the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("heartrate-bridge")
            .join("config.json")
    }

    /// Mock emitter cadence as a [`Duration`].
    pub fn mock_interval(&self) -> Duration {
        Duration::from_millis(self.mock_interval_ms)
    }
}

fn detect_device_id() -> String {
    hostname::get()
        .map(|h| h.to_string_lossy().into_owned())
        .unwrap_or_else(|_| "unknown-device".to_string())
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {e}"),
            ConfigError::ParseError(e) => write!(f, "Parse error: {e}"),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BridgeConfig::default();
        assert_eq!(config.mock_interval_ms, 1000);
        assert_eq!(config.channel_capacity, 256);
        assert_eq!(config.sampling_rate, SamplingRate::Normal);
        assert!(!config.device_id.is_empty());
        assert_eq!(config.mock_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_config_survives_serialization() {
        let config = BridgeConfig {
            mock_interval_ms: 250,
            channel_capacity: 16,
            sampling_rate: SamplingRate::Fastest,
            device_id: "watch-01".to_string(),
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: BridgeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.mock_interval_ms, 250);
        assert_eq!(back.channel_capacity, 16);
        assert_eq!(back.sampling_rate, SamplingRate::Fastest);
        assert_eq!(back.device_id, "watch-01");
    }
}
