//! Sensor reading and sample types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kinds of sensors the platform can report readings for.
///
/// The bridge only acts on [`SensorKind::HeartRate`]; the other kinds exist
/// because the platform delivers them and the bridge must filter them out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    HeartRate,
    Accelerometer,
    AmbientLight,
    StepCounter,
}

/// Reading accuracy as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accuracy {
    Unreliable,
    Low,
    Medium,
    High,
}

/// Sampling-rate hint passed to the platform at listener registration.
///
/// The platform treats this as a hint, not a contract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingRate {
    #[default]
    Normal,
    Ui,
    Game,
    Fastest,
}

/// A raw reading delivered by the platform to a registered listener.
///
/// For heart-rate sensors the first value carries beats per minute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawReading {
    /// Which sensor produced the reading
    pub kind: SensorKind,
    /// Raw channel values, sensor-specific layout
    pub values: Vec<f32>,
    /// Timestamp when the reading was taken
    pub timestamp: DateTime<Utc>,
}

impl RawReading {
    /// Create a reading for an arbitrary sensor kind.
    pub fn new(kind: SensorKind, values: Vec<f32>) -> Self {
        Self {
            kind,
            values,
            timestamp: Utc::now(),
        }
    }

    /// Create a heart-rate reading with a single bpm value.
    pub fn heart_rate(bpm: f32) -> Self {
        Self::new(SensorKind::HeartRate, vec![bpm])
    }

    /// Extract beats per minute from a heart-rate reading.
    ///
    /// Returns `None` for non-heart-rate kinds and for readings with no
    /// values; both are silently filtered upstream rather than reported.
    /// The raw value is truncated toward zero.
    pub fn bpm(&self) -> Option<i32> {
        if self.kind != SensorKind::HeartRate {
            return None;
        }
        self.values.first().map(|v| *v as i32)
    }
}

/// One emitted heart-rate sample.
///
/// `heart_rate` is real (or mocked) beats per minute; `sp_o2` and `stress`
/// are synthetic demo metrics drawn fresh on every emission. Serializes with
/// the wire keys `heartRate`, `spO2` and `stress`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartRateSample {
    pub heart_rate: i32,
    pub sp_o2: i32,
    pub stress: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bpm_truncates_toward_zero() {
        let reading = RawReading::heart_rate(72.9);
        assert_eq!(reading.bpm(), Some(72));
    }

    #[test]
    fn test_bpm_filters_other_kinds() {
        let reading = RawReading::new(SensorKind::Accelerometer, vec![0.1, 9.8, 0.0]);
        assert_eq!(reading.bpm(), None);
    }

    #[test]
    fn test_bpm_filters_empty_values() {
        let reading = RawReading::new(SensorKind::HeartRate, vec![]);
        assert_eq!(reading.bpm(), None);
    }

    #[test]
    fn test_sample_wire_keys() {
        let sample = HeartRateSample {
            heart_rate: 72,
            sp_o2: 97,
            stress: 15,
        };
        let json = serde_json::to_value(&sample).unwrap();
        assert_eq!(json["heartRate"], 72);
        assert_eq!(json["spO2"], 97);
        assert_eq!(json["stress"], 15);
        assert_eq!(json.as_object().unwrap().len(), 3);
    }
}
