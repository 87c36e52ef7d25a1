//! In-memory counters over bridge activity.
//!
//! Samples themselves are never stored; these counters only describe how
//! many passed through the bridge and what happened to them.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Activity counters for one bridge instance.
#[derive(Debug)]
pub struct BridgeStats {
    /// Samples built from real sensor readings
    real_samples: AtomicU64,
    /// Samples built by the mock emitter
    mock_samples: AtomicU64,
    /// Envelopes lost to a full channel
    dropped_events: AtomicU64,
    /// Readings filtered out (wrong kind or no values)
    ignored_readings: AtomicU64,
    /// When this bridge instance was created
    session_start: DateTime<Utc>,
}

impl BridgeStats {
    pub fn new() -> Self {
        Self {
            real_samples: AtomicU64::new(0),
            mock_samples: AtomicU64::new(0),
            dropped_events: AtomicU64::new(0),
            ignored_readings: AtomicU64::new(0),
            session_start: Utc::now(),
        }
    }

    pub fn record_real_sample(&self) {
        self.real_samples.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_mock_sample(&self) {
        self.mock_samples.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dropped_event(&self) {
        self.dropped_events.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_ignored_reading(&self) {
        self.ignored_readings.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the current counter values.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            real_samples: self.real_samples.load(Ordering::Relaxed),
            mock_samples: self.mock_samples.load(Ordering::Relaxed),
            dropped_events: self.dropped_events.load(Ordering::Relaxed),
            ignored_readings: self.ignored_readings.load(Ordering::Relaxed),
            session_start: self.session_start,
            session_duration_secs: (Utc::now() - self.session_start).num_seconds().max(0) as u64,
        }
    }

    /// Get a summary string for display.
    pub fn summary(&self) -> String {
        let stats = self.snapshot();
        format!(
            "Bridge Statistics:\n\
             - Real sensor samples: {}\n\
             - Mock samples: {}\n\
             - Dropped events: {}\n\
             - Ignored readings: {}\n\
             - Session duration: {} seconds",
            stats.real_samples,
            stats.mock_samples,
            stats.dropped_events,
            stats.ignored_readings,
            stats.session_duration_secs
        )
    }
}

impl Default for BridgeStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared handle to bridge statistics.
pub type SharedBridgeStats = Arc<BridgeStats>;

/// Point-in-time view of the counters.
#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    pub real_samples: u64,
    pub mock_samples: u64,
    pub dropped_events: u64,
    pub ignored_readings: u64,
    pub session_start: DateTime<Utc>,
    pub session_duration_secs: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_accumulate() {
        let stats = BridgeStats::new();
        stats.record_real_sample();
        stats.record_real_sample();
        stats.record_mock_sample();
        stats.record_dropped_event();
        stats.record_ignored_reading();

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.real_samples, 2);
        assert_eq!(snapshot.mock_samples, 1);
        assert_eq!(snapshot.dropped_events, 1);
        assert_eq!(snapshot.ignored_readings, 1);
    }

    #[test]
    fn test_summary_mentions_counters() {
        let stats = BridgeStats::new();
        stats.record_mock_sample();
        let summary = stats.summary();
        assert!(summary.contains("Mock samples: 1"));
        assert!(summary.contains("Dropped events: 0"));
    }
}
