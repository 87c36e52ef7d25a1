//! Synthetic metric generation.
//!
//! The device's heart-rate sensor only reports beats per minute; the spO2
//! and stress fields of every emitted sample are demo metrics drawn from
//! fixed ranges, and the mock path draws heart rate the same way. The
//! entropy source behind the draws is injectable so tests can pin the
//! stream with a seed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

use crate::sensor::HeartRateSample;

/// Mock heart rate is drawn from `[60, 99]` bpm.
pub const MOCK_HEART_RATE_BASE: i32 = 60;
pub const MOCK_HEART_RATE_SPAN: u32 = 40;

/// Synthetic spO2 is drawn from `[95, 98]` percent.
pub const SP_O2_BASE: i32 = 95;
pub const SP_O2_SPAN: u32 = 4;

/// Synthetic stress is drawn from `[10, 29]`.
pub const STRESS_BASE: i32 = 10;
pub const STRESS_SPAN: u32 = 20;

/// Uniform integer entropy behind the synthetic metrics.
pub trait EntropySource: Send {
    /// Draw uniformly from `[0, bound)`. `bound` is never zero here.
    fn next_below(&mut self, bound: u32) -> u32;
}

/// Production entropy backed by the thread-local RNG.
#[derive(Debug, Default)]
pub struct ThreadEntropy;

impl EntropySource for ThreadEntropy {
    fn next_below(&mut self, bound: u32) -> u32 {
        rand::thread_rng().gen_range(0..bound)
    }
}

/// Deterministic entropy for tests, seeded once.
#[derive(Debug)]
pub struct SeededEntropy(StdRng);

impl SeededEntropy {
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl EntropySource for SeededEntropy {
    fn next_below(&mut self, bound: u32) -> u32 {
        self.0.gen_range(0..bound)
    }
}

/// Draws heart-rate samples and their synthetic companion metrics.
pub struct MetricSynth {
    entropy: Mutex<Box<dyn EntropySource>>,
}

impl MetricSynth {
    /// Synth backed by thread-local entropy.
    pub fn new() -> Self {
        Self::with_entropy(Box::new(ThreadEntropy))
    }

    /// Synth with an explicit entropy source.
    pub fn with_entropy(entropy: Box<dyn EntropySource>) -> Self {
        Self {
            entropy: Mutex::new(entropy),
        }
    }

    /// Synth with a deterministic seed.
    pub fn seeded(seed: u64) -> Self {
        Self::with_entropy(Box::new(SeededEntropy::new(seed)))
    }

    fn draw(&self, base: i32, span: u32) -> i32 {
        let mut entropy = self
            .entropy
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        base + entropy.next_below(span) as i32
    }

    /// Mock beats per minute, `[60, 99]`.
    pub fn mock_heart_rate(&self) -> i32 {
        self.draw(MOCK_HEART_RATE_BASE, MOCK_HEART_RATE_SPAN)
    }

    /// Synthetic spO2 percentage, `[95, 98]`.
    pub fn sp_o2(&self) -> i32 {
        self.draw(SP_O2_BASE, SP_O2_SPAN)
    }

    /// Synthetic stress index, `[10, 29]`.
    pub fn stress(&self) -> i32 {
        self.draw(STRESS_BASE, STRESS_SPAN)
    }

    /// Build a sample around a real (or mocked) bpm reading.
    pub fn sample_from_bpm(&self, bpm: i32) -> HeartRateSample {
        HeartRateSample {
            heart_rate: bpm,
            sp_o2: self.sp_o2(),
            stress: self.stress(),
        }
    }

    /// Build a fully mocked sample.
    pub fn mock_sample(&self) -> HeartRateSample {
        let bpm = self.mock_heart_rate();
        self.sample_from_bpm(bpm)
    }
}

impl Default for MetricSynth {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draws_stay_in_range() {
        let synth = MetricSynth::seeded(7);
        for _ in 0..1000 {
            let sample = synth.mock_sample();
            assert!((60..=99).contains(&sample.heart_rate));
            assert!((95..=98).contains(&sample.sp_o2));
            assert!((10..=29).contains(&sample.stress));
        }
    }

    #[test]
    fn test_thread_entropy_stays_in_range() {
        let synth = MetricSynth::new();
        for _ in 0..200 {
            let sample = synth.mock_sample();
            assert!((60..=99).contains(&sample.heart_rate));
            assert!((95..=98).contains(&sample.sp_o2));
            assert!((10..=29).contains(&sample.stress));
        }
    }

    #[test]
    fn test_same_seed_same_stream() {
        let a = MetricSynth::seeded(42);
        let b = MetricSynth::seeded(42);
        for _ in 0..50 {
            assert_eq!(a.mock_sample(), b.mock_sample());
        }
    }

    #[test]
    fn test_sample_from_bpm_keeps_reading() {
        let synth = MetricSynth::seeded(1);
        let sample = synth.sample_from_bpm(72);
        assert_eq!(sample.heart_rate, 72);
        assert!((95..=98).contains(&sample.sp_o2));
        assert!((10..=29).contains(&sample.stress));
    }
}
