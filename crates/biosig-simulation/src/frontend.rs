//! Simulated and scripted analog front-ends

use crate::patterns::SignalPattern;
use biosig_core::{
    AnalogFrontend, BiosigError, BiosigResult, EnableLines, MonotonicClock, ADC_MAX, ADC_MIDPOINT,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

/// Configuration for the simulated front-end
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Waveform pattern to generate
    pub pattern: SignalPattern,
    /// Simulated sample rate in Hz
    pub sampling_rate: f64,
    /// Gaussian noise standard deviation in raw ADC counts
    pub noise_std: f64,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            pattern: SignalPattern::AlphaWave {
                amplitude: 80.0,
                frequency: 10.0,
            },
            sampling_rate: 250.0,
            noise_std: 2.0,
            seed: None,
        }
    }
}

/// Simulated analog front-end generating a noisy synthetic waveform
pub struct SimFrontend {
    config: SimConfig,
    rng: StdRng,
    noise: Normal<f64>,
    time: f64,
    lines: EnableLines,
    busy: bool,
}

impl SimFrontend {
    /// Create a simulated front-end from configuration
    pub fn new(config: SimConfig) -> BiosigResult<Self> {
        if config.sampling_rate <= 0.0 {
            return Err(BiosigError::InvalidConfig {
                reason: format!(
                    "simulated sample rate must be positive, got {}Hz",
                    config.sampling_rate
                ),
            });
        }

        let seed = config.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0)
        });
        let noise =
            Normal::new(0.0, config.noise_std).map_err(|e| BiosigError::InvalidConfig {
                reason: format!("failed to create noise distribution: {}", e),
            })?;

        Ok(SimFrontend {
            config,
            rng: StdRng::seed_from_u64(seed),
            noise,
            time: 0.0,
            lines: EnableLines {
                select_a: false,
                select_b: false,
            },
            busy: false,
        })
    }

    /// Currently applied select-line levels
    pub fn enable_lines(&self) -> EnableLines {
        self.lines
    }

    /// Busy indicator level
    pub fn is_busy(&self) -> bool {
        self.busy
    }
}

impl AnalogFrontend for SimFrontend {
    fn read_sample(&mut self) -> u16 {
        let value = f64::from(ADC_MIDPOINT)
            + self.config.pattern.value_at(self.time)
            + self.noise.sample(&mut self.rng);
        self.time += 1.0 / self.config.sampling_rate;

        value.clamp(0.0, f64::from(ADC_MAX)) as u16
    }

    fn apply_enable_lines(&mut self, lines: EnableLines) {
        self.lines = lines;
    }

    fn set_busy(&mut self, active: bool) {
        self.busy = active;
    }
}

/// Shared side-effect counters for a scripted front-end
///
/// Clones observe the same counters, so tests can keep a handle after the
/// front-end has moved into the acquisition service.
#[derive(Debug, Clone, Default)]
pub struct FrontendCounters {
    inner: Arc<CounterCells>,
}

#[derive(Debug, Default)]
struct CounterCells {
    samples_read: AtomicUsize,
    line_changes: AtomicUsize,
    busy_raises: AtomicUsize,
}

impl FrontendCounters {
    /// Number of analog reads performed
    pub fn samples_read(&self) -> usize {
        self.inner.samples_read.load(Ordering::Relaxed)
    }

    /// Number of enable-line applications
    pub fn line_changes(&self) -> usize {
        self.inner.line_changes.load(Ordering::Relaxed)
    }

    /// Number of busy-line rising edges
    pub fn busy_raises(&self) -> usize {
        self.inner.busy_raises.load(Ordering::Relaxed)
    }
}

/// Deterministic front-end replaying a fixed sample script
///
/// Once the script is exhausted every read returns the ADC midpoint.
pub struct ScriptedFrontend {
    script: VecDeque<u16>,
    counters: FrontendCounters,
}

impl ScriptedFrontend {
    /// Create a scripted front-end from a sample sequence
    pub fn new(samples: impl IntoIterator<Item = u16>) -> Self {
        ScriptedFrontend {
            script: samples.into_iter().collect(),
            counters: FrontendCounters::default(),
        }
    }

    /// Handle onto the side-effect counters
    pub fn counters(&self) -> FrontendCounters {
        self.counters.clone()
    }
}

impl AnalogFrontend for ScriptedFrontend {
    fn read_sample(&mut self) -> u16 {
        self.counters
            .inner
            .samples_read
            .fetch_add(1, Ordering::Relaxed);
        self.script.pop_front().unwrap_or(ADC_MIDPOINT)
    }

    fn apply_enable_lines(&mut self, _lines: EnableLines) {
        self.counters
            .inner
            .line_changes
            .fetch_add(1, Ordering::Relaxed);
    }

    fn set_busy(&mut self, active: bool) {
        if active {
            self.counters
                .inner
                .busy_raises
                .fetch_add(1, Ordering::Relaxed);
        }
    }
}

/// Manually advanced millisecond clock for deterministic tests
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    millis: Arc<AtomicU64>,
}

impl ManualClock {
    /// Set the clock to an absolute millisecond value
    pub fn set(&self, ms: u64) {
        self.millis.store(ms, Ordering::Relaxed);
    }

    /// Advance the clock by `ms` milliseconds
    pub fn advance(&self, ms: u64) {
        self.millis.fetch_add(ms, Ordering::Relaxed);
    }
}

impl MonotonicClock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.millis.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use biosig_core::SignalClass;

    #[test]
    fn test_sim_frontend_stays_in_adc_range() {
        let mut frontend = SimFrontend::new(SimConfig {
            noise_std: 50.0,
            seed: Some(7),
            ..Default::default()
        })
        .unwrap();

        for _ in 0..1000 {
            let sample = frontend.read_sample();
            assert!(sample <= ADC_MAX);
        }
    }

    #[test]
    fn test_sim_frontend_is_reproducible_with_seed() {
        let config = SimConfig {
            seed: Some(42),
            ..Default::default()
        };
        let mut a = SimFrontend::new(config.clone()).unwrap();
        let mut b = SimFrontend::new(config).unwrap();

        for _ in 0..50 {
            assert_eq!(a.read_sample(), b.read_sample());
        }
    }

    #[test]
    fn test_sim_frontend_tracks_lines_and_busy() {
        let mut frontend = SimFrontend::new(SimConfig::default()).unwrap();
        frontend.apply_enable_lines(EnableLines::for_class(SignalClass::Ecg));
        frontend.set_busy(true);

        assert_eq!(
            frontend.enable_lines(),
            EnableLines::for_class(SignalClass::Ecg)
        );
        assert!(frontend.is_busy());
    }

    #[test]
    fn test_scripted_frontend_replays_then_idles() {
        let mut frontend = ScriptedFrontend::new([600, 400]);
        let counters = frontend.counters();

        assert_eq!(frontend.read_sample(), 600);
        assert_eq!(frontend.read_sample(), 400);
        assert_eq!(frontend.read_sample(), ADC_MIDPOINT);
        assert_eq!(counters.samples_read(), 3);
    }

    #[test]
    fn test_scripted_frontend_counts_side_effects() {
        let mut frontend = ScriptedFrontend::new([]);
        let counters = frontend.counters();

        frontend.apply_enable_lines(EnableLines::for_class(SignalClass::Emg));
        frontend.set_busy(true);
        frontend.set_busy(false);
        frontend.set_busy(true);

        assert_eq!(counters.line_changes(), 1);
        assert_eq!(counters.busy_raises(), 2);
    }

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::default();
        assert_eq!(clock.now_millis(), 0);
        clock.advance(500);
        assert_eq!(clock.now_millis(), 500);
        clock.set(1200);
        assert_eq!(clock.now_millis(), 1200);
    }
}
