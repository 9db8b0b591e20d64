//! Public acquisition surface: mode selection and polling accessors

use crate::clock::SystemClock;
use crate::config::AcquisitionConfig;
use crate::sampler::Sampler;
use crate::state::SharedState;
use biosig_core::{AnalogFrontend, BiosigResult, EnableLines, MonotonicClock, SignalClass};
use serde::{Deserialize, Serialize};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Acquisition pipeline handle
///
/// Owns the shared state block and the front-end; [`select_mode`] starts the
/// background sampling loop on its first call and only retargets the mode on
/// later ones. All accessors are safe to call before any mode has been
/// selected and return the documented defaults.
///
/// [`select_mode`]: AcquisitionService::select_mode
pub struct AcquisitionService {
    config: AcquisitionConfig,
    state: Arc<SharedState>,
    frontend: Arc<Mutex<Box<dyn AnalogFrontend>>>,
    clock: Arc<dyn MonotonicClock>,
}

/// Snapshot of loop liveness counters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcquisitionStats {
    pub mode: SignalClass,
    pub running: bool,
    pub iterations: u64,
    pub loop_spawns: u32,
}

impl AcquisitionService {
    /// Create a service over a front-end and clock
    pub fn new(
        frontend: impl AnalogFrontend + 'static,
        clock: impl MonotonicClock + 'static,
        config: AcquisitionConfig,
    ) -> BiosigResult<Self> {
        config.validate()?;
        let state = Arc::new(SharedState::new(&config)?);

        Ok(AcquisitionService {
            config,
            state,
            frontend: Arc::new(Mutex::new(Box::new(frontend))),
            clock: Arc::new(clock),
        })
    }

    /// Create a service with the system clock and default tuning
    pub fn with_defaults(frontend: impl AnalogFrontend + 'static) -> BiosigResult<Self> {
        AcquisitionService::new(frontend, SystemClock::new(), AcquisitionConfig::default())
    }

    /// Select the active signal class
    ///
    /// Applies the front-end enable lines, derives and installs the notch
    /// coefficients when entering EEG mode, and spawns the background
    /// sampling task if this is the first call of any kind. Repeated calls
    /// never spawn a second loop and never reset accumulated state.
    pub async fn select_mode(&self, class: SignalClass) -> BiosigResult<()> {
        self.state.mode.store(class.as_u8(), Ordering::Relaxed);
        self.frontend
            .lock()
            .await
            .apply_enable_lines(EnableLines::for_class(class));

        if class == SignalClass::Eeg {
            let design = self.config.notch_design()?;
            self.state.processors.lock().await.notch.set_design(design);
        }

        if !self.state.started.swap(true, Ordering::SeqCst) {
            self.state.loop_spawns.fetch_add(1, Ordering::Relaxed);
            let sampler = Sampler::new(
                Arc::clone(&self.state),
                Arc::clone(&self.frontend),
                Arc::clone(&self.clock),
            );
            tokio::spawn(sampler.run());
            tracing::info!(class = %class, "acquisition loop spawned");
        } else {
            tracing::debug!(class = %class, "acquisition mode updated");
        }

        Ok(())
    }

    /// Most recent raw sample, 0 before any has been read
    pub fn latest_sample(&self) -> u16 {
        self.state.latest.load(Ordering::Relaxed)
    }

    /// Copy of the rolling raw-sample buffer, oldest first
    pub async fn buffer_snapshot(&self) -> Vec<u16> {
        self.state.ring.lock().await.snapshot()
    }

    /// Current EMG envelope magnitude
    pub fn envelope(&self) -> i32 {
        self.state.envelope.load(Ordering::Relaxed)
    }

    /// Current BPM estimate, 0 until three qualifying beats have been seen
    pub fn heart_rate(&self) -> u32 {
        self.state.bpm.load(Ordering::Relaxed)
    }

    /// Current alpha-band power estimate
    pub fn alpha_power(&self) -> f64 {
        f64::from_bits(self.state.alpha_bits.load(Ordering::Relaxed))
    }

    /// Currently selected signal class
    pub fn current_mode(&self) -> SignalClass {
        SignalClass::from_u8(self.state.mode.load(Ordering::Relaxed)).unwrap_or_default()
    }

    /// Whether the background loop has been started
    pub fn is_running(&self) -> bool {
        self.state.started.load(Ordering::SeqCst)
    }

    /// Loop liveness counters
    pub fn stats(&self) -> AcquisitionStats {
        AcquisitionStats {
            mode: self.current_mode(),
            running: self.is_running(),
            iterations: self.state.iterations.load(Ordering::Relaxed),
            loop_spawns: self.state.loop_spawns.load(Ordering::Relaxed),
        }
    }

    /// Active configuration
    pub fn config(&self) -> &AcquisitionConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use biosig_simulation::{ManualClock, ScriptedFrontend, SimConfig, SimFrontend, SignalPattern};

    #[tokio::test]
    async fn test_accessors_default_before_start() {
        let frontend = ScriptedFrontend::new([]);
        let service =
            AcquisitionService::new(frontend, ManualClock::default(), AcquisitionConfig::default())
                .unwrap();

        assert_eq!(service.latest_sample(), 0);
        assert_eq!(service.envelope(), 0);
        assert_eq!(service.heart_rate(), 0);
        assert_eq!(service.alpha_power(), 0.0);
        assert!(service.buffer_snapshot().await.is_empty());
        assert!(!service.is_running());
    }

    #[tokio::test]
    async fn test_select_mode_spawns_exactly_once() {
        let frontend = ScriptedFrontend::new([]);
        let counters = frontend.counters();
        let service =
            AcquisitionService::new(frontend, ManualClock::default(), AcquisitionConfig::default())
                .unwrap();

        service.select_mode(SignalClass::Emg).await.unwrap();
        service.select_mode(SignalClass::Emg).await.unwrap();
        service.select_mode(SignalClass::Ecg).await.unwrap();

        let stats = service.stats();
        assert_eq!(stats.loop_spawns, 1);
        assert!(stats.running);
        assert_eq!(stats.mode, SignalClass::Ecg);

        // Every call re-applies the enable lines
        assert_eq!(counters.line_changes(), 3);
    }

    #[tokio::test]
    async fn test_repeated_select_mode_keeps_accumulated_state() {
        let frontend = ScriptedFrontend::new([]);
        let service =
            AcquisitionService::new(frontend, ManualClock::default(), AcquisitionConfig::default())
                .unwrap();

        // Accumulate three qualifying beats at 500ms spacing before the
        // loop starts; afterwards the front-end idles at the midpoint and
        // the clock stays put, so the loop cannot add further beats
        {
            let mut procs = service.state.processors.lock().await;
            for (sample, at_ms) in [(0, 0), (600, 0), (0, 500), (600, 500), (0, 1000), (600, 1000)]
            {
                procs.beat.process(sample, at_ms);
            }
            assert_eq!(procs.beat.bpm(), 120);
        }

        service.select_mode(SignalClass::Ecg).await.unwrap();
        service.select_mode(SignalClass::Ecg).await.unwrap();

        let procs = service.state.processors.lock().await;
        assert_eq!(procs.beat.bpm(), 120);
        assert_eq!(procs.beat.recorded_beats(), 3);
    }

    #[tokio::test]
    async fn test_loop_fills_buffer_within_capacity() {
        let config = SimConfig {
            pattern: SignalPattern::Rest,
            seed: Some(3),
            ..Default::default()
        };
        let service = AcquisitionService::with_defaults(SimFrontend::new(config).unwrap()).unwrap();

        service.select_mode(SignalClass::Eeg).await.unwrap();
        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

        let snapshot = service.buffer_snapshot().await;
        assert!(!snapshot.is_empty());
        assert!(snapshot.len() <= service.config().buffer_capacity);
        assert!(service.stats().iterations > 0);
    }

    #[tokio::test]
    async fn test_invalid_config_is_rejected() {
        let mut config = AcquisitionConfig::default();
        config.notch_freq = 500.0;

        let result =
            AcquisitionService::new(ScriptedFrontend::new([]), ManualClock::default(), config);
        assert!(result.is_err());
    }
}
