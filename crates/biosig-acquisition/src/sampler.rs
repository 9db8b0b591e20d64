//! The per-sample acquisition loop

use crate::state::SharedState;
use biosig_core::{AnalogFrontend, MonotonicClock, SignalClass};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Driver of the background sampling loop
///
/// `step` is one full iteration: busy bracket, analog read, buffer push,
/// dispatch to the active class's extractor, derived-state publish. `run`
/// repeats it forever with a cooperative yield in between; there is no
/// cancellation path, the loop lives as long as the process.
pub(crate) struct Sampler {
    state: Arc<SharedState>,
    frontend: Arc<Mutex<Box<dyn AnalogFrontend>>>,
    clock: Arc<dyn MonotonicClock>,
}

impl Sampler {
    pub fn new(
        state: Arc<SharedState>,
        frontend: Arc<Mutex<Box<dyn AnalogFrontend>>>,
        clock: Arc<dyn MonotonicClock>,
    ) -> Self {
        Sampler {
            state,
            frontend,
            clock,
        }
    }

    /// Run one acquisition iteration
    pub async fn step(&self) {
        let sample = {
            let mut frontend = self.frontend.lock().await;
            frontend.set_busy(true);
            frontend.read_sample()
        };

        self.state.ring.lock().await.push(sample);
        self.state.latest.store(sample, Ordering::Relaxed);

        let mode = SignalClass::from_u8(self.state.mode.load(Ordering::Relaxed))
            .unwrap_or_default();

        {
            let mut procs = self.state.processors.lock().await;
            match mode {
                SignalClass::Emg => {
                    let envelope = procs.envelope.process(sample);
                    self.state.envelope.store(envelope, Ordering::Relaxed);
                    procs.beat.update_reference(sample);
                }
                SignalClass::Ecg => {
                    let bpm = procs.beat.process(sample, self.clock.now_millis());
                    self.state.bpm.store(bpm, Ordering::Relaxed);
                }
                SignalClass::Eeg => {
                    let filtered = procs.notch.filter_sample(sample);
                    let alpha = procs.power.update(sample, filtered);
                    self.state.alpha_bits.store(alpha.to_bits(), Ordering::Relaxed);
                    procs.beat.update_reference(sample);
                }
            }
        }

        self.state.iterations.fetch_add(1, Ordering::Relaxed);
        self.frontend.lock().await.set_busy(false);
    }

    /// Sample forever, yielding cooperatively between iterations
    pub async fn run(self) {
        tracing::debug!("acquisition loop running");
        loop {
            self.step().await;
            tokio::task::yield_now().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AcquisitionConfig;
    use biosig_simulation::{ManualClock, ScriptedFrontend};

    fn sampler_for(
        script: Vec<u16>,
        mode: SignalClass,
    ) -> (Sampler, Arc<SharedState>, ManualClock) {
        let state = Arc::new(SharedState::new(&AcquisitionConfig::default()).unwrap());
        state.mode.store(mode.as_u8(), Ordering::Relaxed);

        let clock = ManualClock::default();
        let frontend: Arc<Mutex<Box<dyn AnalogFrontend>>> =
            Arc::new(Mutex::new(Box::new(ScriptedFrontend::new(script))));
        let sampler = Sampler::new(Arc::clone(&state), frontend, Arc::new(clock.clone()));
        (sampler, state, clock)
    }

    #[tokio::test]
    async fn test_step_records_sample_and_counts() {
        let (sampler, state, _clock) = sampler_for(vec![600, 400], SignalClass::Emg);

        sampler.step().await;
        sampler.step().await;

        assert_eq!(state.latest.load(Ordering::Relaxed), 400);
        assert_eq!(state.iterations.load(Ordering::Relaxed), 2);
        assert_eq!(state.ring.lock().await.snapshot(), vec![600, 400]);
    }

    #[tokio::test]
    async fn test_emg_envelope_follows_burst() {
        let (sampler, state, _clock) = sampler_for(vec![680, 512, 512], SignalClass::Emg);

        sampler.step().await;
        assert_eq!(state.envelope.load(Ordering::Relaxed), 98);

        sampler.step().await;
        sampler.step().await;
        assert_eq!(state.envelope.load(Ordering::Relaxed), 94);
    }

    #[tokio::test]
    async fn test_ecg_bpm_after_three_spaced_beats() {
        // Alternating baseline and spike; the clock advances 500ms per
        // iteration, so every spike clears the debounce window
        let script = vec![0, 600, 0, 600, 0, 600];
        let (sampler, state, clock) = sampler_for(script, SignalClass::Ecg);

        for _ in 0..6 {
            sampler.step().await;
            clock.advance(500);
        }

        // Beats landed at 500, 1500, and 2500 ms
        assert_eq!(state.bpm.load(Ordering::Relaxed), 120_000 / 2000);
    }

    #[tokio::test]
    async fn test_eeg_flat_input_keeps_alpha_at_zero() {
        let (sampler, state, _clock) = sampler_for(vec![512; 200], SignalClass::Eeg);

        for _ in 0..200 {
            sampler.step().await;
        }

        let alpha = f64::from_bits(state.alpha_bits.load(Ordering::Relaxed));
        assert_eq!(alpha, 0.0);
    }

    #[tokio::test]
    async fn test_mode_switch_freezes_other_state() {
        let (sampler, state, _clock) = sampler_for(vec![680, 512, 512], SignalClass::Emg);

        sampler.step().await;
        let held = state.envelope.load(Ordering::Relaxed);
        assert!(held > 0);

        // Switching away from EMG leaves the envelope untouched
        state.mode.store(SignalClass::Eeg.as_u8(), Ordering::Relaxed);
        sampler.step().await;
        sampler.step().await;
        assert_eq!(state.envelope.load(Ordering::Relaxed), held);
    }
}
