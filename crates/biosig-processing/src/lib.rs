//! Biosig-Processing: Per-sample feature extraction for biosignals
//!
//! One streaming algorithm per signal class: EMG envelope following, ECG
//! beat detection with BPM estimation, and EEG notch filtering with
//! alpha-band power estimation. All components process a single sample at a
//! time and carry their own state, so they can run inside the acquisition
//! loop without allocation or blocking.

pub mod band_power;
pub mod beat;
pub mod envelope;
pub mod notch;

pub use band_power::{BandPowerEstimator, BASELINE_ALPHA, POWER_SMOOTHING};
pub use beat::{BeatDetector, DEBOUNCE_PERIOD_MS, ECG_JUMP};
pub use envelope::{EnvelopeDetector, ENVELOPE_DECAY, NOISE_FLOOR};
pub use notch::{NotchDesign, NotchFilter, ALPHA_NOTCH_HZ, NOTCH_Q, SAMPLING_RATE_HZ};
