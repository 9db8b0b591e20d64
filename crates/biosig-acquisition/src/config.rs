//! Acquisition configuration

use biosig_core::{BiosigError, BiosigResult, MAX_BUFFER_SIZE};
use biosig_processing::{
    NotchDesign, ALPHA_NOTCH_HZ, BASELINE_ALPHA, DEBOUNCE_PERIOD_MS, ECG_JUMP, ENVELOPE_DECAY,
    NOISE_FLOOR, NOTCH_Q, POWER_SMOOTHING, SAMPLING_RATE_HZ,
};
use serde::{Deserialize, Serialize};

/// Tuning parameters for the acquisition pipeline
///
/// Defaults reproduce the values the algorithms were tuned with on the
/// acquisition hardware; change them only against a known front-end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcquisitionConfig {
    /// Rolling raw-sample buffer capacity
    pub buffer_capacity: usize,
    /// EMG noise floor in raw ADC counts
    pub noise_floor: i32,
    /// EMG envelope decay per iteration
    pub envelope_decay: i32,
    /// ECG beat jump threshold in raw ADC counts
    pub jump_threshold: i32,
    /// ECG beat debounce period in milliseconds
    pub debounce_ms: u64,
    /// EEG notch center frequency in Hz
    pub notch_freq: f64,
    /// EEG notch quality factor
    pub notch_q: f64,
    /// Sample rate the EEG filter is designed for, in Hz
    pub sampling_rate: f64,
    /// Baseline subtracted from the alpha-band power difference
    pub baseline_alpha: f64,
    /// EMA smoothing factor for the power trackers
    pub power_smoothing: f64,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: MAX_BUFFER_SIZE,
            noise_floor: NOISE_FLOOR,
            envelope_decay: ENVELOPE_DECAY,
            jump_threshold: ECG_JUMP,
            debounce_ms: DEBOUNCE_PERIOD_MS,
            notch_freq: ALPHA_NOTCH_HZ,
            notch_q: NOTCH_Q,
            sampling_rate: SAMPLING_RATE_HZ,
            baseline_alpha: BASELINE_ALPHA,
            power_smoothing: POWER_SMOOTHING,
        }
    }
}

impl AcquisitionConfig {
    /// Validate the configuration
    pub fn validate(&self) -> BiosigResult<()> {
        if self.buffer_capacity == 0 {
            return Err(BiosigError::InvalidConfig {
                reason: "buffer capacity must be at least 1".to_string(),
            });
        }
        if self.envelope_decay < 0 {
            return Err(BiosigError::InvalidConfig {
                reason: "envelope decay cannot be negative".to_string(),
            });
        }
        if !(0.0..1.0).contains(&self.power_smoothing) {
            return Err(BiosigError::InvalidConfig {
                reason: format!(
                    "power smoothing must lie in [0, 1), got {}",
                    self.power_smoothing
                ),
            });
        }

        // The notch parameters must produce a valid design
        NotchDesign::new(self.notch_freq, self.notch_q, self.sampling_rate)?;
        Ok(())
    }

    /// Derive the EEG notch design from the configured parameters
    pub fn notch_design(&self) -> BiosigResult<NotchDesign> {
        NotchDesign::new(self.notch_freq, self.notch_q, self.sampling_rate)
    }
}
