//! EEG alpha-band power estimation
//!
//! Two one-pole exponential moving averages track the rectified deviation of
//! the raw and the notch-filtered signal from the ADC midpoint. The power
//! removed by the notch approximates the power concentrated in the alpha
//! band, so their difference, less an empirical baseline, is the alpha-band
//! power estimate.

use biosig_core::ADC_MIDPOINT;

/// Empirical baseline subtracted from the band-power difference
pub const BASELINE_ALPHA: f64 = 20.0;

/// One-pole EMA smoothing factor for the power trackers
pub const POWER_SMOOTHING: f64 = 0.99;

/// Band-power tracker pairing raw and notched signal power
#[derive(Debug, Clone)]
pub struct BandPowerEstimator {
    midpoint: f64,
    baseline: f64,
    smoothing: f64,
    signal_power: f64,
    notched_power: f64,
    alpha_power: f64,
}

impl BandPowerEstimator {
    /// Create an estimator with explicit baseline and smoothing factor
    pub fn new(baseline: f64, smoothing: f64) -> Self {
        BandPowerEstimator {
            midpoint: f64::from(ADC_MIDPOINT),
            baseline,
            smoothing,
            signal_power: 0.0,
            notched_power: 0.0,
            alpha_power: 0.0,
        }
    }

    /// Fold one raw/filtered sample pair in and return the alpha power
    pub fn update(&mut self, raw: u16, filtered: i32) -> f64 {
        let blend = 1.0 - self.smoothing;
        self.signal_power = self.smoothing * self.signal_power
            + blend * (f64::from(raw) - self.midpoint).abs();
        self.notched_power = self.smoothing * self.notched_power
            + blend * (f64::from(filtered) - self.midpoint).abs();

        self.alpha_power = (self.signal_power - self.notched_power - self.baseline).max(0.0);
        self.alpha_power
    }

    /// Smoothed total signal power around the midpoint
    pub fn signal_power(&self) -> f64 {
        self.signal_power
    }

    /// Smoothed power of the notch-filtered signal
    pub fn notched_power(&self) -> f64 {
        self.notched_power
    }

    /// Current alpha-band power estimate
    pub fn alpha_power(&self) -> f64 {
        self.alpha_power
    }
}

impl Default for BandPowerEstimator {
    fn default() -> Self {
        BandPowerEstimator::new(BASELINE_ALPHA, POWER_SMOOTHING)
    }
}
