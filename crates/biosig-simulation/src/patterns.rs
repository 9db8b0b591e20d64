//! Pre-defined waveform patterns per signal class

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Synthetic signal patterns, expressed as deviation from the ADC midpoint
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum SignalPattern {
    /// Flat baseline
    Rest,
    /// Muscle contraction bursts (on/off cycles) above the noise floor
    EmgBurst {
        amplitude: f64,
        on_secs: f64,
        off_secs: f64,
    },
    /// Periodic sharp spikes resembling QRS rising edges
    EcgTrain { bpm: f64, spike: f64 },
    /// Sinusoidal alpha-band oscillation
    AlphaWave { amplitude: f64, frequency: f64 },
}

impl SignalPattern {
    /// Waveform value at time `t`, relative to the ADC midpoint
    pub fn value_at(&self, t: f64) -> f64 {
        match self {
            SignalPattern::Rest => 0.0,

            SignalPattern::EmgBurst {
                amplitude,
                on_secs,
                off_secs,
            } => {
                let cycle = on_secs + off_secs;
                let phase = t % cycle;
                if phase < *on_secs {
                    *amplitude
                } else {
                    0.0
                }
            }

            SignalPattern::EcgTrain { bpm, spike } => {
                let period = 60.0 / bpm;
                let phase = t % period;
                // 20ms spike at the start of each beat period
                if phase < 0.02 {
                    *spike
                } else {
                    0.0
                }
            }

            SignalPattern::AlphaWave {
                amplitude,
                frequency,
            } => amplitude * (2.0 * PI * frequency * t).sin(),
        }
    }

    /// Get pattern description
    pub fn description(&self) -> &'static str {
        match self {
            SignalPattern::Rest => "Resting baseline",
            SignalPattern::EmgBurst { .. } => "Muscle contraction bursts",
            SignalPattern::EcgTrain { .. } => "Cardiac pulse train",
            SignalPattern::AlphaWave { .. } => "Alpha-band oscillation",
        }
    }
}
