//! Second-order IIR notch filtering for EEG
//!
//! A single biquad section attenuates a narrow band around the alpha-wave
//! frequency. Coefficients come from the standard closed-form notch design;
//! the per-sample difference equation runs on two 2-deep delay lines that
//! keep full precision, while the returned sample is truncated to an
//! integer raw value.

use biosig_core::{BiosigError, BiosigResult};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Acquisition sample rate the EEG filter is designed for, in Hz
pub const SAMPLING_RATE_HZ: f64 = 250.0;

/// Notch center frequency, the alpha-wave band center, in Hz
pub const ALPHA_NOTCH_HZ: f64 = 10.0;

/// Notch quality factor
pub const NOTCH_Q: f64 = 1.0;

/// Biquad notch coefficients `[b0, b1, b2, a1, a2]`
///
/// A pure function of `(Fc, Q, Fs)`; derived once on entry to EEG mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NotchDesign {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub a1: f64,
    pub a2: f64,
}

impl NotchDesign {
    /// Derive notch coefficients for center frequency `fc`, quality factor
    /// `q`, and sample rate `fs`
    pub fn new(fc: f64, q: f64, fs: f64) -> BiosigResult<Self> {
        if fs <= 0.0 {
            return Err(BiosigError::InvalidFilterDesign {
                reason: format!("sample rate must be positive, got {}Hz", fs),
            });
        }
        if fc <= 0.0 || fc >= fs / 2.0 {
            return Err(BiosigError::InvalidFilterDesign {
                reason: format!(
                    "notch frequency {}Hz must lie between 0 and Nyquist ({}Hz)",
                    fc,
                    fs / 2.0
                ),
            });
        }
        if q <= 0.0 {
            return Err(BiosigError::InvalidFilterDesign {
                reason: format!("quality factor must be positive, got {}", q),
            });
        }

        let omega = 2.0 * PI * fc / fs;
        let alpha = omega.sin() / (2.0 * q);
        let cos_omega = omega.cos();

        let a0 = 1.0 + alpha;
        Ok(NotchDesign {
            b0: 1.0 / a0,
            b1: -2.0 * cos_omega / a0,
            b2: 1.0 / a0,
            a1: -2.0 * cos_omega / a0,
            a2: (1.0 - alpha) / a0,
        })
    }
}

/// Single-channel biquad notch filter
#[derive(Debug, Clone)]
pub struct NotchFilter {
    design: NotchDesign,
    // Input and output delay lines: [n-1], [n-2]
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
}

impl NotchFilter {
    /// Create a filter from a coefficient design
    pub fn new(design: NotchDesign) -> Self {
        NotchFilter {
            design,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Install new coefficients, keeping the delay lines as they are
    pub fn set_design(&mut self, design: NotchDesign) {
        self.design = design;
    }

    /// Current coefficient design
    pub fn design(&self) -> &NotchDesign {
        &self.design
    }

    /// Filter one raw sample and return the truncated output
    pub fn filter_sample(&mut self, sample: u16) -> i32 {
        let x = f64::from(sample);
        let d = &self.design;

        // y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2] - a1*y[n-1] - a2*y[n-2]
        let y = d.b0 * x + d.b1 * self.x1 + d.b2 * self.x2 - d.a1 * self.y1 - d.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = x;
        self.y2 = self.y1;
        self.y1 = y;

        // Round toward zero, as the raw signal domain is integer
        y as i32
    }

    /// Clear both delay lines
    pub fn reset(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }
}
