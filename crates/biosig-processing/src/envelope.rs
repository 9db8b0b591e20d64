//! EMG envelope detection
//!
//! Fast-attack, slow-linear-decay rectified envelope follower: the sample is
//! referenced against a fixed noise floor, positive excursions above the
//! current envelope raise it instantaneously (peak hold), and every
//! iteration the envelope decays by a fixed amount down to zero.

/// Empirical noise floor of the acquisition hardware, in raw ADC units
pub const NOISE_FLOOR: i32 = 580;

/// Linear envelope decay per loop iteration
pub const ENVELOPE_DECAY: i32 = 2;

/// Peak-hold envelope follower for muscle activity magnitude
#[derive(Debug, Clone)]
pub struct EnvelopeDetector {
    noise_floor: i32,
    decay: i32,
    value: i32,
}

impl EnvelopeDetector {
    /// Create a detector with explicit noise floor and decay
    pub fn new(noise_floor: i32, decay: i32) -> Self {
        EnvelopeDetector {
            noise_floor,
            decay,
            value: 0,
        }
    }

    /// Process one raw sample and return the updated envelope
    pub fn process(&mut self, sample: u16) -> i32 {
        let rectified = i32::from(sample) - self.noise_floor;
        if rectified > 0 && rectified > self.value {
            self.value = rectified;
        }

        // Linear release runs every iteration, including the attack one
        self.value -= self.decay;
        if self.value < 0 {
            self.value = 0;
        }

        self.value
    }

    /// Current envelope magnitude
    pub fn value(&self) -> i32 {
        self.value
    }
}

impl Default for EnvelopeDetector {
    fn default() -> Self {
        EnvelopeDetector::new(NOISE_FLOOR, ENVELOPE_DECAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attack_and_decay() {
        let mut env = EnvelopeDetector::default();

        // Rising sample above the noise floor attacks instantly, then the
        // per-iteration decay applies
        assert_eq!(env.process(680), 680 - NOISE_FLOOR - ENVELOPE_DECAY);

        // Quiet samples decay by exactly 2 per iteration
        assert_eq!(env.process(512), 96);
        assert_eq!(env.process(512), 94);
    }

    #[test]
    fn test_below_noise_floor_never_attacks() {
        let mut env = EnvelopeDetector::default();
        for _ in 0..10 {
            assert_eq!(env.process(579), 0);
        }
    }

    #[test]
    fn test_clamped_at_zero() {
        let mut env = EnvelopeDetector::default();
        env.process(585); // envelope 3
        assert_eq!(env.process(512), 1);
        assert_eq!(env.process(512), 0);
        assert_eq!(env.process(512), 0);
    }

    #[test]
    fn test_peak_hold_ignores_smaller_peaks() {
        let mut env = EnvelopeDetector::default();
        env.process(700); // envelope 118
        // A smaller excursion does not lower the held peak
        assert_eq!(env.process(650), 116);
    }
}
