//! ECG beat detection and BPM estimation
//!
//! A rising edge larger than a fixed jump threshold between two consecutive
//! samples is a candidate beat. Candidates within the debounce window of the
//! previous recorded beat are dropped, so a single QRS rising edge is never
//! counted twice. Recorded beat timestamps live in a three-slot sliding
//! window; once the window is full the heart rate is two beats over the
//! window's span, converted to beats per minute.

use std::collections::VecDeque;

/// Minimum sample-to-sample rise treated as a beat candidate, in raw ADC units
pub const ECG_JUMP: i32 = 40;

/// Minimum spacing between recorded beats, in milliseconds
pub const DEBOUNCE_PERIOD_MS: u64 = 300;

/// Number of beat timestamps retained for the BPM estimate
const BEAT_WINDOW: usize = 3;

/// Streaming beat detector over raw ECG samples
#[derive(Debug, Clone)]
pub struct BeatDetector {
    jump_threshold: i32,
    debounce_ms: u64,
    last_sample: i32,
    timestamps: VecDeque<u64>,
    bpm: u32,
}

impl BeatDetector {
    /// Create a detector with explicit jump threshold and debounce period
    pub fn new(jump_threshold: i32, debounce_ms: u64) -> Self {
        BeatDetector {
            jump_threshold,
            debounce_ms,
            last_sample: 0,
            timestamps: VecDeque::with_capacity(BEAT_WINDOW),
            bpm: 0,
        }
    }

    /// Process one raw sample taken at `now_ms` and return the current BPM
    pub fn process(&mut self, sample: u16, now_ms: u64) -> u32 {
        let delta = i32::from(sample) - self.last_sample;
        if delta > self.jump_threshold {
            let debounced = match self.timestamps.back() {
                Some(&last) => now_ms.saturating_sub(last) > self.debounce_ms,
                None => true,
            };
            if debounced {
                self.record_beat(now_ms);
            }
        }
        self.last_sample = i32::from(sample);
        self.bpm
    }

    /// Refresh the delta reference without running detection
    ///
    /// Called on iterations where another signal class is active, so the
    /// first ECG sample after a mode switch sees a current reference.
    pub fn update_reference(&mut self, sample: u16) {
        self.last_sample = i32::from(sample);
    }

    /// Current BPM estimate, 0 until three qualifying beats have been seen
    pub fn bpm(&self) -> u32 {
        self.bpm
    }

    /// Number of beat timestamps currently recorded
    pub fn recorded_beats(&self) -> usize {
        self.timestamps.len()
    }

    fn record_beat(&mut self, now_ms: u64) {
        if self.timestamps.len() == BEAT_WINDOW {
            self.timestamps.pop_front();
        }
        self.timestamps.push_back(now_ms);

        if self.timestamps.len() == BEAT_WINDOW {
            // Two beats span the whole window: 60000 ms/min * 2 beats / span
            let span = self.timestamps[BEAT_WINDOW - 1].saturating_sub(self.timestamps[0]);
            if span > 0 {
                self.bpm = (120_000 / span) as u32;
            }
        }
    }
}

impl Default for BeatDetector {
    fn default() -> Self {
        BeatDetector::new(ECG_JUMP, DEBOUNCE_PERIOD_MS)
    }
}
