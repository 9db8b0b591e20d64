//! Rolling buffer of recent raw samples

use std::collections::VecDeque;

/// Maximum number of raw samples retained (about two seconds at the loop's
/// achieved rate)
pub const MAX_BUFFER_SIZE: usize = 500;

/// Fixed-capacity FIFO of raw ADC samples
///
/// The acquisition loop is the only writer; readers take a copying snapshot.
/// Once at capacity the oldest sample is dropped for every new one pushed.
#[derive(Debug, Clone)]
pub struct SampleRing {
    samples: VecDeque<u16>,
    capacity: usize,
}

impl SampleRing {
    /// Create a ring with the given capacity
    pub fn new(capacity: usize) -> Self {
        SampleRing {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a sample, evicting the oldest if the ring is full
    pub fn push(&mut self, sample: u16) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    /// Most recent sample, or 0 if nothing has been recorded yet
    pub fn latest(&self) -> u16 {
        self.samples.back().copied().unwrap_or(0)
    }

    /// Copy of the retained samples, oldest first
    pub fn snapshot(&self) -> Vec<u16> {
        self.samples.iter().copied().collect()
    }

    /// Number of samples currently retained
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the ring is empty
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Fixed capacity of the ring
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for SampleRing {
    fn default() -> Self {
        SampleRing::new(MAX_BUFFER_SIZE)
    }
}
