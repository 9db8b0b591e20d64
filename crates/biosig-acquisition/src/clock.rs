//! Monotonic system clock

use biosig_core::MonotonicClock;
use std::time::Instant;

/// Millisecond clock anchored at construction time
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        SystemClock::new()
    }
}

impl MonotonicClock for SystemClock {
    fn now_millis(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_clock_is_monotonic() {
        let clock = SystemClock::new();
        let first = clock.now_millis();
        std::thread::sleep(Duration::from_millis(5));
        let second = clock.now_millis();
        assert!(second >= first + 5);
    }
}
