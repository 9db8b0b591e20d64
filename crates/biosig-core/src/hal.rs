//! Hardware abstraction for the analog acquisition front-end

use crate::signal_class::SignalClass;
use serde::{Deserialize, Serialize};

/// Highest raw value the 10-bit ADC produces
pub const ADC_MAX: u16 = 1023;

/// ADC midpoint, treated as the DC reference of the analog front-end
pub const ADC_MIDPOINT: u16 = 512;

/// Levels of the two front-end select lines
///
/// The front-end routes and conditions the analog input differently per
/// signal class; the class is encoded on two digital lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnableLines {
    pub select_a: bool,
    pub select_b: bool,
}

impl EnableLines {
    /// Line levels for a signal class
    pub fn for_class(class: SignalClass) -> Self {
        match class {
            SignalClass::Emg => EnableLines {
                select_a: true,
                select_b: true,
            },
            SignalClass::Ecg => EnableLines {
                select_a: false,
                select_b: true,
            },
            SignalClass::Eeg => EnableLines {
                select_a: false,
                select_b: false,
            },
        }
    }
}

/// Analog front-end the acquisition loop samples from
///
/// Reads are assumed synchronous and fast relative to the target cadence;
/// hardware faults are handled below this layer.
pub trait AnalogFrontend: Send {
    /// Current raw sample from the configured analog input
    fn read_sample(&mut self) -> u16;

    /// Drive the front-end select lines for a signal class
    fn apply_enable_lines(&mut self, lines: EnableLines);

    /// Busy indicator bracketing each acquisition iteration
    fn set_busy(&mut self, active: bool);
}

/// Monotonic millisecond clock since some fixed origin
pub trait MonotonicClock: Send + Sync {
    fn now_millis(&self) -> u64;
}
