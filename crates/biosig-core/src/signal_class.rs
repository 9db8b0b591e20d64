//! Physiological signal classes

use serde::{Deserialize, Serialize};

/// Signal class selected for acquisition
///
/// Exactly one class is active at a time. Switching takes effect on a later
/// loop iteration; accumulated per-class state is not reset by a switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalClass {
    /// Electromyography (muscle activity)
    Emg,
    /// Electrocardiography (cardiac activity)
    Ecg,
    /// Electroencephalography (brain activity)
    Eeg,
}

impl SignalClass {
    /// Encode for storage in an atomic mode cell
    pub fn as_u8(self) -> u8 {
        match self {
            SignalClass::Emg => 0,
            SignalClass::Ecg => 1,
            SignalClass::Eeg => 2,
        }
    }

    /// Decode from an atomic mode cell
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(SignalClass::Emg),
            1 => Some(SignalClass::Ecg),
            2 => Some(SignalClass::Eeg),
            _ => None,
        }
    }
}

impl Default for SignalClass {
    fn default() -> Self {
        SignalClass::Emg
    }
}

impl std::fmt::Display for SignalClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalClass::Emg => write!(f, "EMG"),
            SignalClass::Ecg => write!(f, "ECG"),
            SignalClass::Eeg => write!(f, "EEG"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u8_round_trip() {
        for class in [SignalClass::Emg, SignalClass::Ecg, SignalClass::Eeg] {
            assert_eq!(SignalClass::from_u8(class.as_u8()), Some(class));
        }
        assert_eq!(SignalClass::from_u8(3), None);
    }

    #[test]
    fn test_default_is_emg() {
        assert_eq!(SignalClass::default(), SignalClass::Emg);
    }
}
