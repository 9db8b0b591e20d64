//! Shared state between the acquisition loop and its pollers

use crate::config::AcquisitionConfig;
use biosig_core::{BiosigResult, SampleRing, SignalClass};
use biosig_processing::{BandPowerEstimator, BeatDetector, EnvelopeDetector, NotchFilter};
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU16, AtomicU32, AtomicU64, AtomicU8};
use tokio::sync::Mutex;

/// The per-class feature extractors, owned by the acquisition loop
///
/// Held in one bank and never reset on a mode switch; each extractor
/// resumes where it left off when its class becomes active again.
pub(crate) struct ProcessorBank {
    pub envelope: EnvelopeDetector,
    pub beat: BeatDetector,
    pub notch: NotchFilter,
    pub power: BandPowerEstimator,
}

/// State block shared between the producer task and polling consumers
///
/// Every derived value a poller can read is a single atomic scalar, so a
/// read is at worst one iteration stale but never torn. The ring and the
/// processor bank sit behind async mutexes touched by the producer and,
/// briefly, by `select_mode` and `buffer_snapshot`.
pub(crate) struct SharedState {
    pub mode: AtomicU8,
    pub latest: AtomicU16,
    pub envelope: AtomicI32,
    pub bpm: AtomicU32,
    pub alpha_bits: AtomicU64,
    pub iterations: AtomicU64,
    pub loop_spawns: AtomicU32,
    pub started: AtomicBool,
    pub ring: Mutex<SampleRing>,
    pub processors: Mutex<ProcessorBank>,
}

impl SharedState {
    pub fn new(config: &AcquisitionConfig) -> BiosigResult<Self> {
        let processors = ProcessorBank {
            envelope: EnvelopeDetector::new(config.noise_floor, config.envelope_decay),
            beat: BeatDetector::new(config.jump_threshold, config.debounce_ms),
            notch: NotchFilter::new(config.notch_design()?),
            power: BandPowerEstimator::new(config.baseline_alpha, config.power_smoothing),
        };

        Ok(SharedState {
            mode: AtomicU8::new(SignalClass::default().as_u8()),
            latest: AtomicU16::new(0),
            envelope: AtomicI32::new(0),
            bpm: AtomicU32::new(0),
            alpha_bits: AtomicU64::new(0.0f64.to_bits()),
            iterations: AtomicU64::new(0),
            loop_spawns: AtomicU32::new(0),
            started: AtomicBool::new(false),
            ring: Mutex::new(SampleRing::new(config.buffer_capacity)),
            processors: Mutex::new(processors),
        })
    }
}
