//! Biosig-Simulation: Synthetic front-ends for development and testing
//!
//! Waveform patterns per signal class, a noisy simulated analog front-end,
//! and deterministic scripted test doubles for the acquisition loop.

pub mod frontend;
pub mod patterns;

pub use frontend::{FrontendCounters, ManualClock, ScriptedFrontend, SimConfig, SimFrontend};
pub use patterns::SignalPattern;
