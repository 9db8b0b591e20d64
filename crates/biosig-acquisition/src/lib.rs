//! Biosig-Acquisition: The real-time sampling loop and its polling surface
//!
//! A single detached background task reads the analog front-end at the
//! maximum achievable cadence, maintains the rolling raw-sample buffer, and
//! runs the feature extractor of the active signal class per sample.
//! Consumers poll derived state through [`AcquisitionService`]; no accessor
//! blocks or drives the loop.

pub mod clock;
pub mod config;
mod sampler;
pub mod service;
mod state;

pub use clock::SystemClock;
pub use config::AcquisitionConfig;
pub use service::{AcquisitionService, AcquisitionStats};
