//! Biosig-Core: Foundation types for single-channel biosignal acquisition
//!
//! Signal class selection, the rolling raw-sample buffer, and the hardware
//! abstraction the acquisition loop is driven through.

pub mod error;
pub mod hal;
pub mod ring;
pub mod signal_class;

pub use error::{BiosigError, BiosigResult};
pub use hal::{AnalogFrontend, EnableLines, MonotonicClock, ADC_MAX, ADC_MIDPOINT};
pub use ring::{SampleRing, MAX_BUFFER_SIZE};
pub use signal_class::SignalClass;
