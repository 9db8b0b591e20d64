//! Error handling for the biosig crates

use std::fmt;

/// Result type alias for biosig operations
pub type BiosigResult<T> = Result<T, BiosigError>;

/// Error type shared across the biosig crates
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum BiosigError {
    /// Invalid acquisition or simulation configuration
    InvalidConfig {
        /// Description of the configuration error
        reason: String,
    },

    /// Filter design parameters out of range
    InvalidFilterDesign {
        /// Description of the design error
        reason: String,
    },
}

impl fmt::Display for BiosigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BiosigError::InvalidConfig { reason } => {
                write!(f, "Invalid configuration: {}", reason)
            }
            BiosigError::InvalidFilterDesign { reason } => {
                write!(f, "Invalid filter design: {}", reason)
            }
        }
    }
}

impl std::error::Error for BiosigError {}
