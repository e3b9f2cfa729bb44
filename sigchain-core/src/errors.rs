//! Error types for rejected configuration
//!
//! The conditioning core performs no I/O and never panics; the only thing
//! that can go wrong is a configuration call with an unusable value. Errors
//! here follow the same constraints as the rest of the crate:
//!
//! - **Small and `Copy`**: error values are returned from setters that may
//!   sit inside a control tick; no heap, no `String`, inline data only.
//! - **State-preserving**: a returned error always means the processor's
//!   prior configuration is untouched.

use thiserror_no_std::Error;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors - kept small for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Requested cutoff is not a positive frequency (zero, negative or NaN)
    #[error("cutoff {value} is not a positive relative frequency")]
    CutoffNotPositive {
        /// The rejected cutoff, as a fraction of the sampling frequency
        value: f64,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::CutoffNotPositive { value } => {
                defmt::write!(fmt, "cutoff {} is not a positive relative frequency", value)
            }
        }
    }
}
