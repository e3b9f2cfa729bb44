//! Signal conditioning core for real-time control loops
//!
//! Turns a raw sampled measurement stream into a clean, bounded process
//! value: gain, drift-rejecting high-pass and noise-rejecting low-pass
//! biquad stages, optional rectification, DC-offset removal, and range
//! normalization, with a three-phase mode switch so the same path serves
//! calibration and live measurement.
//!
//! Key constraints:
//! - No allocation after construction; all state is inline fixed-size arrays
//! - No blocking, no I/O; every call completes in O(batch length)
//! - One instance per channel, exclusively owned by its control loop
//!
//! ```no_run
//! use sigchain_core::{ProcessingPhase, ProcessorFlags, SignalProcessor};
//!
//! let mut processor = SignalProcessor::new(ProcessorFlags::empty());
//! processor.set_max_frequency(0.1).unwrap();
//!
//! // One control tick: feed the batch sampled since the last tick
//! let conditioned = processor.update(&[0.12, 0.15, 0.11]);
//! let _ = conditioned;
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod constants;
pub mod errors;
pub mod filter;
pub mod history;
pub mod processor;

// Public API
pub use errors::{ConfigError, ConfigResult};
pub use filter::{BiquadCoeffs, FilterStage};
pub use processor::{ProcessingPhase, ProcessorFlags, SignalProcessor};

/// Crate version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
