//! Constants for the signal conditioning core
//!
//! Centralized numeric constants used throughout the crate. Values are
//! documented with their units and the constraint they encode; use these
//! instead of magic numbers.

/// Number of taps per biquad history and coefficient array.
///
/// The filter order is fixed at 2 regardless of cutoff, so every
/// coefficient array and delay line holds exactly 3 elements.
pub const FILTER_TAPS: usize = 3;

/// Saturation cap for the offset running mean, in samples.
///
/// The sample count folded into the offset estimate never exceeds this
/// value, so the mean keeps a bounded effective window instead of freezing
/// after long runs. At a typical 1 kHz control-loop rate the window spans
/// about one second: long enough to average out noise, short enough to
/// track slow sensor drift.
pub const OFFSET_SAMPLE_CAP: usize = 1024;

/// Upper bound for a relative cutoff frequency (the Nyquist limit).
///
/// Cutoffs are fractions of the sampling frequency and must stay below
/// half of it by the sampling theorem.
pub const NYQUIST_LIMIT: f64 = 0.5;

/// Largest accepted relative cutoff after clamping.
///
/// Requests at or above [`NYQUIST_LIMIT`] are pulled down to this value
/// rather than rejected.
pub const MAX_RELATIVE_CUTOFF: f64 = 0.49;

/// Input gain applied until the caller configures one.
pub const DEFAULT_INPUT_GAIN: f64 = 1.0;

/// Amplitude reported before calibration has widened the limits.
///
/// `max == min` means no calibration sample has been observed; reporting
/// 1.0 keeps the amplitude safe to divide by.
pub const UNCALIBRATED_AMPLITUDE: f64 = 1.0;
