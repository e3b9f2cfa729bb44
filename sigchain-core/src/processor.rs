//! The Signal Conditioning Core
//!
//! ## Overview
//!
//! A [`SignalProcessor`] turns one raw sampled measurement stream into a
//! clean, bounded process value for a real-time control loop. Each instance
//! owns a single channel: its gain, its two filter stages, its offset
//! estimate, its calibration limits, and its operating phase.
//!
//! ## Processing Chain
//!
//! In the measurement and calibration phases every sample flows through the
//! same chain:
//!
//! ```text
//! raw ──► ×gain ──► −offset ──► high-pass ──► |x| ──► low-pass ──► limits /
//!                                          (rectify)              normalize
//! ```
//!
//! Rectification and normalization are fixed at construction via
//! [`ProcessorFlags`]; the filter stages stay identity transforms until a
//! cutoff is configured.
//!
//! ## Operating Phases
//!
//! The processor is a three-state machine driven only by explicit
//! [`SignalProcessor::set_phase`] calls:
//!
//! - **Measurement** (initial): full chain runs; the stored offset is
//!   subtracted and, when enabled, output is normalized against the
//!   calibrated limits.
//! - **Calibration**: full chain runs; the filtered signal's min/max are
//!   recorded for later normalization. Entering this phase resets the
//!   limits.
//! - **Offset**: raw samples are folded into a running mean of the signal's
//!   DC bias; no filtering, rectification, or limit tracking happens.
//!   Entering this phase restarts the mean.
//!
//! ## Usage Example
//!
//! ```rust
//! use sigchain_core::{ProcessingPhase, ProcessorFlags, SignalProcessor};
//!
//! let mut flags = ProcessorFlags::empty();
//! flags.set(ProcessorFlags::RECTIFY);
//!
//! let mut processor = SignalProcessor::new(flags);
//! processor.set_input_gain(2.0);
//! processor.set_max_frequency(0.1).unwrap();
//!
//! // Estimate the DC bias, then return to live measurement
//! processor.set_phase(ProcessingPhase::Offset);
//! processor.update(&[0.5, 0.5, 0.5]);
//! processor.set_phase(ProcessingPhase::Measurement);
//!
//! let value = processor.update(&[0.7, 0.8]);
//! assert!(value.is_finite());
//! ```
//!
//! ## Real-Time Constraints
//!
//! Every operation runs to completion on the caller's thread: no blocking,
//! no I/O, no allocation after construction. Cost is O(batch length). The
//! processor has no internal locking; concurrent callers must serialize
//! access externally.

use crate::{
    constants::{DEFAULT_INPUT_GAIN, OFFSET_SAMPLE_CAP, UNCALIBRATED_AMPLITUDE},
    errors::ConfigResult,
    filter::{BiquadCoeffs, FilterStage},
};

// Macro for optional logging
#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

/// Construction-time processing options, combinable as a bitmask
///
/// ```rust
/// use sigchain_core::ProcessorFlags;
///
/// let mut flags = ProcessorFlags::empty();
/// flags.set(ProcessorFlags::RECTIFY);
/// flags.set(ProcessorFlags::NORMALIZE);
/// assert!(flags.contains(ProcessorFlags::RECTIFY));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProcessorFlags(u8);

impl ProcessorFlags {
    /// Rectify the signal (absolute value) between the filter stages
    pub const RECTIFY: Self = Self(1 << 0);
    /// Normalize measurement output against the calibrated range
    pub const NORMALIZE: Self = Self(1 << 1);

    /// No options set
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Every option set
    pub const fn all() -> Self {
        Self(0b11)
    }

    /// Enables the given option(s)
    pub fn set(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// Whether all of the given option(s) are enabled
    pub const fn contains(&self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl Default for ProcessorFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// Operating phase of a [`SignalProcessor`]
///
/// Any phase is reachable from any other; transitions happen only through
/// [`SignalProcessor::set_phase`], never automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProcessingPhase {
    /// Live operation: offset, filters, and calibrated limits are applied
    Measurement,
    /// The filtered signal's min/max are recorded for later normalization
    Calibration,
    /// Raw sample mean is accumulated for later offset removal
    Offset,
}

#[cfg(feature = "defmt")]
impl defmt::Format for ProcessingPhase {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Measurement => defmt::write!(fmt, "measurement"),
            Self::Calibration => defmt::write!(fmt, "calibration"),
            Self::Offset => defmt::write!(fmt, "offset"),
        }
    }
}

/// Observed range of the filtered signal during calibration
#[derive(Debug, Clone, Copy)]
struct SignalLimits {
    min: f64,
    max: f64,
}

impl SignalLimits {
    const fn collapsed() -> Self {
        Self { min: 0.0, max: 0.0 }
    }
}

/// Stateful conditioning unit for one measurement channel
///
/// See the [module docs](self) for the processing chain and phase
/// semantics. One instance per physical channel; the instance exclusively
/// owns all of its buffers.
#[derive(Debug, Clone)]
pub struct SignalProcessor {
    input_gain: f64,
    rectify: bool,
    normalize: bool,
    signal_offset: f64,
    recorded_samples: usize,
    limits: SignalLimits,
    high_pass: FilterStage,
    low_pass: FilterStage,
    phase: ProcessingPhase,
}

impl SignalProcessor {
    /// Creates a processor with the given option flags
    ///
    /// Gain starts at 1.0, the phase at [`ProcessingPhase::Measurement`],
    /// and both filter stages as identity transforms with zeroed history.
    /// Construction cannot fail.
    pub const fn new(flags: ProcessorFlags) -> Self {
        Self {
            input_gain: DEFAULT_INPUT_GAIN,
            rectify: flags.contains(ProcessorFlags::RECTIFY),
            normalize: flags.contains(ProcessorFlags::NORMALIZE),
            signal_offset: 0.0,
            recorded_samples: 0,
            limits: SignalLimits::collapsed(),
            high_pass: FilterStage::identity(),
            low_pass: FilterStage::identity(),
            phase: ProcessingPhase::Measurement,
        }
    }

    /// Replaces the input gain multiplier
    ///
    /// Takes effect from the next processed sample; history is not
    /// rescaled. No bounds are enforced.
    pub fn set_input_gain(&mut self, gain: f64) {
        self.input_gain = gain;
    }

    /// Configures the low-pass stage from a relative cutoff frequency
    ///
    /// The cutoff is a fraction of the sampling frequency. Non-positive
    /// values (including NaN) are rejected and leave the stage untouched;
    /// values at or above 0.5 are clamped to 0.49. The stage's history is
    /// preserved, so a brief transient can follow reconfiguration.
    pub fn set_max_frequency(&mut self, relative_cutoff: f64) -> ConfigResult<()> {
        let coeffs = BiquadCoeffs::low_pass(relative_cutoff)?;
        self.low_pass.set_coeffs(coeffs);
        log_debug!("low-pass cutoff configured at {}", relative_cutoff);
        Ok(())
    }

    /// Configures the high-pass stage from a relative cutoff frequency
    ///
    /// Input handling matches [`SignalProcessor::set_max_frequency`].
    pub fn set_min_frequency(&mut self, relative_cutoff: f64) -> ConfigResult<()> {
        let coeffs = BiquadCoeffs::high_pass(relative_cutoff)?;
        self.high_pass.set_coeffs(coeffs);
        log_debug!("high-pass cutoff configured at {}", relative_cutoff);
        Ok(())
    }

    /// Processes a batch of raw samples and returns one value
    ///
    /// In the offset phase each sample is scaled by the gain and folded
    /// into the running DC-bias mean (the sample count saturates at
    /// [`OFFSET_SAMPLE_CAP`](crate::constants::OFFSET_SAMPLE_CAP) so the
    /// mean stays responsive); the return value is the current estimate.
    ///
    /// In the other phases each sample runs the full chain in order and the
    /// value of the last processed sample is returned. An empty batch
    /// returns the previous result without re-evaluating the filters.
    pub fn update(&mut self, samples: &[f64]) -> f64 {
        if self.phase == ProcessingPhase::Offset {
            for &raw in samples {
                if self.recorded_samples < OFFSET_SAMPLE_CAP {
                    self.recorded_samples += 1;
                }
                let count = self.recorded_samples as f64;
                self.signal_offset += (raw * self.input_gain - self.signal_offset) / count;
            }
            return self.signal_offset;
        }

        let mut value = self.low_pass.output();
        for &raw in samples {
            value = raw * self.input_gain - self.signal_offset;
            value = self.high_pass.apply(value);
            if self.rectify {
                // libm keeps this path no_std-clean
                value = libm::fabs(value);
            }
            value = self.low_pass.apply(value);

            if self.phase == ProcessingPhase::Calibration {
                // First bound exceeded wins; one sample never moves both.
                if value > self.limits.max {
                    self.limits.max = value;
                } else if value < self.limits.min {
                    self.limits.min = value;
                }
            } else if self.normalize && self.limits.min != self.limits.max {
                if value > self.limits.max {
                    value = self.limits.max;
                } else if value < self.limits.min {
                    value = self.limits.min;
                }
                // Divide by the range only; the minimum is not subtracted,
                // so normalized output can be negative.
                value /= self.limits.max - self.limits.min;
            }
        }
        value
    }

    /// Switches the operating phase
    ///
    /// Entering calibration resets the recorded limits; entering offset
    /// restarts the DC-bias mean; entering measurement resets nothing and
    /// reuses whatever offset and limits were last committed.
    pub fn set_phase(&mut self, phase: ProcessingPhase) {
        match phase {
            ProcessingPhase::Calibration => {
                self.limits = SignalLimits::collapsed();
            }
            ProcessingPhase::Offset => {
                self.signal_offset = 0.0;
                self.recorded_samples = 0;
            }
            ProcessingPhase::Measurement => {}
        }
        log_debug!("phase transition {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }

    /// The committed DC-bias estimate
    ///
    /// Returns 0.0 while the offset phase is active: the running estimate
    /// is provisional until a phase change commits it.
    pub fn offset(&self) -> f64 {
        if self.phase == ProcessingPhase::Offset {
            0.0
        } else {
            self.signal_offset
        }
    }

    /// The calibrated signal amplitude (`max − min`)
    ///
    /// Returns 1.0 while the limits are still collapsed, so the value is
    /// always safe to divide by.
    pub fn amplitude(&self) -> f64 {
        if self.limits.min == self.limits.max {
            UNCALIBRATED_AMPLITUDE
        } else {
            self.limits.max - self.limits.min
        }
    }

    /// Current input gain multiplier
    pub fn input_gain(&self) -> f64 {
        self.input_gain
    }

    /// Current operating phase
    pub fn phase(&self) -> ProcessingPhase {
        self.phase
    }
}

impl Default for SignalProcessor {
    fn default() -> Self {
        Self::new(ProcessorFlags::empty())
    }
}
