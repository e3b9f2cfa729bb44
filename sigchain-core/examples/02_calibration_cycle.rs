//! Calibration Cycle Example
//!
//! This example walks a processor through the full three-phase workflow:
//! offset estimation, range calibration, and normalized live measurement.
//!
//! ## What You'll Learn
//!
//! - Driving phase transitions with `set_phase`
//! - Reading back the measured offset and amplitude
//! - How normalization scales measurement output by the calibrated range
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 02_calibration_cycle
//! ```

use std::f64::consts::PI;

use sigchain_core::{ProcessingPhase, ProcessorFlags, SignalProcessor};

fn sine_batch(start: usize, len: usize, amplitude: f64, bias: f64) -> Vec<f64> {
    (start..start + len)
        .map(|n| bias + amplitude * (2.0 * PI * 0.02 * n as f64).sin())
        .collect()
}

fn main() {
    println!("Sigchain Calibration Cycle Example");
    println!("==================================\n");

    let mut flags = ProcessorFlags::empty();
    flags.set(ProcessorFlags::RECTIFY);
    flags.set(ProcessorFlags::NORMALIZE);
    let mut processor = SignalProcessor::new(flags);

    // Phase 1: estimate the channel's DC bias from a resting signal
    println!("Phase 1: offset estimation (resting signal at 0.8)");
    processor.set_phase(ProcessingPhase::Offset);
    for _ in 0..10 {
        processor.update(&[0.8; 20]);
    }
    processor.set_phase(ProcessingPhase::Measurement);
    println!("  Committed offset: {:.3}\n", processor.offset());

    // Phase 2: record the active signal's range for normalization
    println!("Phase 2: calibration (active signal, amplitude 1.5)");
    processor.set_phase(ProcessingPhase::Calibration);
    for tick in 0..25 {
        processor.update(&sine_batch(tick * 20, 20, 1.5, 0.8));
    }
    println!("  Calibrated amplitude: {:.3}\n", processor.amplitude());

    // Phase 3: live measurement, scaled by the calibrated range
    println!("Phase 3: normalized measurement");
    processor.set_phase(ProcessingPhase::Measurement);
    for tick in 0..8 {
        let value = processor.update(&sine_batch(tick * 20, 20, 1.2, 0.8));
        println!("  tick {:2}: {:+.4}", tick, value);
    }

    println!("\nKey Insights:");
    println!("- Entering a phase resets only that phase's state");
    println!("- The offset reads 0.0 while estimation is still running");
    println!("- Normalized output is divided by the range, not shifted to [0, 1]");
}
