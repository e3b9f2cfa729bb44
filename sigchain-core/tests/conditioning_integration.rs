//! Integration tests for the full conditioning workflow
//!
//! Drives a processor through the same offset / calibration / measurement
//! cycle an embedding control loop would run, feeding batches per tick and
//! checking the conditioned output against the configured chain.

#![cfg(test)]

mod common;

use sigchain_core::{ProcessingPhase, ProcessorFlags, SignalProcessor};

use common::{biased_sine, dc, sine, NoiseSource};

#[test]
fn full_conditioning_cycle() {
    let mut flags = ProcessorFlags::empty();
    flags.set(ProcessorFlags::NORMALIZE);
    let mut processor = SignalProcessor::new(flags);

    // Offset phase: a steady bias converges exactly
    processor.set_phase(ProcessingPhase::Offset);
    processor.update(&dc(200, 0.5));
    processor.set_phase(ProcessingPhase::Measurement);
    assert_eq!(processor.offset(), 0.5);

    // Calibration phase: record the range of the bias-free signal
    processor.set_phase(ProcessingPhase::Calibration);
    processor.update(&biased_sine(500, 1.0, 0.02, 0.5));
    let amplitude = processor.amplitude();
    assert!(
        amplitude > 1.9 && amplitude <= 2.0,
        "calibrated sine amplitude: {}",
        amplitude
    );

    // Measurement phase: normalized output stays inside the scaled range
    processor.set_phase(ProcessingPhase::Measurement);
    let lower = -1.0 / amplitude - 1e-9;
    let upper = 1.0 / amplitude + 1e-9;
    for chunk in biased_sine(500, 1.2, 0.02, 0.5).chunks(10) {
        let value = processor.update(chunk);
        assert!(
            value >= lower && value <= upper,
            "normalized value out of bounds: {}",
            value
        );
    }
}

#[test]
fn high_pass_rejects_steady_bias() {
    let mut processor = SignalProcessor::new(ProcessorFlags::empty());
    processor.set_min_frequency(0.05).unwrap();

    let mut output = 0.0;
    for chunk in dc(400, 1.0).chunks(16) {
        output = processor.update(chunk);
    }
    assert!(output.abs() < 1e-2, "residual DC after high-pass: {}", output);
}

#[test]
fn low_pass_smooths_additive_noise() {
    let mut processor = SignalProcessor::new(ProcessorFlags::empty());
    processor.set_max_frequency(0.01).unwrap();

    let mut noise = NoiseSource::new(42);
    let samples = noise.noisy_dc(2000, 1.0, 0.2);

    let mut tail_error = 0.0_f64;
    for (tick, chunk) in samples.chunks(20).enumerate() {
        let value = processor.update(chunk);
        // Skip the settling transient before judging the output
        if tick >= 50 {
            tail_error = tail_error.max((value - 1.0).abs());
        }
    }
    assert!(tail_error < 0.15, "smoothed output error: {}", tail_error);
}

#[test]
fn rectified_measurement_of_symmetric_signal_has_positive_mean() {
    let mut flags = ProcessorFlags::empty();
    flags.set(ProcessorFlags::RECTIFY);
    let mut processor = SignalProcessor::new(flags);
    processor.set_max_frequency(0.2).unwrap();

    let mut sum = 0.0;
    let mut count = 0;
    for chunk in sine(600, 1.0, 0.05).chunks(6) {
        let value = processor.update(chunk);
        if count >= 20 {
            sum += value;
        }
        count += 1;
    }
    let mean = sum / (count - 20) as f64;
    assert!(mean > 0.3, "rectified sine should average high: {}", mean);
}

#[test]
fn idle_ticks_hold_the_last_value() {
    let mut processor = SignalProcessor::new(ProcessorFlags::empty());
    processor.set_max_frequency(0.1).unwrap();

    let busy = processor.update(&[1.0, 1.0, 1.0]);
    // Ticks with no new samples must not disturb the output
    assert_eq!(processor.update(&[]), busy);
    assert_eq!(processor.update(&[]), busy);

    processor.set_phase(ProcessingPhase::Offset);
    processor.update(&[2.5]);
    assert_eq!(processor.update(&[]), 2.5);
}

#[test]
fn reconfiguring_mid_stream_continues_from_current_state() {
    let mut processor = SignalProcessor::new(ProcessorFlags::empty());
    processor.set_max_frequency(0.1).unwrap();

    for chunk in dc(200, 1.0).chunks(8) {
        processor.update(chunk);
    }

    // Tighten the cutoff; history is preserved, so the output stays near
    // the settled level instead of restarting from zero.
    processor.set_max_frequency(0.01).unwrap();
    let value = processor.update(&[1.0]);
    assert!(
        (value - 1.0).abs() < 0.1,
        "output should continue from settled state: {}",
        value
    );
}

#[test]
fn calibration_and_offset_state_survive_round_trips() {
    let mut processor = SignalProcessor::new(ProcessorFlags::empty());

    processor.set_phase(ProcessingPhase::Offset);
    processor.update(&dc(50, 0.25));
    processor.set_phase(ProcessingPhase::Calibration);
    processor.update(&sine(200, 2.0, 0.02));
    let amplitude = processor.amplitude();

    // Measurement resets nothing; both estimates remain readable
    processor.set_phase(ProcessingPhase::Measurement);
    assert_eq!(processor.offset(), 0.25);
    assert_eq!(processor.amplitude(), amplitude);
}
