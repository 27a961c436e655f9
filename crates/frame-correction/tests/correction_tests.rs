//! Behaviour of the correction filter over frame streams

use frame_core::Frame;
use frame_correction::*;
use ndarray::Array2;
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn random_frames(seed: u64, count: usize) -> Vec<Array2<f64>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| Array2::from_shape_fn((8, 8), |_| rng.gen_range(0.0..1.0)))
        .collect()
}

#[test]
fn test_disabled_filter_is_pass_through() {
    let mut filter = FrameCorrectionSystem::new();
    for frame in random_frames(1, 20) {
        let out = filter.correct_frame(&frame).unwrap();
        assert_eq!(out.data(), &frame);
    }
    assert_eq!(filter.correction_stats().frames_corrected, 0);
}

#[test]
fn test_full_smoothing_returns_previous_frame() {
    let mut filter =
        FrameCorrectionSystem::with_parameters(CorrectionParameters::enabled(1.0, 0.001)).unwrap();
    let frames = random_frames(2, 2);

    filter.correct_frame(&frames[0]).unwrap();
    let out = filter.correct_frame(&frames[1]).unwrap();
    assert_eq!(out.data(), &frames[0]);
}

#[test]
fn test_zero_smoothing_returns_input_frame() {
    let mut filter =
        FrameCorrectionSystem::with_parameters(CorrectionParameters::enabled(0.0, 0.001)).unwrap();
    let frames = random_frames(3, 5);

    for frame in &frames {
        let out = filter.correct_frame(frame).unwrap();
        assert_eq!(out.data(), frame);
    }
    assert_eq!(filter.correction_stats().frames_corrected, 4);
}

#[test]
fn test_smoothing_reduces_frame_to_frame_change() {
    let frames = random_frames(4, 30);
    let mut filter =
        FrameCorrectionSystem::with_parameters(CorrectionParameters::enabled(0.7, 0.001)).unwrap();

    let corrected: Vec<Frame> = frames
        .iter()
        .map(|f| filter.correct_frame(f).unwrap())
        .collect();
    let raw: Vec<Frame> = frames
        .iter()
        .map(|f| Frame::new(f.clone()).unwrap())
        .collect();

    let mean_change = |seq: &[Frame]| {
        let total: f64 = seq
            .windows(2)
            .map(|w| w[1].mean_abs_diff(&w[0]).unwrap())
            .sum();
        total / (seq.len() - 1) as f64
    };
    assert!(mean_change(&corrected) < mean_change(&raw) * 0.5);
}

#[test]
fn test_stats_serialize() {
    let filter = FrameCorrectionSystem::new();
    let json = serde_json::to_value(filter.correction_stats()).unwrap();
    assert_eq!(json["correction_enabled"], false);
    assert_eq!(json["smoothing_factor"], 0.7);
    assert_eq!(json["frames_processed"], 0);
}

proptest! {
    // Property: a disabled filter never alters any frame
    #[test]
    fn prop_disabled_is_identity(
        values in proptest::collection::vec(-10.0..10.0f64, 9 * 4),
        smoothing in 0.0..1.0f64,
    ) {
        let mut filter = FrameCorrectionSystem::new();
        filter.set_smoothing_factor(smoothing).unwrap();
        for chunk in values.chunks(9) {
            let frame = Array2::from_shape_vec((3, 3), chunk.to_vec()).unwrap();
            let out = filter.correct_frame(&frame).unwrap();
            prop_assert_eq!(out.data(), &frame);
        }
    }

    // Property: smoothed cells lie between the previous and current values
    #[test]
    fn prop_smoothing_is_a_convex_blend(
        prev in proptest::collection::vec(-10.0..10.0f64, 4),
        curr in proptest::collection::vec(-10.0..10.0f64, 4),
        smoothing in 0.0..=1.0f64,
    ) {
        let mut filter = FrameCorrectionSystem::with_parameters(
            CorrectionParameters::enabled(smoothing, 0.0),
        ).unwrap();
        let prev_frame = Array2::from_shape_vec((2, 2), prev.clone()).unwrap();
        let curr_frame = Array2::from_shape_vec((2, 2), curr.clone()).unwrap();

        filter.correct_frame(&prev_frame).unwrap();
        let out = filter.correct_frame(&curr_frame).unwrap();
        for ((&o, &p), &c) in out.data().iter().zip(&prev).zip(&curr) {
            let (lo, hi) = if p < c { (p, c) } else { (c, p) };
            prop_assert!(o >= lo - 1e-9 && o <= hi + 1e-9);
        }
    }
}
