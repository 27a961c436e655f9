//! Synthetic sensor frames shared by the integration tests

#![allow(dead_code)]

use ndarray::Array2;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Normal, Uniform};

pub const SIDE: usize = 64;

/// Indices of the frames that get a level shift in [`bump_sequence`]
pub const PERTURBED: [usize; 3] = [5, 12, 18];

/// Gaussian pressure bump centred on the grid, peak 0.005
pub fn gaussian_bump(side: usize) -> Array2<f64> {
    let centre = side as f64 / 2.0;
    Array2::from_shape_fn((side, side), |(r, c)| {
        let dr = r as f64 - centre;
        let dc = c as f64 - centre;
        0.005 * (-(dr * dr + dc * dc) / 100.0).exp()
    })
}

/// `count` bump frames with N(0, 1e-4) noise; frames in `perturbed` are
/// also shifted up by a per-cell U(0.5, 1.0) amount
///
/// The shift is far larger than the bump on purpose: it models a level jump
/// the anomaly score is built to catch. [`jitter_sequence`] covers the
/// milder disturbance of a displaced, noisier reading.
pub fn bump_sequence(seed: u64, count: usize, perturbed: &[usize]) -> Vec<Array2<f64>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let noise = Normal::new(0.0, 1e-4).unwrap();
    let shift = Uniform::new(0.5, 1.0);
    let base = gaussian_bump(SIDE);

    (0..count)
        .map(|i| {
            let mut frame = base.mapv(|v| v + noise.sample(&mut rng));
            if perturbed.contains(&i) {
                frame.mapv_inplace(|v| v + shift.sample(&mut rng));
            }
            frame
        })
        .collect()
}

/// Frames alternating between all zeros and all ones
pub fn alternating(count: usize, side: usize) -> Vec<Array2<f64>> {
    (0..count)
        .map(|i| Array2::from_elem((side, side), (i % 2) as f64))
        .collect()
}

/// `count` copies of one random frame
pub fn identical(seed: u64, count: usize, side: usize) -> Vec<Array2<f64>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let frame = Array2::from_shape_fn((side, side), |_| rng.gen_range(0.0..0.01));
    vec![frame; count]
}

/// Random frames with independent N(mean, std) cells
pub fn noisy(seed: u64, count: usize, side: usize, mean: f64, std: f64) -> Vec<Array2<f64>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let dist = Normal::new(mean, std).unwrap();
    (0..count)
        .map(|_| Array2::from_shape_fn((side, side), |_| dist.sample(&mut rng)))
        .collect()
}

/// `count` bump frames with noise whose std oscillates in `[0, 2e-4]`;
/// frames in `perturbed` get extra N(0, 1e-3) noise and the bump rolled by
/// up to two cells on each axis. Every cell is clipped to `[0, 0.01]`.
pub fn jitter_sequence(seed: u64, count: usize, perturbed: &[usize]) -> Vec<Array2<f64>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let burst = Normal::new(0.0, 1e-3).unwrap();
    let base = gaussian_bump(SIDE);

    (0..count)
        .map(|i| {
            let level = 1e-4 + 1e-4 * (i as f64 * 0.5).sin();
            let noise = Normal::new(0.0, level.max(0.0)).unwrap();
            let mut frame = if perturbed.contains(&i) {
                let dr: isize = rng.gen_range(-2..=2);
                let dc: isize = rng.gen_range(-2..=2);
                let n = SIDE as isize;
                let rolled = Array2::from_shape_fn((SIDE, SIDE), |(r, c)| {
                    base[[
                        (r as isize - dr).rem_euclid(n) as usize,
                        (c as isize - dc).rem_euclid(n) as usize,
                    ]]
                });
                rolled.mapv(|v| v + noise.sample(&mut rng) + burst.sample(&mut rng))
            } else {
                base.mapv(|v| v + noise.sample(&mut rng))
            };
            frame.mapv_inplace(|v| v.clamp(0.0, 0.01));
            frame
        })
        .collect()
}
