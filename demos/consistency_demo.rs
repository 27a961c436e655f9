//! Analyze a synthetic pressure-sensor stream and smooth it
//!
//! Run with `RUST_LOG=debug cargo run --example consistency_demo` to see the
//! per-frame anomaly and correction logs.

use frame_consistency::prelude::*;
use ndarray::Array2;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Normal, Uniform};
use tracing::info;
use tracing_subscriber::EnvFilter;

const SIDE: usize = 64;
const FRAMES: usize = 20;
const PERTURBED: [usize; 3] = [5, 12, 18];

fn synthetic_frames(seed: u64) -> anyhow::Result<Vec<Array2<f64>>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let noise = Normal::new(0.0, 1e-4)?;
    let shift = Uniform::new(0.5, 1.0);
    let centre = SIDE as f64 / 2.0;
    let base = Array2::from_shape_fn((SIDE, SIDE), |(r, c)| {
        let dr = r as f64 - centre;
        let dc = c as f64 - centre;
        0.005 * (-(dr * dr + dc * dc) / 100.0).exp()
    });

    Ok((0..FRAMES)
        .map(|i| {
            let mut frame = base.mapv(|v| v + noise.sample(&mut rng));
            if PERTURBED.contains(&i) {
                frame.mapv_inplace(|v| v + shift.sample(&mut rng));
            }
            frame
        })
        .collect())
}

fn mean_change(frames: &[Frame]) -> Result<f64> {
    let mut total = 0.0;
    for pair in frames.windows(2) {
        total += pair[1].mean_abs_diff(&pair[0])?;
    }
    Ok(total / (frames.len() - 1) as f64)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let frames = synthetic_frames(42)?;
    info!(frames = frames.len(), side = SIDE, "generated synthetic stream");

    println!("=== Frame Consistency Analysis ===\n");
    let mut analyzer = FrameConsistencyAnalyzer::with_defaults()?;
    for frame in &frames {
        analyzer.add_frame(frame)?;
    }
    let result = analyzer.analyze()?;

    if let Some(summary) = &result.summary_stats {
        println!("Frames analyzed:        {}", summary.total_frames);
        println!("Mean frame difference:  {:.6}", summary.mean_frame_difference);
        println!("Max frame difference:   {:.6}", summary.max_frame_difference);
        println!("Mean stability:         {:.4}", summary.mean_stability);
        println!("Unstable sensors:       {}", summary.unstable_sensors);
        println!("Mean noise power:       {:.6}", summary.mean_noise_power);
        println!("High-noise sensors:     {}", summary.high_noise_sensors);
        println!("Anomaly rate:           {:.2}", summary.anomaly_rate);
    }
    println!(
        "Consistency score:      {} ({})",
        result.consistency_score,
        result.consistency_score.grade()
    );

    println!("\nAnomalous frames:");
    for record in &result.anomaly_frames {
        println!(
            "  frame {:>2}: score {:.2}, mean diff {:.4}, max diff {:.4}",
            record.frame_index, record.anomaly_score, record.mean_difference, record.max_difference
        );
    }

    let stats = analyzer.performance_stats();
    println!(
        "\nHistory: {} frames, ~{} KiB",
        stats.frame_history_size,
        stats.memory_usage_estimate / 1024
    );

    println!("\n=== Frame Correction ===\n");
    let mut filter =
        FrameCorrectionSystem::with_parameters(CorrectionParameters::enabled(0.7, 0.001))?;
    let raw: Vec<Frame> = frames
        .iter()
        .map(|f| f.into_frame().map_err(Error::from))
        .collect::<Result<_>>()?;
    let corrected: Vec<Frame> = frames
        .iter()
        .map(|f| filter.correct_frame(f))
        .collect::<Result<_>>()?;

    let before = mean_change(&raw)?;
    let after = mean_change(&corrected)?;
    let correction = filter.correction_stats();
    println!(
        "Frames corrected:       {}/{}",
        correction.frames_corrected, correction.frames_processed
    );
    println!("Mean change before:     {before:.6}");
    println!("Mean change after:      {after:.6}");
    println!("Reduction:              {:.1}%", (1.0 - after / before) * 100.0);

    Ok(())
}
