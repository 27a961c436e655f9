use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use frame_analysis::{
    AnalysisConfig, FrameConsistencyAnalyzer, FrameWindow, NoiseAnalyzer,
};
use frame_core::Frame;
use ndarray::Array2;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_distr::Normal;
use std::time::SystemTime;

/// Generate `count` frames of independent normal cells
fn generate_frames(count: usize, side: usize, seed: u64) -> Vec<Frame> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let normal = Normal::new(0.5, 0.01).unwrap();
    (0..count)
        .map(|_| {
            let data = Array2::from_shape_fn((side, side), |_| normal.sample(&mut rng));
            Frame::new(data).unwrap()
        })
        .collect()
}

fn bench_frequency_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("NoiseFrequencyMap");
    let analyzer = NoiseAnalyzer::default();

    for &frames in &[16usize, 50, 100] {
        let window =
            FrameWindow::from_frames(&generate_frames(frames, 64, 42), SystemTime::now()).unwrap();

        group.bench_with_input(BenchmarkId::new("batched", frames), &window, |b, w| {
            b.iter(|| analyzer.frequency_map(black_box(w)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("per_cell", frames), &window, |b, w| {
            b.iter(|| analyzer.per_cell_frequency_map(black_box(w)).unwrap())
        });
    }

    group.finish();
}

fn bench_full_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("FullAnalysis");

    for &frames in &[20usize, 100] {
        let mut analyzer = FrameConsistencyAnalyzer::new(AnalysisConfig::default()).unwrap();
        for frame in generate_frames(frames, 64, 7) {
            analyzer.add_frame(frame).unwrap();
        }

        group.bench_function(BenchmarkId::new("analyze", frames), |b| {
            b.iter(|| black_box(analyzer.analyze().unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_frequency_map, bench_full_analysis);
criterion_main!(benches);
