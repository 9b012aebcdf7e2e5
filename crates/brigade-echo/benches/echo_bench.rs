//! Criterion benchmarks for the brigade echo chain
//!
//! Run with: cargo bench -p brigade-echo
#![allow(missing_docs)]

use brigade_core::Module;
use brigade_echo::{CascadeMode, Engine, EngineParams, Stage, StageParams};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

const SAMPLE_RATE: f32 = 44100.0;
const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512, 1024];

fn generate_test_signal(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE;
            (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.5
        })
        .collect()
}

fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("Engine");

    let modes = [
        ("standard", CascadeMode::Standard, false),
        ("cascaded", CascadeMode::Cascaded, false),
        ("bypassed", CascadeMode::Standard, true),
    ];

    for (label, mode, bypassed) in modes {
        let params = EngineParams {
            mode,
            ..EngineParams::default()
        };
        for &block_size in BLOCK_SIZES {
            let input = generate_test_signal(block_size);
            group.bench_with_input(BenchmarkId::new(label, block_size), &block_size, |b, &size| {
                let mut engine = Engine::stereo();
                engine.prepare(SAMPLE_RATE as f64, size);
                engine.set_bypassed(bypassed);
                let mut left = input.clone();
                let mut right = input.clone();
                b.iter(|| {
                    left.copy_from_slice(&input);
                    right.copy_from_slice(&input);
                    engine.process_block(&mut [&mut left[..], &mut right[..]], black_box(&params));
                    black_box(left[0]);
                });
            });
        }
    }

    group.finish();
}

fn bench_stage(c: &mut Criterion) {
    let mut group = c.benchmark_group("Stage");
    let input = generate_test_signal(1024);

    let settings = [
        ("default", StageParams::default()),
        (
            "max_feedback",
            StageParams {
                delay_time_ms: 300.0,
                feedback_percent: 95.0,
                ..StageParams::default()
            },
        ),
    ];

    for (label, params) in settings {
        group.bench_function(label, |b| {
            let mut stage = Stage::new();
            stage.prepare(SAMPLE_RATE as f64);
            b.iter(|| {
                for &sample in &input {
                    black_box(stage.process_sample(black_box(sample), &params));
                }
            });
        });
    }

    // Sweeping tone forces a coefficient update on most samples
    group.bench_function("tone_sweep", |b| {
        let mut stage = Stage::new();
        stage.prepare(SAMPLE_RATE as f64);
        let mut params = StageParams::default();
        b.iter(|| {
            for (i, &sample) in input.iter().enumerate() {
                params.tone_percent = (i % 100) as f32;
                black_box(stage.process_sample(black_box(sample), &params));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_engine, bench_stage);
criterion_main!(benches);
