/// Lag correlation benchmarks
///
/// Measures `compute_lag` throughput over synthetic OCR sample streams so
/// regressions in the matching cursor show up before they matter for
/// long captures.
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use shutterlag::lag::{LagCalculator, OcrSample};

/// Synthetic capture: one frame every `frame_gap_ms`, each press becoming
/// visible after a fixed pipeline delay
fn synthetic_samples(frame_count: usize, presses: &[i64]) -> Vec<OcrSample> {
    (0..frame_count)
        .map(|i| {
            let ts = i as i64 * 33;
            let visible = presses.iter().filter(|&&p| p + 120 <= ts).count();
            OcrSample {
                frame_timestamp_millis: ts,
                recognized_text: "m".repeat(visible),
            }
        })
        .collect()
}

fn bench_compute_lag(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_lag");

    for &press_count in &[10usize, 100, 500] {
        let presses: Vec<i64> = (0..press_count as i64).map(|i| 500 + i * 100).collect();
        let frame_count = (presses.last().unwrap() / 33 + 100) as usize;
        let samples = synthetic_samples(frame_count, &presses);
        let calculator = LagCalculator::new("m");

        group.bench_with_input(
            BenchmarkId::from_parameter(press_count),
            &press_count,
            |b, _| {
                b.iter(|| {
                    let lag = calculator.compute_lag(
                        black_box(&samples),
                        black_box(0),
                        black_box(&presses),
                        black_box(50),
                    );
                    black_box(lag);
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_compute_lag);
criterion_main!(benches);
