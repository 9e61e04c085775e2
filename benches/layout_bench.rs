use candle_layout::core::{LayoutRequest, PriceBar, compute_geometry, compute_layout};
use candle_layout::render::{CandlestickStyle, build_candlestick_frame};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn generated_bars(count: usize) -> Vec<PriceBar> {
    (0..count)
        .map(|i| {
            let t = i as f64;
            let base = 100.0 + t * 0.05;
            let open = base;
            let close = if i % 2 == 0 { base + 1.0 } else { base - 1.0 };
            let low = open.min(close) - 0.75;
            let high = open.max(close) + 0.75;
            PriceBar::new(t, open, high, low, close)
        })
        .collect()
}

fn bench_geometry_10k(c: &mut Criterion) {
    let bars = generated_bars(10_000);

    c.bench_function("compute_geometry_10k", |b| {
        b.iter(|| {
            let _ = compute_geometry(black_box(&bars), black_box(320.0), black_box(None));
        })
    });
}

fn bench_layout_10k(c: &mut Criterion) {
    let bars = generated_bars(10_000);
    let request = LayoutRequest::new(320.0).with_outcome_start(Some(7_500));

    c.bench_function("compute_layout_10k", |b| {
        b.iter(|| {
            let _ = compute_layout(black_box(&bars), black_box(&request));
        })
    });
}

fn bench_frame_2k(c: &mut Criterion) {
    let bars = generated_bars(2_000);
    let layout = compute_layout(&bars, &LayoutRequest::new(480.0));
    let style = CandlestickStyle::default();

    c.bench_function("candlestick_frame_2k", |b| {
        b.iter(|| {
            let _ = build_candlestick_frame(black_box(&layout), black_box(&style));
        })
    });
}

criterion_group!(benches, bench_geometry_10k, bench_layout_10k, bench_frame_2k);
criterion_main!(benches);
