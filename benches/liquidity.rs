use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::Rng;

use market_insights::engine::liquidity::{compute_liquidity, DEFAULT_DEPTH};
use market_insights::engine::types::{OrderLevel, VolatilitySnapshot};
use market_insights::engine::volatility::VolatilityTracker;

fn random_side(n: usize, start: f64, step: f64) -> Vec<OrderLevel> {
    let mut rng = rand::thread_rng();
    (0..n)
        .map(|i| OrderLevel::new(start + step * i as f64, rng.gen_range(0.1..50.0)))
        .collect()
}

fn bench_liquidity(c: &mut Criterion) {
    let buys = random_side(200, 100.0, -0.01);
    let sells = random_side(200, 100.01, 0.01);

    c.bench_function("compute_liquidity depth=10", |b| {
        b.iter(|| compute_liquidity(black_box(&buys), black_box(&sells), DEFAULT_DEPTH))
    });
    c.bench_function("compute_liquidity depth=200", |b| {
        b.iter(|| compute_liquidity(black_box(&buys), black_box(&sells), 200))
    });
}

fn bench_tracker(c: &mut Criterion) {
    let tracker = VolatilityTracker::new();
    let mut rng = rand::thread_rng();
    c.bench_function("tracker observe (full window)", |b| {
        b.iter(|| {
            let snap = VolatilitySnapshot {
                mid_price: rng.gen_range(99.0..101.0),
                spread: rng.gen_range(0.01..0.1),
                total_depth: rng.gen_range(1000.0..2000.0),
            };
            tracker.observe(black_box("inj-usdt"), snap)
        })
    });
}

criterion_group!(benches, bench_liquidity, bench_tracker);
criterion_main!(benches);
