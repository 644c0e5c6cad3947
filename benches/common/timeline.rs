use crate::common::samples::{self, EXACT, SAMPLED};
use bezier_timeline::{PathConfig, QueryStrategy};
use criterion::{black_box, BatchSize, Criterion};

/// Query positions spread over the whole timeline, off the anchors
fn positions() -> impl Iterator<Item = f64> {
    (0..1000).map(|i| i as f64 * 199.9 + 0.37)
}

pub fn query(c: &mut Criterion) {
    c.bench_function("query exact", |b| {
        b.iter(|| {
            for x in positions() {
                black_box(EXACT.query(x));
            }
        })
    });
    c.bench_function("query sampled", |b| {
        b.iter(|| {
            for x in positions() {
                black_box(SAMPLED.query(x));
            }
        })
    });
}

pub fn path(c: &mut Criterion) {
    let config = PathConfig::default();
    c.bench_function("d", |b| b.iter(|| black_box(EXACT.d(&config))));
}

pub fn rebuild(c: &mut Criterion) {
    c.bench_function("add anchor", |b| {
        b.iter_batched(
            || samples::timeline(200, QueryStrategy::Sampled),
            |mut timeline| black_box(timeline.add_anchor(10_050.0, None)),
            BatchSize::SmallInput,
        )
    });
}

pub fn all(c: &mut Criterion) {
    query(c);
    path(c);
    rebuild(c);
}
