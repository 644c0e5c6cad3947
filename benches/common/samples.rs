use bezier_timeline::{Anchor, QueryStrategy, Timeline, TimelineConfig};
use once_cell::sync::Lazy;

/// Values and handles generated randomly
/// ```python
/// from random import random
/// for i in range(10):
///     print(f"({random()*600-300:.3f}, {random()*150:.3f}, {(random()-0.5)*400:.3f}),")
/// ```
pub static POINTS: [(f64, f64, f64); 10] = [
    (  12.408,  74.250, -113.902),
    (-203.551, 131.776,   42.019),
    ( 281.090,  12.583,  187.634),
    (  -4.716,  98.014,  -61.240),
    ( 143.327, 147.309,   -9.551),
    (-288.602,  33.871,  152.870),
    (  67.954,  60.117, -198.335),
    (-131.205, 112.440,   88.026),
    ( 219.873,   5.902,  -23.617),
    ( -56.148,  81.693,  131.480),
];

/// `count` anchors 100 apart, cycling through [`POINTS`]
pub fn anchors(count: usize) -> Vec<Anchor> {
    (0..count)
        .map(|i| {
            let (y, length, offset) = POINTS[i % POINTS.len()];
            let mut anchor = Anchor::new(i as f64 * 100.0, y);
            if i > 0 {
                anchor = anchor.with_pre(length, -offset);
            }
            if i + 1 < count {
                anchor = anchor.with_post(length, offset);
            }
            anchor
        })
        .collect()
}

pub fn timeline(count: usize, strategy: QueryStrategy) -> Timeline {
    let config = TimelineConfig {
        strategy,
        ..TimelineConfig::default()
    };
    match Timeline::with_anchors(anchors(count), config) {
        Ok(timeline) => timeline,
        Err(error) => panic!("invalid sample anchors: {}", error),
    }
}

pub static EXACT: Lazy<Timeline> = Lazy::new(|| timeline(2000, QueryStrategy::Exact));
pub static SAMPLED: Lazy<Timeline> = Lazy::new(|| timeline(2000, QueryStrategy::Sampled));
