#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

pub mod anchor;
pub mod bounding_box;
pub mod clamp;
pub mod config;
pub mod drag;
pub mod error;
pub mod nbezier;
pub mod npolynomial;
pub mod path;
pub mod query;
pub mod segment;
pub mod timeline;
pub mod vector;

pub use crate::anchor::{Anchor, HandleKind};
pub use crate::config::{QueryStrategy, TimelineConfig};
pub use crate::drag::{DragSession, DragTarget};
pub use crate::error::{CurveError, Result};
pub use crate::path::PathConfig;
pub use crate::timeline::{AnchorUpdate, Padding, Timeline, ValueRange};
pub use crate::vector::{PartialVector, Vector};

#[cfg(test)]
mod tests {
    use crate::anchor::{Anchor, HandleKind};
    use crate::config::{QueryStrategy, TimelineConfig};
    use crate::drag::DragSession;
    use crate::path::PathConfig;
    use crate::timeline::Timeline;
    use crate::vector::Vector;

    fn wave() -> Vec<Anchor> {
        vec![
            Anchor::new(0.0, 0.0),
            Anchor::new(400.0, 300.0)
                .with_pre(100.0, 0.0)
                .with_post(100.0, 0.0),
            Anchor::new(800.0, 0.0).with_pre(100.0, 0.0),
        ]
    }

    /// Anchors with long, steep and partly inverted handles
    fn wild() -> Vec<Anchor> {
        vec![
            Anchor::new(0.0, 10.0).with_post(250.0, 400.0),
            Anchor::new(100.0, -50.0)
                .with_pre(500.0, -90.0)
                .with_post(0.0, 80.0),
            Anchor::new(130.0, 20.0).with_pre(-40.0, 5.0),
            Anchor::new(400.0, 20.0)
                .with_pre(1000.0, 1000.0)
                .with_post(3.0, -300.0),
            Anchor::new(401.0, -20.0)
                .with_pre(0.5, 0.0)
                .with_post(50.0, 50.0),
            Anchor::new(900.0, 0.0),
        ]
    }

    fn timelines() -> Vec<Timeline> {
        let mut timelines = Vec::new();
        for anchors in [wave(), wild()] {
            for strategy in [QueryStrategy::Exact, QueryStrategy::Sampled] {
                let config = TimelineConfig {
                    strategy,
                    ..TimelineConfig::default()
                };
                timelines.push(Timeline::with_anchors(anchors.clone(), config).unwrap());
            }
        }
        timelines
    }

    #[test]
    fn clamped_handles_stay_between_neighbours() {
        for timeline in timelines() {
            let anchors = timeline.clamped_anchors();
            for (i, anchor) in anchors.iter().enumerate() {
                let x = anchor.position.x;
                if let Some(pre) = anchor.pre {
                    assert!(anchors[i - 1].position.x <= pre.clamped.x && pre.clamped.x <= x);
                }
                if let Some(post) = anchor.post {
                    assert!(x <= post.clamped.x && post.clamped.x <= anchors[i + 1].position.x);
                }
            }
        }
    }

    #[test]
    fn exact_at_anchors() {
        for timeline in timelines() {
            for anchor in timeline.anchors() {
                let Vector { x, y } = anchor.position;
                assert!((timeline.query(x) - y).abs() < 1e-6, "{} at {}", y, x);
            }
        }
    }

    #[test]
    fn continuous() {
        for timeline in timelines() {
            let points = timeline.sample(-10.0, 910.0, 9201);
            for pair in points.windows(2) {
                let (a, b) = (pair[0].x, pair[1].x);
                let steepest = [a, (a + b) / 2.0, b]
                    .into_iter()
                    .map(|x| timeline.slope(x).abs())
                    .fold(0.0, f64::max);
                let jump = (pair[1].y - pair[0].y).abs();
                assert!(jump <= 20.0 * (steepest + 1.0) * (b - a), "jump of {} at {}", jump, a);
            }
        }
    }

    #[test]
    fn edges_hold() {
        for timeline in timelines() {
            let anchors = timeline.anchors();
            let first = anchors[0].position;
            let last = anchors[anchors.len() - 1].position;
            assert_eq!(timeline.query(first.x - 1000.0), first.y);
            assert_eq!(timeline.query(last.x + 1000.0), last.y);
        }
    }

    #[test]
    fn path() {
        let timeline = Timeline::with_anchors(wave(), TimelineConfig::default()).unwrap();
        let d = timeline.d(&PathConfig::default());
        assert!(d.starts_with("M 0 0"));
        assert_eq!(d.matches('C').count(), 1);
        assert_eq!(d, "M 0 0 Q 300 300 400 300 C 500 300 700 0 800 0");
    }

    #[test]
    fn insert_preserves_value() {
        for mut timeline in timelines() {
            for x in [50.0, 120.0, 399.5, 650.0] {
                let before = timeline.query(x);
                timeline.add_anchor(x, None).unwrap();
                assert!((timeline.query(x) - before).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn delete_is_removal() {
        let mut timeline = Timeline::with_anchors(wild(), TimelineConfig::default()).unwrap();
        let before: Vec<Vector> = timeline.anchors().iter().map(|a| a.position).collect();
        timeline.delete_anchor(2).unwrap();
        let after: Vec<Vector> = timeline.anchors().iter().map(|a| a.position).collect();
        assert_eq!(after.len(), before.len() - 1);
        assert_eq!(after[..2], before[..2]);
        assert_eq!(after[2..], before[3..]);

        // Deleting the last anchor leaves a dangling post handle behind
        let last = timeline.anchors().len() - 1;
        timeline.delete_anchor(last).unwrap();
        assert!(timeline.anchors()[last - 1].post.is_some());
        assert!(timeline.clamped_anchors()[last - 1].post.is_none());
        let x = timeline.anchors()[last - 1].position.x;
        assert_eq!(timeline.query(x + 1.0), timeline.anchors()[last - 1].position.y);
    }

    #[test]
    fn clamp_ratio() {
        let mut timeline = Timeline::with_anchors(
            vec![Anchor::new(100.0, 0.0), Anchor::new(200.0, 0.0)],
            TimelineConfig::default(),
        )
        .unwrap();
        timeline
            .set_handle_absolute(0, HandleKind::Post, Vector::new(250.0, 50.0))
            .unwrap();
        let post = timeline.clamped_anchors()[0].post.unwrap();
        assert_eq!(post.unclamped, Vector::new(250.0, 50.0));
        assert_eq!(post.clamped.x, 200.0);
        assert!((post.clamped.y - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn strategies_agree() {
        let config = TimelineConfig {
            samples: 120,
            ..TimelineConfig::default()
        };
        let timeline = Timeline::with_anchors(wave(), config).unwrap();
        for i in 0..=160 {
            let x = i as f64 * 5.0;
            let exact = timeline.query_exact(x);
            let sampled = timeline.query_sampled(x);
            assert!((exact - sampled).abs() < 1.0, "{} vs {} at {}", exact, sampled, x);
        }
    }

    #[test]
    fn drag_then_query() {
        let mut timeline = Timeline::with_anchors(wave(), TimelineConfig::default()).unwrap();
        let drag = DragSession::position(&timeline, 1).unwrap();
        drag.update(&mut timeline, Vector::new(-100.0, 50.0)).unwrap();
        assert_eq!(timeline.query(300.0), 350.0);
        let handle = DragSession::handle(&timeline, 1, HandleKind::Post).unwrap();
        assert_eq!(handle.initial(), Vector::new(400.0, 350.0));
    }
}
