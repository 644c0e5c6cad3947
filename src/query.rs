//! Evaluating the curve's y at a given x.
//!
//! Outside of the anchors' x-range the curve holds the nearest anchor's value.
//! Inside, the bracketing segment is found by binary search and evaluated either exactly
//! ([`query_exact`]) or by interpolating its lookup map ([`query_sampled`]).

use crate::clamp::ClampedAnchor;
use crate::segment::Segment;
use crate::vector::Vector;

/// Where a query's x falls relative to the curve
enum Location<'a> {
    /// Held at an edge anchor's or an empty curve's value
    Held(f64),
    /// Inside this segment
    Inside(&'a Segment),
    /// No segment covers x although it lies within the anchors' range
    Missing,
}

fn locate<'a>(anchors: &[ClampedAnchor], segments: &'a [Segment], x: f64) -> Location<'a> {
    if x.is_nan() {
        log::warn!("queried the curve at NaN");
        return Location::Held(0.0);
    }
    let (first, last) = match (anchors.first(), anchors.last()) {
        (Some(first), Some(last)) => (first.position, last.position),
        _ => return Location::Held(0.0),
    };
    if x <= first.x {
        return Location::Held(first.y);
    }
    if x >= last.x {
        return Location::Held(last.y);
    }

    let index = segments.partition_point(|segment| segment.end.x < x);
    match segments.get(index) {
        Some(segment) if segment.contains(x) => Location::Inside(segment),
        _ => {
            log::error!("no segment covers x = {} (of {} segments)", x, segments.len());
            Location::Missing
        }
    }
}

/// The curve's exact y at `x`.
///
/// Solves the bracketing segment's `x(t) = x` for `t` and evaluates `y(t)`.
pub fn query_exact(anchors: &[ClampedAnchor], segments: &[Segment], x: f64) -> f64 {
    match locate(anchors, segments, x) {
        Location::Held(y) => y,
        Location::Inside(segment) => segment.evaluate(x),
        Location::Missing => 0.0,
    }
}

/// The curve's approximate y at `x` interpolated from the segments' lookup maps.
pub fn query_sampled(anchors: &[ClampedAnchor], segments: &[Segment], x: f64) -> f64 {
    match locate(anchors, segments, x) {
        Location::Held(y) => y,
        Location::Inside(segment) => segment.sample(x),
        Location::Missing => 0.0,
    }
}

/// The curve's tangent direction at `x`, if `x` lies within the curve's domain.
///
/// *The resulting vector is not normalized!*
pub fn tangent(anchors: &[ClampedAnchor], segments: &[Segment], x: f64) -> Option<Vector> {
    match locate(anchors, segments, x) {
        Location::Inside(segment) => Some(segment.tangent(x)),
        _ => None,
    }
}

/// The curve's slope `dy/dx` at `x`.
///
/// Outside of the curve's domain (where it's held flat) and where the tangent is vertical
/// this is `0`.
pub fn slope(anchors: &[ClampedAnchor], segments: &[Segment], x: f64) -> f64 {
    match tangent(anchors, segments, x) {
        Some(tangent) if tangent.x != 0.0 => tangent.y / tangent.x,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchor::{to_absolute, Anchor};
    use crate::clamp::clamp_anchors;
    use crate::segment::build_segments;

    fn curve() -> (Vec<ClampedAnchor>, Vec<Segment>) {
        let anchors = [
            Anchor::new(0.0, 0.0).with_post(50.0, 0.0),
            Anchor::new(100.0, 100.0).with_pre(50.0, 0.0),
            Anchor::new(200.0, 40.0),
        ];
        let clamped = clamp_anchors(&to_absolute(&anchors).unwrap());
        let segments = build_segments(&clamped, 60);
        (clamped, segments)
    }

    #[test]
    fn holds_edges() {
        let (anchors, segments) = curve();
        assert_eq!(query_exact(&anchors, &segments, -5.0), 0.0);
        assert_eq!(query_exact(&anchors, &segments, 500.0), 40.0);
        assert_eq!(query_sampled(&anchors, &segments, 500.0), 40.0);
        assert_eq!(slope(&anchors, &segments, 500.0), 0.0);
    }

    #[test]
    fn empty_curve() {
        assert_eq!(query_exact(&[], &[], 3.0), 0.0);
        assert_eq!(query_sampled(&[], &[], 3.0), 0.0);
    }

    #[test]
    fn nan_query() {
        let (anchors, segments) = curve();
        assert_eq!(query_exact(&anchors, &segments, f64::NAN), 0.0);
    }

    #[test]
    fn missing_segment_degrades() {
        let (anchors, _) = curve();
        assert_eq!(query_exact(&anchors, &[], 50.0), 0.0);
    }

    #[test]
    fn slopes() {
        let (anchors, segments) = curve();
        // Straight line from (100, 100) to (200, 40)
        assert!((slope(&anchors, &segments, 150.0) + 0.6).abs() < 1e-9);
        // Symmetric ease is steepest in its middle
        assert!(slope(&anchors, &segments, 50.0) > 1.0);
    }
}
