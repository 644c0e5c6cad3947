//! The curve pieces between two neighbouring anchors.
//!
//! A segment's degree depends on the handles facing into it: none yields a straight line,
//! one a quadratic and two a cubic curve. All of them are stored on the stack.

use crate::clamp::ClampedAnchor;
use crate::nbezier::{BezierCurve, OBezierCurve};
use crate::npolynomial::{OPolynomial, Polynomial};
use crate::vector::Vector;
use nalgebra::dimension::{Dynamic, U1, U2, U3, U4};
use nalgebra::{Matrix2, Matrix2x3, Matrix2x4, RowDVector};
use std::fmt;

/// Newton iterations run on a closed form root
const NEWTON_ITERATIONS: usize = 2;

/// Bisection steps used when the closed form fails
const BISECTION_ITERATIONS: usize = 64;

/// Roots this far outside `[0, 1]` are still considered, then clamped
const PARAMETER_SLACK: f64 = 1e-9;

/// Accepted deviation from the requested x, relative to the segment's width
const RESIDUAL_TOLERANCE: f64 = 1e-9;

/// Degree of a segment, which is also the path command drawing it
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SegmentKind {
    /// Straight line, neither side has a handle
    Linear,
    /// One handle
    Quadratic,
    /// Two handles
    Cubic,
}

impl SegmentKind {
    /// Classify the segment starting at `start` and ending at `end`
    pub fn between(start: &ClampedAnchor, end: &ClampedAnchor) -> Self {
        match (start.post.is_some(), end.pre.is_some()) {
            (false, false) => SegmentKind::Linear,
            (true, true) => SegmentKind::Cubic,
            _ => SegmentKind::Quadratic,
        }
    }

    /// The svg path command drawing such a segment
    pub fn command(self) -> char {
        match self {
            SegmentKind::Linear => 'L',
            SegmentKind::Quadratic => 'Q',
            SegmentKind::Cubic => 'C',
        }
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command())
    }
}

/// Bezier curve of a segment, using the lowest degree its handles allow.
#[derive(Clone, Debug)]
pub enum SegmentCurve {
    /// Straight line
    Linear(OBezierCurve<f64, U2, U2>),

    /// Quadratic curve with a single control point
    Quadratic(OBezierCurve<f64, U2, U3>),

    /// Cubic curve
    Cubic(OBezierCurve<f64, U2, U4>),
}

impl SegmentCurve {
    /// Build the curve from `start` to `end` using their clamped handles
    pub fn new(start: &ClampedAnchor, end: &ClampedAnchor) -> Self {
        let p = start.position;
        let q = end.position;
        match (start.post.map(|h| h.clamped), end.pre.map(|h| h.clamped)) {
            (None, None) => SegmentCurve::Linear(BezierCurve(Matrix2::new(p.x, q.x, p.y, q.y))),
            (Some(c), None) | (None, Some(c)) => SegmentCurve::Quadratic(BezierCurve(
                Matrix2x3::new(p.x, c.x, q.x, p.y, c.y, q.y),
            )),
            (Some(c1), Some(c2)) => SegmentCurve::Cubic(BezierCurve(Matrix2x4::new(
                p.x, c1.x, c2.x, q.x, p.y, c1.y, c2.y, q.y,
            ))),
        }
    }

    /// The curve's degree as a [`SegmentKind`]
    pub fn kind(&self) -> SegmentKind {
        match self {
            SegmentCurve::Linear(_) => SegmentKind::Linear,
            SegmentCurve::Quadratic(_) => SegmentKind::Quadratic,
            SegmentCurve::Cubic(_) => SegmentKind::Cubic,
        }
    }

    /// Get the point on the curve at position `t`.
    pub fn castlejau_eval(&self, t: f64) -> Vector {
        let point = match self {
            SegmentCurve::Linear(curve) => curve.castlejau_eval(t),
            SegmentCurve::Quadratic(curve) => curve.castlejau_eval(t),
            SegmentCurve::Cubic(curve) => curve.castlejau_eval(t),
        };
        point.into()
    }

    /// Computes the curve's tangent vector at `t`
    ///
    /// *The resulting vector is not normalized!*
    pub fn tangent(&self, t: f64) -> Vector {
        let tangent = match self {
            SegmentCurve::Linear(curve) => curve.tangent(t),
            SegmentCurve::Quadratic(curve) => curve.tangent(t),
            SegmentCurve::Cubic(curve) => curve.tangent(t),
        };
        tangent.into()
    }

    /// The x coordinate's polynomial in `t`
    fn x_polynomial(&self) -> OPolynomial<f64, U1, Dynamic> {
        fn row<C: nalgebra::Dim>(polynomial: OPolynomial<f64, U2, C>) -> RowDVector<f64>
        where
            nalgebra::DefaultAllocator: nalgebra::allocator::Allocator<f64, U2, C>,
        {
            RowDVector::from_iterator(polynomial.0.ncols(), polynomial.0.row(0).iter().copied())
        }
        Polynomial(match self {
            SegmentCurve::Linear(curve) => row(curve.polynomial()),
            SegmentCurve::Quadratic(curve) => row(curve.polynomial()),
            SegmentCurve::Cubic(curve) => row(curve.polynomial()),
        })
    }

    fn refine_x(&self, x: f64, t: f64) -> f64 {
        match self {
            SegmentCurve::Linear(curve) => curve.refine_x(x, t, NEWTON_ITERATIONS),
            SegmentCurve::Quadratic(curve) => curve.refine_x(x, t, NEWTON_ITERATIONS),
            SegmentCurve::Cubic(curve) => curve.refine_x(x, t, NEWTON_ITERATIONS),
        }
    }

    fn bisect_x(&self, x: f64) -> f64 {
        match self {
            SegmentCurve::Linear(curve) => curve.bisect_x(x, BISECTION_ITERATIONS),
            SegmentCurve::Quadratic(curve) => curve.bisect_x(x, BISECTION_ITERATIONS),
            SegmentCurve::Cubic(curve) => curve.bisect_x(x, BISECTION_ITERATIONS),
        }
    }

    /// Find the parameter `t` at which the curve reaches the x coordinate `x`.
    ///
    /// The curve's x has to be ascending in `t`, which clamped handles guarantee.
    /// `x` left of the curve yields `0` and right of it `1`.
    ///
    /// Solves `x(t) = x` in closed form, polishes the best root in `[0, 1]` with newton's method
    /// and verifies it. Should no root pass (e.g. due to cancellation in Cardano's formula),
    /// the interval is bisected instead.
    pub fn solve_t(&self, x: f64) -> f64 {
        let start = self.castlejau_eval(0.0);
        let end = self.castlejau_eval(1.0);
        self.solve_t_within(x, RESIDUAL_TOLERANCE * (end.x - start.x).max(1.0))
    }

    /// [`SegmentCurve::solve_t`] accepting closed form roots up to an x deviation of `tolerance`
    fn solve_t_within(&self, x: f64, tolerance: f64) -> f64 {
        let start = self.castlejau_eval(0.0);
        let end = self.castlejau_eval(1.0);
        if x <= start.x {
            return 0.0;
        }
        if x >= end.x {
            return 1.0;
        }

        let residual = |t: f64| (self.castlejau_eval(t).x - x).abs();

        let mut polynomial = self.x_polynomial();
        polynomial.0[0] -= x;
        let best = polynomial
            .roots()
            .into_iter()
            .filter(|t| t.is_finite() && *t >= -PARAMETER_SLACK && *t <= 1.0 + PARAMETER_SLACK)
            .map(|t| self.refine_x(x, t.clamp(0.0, 1.0)))
            .map(|t| (t, residual(t)))
            .min_by(|(_, a), (_, b)| a.total_cmp(b));

        match best {
            Some((t, error)) if error <= tolerance => t,
            _ => {
                log::debug!("closed form missed x = {}, bisecting {} segment", x, self.kind());
                self.bisect_x(x)
            }
        }
    }
}

/// A segment between two neighbouring anchors with its precomputed lookup map.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Segment {
    /// Position of the anchor the segment starts at
    pub start: Vector,

    /// Position of the anchor the segment ends at
    pub end: Vector,

    /// The exact curve
    #[cfg_attr(feature = "serde", serde(skip))]
    pub curve: SegmentCurve,

    /// Points on the curve at evenly spaced `t`, ascending in x
    pub map: Vec<Vector>,
}

impl Segment {
    /// Build the segment from `start` to `end`, sampling curved ones in `samples` steps.
    pub fn new(start: &ClampedAnchor, end: &ClampedAnchor, samples: usize) -> Self {
        let curve = SegmentCurve::new(start, end);
        let map = match curve.kind() {
            SegmentKind::Linear => vec![start.position, end.position],
            _ => {
                let steps = samples.max(1);
                (0..=steps)
                    .map(|i| curve.castlejau_eval(i as f64 / steps as f64))
                    .collect()
            }
        };
        Segment {
            start: start.position,
            end: end.position,
            curve,
            map,
        }
    }

    /// The segment's degree
    pub fn kind(&self) -> SegmentKind {
        self.curve.kind()
    }

    /// The x-range `[start, end]` covered by the segment
    pub fn range(&self) -> [f64; 2] {
        [self.start.x, self.end.x]
    }

    /// Whether `x` lies within the segment's x-range
    pub fn contains(&self, x: f64) -> bool {
        self.start.x <= x && x <= self.end.x
    }

    /// The curve's exact y at `x`
    ///
    /// A segment without width (both anchors share their x) reports its start's y.
    pub fn evaluate(&self, x: f64) -> f64 {
        if self.end.x <= self.start.x {
            return self.start.y;
        }
        if x == self.start.x {
            return self.start.y;
        }
        if x == self.end.x {
            return self.end.y;
        }
        self.curve.castlejau_eval(self.curve.solve_t(x)).y
    }

    /// The curve's y at `x` interpolated linearly between the lookup map's points
    pub fn sample(&self, x: f64) -> f64 {
        let index = self.map.partition_point(|point| point.x < x);
        if index == 0 {
            return self.map.first().map_or(self.start.y, |point| point.y);
        }
        let Some(&upper) = self.map.get(index) else {
            return self.map.last().map_or(self.end.y, |point| point.y);
        };
        let lower = self.map[index - 1];
        let width = upper.x - lower.x;
        if width <= 0.0 || upper.x == x {
            return upper.y;
        }
        lower.y + (upper.y - lower.y) * (x - lower.x) / width
    }

    /// The curve's tangent vector at `x`
    ///
    /// *The resulting vector is not normalized!*
    pub fn tangent(&self, x: f64) -> Vector {
        self.curve.tangent(self.curve.solve_t(x))
    }
}

/// Build the segments between each pair of neighbouring anchors.
pub fn build_segments(anchors: &[ClampedAnchor], samples: usize) -> Vec<Segment> {
    anchors
        .windows(2)
        .map(|pair| Segment::new(&pair[0], &pair[1], samples))
        .collect()
}
