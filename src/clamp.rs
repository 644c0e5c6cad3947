//! Clamping of handles to keep the curve a function of x.
//!
//! A segment's curve stays monotonic in x as long as none of its control points leaves the
//! x-range spanned by the segment's two anchors. Handles are therefore pulled back onto the
//! interval between their anchor and the paired neighbour, sliding along the line from the
//! anchor to the handle so the tangent's direction is kept.

use crate::anchor::{AbsoluteAnchor, HandleKind};
use crate::vector::Vector;

/// A handle in world space, before and after clamping
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClampedHandle {
    /// Where the user put the handle, used to draw the tangent line
    pub unclamped: Vector,
    /// Where the curve actually bends towards
    pub clamped: Vector,
}

/// An anchor whose handles are ready for evaluating and drawing the curve
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClampedAnchor {
    /// Position on the curve
    pub position: Vector,
    /// Incoming handle
    pub pre: Option<ClampedHandle>,
    /// Outgoing handle
    pub post: Option<ClampedHandle>,
}

impl ClampedAnchor {
    /// The handle of the given kind
    pub fn handle(&self, kind: HandleKind) -> Option<ClampedHandle> {
        match kind {
            HandleKind::Pre => self.pre,
            HandleKind::Post => self.post,
        }
    }
}

/// Clamp an absolute handle of an anchor at `position` against its paired neighbour.
///
/// The legal x-range is `[position.x, paired.x]` for `post` and `[paired.x, position.x]` for
/// `pre` handles. A handle outside of it is moved onto the range's border, its y scaled by the
/// same ratio its x distance to the anchor shrank by.
///
/// ```
/// # use bezier_timeline::anchor::HandleKind;
/// # use bezier_timeline::clamp::clamp;
/// # use bezier_timeline::vector::Vector;
/// let handle = clamp(
///     HandleKind::Post,
///     Vector::new(100.0, 0.0),
///     Vector::new(300.0, 60.0),
///     Vector::new(200.0, 0.0),
/// );
/// assert_eq!(handle.clamped, Vector::new(200.0, 30.0));
/// assert_eq!(handle.unclamped, Vector::new(300.0, 60.0));
/// ```
pub fn clamp(kind: HandleKind, position: Vector, handle: Vector, paired: Vector) -> ClampedHandle {
    let (min, max) = match kind {
        HandleKind::Pre => (paired.x, position.x),
        HandleKind::Post => (position.x, paired.x),
    };
    // Corrupt (unsorted) input would flip the range, keep the function total anyway
    let (min, max) = (min.min(max), min.max(max));
    let x = handle.x.min(max).max(min);

    if x == handle.x {
        return ClampedHandle {
            unclamped: handle,
            clamped: handle,
        };
    }

    // x differs from handle.x and lies on the anchor's side, so this can't divide by zero
    let ratio = (position.x - x) / (position.x - handle.x);
    let y = (handle.y - position.y) * ratio + position.y;
    ClampedHandle {
        unclamped: handle,
        clamped: Vector::new(x, y),
    }
}

/// Clamp every handle of a list of absolute anchors.
///
/// Handles without a paired neighbour are expected to have been dropped already
/// (see [`to_absolute_lossy`](crate::anchor::to_absolute_lossy)) and are ignored here.
pub fn clamp_anchors(anchors: &[AbsoluteAnchor]) -> Vec<ClampedAnchor> {
    let len = anchors.len();
    anchors
        .iter()
        .enumerate()
        .map(|(index, anchor)| {
            let resolve = |kind: HandleKind| {
                let handle = anchor.handle(kind)?;
                let paired = anchors[kind.paired_index(index, len)?].position;
                Some(clamp(kind, anchor.position, handle, paired))
            };
            ClampedAnchor {
                position: anchor.position,
                pre: resolve(HandleKind::Pre),
                post: resolve(HandleKind::Post),
            }
        })
        .collect()
}
