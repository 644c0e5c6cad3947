//! The stored anchor representation and its conversion into world space.
//!
//! Handles are stored *relative* to their anchor:
//! - `x` is a distance along the x axis, pointing away from the anchor towards the paired
//!   neighbour. It is non-negative for well formed handles, the direction is given by the
//!   handle's [`HandleKind`] (`pre` points backwards, `post` forwards).
//! - `y` is a plain offset from the anchor's y.
//!
//! This keeps handles attached when their anchor is moved.

use crate::error::{CurveError, Result};
use crate::vector::Vector;
use std::fmt;
use std::str::FromStr;

/// Which of an anchor's two handles
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum HandleKind {
    /// Incoming handle, paired with the previous anchor
    Pre,
    /// Outgoing handle, paired with the next anchor
    Post,
}

impl HandleKind {
    /// `-1` for `pre`, `1` for `post`
    pub fn direction(self) -> f64 {
        match self {
            HandleKind::Pre => -1.0,
            HandleKind::Post => 1.0,
        }
    }

    /// Index of the neighbour a handle of anchor `index` is paired with,
    /// in a list of `len` anchors.
    pub fn paired_index(self, index: usize, len: usize) -> Option<usize> {
        match self {
            HandleKind::Pre => index.checked_sub(1),
            HandleKind::Post => Some(index + 1).filter(|&next| next < len),
        }
    }

    /// Turn a stored relative handle into a world space offset from its anchor.
    pub fn to_offset(self, relative: Vector) -> Vector {
        Vector::new(relative.x * self.direction(), relative.y)
    }

    /// Inverse of [`HandleKind::to_offset`]
    pub fn from_offset(self, offset: Vector) -> Vector {
        Vector::new(offset.x * self.direction(), offset.y)
    }
}

impl fmt::Display for HandleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HandleKind::Pre => "pre",
            HandleKind::Post => "post",
        })
    }
}

impl FromStr for HandleKind {
    type Err = CurveError;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pre" => Ok(HandleKind::Pre),
            "post" => Ok(HandleKind::Post),
            other => Err(CurveError::UnknownHandleKind(other.to_owned())),
        }
    }
}

/// An anchor as it is stored, handles in relative form.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Anchor {
    /// Position on the curve
    pub position: Vector,

    /// Incoming handle
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub pre: Option<Vector>,

    /// Outgoing handle
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub post: Option<Vector>,
}

impl Anchor {
    /// An anchor without handles
    pub fn new(x: f64, y: f64) -> Self {
        Anchor {
            position: Vector::new(x, y),
            pre: None,
            post: None,
        }
    }

    /// Builder setting the incoming handle
    pub fn with_pre(mut self, x: f64, y: f64) -> Self {
        self.pre = Some(Vector::new(x, y));
        self
    }

    /// Builder setting the outgoing handle
    pub fn with_post(mut self, x: f64, y: f64) -> Self {
        self.post = Some(Vector::new(x, y));
        self
    }

    /// The stored (relative) handle of the given kind
    pub fn handle(&self, kind: HandleKind) -> Option<Vector> {
        match kind {
            HandleKind::Pre => self.pre,
            HandleKind::Post => self.post,
        }
    }

    /// Mutable access to the stored handle of the given kind
    pub fn handle_mut(&mut self, kind: HandleKind) -> &mut Option<Vector> {
        match kind {
            HandleKind::Pre => &mut self.pre,
            HandleKind::Post => &mut self.post,
        }
    }

    /// World space position of one of the handles, if present.
    pub fn absolute_handle(&self, kind: HandleKind) -> Option<Vector> {
        self.handle(kind)
            .map(|relative| self.position + kind.to_offset(relative))
    }

    /// Store the handle of the given kind from a world space position.
    ///
    /// No clamping or rounding is applied. The x component may become negative when the
    /// absolute position lies on the wrong side of the anchor; clamping takes care of that
    /// when the curve is processed.
    pub fn set_absolute_handle(&mut self, kind: HandleKind, absolute: Vector) {
        *self.handle_mut(kind) = Some(kind.from_offset(absolute - self.position));
    }

    fn is_finite(&self) -> bool {
        self.position.is_finite()
            && self.pre.map_or(true, |pre| pre.is_finite())
            && self.post.map_or(true, |post| post.is_finite())
    }
}

/// An anchor with its handles resolved to world space positions.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbsoluteAnchor {
    /// Position on the curve
    pub position: Vector,
    /// Absolute incoming handle
    pub pre: Option<Vector>,
    /// Absolute outgoing handle
    pub post: Option<Vector>,
}

impl AbsoluteAnchor {
    /// The absolute handle of the given kind
    pub fn handle(&self, kind: HandleKind) -> Option<Vector> {
        match kind {
            HandleKind::Pre => self.pre,
            HandleKind::Post => self.post,
        }
    }
}

/// Resolve every anchor's handles to world space.
///
/// Fails with [`CurveError::UnpairedHandle`] if a handle has no neighbour to point to,
/// i.e. the first anchor has a `pre` or the last one a `post` handle.
pub fn to_absolute(anchors: &[Anchor]) -> Result<Vec<AbsoluteAnchor>> {
    let len = anchors.len();
    anchors
        .iter()
        .enumerate()
        .map(|(index, anchor)| {
            for kind in [HandleKind::Pre, HandleKind::Post] {
                if anchor.handle(kind).is_some() && kind.paired_index(index, len).is_none() {
                    return Err(CurveError::UnpairedHandle { index, kind });
                }
            }
            Ok(AbsoluteAnchor {
                position: anchor.position,
                pre: anchor.absolute_handle(HandleKind::Pre),
                post: anchor.absolute_handle(HandleKind::Post),
            })
        })
        .collect()
}

/// Like [`to_absolute`] but drops unpaired handles instead of failing.
///
/// Deleting an edge anchor leaves its neighbour with a handle pointing nowhere.
/// That handle stays stored (a later insertion pairs it up again) but takes no part in the curve.
pub fn to_absolute_lossy(anchors: &[Anchor]) -> Vec<AbsoluteAnchor> {
    let len = anchors.len();
    anchors
        .iter()
        .enumerate()
        .map(|(index, anchor)| {
            let resolve = |kind: HandleKind| {
                let handle = anchor.absolute_handle(kind)?;
                if kind.paired_index(index, len).is_none() {
                    log::debug!("skipping unpaired {} control of anchor {}", kind, index);
                    return None;
                }
                Some(handle)
            };
            AbsoluteAnchor {
                position: anchor.position,
                pre: resolve(HandleKind::Pre),
                post: resolve(HandleKind::Post),
            }
        })
        .collect()
}

/// Check the anchor list's ordering invariant.
///
/// Positions have to be finite and strictly ascending in x.
pub fn validate(anchors: &[Anchor]) -> Result<()> {
    for (index, anchor) in anchors.iter().enumerate() {
        if !anchor.is_finite() {
            return Err(CurveError::NonFinite { index });
        }
        if index > 0 && anchors[index - 1].position.x >= anchor.position.x {
            return Err(CurveError::Unsorted { index });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_point_away_from_anchor() {
        let anchors = [
            Anchor::new(0.0, 0.0).with_post(50.0, 10.0),
            Anchor::new(200.0, 100.0).with_pre(30.0, -20.0),
        ];
        let absolute = to_absolute(&anchors).unwrap();
        assert_eq!(absolute[0].post, Some(Vector::new(50.0, 10.0)));
        assert_eq!(absolute[1].pre, Some(Vector::new(170.0, 80.0)));
    }

    #[test]
    fn unpaired_handles() {
        let anchors = [
            Anchor::new(0.0, 0.0).with_pre(10.0, 0.0),
            Anchor::new(100.0, 0.0),
        ];
        assert_eq!(
            to_absolute(&anchors),
            Err(CurveError::UnpairedHandle {
                index: 0,
                kind: HandleKind::Pre
            })
        );
        let lossy = to_absolute_lossy(&anchors);
        assert_eq!(lossy[0].pre, None);
        assert_eq!(lossy.len(), 2);
    }

    #[test]
    fn absolute_round_trip() {
        let mut anchor = Anchor::new(100.0, 50.0);
        anchor.set_absolute_handle(HandleKind::Pre, Vector::new(60.0, 70.0));
        assert_eq!(anchor.pre, Some(Vector::new(40.0, 20.0)));
        assert_eq!(
            anchor.absolute_handle(HandleKind::Pre),
            Some(Vector::new(60.0, 70.0))
        );
    }

    #[test]
    fn ordering() {
        assert_eq!(validate(&[Anchor::new(0.0, 0.0), Anchor::new(1.0, 0.0)]), Ok(()));
        assert_eq!(
            validate(&[Anchor::new(1.0, 0.0), Anchor::new(1.0, 5.0)]),
            Err(CurveError::Unsorted { index: 1 })
        );
        assert_eq!(
            validate(&[Anchor::new(f64::NAN, 0.0)]),
            Err(CurveError::NonFinite { index: 0 })
        );
    }
}
