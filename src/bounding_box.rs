//! Axis aligned bounding boxes

use crate::vector::Vector;

/// Axis aligned box spanned by its two extreme corners
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    /// Corner with the smallest coordinates
    pub min: Vector,
    /// Corner with the largest coordinates
    pub max: Vector,
}

impl BoundingBox {
    /// Smallest box containing all `points`, `None` if there are none.
    pub fn from_iter<I: IntoIterator<Item = Vector>>(points: I) -> Option<BoundingBox> {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(
            BoundingBox {
                min: first,
                max: first,
            },
            |mut bb, p| {
                bb.min.x = bb.min.x.min(p.x);
                bb.min.y = bb.min.y.min(p.y);
                bb.max.x = bb.max.x.max(p.x);
                bb.max.y = bb.max.y.max(p.y);
                bb
            },
        ))
    }
}
