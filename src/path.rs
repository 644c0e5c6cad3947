//! Draw a timeline's curve as a svg path

use crate::clamp::ClampedAnchor;
use crate::segment::SegmentKind;
use crate::vector::{PartialVector, Vector};
use std::fmt::Write;
use std::ops::Range;

/// Transformation and selection applied when building a path
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PathConfig {
    /// Scale applied to every coordinate
    pub zoom: Vector,

    /// Translation applied after scaling
    pub offset: Vector,

    /// Only draw the anchors in this index range
    pub range: Option<Range<usize>>,
}

impl Default for PathConfig {
    fn default() -> Self {
        PathConfig {
            zoom: Vector::new(1.0, 1.0),
            offset: Vector::ZERO,
            range: None,
        }
    }
}

impl PathConfig {
    /// Build a config from possibly incomplete vectors.
    ///
    /// Missing zoom axes default to `1` and missing offset axes to `0`.
    pub fn from_partial(zoom: PartialVector, offset: PartialVector) -> Self {
        PathConfig {
            zoom: zoom.or(1.0),
            offset: offset.or(0.0),
            range: None,
        }
    }

    /// Builder restricting the path to a range of anchor indices
    pub fn with_range(mut self, range: Range<usize>) -> Self {
        self.range = Some(range);
        self
    }

    fn transform(&self, point: Vector) -> Vector {
        point * self.zoom + self.offset
    }
}

/// This type wraps a mutable String reference and appends the commands of a svg `<path>`'s
/// `d` attribute to it.
///
/// ```
/// # use bezier_timeline::clamp::ClampedAnchor;
/// # use bezier_timeline::vector::Vector;
/// use bezier_timeline::path::{PathConfig, SvgPath};
///
/// let anchors = [
///     ClampedAnchor { position: Vector::new(0.0, 0.0), pre: None, post: None },
///     ClampedAnchor { position: Vector::new(2.0, 3.0), pre: None, post: None },
/// ];
/// let mut d = String::new();
/// SvgPath::from(&mut d).add_anchors(&anchors, &PathConfig::default());
/// assert_eq!(d, "M 0 0 L 2 3");
/// ```
pub struct SvgPath<'s>(&'s mut String);

impl<'s> From<&'s mut String> for SvgPath<'s> {
    fn from(string: &'s mut String) -> Self {
        SvgPath(string)
    }
}

impl<'s> SvgPath<'s> {
    /// Append the curve through `anchors`.
    ///
    /// Starts with a `M` to the first anchor and continues with one `L`, `Q` or `C` segment per
    /// pair of neighbours. A command letter is only written when it differs from the previous one.
    pub fn add_anchors(&mut self, anchors: &[ClampedAnchor], config: &PathConfig) {
        let anchors = match &config.range {
            Some(range) => {
                let end = range.end.min(anchors.len());
                &anchors[range.start.min(end)..end]
            }
            None => anchors,
        };
        let first = match anchors.first() {
            Some(first) => first,
            None => return,
        };

        let start = config.transform(first.position);
        let _ = write!(self.0, "M {} {}", start.x, start.y);

        let mut command = None;
        for pair in anchors.windows(2) {
            let (from, to) = (&pair[0], &pair[1]);
            let kind = SegmentKind::between(from, to);
            if command != Some(kind) {
                let _ = write!(self.0, " {}", kind);
                command = Some(kind);
            }

            let controls = from.post.map(|h| h.clamped).into_iter();
            let controls = controls.chain(to.pre.map(|h| h.clamped));
            for point in controls.chain(Some(to.position)) {
                let point = config.transform(point);
                let _ = write!(self.0, " {} {}", point.x, point.y);
            }
        }
    }
}

/// Build the `d` attribute for the curve through `anchors`
pub fn d(anchors: &[ClampedAnchor], config: &PathConfig) -> String {
    let mut d = String::new();
    SvgPath::from(&mut d).add_anchors(anchors, config);
    d
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchor::{to_absolute, Anchor};
    use crate::clamp::clamp_anchors;

    fn clamped(anchors: &[Anchor]) -> Vec<ClampedAnchor> {
        clamp_anchors(&to_absolute(anchors).unwrap())
    }

    #[test]
    fn repeated_commands_are_skipped() {
        let anchors = clamped(&[
            Anchor::new(0.0, 0.0),
            Anchor::new(10.0, 5.0),
            Anchor::new(20.0, 0.0),
        ]);
        assert_eq!(d(&anchors, &PathConfig::default()), "M 0 0 L 10 5 20 0");
    }

    #[test]
    fn transformed() {
        let anchors = clamped(&[
            Anchor::new(0.0, 0.0).with_post(5.0, 5.0),
            Anchor::new(10.0, 5.0),
        ]);
        let config = PathConfig::from_partial(
            PartialVector {
                x: Some(2.0),
                y: None,
            },
            PartialVector {
                x: None,
                y: Some(-1.0),
            },
        );
        assert_eq!(d(&anchors, &config), "M 0 -1 Q 10 4 20 4");
    }

    #[test]
    fn range() {
        let anchors = clamped(&[
            Anchor::new(0.0, 0.0),
            Anchor::new(10.0, 5.0),
            Anchor::new(20.0, 0.0),
        ]);
        let config = PathConfig::default().with_range(1..7);
        assert_eq!(d(&anchors, &config), "M 10 5 L 20 0");
        assert_eq!(d(&[], &PathConfig::default()), "");
    }
}
