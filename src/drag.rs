//! Dragging anchors and handles with a pointer.
//!
//! A [`DragSession`] remembers where the dragged point was when the gesture started.
//! Every pointer move reports the *total* delta since then, so repeated updates never
//! accumulate rounding errors.

use crate::anchor::HandleKind;
use crate::error::{CurveError, Result};
use crate::timeline::{AnchorUpdate, Timeline};
use crate::vector::Vector;

/// What a drag moves
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DragTarget {
    /// An anchor's position
    Position {
        /// Index of the anchor
        index: usize,
    },
    /// One of an anchor's handles
    Handle {
        /// Index of the anchor
        index: usize,
        /// Which handle
        kind: HandleKind,
    },
}

/// An ongoing drag gesture
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragSession {
    target: DragTarget,
    initial: Vector,
    /// Neighbours' x at drag start
    bounds: (Option<f64>, Option<f64>),
}

impl DragSession {
    /// Start dragging the position of anchor `index`
    pub fn position(timeline: &Timeline, index: usize) -> Result<Self> {
        let anchors = timeline.anchors();
        let anchor = anchors.get(index).ok_or(CurveError::IndexOutOfBounds {
            index,
            len: anchors.len(),
        })?;
        Ok(DragSession {
            target: DragTarget::Position { index },
            initial: anchor.position,
            bounds: (
                timeline.paired_anchor_position(HandleKind::Pre, index).map(|p| p.x),
                timeline.paired_anchor_position(HandleKind::Post, index).map(|p| p.x),
            ),
        })
    }

    /// Start dragging the `kind` handle of anchor `index`
    pub fn handle(timeline: &Timeline, index: usize, kind: HandleKind) -> Result<Self> {
        let anchors = timeline.anchors();
        let anchor = anchors.get(index).ok_or(CurveError::IndexOutOfBounds {
            index,
            len: anchors.len(),
        })?;
        let initial = anchor
            .absolute_handle(kind)
            .ok_or(CurveError::MissingHandle { index, kind })?;
        let paired = timeline
            .paired_anchor_position(kind, index)
            .ok_or(CurveError::UnpairedHandle { index, kind })?;
        Ok(DragSession {
            target: DragTarget::Handle { index, kind },
            initial,
            bounds: match kind {
                HandleKind::Pre => (Some(paired.x), None),
                HandleKind::Post => (None, Some(paired.x)),
            },
        })
    }

    /// What is being dragged
    pub fn target(&self) -> DragTarget {
        self.target
    }

    /// World space position of the dragged point when the drag started
    pub fn initial(&self) -> Vector {
        self.initial
    }

    /// Move the dragged point to its initial position plus `delta`.
    ///
    /// `delta` is the total movement since the drag started, already divided by the zoom.
    /// Positions stay `min_anchor_gap` away from the neighbours they had at drag start.
    /// Handles may be dragged anywhere, clamping happens when the curve is built.
    pub fn update(&self, timeline: &mut Timeline, delta: Vector) -> Result<()> {
        let target = self.initial + delta;
        match self.target {
            DragTarget::Position { index } => {
                let gap = timeline.config().min_anchor_gap;
                let mut x = target.x;
                if let (_, Some(next)) = self.bounds {
                    x = x.min(next - gap);
                }
                if let (Some(previous), _) = self.bounds {
                    x = x.max(previous + gap);
                }
                timeline.update(index, AnchorUpdate::Position(Vector::new(x, target.y)))
            }
            DragTarget::Handle { index, kind } => {
                timeline.set_handle_absolute(index, kind, target)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchor::Anchor;
    use crate::config::TimelineConfig;

    fn timeline() -> Timeline {
        Timeline::with_anchors(
            vec![
                Anchor::new(0.0, 0.0).with_post(30.0, 0.0),
                Anchor::new(100.0, 50.0).with_pre(30.0, 10.0),
                Anchor::new(200.0, 0.0),
            ],
            TimelineConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn total_delta() {
        let mut timeline = timeline();
        let drag = DragSession::position(&timeline, 1).unwrap();
        for i in 1..=100 {
            drag.update(&mut timeline, Vector::new(0.1 * i as f64, 0.0))
                .unwrap();
        }
        // The last delta alone decides the position
        assert_eq!(timeline.anchors()[1].position, Vector::new(110.0, 50.0));
        // Handles are relative and move along
        assert_eq!(timeline.anchors()[1].pre, Some(Vector::new(30.0, 10.0)));
    }

    #[test]
    fn position_bounds() {
        let mut timeline = timeline();
        let drag = DragSession::position(&timeline, 1).unwrap();
        drag.update(&mut timeline, Vector::new(-500.0, 0.0)).unwrap();
        assert_eq!(timeline.anchors()[1].position.x, 1.0);
    }

    #[test]
    fn handle_drag() {
        let mut timeline = timeline();
        let drag = DragSession::handle(&timeline, 1, HandleKind::Pre).unwrap();
        assert_eq!(drag.initial(), Vector::new(70.0, 60.0));
        drag.update(&mut timeline, Vector::new(-100.0, 0.0)).unwrap();
        assert_eq!(timeline.anchors()[1].pre, Some(Vector::new(130.0, 10.0)));
        // Stored as dragged, only the curve sees it clamped
        let clamped = timeline.clamped_anchors()[1].pre.unwrap().clamped;
        assert_eq!(clamped.x, 0.0);
    }

    #[test]
    fn invalid_handle_drags() {
        let timeline = timeline();
        assert_eq!(
            DragSession::handle(&timeline, 2, HandleKind::Post),
            Err(CurveError::MissingHandle {
                index: 2,
                kind: HandleKind::Post
            })
        );
        assert_eq!(
            DragSession::position(&timeline, 3),
            Err(CurveError::IndexOutOfBounds { index: 3, len: 3 })
        );
    }
}
