//! The anchor list and everything derived from it.
//!
//! A [`Timeline`] is the single owner of its anchors. Every mutation validates its input first,
//! applies it and then rebuilds the derived views (absolute anchors, clamped anchors and
//! segments) before returning, so the views never lag behind the anchors.

use crate::anchor::{self, AbsoluteAnchor, Anchor, HandleKind};
use crate::bounding_box::BoundingBox;
use crate::clamp::{self, ClampedAnchor};
use crate::config::{QueryStrategy, TimelineConfig};
use crate::error::{CurveError, Result};
use crate::path::{self, PathConfig};
use crate::query;
use crate::segment::{self, Segment};
use crate::vector::Vector;

/// Index-path style partial update of a single anchor, see [`Timeline::update`]
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AnchorUpdate {
    /// Move the anchor, its handles move along
    Position(Vector),
    /// Replace or remove the stored (relative) incoming handle
    Pre(Option<Vector>),
    /// Replace or remove the stored (relative) outgoing handle
    Post(Option<Vector>),
}

/// The y-range a UI declares for its viewport
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueRange {
    /// Lowest value the viewport shows
    pub min: f64,
    /// Highest value the viewport shows
    pub max: f64,
}

/// How far a timeline's points overflow a [`ValueRange`], both non-negative
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Padding {
    /// Overflow below the range's `min`
    pub min: f64,
    /// Overflow above the range's `max`
    pub max: f64,
}

/// An animation curve: anchors ordered by x, connected by bezier segments.
///
/// ```
/// use bezier_timeline::{Anchor, Timeline, TimelineConfig};
///
/// let mut timeline = Timeline::with_anchors(
///     vec![
///         Anchor::new(0.0, 0.0).with_post(50.0, 0.0),
///         Anchor::new(100.0, 100.0).with_pre(50.0, 0.0),
///     ],
///     TimelineConfig::default(),
/// )
/// .unwrap();
///
/// assert_eq!(timeline.query(-10.0), 0.0);
/// assert!((timeline.query(50.0) - 50.0).abs() < 1e-9);
///
/// let index = timeline.add_anchor(25.0, None).unwrap();
/// assert_eq!(index, 1);
/// assert_eq!(timeline.anchors().len(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct Timeline {
    anchors: Vec<Anchor>,
    config: TimelineConfig,
    version: u64,

    absolute: Vec<AbsoluteAnchor>,
    clamped: Vec<ClampedAnchor>,
    segments: Vec<Segment>,
}

impl Default for Timeline {
    fn default() -> Self {
        Timeline::new(TimelineConfig::default())
    }
}

impl Timeline {
    /// An empty timeline
    pub fn new(config: TimelineConfig) -> Self {
        Timeline {
            anchors: Vec::new(),
            config,
            version: 0,
            absolute: Vec::new(),
            clamped: Vec::new(),
            segments: Vec::new(),
        }
    }

    /// A timeline starting with `anchors`.
    ///
    /// Fails if the anchors aren't strictly ascending in x or contain non-finite numbers.
    pub fn with_anchors(anchors: Vec<Anchor>, config: TimelineConfig) -> Result<Self> {
        let mut timeline = Timeline::new(config);
        timeline.set_anchors(anchors)?;
        Ok(timeline)
    }

    /// The stored anchors
    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    /// The active configuration
    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    /// Counter incremented by every mutation
    pub fn version(&self) -> u64 {
        self.version
    }

    /// The anchors with their handles in world space, unpaired handles left out
    pub fn absolute_anchors(&self) -> &[AbsoluteAnchor] {
        &self.absolute
    }

    /// The anchors with their handles clamped to keep the curve a function of x
    pub fn clamped_anchors(&self) -> &[ClampedAnchor] {
        &self.clamped
    }

    /// The segments between neighbouring anchors
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Replace the configuration
    pub fn set_config(&mut self, config: TimelineConfig) {
        self.config = config;
        self.recompute();
    }

    /// Replace all anchors at once.
    ///
    /// Fails if the anchors aren't strictly ascending in x or contain non-finite numbers.
    /// A `pre` handle on the first or a `post` handle on the last anchor has no neighbour to pair
    /// with. It is kept as stored but ignored by the curve, like a handle left dangling by
    /// [`Timeline::delete_anchor`].
    pub fn set_anchors(&mut self, anchors: Vec<Anchor>) -> Result<()> {
        anchor::validate(&anchors)?;
        self.anchors = anchors;
        self.recompute();
        Ok(())
    }

    /// Update a single field of the anchor at `index`.
    ///
    /// A new position is kept `min_anchor_gap` away from the neighbours.
    /// Handles may only be set where a neighbour to pair them with exists.
    pub fn update(&mut self, index: usize, update: AnchorUpdate) -> Result<()> {
        self.check_index(index)?;
        match update {
            AnchorUpdate::Position(position) => {
                if !position.is_finite() {
                    return Err(CurveError::NonFinite { index });
                }
                let x = self.constrain_x(index, position.x);
                self.anchors[index].position = Vector::new(x, position.y);
            }
            AnchorUpdate::Pre(handle) => self.set_handle(index, HandleKind::Pre, handle)?,
            AnchorUpdate::Post(handle) => self.set_handle(index, HandleKind::Post, handle)?,
        }
        self.recompute();
        Ok(())
    }

    /// Set a handle from its world space position.
    pub fn set_handle_absolute(
        &mut self,
        index: usize,
        kind: HandleKind,
        absolute: Vector,
    ) -> Result<()> {
        self.check_index(index)?;
        if !absolute.is_finite() {
            return Err(CurveError::NonFinite { index });
        }
        if kind.paired_index(index, self.anchors.len()).is_none() {
            return Err(CurveError::UnpairedHandle { index, kind });
        }
        self.anchors[index].set_absolute_handle(kind, absolute);
        self.recompute();
        Ok(())
    }

    /// Insert an anchor at `x` and return its index.
    ///
    /// `y` defaults to the curve's current value at `x`, so the curve keeps passing through
    /// that point. New handles are at most half the distance to the neighbours long (and never
    /// longer than `max_handle_length`); neighbouring handles exceeding that length are
    /// shortened. Anchors inserted between two others get handles along the curve's tangent,
    /// ones at the edges flat handles.
    pub fn add_anchor(&mut self, x: f64, y: Option<f64>) -> Result<usize> {
        let index = self.anchors.partition_point(|anchor| anchor.position.x <= x);
        if !x.is_finite() || !y.map_or(true, f64::is_finite) {
            return Err(CurveError::NonFinite { index });
        }
        if index > 0 && self.anchors[index - 1].position.x == x {
            return Err(CurveError::Occupied { x });
        }

        let y = y.unwrap_or_else(|| self.query(x));
        let max_length = self.config.max_handle_length;
        let mut anchor = Anchor::new(x, y);

        let previous = index.checked_sub(1).map(|i| self.anchors[i].position);
        let next = self.anchors.get(index).map(|anchor| anchor.position);
        match (previous, next) {
            (None, None) => {}
            (Some(previous), None) => {
                let length = ((x - previous.x) / 2.0).min(max_length);
                anchor.pre = Some(Vector::new(length, 0.0));
                fit_handle(&mut self.anchors[index - 1].post, length);
            }
            (None, Some(next)) => {
                let length = ((next.x - x) / 2.0).min(max_length);
                anchor.post = Some(Vector::new(length, 0.0));
                fit_handle(&mut self.anchors[index].pre, length);
            }
            (Some(previous), Some(next)) => {
                let length = ((x - previous.x) / 2.0)
                    .min((next.x - x) / 2.0)
                    .min(max_length);
                let offset = self.direction(x) * length;
                anchor.pre = Some(HandleKind::Pre.from_offset(-offset));
                anchor.post = Some(HandleKind::Post.from_offset(offset));
                shorten_handle(&mut self.anchors[index - 1].post, length);
                shorten_handle(&mut self.anchors[index].pre, length);
            }
        }

        self.anchors.insert(index, anchor);
        self.recompute();
        Ok(index)
    }

    /// Remove the anchor at `index` and return it.
    ///
    /// The neighbours are left as they are. A handle of the new first or last anchor pointing
    /// past the curve's end stays stored but is ignored until an anchor is added on that side.
    pub fn delete_anchor(&mut self, index: usize) -> Result<Anchor> {
        self.check_index(index)?;
        let anchor = self.anchors.remove(index);
        self.recompute();
        Ok(anchor)
    }

    /// Position of the neighbour the `kind` handle of anchor `index` is paired with
    pub fn paired_anchor_position(&self, kind: HandleKind, index: usize) -> Option<Vector> {
        if index >= self.anchors.len() {
            return None;
        }
        kind.paired_index(index, self.anchors.len())
            .map(|paired| self.anchors[paired].position)
    }

    /// The curve's value at `x` using the configured [`QueryStrategy`]
    pub fn query(&self, x: f64) -> f64 {
        match self.config.strategy {
            QueryStrategy::Exact => self.query_exact(x),
            QueryStrategy::Sampled => self.query_sampled(x),
        }
    }

    /// The curve's exact value at `x`
    pub fn query_exact(&self, x: f64) -> f64 {
        query::query_exact(&self.clamped, &self.segments, x)
    }

    /// The curve's value at `x` interpolated from the segments' lookup maps
    pub fn query_sampled(&self, x: f64) -> f64 {
        query::query_sampled(&self.clamped, &self.segments, x)
    }

    /// The curve's slope `dy/dx` at `x`, `0` where it's held flat
    pub fn slope(&self, x: f64) -> f64 {
        query::slope(&self.clamped, &self.segments, x)
    }

    /// The curve's tangent at `x` as a unit vector pointing forwards in x.
    ///
    /// Flat outside of the curve's domain and wherever the tangent degenerates.
    pub fn direction(&self, x: f64) -> Vector {
        match query::tangent(&self.clamped, &self.segments, x) {
            Some(tangent) if tangent.length() > 0.0 => {
                let tangent = Vector::new(tangent.x.max(0.0), tangent.y);
                tangent / tangent.length()
            }
            _ => Vector::new(1.0, 0.0),
        }
    }

    /// `count` evenly spaced points of the curve from `from` to `to`, both included
    pub fn sample(&self, from: f64, to: f64, count: usize) -> Vec<Vector> {
        match count {
            0 => Vec::new(),
            1 => vec![Vector::new(from, self.query(from))],
            _ => {
                let step = (to - from) / (count - 1) as f64;
                (0..count)
                    .map(|i| {
                        let x = if i == count - 1 { to } else { from + step * i as f64 };
                        Vector::new(x, self.query(x))
                    })
                    .collect()
            }
        }
    }

    /// The svg path `d` attribute drawing the curve
    pub fn d(&self, config: &PathConfig) -> String {
        path::d(&self.clamped, config)
    }

    /// Bounding box of the anchors and their (unclamped) handles
    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::from_iter(self.absolute.iter().flat_map(|anchor| {
            [Some(anchor.position), anchor.pre, anchor.post]
                .into_iter()
                .flatten()
        }))
    }

    /// How far the anchors and their handles overflow `range` on either side
    pub fn padding(&self, range: ValueRange) -> Padding {
        match self.bounds() {
            Some(bounds) => Padding {
                min: (range.min - bounds.min.y).max(0.0),
                max: (bounds.max.y - range.max).max(0.0),
            },
            None => Padding::default(),
        }
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.anchors.len() {
            Ok(())
        } else {
            Err(CurveError::IndexOutOfBounds {
                index,
                len: self.anchors.len(),
            })
        }
    }

    /// Keep `x` between the neighbours of anchor `index`
    fn constrain_x(&self, index: usize, x: f64) -> f64 {
        let gap = self.config.min_anchor_gap;
        let previous = index.checked_sub(1).map(|i| self.anchors[i].position.x);
        let next = self.anchors.get(index + 1).map(|anchor| anchor.position.x);

        let mut x = x;
        if let Some(previous) = previous {
            x = x.max(previous + gap);
        }
        if let Some(next) = next {
            x = x.min(next - gap);
        }
        match (previous, next) {
            // Neighbours closer than two gaps
            (Some(previous), Some(next)) if x <= previous || x >= next => (previous + next) / 2.0,
            (Some(previous), None) if x <= previous => previous + gap.abs().max(f64::EPSILON),
            (None, Some(next)) if x >= next => next - gap.abs().max(f64::EPSILON),
            _ => x,
        }
    }

    fn set_handle(&mut self, index: usize, kind: HandleKind, handle: Option<Vector>) -> Result<()> {
        if let Some(handle) = handle {
            if !handle.is_finite() {
                return Err(CurveError::NonFinite { index });
            }
            if kind.paired_index(index, self.anchors.len()).is_none() {
                return Err(CurveError::UnpairedHandle { index, kind });
            }
        }
        *self.anchors[index].handle_mut(kind) = handle;
        Ok(())
    }

    fn recompute(&mut self) {
        self.version += 1;
        self.absolute = anchor::to_absolute_lossy(&self.anchors);
        self.clamped = clamp::clamp_anchors(&self.absolute);
        self.segments = segment::build_segments(&self.clamped, self.config.samples);
        log::trace!(
            "recomputed timeline v{}: {} anchors, {} segments",
            self.version,
            self.anchors.len(),
            self.segments.len()
        );
    }
}

/// Scale `handle` down to `length` if it's longer
fn shorten_handle(handle: &mut Option<Vector>, length: f64) {
    if let Some(handle) = handle {
        let current = handle.length();
        if current > length && current > 0.0 {
            *handle *= length / current;
        }
    }
}

/// Like [`shorten_handle`] but adds a flat handle of `length` if there is none
fn fit_handle(handle: &mut Option<Vector>, length: f64) {
    match handle {
        Some(_) => shorten_handle(handle, length),
        None => *handle = Some(Vector::new(length, 0.0)),
    }
}
