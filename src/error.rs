//! Errors raised by timeline operations.

use crate::anchor::HandleKind;
use thiserror::Error;

/// Everything that can go wrong while processing or mutating a timeline.
///
/// None of these are transient. An operation returning an error has left the timeline untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurveError {
    /// A handle points towards a neighbour which doesn't exist,
    /// e.g. a `pre` handle on the first anchor.
    #[error("attempted to process a {kind} control without a paired anchor (anchor {index})")]
    UnpairedHandle {
        /// Index of the anchor owning the handle
        index: usize,
        /// Which of its handles
        kind: HandleKind,
    },

    /// An anchor index past the end of the anchor list
    #[error("anchor index {index} is out of bounds for a timeline of {len} anchors")]
    IndexOutOfBounds {
        /// Requested index
        index: usize,
        /// Number of anchors
        len: usize,
    },

    /// The anchor list is not strictly ascending in x
    #[error("anchor {index} does not lie strictly after its predecessor")]
    Unsorted {
        /// Index of the first offending anchor
        index: usize,
    },

    /// A coordinate is NaN or infinite
    #[error("anchor {index} has a non-finite coordinate")]
    NonFinite {
        /// Index of the offending anchor
        index: usize,
    },

    /// An anchor can't be added on top of another one
    #[error("an anchor already exists at x = {x}")]
    Occupied {
        /// The requested x
        x: f64,
    },

    /// The anchor has no such handle to operate on
    #[error("anchor {index} has no {kind} control")]
    MissingHandle {
        /// Index of the anchor
        index: usize,
        /// The missing handle
        kind: HandleKind,
    },

    /// A handle kind string other than `pre` or `post`
    #[error("unknown control type `{0}`, expected `pre` or `post`")]
    UnknownHandleKind(String),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, CurveError>;
