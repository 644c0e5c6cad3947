//! Tunables of a [`Timeline`](crate::Timeline).

/// How [`Timeline::query`](crate::Timeline::query) evaluates the curve.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum QueryStrategy {
    /// Solve `x(t) = x` in closed form and evaluate `y(t)`
    #[default]
    Exact,

    /// Interpolate linearly between the segments' precomputed samples
    Sampled,
}

/// Configuration shared by all operations of a timeline.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct TimelineConfig {
    /// Evaluation strategy for queries
    pub strategy: QueryStrategy,

    /// Number of steps each curved segment's lookup map is sampled with.
    ///
    /// A map holds `samples + 1` points, straight segments always use two.
    pub samples: usize,

    /// Upper bound for the length of handles created by [`add_anchor`].
    ///
    /// [`add_anchor`]: crate::Timeline::add_anchor
    pub max_handle_length: f64,

    /// Minimal horizontal distance kept between an anchor and its neighbours while moving it
    pub min_anchor_gap: f64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        TimelineConfig {
            strategy: QueryStrategy::Exact,
            samples: 60,
            max_handle_length: 100.0,
            min_anchor_gap: 1.0,
        }
    }
}
