#![forbid(unsafe_code)]

//! Context construction: input sanitising, derived metrics and priority
//! orderings.
//!
//! [`ContextBuilder`] turns a list of [`SegmentConfig`]s and a root distance
//! into a [`ResolutionContext`]. Validation happens exactly once, here; the
//! resolvers only ever read the validated [`SegmentMetrics`].
//!
//! # Invariants
//!
//! 1. `0 <= min <= max` for every segment.
//! 2. `min <= base <= max` before any derived metric is computed.
//! 3. `compress_capacity + compress_solidify >= base`, with equality when
//!    `compress_ratio <= 1`.
//! 4. Segments are owned by the context and addressed by index; the vector
//!    is never resized after construction.
//!
//! # Failure Modes
//!
//! None. Every malformed value is corrected:
//!
//! | Input | Correction |
//! |---|---|
//! | negative or non-finite `min` | `0` |
//! | NaN `max` | unbounded |
//! | `max < min` | `max = min` |
//! | NaN `base` | `0`, then clamped |
//! | `base` outside `[min, max]` | clamped; still infinite falls back to `min` |
//! | negative or non-finite ratio | `0` |
//! | negative or NaN root distance | `0` (`+∞` is kept as an unbounded budget) |

use std::collections::VecDeque;

use serde::Serialize;

use crate::compress::CompressionResolver;
use crate::expand::ExpansionResolver;
use crate::logging::{debug, debug_span};
use crate::report::ResolutionReport;
use crate::segment::{Segment, SegmentConfig};

/// Proportional share of `x` for `weight` out of `denom`.
///
/// Returns exactly `0` whenever any argument is non-positive (or NaN), and
/// when the share is undefined (`∞ / ∞`). A share that overflows is
/// re-associated, and if that still overflows it saturates at `x`; the
/// caller's ceiling or running totals cut it from there.
#[inline]
pub(crate) fn scale(x: f64, denom: f64, weight: f64) -> f64 {
    if !(x > 0.0 && denom > 0.0 && weight > 0.0) {
        return 0.0;
    }
    let share = x / denom * weight;
    if share.is_finite() {
        return share;
    }
    if share.is_nan() {
        return 0.0;
    }
    let share = x * (weight / denom);
    if share.is_finite() { share } else { x }
}

#[inline]
fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Which resolver a context is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolveMode {
    /// Demand exceeds the root distance; segments shrink.
    Compress,
    /// The root distance covers demand; segments grow into the surplus.
    Expand,
}

impl ResolveMode {
    /// Route on budget versus demand. A tie expands with zero surplus.
    #[must_use]
    pub fn select(root_distance: f64, total_base: f64) -> Self {
        if root_distance < total_base {
            Self::Compress
        } else {
            Self::Expand
        }
    }
}

/// Validated per-segment values the resolvers work from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SegmentMetrics {
    /// Validated lower bound.
    pub min: f64,
    /// Validated upper bound (may be infinite).
    pub max: f64,
    /// Desired size clamped into `[min, max]`.
    pub base: f64,
    /// Validated compressible fraction.
    pub compress_ratio: f64,
    /// Validated surplus weight.
    pub expand_ratio: f64,
    /// `base * compress_ratio`.
    pub compress_capacity: f64,
    /// Incompressible part of `base`.
    pub compress_solidify: f64,
}

impl SegmentMetrics {
    /// Validate a config and derive its metrics.
    #[must_use]
    pub fn from_config(config: &SegmentConfig) -> Self {
        let min = finite_or_zero(config.min).max(0.0);
        let max = if config.max.is_nan() {
            f64::INFINITY
        } else {
            config.max
        }
        .max(min);
        let base = if config.base.is_nan() { 0.0 } else { config.base };
        let mut base = base.clamp(min, max);
        if !base.is_finite() {
            base = min;
        }
        let compress_ratio = finite_or_zero(config.compress_ratio).max(0.0);
        let expand_ratio = finite_or_zero(config.expand_ratio).max(0.0);
        let compress_capacity = base * compress_ratio;
        let compress_solidify = (base - compress_capacity).max(0.0);

        Self {
            min,
            max,
            base,
            compress_ratio,
            expand_ratio,
            compress_capacity,
            compress_solidify,
        }
    }

    /// How far the segment can shrink before hitting its effective floor.
    #[inline]
    #[must_use]
    pub fn compress_headroom(&self) -> f64 {
        (self.base - self.compress_solidify.max(self.min)).max(0.0)
    }

    /// How far the segment can grow before hitting `max`.
    #[inline]
    #[must_use]
    pub fn expand_headroom(&self) -> f64 {
        (self.max - self.base).max(0.0)
    }
}

/// Running sums over all segments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    /// Σ validated base.
    pub base: f64,
    /// Σ compress_solidify.
    pub solidify: f64,
    /// Σ expand_ratio.
    pub expand_ratio: f64,
}

impl Totals {
    fn accumulate(&mut self, metrics: &SegmentMetrics) {
        self.base += metrics.base;
        self.solidify += metrics.compress_solidify;
        self.expand_ratio += metrics.expand_ratio;
    }
}

/// Order in which compression visits segments.
///
/// One forward pass against a running low-water mark: a segment whose
/// headroom is at or below every headroom seen so far goes to the front,
/// anything else to the back. This is not a sort; a headroom that dips and
/// then rises lands behind the earlier, larger ones.
fn compression_priority(metrics: &[SegmentMetrics]) -> Vec<usize> {
    let mut priority = VecDeque::with_capacity(metrics.len());
    let mut threshold = f64::INFINITY;
    for (index, m) in metrics.iter().enumerate() {
        let headroom = m.compress_headroom();
        if headroom <= threshold {
            priority.push_front(index);
            threshold = headroom;
        } else {
            priority.push_back(index);
        }
    }
    priority.into()
}

/// Order in which expansion visits segments.
///
/// Growth headroom is measured against a zero threshold that never moves.
/// Headroom is never negative, so every segment lands at the back and the
/// order is plain declaration order.
fn expansion_priority(metrics: &[SegmentMetrics]) -> Vec<usize> {
    (0..metrics.len()).collect()
}

/// Collects segment configs and a root distance, then builds a
/// [`ResolutionContext`].
#[derive(Debug, Clone, Default)]
pub struct ContextBuilder {
    root_distance: f64,
    configs: Vec<SegmentConfig>,
}

impl ContextBuilder {
    /// Start a builder for the given root distance.
    pub fn new(root_distance: f64) -> Self {
        Self {
            root_distance,
            configs: Vec::new(),
        }
    }

    /// Append one segment.
    #[must_use]
    pub fn segment(mut self, config: SegmentConfig) -> Self {
        self.configs.push(config);
        self
    }

    /// Append several segments, keeping their order.
    #[must_use]
    pub fn segments(mut self, configs: impl IntoIterator<Item = SegmentConfig>) -> Self {
        self.configs.extend(configs);
        self
    }

    /// Validate every config and produce the context.
    #[must_use]
    pub fn build(self) -> ResolutionContext {
        let root_distance = if self.root_distance.is_nan() {
            0.0
        } else {
            self.root_distance.max(0.0)
        };

        let mut segments = Vec::with_capacity(self.configs.len());
        let mut metrics = Vec::with_capacity(self.configs.len());
        let mut totals = Totals::default();

        for config in self.configs {
            let m = SegmentMetrics::from_config(&config);
            totals.accumulate(&m);
            segments.push(Segment::new(config.name, m.base, config.order));
            metrics.push(m);
        }

        let compress_priority = compression_priority(&metrics);
        let expand_priority = expansion_priority(&metrics);
        let mode = ResolveMode::select(root_distance, totals.base);

        debug!(
            segments = segments.len(),
            root_distance,
            total_base = totals.base,
            total_solidify = totals.solidify,
            total_expand_ratio = totals.expand_ratio,
            ?mode,
            "context built"
        );

        ResolutionContext {
            root_distance,
            segments,
            metrics,
            totals,
            compress_priority,
            expand_priority,
            placement: Vec::new(),
            mode,
        }
    }
}

/// Owned state of one resolution.
///
/// Holds the segment collection plus everything derived from it. Resolvers
/// address segments by index into the owned vector.
#[derive(Debug, Clone)]
pub struct ResolutionContext {
    pub(crate) root_distance: f64,
    pub(crate) segments: Vec<Segment>,
    pub(crate) metrics: Vec<SegmentMetrics>,
    pub(crate) totals: Totals,
    pub(crate) compress_priority: Vec<usize>,
    pub(crate) expand_priority: Vec<usize>,
    pub(crate) placement: Vec<usize>,
    pub(crate) mode: ResolveMode,
}

impl ResolutionContext {
    /// Shorthand for [`ContextBuilder`].
    #[must_use]
    pub fn new(root_distance: f64, configs: impl IntoIterator<Item = SegmentConfig>) -> Self {
        ContextBuilder::new(root_distance).segments(configs).build()
    }

    /// Sanitised root distance.
    #[inline]
    pub fn root_distance(&self) -> f64 {
        self.root_distance
    }

    /// Resolver this context routes to.
    #[inline]
    pub fn mode(&self) -> ResolveMode {
        self.mode
    }

    /// Aggregates over the validated metrics.
    #[inline]
    pub fn totals(&self) -> Totals {
        self.totals
    }

    /// Segments in insertion order.
    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Validated metrics, parallel to [`segments`](Self::segments).
    #[inline]
    pub fn metrics(&self) -> &[SegmentMetrics] {
        &self.metrics
    }

    /// Segment indices in the order compression visits them.
    #[inline]
    pub fn compress_priority(&self) -> &[usize] {
        &self.compress_priority
    }

    /// Segment indices in the order expansion visits them.
    #[inline]
    pub fn expand_priority(&self) -> &[usize] {
        &self.expand_priority
    }

    /// Segment indices sorted by placement; empty until placement has run.
    #[inline]
    pub fn placement_order(&self) -> &[usize] {
        &self.placement
    }

    /// First segment with the given name.
    pub fn segment(&self, name: &str) -> Option<&Segment> {
        self.segments.iter().find(|segment| segment.name() == name)
    }

    /// Σ resolved distance.
    pub fn total_distance(&self) -> f64 {
        self.segments.iter().map(Segment::distance).sum()
    }

    /// Give up the context and keep the segments.
    #[must_use]
    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    /// Run whichever resolver [`mode`](Self::mode) selects.
    ///
    /// Resolvers read only the validated metrics, so running this again
    /// reproduces the same sizes. Offsets are left untouched.
    pub fn resolve(&mut self) -> ResolveMode {
        let _span = debug_span!(
            "resolve",
            segments = self.segments.len(),
            root_distance = self.root_distance
        )
        .entered();

        match self.mode {
            ResolveMode::Compress => CompressionResolver::resolve(self),
            ResolveMode::Expand => ExpansionResolver::resolve(self),
        };
        self.mode
    }

    /// Resolve, place, and report.
    pub fn solve(&mut self) -> ResolutionReport {
        self.resolve();
        self.place();
        self.report()
    }
}
