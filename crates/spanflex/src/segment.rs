#![forbid(unsafe_code)]

//! Segment input descriptors and resolved output records.
//!
//! A [`SegmentConfig`] is what the caller asks for: a desired size, how much
//! of it may be given up under pressure, how eagerly it grows into surplus,
//! and hard bounds. A [`Segment`] is what the solver hands back: the final
//! size along the axis and, after placement, where it starts.
//!
//! # Usage
//!
//! ```ignore
//! use spanflex::SegmentConfig;
//!
//! let sidebar = SegmentConfig::new("sidebar", 240.0)
//!     .compress(0.5)
//!     .expand(0.0)
//!     .bounds(160.0, 320.0)
//!     .order(0);
//! ```

use serde::{Deserialize, Serialize};

/// Input descriptor for one segment of the axis.
///
/// Values are taken as given; negative, inverted or non-finite inputs are
/// corrected when the context is built, never rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SegmentConfig {
    /// Identifier used by [`set_order`](crate::ResolutionContext::set_order).
    pub name: String,
    /// Desired size before any compression or expansion.
    pub base: f64,
    /// Fraction of `base` that may be given up when the axis is too short.
    #[serde(default)]
    pub compress_ratio: f64,
    /// Weight of this segment's share of surplus space.
    #[serde(default)]
    pub expand_ratio: f64,
    /// Lower bound on the resolved size.
    #[serde(default)]
    pub min: f64,
    /// Upper bound on the resolved size.
    #[serde(default = "unbounded", skip_serializing_if = "is_unbounded")]
    pub max: f64,
    /// Placement key; smaller values are placed first.
    #[serde(default)]
    pub order: i32,
}

fn unbounded() -> f64 {
    f64::INFINITY
}

fn is_unbounded(value: &f64) -> bool {
    *value == f64::INFINITY
}

impl SegmentConfig {
    /// Create a rigid, unbounded segment with the given desired size.
    pub fn new(name: impl Into<String>, base: f64) -> Self {
        Self {
            name: name.into(),
            base,
            compress_ratio: 0.0,
            expand_ratio: 0.0,
            min: 0.0,
            max: f64::INFINITY,
            order: 0,
        }
    }

    /// Set the compressible fraction of `base`.
    #[must_use]
    pub fn compress(mut self, ratio: f64) -> Self {
        self.compress_ratio = ratio;
        self
    }

    /// Set the surplus weight.
    #[must_use]
    pub fn expand(mut self, ratio: f64) -> Self {
        self.expand_ratio = ratio;
        self
    }

    /// Set the lower bound.
    #[must_use]
    pub fn min(mut self, min: f64) -> Self {
        self.min = min;
        self
    }

    /// Set the upper bound.
    #[must_use]
    pub fn max(mut self, max: f64) -> Self {
        self.max = max;
        self
    }

    /// Set both bounds.
    #[must_use]
    pub fn bounds(self, min: f64, max: f64) -> Self {
        self.min(min).max(max)
    }

    /// Set the placement key.
    #[must_use]
    pub fn order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }
}

/// Which bound, if any, overrode the proportional share of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Clamp {
    /// Compression wanted less than `min`; the segment was held at `min`.
    Floor,
    /// Expansion wanted more than `max`; the delta was cut at the ceiling.
    Ceiling,
}

/// A resolved segment.
///
/// Sizes are written by the compression/expansion pass, `offset` only by
/// placement and `order` only by
/// [`set_order`](crate::ResolutionContext::set_order).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Segment {
    name: String,
    base: f64,
    expand_delta: f64,
    distance: f64,
    offset: f64,
    order: i32,
    clamp: Option<Clamp>,
}

impl Segment {
    pub(crate) fn new(name: String, base: f64, order: i32) -> Self {
        Self {
            name,
            base,
            expand_delta: 0.0,
            distance: base,
            offset: 0.0,
            order,
            clamp: None,
        }
    }

    /// Segment identifier.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolved base size (the final size before any expansion delta).
    #[inline]
    pub fn base(&self) -> f64 {
        self.base
    }

    /// Surplus added by expansion; zero unless expansion ran.
    #[inline]
    pub fn expand_delta(&self) -> f64 {
        self.expand_delta
    }

    /// Final size: `base + expand_delta`.
    #[inline]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Start position along the axis, valid after placement.
    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// End position along the axis: `offset + distance`.
    #[inline]
    pub fn end(&self) -> f64 {
        self.offset + self.distance
    }

    /// Placement key.
    #[inline]
    pub fn order(&self) -> i32 {
        self.order
    }

    /// Bound that overrode this segment's share in the last resolution.
    #[inline]
    pub fn clamp(&self) -> Option<Clamp> {
        self.clamp
    }

    pub(crate) fn set_resolved_base(&mut self, size: f64, clamp: Option<Clamp>) {
        self.base = size;
        self.distance = size;
        self.clamp = clamp;
    }

    pub(crate) fn set_expand_delta(&mut self, delta: f64, clamp: Option<Clamp>) {
        self.expand_delta = delta;
        self.distance = self.base + delta;
        self.clamp = clamp;
    }

    pub(crate) fn set_offset(&mut self, offset: f64) {
        self.offset = offset;
    }

    pub(crate) fn set_order(&mut self, order: i32) {
        self.order = order;
    }
}
