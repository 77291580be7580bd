#![forbid(unsafe_code)]

//! Observations about a finished resolution.
//!
//! When bounds are infeasible (Σmin above the root distance, or ceilings
//! refusing surplus) the resolved total drifts from the root distance. That
//! is not an error; [`ResolutionReport`] surfaces the drift so callers can
//! decide what to do about it.
//!
//! # Usage
//!
//! ```ignore
//! use spanflex::{ResolutionContext, SegmentConfig};
//!
//! let mut context = ResolutionContext::new(100.0, [
//!     SegmentConfig::new("a", 80.0).compress(1.0).min(70.0),
//!     SegmentConfig::new("b", 80.0).compress(1.0).min(70.0),
//! ]);
//! let report = context.solve();
//! if report.has_overflow() {
//!     eprintln!("overflow by {}", report.deviation());
//! }
//! ```

use serde::Serialize;

use crate::context::{ResolutionContext, ResolveMode};
use crate::logging::debug;
use crate::segment::Clamp;

/// Default absolute tolerance for conservation checks.
pub const DEFAULT_TOLERANCE: f64 = 1e-4;

/// Tolerance per unit of root distance, for roots large enough that
/// [`DEFAULT_TOLERANCE`] is below float rounding.
pub const RELATIVE_TOLERANCE: f64 = 1e-10;

/// Summary of one resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolutionReport {
    /// Which resolver ran.
    pub mode: ResolveMode,
    /// Sanitised root distance.
    pub root_distance: f64,
    /// Σ validated base, before resolution.
    pub total_base: f64,
    /// Σ resolved distance.
    pub total_distance: f64,
    /// Number of segments.
    pub segment_count: usize,
    /// Segments held at `min` by compression.
    pub floor_clamps: usize,
    /// Segments cut at `max` by expansion.
    pub ceiling_clamps: usize,
}

impl ResolutionReport {
    /// Collect the report from a context in its current state.
    #[must_use]
    pub fn from_context(context: &ResolutionContext) -> Self {
        let mut floor_clamps = 0;
        let mut ceiling_clamps = 0;
        for segment in context.segments() {
            match segment.clamp() {
                Some(Clamp::Floor) => floor_clamps += 1,
                Some(Clamp::Ceiling) => ceiling_clamps += 1,
                None => {}
            }
        }

        Self {
            mode: context.mode(),
            root_distance: context.root_distance(),
            total_base: context.totals().base,
            total_distance: context.total_distance(),
            segment_count: context.segments().len(),
            floor_clamps,
            ceiling_clamps,
        }
    }

    /// `total_distance - root_distance`. Positive means overflow.
    #[inline]
    #[must_use]
    pub fn deviation(&self) -> f64 {
        self.total_distance - self.root_distance
    }

    /// Whether the resolved total matches the root distance within
    /// `tolerance`.
    #[must_use]
    pub fn is_conserved(&self, tolerance: f64) -> bool {
        self.deviation().abs() <= tolerance
    }

    /// Tolerance used by [`has_overflow`](Self::has_overflow),
    /// [`has_underflow`](Self::has_underflow) and the deviation log:
    /// [`DEFAULT_TOLERANCE`], widened to [`RELATIVE_TOLERANCE`] of a large
    /// finite root distance.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        if self.root_distance.is_finite() {
            DEFAULT_TOLERANCE.max(self.root_distance * RELATIVE_TOLERANCE)
        } else {
            DEFAULT_TOLERANCE
        }
    }

    /// Resolved total exceeds the root distance.
    #[must_use]
    pub fn has_overflow(&self) -> bool {
        self.deviation() > self.tolerance()
    }

    /// Part of the root distance was left unallocated.
    #[must_use]
    pub fn has_underflow(&self) -> bool {
        self.deviation() < -self.tolerance()
    }

    /// Percentage of the root distance covered, capped at 100.
    #[must_use]
    pub fn utilization(&self) -> f64 {
        if self.root_distance <= 0.0 {
            return 0.0;
        }
        (self.total_distance / self.root_distance).min(1.0) * 100.0
    }

    /// Any segment overridden by a bound.
    #[inline]
    #[must_use]
    pub fn any_clamped(&self) -> bool {
        self.floor_clamps + self.ceiling_clamps > 0
    }
}

impl ResolutionContext {
    /// Snapshot the current state as a [`ResolutionReport`].
    #[must_use]
    pub fn report(&self) -> ResolutionReport {
        let report = ResolutionReport::from_context(self);
        if !report.is_conserved(report.tolerance()) {
            debug!(
                deviation = report.deviation(),
                floor_clamps = report.floor_clamps,
                ceiling_clamps = report.ceiling_clamps,
                "resolved total deviates from root distance"
            );
        }
        report
    }
}
