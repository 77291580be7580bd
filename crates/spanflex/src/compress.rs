#![forbid(unsafe_code)]

//! Compression: distribute a deficit when demand exceeds the root distance.
//!
//! Segments are visited once, in compression-priority order. Each one takes
//! a share of the budget left after every remaining segment's incompressible
//! part is set aside, proportional to its compressible capacity. A segment
//! whose share falls below `min` is held at `min`, and the overshoot comes
//! out of what is left for later segments.
//!
//! This is a single-pass cascade, not a fixed-point solver. A resolved
//! segment is never revisited; the priority order (small headroom first) is
//! what keeps early floors from distorting later shares.

use crate::context::{ResolutionContext, ResolveMode, scale};
use crate::logging::{debug, trace};
use crate::segment::Clamp;

/// Runs the compression cascade on a [`ResolutionContext`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CompressionResolver;

impl CompressionResolver {
    /// Resolve every segment's base. Does nothing and returns `false` when
    /// the context is routed to expansion.
    pub fn resolve(context: &mut ResolutionContext) -> bool {
        if context.mode != ResolveMode::Compress {
            return false;
        }

        let ResolutionContext {
            root_distance,
            segments,
            metrics,
            totals,
            compress_priority,
            ..
        } = context;

        let mut remaining_budget = *root_distance;
        let mut remaining_capacity = totals.base;
        let mut remaining_solidify = totals.solidify;

        for &index in compress_priority.iter() {
            let m = &metrics[index];
            let shareable_budget = remaining_budget - remaining_solidify;
            let shareable_capacity = remaining_capacity - remaining_solidify;
            let resolved =
                scale(shareable_budget, shareable_capacity, m.compress_capacity) + m.compress_solidify;

            let (size, clamp) = if resolved < m.min {
                debug!(index, resolved, min = m.min, "compression floor");
                (m.min, Some(Clamp::Floor))
            } else {
                (resolved, None)
            };
            segments[index].set_resolved_base(size, clamp);

            remaining_budget -= size;
            remaining_solidify -= m.compress_solidify;
            remaining_capacity -= m.base;

            trace!(
                index,
                size,
                remaining_budget,
                remaining_capacity,
                remaining_solidify,
                "compressed"
            );
        }

        true
    }
}
