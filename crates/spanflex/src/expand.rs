#![forbid(unsafe_code)]

//! Expansion: distribute surplus when the root distance covers demand.
//!
//! Each segment, in expansion-priority order, takes the share of the
//! remaining surplus given by its weight over the remaining weight, cut at
//! its ceiling (`max - base`).
//!
//! Surplus refused by a ceiling is not offered to later segments in the same
//! pass; it stays unallocated and shows up as a negative deviation.

use crate::context::{ResolutionContext, ResolveMode, scale};
use crate::logging::{debug, trace};
use crate::segment::Clamp;

/// Runs the expansion cascade on a [`ResolutionContext`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpansionResolver;

impl ExpansionResolver {
    /// Grow segments into the surplus. Does nothing and returns `false` when
    /// the context is routed to compression.
    ///
    /// With zero surplus (root distance equal to Σbase) no segment is
    /// touched and the validated bases stand.
    pub fn resolve(context: &mut ResolutionContext) -> bool {
        if context.mode != ResolveMode::Expand {
            return false;
        }

        let ResolutionContext {
            root_distance,
            segments,
            metrics,
            totals,
            expand_priority,
            ..
        } = context;

        let surplus = (*root_distance - totals.base).max(0.0);
        if surplus <= 0.0 {
            return true;
        }

        let mut remaining_surplus = surplus;
        let mut remaining_ratio = totals.expand_ratio;

        for &index in expand_priority.iter() {
            let m = &metrics[index];
            let segment = &mut segments[index];
            let delta = scale(remaining_surplus, remaining_ratio, m.expand_ratio);
            let ceiling = (m.max - segment.base()).max(0.0);

            let (delta, clamp) = if delta > ceiling {
                debug!(index, delta, ceiling, "expansion ceiling");
                (ceiling, Some(Clamp::Ceiling))
            } else {
                (delta, None)
            };
            segment.set_expand_delta(delta, clamp);

            remaining_surplus -= delta;
            remaining_ratio -= m.expand_ratio;

            trace!(index, delta, remaining_surplus, remaining_ratio, "expanded");
        }

        true
    }
}
