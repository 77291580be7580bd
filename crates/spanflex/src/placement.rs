#![forbid(unsafe_code)]

//! Placement: turn resolved sizes into offsets along the axis, and the one
//! mutation a live context allows (changing a segment's `order`).
//!
//! # Invariants
//!
//! 1. Segments are laid out by ascending `order`; equal keys keep insertion
//!    order.
//! 2. The first placed segment starts at `0`.
//! 3. Each segment starts where the previous one ends, so offsets are
//!    non-decreasing and the last end equals Σdistance.
//! 4. Placement writes only `offset`; `set_order` writes only `order`.
//!    Neither touches sizes, and neither triggers the other.

use crate::context::ResolutionContext;
use crate::logging::{trace, warn_event};

/// Assigns offsets from resolved distances.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlacementResolver;

impl PlacementResolver {
    /// Place every segment. Returns the end of the last segment.
    pub fn resolve(context: &mut ResolutionContext) -> f64 {
        let ResolutionContext {
            segments,
            placement,
            ..
        } = context;

        placement.clear();
        placement.extend(0..segments.len());
        // Stable: ties stay in insertion order.
        placement.sort_by_key(|&index| segments[index].order());

        let mut offset = 0.0;
        for &index in placement.iter() {
            let segment = &mut segments[index];
            segment.set_offset(offset);
            offset += segment.distance();
            trace!(index, offset = segment.offset(), "placed");
        }
        offset
    }
}

/// Changes a segment's placement key by name.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderMutator;

impl OrderMutator {
    /// Overwrite the `order` of the first segment named `name`.
    ///
    /// Unknown names are ignored. Offsets are stale until
    /// [`PlacementResolver::resolve`] runs again.
    pub fn set_order(context: &mut ResolutionContext, name: &str, order: i32) -> bool {
        match context
            .segments
            .iter_mut()
            .find(|segment| segment.name() == name)
        {
            Some(segment) => {
                segment.set_order(order);
                true
            }
            None => {
                warn_event!(name, order, "set_order: no segment with that name");
                false
            }
        }
    }
}

impl ResolutionContext {
    /// Run [`PlacementResolver`] on this context.
    pub fn place(&mut self) -> f64 {
        PlacementResolver::resolve(self)
    }

    /// Run [`OrderMutator`] on this context. Returns whether a segment
    /// matched; callers are free to ignore it.
    pub fn set_order(&mut self, name: &str, order: i32) -> bool {
        OrderMutator::set_order(self, name, order)
    }
}
