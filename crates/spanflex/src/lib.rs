#![forbid(unsafe_code)]

//! Single-axis flex sizing.
//!
//! Given an ordered list of [`SegmentConfig`]s (desired size, how much of it
//! is compressible, how eagerly it grows, hard bounds, placement key) and one
//! root distance, spanflex decides every segment's final size and its offset
//! along the axis.
//!
//! # Pipeline
//!
//! ```text
//! SegmentConfig[] + root distance
//!       ↓
//!   [context]    : validate, derive metrics, build priority orders
//!       ↓
//!   [compress]   : root < Σbase, cascade the deficit
//!   [expand]     : root ≥ Σbase, cascade the surplus
//!       ↓
//!   [placement]  : stable sort by order, accumulate offsets
//!       ↓
//!   Segment[] (insertion order) + ResolutionReport
//! ```
//!
//! After placement the only mutation a live context accepts is
//! [`ResolutionContext::set_order`]; re-run [`ResolutionContext::place`] to
//! see its effect. Any other change means building a new context.
//!
//! # Example
//!
//! ```
//! use spanflex::{ResolutionContext, SegmentConfig};
//!
//! let mut context = ResolutionContext::new(
//!     300.0,
//!     [
//!         SegmentConfig::new("a", 100.0).expand(1.0).bounds(0.0, 200.0),
//!         SegmentConfig::new("b", 100.0).expand(1.0).bounds(0.0, 150.0).order(1),
//!     ],
//! );
//! let report = context.solve();
//! assert!(report.is_conserved(spanflex::DEFAULT_TOLERANCE));
//! assert_eq!(context.segment("b").map(|s| s.offset()), Some(150.0));
//! ```

pub mod compress;
pub mod config;
pub mod context;
pub mod error;
pub mod expand;
mod logging;
pub mod placement;
pub mod report;
pub mod segment;

pub use compress::CompressionResolver;
pub use config::LayoutConfig;
pub use context::{ContextBuilder, ResolutionContext, ResolveMode, SegmentMetrics, Totals};
pub use error::{ConfigError, Result};
pub use expand::ExpansionResolver;
pub use placement::{OrderMutator, PlacementResolver};
pub use report::{DEFAULT_TOLERANCE, RELATIVE_TOLERANCE, ResolutionReport};
pub use segment::{Clamp, Segment, SegmentConfig};

/// Build, resolve and place in one call.
///
/// The returned context still accepts
/// [`set_order`](ResolutionContext::set_order) followed by
/// [`place`](ResolutionContext::place).
#[must_use]
pub fn solve(
    root_distance: f64,
    configs: impl IntoIterator<Item = SegmentConfig>,
) -> ResolutionContext {
    let mut context = ResolutionContext::new(root_distance, configs);
    context.solve();
    context
}
