#![forbid(unsafe_code)]

//! Serializable resolution input.
//!
//! A [`LayoutConfig`] bundles a root distance with its segment configs so a
//! whole resolution can be described in JSON:
//!
//! ```json
//! {
//!   "root_distance": 800,
//!   "segments": [
//!     { "name": "nav", "base": 200, "compress_ratio": 0.7, "max": 100, "order": 2 },
//!     { "name": "body", "base": 200, "expand_ratio": 1, "min": 300 }
//!   ]
//! }
//! ```
//!
//! Omitted ratios, `min` and `order` default to zero; an omitted `max` is
//! unbounded. Out-of-range numbers are still corrected (not rejected) when
//! the context is built, but every number must be one JSON can carry: NaN
//! and infinities are rejected, except an unbounded `max`, which is simply
//! left out. Names must be present and unique, since
//! [`set_order`](crate::ResolutionContext::set_order) addresses segments by
//! name.

use std::io::Read;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::context::{ContextBuilder, ResolutionContext};
use crate::error::{ConfigError, Result};
use crate::segment::SegmentConfig;

/// Root distance plus the segments to distribute it over.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LayoutConfig {
    /// Total distance along the axis.
    pub root_distance: f64,
    /// Segments in insertion order.
    #[serde(default)]
    pub segments: Vec<SegmentConfig>,
}

impl LayoutConfig {
    /// Create an empty config.
    pub fn new(root_distance: f64) -> Self {
        Self {
            root_distance,
            segments: Vec::new(),
        }
    }

    /// Append a segment.
    #[must_use]
    pub fn segment(mut self, config: SegmentConfig) -> Self {
        self.segments.push(config);
        self
    }

    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut json = String::new();
        reader.read_to_string(&mut json)?;
        Self::from_json_str(&json)
    }

    /// Validate, then pretty-print as JSON.
    pub fn to_json_string(&self) -> Result<String> {
        self.validate()?;
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject empty or duplicate segment names and numbers JSON cannot
    /// represent.
    pub fn validate(&self) -> Result<()> {
        if !self.root_distance.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "root_distance".to_string(),
            });
        }
        let mut seen = FxHashSet::default();
        for (index, segment) in self.segments.iter().enumerate() {
            if segment.name.is_empty() {
                return Err(ConfigError::EmptyName { index });
            }
            // An unbounded max is omitted from JSON, so it alone may be +∞.
            let fields = [
                ("base", segment.base.is_finite()),
                ("compress_ratio", segment.compress_ratio.is_finite()),
                ("expand_ratio", segment.expand_ratio.is_finite()),
                ("min", segment.min.is_finite()),
                ("max", segment.max.is_finite() || segment.max == f64::INFINITY),
            ];
            if let Some((field, _)) = fields.iter().find(|(_, finite)| !finite) {
                return Err(ConfigError::NonFinite {
                    field: format!("segments[{index}].{field}"),
                });
            }
            if !seen.insert(segment.name.as_str()) {
                return Err(ConfigError::DuplicateName {
                    name: segment.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Validate, then build the context.
    pub fn into_context(self) -> Result<ResolutionContext> {
        self.validate()?;
        Ok(ContextBuilder::from(self).build())
    }
}

impl From<LayoutConfig> for ContextBuilder {
    fn from(config: LayoutConfig) -> Self {
        ContextBuilder::new(config.root_distance).segments(config.segments)
    }
}
