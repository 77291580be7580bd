//! Errors raised at the configuration boundary.
//!
//! Resolution itself never fails; only loading a [`LayoutConfig`](crate::LayoutConfig)
//! can.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate segment name: {name}")]
    DuplicateName { name: String },

    #[error("segment {index} has an empty name")]
    EmptyName { index: usize },

    #[error("{field} is not a finite number")]
    NonFinite { field: String },
}
