//! Error types
//!
//! Only malformed input is an error. Exhausted split or placement attempts
//! are ordinary outcomes and are reported through the generation result.

use thiserror::Error;

use crate::area::{Area, Size};

/// Rejected generation parameters
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("minimum room size must be positive, got {0:?}")]
    NonPositiveMinSize(Size),

    #[error("minimum room size {min:?} exceeds maximum room size {max:?}")]
    MinExceedsMax { min: Size, max: Size },

    #[error(
        "maximum room size {max:?} is below twice the minimum {min:?} minus one; \
         oversized areas could not be split"
    )]
    MaxTooSmallToSplit { min: Size, max: Size },

    #[error("split ratio range [{min}, {max}] must satisfy 0 < min <= max < 1")]
    InvalidSplitRatio { min: f32, max: f32 },

    #[error("{name} must be at least 1")]
    ZeroAttempts { name: &'static str },

    #[error("room size {0:?} exceeds the largest supported extent")]
    SizeTooLarge(Size),

    #[error("room margin must not be negative, got {0}")]
    NegativeMargin(i32),

    #[error("room margin {0} exceeds the largest supported extent")]
    MarginTooLarge(i32),

    #[error("link chance must lie in [0, 1], got {0}")]
    InvalidLinkChance(f32),

    #[error("could not parse configuration: {0}")]
    Parse(String),

    #[error("could not read configuration: {0}")]
    Io(String),

    #[error("could not encode configuration: {0}")]
    Encode(String),
}

/// Failure to start a generation run
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("canvas bounds {0:?} have no cells")]
    EmptyBounds(Area),
}
