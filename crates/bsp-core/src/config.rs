//! Generation parameters
//!
//! Plain structures passed explicitly to each generator, loadable from JSON.
//! Missing fields fall back to the defaults, so a file only needs to name
//! what it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::area::Size;
use crate::error::ConfigError;

/// Largest room size or margin a configuration may name
///
/// Keeps margin inflation and split arithmetic inside `i32`.
pub const MAX_EXTENT: i32 = i32::MAX / 4;

/// Interval the partition cut ratio is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitRatio {
    pub min: f32,
    pub max: f32,
}

impl Default for SplitRatio {
    fn default() -> Self {
        Self { min: 0.3, max: 0.7 }
    }
}

/// Parameters of the partition generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenConfig {
    /// Smallest room and smallest partition half
    pub min_room_size: Size,
    /// Areas larger than this on either axis are always split
    pub max_room_size: Size,
    pub split_ratio: SplitRatio,
    /// Cut trials per node
    pub split_attempts: u32,
    /// Depth at which splitting stops unless an area is oversized
    pub max_depth: u32,
    /// Room placement trials per leaf
    pub room_attempts: u32,
    /// Clearance kept between a new room and existing rooms
    pub room_margin: i32,
    /// Probability of linking two sibling subtrees that both hold a room
    pub link_chance: f32,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            min_room_size: Size::new(3, 3),
            max_room_size: Size::new(5, 5),
            split_ratio: SplitRatio::default(),
            split_attempts: 5,
            max_depth: 7,
            room_attempts: 50,
            room_margin: 1,
            link_chance: 0.5,
        }
    }
}

impl GenConfig {
    /// Reject parameters that would make every split or placement fail
    pub fn validate(&self) -> Result<(), ConfigError> {
        let min = self.min_room_size;
        let max = self.max_room_size;

        validate_sizes(min, max)?;

        if max.width < 2 * min.width - 1 || max.height < 2 * min.height - 1 {
            return Err(ConfigError::MaxTooSmallToSplit { min, max });
        }

        let ratio = self.split_ratio;
        if !(ratio.min > 0.0 && ratio.min <= ratio.max && ratio.max < 1.0) {
            return Err(ConfigError::InvalidSplitRatio {
                min: ratio.min,
                max: ratio.max,
            });
        }

        if self.split_attempts == 0 {
            return Err(ConfigError::ZeroAttempts {
                name: "split_attempts",
            });
        }
        if self.room_attempts == 0 {
            return Err(ConfigError::ZeroAttempts {
                name: "room_attempts",
            });
        }
        validate_margin(self.room_margin)?;
        if !(0.0..=1.0).contains(&self.link_chance) {
            return Err(ConfigError::InvalidLinkChance(self.link_chance));
        }

        Ok(())
    }

    /// Parse and validate a JSON configuration
    pub fn from_json_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load options from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;

        Self::from_json_str(&contents)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Encode(e.to_string()))
    }
}

/// Parameters of the scatter generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterConfig {
    pub max_rooms: usize,
    /// Placement trials before giving up
    pub max_steps: u32,
    pub min_room_size: Size,
    /// Inclusive upper bound of sampled room sizes
    pub max_room_size: Size,
    pub room_margin: i32,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            max_rooms: 10,
            max_steps: 100,
            min_room_size: Size::new(3, 3),
            max_room_size: Size::new(7, 7),
            room_margin: 1,
        }
    }
}

impl ScatterConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_sizes(self.min_room_size, self.max_room_size)?;

        if self.max_steps == 0 {
            return Err(ConfigError::ZeroAttempts { name: "max_steps" });
        }
        validate_margin(self.room_margin)
    }

    pub fn from_json_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_json_str(&contents)
    }
}

fn validate_sizes(min: Size, max: Size) -> Result<(), ConfigError> {
    if min.width <= 0 || min.height <= 0 {
        return Err(ConfigError::NonPositiveMinSize(min));
    }
    if max.width > MAX_EXTENT || max.height > MAX_EXTENT {
        return Err(ConfigError::SizeTooLarge(max));
    }
    if min.width > max.width || min.height > max.height {
        return Err(ConfigError::MinExceedsMax { min, max });
    }
    Ok(())
}

fn validate_margin(margin: i32) -> Result<(), ConfigError> {
    if margin < 0 {
        return Err(ConfigError::NegativeMargin(margin));
    }
    if margin > MAX_EXTENT {
        return Err(ConfigError::MarginTooLarge(margin));
    }
    Ok(())
}
