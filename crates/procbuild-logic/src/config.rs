//! Layout configuration — base room, candidate sizes, retry budget, cell size.
//!
//! ```
//! use procbuild_logic::config::{validate_config, LayoutConfig};
//!
//! let mut config = LayoutConfig::default();
//! config.room_size_max = 7;
//! assert!(validate_config(&config).is_empty());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::grid::Point2;
use crate::room::RoomTheme;

/// Placement attempts allotted to one room slot before it is skipped.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 2048;

/// World units per grid cell.
pub const DEFAULT_CELL_SIZE: f32 = 200.0;

/// Largest accepted room dimension, for the base room and candidates alike.
pub const MAX_ROOM_DIMENSION: i32 = 256;

/// Largest accepted base room offset on either axis.
pub const MAX_BASE_OFFSET: i32 = 1 << 20;

/// Settings for a generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// World units per grid cell (presentation only).
    pub cell_size: f32,
    /// Placement attempts per room slot.
    pub max_attempts: u32,
    /// Room committed first; its name and spawn chance are inherited by
    /// every generated room.
    pub base_room: RoomTheme,
    /// Inclusive lower bound for each candidate dimension.
    pub room_size_min: i32,
    /// Inclusive upper bound for each candidate dimension.
    pub room_size_max: i32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_room: RoomTheme {
                size: Point2::new(4, 4),
                ..RoomTheme::default()
            },
            room_size_min: 3,
            room_size_max: 5,
        }
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Cell size must be positive and finite.
    InvalidCellSize(f32),
    /// A zero retry budget would skip every slot.
    NoAttempts,
    /// Base room must cover at least one tile.
    EmptyBaseRoom(Point2),
    /// Candidate dimensions must be positive.
    NonPositiveRoomSize(i32),
    /// `room_size_min` exceeds `room_size_max`.
    EmptyRoomSizeRange { min: i32, max: i32 },
    /// A room dimension above [`MAX_ROOM_DIMENSION`].
    OversizedRoom(i32),
    /// Base room offset beyond [`MAX_BASE_OFFSET`].
    BaseRoomOutOfRange(Point2),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidCellSize(size) => write!(f, "invalid cell size {}", size),
            ConfigError::NoAttempts => write!(f, "max_attempts must be at least 1"),
            ConfigError::EmptyBaseRoom(size) => {
                write!(f, "base room size {}×{} covers no tiles", size.x, size.y)
            }
            ConfigError::NonPositiveRoomSize(size) => {
                write!(f, "room size bound {} is not positive", size)
            }
            ConfigError::EmptyRoomSizeRange { min, max } => {
                write!(f, "room size range {}..={} is empty", min, max)
            }
            ConfigError::OversizedRoom(size) => write!(
                f,
                "room dimension {} exceeds the maximum of {}",
                size, MAX_ROOM_DIMENSION
            ),
            ConfigError::BaseRoomOutOfRange(offset) => write!(
                f,
                "base room offset ({}, {}) is beyond ±{}",
                offset.x, offset.y, MAX_BASE_OFFSET
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Validate a layout configuration, returning all errors found.
pub fn validate_config(config: &LayoutConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if !config.cell_size.is_finite() || config.cell_size <= 0.0 {
        errors.push(ConfigError::InvalidCellSize(config.cell_size));
    }
    if config.max_attempts == 0 {
        errors.push(ConfigError::NoAttempts);
    }
    if config.base_room.size.x <= 0 || config.base_room.size.y <= 0 {
        errors.push(ConfigError::EmptyBaseRoom(config.base_room.size));
    }
    if config.room_size_min <= 0 {
        errors.push(ConfigError::NonPositiveRoomSize(config.room_size_min));
    }
    let base = &config.base_room;
    for dimension in [base.size.x, base.size.y, config.room_size_max] {
        if dimension > MAX_ROOM_DIMENSION {
            errors.push(ConfigError::OversizedRoom(dimension));
        }
    }
    if base.offset.x.unsigned_abs() > MAX_BASE_OFFSET as u32
        || base.offset.y.unsigned_abs() > MAX_BASE_OFFSET as u32
    {
        errors.push(ConfigError::BaseRoomOutOfRange(base.offset));
    }
    if config.room_size_min > config.room_size_max {
        errors.push(ConfigError::EmptyRoomSizeRange {
            min: config.room_size_min,
            max: config.room_size_max,
        });
    }

    errors
}
