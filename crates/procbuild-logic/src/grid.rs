//! Grid vocabulary: points, cardinal directions, rotations.
//!
//! Rotation indices follow the building convention used everywhere else in
//! the crate:
//!
//! | Index | Direction | Offset   | Yaw   |
//! |-------|-----------|----------|-------|
//! | 0     | East      | (+1, 0)  | 0°    |
//! | 1     | North     | (0, +1)  | 90°   |
//! | 2     | West      | (−1, 0)  | 180°  |
//! | 3     | South     | (0, −1)  | 270°  |
//!
//! The integer functions ([`direction`], [`inverse_direction`],
//! [`inverse_rotation`]) accept any index and fall back to the South entry of
//! their table for anything outside 0–3.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Integer grid coordinate. Also used for rectangle sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point2 {
    pub x: i32,
    pub y: i32,
}

impl Point2 {
    pub const ZERO: Point2 = Point2::new(0, 0);
    pub const ONE: Point2 = Point2::new(1, 1);

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Swap the two components.
    pub const fn flip(self) -> Self {
        Self::new(self.y, self.x)
    }
}

impl Add for Point2 {
    type Output = Point2;

    fn add(self, rhs: Self) -> Self::Output {
        Point2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point2 {
    type Output = Point2;

    fn sub(self, rhs: Self) -> Self::Output {
        Point2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Point2 {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Neg for Point2 {
    type Output = Point2;

    fn neg(self) -> Self::Output {
        Point2::new(-self.x, -self.y)
    }
}

impl From<(i32, i32)> for Point2 {
    fn from((x, y): (i32, i32)) -> Self {
        Point2::new(x, y)
    }
}

/// One of the four cardinal directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    East = 0,
    North = 1,
    West = 2,
    South = 3,
}

impl Direction {
    /// All directions in scan order (rotation 0, 1, 2, 3).
    pub const ALL: [Direction; 4] = [
        Direction::East,
        Direction::North,
        Direction::West,
        Direction::South,
    ];

    /// Direction for a rotation index, `None` outside 0–3.
    pub fn from_index(index: i32) -> Option<Direction> {
        match index {
            0 => Some(Direction::East),
            1 => Some(Direction::North),
            2 => Some(Direction::West),
            3 => Some(Direction::South),
            _ => None,
        }
    }

    /// Direction for a rotation index, South outside 0–3.
    pub fn from_index_or_south(index: i32) -> Direction {
        Self::from_index(index).unwrap_or(Direction::South)
    }

    pub fn index(self) -> i32 {
        self as i32
    }

    /// Unit step toward this direction.
    pub fn offset(self) -> Point2 {
        match self {
            Direction::East => Point2::new(1, 0),
            Direction::North => Point2::new(0, 1),
            Direction::West => Point2::new(-1, 0),
            Direction::South => Point2::new(0, -1),
        }
    }

    /// Inverse step table, kept as an explicit lookup.
    pub fn inverse_offset(self) -> Point2 {
        match self {
            Direction::East => Point2::new(-1, 0),
            Direction::North => Point2::new(0, -1),
            Direction::West => Point2::new(1, 0),
            Direction::South => Point2::new(0, 1),
        }
    }

    /// Opposite direction (0↔2, 1↔3).
    pub fn inverse(self) -> Direction {
        match self {
            Direction::East => Direction::West,
            Direction::North => Direction::South,
            Direction::West => Direction::East,
            Direction::South => Direction::North,
        }
    }

    /// Yaw angle in degrees for presentation.
    pub fn degrees(self) -> f32 {
        rotation_degrees(self.index())
    }
}

// ── Integer-index API ───────────────────────────────────────────────────

/// Unit step for a rotation index.
pub fn direction(rotation: i32) -> Point2 {
    Direction::from_index_or_south(rotation).offset()
}

/// Inverse step for a rotation index. See [`Direction::inverse_offset`].
pub fn inverse_direction(rotation: i32) -> Point2 {
    Direction::from_index_or_south(rotation).inverse_offset()
}

/// Opposite rotation index; invalid input maps to 1.
pub fn inverse_rotation(rotation: i32) -> i32 {
    Direction::from_index_or_south(rotation).inverse().index()
}

/// Yaw angle in degrees for a rotation index.
pub fn rotation_degrees(rotation: i32) -> f32 {
    rotation as f32 * 90.0
}

// ── World space ─────────────────────────────────────────────────────────

/// Continuous-space offset handed to renderers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldOffset {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl WorldOffset {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl Add for WorldOffset {
    type Output = WorldOffset;

    fn add(self, rhs: Self) -> Self::Output {
        WorldOffset::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

/// Scale a grid point by the cell size. Z is always 0.
pub fn to_world_offset(point: Point2, cell_size: f32) -> WorldOffset {
    WorldOffset::new(point.x as f32 * cell_size, point.y as f32 * cell_size, 0.0)
}
