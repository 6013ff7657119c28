//! Room data model: themes, walls, committed rooms.

use serde::{Deserialize, Serialize};

use crate::grid::{Direction, Point2};

/// Parameters describing a candidate or committed room's rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomTheme {
    pub name: String,
    /// Not consulted by placement yet; carried for weighted theme selection.
    pub spawn_chance: f32,
    pub offset: Point2,
    pub size: Point2,
}

impl Default for RoomTheme {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            spawn_chance: 1.0,
            offset: Point2::ZERO,
            size: Point2::ZERO,
        }
    }
}

impl RoomTheme {
    /// Same name and spawn chance, new rectangle.
    pub fn with_rect(&self, offset: Point2, size: Point2) -> RoomTheme {
        RoomTheme {
            offset,
            size,
            ..self.clone()
        }
    }

    /// Last tile covered by the rectangle (inclusive corner).
    pub fn extent(&self) -> Point2 {
        self.offset + self.size - Point2::ONE
    }

    /// Tile count, widened so any pair of `i32` dimensions fits.
    pub fn area(&self) -> i64 {
        i64::from(self.size.x.max(0)) * i64::from(self.size.y.max(0))
    }

    /// Whether `p` lies in `[offset, offset + size)`.
    pub fn contains(&self, p: Point2) -> bool {
        p.x >= self.offset.x
            && p.y >= self.offset.y
            && p.x < self.offset.x + self.size.x
            && p.y < self.offset.y + self.size.y
    }
}

/// Boundary segment classification for renderers.
///
/// The layout core only ever produces [`WallKind::Wall`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallKind {
    #[default]
    Wall,
    Door,
    Window,
}

/// A wall standing at `position`, facing outward along `rotation`.
///
/// Equality is field-wise: the wall a neighbouring room derives from the
/// other side of the same edge is a different wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Wall {
    pub rotation: Direction,
    pub position: Point2,
}

impl Wall {
    pub fn new(rotation: Direction, position: Point2) -> Self {
        Self { rotation, position }
    }

    /// The floor tile this wall was derived from.
    pub fn source_floor(&self) -> Point2 {
        self.position - self.rotation.offset()
    }
}

/// A committed room. Built once by the layout context and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub theme: RoomTheme,
    /// Distinct floor tiles in rasterization order.
    pub floors: Vec<Point2>,
    pub walls: Vec<Wall>,
}
