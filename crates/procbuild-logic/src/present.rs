//! World-space presentation data for renderers.
//!
//! Runs after generation over the finished room list. Nothing here feeds
//! back into layout.

use serde::Serialize;

use crate::grid::{to_world_offset, WorldOffset};
use crate::room::{Room, WallKind};

/// A floor tile instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FloorInstance {
    pub translation: WorldOffset,
}

/// A wall instance with its yaw around the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WallInstance {
    pub translation: WorldOffset,
    pub yaw_degrees: f32,
    pub kind: WallKind,
}

/// Every instance a renderer needs for one layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InstancePlan {
    pub floors: Vec<FloorInstance>,
    pub walls: Vec<WallInstance>,
}

impl InstancePlan {
    pub fn build(rooms: &[Room], origin: WorldOffset, cell_size: f32) -> Self {
        Self {
            floors: floor_instances(rooms, origin, cell_size),
            walls: wall_instances(rooms, origin, cell_size),
        }
    }

    /// Instances of a given wall kind.
    pub fn walls_of(&self, kind: WallKind) -> impl Iterator<Item = &WallInstance> {
        self.walls.iter().filter(move |w| w.kind == kind)
    }
}

pub fn floor_instances(rooms: &[Room], origin: WorldOffset, cell_size: f32) -> Vec<FloorInstance> {
    rooms
        .iter()
        .flat_map(|room| room.floors.iter())
        .map(|&floor| FloorInstance {
            translation: origin + to_world_offset(floor, cell_size),
        })
        .collect()
}

pub fn wall_instances(rooms: &[Room], origin: WorldOffset, cell_size: f32) -> Vec<WallInstance> {
    rooms
        .iter()
        .flat_map(|room| room.walls.iter())
        .map(|wall| WallInstance {
            translation: origin + to_world_offset(wall.position, cell_size),
            yaw_degrees: wall.rotation.degrees(),
            kind: WallKind::Wall,
        })
        .collect()
}

/// Overlay line from a fitted room's first tile to its last, with a label
/// naming the last tile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebugMark {
    pub from: WorldOffset,
    pub to: WorldOffset,
    pub label: String,
}

/// Marks for every room placed by the search. The base room is skipped.
pub fn debug_marks(rooms: &[Room], cell_size: f32) -> Vec<DebugMark> {
    rooms
        .iter()
        .skip(1)
        .map(|room| {
            let extent = room.theme.extent();
            DebugMark {
                from: to_world_offset(room.theme.offset, cell_size),
                to: to_world_offset(extent, cell_size),
                label: format!("X: {} | Y: {}", extent.x, extent.y),
            }
        })
        .collect()
}
