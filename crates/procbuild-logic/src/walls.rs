//! Boundary wall derivation and the run-wide wall registry.

use std::collections::HashSet;

use crate::grid::{Direction, Point2};
use crate::room::Wall;

/// Append-only, ordered record of every wall committed during a run.
#[derive(Debug, Clone, Default)]
pub struct WallRegistry {
    walls: Vec<Wall>,
    index: HashSet<Wall>,
}

impl WallRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact (position, rotation) lookup. The mirrored wall on the far side
    /// of the same edge does not count.
    pub fn contains(&self, position: Point2, rotation: Direction) -> bool {
        self.index.contains(&Wall::new(rotation, position))
    }

    pub fn extend(&mut self, walls: &[Wall]) {
        for wall in walls {
            self.walls.push(*wall);
            self.index.insert(*wall);
        }
    }

    pub fn clear(&mut self) {
        self.walls.clear();
        self.index.clear();
    }

    pub fn as_slice(&self) -> &[Wall] {
        &self.walls
    }

    pub fn len(&self) -> usize {
        self.walls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
    }
}

/// Walls around `floors` not already present in `existing`.
///
/// Every floor tile is visited in order and each of its four neighbours in
/// rotation order; a wall is emitted for every neighbour that is not itself
/// a floor of this set.
pub fn derive_walls(floors: &[Point2], existing: &WallRegistry) -> Vec<Wall> {
    let own: HashSet<Point2> = floors.iter().copied().collect();
    let mut walls = Vec::new();
    for &floor in floors {
        for dir in Direction::ALL {
            let neighbour = floor + dir.offset();
            if !own.contains(&neighbour) && !existing.contains(neighbour, dir) {
                walls.push(Wall::new(dir, neighbour));
            }
        }
    }
    walls
}
