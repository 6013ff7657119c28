//! Rectangle rasterization and floor-set tests.

use std::collections::HashSet;

use crate::grid::Point2;

/// Floor tiles covered by a rectangle, column-major from `offset`.
///
/// A non-positive dimension yields no tiles.
pub fn rasterize(size: Point2, offset: Point2) -> Vec<Point2> {
    let width = usize::try_from(size.x).unwrap_or(0);
    let height = usize::try_from(size.y).unwrap_or(0);
    let mut floors = Vec::with_capacity(width.checked_mul(height).unwrap_or(0));
    for x in 0..size.x {
        for y in 0..size.y {
            floors.push(Point2::new(x + offset.x, y + offset.y));
        }
    }
    floors
}

/// Whether any tile of `candidate` is in `obstacles`.
pub fn floors_intersect(candidate: &[Point2], obstacles: &HashSet<Point2>) -> bool {
    candidate.iter().any(|p| obstacles.contains(p))
}

/// Swap width and height.
pub fn flip_size(size: Point2) -> Point2 {
    size.flip()
}
