//! Edge detection for choosing expansion sites.

use std::collections::HashSet;

use crate::grid::{Direction, Point2};

/// First direction (in rotation order) whose neighbour of `point` is not a
/// floor, or `None` when the point is fully enclosed.
pub fn find_edge(point: Point2, floors: &HashSet<Point2>) -> Option<Direction> {
    Direction::ALL
        .into_iter()
        .find(|dir| !floors.contains(&(point + dir.offset())))
}

pub fn is_edge(point: Point2, floors: &HashSet<Point2>) -> bool {
    find_edge(point, floors).is_some()
}
