//! Layout validation for generated buildings.
//!
//! Pure functions that take a room list and return validation errors.
//! Used by tests and by the headless harness.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::floors::rasterize;
use crate::grid::{Direction, Point2};
use crate::room::{Room, Wall};

/// A layout validation error.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub category: &'static str,
    pub severity: Severity,
    pub message: String,
}

/// Error severity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Severity {
    Error,
    Warning,
}

// ── A. Room geometry (per-room) ─────────────────────────────────────────

/// Check that every room's floors are exactly its theme rectangle.
pub fn check_room_rectangles(rooms: &[Room]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (i, room) in rooms.iter().enumerate() {
        let size = room.theme.size;
        if size.x <= 0 || size.y <= 0 {
            errors.push(ValidationError {
                category: "room_geometry",
                severity: Severity::Warning,
                message: format!(
                    "Room #{} has non-positive size {}×{}",
                    i, size.x, size.y
                ),
            });
            continue;
        }

        let expected: HashSet<Point2> = rasterize(size, room.theme.offset).into_iter().collect();
        let actual: HashSet<Point2> = room.floors.iter().copied().collect();
        if expected != actual || actual.len() != room.floors.len() {
            errors.push(ValidationError {
                category: "room_geometry",
                severity: Severity::Error,
                message: format!(
                    "Room #{} floors ({} tiles) do not match its {}×{} rectangle at ({},{})",
                    i,
                    room.floors.len(),
                    size.x,
                    size.y,
                    room.theme.offset.x,
                    room.theme.offset.y
                ),
            });
        }
    }
    errors
}

// ── B. Room-to-room ─────────────────────────────────────────────────────

/// Check that no floor tile belongs to two rooms.
pub fn check_room_overlaps(rooms: &[Room]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut owner: HashMap<Point2, usize> = HashMap::new();

    for (i, room) in rooms.iter().enumerate() {
        let mut reported = HashSet::new();
        for &floor in &room.floors {
            match owner.get(&floor) {
                Some(&j) if j != i => {
                    if reported.insert(j) {
                        errors.push(ValidationError {
                            category: "room_overlap",
                            severity: Severity::Error,
                            message: format!(
                                "Rooms #{} and #{} overlap at ({},{})",
                                j, i, floor.x, floor.y
                            ),
                        });
                    }
                }
                Some(_) => {}
                None => {
                    owner.insert(floor, i);
                }
            }
        }
    }
    errors
}

// ── C. Walls ────────────────────────────────────────────────────────────

/// Check that no wall sits on a floor of the room that produced it, and
/// that every wall backs onto one of that room's floors.
pub fn check_walls_off_floors(rooms: &[Room]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (i, room) in rooms.iter().enumerate() {
        let floors: HashSet<Point2> = room.floors.iter().copied().collect();
        for wall in &room.walls {
            if floors.contains(&wall.position) {
                errors.push(ValidationError {
                    category: "walls",
                    severity: Severity::Error,
                    message: format!(
                        "Room #{} has a {:?} wall on its own floor at ({},{})",
                        i, wall.rotation, wall.position.x, wall.position.y
                    ),
                });
            } else if !floors.contains(&wall.source_floor()) {
                errors.push(ValidationError {
                    category: "walls",
                    severity: Severity::Error,
                    message: format!(
                        "Room #{} has a detached {:?} wall at ({},{})",
                        i, wall.rotation, wall.position.x, wall.position.y
                    ),
                });
            }
        }
    }
    errors
}

/// Check that no (rotation, position) pair appears twice across the layout.
///
/// Mirrored pairs on either side of a shared edge are distinct walls and
/// are not reported.
pub fn check_duplicate_walls(rooms: &[Room]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen: HashSet<Wall> = HashSet::new();
    for (i, room) in rooms.iter().enumerate() {
        for wall in &room.walls {
            if !seen.insert(*wall) {
                errors.push(ValidationError {
                    category: "walls",
                    severity: Severity::Error,
                    message: format!(
                        "Duplicate {:?} wall at ({},{}) in room #{}",
                        wall.rotation, wall.position.x, wall.position.y, i
                    ),
                });
            }
        }
    }
    errors
}

// ── D. Connectivity ─────────────────────────────────────────────────────

/// Check that all floor tiles form one 4-connected region.
pub fn check_connectivity(rooms: &[Room]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let floors: HashSet<Point2> = rooms
        .iter()
        .flat_map(|r| r.floors.iter().copied())
        .collect();
    let Some(&start) = rooms.iter().find_map(|r| r.floors.first()) else {
        return errors;
    };

    let mut visited: HashSet<Point2> = HashSet::new();
    let mut queue = VecDeque::new();
    visited.insert(start);
    queue.push_back(start);
    while let Some(p) = queue.pop_front() {
        for dir in Direction::ALL {
            let next = p + dir.offset();
            if floors.contains(&next) && visited.insert(next) {
                queue.push_back(next);
            }
        }
    }

    if visited.len() != floors.len() {
        let unreachable: Vec<usize> = rooms
            .iter()
            .enumerate()
            .filter(|(_, r)| r.floors.iter().any(|f| !visited.contains(f)))
            .map(|(i, _)| i)
            .collect();
        errors.push(ValidationError {
            category: "connectivity",
            severity: Severity::Error,
            message: format!(
                "{} of {} floor tiles unreachable from ({},{}); rooms {:?}",
                floors.len() - visited.len(),
                floors.len(),
                start.x,
                start.y,
                unreachable
            ),
        });
    }
    errors
}

/// Run every check.
pub fn validate_layout(rooms: &[Room]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    errors.extend(check_room_rectangles(rooms));
    errors.extend(check_room_overlaps(rooms));
    errors.extend(check_walls_off_floors(rooms));
    errors.extend(check_duplicate_walls(rooms));
    errors.extend(check_connectivity(rooms));
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::layout::LayoutContext;
    use crate::room::RoomTheme;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn room(offset: (i32, i32), size: (i32, i32), ctx: &mut LayoutContext) -> Room {
        ctx.generate_room_struct(RoomTheme::default().with_rect(offset.into(), size.into()))
    }

    #[test]
    fn generated_layout_is_clean() {
        let mut ctx = LayoutContext::new(LayoutConfig::default());
        let mut rng = StdRng::seed_from_u64(11);
        let rooms = ctx.generate_random_rooms(25, &mut rng);
        let errors = validate_layout(&rooms);
        assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn detects_overlap() {
        let mut ctx = LayoutContext::new(LayoutConfig::default());
        let rooms = vec![
            room((0, 0), (3, 3), &mut ctx),
            room((2, 2), (3, 3), &mut ctx),
        ];
        let errors = check_room_overlaps(&rooms);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].category, "room_overlap");
    }

    #[test]
    fn detects_disconnected_rooms() {
        let mut ctx = LayoutContext::new(LayoutConfig::default());
        let rooms = vec![
            room((0, 0), (2, 2), &mut ctx),
            room((5, 5), (2, 2), &mut ctx),
        ];
        let errors = check_connectivity(&rooms);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("rooms [1]"));
    }

    #[test]
    fn detects_tampered_floors() {
        let mut ctx = LayoutContext::new(LayoutConfig::default());
        let mut r = room((0, 0), (2, 2), &mut ctx);
        r.floors.pop();
        let errors = check_room_rectangles(&[r]);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].severity, Severity::Error);
    }

    #[test]
    fn empty_room_is_warning() {
        let mut ctx = LayoutContext::new(LayoutConfig::default());
        let r = room((0, 0), (0, 2), &mut ctx);
        let errors = check_room_rectangles(&[r]);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].severity, Severity::Warning);
    }

    #[test]
    fn detects_wall_on_floor_and_duplicates() {
        let mut ctx = LayoutContext::new(LayoutConfig::default());
        let mut r = room((0, 0), (2, 2), &mut ctx);
        r.walls.push(Wall::new(Direction::East, Point2::new(1, 1)));
        r.walls.push(r.walls[0]);
        assert_eq!(check_walls_off_floors(std::slice::from_ref(&r)).len(), 1);
        assert_eq!(check_duplicate_walls(&[r]).len(), 1);
    }

    #[test]
    fn mirrored_walls_are_not_duplicates() {
        let mut ctx = LayoutContext::new(LayoutConfig::default());
        let rooms = vec![room((0, 0), (1, 1), &mut ctx), room((1, 0), (1, 1), &mut ctx)];
        assert!(check_duplicate_walls(&rooms).is_empty());
    }
}
