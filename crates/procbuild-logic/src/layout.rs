//! Randomized room placement.
//!
//! A run starts from a single base room and grows the building one room slot
//! at a time. Each slot draws a candidate size, then repeatedly samples an
//! existing floor tile, checks that it sits on an edge of the layout, anchors
//! the candidate on the open neighbour and asks [`fit`] for a reshape that
//! clears every existing floor. The first clear reshape is committed; a slot
//! that exhausts its attempt budget is skipped without affecting the rest of
//! the run.
//!
//! ```
//! use procbuild_logic::config::LayoutConfig;
//! use procbuild_logic::layout::LayoutContext;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut ctx = LayoutContext::new(LayoutConfig::default());
//! let mut rng = StdRng::seed_from_u64(7);
//! let report = ctx.generate(12, &mut rng);
//! assert_eq!(report.rooms.len(), 1 + report.placed());
//! ```

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

use crate::config::LayoutConfig;
use crate::edge::find_edge;
use crate::fit::{fit, Fit};
use crate::floors::rasterize;
use crate::grid::Point2;
use crate::room::{Room, RoomTheme, Wall};
use crate::walls::{derive_walls, WallRegistry};

/// Run-scoped layout state, owned by the caller.
#[derive(Debug, Clone)]
pub struct LayoutContext {
    config: LayoutConfig,
    all_floors: Vec<Point2>,
    walls: WallRegistry,
}

/// Result of [`LayoutContext::generate`].
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// Base room first, then placed rooms in slot order.
    pub rooms: Vec<Room>,
    /// Room slots requested (excluding the base room).
    pub requested: usize,
    /// Slots that exhausted their attempt budget.
    pub skipped_slots: usize,
    /// Placement attempts spent across all slots.
    pub attempts: u64,
    /// Attempts whose anchor was on an edge but every reshape was blocked.
    pub blocked_fits: u64,
}

impl GenerationReport {
    /// Rooms placed by the search (excluding the base room).
    pub fn placed(&self) -> usize {
        self.requested - self.skipped_slots
    }
}

/// Attempt counters shared by every slot of a run.
#[derive(Debug, Default)]
struct AttemptStats {
    attempts: u64,
    blocked_fits: u64,
}

/// Sampling pool for expansion points, with O(1) membership for fitting.
#[derive(Debug, Default)]
struct Frontier {
    tiles: Vec<Point2>,
    lookup: HashSet<Point2>,
}

impl Frontier {
    fn extend(&mut self, floors: &[Point2]) {
        self.tiles.extend_from_slice(floors);
        self.lookup.extend(floors.iter().copied());
    }
}

impl LayoutContext {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            all_floors: Vec::new(),
            walls: WallRegistry::new(),
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Floors of every room committed since the last [`clear_all`](Self::clear_all).
    pub fn all_floors(&self) -> &[Point2] {
        &self.all_floors
    }

    /// Walls of every room committed since the last [`clear_all`](Self::clear_all).
    pub fn all_walls(&self) -> &[Wall] {
        self.walls.as_slice()
    }

    /// Forget all committed floors and walls.
    pub fn clear_all(&mut self) {
        self.all_floors.clear();
        self.walls.clear();
    }

    /// Build a room directly from `theme` and register its floors and walls.
    ///
    /// No overlap check is made. A theme with a non-positive dimension
    /// produces a room with no floors and no walls.
    pub fn generate_room_struct(&mut self, theme: RoomTheme) -> Room {
        let floors = rasterize(theme.size, theme.offset);
        let walls = derive_walls(&floors, &self.walls);

        self.all_floors.extend_from_slice(&floors);
        self.walls.extend(&walls);

        Room {
            theme,
            floors,
            walls,
        }
    }

    /// Generate a layout of the base room plus up to `num_rooms` rooms.
    pub fn generate_random_rooms(&mut self, num_rooms: usize, rng: &mut impl Rng) -> Vec<Room> {
        self.generate(num_rooms, rng).rooms
    }

    /// Generate a layout and report how many slots were skipped.
    ///
    /// Clears all previous state first.
    pub fn generate(&mut self, num_rooms: usize, rng: &mut impl Rng) -> GenerationReport {
        self.clear_all();

        let base = self.generate_room_struct(self.config.base_room.clone());
        let mut frontier = Frontier::default();
        frontier.extend(&base.floors);

        let mut rooms = Vec::with_capacity(num_rooms + 1);
        rooms.push(base);

        // An inverted range collapses to its lower bound.
        let min = self.config.room_size_min;
        let max = self.config.room_size_max.max(min);

        let mut skipped_slots = 0;
        let mut stats = AttemptStats::default();
        for slot in 0..num_rooms {
            let size = Point2::new(rng.gen_range(min..=max), rng.gen_range(min..=max));
            match self.place_room(size, &mut frontier, rng, &mut stats) {
                Some(room) => rooms.push(room),
                None => {
                    skipped_slots += 1;
                    log::debug!(
                        "Slot {} skipped: no fit for {}×{} after {} attempts",
                        slot,
                        size.x,
                        size.y,
                        self.config.max_attempts
                    );
                }
            }
        }

        log::info!(
            "Generated {} rooms ({} requested, {} skipped, {} attempts, {} blocked fits, {} floors, {} walls)",
            rooms.len(),
            num_rooms,
            skipped_slots,
            stats.attempts,
            stats.blocked_fits,
            self.all_floors.len(),
            self.walls.len()
        );

        GenerationReport {
            rooms,
            requested: num_rooms,
            skipped_slots,
            attempts: stats.attempts,
            blocked_fits: stats.blocked_fits,
        }
    }

    /// Try to place one `size` room grown from a frontier tile.
    fn place_room(
        &mut self,
        size: Point2,
        frontier: &mut Frontier,
        rng: &mut impl Rng,
        stats: &mut AttemptStats,
    ) -> Option<Room> {
        for attempt in 0..self.config.max_attempts {
            stats.attempts += 1;
            let &point = frontier.tiles.choose(rng)?;
            let Some(dir) = find_edge(point, &frontier.lookup) else {
                continue;
            };

            let candidate = self.config.base_room.with_rect(point + dir.offset(), size);
            let Fit::Placed { theme, transform } = fit(&candidate, &frontier.lookup) else {
                stats.blocked_fits += 1;
                continue;
            };
            log::debug!(
                "Placed {}×{} at ({}, {}) via {:?} on attempt {}",
                theme.size.x,
                theme.size.y,
                theme.offset.x,
                theme.offset.y,
                transform,
                attempt + 1
            );
            let room = self.generate_room_struct(theme);
            frontier.extend(&room.floors);
            return Some(room);
        }
        None
    }
}
