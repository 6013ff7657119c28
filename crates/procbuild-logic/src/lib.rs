//! Pure building layout logic for ProcBuild.
//!
//! This crate lays out a building as axis-aligned rectangular rooms on an
//! integer grid. It derives floor tiles and boundary walls and grows the
//! layout outward from existing rooms with a bounded-retry random search.
//! Functions take plain data and return results; rendering, persistence and
//! engine integration live elsewhere and consume the room list afterwards.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Layout settings (base room, size range, retry budget, cell size) and validation |
//! | [`edge`] | Exposed-direction detection for choosing expansion points |
//! | [`fit`] | Transform search that reshapes a candidate room to clear obstacles |
//! | [`floors`] | Rectangle rasterization and floor-set intersection |
//! | [`grid`] | Points, cardinal directions, rotations, world offsets |
//! | [`layout`] | Run-scoped state and the randomized placement loop |
//! | [`present`] | World-space floor/wall instances and debug overlay marks |
//! | [`room`] | Room themes, walls and committed rooms |
//! | [`validation`] | Layout checks (rectangles, overlap, walls, connectivity) |
//! | [`walls`] | Boundary wall derivation and the wall registry |

pub mod config;
pub mod edge;
pub mod fit;
pub mod floors;
pub mod grid;
pub mod layout;
pub mod present;
pub mod room;
pub mod validation;
pub mod walls;

pub use config::LayoutConfig;
pub use grid::{Direction, Point2};
pub use layout::{GenerationReport, LayoutContext};
pub use room::{Room, RoomTheme, Wall, WallKind};
