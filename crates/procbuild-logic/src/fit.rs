//! Candidate room fitting.
//!
//! A candidate rectangle anchored at an expansion point usually collides with
//! the room it grows from. Instead of searching for a free spot, [`fit`]
//! tries a short, fixed list of reshapes around the same anchor and takes the
//! first one that is clear:
//!
//! 1. [`FitTransform::Identity`]: as proposed
//! 2. [`FitTransform::SwapSize`]: width and height exchanged
//! 3. [`FitTransform::MirrorBoth`]: rectangle grows toward −X and −Y
//! 4. [`FitTransform::MirrorX`]: rectangle grows toward −X
//! 5. [`FitTransform::MirrorY`]: rectangle grows toward −Y
//!
//! Every mirror starts from the proposed theme, not from a previous step.

use std::collections::HashSet;

use crate::floors::{flip_size, floors_intersect, rasterize};
use crate::grid::Point2;
use crate::room::RoomTheme;

/// One reshape of a candidate rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FitTransform {
    Identity,
    SwapSize,
    MirrorBoth,
    MirrorX,
    MirrorY,
}

impl FitTransform {
    /// Search order.
    pub const ORDER: [FitTransform; 5] = [
        FitTransform::Identity,
        FitTransform::SwapSize,
        FitTransform::MirrorBoth,
        FitTransform::MirrorX,
        FitTransform::MirrorY,
    ];

    pub fn apply(self, theme: &RoomTheme) -> RoomTheme {
        let mut out = theme.clone();
        match self {
            FitTransform::Identity => {}
            FitTransform::SwapSize => out.size = flip_size(theme.size),
            FitTransform::MirrorBoth => out.offset -= theme.size - Point2::ONE,
            FitTransform::MirrorX => out.offset.x -= theme.size.x - 1,
            FitTransform::MirrorY => out.offset.y -= theme.size.y - 1,
        }
        out
    }
}

/// Outcome of [`fit`].
#[derive(Debug, Clone, PartialEq)]
pub enum Fit {
    /// A reshape that clears every obstacle.
    Placed {
        theme: RoomTheme,
        transform: FitTransform,
    },
    /// Every reshape overlaps an obstacle.
    Blocked,
}

impl Fit {
    pub fn is_placed(&self) -> bool {
        matches!(self, Fit::Placed { .. })
    }

    pub fn into_theme(self) -> Option<RoomTheme> {
        match self {
            Fit::Placed { theme, .. } => Some(theme),
            Fit::Blocked => None,
        }
    }
}

/// First reshape of `theme` (in [`FitTransform::ORDER`]) whose floors miss
/// `obstacles`.
pub fn fit(theme: &RoomTheme, obstacles: &HashSet<Point2>) -> Fit {
    for transform in FitTransform::ORDER {
        let candidate = transform.apply(theme);
        let tiles = rasterize(candidate.size, candidate.offset);
        if !floors_intersect(&tiles, obstacles) {
            return Fit::Placed {
                theme: candidate,
                transform,
            };
        }
    }
    Fit::Blocked
}
