//! Playfield geometry
//!
//! The board is a fixed square lattice. Every entity sits on exactly one cell;
//! pixel positions only exist for front ends that want them.

use serde::{Deserialize, Serialize};

use super::action::Direction;

/// Side length of one drawn segment in pixels
pub const SEGMENT_SIZE: i32 = 12;
/// Gap between neighbouring segments in pixels
pub const SEGMENT_MARGIN: i32 = 3;
/// Distance between the origins of two neighbouring cells
pub const CELL_STRIDE: i32 = SEGMENT_SIZE + SEGMENT_MARGIN;

/// Playfield size in pixels
pub const PLAYFIELD_PIXELS: i32 = 600;

pub const GRID_WIDTH: i32 = PLAYFIELD_PIXELS / CELL_STRIDE;
pub const GRID_HEIGHT: i32 = PLAYFIELD_PIXELS / CELL_STRIDE;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Top-left pixel of this cell
    pub fn to_pixel(&self) -> (i32, i32) {
        (self.x * CELL_STRIDE, self.y * CELL_STRIDE)
    }

    /// Cell containing the given pixel
    pub fn from_pixel(px: i32, py: i32) -> Self {
        Self {
            x: px.div_euclid(CELL_STRIDE),
            y: py.div_euclid(CELL_STRIDE),
        }
    }
}

/// Check if a cell is on the board
pub fn is_in_bounds(pos: Position) -> bool {
    pos.x >= 0 && pos.x < GRID_WIDTH && pos.y >= 0 && pos.y < GRID_HEIGHT
}
