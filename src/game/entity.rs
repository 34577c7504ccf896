//! Board entities
//!
//! Plain data: a cell plus whatever payload the entity carries. Behaviour
//! lives in the snake, collision and engine modules.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grid::Position;

/// Anything that occupies exactly one cell of the board
pub trait Boxed {
    fn cell(&self) -> Position;
}

impl Boxed for Position {
    fn cell(&self) -> Position {
        *self
    }
}

/// Which snake a segment belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Enemy,
}

/// One body cell of a snake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub cell: Position,
    pub owner: Owner,
}

impl Segment {
    pub fn new(cell: Position, owner: Owner) -> Self {
        Self { cell, owner }
    }
}

impl Boxed for Segment {
    fn cell(&self) -> Position {
        self.cell
    }
}

/// Fruit variants, each with a fixed point value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoodKind {
    Strawberry,
    Banana,
    Grape,
}

impl FoodKind {
    /// Points awarded (or deducted) when this fruit is eaten
    pub fn value(&self) -> i64 {
        match self {
            FoodKind::Strawberry => 10,
            FoodKind::Banana => 25,
            FoodKind::Grape => 70,
        }
    }

    /// Draw a kind: 60% strawberry, 30% banana, 10% grape
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::from_roll(rng.gen_range(1..=10))
    }

    fn from_roll(roll: u8) -> Self {
        match roll {
            0..=6 => FoodKind::Strawberry,
            7..=9 => FoodKind::Banana,
            _ => FoodKind::Grape,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoodItem {
    pub cell: Position,
    pub kind: FoodKind,
}

impl FoodItem {
    pub fn new(cell: Position, kind: FoodKind) -> Self {
        Self { cell, kind }
    }

    pub fn value(&self) -> i64 {
        self.kind.value()
    }
}

impl Boxed for FoodItem {
    fn cell(&self) -> Position {
        self.cell
    }
}

/// One cell of an obstacle shape. Never moves once placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObstaclePiece {
    pub cell: Position,
}

impl ObstaclePiece {
    pub fn new(cell: Position) -> Self {
        Self { cell }
    }
}

impl Boxed for ObstaclePiece {
    fn cell(&self) -> Position {
        self.cell
    }
}

/// Logical tag handed to front ends for drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityTag {
    Head(Owner),
    Body(Owner),
    Food(FoodKind),
    Obstacle,
}
