//! Core game logic module
//!
//! Everything needed to simulate a session lives here, free of terminal or
//! rendering concerns: the grid, the entities on it, overlap queries, snake
//! movement, the rival's navigation heuristic and the engine that ticks a
//! session forward.

pub mod action;
pub mod collision;
pub mod config;
pub mod engine;
pub mod entity;
pub mod error;
pub mod grid;
pub mod navigation;
pub mod obstacle;
pub mod session;
pub mod snake;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::GameConfig;
pub use engine::{GameEngine, StepInfo, StepResult};
pub use entity::{EntityTag, FoodItem, FoodKind, ObstaclePiece, Owner, Segment};
pub use error::GameError;
pub use grid::{Position, GRID_HEIGHT, GRID_WIDTH};
pub use session::{CollisionType, GameSession, Phase};
pub use snake::{AutonomousSnake, MoveOutcome, PlayerSnake, Snake, TurnOutcome};
