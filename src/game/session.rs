use super::collision::any_overlap;
use super::entity::{Boxed, EntityTag, FoodItem, ObstaclePiece};
use super::grid::Position;
use super::snake::{AutonomousSnake, PlayerSnake, Snake};

/// Where a session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    Lost,
    /// Lost, and a restart has been asked for; the front end should replace
    /// the session with a fresh one
    ResetPending,
}

/// Kind of collision that ended a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// The player tried to leave the board
    Wall,
    Obstacle,
    /// The player's head ran into its own tail
    SelfCollision,
    /// The player's head touched any part of the rival
    Enemy,
}

/// Everything that exists during one playthrough.
///
/// A restart never edits a session in place; the engine builds a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSession {
    pub player: PlayerSnake,
    pub enemy: AutonomousSnake,
    pub food: Vec<FoodItem>,
    pub obstacles: Vec<ObstaclePiece>,
    pub score: i64,
    pub steps: u32,
    pub lost: bool,
    pub reset_requested: bool,
}

impl GameSession {
    /// Assemble a session from explicit parts
    pub fn new(
        player: Snake,
        enemy: Snake,
        food: Vec<FoodItem>,
        obstacles: Vec<ObstaclePiece>,
    ) -> Self {
        Self {
            player: PlayerSnake::new(player),
            enemy: AutonomousSnake::new(enemy),
            food,
            obstacles,
            score: 0,
            steps: 0,
            lost: false,
            reset_requested: false,
        }
    }

    pub fn phase(&self) -> Phase {
        match (self.lost, self.reset_requested) {
            (false, _) => Phase::Playing,
            (true, false) => Phase::Lost,
            (true, true) => Phase::ResetPending,
        }
    }

    pub fn is_lost(&self) -> bool {
        self.lost
    }

    /// Ask for a restart. Only honored once the game is lost.
    pub fn request_reset(&mut self) -> bool {
        if self.lost {
            self.reset_requested = true;
        }
        self.reset_requested
    }

    /// Whether new food may not be placed on `cell`. Food is never stacked
    /// on food, so one bite grows a snake by at most one segment.
    pub fn blocks_spawn(&self, cell: Position) -> bool {
        any_overlap(&cell, self.player.segments())
            || any_overlap(&cell, self.enemy.segments())
            || any_overlap(&cell, &self.obstacles)
            || any_overlap(&cell, &self.food)
    }

    /// Every occupied cell with a drawing tag. Later entries sit on top of
    /// earlier ones when they share a cell.
    pub fn entities(&self) -> impl Iterator<Item = (Position, EntityTag)> + '_ {
        let obstacles = self
            .obstacles
            .iter()
            .map(|o| (o.cell(), EntityTag::Obstacle));
        let food = self
            .food
            .iter()
            .map(|f| (f.cell(), EntityTag::Food(f.kind)));

        obstacles
            .chain(food)
            .chain(snake_entities(&self.enemy))
            .chain(snake_entities(&self.player))
    }
}

fn snake_entities(snake: &Snake) -> impl Iterator<Item = (Position, EntityTag)> + '_ {
    let owner = snake.owner();
    // Body first so the head wins a shared cell
    snake
        .body_segments()
        .map(move |s| (s.cell, EntityTag::Body(owner)))
        .chain(std::iter::once((snake.head(), EntityTag::Head(owner))))
}
