//! Snakes and their movement
//!
//! [`Snake`] carries the shared move/grow/bounds contract. [`PlayerSnake`] takes
//! its heading from outside input; [`AutonomousSnake`] picks its own through
//! the navigation heuristic.

use std::collections::VecDeque;
use std::ops::Deref;

use rand::Rng;

use super::action::{Action, Direction};
use super::entity::{FoodItem, ObstaclePiece, Owner, Segment};
use super::grid::{is_in_bounds, Position};
use super::navigation::{self, Surroundings};

/// Outcome of a single advance attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The head moved one cell; length unchanged
    Advanced,
    /// The next cell is off the board; nothing changed
    Blocked,
}

/// Ordered body of a snake, head at index 0
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    segments: VecDeque<Segment>,
    direction: Direction,
    owner: Owner,
}

impl Snake {
    /// Create a snake with its body trailing straight behind the head.
    /// A zero length is bumped to one.
    pub fn new(head: Position, direction: Direction, length: usize, owner: Owner) -> Self {
        let (dx, dy) = direction.delta();
        let segments = (0..length.max(1) as i32)
            .map(|i| Segment::new(head.moved_by(-dx * i, -dy * i), owner))
            .collect();

        Self {
            segments,
            direction,
            owner,
        }
    }

    /// Create a snake from explicit cells, head first
    pub fn from_cells<I>(cells: I, direction: Direction, owner: Owner) -> Option<Self>
    where
        I: IntoIterator<Item = Position>,
    {
        let segments: VecDeque<Segment> = cells
            .into_iter()
            .map(|cell| Segment::new(cell, owner))
            .collect();

        if segments.is_empty() {
            return None;
        }

        Some(Self {
            segments,
            direction,
            owner,
        })
    }

    pub fn head(&self) -> Position {
        self.head_segment().cell
    }

    pub fn head_segment(&self) -> &Segment {
        &self.segments[0]
    }

    pub fn tail(&self) -> Position {
        self.segments[self.segments.len() - 1].cell
    }

    pub fn segments(&self) -> &VecDeque<Segment> {
        &self.segments
    }

    /// Body segments excluding the head
    pub fn body_segments(&self) -> impl Iterator<Item = &Segment> + '_ {
        self.segments.iter().skip(1)
    }

    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.segments.iter().map(|s| s.cell)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Takes effect on the next advance. Reversing is allowed.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn owner(&self) -> Owner {
        self.owner
    }

    /// Whether any segment, head included, sits on `pos`
    pub fn contains(&self, pos: Position) -> bool {
        self.cells().any(|cell| cell == pos)
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().any(|s| s.cell == pos)
    }

    /// Cell the head would enter on the next advance
    pub fn next_head(&self) -> Position {
        self.head().moved_in_direction(self.direction)
    }

    /// Push a new head one cell along the current direction and drop the tail
    pub fn advance(&mut self) -> MoveOutcome {
        let next = self.next_head();
        if !is_in_bounds(next) {
            return MoveOutcome::Blocked;
        }

        self.segments.push_front(Segment::new(next, self.owner));
        self.segments.pop_back();
        MoveOutcome::Advanced
    }

    /// Lengthen by one segment stacked on the current tail cell
    pub fn grow(&mut self) {
        let tail = self.tail();
        self.segments.push_back(Segment::new(tail, self.owner));
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false; a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// The snake steered by the person at the keyboard
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSnake {
    snake: Snake,
}

impl PlayerSnake {
    pub fn new(snake: Snake) -> Self {
        Self { snake }
    }

    /// Apply this tick's command, if any
    pub fn turn(&mut self, action: Action) {
        if let Action::Move(direction) = action {
            self.snake.set_direction(direction);
        }
    }

    pub fn advance(&mut self) -> MoveOutcome {
        self.snake.advance()
    }

    pub fn grow(&mut self) {
        self.snake.grow();
    }
}

impl Deref for PlayerSnake {
    type Target = Snake;

    fn deref(&self) -> &Snake {
        &self.snake
    }
}

/// What the autonomous snake did on its turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    Moved(Direction),
    /// No safe direction was found, or the move was blocked
    Skipped,
}

/// The rival snake, steered by the navigation heuristic
#[derive(Debug, Clone, PartialEq)]
pub struct AutonomousSnake {
    snake: Snake,
}

impl AutonomousSnake {
    pub fn new(snake: Snake) -> Self {
        Self { snake }
    }

    /// Pick a heading and advance one cell.
    ///
    /// Keeps the current heading unless a 1-in-`reevaluate_one_in` roll fires
    /// or that heading is unsafe, in which case every direction is rescored.
    pub fn take_turn<R: Rng + ?Sized>(
        &mut self,
        player: &Snake,
        obstacles: &[ObstaclePiece],
        food: &[FoodItem],
        reevaluate_one_in: u32,
        rng: &mut R,
    ) -> TurnOutcome {
        let view = Surroundings {
            own: &self.snake,
            rival: player,
            obstacles,
            food,
        };

        let Some(direction) = navigation::steer(&view, reevaluate_one_in, rng) else {
            return TurnOutcome::Skipped;
        };

        self.snake.set_direction(direction);
        match self.snake.advance() {
            MoveOutcome::Advanced => TurnOutcome::Moved(direction),
            MoveOutcome::Blocked => TurnOutcome::Skipped,
        }
    }

    pub fn grow(&mut self) {
        self.snake.grow();
    }
}

impl Deref for AutonomousSnake {
    type Target = Snake;

    fn deref(&self) -> &Snake {
        &self.snake
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3, Owner::Player);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(5, 5));
        assert_eq!(snake.segments()[1].cell, Position::new(4, 5));
        assert_eq!(snake.tail(), Position::new(3, 5));
        assert!(snake.segments().iter().all(|s| s.owner == Owner::Player));
    }

    #[test]
    fn test_zero_length_keeps_head() {
        let snake = Snake::new(Position::new(5, 5), Direction::Up, 0, Owner::Enemy);
        assert_eq!(snake.len(), 1);
        assert!(Snake::from_cells(Vec::new(), Direction::Up, Owner::Enemy).is_none());
    }

    #[test]
    fn test_advance_keeps_length() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3, Owner::Player);
        assert_eq!(snake.advance(), MoveOutcome::Advanced);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(6, 5));
        assert_eq!(snake.tail(), Position::new(4, 5));
    }

    #[test]
    fn test_advance_blocked_at_edge() {
        let mut snake = Snake::new(Position::new(0, 5), Direction::Left, 3, Owner::Player);
        let before = snake.clone();
        assert_eq!(snake.advance(), MoveOutcome::Blocked);
        assert_eq!(snake, before);
    }

    #[test]
    fn test_grow_stacks_on_tail() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3, Owner::Player);
        snake.grow();
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.tail(), Position::new(3, 5));
        assert_eq!(snake.segments()[2].cell, Position::new(3, 5));

        // The stacked segment unfolds as the snake moves on
        snake.advance();
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.tail(), Position::new(3, 5));
        assert_eq!(snake.segments()[2].cell, Position::new(4, 5));
    }

    #[test]
    fn test_reversal_is_permitted() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3, Owner::Player);
        snake.set_direction(Direction::Left);
        assert_eq!(snake.advance(), MoveOutcome::Advanced);
        assert_eq!(snake.head(), Position::new(4, 5));
        assert!(snake.collides_with_body(snake.head()));
    }

    #[test]
    fn test_collision_detection() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3, Owner::Player);
        assert!(!snake.collides_with_body(Position::new(5, 5)));
        assert!(snake.contains(Position::new(5, 5)));
        assert!(snake.collides_with_body(Position::new(4, 5)));
        assert!(!snake.contains(Position::new(10, 10)));
    }

    #[test]
    fn test_player_turn() {
        let mut player =
            PlayerSnake::new(Snake::new(Position::new(5, 5), Direction::Right, 3, Owner::Player));
        player.turn(Action::Continue);
        assert_eq!(player.direction(), Direction::Right);
        player.turn(Action::Move(Direction::Down));
        assert_eq!(player.direction(), Direction::Down);
        player.advance();
        assert_eq!(player.head(), Position::new(5, 6));
    }

    #[test]
    fn test_autonomous_snake_keeps_safe_heading() {
        let player = Snake::new(Position::new(20, 2), Direction::Right, 3, Owner::Player);
        let mut enemy =
            AutonomousSnake::new(Snake::new(Position::new(10, 30), Direction::Right, 4, Owner::Enemy));
        let mut rng = StdRng::seed_from_u64(1);

        // A u32::MAX roll essentially never fires, so the safe heading is kept
        let outcome = enemy.take_turn(&player, &[], &[], u32::MAX, &mut rng);
        assert_eq!(outcome, TurnOutcome::Moved(Direction::Right));
        assert_eq!(enemy.head(), Position::new(11, 30));
        assert_eq!(enemy.len(), 4);
    }

    #[test]
    fn test_autonomous_snake_turns_away_from_wall() {
        let player = Snake::new(Position::new(20, 2), Direction::Right, 3, Owner::Player);
        let mut enemy =
            AutonomousSnake::new(Snake::new(Position::new(39, 30), Direction::Right, 4, Owner::Enemy));
        let mut rng = StdRng::seed_from_u64(1);

        let outcome = enemy.take_turn(&player, &[], &[], u32::MAX, &mut rng);
        assert!(matches!(outcome, TurnOutcome::Moved(d) if d != Direction::Right));
        assert!(is_in_bounds(enemy.head()));
    }

    #[test]
    fn test_autonomous_snake_skips_when_boxed_in() {
        let head = Position::new(0, 0);
        let player = Snake::from_cells(
            [Position::new(1, 0), Position::new(1, 1), Position::new(0, 1)],
            Direction::Left,
            Owner::Player,
        )
        .unwrap();
        let mut enemy = AutonomousSnake::new(Snake::new(head, Direction::Up, 1, Owner::Enemy));
        let mut rng = StdRng::seed_from_u64(3);

        let outcome = enemy.take_turn(&player, &[], &[], 8, &mut rng);
        assert_eq!(outcome, TurnOutcome::Skipped);
        assert_eq!(enemy.head(), head);
    }
}
