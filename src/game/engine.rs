use log::{debug, info, trace, warn};
use rand::{rngs::StdRng, Rng, SeedableRng};

use super::{
    action::{Action, Direction},
    collision::{any_overlap, take_overlapping},
    config::GameConfig,
    entity::{FoodItem, FoodKind, Owner},
    error::GameError,
    grid::{Position, GRID_HEIGHT, GRID_WIDTH},
    navigation::{self, Surroundings},
    obstacle,
    session::{CollisionType, GameSession, Phase},
    snake::{MoveOutcome, Snake, TurnOutcome},
};

/// Where the player's head starts
pub const PLAYER_START: Position = Position { x: 15, y: 2 };
/// Where the rival's head starts
pub const ENEMY_START: Position = Position { x: 10, y: 30 };

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Food the player ate this step
    pub player_ate: Vec<FoodKind>,
    /// Food the rival ate this step
    pub enemy_ate: Vec<FoodKind>,
    /// Collision that ended the game this step, if any
    pub collision_type: Option<CollisionType>,
    /// What the rival did
    pub enemy_turn: TurnOutcome,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Change in score this step
    pub score_delta: i64,
    /// Whether the game has ended
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

impl StepResult {
    fn idle() -> Self {
        Self {
            score_delta: 0,
            terminated: true,
            info: StepInfo {
                player_ate: Vec::new(),
                enemy_ate: Vec::new(),
                collision_type: None,
                enemy_turn: TurnOutcome::Skipped,
            },
        }
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    /// Create an engine with a fixed seed, overriding the configured one
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build a fresh session: snakes, obstacles, then food
    pub fn reset(&mut self) -> Result<GameSession, GameError> {
        let player = Snake::new(
            PLAYER_START,
            Direction::Right,
            self.config.player_length,
            Owner::Player,
        );
        let enemy = Snake::new(
            ENEMY_START,
            Direction::Right,
            self.config.enemy_length,
            Owner::Enemy,
        );

        let shapes = self
            .rng
            .gen_range(self.config.min_obstacles..=self.config.max_obstacles);
        let obstacles = obstacle::place_many(&mut self.rng, shapes);

        let mut session = GameSession::new(player, enemy, Vec::new(), obstacles);
        for _ in 0..self.config.initial_food {
            let item = self.spawn_food(&session)?;
            session.food.push(item);
        }

        info!(
            "new session: {} obstacle shapes ({} pieces), {} food",
            shapes,
            session.obstacles.len(),
            session.food.len()
        );
        Ok(session)
    }

    /// Replace a session that is waiting for a restart. Returns whether a
    /// new session was built.
    pub fn restart_if_requested(&mut self, session: &mut GameSession) -> Result<bool, GameError> {
        if session.phase() != Phase::ResetPending {
            return Ok(false);
        }
        *session = self.reset()?;
        Ok(true)
    }

    /// Execute one tick: player move, rival move, food, then terminal checks
    pub fn step(&mut self, session: &mut GameSession, action: Action) -> Result<StepResult, GameError> {
        if session.lost {
            return Ok(StepResult::idle());
        }

        let score_before = session.score;
        let mut collision_type = None;

        session.player.turn(action);
        if session.player.advance() == MoveOutcome::Blocked {
            collision_type = Some(CollisionType::Wall);
        }

        let enemy_turn = session.enemy.take_turn(
            &session.player,
            &session.obstacles,
            &session.food,
            self.config.enemy_reevaluate_one_in,
            &mut self.rng,
        );
        if enemy_turn == TurnOutcome::Skipped {
            debug!("rival found no safe move at {:?}", session.enemy.head());
        }

        let player_ate = self.resolve_food(session, Owner::Player)?;
        let enemy_ate = self.resolve_food(session, Owner::Enemy)?;

        if collision_type.is_none() {
            collision_type = self.check_collision(session);
        }
        if let Some(kind) = collision_type {
            session.lost = true;
            info!("game lost ({:?}) with score {}", kind, session.score);
        }

        session.steps += 1;

        Ok(StepResult {
            score_delta: session.score - score_before,
            terminated: session.lost,
            info: StepInfo {
                player_ate,
                enemy_ate,
                collision_type,
                enemy_turn,
            },
        })
    }

    /// Heading the heuristic would pick for the player, treating the rival as
    /// its target. Used when the computer plays both sides. Unlike the rival,
    /// the player dies on its own body, so those cells are never chosen.
    pub fn autopilot(&mut self, session: &GameSession) -> Action {
        let view = Surroundings {
            own: &session.player,
            rival: &session.enemy,
            obstacles: &session.obstacles,
            food: &session.food,
        };
        navigation::steer_cautiously(&view, self.config.enemy_reevaluate_one_in, &mut self.rng)
            .into()
    }

    /// Let `eater`'s head consume whatever food it sits on
    fn resolve_food(&mut self, session: &mut GameSession, eater: Owner) -> Result<Vec<FoodKind>, GameError> {
        let head = match eater {
            Owner::Player => session.player.head(),
            Owner::Enemy => session.enemy.head(),
        };
        let eaten = take_overlapping(&head, &mut session.food);

        for item in &eaten {
            match eater {
                Owner::Player => {
                    session.score += item.value();
                    session.player.grow();
                }
                Owner::Enemy => {
                    session.score -= item.value();
                    session.enemy.grow();
                }
            }
            self.replenish(session, eater)?;
        }

        Ok(eaten.into_iter().map(|item| item.kind).collect())
    }

    /// Put a new food item on the board. Food taken by the rival is
    /// sometimes not replaced, so the board thins out over time.
    fn replenish(&mut self, session: &mut GameSession, eater: Owner) -> Result<(), GameError> {
        if eater == Owner::Enemy
            && session.food.len() > self.config.scarcity_min_remaining
            && self.rng.gen_ratio(1, self.config.scarcity_one_in.max(1))
        {
            debug!("food not replenished, {} left", session.food.len());
            return Ok(());
        }

        let item = self.spawn_food(session)?;
        session.food.push(item);
        Ok(())
    }

    /// Random food on a cell free of snakes and obstacles
    fn spawn_food(&mut self, session: &GameSession) -> Result<FoodItem, GameError> {
        let attempts = self.config.max_spawn_attempts;
        for attempt in 1..=attempts {
            let cell = Position::new(
                self.rng.gen_range(0..GRID_WIDTH),
                self.rng.gen_range(0..GRID_HEIGHT),
            );
            if session.blocks_spawn(cell) {
                trace!("food spawn attempt {} hit {:?}", attempt, cell);
                continue;
            }
            return Ok(FoodItem::new(cell, FoodKind::roll(&mut self.rng)));
        }

        warn!("gave up placing food after {} attempts", attempts);
        Err(GameError::SpawnExhausted { attempts })
    }

    /// Check whether the player's head ended up somewhere fatal
    fn check_collision(&self, session: &GameSession) -> Option<CollisionType> {
        let head = session.player.head();

        if any_overlap(&head, &session.obstacles) {
            return Some(CollisionType::Obstacle);
        }

        if session.player.collides_with_body(head) {
            return Some(CollisionType::SelfCollision);
        }

        if session.enemy.contains(head) {
            return Some(CollisionType::Enemy);
        }

        None
    }
}
