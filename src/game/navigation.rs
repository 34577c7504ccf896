//! Direction choice for computer-steered snakes
//!
//! Each candidate direction is scored by a straight-line probe from the head:
//! every free cell along the ray adds to a base weight, food and the rival's
//! body raise a multiplier, and the snake's own body drags the weight down.
//! The best scoring direction that passes a one-step safety check wins.
//!
//! All functions here are pure: they take a hypothetical cell and read the
//! board, never moving any entity.

use std::cmp::Reverse;

use log::trace;
use rand::Rng;

use super::action::Direction;
use super::collision::{any_overlap, count_overlaps};
use super::entity::{FoodItem, ObstaclePiece};
use super::grid::{is_in_bounds, Position};
use super::snake::Snake;

/// Multiplier bonus for each probed cell holding food
pub const FOOD_BONUS: i64 = 5;
/// Multiplier bonus for each probed cell holding a rival segment
pub const RIVAL_BONUS: i64 = 3;
/// Weight penalty for each own body segment on a probed cell
pub const SELF_PENALTY: i64 = 5;

/// Read-only view of the board from one snake's point of view
#[derive(Debug, Clone, Copy)]
pub struct Surroundings<'a> {
    /// The snake being steered
    pub own: &'a Snake,
    /// The other snake on the board
    pub rival: &'a Snake,
    pub obstacles: &'a [ObstaclePiece],
    pub food: &'a [FoodItem],
}

/// Score a direction by probing in a straight line from `from` until the
/// board edge or an obstacle. The probe stops once the cell after the current
/// one would leave the board, so the edge row or column never counts.
pub fn lookahead_score(from: Position, direction: Direction, view: &Surroundings<'_>) -> i64 {
    let mut weight = 0;
    let mut multiplier = 1;
    let mut cell = from;

    loop {
        cell = cell.moved_in_direction(direction);
        let beyond = cell.moved_in_direction(direction);
        if !is_in_bounds(beyond) || any_overlap(&cell, view.obstacles) {
            break;
        }

        if any_overlap(&cell, view.food) {
            multiplier += FOOD_BONUS;
        }
        weight -= SELF_PENALTY * count_overlaps(&cell, view.own.body_segments()) as i64;
        weight += 1;
        if any_overlap(&cell, view.rival.segments()) {
            multiplier += RIVAL_BONUS;
        }
    }

    multiplier * weight
}

/// Whether entering `cell` is survivable: on the board, not an obstacle, not
/// the rival's body. Running over one's own body is tolerated.
pub fn is_safe(cell: Position, view: &Surroundings<'_>) -> bool {
    is_in_bounds(cell)
        && !any_overlap(&cell, view.obstacles)
        && !any_overlap(&cell, view.rival.segments())
}

/// Stricter check for a snake that dies on its own body: [`is_safe`] and not
/// onto any own segment behind the head.
pub fn is_survivable(cell: Position, view: &Surroundings<'_>) -> bool {
    is_safe(cell, view) && !view.own.collides_with_body(cell)
}

/// Lookahead scores for all four directions, in evaluation order
pub fn rank_directions(from: Position, view: &Surroundings<'_>) -> Vec<(Direction, i64)> {
    Direction::ALL
        .iter()
        .map(|&d| (d, lookahead_score(from, d, view)))
        .collect()
}

/// Best scoring direction whose first step is safe.
///
/// Candidates are tried from highest score down; equal scores keep the
/// up/down/left/right evaluation order. `None` when all four are unsafe.
pub fn choose_direction(view: &Surroundings<'_>) -> Option<Direction> {
    choose_direction_where(view, |cell| is_safe(cell, view))
}

fn choose_direction_where<F>(view: &Surroundings<'_>, safe: F) -> Option<Direction>
where
    F: Fn(Position) -> bool,
{
    let head = view.own.head();
    let mut candidates = rank_directions(head, view);
    // Stable sort, so ties stay in evaluation order
    candidates.sort_by_key(|&(_, score)| Reverse(score));

    candidates
        .into_iter()
        .inspect(|(d, score)| trace!("probe {} scored {}", d.as_str(), score))
        .map(|(d, _)| d)
        .find(|&d| safe(head.moved_in_direction(d)))
}

/// Heading for this tick: the current one while it is safe, a full
/// re-evaluation when it is not or when the 1-in-`reevaluate_one_in` roll
/// fires. A zero is treated as one.
pub fn steer<R: Rng + ?Sized>(
    view: &Surroundings<'_>,
    reevaluate_one_in: u32,
    rng: &mut R,
) -> Option<Direction> {
    steer_where(view, reevaluate_one_in, rng, |cell| is_safe(cell, view))
}

/// [`steer`] for the player snake: same scoring, but every step must also
/// pass [`is_survivable`], so the snake never turns into its own body.
pub fn steer_cautiously<R: Rng + ?Sized>(
    view: &Surroundings<'_>,
    reevaluate_one_in: u32,
    rng: &mut R,
) -> Option<Direction> {
    steer_where(view, reevaluate_one_in, rng, |cell| is_survivable(cell, view))
}

fn steer_where<R, F>(
    view: &Surroundings<'_>,
    reevaluate_one_in: u32,
    rng: &mut R,
    safe: F,
) -> Option<Direction>
where
    R: Rng + ?Sized,
    F: Fn(Position) -> bool,
{
    let current = view.own.direction();
    let forced = rng.gen_ratio(1, reevaluate_one_in.max(1));

    if forced || !safe(view.own.next_head()) {
        choose_direction_where(view, safe)
    } else {
        Some(current)
    }
}
