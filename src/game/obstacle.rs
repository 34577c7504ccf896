//! Obstacle shape catalog and placement

use rand::Rng;

use super::entity::ObstaclePiece;
use super::grid::{Position, GRID_HEIGHT, GRID_WIDTH};

/// Shape templates as cell offsets from a placement origin
pub const SHAPES: [&[(i32, i32)]; 5] = [
    &[(-1, 0), (0, 0), (1, 0), (1, 1), (2, 1), (3, 1), (3, 2), (3, 3)],
    &[
        (0, 0),
        (0, 1),
        (0, 2),
        (0, 3),
        (1, 3),
        (2, 3),
        (3, 3),
        (4, 3),
        (4, 2),
        (4, 1),
        (4, 0),
    ],
    &[
        (0, 0),
        (0, 1),
        (0, 2),
        (0, 3),
        (1, 1),
        (1, 2),
        (1, 3),
        (2, 2),
        (2, 3),
        (3, 3),
    ],
    &[(0, 0), (1, 1), (2, 2), (3, 3)],
    &[(3, 0), (2, 1), (1, 2), (0, 3)],
];

/// Pieces of one shape anchored at `origin`
pub fn shape_at(shape: &[(i32, i32)], origin: Position) -> Vec<ObstaclePiece> {
    shape
        .iter()
        .map(|&(dx, dy)| ObstaclePiece::new(origin.moved_by(dx, dy)))
        .collect()
}

/// Pick a random shape and origin and return its pieces.
///
/// The origin ranges leave the wider shapes able to poke past the right edge;
/// such pieces sit off the board and can never be reached. Placement does not
/// look at where the snakes start.
pub fn place_random<R: Rng + ?Sized>(rng: &mut R) -> Vec<ObstaclePiece> {
    let shape = SHAPES[rng.gen_range(0..SHAPES.len())];
    let origin = Position::new(
        rng.gen_range(2..=GRID_WIDTH - 4),
        rng.gen_range(3..=GRID_HEIGHT - 4),
    );
    shape_at(shape, origin)
}

/// Place `count` random shapes
pub fn place_many<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<ObstaclePiece> {
    (0..count).flat_map(|_| place_random(&mut *rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_shape_at_offsets() {
        let pieces = shape_at(SHAPES[3], Position::new(10, 10));
        let cells: Vec<Position> = pieces.iter().map(|p| p.cell).collect();
        assert_eq!(
            cells,
            vec![
                Position::new(10, 10),
                Position::new(11, 11),
                Position::new(12, 12),
                Position::new(13, 13),
            ]
        );
    }

    #[test]
    fn test_random_placement_matches_a_shape() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let pieces = place_random(&mut rng);
            assert!(SHAPES.iter().any(|s| s.len() == pieces.len()));
            // Every piece lies within the origin range plus the widest offsets
            for piece in &pieces {
                assert!(piece.cell.x >= 1 && piece.cell.x <= GRID_WIDTH);
                assert!(piece.cell.y >= 3 && piece.cell.y <= GRID_HEIGHT - 1);
            }
        }
    }

    #[test]
    fn test_place_many_counts_shapes() {
        let mut rng = StdRng::seed_from_u64(5);
        let pieces = place_many(&mut rng, 3);
        let min = SHAPES.iter().map(|s| s.len()).min().unwrap_or(0);
        assert!(pieces.len() >= 3 * min);
        assert!(place_many(&mut rng, 0).is_empty());
    }
}
