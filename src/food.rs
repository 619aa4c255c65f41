use rand::Rng;
use thiserror::Error;

use crate::config::GridSize;
use crate::snake::{Position, Snake};

/// Random draws tried before falling back to enumerating free cells.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 1_000;

/// Target placement failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlacementError {
    #[error("no free cell left on the {width}x{height} grid")]
    NoFreeCell { width: u16, height: u16 },
}

/// Picks a uniformly random cell that the snake does not occupy.
///
/// Rejection-samples the whole grid up to [`MAX_PLACEMENT_ATTEMPTS`] times,
/// then draws from the list of free cells so a crowded grid still terminates.
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    snake: &Snake,
) -> Result<Position, PlacementError> {
    let no_free_cell = PlacementError::NoFreeCell {
        width: bounds.width,
        height: bounds.height,
    };
    if bounds.total_cells() == 0 || snake.len() >= bounds.total_cells() {
        return Err(no_free_cell);
    }

    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let candidate = Position {
            x: rng.gen_range(0..i32::from(bounds.width)),
            y: rng.gen_range(0..i32::from(bounds.height)),
        };
        if !snake.occupies(candidate) {
            return Ok(candidate);
        }
    }

    let mut candidates = Vec::new();
    for y in 0..i32::from(bounds.height) {
        for x in 0..i32::from(bounds.width) {
            let position = Position { x, y };
            if !snake.occupies(position) {
                candidates.push(position);
            }
        }
    }

    if candidates.is_empty() {
        return Err(no_free_cell);
    }

    let index = rng.gen_range(0..candidates.len());
    Ok(candidates[index])
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;

    use crate::config::GridSize;

    use super::{spawn_position, PlacementError};
    use crate::snake::{Position, Snake};

    #[test]
    fn target_spawn_never_overlaps_snake() {
        let mut rng = StdRng::seed_from_u64(7);
        let snake = Snake::from_segments(vec![
            Position { x: 0, y: 0 },
            Position { x: 1, y: 0 },
            Position { x: 2, y: 0 },
        ]);

        for _ in 0..100 {
            let position = spawn_position(
                &mut rng,
                GridSize {
                    width: 8,
                    height: 6,
                },
                &snake,
            )
            .expect("grid has free cells");
            assert!(!snake.occupies(position));
            assert!(position.is_within_bounds(GridSize {
                width: 8,
                height: 6
            }));
        }
    }

    #[test]
    fn single_free_cell_is_found_even_with_a_stuck_source() {
        // StepRng with zero increment always yields the same draw.
        let mut rng = StepRng::new(0, 0);
        let snake = Snake::from_segments(vec![
            Position { x: 0, y: 0 },
            Position { x: 1, y: 0 },
            Position { x: 1, y: 1 },
        ]);

        let position = spawn_position(&mut rng, GridSize::square(2), &snake)
            .expect("one cell is still free");

        assert_eq!(position, Position { x: 0, y: 1 });
    }

    #[test]
    fn full_grid_reports_no_free_cell() {
        let mut rng = StdRng::seed_from_u64(1);
        let snake = Snake::from_segments(vec![
            Position { x: 0, y: 0 },
            Position { x: 1, y: 0 },
        ]);

        assert_eq!(
            spawn_position(
                &mut rng,
                GridSize {
                    width: 2,
                    height: 1
                },
                &snake
            ),
            Err(PlacementError::NoFreeCell {
                width: 2,
                height: 1
            })
        );
    }
}
