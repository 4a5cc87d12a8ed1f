use rand::Rng;

use super::config::GameConfig;
use super::grid::{Cell, Grid};
use super::snake::{Position, Snake};

/// A food item registered on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    position: Position,
}

impl Food {
    /// Put a food item at `position` and mark its cell
    pub fn place(grid: &mut Grid, position: Position) -> Self {
        grid.set(position.x, position.y, Cell::Food);
        Self { position }
    }

    /// Place food at a random cell inside the margin that the snake does not
    /// occupy. Retries until such a cell is found.
    pub fn spawn<R: Rng + ?Sized>(
        grid: &mut Grid,
        snake: &Snake,
        config: &GameConfig,
        rng: &mut R,
    ) -> Self {
        let range = config.food_range();
        loop {
            let candidate = Position::new(
                rng.gen_range(range.clone()),
                rng.gen_range(range.clone()),
            );

            if !snake.contains(candidate) {
                return Self::place(grid, candidate);
            }
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }
}
