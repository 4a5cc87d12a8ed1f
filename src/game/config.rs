use serde::{Deserialize, Serialize};

use super::action::Orientation;

/// Side length of the square board in cells
pub const GRID_SIZE: i32 = 30;

/// Cells kept free of food along every edge
pub const FOOD_MARGIN: i32 = 2;

/// Spawn location of the snake's head
pub const SPAWN_HEAD: (i32, i32) = (14, 15);

/// Body length at spawn, head included
pub const INITIAL_SNAKE_LENGTH: usize = 6;

/// Ticks per second when a person is playing
pub const HUMAN_TICKS_PER_SECOND: u64 = 17;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Head position at spawn
    pub spawn_head: (i32, i32),
    /// Direction faced at spawn
    pub spawn_orientation: Orientation,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Food is never sampled within this many cells of an edge
    pub food_margin: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            spawn_head: SPAWN_HEAD,
            spawn_orientation: Orientation::Right,
            initial_snake_length: INITIAL_SNAKE_LENGTH,
            food_margin: FOOD_MARGIN,
        }
    }
}

impl GameConfig {
    /// Half-open range food coordinates are drawn from
    pub fn food_range(&self) -> std::ops::Range<i32> {
        self.food_margin..GRID_SIZE - self.food_margin
    }
}
