//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! It can be driven tick by tick from a terminal UI, an agent, or a test harness.

pub mod action;
pub mod config;
pub mod engine;
pub mod food;
pub mod grid;
pub mod snake;

// Re-export commonly used types
pub use action::{COMMAND_COUNT, Command, DecisionError, Offset, Orientation, Turn};
pub use config::{GRID_SIZE, GameConfig, HUMAN_TICKS_PER_SECOND};
pub use engine::{CommandSource, Episode, Phase, Termination, TickOutcome};
pub use food::Food;
pub use grid::{Cell, Grid};
pub use snake::{Position, SENSOR_COUNT, Snake};
