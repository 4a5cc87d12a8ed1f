//! Fitness shaping for training episodes
//!
//! A training episode is an ordinary [`Episode`] plus bookkeeping: distance to
//! the food before and after every tick, ticks since the last meal, and a
//! success score at which the episode stops early. None of it changes how the
//! episode itself transitions.

use serde::{Deserialize, Serialize};

use super::{Agent, AgentPilot, DecisionError};
use crate::game::{CommandSource, Episode, GameConfig, Position, Termination};

/// Reward and cutoff settings for training episodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessConfig {
    /// Reward when the head got closer to the food on either axis
    pub approach_reward: f32,
    /// Penalty for any other move
    pub retreat_penalty: f32,
    /// Reward for eating
    pub food_reward: f32,
    /// Penalty for running into the snake's own body
    pub self_collision_penalty: f32,
    /// Penalty for leaving the board
    pub wall_penalty: f32,
    /// Ticks without eating before the episode is cut off
    pub starvation_ticks: u64,
    /// Penalty applied when the episode is cut off
    pub starvation_penalty: f32,
    /// Score at which the agent counts as solved
    pub success_score: u32,
}

impl Default for FitnessConfig {
    fn default() -> Self {
        Self {
            approach_reward: 1.0,
            retreat_penalty: 1.5,
            food_reward: 4.0,
            self_collision_penalty: 3.0,
            wall_penalty: 2.5,
            starvation_ticks: 4000,
            starvation_penalty: 500.0,
            success_score: 45,
        }
    }
}

/// How a training episode finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeEnd {
    Collision(Termination),
    Starved,
    Solved,
}

/// Result of one training episode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitnessReport {
    pub fitness: f32,
    pub score: u32,
    pub ticks: u64,
    pub end: EpisodeEnd,
}

/// Per-axis distance from the head to the food
fn axis_distance(head: Position, food: Position) -> (i32, i32) {
    ((food.x - head.x).abs(), (food.y - head.y).abs())
}

/// Run a fresh seeded episode driven by `agent`
pub fn evaluate_fitness<A: Agent + ?Sized>(
    agent: &A,
    game: &GameConfig,
    config: &FitnessConfig,
    seed: u64,
) -> Result<FitnessReport, DecisionError> {
    let mut episode = Episode::seeded(game.clone(), seed);
    let mut pilot = AgentPilot::new(agent);
    score_episode(&mut episode, &mut pilot, config)
}

/// Drive `episode` to its end while accumulating fitness
pub fn score_episode<S: CommandSource + ?Sized>(
    episode: &mut Episode,
    source: &mut S,
    config: &FitnessConfig,
) -> Result<FitnessReport, DecisionError> {
    let mut fitness = 0.0;
    let mut ticks_since_food = 0;
    let mut distance = axis_distance(episode.snake().head(), episode.food().position());

    let end = loop {
        if ticks_since_food >= config.starvation_ticks {
            fitness -= config.starvation_penalty;
            break EpisodeEnd::Starved;
        }

        let command = source.next_command(episode)?;
        let outcome = episode.tick(command);
        ticks_since_food += 1;

        let previous = distance;
        // After a meal the distance is measured against the eaten food,
        // which the head reached before growing.
        distance = if outcome.ate_food {
            (0, 0)
        } else {
            axis_distance(episode.snake().head(), episode.food().position())
        };

        if distance.0 < previous.0 || distance.1 < previous.1 {
            fitness += config.approach_reward;
        } else {
            fitness -= config.retreat_penalty;
        }

        if outcome.ate_food {
            fitness += config.food_reward;
            ticks_since_food = 0;
        }

        if let Some(reason) = outcome.termination {
            fitness -= match reason {
                Termination::SelfCollision => config.self_collision_penalty,
                Termination::OutOfBounds => config.wall_penalty,
            };
            break EpisodeEnd::Collision(reason);
        }

        if episode.score() >= config.success_score {
            break EpisodeEnd::Solved;
        }
    };

    Ok(FitnessReport {
        fitness,
        score: episode.score(),
        ticks: episode.ticks(),
        end,
    })
}
