//! Decision-making side of the game
//!
//! Provides:
//! - The `Agent` abstraction consumed by the game (11 inputs, 3 scores)
//! - The sensor encoding that turns an episode into agent inputs
//! - A burn feed-forward policy network implementing `Agent`
//! - Export and import of trained networks
//! - Fitness evaluation of agents over training episodes

pub mod backend;
pub mod encoder;
pub mod fitness;
pub mod network;
pub mod persistence;

pub use backend::{InferenceBackend, default_device};
pub use encoder::{FoodHint, SENSOR_VECTOR_LEN, decide, food_hint, sensor_vector};
pub use fitness::{EpisodeEnd, FitnessConfig, FitnessReport, evaluate_fitness};
pub use network::{PolicyConfig, PolicyNetwork};
pub use persistence::{AgentMetadata, load_agent, metadata_path, save_agent, weights_path};

pub use crate::game::DecisionError;

use crate::game::{Command, CommandSource, Episode};

/// Any function from the sensor vector to a score vector
pub trait Agent {
    /// Evaluate the agent on one input vector.
    ///
    /// The game expects 3 scores back: left, right, straight.
    fn evaluate(&self, inputs: &[f32]) -> Vec<f32>;
}

impl<A: Agent + ?Sized> Agent for &A {
    fn evaluate(&self, inputs: &[f32]) -> Vec<f32> {
        (**self).evaluate(inputs)
    }
}

impl<A: Agent + ?Sized> Agent for Box<A> {
    fn evaluate(&self, inputs: &[f32]) -> Vec<f32> {
        (**self).evaluate(inputs)
    }
}

/// Steers an episode with an agent: encode, evaluate, argmax
pub struct AgentPilot<A> {
    agent: A,
}

impl<A: Agent> AgentPilot<A> {
    pub fn new(agent: A) -> Self {
        Self { agent }
    }
}

impl<A: Agent> CommandSource for AgentPilot<A> {
    fn next_command(&mut self, episode: &Episode) -> Result<Command, DecisionError> {
        let scores = decide(&self.agent, episode.grid(), episode.snake(), episode.food());
        Command::from_scores(&scores)
    }
}
