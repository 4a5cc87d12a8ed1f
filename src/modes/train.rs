//! Training mode
//!
//! Scores generations of randomly initialised policy networks with the
//! training fitness episode. Every candidate plays one seeded episode on the
//! blocking thread pool; episodes share no state. The first agent that reaches
//! the success score is exported immediately, otherwise the fittest agent seen
//! over all generations is exported once the run ends.
//!
//! # Example
//!
//! ```rust,ignore
//! use evo_snake::modes::{TrainConfig, TrainMode};
//! use std::path::PathBuf;
//!
//! let config = TrainConfig::new(50, 200, PathBuf::from("models/best_agent.bin"));
//! let outcome = TrainMode::new(config).run().await?;
//! println!("exported generation {} agent", outcome.generation);
//! ```

use anyhow::{Context, Result, bail};
use burn::tensor::backend::Backend;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::path::PathBuf;

use crate::agent::{
    AgentMetadata, EpisodeEnd, FitnessConfig, FitnessReport, InferenceBackend, PolicyConfig,
    PolicyNetwork, default_device, evaluate_fitness, metadata_path, save_agent,
};
use crate::game::GameConfig;
use crate::metrics::{GenerationSummary, TrainingStats};

/// Configuration for training mode
#[derive(Debug, Clone)]
pub struct TrainConfig {
    /// Number of generations to evaluate
    pub generations: usize,

    /// Candidates per generation
    pub population_size: usize,

    /// Episodes run at the same time
    pub workers: usize,

    /// Seed for network weights and episode layouts
    pub seed: Option<u64>,

    /// Where the exported agent is written
    pub save_path: PathBuf,

    pub policy: PolicyConfig,
    pub game_config: GameConfig,
    pub fitness_config: FitnessConfig,
}

impl TrainConfig {
    pub fn new(generations: usize, population_size: usize, save_path: PathBuf) -> Self {
        let workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4);

        Self {
            generations,
            population_size,
            workers,
            seed: None,
            save_path,
            policy: PolicyConfig::default(),
            game_config: GameConfig::default(),
            fitness_config: FitnessConfig::default(),
        }
    }
}

/// The agent that was exported at the end of training
#[derive(Debug, Clone, PartialEq)]
pub struct TrainOutcome {
    pub generation: usize,
    pub report: FitnessReport,
    /// Network weights file
    pub weights_path: PathBuf,
    /// JSON metadata file
    pub metadata_path: PathBuf,
}

struct Candidate {
    network: PolicyNetwork<InferenceBackend>,
    report: FitnessReport,
}

pub struct TrainMode {
    config: TrainConfig,
    stats: TrainingStats,
    rng: StdRng,
    device: <InferenceBackend as Backend>::Device,
}

impl TrainMode {
    pub fn new(config: TrainConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => {
                InferenceBackend::seed(seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };
        let stats = TrainingStats::new(config.population_size.max(1));

        Self {
            config,
            stats,
            rng,
            device: default_device(),
        }
    }

    pub fn stats(&self) -> &TrainingStats {
        &self.stats
    }

    /// Run every generation and export the chosen agent
    pub async fn run(&mut self) -> Result<TrainOutcome> {
        if self.config.generations == 0 || self.config.population_size == 0 {
            bail!("Training needs at least one generation and one candidate");
        }

        tracing::info!(
            generations = self.config.generations,
            population = self.config.population_size,
            workers = self.config.workers,
            hidden = self.config.policy.hidden,
            "Starting training"
        );

        let mut best: Option<(usize, Candidate)> = None;

        for generation in 0..self.config.generations {
            let candidates = self.evaluate_generation().await?;
            let reports: Vec<FitnessReport> = candidates.iter().map(|c| c.report).collect();
            for report in &reports {
                self.stats.record_episode(report);
            }

            if let Some(summary) = GenerationSummary::from_reports(generation, &reports) {
                tracing::info!(
                    generation,
                    best_fitness = summary.best_fitness,
                    mean_fitness = summary.mean_fitness,
                    best_score = summary.best_score,
                    solved = summary.solved,
                    starved = summary.starved,
                    "Generation finished"
                );
            }
            tracing::debug!("{}", self.stats.format_summary());

            if let Some(solved) = candidates
                .iter()
                .find(|c| c.report.end == EpisodeEnd::Solved)
            {
                tracing::info!(generation, score = solved.report.score, "Agent solved the game");
                return self.export(generation, solved);
            }

            if let Some(fittest) = candidates
                .into_iter()
                .max_by(|a, b| a.report.fitness.total_cmp(&b.report.fitness))
            {
                let improved = best
                    .as_ref()
                    .map_or(true, |(_, current)| fittest.report.fitness > current.report.fitness);
                if improved {
                    best = Some((generation, fittest));
                }
            }
        }

        let (generation, candidate) = best.context("No candidate was evaluated")?;
        self.export(generation, &candidate)
    }

    /// Evaluate one generation of fresh networks, `workers` episodes at a time
    async fn evaluate_generation(&mut self) -> Result<Vec<Candidate>> {
        let workers = self.config.workers.max(1);
        let mut candidates = Vec::with_capacity(self.config.population_size);
        let mut remaining = self.config.population_size;

        while remaining > 0 {
            let batch = remaining.min(workers);
            let mut handles = Vec::with_capacity(batch);

            for _ in 0..batch {
                let network = self.config.policy.init::<InferenceBackend>(&self.device);
                let game = self.config.game_config.clone();
                let fitness = self.config.fitness_config.clone();
                let episode_seed: u64 = self.rng.gen();

                handles.push(tokio::task::spawn_blocking(move || {
                    evaluate_fitness(&network, &game, &fitness, episode_seed)
                        .map(|report| Candidate { network, report })
                }));
            }

            for handle in handles {
                let candidate = handle.await.context("Evaluation task failed")??;
                candidates.push(candidate);
            }

            remaining -= batch;
        }

        Ok(candidates)
    }

    fn export(&self, generation: usize, candidate: &Candidate) -> Result<TrainOutcome> {
        let metadata = AgentMetadata::new(
            self.config.policy.clone(),
            generation,
            candidate.report.fitness,
            candidate.report.score,
        );
        let weights_path = save_agent(&candidate.network, &metadata, &self.config.save_path)
            .with_context(|| format!("Failed to export agent to {:?}", self.config.save_path))?;

        tracing::info!(
            generation,
            fitness = candidate.report.fitness,
            score = candidate.report.score,
            "{}",
            self.stats.format_summary()
        );

        Ok(TrainOutcome {
            generation,
            report: candidate.report,
            weights_path,
            metadata_path: metadata_path(&self.config.save_path),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::load_agent;
    use tempfile::TempDir;

    fn small_config(save_path: PathBuf) -> TrainConfig {
        let mut config = TrainConfig::new(2, 3, save_path);
        config.workers = 2;
        config.seed = Some(5);
        config.policy = PolicyConfig::new(4);
        config.fitness_config.starvation_ticks = 50;
        config
    }

    #[test]
    fn test_train_config_creation() {
        let config = TrainConfig::new(10, 20, PathBuf::from("test.bin"));
        assert_eq!(config.generations, 10);
        assert_eq!(config.population_size, 20);
        assert!(config.workers >= 1);
        assert_eq!(config.save_path, PathBuf::from("test.bin"));
    }

    #[tokio::test]
    async fn test_exports_best_after_all_generations() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("best.bin");
        let mut mode = TrainMode::new(small_config(path.clone()));

        let outcome = mode.run().await.unwrap();

        // A 50 tick starvation cutoff makes the success score unreachable
        assert_ne!(outcome.report.end, EpisodeEnd::Solved);
        assert_eq!(mode.stats().total_episodes(), 6);
        assert_eq!(mode.stats().best_fitness(), Some(outcome.report.fitness));

        let (_, metadata) = load_agent::<InferenceBackend>(&path, &default_device()).unwrap();
        assert_eq!(metadata.generation, outcome.generation);
        assert_eq!(metadata.score, outcome.report.score);
        assert_eq!(metadata.policy, PolicyConfig::new(4));
    }

    #[tokio::test]
    async fn test_first_solved_agent_stops_training() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("solved.bin");
        let mut config = small_config(path.clone());
        // Every candidate reaches a zero score target on its first tick
        config.fitness_config.success_score = 0;
        let mut mode = TrainMode::new(config);

        let outcome = mode.run().await.unwrap();

        assert_eq!(outcome.generation, 0);
        assert_eq!(outcome.report.end, EpisodeEnd::Solved);
        assert_eq!(outcome.report.ticks, 1);
        assert_eq!(mode.stats().total_episodes(), 3);
        assert_eq!(outcome.weights_path, temp_dir.path().join("solved.mpk"));
        assert_eq!(outcome.metadata_path, temp_dir.path().join("solved.meta.json"));
        assert!(outcome.weights_path.exists());
        assert!(outcome.metadata_path.exists());
    }

    #[tokio::test]
    async fn test_empty_population_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = small_config(temp_dir.path().join("none.bin"));
        config.population_size = 0;

        assert!(TrainMode::new(config).run().await.is_err());
    }
}
