//! Training statistics tracking
//!
//! Collects the fitness reports of every evaluated agent and summarises them
//! per generation and over a rolling window of recent episodes.

use std::collections::VecDeque;

use crate::agent::{EpisodeEnd, FitnessReport};

/// Summary of one generation of candidates
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSummary {
    pub generation: usize,
    pub candidates: usize,
    pub best_fitness: f32,
    pub mean_fitness: f32,
    pub best_score: u32,
    pub solved: usize,
    pub starved: usize,
}

impl GenerationSummary {
    /// Summarise a generation's reports. An empty generation has no summary.
    pub fn from_reports(generation: usize, reports: &[FitnessReport]) -> Option<Self> {
        if reports.is_empty() {
            return None;
        }

        let best_fitness = reports
            .iter()
            .map(|r| r.fitness)
            .fold(f32::NEG_INFINITY, f32::max);
        let mean_fitness = reports.iter().map(|r| r.fitness).sum::<f32>() / reports.len() as f32;

        Some(Self {
            generation,
            candidates: reports.len(),
            best_fitness,
            mean_fitness,
            best_score: reports.iter().map(|r| r.score).max().unwrap_or(0),
            solved: count_end(reports, EpisodeEnd::Solved),
            starved: count_end(reports, EpisodeEnd::Starved),
        })
    }
}

fn count_end(reports: &[FitnessReport], end: EpisodeEnd) -> usize {
    reports.iter().filter(|r| r.end == end).count()
}

/// Training statistics tracker with rolling averages
#[derive(Debug, Clone)]
pub struct TrainingStats {
    /// Episode fitness values (rolling window)
    fitness: VecDeque<f32>,

    /// Episode scores (rolling window)
    scores: VecDeque<u32>,

    /// Best fitness seen so far
    best_fitness: Option<f32>,

    total_episodes: usize,
    total_ticks: u64,
    window_size: usize,
}

impl TrainingStats {
    pub fn new(window_size: usize) -> Self {
        Self {
            fitness: VecDeque::with_capacity(window_size),
            scores: VecDeque::with_capacity(window_size),
            best_fitness: None,
            total_episodes: 0,
            total_ticks: 0,
            window_size,
        }
    }

    /// Record one finished training episode
    pub fn record_episode(&mut self, report: &FitnessReport) {
        Self::push_deque(&mut self.fitness, report.fitness, self.window_size);
        Self::push_deque(&mut self.scores, report.score, self.window_size);
        self.best_fitness = Some(match self.best_fitness {
            Some(best) => best.max(report.fitness),
            None => report.fitness,
        });
        self.total_episodes += 1;
        self.total_ticks += report.ticks;
    }

    pub fn mean_fitness(&self) -> f32 {
        if self.fitness.is_empty() {
            0.0
        } else {
            self.fitness.iter().sum::<f32>() / self.fitness.len() as f32
        }
    }

    pub fn mean_score(&self) -> f32 {
        let sum: u32 = self.scores.iter().sum();
        if self.scores.is_empty() {
            0.0
        } else {
            sum as f32 / self.scores.len() as f32
        }
    }

    pub fn best_fitness(&self) -> Option<f32> {
        self.best_fitness
    }

    pub fn total_episodes(&self) -> usize {
        self.total_episodes
    }

    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    pub fn format_summary(&self) -> String {
        format!(
            "Episodes: {} | Ticks: {} | Fitness: {:.2} | Score: {:.2} | Best: {:.2}",
            self.total_episodes,
            self.total_ticks,
            self.mean_fitness(),
            self.mean_score(),
            self.best_fitness.unwrap_or(0.0),
        )
    }

    fn push_deque<T>(deque: &mut VecDeque<T>, value: T, window_size: usize) {
        if deque.len() >= window_size {
            deque.pop_front();
        }
        deque.push_back(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Termination;

    fn report(fitness: f32, score: u32, ticks: u64, end: EpisodeEnd) -> FitnessReport {
        FitnessReport {
            fitness,
            score,
            ticks,
            end,
        }
    }

    fn crashed(fitness: f32, score: u32, ticks: u64) -> FitnessReport {
        report(
            fitness,
            score,
            ticks,
            EpisodeEnd::Collision(Termination::OutOfBounds),
        )
    }

    #[test]
    fn test_new() {
        let stats = TrainingStats::new(100);
        assert_eq!(stats.window_size, 100);
        assert_eq!(stats.total_episodes(), 0);
        assert_eq!(stats.total_ticks(), 0);
        assert_eq!(stats.best_fitness(), None);
        assert_eq!(stats.mean_fitness(), 0.0);
        assert_eq!(stats.mean_score(), 0.0);
    }

    #[test]
    fn test_record_episode() {
        let mut stats = TrainingStats::new(100);
        stats.record_episode(&crashed(-12.5, 3, 50));

        assert_eq!(stats.total_episodes(), 1);
        assert_eq!(stats.total_ticks(), 50);
        assert!((stats.mean_fitness() + 12.5).abs() < 1e-5);
        assert!((stats.mean_score() - 3.0).abs() < 1e-5);
        assert_eq!(stats.best_fitness(), Some(-12.5));
    }

    #[test]
    fn test_rolling_average() {
        let mut stats = TrainingStats::new(3);

        stats.record_episode(&crashed(1.0, 1, 10));
        stats.record_episode(&crashed(2.0, 2, 20));
        stats.record_episode(&crashed(3.0, 3, 30));
        assert!((stats.mean_fitness() - 2.0).abs() < 1e-5);

        // The fourth episode evicts the first from the window
        stats.record_episode(&crashed(4.0, 4, 40));

        assert_eq!(stats.total_episodes(), 4);
        assert_eq!(stats.total_ticks(), 100);
        assert!((stats.mean_fitness() - 3.0).abs() < 1e-5);
        assert_eq!(stats.best_fitness(), Some(4.0));
    }

    #[test]
    fn test_best_fitness_survives_window() {
        let mut stats = TrainingStats::new(1);

        stats.record_episode(&crashed(50.0, 5, 10));
        stats.record_episode(&crashed(-3.0, 0, 10));

        assert!((stats.mean_fitness() + 3.0).abs() < 1e-5);
        assert_eq!(stats.best_fitness(), Some(50.0));
    }

    #[test]
    fn test_format_summary() {
        let mut stats = TrainingStats::new(100);
        stats.record_episode(&crashed(15.5, 5, 150));

        let summary = stats.format_summary();
        assert!(summary.contains("Episodes: 1"));
        assert!(summary.contains("Ticks: 150"));
        assert!(summary.contains("Fitness: 15.50"));
        assert!(summary.contains("Score: 5.00"));
        assert!(summary.contains("Best: 15.50"));
    }

    #[test]
    fn test_generation_summary() {
        let reports = [
            crashed(-10.0, 0, 12),
            report(-480.0, 2, 4000, EpisodeEnd::Starved),
            report(300.0, 45, 900, EpisodeEnd::Solved),
        ];

        let summary = GenerationSummary::from_reports(4, &reports).unwrap();

        assert_eq!(summary.generation, 4);
        assert_eq!(summary.candidates, 3);
        assert_eq!(summary.best_fitness, 300.0);
        assert!((summary.mean_fitness + 63.333_33).abs() < 1e-3);
        assert_eq!(summary.best_score, 45);
        assert_eq!(summary.solved, 1);
        assert_eq!(summary.starved, 1);
    }

    #[test]
    fn test_empty_generation_has_no_summary() {
        assert_eq!(GenerationSummary::from_reports(0, &[]), None);
    }
}
