use std::time::{Duration, Instant};

/// Per-session record of finished games and the clock of the current one
#[derive(Debug, Clone)]
pub struct SessionMetrics {
    game_started: Instant,
    /// Set once the current game has ended, freezing its clock
    game_length: Option<Duration>,
    scores: Vec<u32>,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self {
            game_started: Instant::now(),
            game_length: None,
            scores: Vec::new(),
        }
    }

    /// Restart the clock for a new game
    pub fn start_game(&mut self) {
        self.game_started = Instant::now();
        self.game_length = None;
    }

    /// Record the final score and stop the clock
    pub fn finish_game(&mut self, score: u32) {
        if self.game_length.is_some() {
            return;
        }
        self.game_length = Some(self.game_started.elapsed());
        self.scores.push(score);
    }

    /// Time spent in the current game, or the length of the last one
    pub fn game_time(&self) -> Duration {
        self.game_length
            .unwrap_or_else(|| self.game_started.elapsed())
    }

    pub fn games_played(&self) -> usize {
        self.scores.len()
    }

    pub fn best_score(&self) -> u32 {
        self.scores.iter().copied().max().unwrap_or(0)
    }

    pub fn last_score(&self) -> Option<u32> {
        self.scores.last().copied()
    }

    pub fn average_score(&self) -> f32 {
        if self.scores.is_empty() {
            0.0
        } else {
            self.scores.iter().sum::<u32>() as f32 / self.scores.len() as f32
        }
    }
}

impl Default for SessionMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// `mm:ss`, with minutes allowed past 59
pub fn format_clock(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
