//! Play mode for watching an exported agent
//!
//! Loads an agent written by training mode and lets it steer the snake. A
//! finished episode restarts on the next tick.
//!
//! # Controls
//!
//! - Space: Pause/unpause
//! - R: Restart episode
//! - 1-4: Speed control (1=slow, 2=normal, 3=fast, 4=very fast)
//! - Q/Esc: Quit

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{Stderr, stderr},
    path::Path,
    time::Duration,
};
use tokio::time::{Interval, MissedTickBehavior, interval};

use super::human::cleanup_terminal;
use crate::agent::{AgentMetadata, AgentPilot, InferenceBackend, PolicyNetwork, load_agent};
use crate::game::{CommandSource, Episode, GameConfig, HUMAN_TICKS_PER_SECOND};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::SessionMetrics;
use crate::render::{Hud, Renderer};

const CONTROLS: &str = "Space: Pause | 1-4: Speed | R: Restart | Q/Esc: Quit";

/// Playback speed settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackSpeed {
    /// 4 ticks per second
    Slow,
    /// Same rate as human play
    Normal,
    /// 50 ticks per second
    Fast,
    /// 200 ticks per second
    VeryFast,
}

impl PlaybackSpeed {
    /// Speed for a number key, 1 to 4
    pub fn from_key(key: u8) -> Option<Self> {
        match key {
            1 => Some(Self::Slow),
            2 => Some(Self::Normal),
            3 => Some(Self::Fast),
            4 => Some(Self::VeryFast),
            _ => None,
        }
    }

    fn tick_interval(&self) -> Duration {
        match self {
            Self::Slow => Duration::from_millis(250),
            Self::Normal => Duration::from_millis(1000 / HUMAN_TICKS_PER_SECOND),
            Self::Fast => Duration::from_millis(20),
            Self::VeryFast => Duration::from_millis(5),
        }
    }

    /// Timer ticking at this speed, starting now
    fn timer(&self) -> Interval {
        let mut timer = interval(self.tick_interval());
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        timer
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Slow => "Slow",
            Self::Normal => "Normal",
            Self::Fast => "Fast",
            Self::VeryFast => "Very Fast",
        }
    }
}

pub struct PlayMode {
    pilot: AgentPilot<PolicyNetwork<InferenceBackend>>,
    metadata: AgentMetadata,
    episode: Episode,
    renderer: Renderer,
    input_handler: InputHandler,
    metrics: SessionMetrics,
    should_quit: bool,
    paused: bool,
    speed: PlaybackSpeed,
    episode_count: usize,
}

impl PlayMode {
    /// Load the agent saved at `model_path`
    pub fn new(model_path: &Path, config: GameConfig) -> Result<Self> {
        let device = crate::agent::default_device();
        let (network, metadata) = load_agent::<InferenceBackend>(model_path, &device)
            .with_context(|| format!("Failed to load agent from {:?}", model_path))?;

        tracing::info!(
            path = ?model_path,
            generation = metadata.generation,
            fitness = metadata.fitness,
            score = metadata.score,
            version = %metadata.version,
            "Loaded agent"
        );

        Ok(Self::with_network(network, metadata, config))
    }

    fn with_network(
        network: PolicyNetwork<InferenceBackend>,
        metadata: AgentMetadata,
        config: GameConfig,
    ) -> Self {
        Self {
            pilot: AgentPilot::new(network),
            metadata,
            episode: Episode::new(config),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            metrics: SessionMetrics::new(),
            should_quit: false,
            paused: false,
            speed: PlaybackSpeed::Normal,
            episode_count: 0,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let result = self.run_playback_loop(&mut terminal).await;

        cleanup_terminal(&mut terminal)?;

        tracing::info!(
            episodes = self.metrics.games_played(),
            high_score = self.metrics.best_score(),
            average_score = self.metrics.average_score(),
            "Playback over"
        );

        result
    }

    async fn run_playback_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut tick_timer = self.speed.timer();

        // Render at 30 FPS
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event, &mut tick_timer);
                    }
                }

                _ = tick_timer.tick() => {
                    if !self.paused {
                        self.step()?;
                    }
                }

                _ = render_timer.tick() => {
                    let hud = self.hud();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.episode, &hud);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Advance one tick, or start a new episode if the last one ended
    fn step(&mut self) -> Result<()> {
        if !self.episode.is_running() {
            self.restart();
            return Ok(());
        }

        let command = self
            .pilot
            .next_command(&self.episode)
            .context("Agent produced an unusable decision")?;
        let outcome = self.episode.tick(command);
        self.renderer.palette_mut().advance_frame();

        if outcome.ate_food {
            self.renderer.palette_mut().on_food_eaten();
        }
        if let Some(reason) = outcome.termination {
            tracing::debug!(?reason, score = self.episode.score(), "Episode over");
            self.metrics.finish_game(self.episode.score());
        }

        Ok(())
    }

    fn restart(&mut self) {
        self.episode.restart();
        self.metrics.start_game();
        self.episode_count += 1;
    }

    fn handle_event(&mut self, event: Event, tick_timer: &mut Interval) {
        if let Event::Key(key) = event {
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Quit => self.should_quit = true,
                KeyAction::TogglePause => self.paused = !self.paused,
                KeyAction::Restart => self.restart(),
                KeyAction::Speed(n) => {
                    if let Some(speed) = PlaybackSpeed::from_key(n) {
                        // An interval's period is fixed when it is created
                        self.speed = speed;
                        *tick_timer = speed.timer();
                    }
                }
                KeyAction::Turn(_) | KeyAction::None => {}
            }
        }
    }

    fn hud(&self) -> Hud {
        let speed = if self.paused {
            "Paused".to_string()
        } else {
            self.speed.as_str().to_string()
        };

        Hud {
            title: "AGENT",
            fields: vec![
                ("Episode", (self.episode_count + 1).to_string()),
                ("Best", self.metrics.best_score().to_string()),
                ("Speed", speed),
                ("Generation", self.metadata.generation.to_string()),
            ],
            controls: CONTROLS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{PolicyConfig, default_device, save_agent};
    use crate::game::Command;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use tempfile::TempDir;

    fn mode() -> PlayMode {
        let network = PolicyConfig::default().init::<InferenceBackend>(&default_device());
        let metadata = AgentMetadata::new(PolicyConfig::default(), 0, 0.0, 0);
        PlayMode::with_network(network, metadata, GameConfig::default())
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_playback_speed() {
        assert_eq!(PlaybackSpeed::from_key(1), Some(PlaybackSpeed::Slow));
        assert_eq!(PlaybackSpeed::from_key(4), Some(PlaybackSpeed::VeryFast));
        assert_eq!(PlaybackSpeed::from_key(5), None);
        assert_eq!(
            PlaybackSpeed::Normal.tick_interval(),
            Duration::from_millis(1000 / HUMAN_TICKS_PER_SECOND)
        );
        assert!(PlaybackSpeed::VeryFast.tick_interval() < PlaybackSpeed::Fast.tick_interval());
    }

    #[test]
    fn test_play_mode_loads_saved_agent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("agent.bin");
        let network = PolicyConfig::new(5).init::<InferenceBackend>(&default_device());
        let metadata = AgentMetadata::new(PolicyConfig::new(5), 7, 12.0, 3);
        save_agent(&network, &metadata, &path).unwrap();

        let mode = PlayMode::new(&path, GameConfig::default()).unwrap();

        assert_eq!(mode.metadata.generation, 7);
        assert_eq!(mode.episode_count, 0);
        assert!(!mode.paused);
        assert_eq!(mode.speed, PlaybackSpeed::Normal);
    }

    #[test]
    fn test_missing_agent_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        assert!(PlayMode::new(&temp_dir.path().join("missing.bin"), GameConfig::default()).is_err());
    }

    #[test]
    fn test_auto_restart_after_episode_ends() {
        let mut mode = mode();
        while mode.episode.is_running() {
            mode.episode.tick(Command::Straight);
        }

        mode.step().unwrap();

        assert_eq!(mode.episode_count, 1);
        assert!(mode.episode.is_running());
        assert_eq!(mode.episode.score(), 0);
        assert_eq!(mode.episode.ticks(), 0);
    }

    #[test]
    fn test_step_drives_episode_with_agent() {
        let mut mode = mode();

        mode.step().unwrap();

        assert_eq!(mode.episode.ticks(), 1);
    }

    #[tokio::test]
    async fn test_pause_and_speed_keys() {
        let mut mode = mode();
        let mut timer = mode.speed.timer();

        mode.handle_event(key(KeyCode::Char(' ')), &mut timer);
        assert!(mode.paused);
        mode.handle_event(key(KeyCode::Char(' ')), &mut timer);
        assert!(!mode.paused);

        mode.handle_event(key(KeyCode::Char('3')), &mut timer);
        assert_eq!(mode.speed, PlaybackSpeed::Fast);

        mode.handle_event(key(KeyCode::Char('q')), &mut timer);
        assert!(mode.should_quit);
    }

    #[tokio::test]
    async fn test_speed_change_applies_to_every_tick() {
        let mut mode = mode();
        let mut timer = PlaybackSpeed::Slow.timer();
        timer.tick().await;

        mode.handle_event(key(KeyCode::Char('4')), &mut timer);

        // Five ticks at the slow period would take at least a second
        let start = std::time::Instant::now();
        for _ in 0..5 {
            timer.tick().await;
        }
        assert!(start.elapsed() < PlaybackSpeed::Slow.tick_interval());
        assert_eq!(mode.speed, PlaybackSpeed::VeryFast);
    }
}
