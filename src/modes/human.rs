use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;

use crate::game::{Command, Episode, GameConfig, HUMAN_TICKS_PER_SECOND, Turn};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::{SessionMetrics, format_clock};
use crate::render::{Hud, Renderer};

const CONTROLS: &str = "←/A: Turn left | →/D: Turn right | R: Restart | Q/Esc: Quit";

pub struct HumanMode {
    episode: Episode,
    metrics: SessionMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    pending_turn: Option<Turn>,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Self {
        Self {
            episode: Episode::new(config),
            metrics: SessionMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            pending_turn: None,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let result = self.run_game_loop(&mut terminal).await;

        cleanup_terminal(&mut terminal)?;

        tracing::info!(
            games = self.metrics.games_played(),
            high_score = self.metrics.best_score(),
            "Session over"
        );

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let tick_interval = Duration::from_millis(1000 / HUMAN_TICKS_PER_SECOND);
        let mut tick_timer = interval(tick_interval);

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                _ = tick_timer.tick() => {
                    if self.episode.is_running() {
                        self.update_game();
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

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Turn(turn) => self.pending_turn = Some(turn),
                KeyAction::Restart => self.reset_game(),
                KeyAction::Quit => self.should_quit = true,
                KeyAction::TogglePause | KeyAction::Speed(_) | KeyAction::None => {}
            }
        }
    }

    fn update_game(&mut self) {
        let command = self
            .pending_turn
            .take()
            .map(Command::Turn)
            .unwrap_or_default();

        let outcome = self.episode.tick(command);
        self.renderer.palette_mut().advance_frame();

        if outcome.ate_food {
            self.renderer.palette_mut().on_food_eaten();
        }
        if let Some(reason) = outcome.termination {
            tracing::debug!(?reason, score = self.episode.score(), "Game over");
            self.metrics.finish_game(self.episode.score());
        }
    }

    fn reset_game(&mut self) {
        self.episode.restart();
        self.metrics.start_game();
        self.pending_turn = None;
    }

    fn hud(&self) -> Hud {
        Hud {
            title: "SNAKE",
            fields: vec![
                ("High Score", self.metrics.best_score().to_string()),
                ("Time", format_clock(self.metrics.game_time())),
            ],
            controls: CONTROLS,
        }
    }
}

/// Restore the terminal after a TUI session
pub(crate) fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}
