use rand::{Rng, SeedableRng, rngs::SmallRng};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Cell, Episode, GRID_SIZE, Position};

/// Game ticks between food colour changes
const FRAMES_PER_FOOD_COLOR: u32 = 25;

/// Colours that change while a game is on screen.
///
/// The animation is counted in game ticks, not drawn frames, so the modes
/// call [`Palette::advance_frame`] from their tick handler.
#[derive(Debug, Clone)]
pub struct Palette {
    food: Color,
    body: Color,
    frames_until_change: u32,
    rng: SmallRng,
}

impl Palette {
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_entropy())
    }

    pub fn with_rng(rng: SmallRng) -> Self {
        Self {
            food: Color::Rgb(255, 0, 0),
            body: Color::Rgb(0, 255, 0),
            frames_until_change: FRAMES_PER_FOOD_COLOR,
            rng,
        }
    }

    /// Count down one tick, picking a new food colour when the countdown
    /// runs out. Returns true when the colour changed.
    pub fn advance_frame(&mut self) -> bool {
        self.frames_until_change -= 1;
        if self.frames_until_change > 0 {
            return false;
        }

        self.food = Color::Rgb(
            self.rng.gen_range(50..255),
            self.rng.gen_range(50..255),
            self.rng.gen_range(50..255),
        );
        self.frames_until_change = FRAMES_PER_FOOD_COLOR;
        true
    }

    /// The body takes on the colour of the food it just ate
    pub fn on_food_eaten(&mut self) {
        self.body = self.food;
    }

    pub fn food(&self) -> Color {
        self.food
    }

    pub fn body(&self) -> Color {
        self.body
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

/// Mode-specific text around the board
#[derive(Debug, Clone, Default)]
pub struct Hud {
    pub title: &'static str,
    /// Extra `label: value` pairs shown after the score
    pub fields: Vec<(&'static str, String)>,
    pub controls: &'static str,
}

pub struct Renderer {
    palette: Palette,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            palette: Palette::new(),
        }
    }

    pub fn palette_mut(&mut self) -> &mut Palette {
        &mut self.palette
    }

    pub fn render(&self, frame: &mut Frame, episode: &Episode, hud: &Hud) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(episode, hud), chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        if episode.is_running() {
            frame.render_widget(self.render_grid(episode, hud), game_area);
        } else {
            frame.render_widget(self.render_game_over(episode), game_area);
        }

        frame.render_widget(self.render_controls(hud), chunks[2]);
    }

    fn render_grid(&self, episode: &Episode, hud: &Hud) -> Paragraph<'static> {
        let head = episode.snake().head();
        let mut lines = Vec::with_capacity(GRID_SIZE as usize);

        for y in 0..GRID_SIZE {
            let mut spans = Vec::with_capacity(GRID_SIZE as usize);

            for x in 0..GRID_SIZE {
                let cell = if Position::new(x, y) == head {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    match episode.grid().get(x, y) {
                        Some(Cell::Snake) => {
                            Span::styled("□ ", Style::default().fg(self.palette.body()))
                        }
                        Some(Cell::Food) => Span::styled(
                            "● ",
                            Style::default()
                                .fg(self.palette.food())
                                .add_modifier(Modifier::BOLD),
                        ),
                        _ => Span::styled(". ", Style::default().fg(Color::DarkGray)),
                    }
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(format!(" {} ", hud.title)),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, episode: &Episode, hud: &Hud) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let mut spans = vec![
            Span::styled("Score: ", label),
            Span::styled(
                episode.score().to_string(),
                value.add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Length: ", label),
            Span::styled(episode.snake().len().to_string(), value),
        ];

        for (name, text) in &hud.fields {
            spans.push(Span::raw("    "));
            spans.push(Span::styled(format!("{name}: "), label));
            spans.push(Span::styled(text.clone(), value));
        }

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }

    fn render_game_over(&self, episode: &Episode) -> Paragraph<'static> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    episode.score().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, hud: &Hud) -> Paragraph<'static> {
        Paragraph::new(Line::from(Span::styled(
            hud.controls,
            Style::default().fg(Color::Cyan),
        )))
        .alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
