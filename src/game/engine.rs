use rand::{SeedableRng, rngs::StdRng};

use super::{
    action::{Command, DecisionError},
    config::GameConfig,
    food::Food,
    grid::Grid,
    snake::{Position, Snake},
};

/// Why an episode ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Head moved onto another segment
    SelfCollision,
    /// Head left the board
    OutOfBounds,
}

/// Lifecycle of an episode once it has been initialised
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Terminated(Termination),
}

/// Information about a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// Set once the episode is over
    pub termination: Option<Termination>,
}

/// Supplies one command per tick
pub trait CommandSource {
    fn next_command(&mut self, episode: &Episode) -> Result<Command, DecisionError>;
}

impl<F> CommandSource for F
where
    F: FnMut(&Episode) -> Command,
{
    fn next_command(&mut self, episode: &Episode) -> Result<Command, DecisionError> {
        Ok(self(episode))
    }
}

/// One game from spawn to termination.
///
/// Owns the grid and lends it to the snake and food on every transition.
pub struct Episode {
    config: GameConfig,
    grid: Grid,
    snake: Snake,
    food: Food,
    score: u32,
    ticks: u64,
    phase: Phase,
    rng: StdRng,
}

impl Episode {
    /// Start an episode with an entropy-seeded random source
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Start an episode with a fixed seed, for reproducible runs
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(config: GameConfig, mut rng: StdRng) -> Self {
        let mut grid = Grid::new();
        let snake = Snake::new(
            Position::from(config.spawn_head),
            config.spawn_orientation,
            config.initial_snake_length,
        );
        snake.mark(&mut grid);
        let food = Food::spawn(&mut grid, &snake, &config, &mut rng);

        Self {
            config,
            grid,
            snake,
            food,
            score: 0,
            ticks: 0,
            phase: Phase::Running,
            rng,
        }
    }

    /// Start over with the same configuration, keeping the random source
    pub fn restart(&mut self) {
        let rng = StdRng::from_rng(&mut self.rng).unwrap_or_else(|_| StdRng::from_entropy());
        *self = Self::with_rng(self.config.clone(), rng);
    }

    /// Apply one command and evaluate food and termination.
    ///
    /// Once terminated, the episode no longer changes.
    pub fn tick(&mut self, command: Command) -> TickOutcome {
        if let Phase::Terminated(reason) = self.phase {
            return TickOutcome {
                ate_food: false,
                termination: Some(reason),
            };
        }

        match command {
            Command::Turn(turn) => self.snake.turn(&mut self.grid, turn),
            Command::Straight => self.snake.advance(&mut self.grid),
        }

        let ate_food = self.snake.collides_with_food(&self.food);
        if ate_food {
            self.score += 1;
            self.snake.grow(&mut self.grid);
            self.food = Food::spawn(&mut self.grid, &self.snake, &self.config, &mut self.rng);
        }

        self.ticks += 1;

        let termination = self.check_termination();
        if let Some(reason) = termination {
            self.phase = Phase::Terminated(reason);
        }

        TickOutcome {
            ate_food,
            termination,
        }
    }

    /// Drive the episode to the end and return the final score
    pub fn run<S: CommandSource + ?Sized>(&mut self, source: &mut S) -> Result<u32, DecisionError> {
        while self.is_running() {
            let command = source.next_command(self)?;
            self.tick(command);
        }
        Ok(self.score)
    }

    fn check_termination(&self) -> Option<Termination> {
        if self.snake.bites_itself() {
            Some(Termination::SelfCollision)
        } else if !self.snake.head().in_bounds() {
            Some(Termination::OutOfBounds)
        } else {
            None
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Replace the food to stage a scenario
    #[cfg(test)]
    pub(crate) fn place_food(&mut self, position: Position) {
        let old = self.food.position();
        if !self.snake.contains(old) {
            self.grid.clear(old.x, old.y);
        }
        self.food = Food::place(&mut self.grid, position);
    }
}
