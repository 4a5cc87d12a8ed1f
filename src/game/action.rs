use serde::{Deserialize, Serialize};

/// Number of scores an agent must return: left, right, straight.
pub const COMMAND_COUNT: usize = 3;

/// Errors raised while turning a decision maker's output into a command
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecisionError {
    #[error("invalid agent output: expected {expected} scores, got {actual}")]
    InvalidAgentOutput { expected: usize, actual: usize },
}

/// A step on the grid. Screen coordinates: y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offset {
    pub dx: i32,
    pub dy: i32,
}

impl Offset {
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    pub fn scaled(self, factor: i32) -> Self {
        Self::new(self.dx * factor, self.dy * factor)
    }

    pub fn dot(self, other: Offset) -> i32 {
        self.dx * other.dx + self.dy * other.dy
    }
}

impl std::ops::Add for Offset {
    type Output = Offset;

    fn add(self, rhs: Offset) -> Offset {
        Offset::new(self.dx + rhs.dx, self.dy + rhs.dy)
    }
}

impl std::ops::Neg for Offset {
    type Output = Offset;

    fn neg(self) -> Offset {
        Offset::new(-self.dx, -self.dy)
    }
}

/// Direction the snake is facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Up,
    Down,
    Left,
    Right,
}

impl Orientation {
    /// Turn basis. Turning left walks this list backwards, turning right
    /// walks it forwards.
    pub const TURN_ORDER: [Orientation; 4] = [
        Orientation::Down,
        Orientation::Left,
        Orientation::Up,
        Orientation::Right,
    ];

    /// Position of this orientation in [`Orientation::TURN_ORDER`]
    pub fn turn_index(self) -> usize {
        match self {
            Orientation::Down => 0,
            Orientation::Left => 1,
            Orientation::Up => 2,
            Orientation::Right => 3,
        }
    }

    /// Orientation after a single left or right turn
    pub fn turned(self, turn: Turn) -> Orientation {
        let len = Self::TURN_ORDER.len();
        let index = match turn {
            Turn::Left => (self.turn_index() + len - 1) % len,
            Turn::Right => (self.turn_index() + 1) % len,
        };
        Self::TURN_ORDER[index]
    }

    /// Unit step straight ahead
    pub fn forward(self) -> Offset {
        match self {
            Orientation::Up => Offset::new(0, -1),
            Orientation::Down => Offset::new(0, 1),
            Orientation::Left => Offset::new(-1, 0),
            Orientation::Right => Offset::new(1, 0),
        }
    }

    /// Unit step toward the snake's right-hand side
    pub fn right(self) -> Offset {
        match self {
            Orientation::Up => Offset::new(1, 0),
            Orientation::Down => Offset::new(-1, 0),
            Orientation::Left => Offset::new(0, -1),
            Orientation::Right => Offset::new(0, 1),
        }
    }

    /// Unit step toward the snake's left-hand side
    pub fn left(self) -> Offset {
        -self.right()
    }

    /// True when moving forward decreases a coordinate.
    pub fn faces_origin(self) -> bool {
        matches!(self, Orientation::Up | Orientation::Left)
    }
}

/// Relative turn applied to the current orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    Left,
    Right,
}

/// Command applied on a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Command {
    Turn(Turn),
    /// Keep the current orientation
    #[default]
    Straight,
}

impl Command {
    pub const LEFT: Command = Command::Turn(Turn::Left);
    pub const RIGHT: Command = Command::Turn(Turn::Right);

    /// Map an agent's raw output onto a command.
    ///
    /// Index 0 is turn-left, index 1 turn-right, anything else goes straight.
    /// Equal maxima resolve to the lowest index.
    pub fn from_scores(scores: &[f32]) -> Result<Command, DecisionError> {
        if scores.len() != COMMAND_COUNT {
            return Err(DecisionError::InvalidAgentOutput {
                expected: COMMAND_COUNT,
                actual: scores.len(),
            });
        }

        let best = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);

        let command = if scores[0] == best {
            Command::LEFT
        } else if scores[1] == best {
            Command::RIGHT
        } else {
            Command::Straight
        };

        Ok(command)
    }
}

impl From<Turn> for Command {
    fn from(turn: Turn) -> Self {
        Command::Turn(turn)
    }
}
