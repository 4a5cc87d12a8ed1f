use super::action::{Offset, Orientation, Turn};
use super::food::Food;
use super::grid::{Cell, Grid};

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by an offset
    pub fn offset(&self, offset: Offset) -> Self {
        Self {
            x: self.x + offset.dx,
            y: self.y + offset.dy,
        }
    }

    /// Offset that leads from `self` to `other`
    pub fn delta_to(&self, other: Position) -> Offset {
        Offset::new(other.x - self.x, other.y - self.y)
    }

    pub fn manhattan(&self, other: Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    pub fn in_bounds(&self) -> bool {
        Grid::in_bounds(self.x, self.y)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Number of readings returned by [`Snake::sense8`]
pub const SENSOR_COUNT: usize = 8;

/// Probe offsets for [`Snake::sense8`] in reading order: ahead, two ahead,
/// left, left+ahead, left+two ahead, right, right+ahead, right+two ahead.
fn probe_offsets(orientation: Orientation) -> [Offset; SENSOR_COUNT] {
    let ahead = orientation.forward();
    let left = orientation.left();
    let right = orientation.right();
    [
        ahead,
        ahead.scaled(2),
        left,
        left + ahead,
        left + ahead.scaled(2),
        right,
        right + ahead,
        right + ahead.scaled(2),
    ]
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    body: Vec<Position>,
    /// Current facing
    orientation: Orientation,
}

impl Snake {
    /// Create a snake with `length` segments trailing straight behind `head`.
    ///
    /// The grid is not touched; see [`Snake::mark`].
    pub fn new(head: Position, orientation: Orientation, length: usize) -> Self {
        let back = -orientation.forward();
        let mut body = Vec::with_capacity(length.max(1));
        body.push(head);

        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.offset(back));
        }

        Self { body, orientation }
    }

    /// Create a snake from explicit segments, head first.
    ///
    /// Returns `None` for an empty body.
    #[cfg(test)]
    pub(crate) fn from_segments(body: Vec<Position>, orientation: Orientation) -> Option<Self> {
        (!body.is_empty()).then_some(Self { body, orientation })
    }

    /// Write every segment into the grid as snake
    pub fn mark(&self, grid: &mut Grid) {
        for pos in &self.body {
            grid.set(pos.x, pos.y, Cell::Snake);
        }
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// All segments, head first
    pub fn segments(&self) -> &[Position] {
        &self.body
    }

    /// Body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// True when the head overlaps any other segment
    pub fn bites_itself(&self) -> bool {
        self.body_segments().contains(&self.head())
    }

    fn next_head(&self) -> Position {
        self.head().offset(self.orientation.forward())
    }

    /// Rotate one step along the turn basis, then advance.
    pub fn turn(&mut self, grid: &mut Grid, turn: Turn) {
        self.orientation = self.orientation.turned(turn);
        self.advance(grid);
    }

    /// Move one cell ahead, keeping the length
    pub fn advance(&mut self, grid: &mut Grid) {
        let new_head = self.next_head();
        let tail = self.tail();

        grid.clear(tail.x, tail.y);
        self.body.pop();
        self.body.insert(0, new_head);
        grid.set(new_head.x, new_head.y, Cell::Snake);
    }

    /// Move one cell ahead, keeping the tail (length + 1)
    pub fn grow(&mut self, grid: &mut Grid) {
        let new_head = self.next_head();

        self.body.insert(0, new_head);
        grid.set(new_head.x, new_head.y, Cell::Snake);
    }

    /// Occupancy around the head, relative to the current orientation.
    ///
    /// A reading is 1 when the cell is empty or holds food and 0 when it
    /// holds a snake segment or lies off the board.
    pub fn sense8(&self, grid: &Grid) -> [u8; SENSOR_COUNT] {
        let head = self.head();
        probe_offsets(self.orientation).map(|offset| {
            let probe = head.offset(offset);
            u8::from(probe.in_bounds() && grid.is_free(probe.x, probe.y))
        })
    }

    /// Only the head can eat.
    pub fn collides_with_food(&self, food: &Food) -> bool {
        self.head() == food.position()
    }
}
