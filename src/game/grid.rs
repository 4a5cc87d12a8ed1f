use super::config::GRID_SIZE;

/// Occupancy code of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Cell {
    #[default]
    Empty = 0,
    Snake = 1,
    Food = 2,
}

/// The fixed 30x30 board.
///
/// Writes outside the board are ignored and reads outside it report the
/// cell as free, so callers never need to clip coordinates themselves.
/// Whether the head itself left the board is decided by the episode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: [[Cell; GRID_SIZE as usize]; GRID_SIZE as usize],
}

impl Grid {
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; GRID_SIZE as usize]; GRID_SIZE as usize],
        }
    }

    pub fn in_bounds(x: i32, y: i32) -> bool {
        (0..GRID_SIZE).contains(&x) && (0..GRID_SIZE).contains(&y)
    }

    pub fn set(&mut self, x: i32, y: i32, value: Cell) {
        if Self::in_bounds(x, y) {
            // Rows are indexed by y.
            self.cells[y as usize][x as usize] = value;
        }
    }

    pub fn clear(&mut self, x: i32, y: i32) {
        self.set(x, y, Cell::Empty);
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        Self::in_bounds(x, y).then(|| self.cells[y as usize][x as usize])
    }

    /// False only for a cell holding a snake segment
    pub fn is_free(&self, x: i32, y: i32) -> bool {
        self.get(x, y) != Some(Cell::Snake)
    }

    /// Number of cells currently holding `value`
    #[cfg(test)]
    pub(crate) fn count(&self, value: Cell) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell == value)
            .count()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_then_get_inside_bounds() {
        let mut grid = Grid::new();
        for (x, y) in [(0, 0), (29, 0), (0, 29), (29, 29), (14, 15)] {
            grid.set(x, y, Cell::Food);
            assert_eq!(grid.get(x, y), Some(Cell::Food));
            grid.set(x, y, Cell::Snake);
            assert_eq!(grid.get(x, y), Some(Cell::Snake));
            grid.clear(x, y);
            assert_eq!(grid.get(x, y), Some(Cell::Empty));
        }
    }

    #[test]
    fn test_out_of_range_writes_are_ignored() {
        let mut grid = Grid::new();
        for (x, y) in [(-1, 0), (0, -1), (30, 5), (5, 30), (-7, 42)] {
            grid.set(x, y, Cell::Snake);
            grid.clear(x, y);
            assert_eq!(grid.get(x, y), None);
            assert!(grid.is_free(x, y));
        }
        assert_eq!(grid, Grid::new());
    }

    #[test]
    fn test_is_free() {
        let mut grid = Grid::new();
        grid.set(3, 4, Cell::Snake);
        grid.set(5, 6, Cell::Food);

        assert!(!grid.is_free(3, 4));
        assert!(grid.is_free(5, 6)); // food does not block
        assert!(grid.is_free(7, 7));
    }

    #[test]
    fn test_axes_are_not_swapped() {
        let mut grid = Grid::new();
        grid.set(2, 9, Cell::Snake);
        assert!(!grid.is_free(2, 9));
        assert!(grid.is_free(9, 2));
    }

    #[test]
    fn test_count() {
        let mut grid = Grid::new();
        grid.set(1, 1, Cell::Snake);
        grid.set(1, 2, Cell::Snake);
        grid.set(4, 4, Cell::Food);
        assert_eq!(grid.count(Cell::Snake), 2);
        assert_eq!(grid.count(Cell::Food), 1);
        assert_eq!(grid.count(Cell::Empty), 900 - 3);
    }
}
