use crate::types::{Cell, Position};
use std::fmt;

/// Cell storage for one episode, indexed `[x][y]` in a flat column-major buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// All-grass grid whose outermost ring is obstacle.
    #[must_use]
    pub fn new_bordered(width: usize, height: usize) -> Self {
        let mut grid = Self {
            width,
            height,
            cells: vec![Cell::Grass; width * height],
        };
        for x in 0..width {
            for y in 0..height {
                if grid.is_border(Position::new(x, y)) {
                    grid.set(Position::new(x, y), Cell::Obstacle);
                }
            }
        }
        grid
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn is_border(&self, pos: Position) -> bool {
        pos.x == 0 || pos.y == 0 || pos.x + 1 == self.width || pos.y + 1 == self.height
    }

    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// # Panics
    ///
    /// Panics if `pos` lies outside the grid.
    #[must_use]
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[self.offset(pos)]
    }

    /// # Panics
    ///
    /// Panics if `pos` lies outside the grid.
    pub fn set(&mut self, pos: Position, cell: Cell) {
        let i = self.offset(pos);
        self.cells[i] = cell;
    }

    #[must_use]
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Interior positions in column-major order.
    pub fn interior_positions(&self) -> impl Iterator<Item = Position> {
        let ys = 1..self.height.saturating_sub(1);
        (1..self.width.saturating_sub(1))
            .flat_map(move |x| ys.clone().map(move |y| Position::new(x, y)))
    }

    #[must_use]
    pub fn render_text(&self) -> String {
        self.to_string()
    }

    pub(crate) fn cells(&self) -> &[Cell] {
        &self.cells
    }

    fn offset(&self, pos: Position) -> usize {
        let (w, h) = (self.width, self.height);
        assert!(self.contains(pos), "position {pos:?} outside {w}x{h} grid");
        pos.x * self.height + pos.y
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                write!(f, "{} ", self.get(Position::new(x, y)).glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Read-only snapshot of the grid handed to collaborators.
///
/// Owns its own copy of the cells, so nothing done with an observation can
/// reach back into the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    grid: Grid,
}

impl Observation {
    pub(crate) fn snapshot(grid: &Grid) -> Self {
        Self { grid: grid.clone() }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.grid.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.grid.height
    }

    /// `(width, height)`, the shape of [`Observation::to_indices`].
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.grid.width, self.grid.height)
    }

    /// Cell at `(x, y)`, or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        let pos = Position::new(x, y);
        self.grid.contains(pos).then(|| self.grid.get(pos))
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        self.grid.cells()
    }

    /// Flat small-integer encoding, index `x * height + y`.
    #[must_use]
    pub fn to_indices(&self) -> Vec<u8> {
        self.grid.cells.iter().map(|c| c.index()).collect()
    }

    /// Position of the first mower cell found, scanning column-major.
    #[must_use]
    pub fn mower(&self) -> Option<Position> {
        self.grid
            .cells
            .iter()
            .position(|c| c.is_mower())
            .map(|i| Position::new(i / self.grid.height, i % self.grid.height))
    }

    #[must_use]
    pub fn count(&self, cell: Cell) -> usize {
        self.grid.count(cell)
    }

    #[must_use]
    pub fn render_text(&self) -> String {
        self.grid.render_text()
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.grid, f)
    }
}
