use crate::error::LawnError;
use serde::{Deserialize, Serialize};

/// Number of discrete actions an agent may take.
pub const ACTION_SPACE_SIZE: usize = 3;

/// Heading of the mower. The declaration order is the cyclic turning order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Previous heading in the cycle.
    #[must_use]
    pub fn turned_left(self) -> Self {
        Self::ALL[(self as usize + 3) % 4]
    }

    /// Next heading in the cycle.
    #[must_use]
    pub fn turned_right(self) -> Self {
        Self::ALL[(self as usize + 1) % 4]
    }

    /// Unit step `(dx, dy)` in grid coordinates; `y` grows downwards.
    #[must_use]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }
}

/// Discrete mower command; the discriminant is the agent-facing action index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Action {
    Forward = 0,
    TurnLeft = 1,
    TurnRight = 2,
}

impl Action {
    pub const ALL: [Action; ACTION_SPACE_SIZE] =
        [Action::Forward, Action::TurnLeft, Action::TurnRight];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<usize> for Action {
    type Error = LawnError;

    fn try_from(v: usize) -> Result<Self, Self::Error> {
        Ok(match v {
            0 => Action::Forward,
            1 => Action::TurnLeft,
            2 => Action::TurnRight,
            other => return Err(LawnError::InvalidAction(other)),
        })
    }
}

/// State of a single grid cell.
///
/// The mower cell carries its heading, so the grid alone fully describes
/// where the mower is and which way it faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Grass,
    Mowed,
    Obstacle,
    Mower(Direction),
}

impl Cell {
    /// Small-integer encoding used by numeric observations.
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Cell::Grass => 0,
            Cell::Mowed => 1,
            Cell::Obstacle => 2,
            Cell::Mower(dir) => 3 + dir as u8,
        }
    }

    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Cell::Grass => '.',
            Cell::Mowed => ' ',
            Cell::Obstacle => 'X',
            Cell::Mower(Direction::Up) => '^',
            Cell::Mower(Direction::Right) => '>',
            Cell::Mower(Direction::Down) => 'v',
            Cell::Mower(Direction::Left) => '<',
        }
    }

    #[must_use]
    pub const fn is_mower(self) -> bool {
        matches!(self, Cell::Mower(_))
    }
}

impl TryFrom<u8> for Cell {
    type Error = u8;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        Ok(match v {
            0 => Cell::Grass,
            1 => Cell::Mowed,
            2 => Cell::Obstacle,
            3..=6 => Cell::Mower(Direction::ALL[usize::from(v - 3)]),
            other => return Err(other),
        })
    }
}

/// Grid coordinates, `x` to the right and `y` downwards from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Neighbouring position one step towards `dir`, or `None` when that
    /// would leave the non-negative quadrant.
    #[must_use]
    pub fn step(self, dir: Direction) -> Option<Self> {
        let (dx, dy) = dir.delta();
        Some(Self {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }
}

/// Location and heading of the mower.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MowerState {
    pub position: Position,
    pub heading: Direction,
}
