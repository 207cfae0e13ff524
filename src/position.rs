use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Direction the hole travels. The tile on the other side slides the opposite way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Right,
    Down,
    Left,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Up, Move::Right, Move::Down, Move::Left];

    /// Offset applied to the hole as `(dx, dy)`, with `y` growing downwards.
    pub fn as_offset(&self) -> (i8, i8) {
        match self {
            Move::Up => (0, 1),
            Move::Right => (-1, 0),
            Move::Down => (0, -1),
            Move::Left => (1, 0),
        }
    }

    pub fn inverse(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "up",
            Move::Right => "right",
            Move::Down => "down",
            Move::Left => "left",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown move {0:?}")]
pub struct ParseMoveError(String);

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "u" => Ok(Move::Up),
            "right" | "r" => Ok(Move::Right),
            "down" | "d" => Ok(Move::Down),
            "left" | "l" => Ok(Move::Left),
            _ => Err(ParseMoveError(s.to_string())),
        }
    }
}

/// A cell coordinate: `x` is the column, `y` the row, both counted from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: u8,
    pub y: u8,
}

impl Position {
    pub fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Position of the linear (row-major) `index` on a board of `size` columns.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    pub fn from_index(index: usize, size: u8) -> Self {
        let size = usize::from(size);
        Self {
            x: (index % size) as u8,
            y: (index / size) as u8,
        }
    }

    pub fn to_index(&self, size: u8) -> usize {
        usize::from(self.x) + usize::from(size) * usize::from(self.y)
    }

    pub fn is_within(&self, size: u8) -> bool {
        self.x < size && self.y < size
    }

    /// The adjacent position in direction `movement`, or `None` when it falls off the board.
    pub fn neighbor(&self, movement: Move, size: u8) -> Option<Self> {
        let (dx, dy) = movement.as_offset();
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        let next = Self { x, y };
        next.is_within(size).then_some(next)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
