use thiserror::Error;

use crate::position::{Move, Position};

pub type Result<T> = std::result::Result<T, Error>;

/// Reasons a serialized layout can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("invalid token {token:?}")]
    InvalidToken { token: String },

    #[error("expected {expected} tiles, got {found}")]
    WrongCount { expected: usize, found: usize },

    #[error("tile {value} is out of range, the largest tile is {max}")]
    OutOfRange { value: usize, max: usize },

    #[error("tile {value} should have one entry, got {count}")]
    NotUnique { value: usize, count: usize },

    #[error("{count} tiles do not form a square board")]
    NotSquare { count: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid board size {size}, expected 1 to {max}")]
    InvalidSize { size: usize, max: usize },

    #[error("malformed layout: {0}")]
    MalformedLayout(#[from] LayoutError),

    #[error("illegal move {attempted}, only {} allowed", join(.allowed))]
    IllegalMove { attempted: Move, allowed: Vec<Move> },

    #[error("unsolvable board ({inversions} inversions)")]
    Unsolvable { inversions: usize },

    #[error("search exceeded the maximum depth of {max_depth}")]
    DepthExceeded { max_depth: usize },

    #[error("search exceeded the limit of {max_states} visited states")]
    StateLimitExceeded { max_states: usize },

    #[error("no solution found after {depth} generations")]
    Exhausted { depth: usize },

    #[error("position {position} is outside a board of size {size}")]
    IndexOutOfRange { position: Position, size: u8 },

    #[error("search aborted: {reason}")]
    Aborted { reason: String },
}

impl Error {
    #[must_use]
    pub fn aborted(reason: impl Into<String>) -> Self {
        Self::Aborted {
            reason: reason.into(),
        }
    }
}

fn join(moves: &[Move]) -> String {
    moves
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
