use rand::{seq::SliceRandom, Rng};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::{Error, LayoutError, Result};
use crate::monitor::Monitor;
use crate::position::{Move, Position};
use crate::solver::Solver;

/// Value of the empty cell.
pub const HOLE: u8 = 0;

/// Largest supported side length; keeps every tile value within a `u8`.
pub const MAX_SIZE: u8 = 16;

const HOLE_GLYPH: &str = "·";

/// An immutable `size` x `size` board. Tiles are stored row-major, `0` being the hole.
///
/// Every operation that moves a tile returns a new `Puzzle`, so boards can be kept by value in
/// hash sets and move trails.
#[derive(Debug, Clone)]
pub struct Puzzle {
    size: u8,
    tiles: Box<[u8]>,
    hole: usize,
}

impl PartialEq for Puzzle {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.tiles == other.tiles
    }
}

impl Eq for Puzzle {}

impl Hash for Puzzle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.size.hash(state);
        self.tiles.hash(state);
    }
}

impl Puzzle {
    /// The solved board: `1..size*size` in order, hole in the bottom-right corner.
    pub fn new(size: u8) -> Result<Self> {
        check_size(usize::from(size))?;
        let cells = usize::from(size) * usize::from(size);
        let tiles = (0..cells).map(|i| ((i + 1) % cells) as u8).collect();

        Ok(Self {
            size,
            tiles,
            hole: cells - 1,
        })
    }

    /// Builds a board from row-major tiles, checking that they form a permutation of
    /// `0..size*size`.
    pub fn from_tiles(size: u8, tiles: Vec<u8>) -> Result<Self> {
        check_size(usize::from(size))?;
        let values = tiles.iter().map(|&t| usize::from(t)).collect::<Vec<_>>();
        check_permutation(usize::from(size), &values)?;
        Ok(Self::from_valid(size, tiles))
    }

    /// Parses a layout such as `"5,0,3,  8,1,2,  4,7,6"`.
    ///
    /// Tokens may be separated by commas and/or whitespace, and the display glyph `·` is read
    /// as the hole, so the output of [`Display`](fmt::Display) parses back to the same board.
    pub fn parse(size: u8, layout: &str) -> Result<Self> {
        check_size(usize::from(size))?;
        let values = parse_tokens(layout)?;
        check_permutation(usize::from(size), &values)?;
        let tiles = values.into_iter().map(|v| v as u8).collect();
        Ok(Self::from_valid(size, tiles))
    }

    fn from_valid(size: u8, tiles: Vec<u8>) -> Self {
        let hole = tiles.iter().position(|&t| t == HOLE).unwrap_or_default();
        Self {
            size,
            tiles: tiles.into_boxed_slice(),
            hole,
        }
    }

    /// A board reached from the solved one by `steps` random moves.
    pub fn shuffled<R: Rng + ?Sized>(size: u8, steps: usize, rng: &mut R) -> Result<Self> {
        Ok(Self::new(size)?.shuffle(steps, rng))
    }

    /// A uniformly random permutation, redrawn until it passes [`Puzzle::is_solvable`].
    pub fn random_solvable<R: Rng + ?Sized>(size: u8, rng: &mut R) -> Result<Self> {
        let mut tiles = Self::new(size)?.tiles.into_vec();

        loop {
            tiles.shuffle(rng);
            let hole_row = tiles
                .iter()
                .position(|&t| t == HOLE)
                .map_or(0, |index| index / usize::from(size));

            if is_solvable(&tiles, size, hole_row) {
                break;
            }
        }

        Ok(Self::from_valid(size, tiles))
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn tiles(&self) -> &[u8] {
        &self.tiles
    }

    pub fn get(&self, position: Position) -> Result<u8> {
        if !position.is_within(self.size) {
            return Err(Error::IndexOutOfRange {
                position,
                size: self.size,
            });
        }
        Ok(self.tiles[position.to_index(self.size)])
    }

    pub fn hole_index(&self) -> usize {
        self.hole
    }

    pub fn hole_position(&self) -> Position {
        Position::from_index(self.hole, self.size)
    }

    /// Moves keeping the hole on the board, in [`Move::ALL`] order.
    pub fn available_moves(&self) -> Vec<Move> {
        let hole = self.hole_position();
        Move::ALL
            .into_iter()
            .filter(|&m| hole.neighbor(m, self.size).is_some())
            .collect()
    }

    /// Slides the hole in direction `movement`, returning the resulting board.
    pub fn apply_move(&self, movement: Move) -> Result<Self> {
        self.try_move(movement).ok_or_else(|| Error::IllegalMove {
            attempted: movement,
            allowed: self.available_moves(),
        })
    }

    /// Replays `moves` in order, failing on the first illegal one.
    pub fn apply_moves(&self, moves: &[Move]) -> Result<Self> {
        moves
            .iter()
            .try_fold(self.clone(), |puzzle, &movement| puzzle.apply_move(movement))
    }

    pub(crate) fn try_move(&self, movement: Move) -> Option<Self> {
        let target = self
            .hole_position()
            .neighbor(movement, self.size)?
            .to_index(self.size);

        let mut tiles = self.tiles.clone();
        tiles.swap(self.hole, target);

        Some(Self {
            size: self.size,
            tiles,
            hole: target,
        })
    }

    /// Random walk of `steps` moves that never immediately undoes the previous one.
    pub fn shuffle<R: Rng + ?Sized>(&self, steps: usize, rng: &mut R) -> Self {
        let mut puzzle = self.clone();
        let mut last_move: Option<Move> = None;

        for _ in 0..steps {
            let candidates: Vec<Move> = puzzle
                .available_moves()
                .into_iter()
                .filter(|m| Some(m.inverse()) != last_move)
                .collect();

            let Some(&movement) = candidates.choose(rng) else {
                break;
            };
            let Some(next) = puzzle.try_move(movement) else {
                break;
            };

            puzzle = next;
            last_move = Some(movement);
        }

        puzzle
    }

    pub fn count_inversions(&self) -> usize {
        count_inversions(&self.tiles)
    }

    pub fn is_solvable(&self) -> bool {
        is_solvable(&self.tiles, self.size, usize::from(self.hole_position().y))
    }

    pub fn is_solved(&self) -> bool {
        let last = self.tiles.len() - 1;
        self.tiles.iter().enumerate().all(|(i, &tile)| {
            if i == last {
                tile == HOLE
            } else {
                usize::from(tile) == i + 1
            }
        })
    }

    /// Breadth-first search for a shortest move sequence with the default solver settings.
    pub fn solve<M: Monitor>(&self, monitor: M) -> Result<Vec<Move>> {
        Solver::default().solve(self, monitor)
    }

    /// Serialized form, rows separated by a double space: `"1,2,3,  4,5,6,  7,8,0"`.
    pub fn to_layout(&self) -> String {
        self.tiles
            .chunks(usize::from(self.size))
            .map(|row| {
                row.iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .collect::<Vec<_>>()
            .join(",  ")
    }

    /// Digit width of the largest tile, used to align the display grid.
    pub fn cell_width(&self) -> usize {
        let max = usize::from(self.size) * usize::from(self.size) - 1;
        max.to_string().len()
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.cell_width();

        for (y, row) in self.tiles.chunks(usize::from(self.size)).enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for (x, &tile) in row.iter().enumerate() {
                if x > 0 {
                    write!(f, " ")?;
                }
                if tile == HOLE {
                    write!(f, "{:>width$}", HOLE_GLYPH)?;
                } else {
                    write!(f, "{:>width$}", tile)?;
                }
            }
        }
        Ok(())
    }
}

impl FromStr for Puzzle {
    type Err = Error;

    /// Parses a layout, inferring the side length from the number of tiles.
    fn from_str(s: &str) -> Result<Self> {
        let count = parse_tokens(s)?.len();
        let size = (0..=usize::from(MAX_SIZE))
            .find(|side| side * side >= count)
            .filter(|side| side * side == count)
            .ok_or(LayoutError::NotSquare { count })?;

        check_size(size)?;
        Self::parse(size as u8, s)
    }
}

fn check_size(size: usize) -> Result<()> {
    if size == 0 || size > usize::from(MAX_SIZE) {
        return Err(Error::InvalidSize {
            size,
            max: usize::from(MAX_SIZE),
        });
    }
    Ok(())
}

fn parse_tokens(layout: &str) -> Result<Vec<usize>> {
    layout
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            if token == HOLE_GLYPH {
                return Ok(usize::from(HOLE));
            }
            token.parse::<usize>().map_err(|_| {
                Error::from(LayoutError::InvalidToken {
                    token: token.to_string(),
                })
            })
        })
        .collect()
}

fn check_permutation(size: usize, values: &[usize]) -> Result<()> {
    let cells = size * size;
    if values.len() != cells {
        return Err(LayoutError::WrongCount {
            expected: cells,
            found: values.len(),
        }
        .into());
    }

    let mut counts = vec![0usize; cells];
    for &value in values {
        match counts.get_mut(value) {
            Some(count) => *count += 1,
            None => {
                return Err(LayoutError::OutOfRange {
                    value,
                    max: cells - 1,
                }
                .into())
            }
        }
    }

    match counts.iter().enumerate().find(|&(_, &count)| count != 1) {
        Some((value, &count)) => Err(LayoutError::NotUnique { value, count }.into()),
        None => Ok(()),
    }
}

fn count_inversions(tiles: &[u8]) -> usize {
    tiles
        .iter()
        .enumerate()
        .filter(|&(_, &val)| val != HOLE)
        .map(|(i, &val)| {
            tiles[i + 1..]
                .iter()
                .filter(|&&next| next != HOLE && next < val)
                .count()
        })
        .sum()
}

fn is_solvable(tiles: &[u8], size: u8, hole_row: usize) -> bool {
    let inversions = count_inversions(tiles);

    if size % 2 == 1 {
        inversions % 2 == 0
    } else {
        // Each vertical move shifts the hole row and flips inversion parity together.
        (inversions + hole_row) % 2 == 1
    }
}
