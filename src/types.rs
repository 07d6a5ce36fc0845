//! Core data types for the deduction engine.
//!
//! All grid types use flat `Vec` storage with column-major layout:
//! `cells[x * height + y]` maps to the JS equivalent `grid[x][y]`.

use crate::error::SnapshotError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A cell coordinate, 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    #[inline(always)]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl From<(usize, usize)> for Position {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Number of hazards among a revealed cell's neighbors. Always in `0..=8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Count(u8);

impl Count {
    pub const ZERO: Count = Count(0);
    pub const MAX: u8 = 8;

    /// Returns `None` when `n` exceeds the number of neighbors a cell can have.
    pub const fn new(n: u8) -> Option<Self> {
        if n <= Self::MAX {
            Some(Self(n))
        } else {
            None
        }
    }

    #[inline(always)]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Count {
    type Error = u8;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Count::new(n).ok_or(n)
    }
}

/// What the engine can see of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellState {
    Covered,
    Flagged,
    Revealed(Count),
    /// A hazard that has been uncovered. Counts as a known hazard for its
    /// neighbors but is never flagged by the engine.
    Exposed,
}

/// Flat `i8` codes used across the WebAssembly boundary.
pub mod code {
    pub const COVERED: i8 = -1;
    pub const FLAGGED: i8 = -2;
    pub const EXPOSED: i8 = 9;
}

impl CellState {
    /// True for cells that already account for one hazard.
    #[inline(always)]
    pub fn is_known_hazard(self) -> bool {
        matches!(self, CellState::Flagged | CellState::Exposed)
    }

    pub fn from_code(value: i8) -> Option<Self> {
        match value {
            code::COVERED => Some(CellState::Covered),
            code::FLAGGED => Some(CellState::Flagged),
            code::EXPOSED => Some(CellState::Exposed),
            n if n >= 0 => Count::new(n as u8).map(CellState::Revealed),
            _ => None,
        }
    }

    pub fn to_code(self) -> i8 {
        match self {
            CellState::Covered => code::COVERED,
            CellState::Flagged => code::FLAGGED,
            CellState::Exposed => code::EXPOSED,
            CellState::Revealed(n) => n.get() as i8,
        }
    }

    fn from_char(ch: char) -> Option<Self> {
        match ch {
            '#' => Some(CellState::Covered),
            'F' => Some(CellState::Flagged),
            '*' => Some(CellState::Exposed),
            _ => ch
                .to_digit(10)
                .and_then(|d| Count::new(d as u8))
                .map(CellState::Revealed),
        }
    }

    fn to_char(self) -> char {
        match self {
            CellState::Covered => '#',
            CellState::Flagged => 'F',
            CellState::Exposed => '*',
            CellState::Revealed(n) => char::from(b'0' + n.get()),
        }
    }
}

/// A deduced action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    Flag,
    Uncover,
}

/// One deduced move: an action on a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub pos: Position,
    pub action: Action,
}

impl Move {
    pub const fn flag(pos: Position) -> Self {
        Self { pos, action: Action::Flag }
    }

    pub const fn uncover(pos: Position) -> Self {
        Self { pos, action: Action::Uncover }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {}", self.action, self.pos)
    }
}

/// The visible state of a whole board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    width: usize,
    height: usize,
    cells: Vec<CellState>,
}

impl Snapshot {
    /// Create a snapshot with every cell covered.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![CellState::Covered; width * height],
        }
    }

    /// Decode flat column-major cell codes (see [`code`]).
    pub fn from_codes(width: usize, height: usize, codes: &[i8]) -> Result<Self, SnapshotError> {
        let expected = width
            .checked_mul(height)
            .ok_or(SnapshotError::LengthMismatch { expected: usize::MAX, actual: codes.len() })?;
        if codes.len() != expected {
            return Err(SnapshotError::LengthMismatch { expected, actual: codes.len() });
        }

        let mut cells = Vec::with_capacity(expected);
        for (i, &c) in codes.iter().enumerate() {
            let state = CellState::from_code(c).ok_or(SnapshotError::InvalidCode {
                code: c,
                x: i / height,
                y: i % height,
            })?;
            cells.push(state);
        }

        Ok(Self { width, height, cells })
    }

    #[inline(always)]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline(always)]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Encode back to flat column-major cell codes.
    pub fn to_codes(&self) -> Vec<i8> {
        self.cells.iter().map(|c| c.to_code()).collect()
    }

    #[inline(always)]
    pub fn get(&self, pos: Position) -> CellState {
        self.cells[pos.x * self.height + pos.y]
    }

    #[inline(always)]
    pub fn set(&mut self, pos: Position, state: CellState) {
        self.cells[pos.x * self.height + pos.y] = state;
    }

    #[inline(always)]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// All positions in row-major order (every `x` of row 0, then row 1, ...).
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Position::new(x, y)))
    }
}

/// One line per row: `#` covered, `F` flagged, `*` exposed, `0`-`8` revealed.
/// Blank lines and surrounding whitespace are ignored.
impl FromStr for Snapshot {
    type Err = SnapshotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        let width = match rows.first() {
            Some(first) => first.chars().count(),
            None => return Err(SnapshotError::Empty),
        };
        let height = rows.len();
        let mut snapshot = Snapshot::new(width, height);

        for (y, row) in rows.iter().enumerate() {
            let actual = row.chars().count();
            if actual != width {
                return Err(SnapshotError::RaggedRow { row: y, expected: width, actual });
            }
            for (x, ch) in row.chars().enumerate() {
                let state = CellState::from_char(ch)
                    .ok_or(SnapshotError::InvalidChar { ch, row: y, column: x })?;
                snapshot.set(Position::new(x, y), state);
            }
        }

        Ok(snapshot)
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                write!(f, "{}", self.get(Position::new(x, y)).to_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Pre-computed neighbor cache for all cells.
///
/// Stores the 8-directional neighbors (clipped to grid bounds) for every cell,
/// in `dx` outer / `dy` inner order. Indexed by `x * height + y`.
#[derive(Debug, Clone)]
pub struct NeighborCache {
    height: usize,
    /// Flat storage of all neighbors.
    data: Vec<Position>,
    /// offsets[i] = start index in `data` for cell i.
    /// offsets[i+1] - offsets[i] = number of neighbors for cell i.
    offsets: Vec<usize>,
}

impl NeighborCache {
    /// Build the neighbor cache for a grid of the given dimensions.
    pub fn new(width: usize, height: usize) -> Self {
        let total = width * height;
        let mut data = Vec::with_capacity(total * 8);
        let mut offsets = Vec::with_capacity(total + 1);

        for x in 0..width {
            for y in 0..height {
                offsets.push(data.len());
                for dx in -1i64..=1 {
                    for dy in -1i64..=1 {
                        if dx == 0 && dy == 0 {
                            continue;
                        }
                        let nx = x as i64 + dx;
                        let ny = y as i64 + dy;
                        if nx >= 0 && nx < width as i64 && ny >= 0 && ny < height as i64 {
                            data.push(Position::new(nx as usize, ny as usize));
                        }
                    }
                }
            }
        }
        offsets.push(data.len()); // sentinel

        Self {
            height,
            data,
            offsets,
        }
    }

    /// Get the pre-computed neighbors of `pos`.
    #[inline(always)]
    pub fn get(&self, pos: Position) -> &[Position] {
        let idx = pos.x * self.height + pos.y;
        let start = self.offsets[idx];
        let end = self.offsets[idx + 1];
        &self.data[start..end]
    }
}
