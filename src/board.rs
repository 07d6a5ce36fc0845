//! The board owner: hazard layout, numbers, and the player-visible masks.
//!
//! The deduction engine only reads [`Snapshot`]s. Everything that changes a
//! live board lives here: placing hazards, uncovering with the zero-count
//! cascade, flagging, and applying deduced moves.

use crate::config::BoardConfig;
use crate::error::BoardError;
use crate::rng::BoardRng;
use crate::types::{Action, CellState, Count, Move, NeighborCache, Position, Snapshot};
use log::{debug, trace};

/// Hazard positions, one byte per cell.
/// Uses `Vec<u8>` (0/1) instead of `Vec<bool>` for simpler WASM interop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hazards {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl Hazards {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![0; width * height],
        }
    }

    /// Take a flat column-major layout; any nonzero byte is a hazard.
    pub fn from_cells(width: usize, height: usize, cells: Vec<u8>) -> Result<Self, BoardError> {
        let expected = width.checked_mul(height).unwrap_or(usize::MAX);
        if cells.len() != expected {
            return Err(BoardError::LengthMismatch { expected, actual: cells.len() });
        }
        Ok(Self { width, height, cells })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// One byte per cell, column-major.
    pub fn as_bytes(&self) -> &[u8] {
        &self.cells
    }

    #[inline(always)]
    pub fn get(&self, pos: Position) -> bool {
        self.cells[pos.x * self.height + pos.y] != 0
    }

    #[inline(always)]
    pub fn set(&mut self, pos: Position, val: bool) {
        self.cells[pos.x * self.height + pos.y] = val as u8;
    }

    /// Count total hazards on the board.
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&v| v != 0).count()
    }
}

/// Adjacent-hazard counts. Hazard cells keep the count of their own
/// neighbors; nothing reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Numbers {
    height: usize,
    cells: Vec<Count>,
}

impl Numbers {
    #[inline(always)]
    pub fn get(&self, pos: Position) -> Count {
        self.cells[pos.x * self.height + pos.y]
    }
}

/// Square region kept free of hazards around the first opened cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafeZone {
    pub center: Position,
    pub radius: usize,
}

impl SafeZone {
    pub fn contains(&self, pos: Position) -> bool {
        pos.x.abs_diff(self.center.x) <= self.radius && pos.y.abs_diff(self.center.y) <= self.radius
    }
}

/// Place exactly `count` hazards uniformly at random outside `safe`.
pub fn place_hazards_random(
    width: usize,
    height: usize,
    count: usize,
    safe: Option<SafeZone>,
    rng: &mut BoardRng,
) -> Result<Hazards, BoardError> {
    let mut pool: Vec<Position> = (0..width)
        .flat_map(|x| (0..height).map(move |y| Position::new(x, y)))
        .filter(|&p| !safe.is_some_and(|z| z.contains(p)))
        .collect();

    if count > pool.len() {
        return Err(BoardError::TooManyHazards { requested: count, available: pool.len() });
    }

    let mut hazards = Hazards::new(width, height);
    for p in rng.choose_distinct(&mut pool, count) {
        hazards.set(p, true);
    }
    Ok(hazards)
}

/// Calculate the neighbor hazard counts for every cell.
pub fn calculate_numbers(hazards: &Hazards, nc: &NeighborCache) -> Numbers {
    let mut cells = Vec::with_capacity(hazards.width * hazards.height);
    for x in 0..hazards.width {
        for y in 0..hazards.height {
            let n = nc
                .get(Position::new(x, y))
                .iter()
                .filter(|&&p| hazards.get(p))
                .count();
            // At most 8 neighbors.
            cells.push(Count::new(n as u8).unwrap_or(Count::ZERO));
        }
    }
    Numbers {
        height: hazards.height,
        cells,
    }
}

/// Result of uncovering a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reveal {
    /// Out of bounds, flagged, or already uncovered.
    Ignored,
    Safe,
    Detonated,
}

/// A live board.
#[derive(Debug, Clone)]
pub struct Board {
    width: usize,
    height: usize,
    hazards: Hazards,
    numbers: Numbers,
    uncovered: Vec<bool>,
    flagged: Vec<bool>,
    nc: NeighborCache,
}

impl Board {
    /// An empty board: no hazards, everything covered.
    pub fn new(width: usize, height: usize) -> Self {
        Self::from_hazards(Hazards::new(width, height))
    }

    pub fn from_hazards(hazards: Hazards) -> Self {
        let (width, height) = (hazards.width, hazards.height);
        let nc = NeighborCache::new(width, height);
        let numbers = calculate_numbers(&hazards, &nc);
        Self {
            width,
            height,
            hazards,
            numbers,
            uncovered: vec![false; width * height],
            flagged: vec![false; width * height],
            nc,
        }
    }

    /// Lay out a fresh random board from `config`.
    pub fn random(config: &BoardConfig, rng: &mut BoardRng) -> Result<Self, BoardError> {
        let mut board = Self::new(config.width, config.height);
        let safe = config.start.map(|center| SafeZone { center, radius: config.safe_radius });
        board.random_fill(config.hazard_count, safe, rng)?;
        Ok(board)
    }

    #[inline(always)]
    fn idx(&self, pos: Position) -> usize {
        pos.x * self.height + pos.y
    }

    #[inline(always)]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn hazards(&self) -> &Hazards {
        &self.hazards
    }

    pub fn hazard_count(&self) -> usize {
        self.hazards.count()
    }

    pub fn is_hazard(&self, pos: Position) -> bool {
        self.in_bounds(pos) && self.hazards.get(pos)
    }

    pub fn is_uncovered(&self, pos: Position) -> bool {
        self.in_bounds(pos) && self.uncovered[self.idx(pos)]
    }

    pub fn is_flagged(&self, pos: Position) -> bool {
        self.in_bounds(pos) && self.flagged[self.idx(pos)]
    }

    /// Remove every hazard and cover every cell.
    pub fn reset(&mut self) {
        *self = Self::new(self.width, self.height);
    }

    /// Keep the layout, but cover and unflag every cell.
    pub fn cover_all(&mut self) {
        self.uncovered.fill(false);
        self.flagged.fill(false);
    }

    /// Add a hazard at `pos`. False when out of bounds or already a hazard.
    pub fn set_hazard(&mut self, pos: Position) -> bool {
        if !self.in_bounds(pos) || self.hazards.get(pos) {
            return false;
        }
        self.hazards.set(pos, true);
        self.numbers = calculate_numbers(&self.hazards, &self.nc);
        true
    }

    /// Reset and place `count` random hazards outside `safe`.
    pub fn random_fill(
        &mut self,
        count: usize,
        safe: Option<SafeZone>,
        rng: &mut BoardRng,
    ) -> Result<(), BoardError> {
        let hazards = place_hazards_random(self.width, self.height, count, safe, rng)?;
        *self = Self::from_hazards(hazards);
        debug!(target: "board", "filled {}x{} with {} hazards", self.width, self.height, count);
        Ok(())
    }

    /// Uncover `pos`, cascading through zero-count cells.
    pub fn uncover(&mut self, pos: Position) -> Reveal {
        if !self.in_bounds(pos) {
            return Reveal::Ignored;
        }
        let i = self.idx(pos);
        if self.uncovered[i] || self.flagged[i] {
            return Reveal::Ignored;
        }
        if self.hazards.get(pos) {
            self.uncovered[i] = true;
            debug!(target: "board", "detonated at {}", pos);
            return Reveal::Detonated;
        }

        let mut stack = vec![pos];
        while let Some(p) = stack.pop() {
            let i = self.idx(p);
            if self.uncovered[i] || self.flagged[i] || self.hazards.get(p) {
                continue;
            }
            self.uncovered[i] = true;
            if self.numbers.get(p) == Count::ZERO {
                stack.extend_from_slice(self.nc.get(p));
            }
        }
        trace!(target: "board", "uncovered {}", pos);
        Reveal::Safe
    }

    /// Flip the flag on a covered cell. False when out of bounds or uncovered.
    pub fn toggle_flag(&mut self, pos: Position) -> bool {
        if !self.in_bounds(pos) {
            return false;
        }
        let i = self.idx(pos);
        if self.uncovered[i] {
            return false;
        }
        self.flagged[i] = !self.flagged[i];
        true
    }

    /// Cover an uncovered cell again. False when out of bounds or still covered.
    pub fn cover(&mut self, pos: Position) -> bool {
        if !self.in_bounds(pos) {
            return false;
        }
        let i = self.idx(pos);
        if !self.uncovered[i] {
            return false;
        }
        self.uncovered[i] = false;
        true
    }

    /// Apply a deduced move. Flags are set, not toggled, so applying the same
    /// move twice is harmless.
    pub fn apply(&mut self, m: &Move) -> Reveal {
        match m.action {
            Action::Uncover => self.uncover(m.pos),
            Action::Flag => {
                if self.in_bounds(m.pos) && !self.is_uncovered(m.pos) {
                    let i = self.idx(m.pos);
                    self.flagged[i] = true;
                }
                Reveal::Ignored
            }
        }
    }

    /// What a player sees.
    pub fn snapshot(&self) -> Snapshot {
        let mut s = Snapshot::new(self.width, self.height);
        for x in 0..self.width {
            for y in 0..self.height {
                let p = Position::new(x, y);
                let i = self.idx(p);
                let state = if self.flagged[i] {
                    CellState::Flagged
                } else if !self.uncovered[i] {
                    CellState::Covered
                } else if self.hazards.get(p) {
                    CellState::Exposed
                } else {
                    CellState::Revealed(self.numbers.get(p))
                };
                s.set(p, state);
            }
        }
        s
    }

    /// True when every safe cell is uncovered.
    pub fn is_cleared(&self) -> bool {
        self.hazards
            .cells
            .iter()
            .zip(&self.uncovered)
            .all(|(&h, &u)| h != 0 || u)
    }
}

/// Result of a board generation attempt.
pub struct BoardResult {
    /// The last layout tried, fully covered.
    pub board: Board,
    /// How many random layouts were tried before finding a solvable one.
    pub attempts: u32,
    /// True if a solvable board was found within max_attempts.
    pub success: bool,
}

/// Generate a solvable board by repeatedly laying out hazards and checking
/// solvability.
///
/// The `is_solvable_fn` parameter injects the solvability check (see
/// `autoplay::is_solvable`), which keeps this module independent of the
/// deduction engine.
pub fn generate_solvable_board<F>(
    config: &BoardConfig,
    max_attempts: u32,
    rng: &mut BoardRng,
    is_solvable_fn: F,
) -> Result<BoardResult, BoardError>
where
    F: Fn(&Board) -> bool,
{
    let mut attempts: u32 = 0;

    loop {
        attempts += 1;

        let board = Board::random(config, rng)?;

        if is_solvable_fn(&board) {
            debug!(target: "board", "solvable layout after {} attempts", attempts);
            return Ok(BoardResult { board, attempts, success: true });
        }

        if attempts >= max_attempts {
            // Return the last attempted board (not solvable, but best effort)
            return Ok(BoardResult { board, attempts, success: false });
        }
    }
}
