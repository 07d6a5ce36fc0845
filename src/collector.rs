//! Move collection for a single deduction pass.
//!
//! Owns the pass's working copy of the grid and the calculated mask. Flag
//! decisions are written into the working copy as soon as they are emitted,
//! so constraints extracted later in the same pass see them.

use crate::types::{Action, CellState, Move, Position, Snapshot};
use log::trace;

pub struct MoveCollector {
    working: Snapshot,
    calculated: Vec<bool>,
    moves: Vec<Move>,
}

impl MoveCollector {
    /// Start a pass from a private copy of `snapshot`.
    pub fn new(snapshot: &Snapshot) -> Self {
        Self {
            calculated: vec![false; snapshot.width() * snapshot.height()],
            working: snapshot.clone(),
            moves: Vec::new(),
        }
    }

    /// The working copy, including flags emitted so far.
    #[inline(always)]
    pub fn working(&self) -> &Snapshot {
        &self.working
    }

    /// Record a move unless `pos` already has one this pass.
    pub fn emit(&mut self, pos: Position, action: Action) {
        let idx = pos.x * self.working.height() + pos.y;
        if self.calculated[idx] {
            return;
        }
        trace!(target: "deduce", "emit {:?} at {}", action, pos);
        self.moves.push(Move { pos, action });
        if action == Action::Flag {
            self.working.set(pos, CellState::Flagged);
        }
        self.calculated[idx] = true;
    }

    pub fn emit_all(&mut self, cells: &[Position], action: Action) {
        for &pos in cells {
            self.emit(pos, action);
        }
    }

    pub fn into_moves(self) -> Vec<Move> {
        self.moves
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_once_per_position() {
        let snapshot = Snapshot::new(2, 2);
        let mut c = MoveCollector::new(&snapshot);
        let p = Position::new(1, 0);
        c.emit(p, Action::Uncover);
        c.emit(p, Action::Flag);
        c.emit(p, Action::Uncover);
        assert_eq!(c.into_moves(), vec![Move::uncover(p)]);
    }

    #[test]
    fn test_flag_updates_working_copy_only() {
        let snapshot = Snapshot::new(2, 2);
        let mut c = MoveCollector::new(&snapshot);
        let p = Position::new(0, 1);
        c.emit(p, Action::Flag);
        assert_eq!(c.working().get(p), CellState::Flagged);
        assert_eq!(snapshot.get(p), CellState::Covered);
    }

    #[test]
    fn test_uncover_leaves_working_copy() {
        let snapshot = Snapshot::new(2, 2);
        let mut c = MoveCollector::new(&snapshot);
        let p = Position::new(1, 1);
        c.emit(p, Action::Uncover);
        assert_eq!(c.working().get(p), CellState::Covered);
    }
}
