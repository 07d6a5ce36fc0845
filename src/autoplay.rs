//! Repeated deduction against a live board.
//!
//! A single pass stops short of a fixpoint by construction. This module is
//! the caller that closes the loop: apply every move, take a new snapshot,
//! and go again until a pass comes back empty.

use crate::board::{Board, Reveal};
use crate::config::AutoplayConfig;
use crate::deduce::deduce_with_cache;
use crate::types::{Move, NeighborCache, Position};
use log::{debug, trace};

/// What a run of repeated passes achieved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutoplayReport {
    /// Passes that produced at least one move.
    pub passes: usize,
    /// Every move applied, in order.
    pub applied: Vec<Move>,
    pub cleared: bool,
    /// An uncover hit a hazard. Only possible when the board carried a wrong
    /// flag before the run started.
    pub detonated: bool,
}

/// Deduce and apply moves until nothing more can be proven.
pub fn run(board: &mut Board, config: &AutoplayConfig) -> AutoplayReport {
    let nc = NeighborCache::new(board.width(), board.height());
    let limit = config.pass_limit(board.width(), board.height());
    let mut report = AutoplayReport::default();

    while report.passes < limit {
        let moves = deduce_with_cache(&board.snapshot(), &nc);
        if moves.is_empty() {
            break;
        }
        report.passes += 1;
        trace!(target: "autoplay", "pass {}: {} moves", report.passes, moves.len());

        for m in moves {
            let outcome = board.apply(&m);
            report.applied.push(m);
            if outcome == Reveal::Detonated {
                report.detonated = true;
                break;
            }
        }
        if report.detonated || board.is_cleared() {
            break;
        }
    }

    report.cleared = board.is_cleared();
    debug!(
        target: "autoplay",
        "{} passes, {} moves, cleared={}, detonated={}",
        report.passes,
        report.applied.len(),
        report.cleared,
        report.detonated
    );
    report
}

/// Whether `board` can be cleared without guessing after opening the 3×3
/// area around `start`. The board itself is left untouched.
pub fn is_solvable(board: &Board, start: Position) -> bool {
    let mut sim = board.clone();
    sim.cover_all();

    for x in start.x.saturating_sub(1)..=start.x + 1 {
        for y in start.y.saturating_sub(1)..=start.y + 1 {
            if sim.uncover(Position::new(x, y)) == Reveal::Detonated {
                return false;
            }
        }
    }

    let report = run(&mut sim, &AutoplayConfig::default());
    report.cleared && !report.detonated
}
