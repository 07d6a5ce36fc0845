//! The single-pass deduction driver.
//!
//! Scans the grid row by row. Every revealed cell with a nonzero count yields
//! a group; saturated groups are resolved on the spot, the rest are registered
//! and compared against each earlier group they share a covered cell with.
//! The pass never backtracks and never rescans: callers apply the moves and
//! call again to go further.

use crate::collector::MoveCollector;
use crate::group::{Group, GroupId, GroupIndex, Resolution};
use crate::overlap;
use crate::types::{Action, CellState, Move, NeighborCache, Position, Snapshot};
use log::{debug, trace};

/// Deduce every move that one pass over `snapshot` can prove.
///
/// `snapshot` is only read; flags decided during the pass go into a private
/// working copy.
pub fn deduce(snapshot: &Snapshot) -> Vec<Move> {
    let nc = NeighborCache::new(snapshot.width(), snapshot.height());
    deduce_with_cache(snapshot, &nc)
}

/// Same as [`deduce`], reusing a neighbor cache built for the same dimensions.
pub fn deduce_with_cache(snapshot: &Snapshot, nc: &NeighborCache) -> Vec<Move> {
    let mut out = MoveCollector::new(snapshot);
    let mut groups: Vec<Group> = Vec::new();
    let mut index = GroupIndex::new(snapshot.width(), snapshot.height());
    // Scratch for per-registration pair dedup.
    let mut compared: Vec<GroupId> = Vec::new();

    for pos in snapshot.positions() {
        // Revealed cells never change during a pass, so the input is as good
        // as the working copy here.
        let target = match snapshot.get(pos) {
            CellState::Revealed(n) if n.get() > 0 => n,
            _ => continue,
        };

        let group = Group::extract(out.working(), nc, pos, target);
        match group.resolve() {
            Resolution::AllHazards => {
                trace!(target: "deduce", "{} saturated by count", pos);
                out.emit_all(&group.covered, Action::Flag);
            }
            Resolution::AllSafe => {
                trace!(target: "deduce", "{} saturated by flags", pos);
                out.emit_all(&group.covered, Action::Uncover);
            }
            Resolution::Ambiguous => {
                let id = groups.len();
                index.insert(id, &group.covered);
                groups.push(group);
                let new = &groups[id];

                compared.clear();
                for &cell in &new.covered {
                    for &other in index.at(cell) {
                        if other == id || compared.contains(&other) {
                            continue;
                        }
                        compared.push(other);
                        overlap::compare(&groups[other], new, &mut out);
                    }
                }
            }
        }
    }

    let moves = out.into_moves();
    debug!(
        target: "deduce",
        "pass over {}x{}: {} groups, {} moves",
        snapshot.width(), snapshot.height(), groups.len(), moves.len()
    );
    moves
}

/// First cell a pass proves safe, if any.
pub fn hint(snapshot: &Snapshot) -> Option<Position> {
    deduce(snapshot)
        .into_iter()
        .find(|m| m.action == Action::Uncover)
        .map(|m| m.pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: usize, y: usize) -> Position {
        Position::new(x, y)
    }

    fn run(grid: &str) -> Vec<Move> {
        let snapshot: Snapshot = grid.parse().unwrap();
        deduce(&snapshot)
    }

    #[test]
    fn test_flag_feeds_later_constraint() {
        let moves = run(
            "121
             ###",
        );
        assert_eq!(moves, vec![Move::flag(p(2, 1)), Move::uncover(p(1, 1))]);
    }

    #[test]
    fn test_saturation_by_count() {
        let moves = run(
            "2#
             ##
             ##",
        );
        // 3 covered neighbors, target 2: ambiguous on its own.
        assert!(moves.is_empty());

        let moves = run(
            "3#
             ##",
        );
        assert_eq!(
            moves,
            vec![Move::flag(p(0, 1)), Move::flag(p(1, 0)), Move::flag(p(1, 1))]
        );
    }

    #[test]
    fn test_saturation_by_flags() {
        let moves = run(
            "1F
             ##",
        );
        assert_eq!(moves, vec![Move::uncover(p(0, 1)), Move::uncover(p(1, 1))]);
    }

    #[test]
    fn test_exposed_hazard_counts_as_known() {
        let moves = run(
            "1*
             ##",
        );
        assert_eq!(moves, vec![Move::uncover(p(0, 1)), Move::uncover(p(1, 1))]);
    }

    #[test]
    fn test_exposed_cells_are_not_anchors() {
        assert!(run("*#\n##").is_empty());

        // Only the clue at (3,0) yields moves; the cells around the exposed
        // hazard stay untouched.
        let moves = run(
            "*##1
             ###F",
        );
        assert_eq!(moves, vec![Move::uncover(p(2, 0)), Move::uncover(p(2, 1))]);
    }

    #[test]
    fn test_zero_cells_are_not_anchors() {
        // A zero next to covered cells proves them safe, but zero cells are
        // left to the board owner's cascade and produce nothing here.
        let moves = run(
            "0#
             ##",
        );
        assert!(moves.is_empty());
    }

    #[test]
    fn test_fully_revealed_board() {
        assert!(run("111\n1*1\n111").is_empty());
        assert!(run("000\n000").is_empty());
    }

    #[test]
    fn test_all_covered_board() {
        assert!(run("###\n###\n###").is_empty());
    }

    #[test]
    fn test_one_two_one_in_open_field() {
        // Covered on both sides, the 1-2-1 forces nothing in one pass.
        let moves = run(
            "#####
             #121#
             #####",
        );
        assert!(moves.is_empty(), "unexpected moves: {:?}", moves);
    }

    #[test]
    fn test_clues_along_wall() {
        // Hazards at (1,1) and (3,1). One pass only proves the safe cells.
        let moves = run(
            "11211
             #####",
        );
        assert_eq!(
            moves,
            vec![Move::uncover(p(2, 1)), Move::uncover(p(0, 1)), Move::uncover(p(4, 1))]
        );
    }

    #[test]
    fn test_input_is_not_mutated() {
        let snapshot: Snapshot = "121\n###".parse().unwrap();
        let before = snapshot.clone();
        let _ = deduce(&snapshot);
        assert_eq!(snapshot, before);
    }

    #[test]
    fn test_deterministic() {
        let snapshot: Snapshot = "
            1#2#1
            #####
            12321
        "
        .parse()
        .unwrap();
        assert_eq!(deduce(&snapshot), deduce(&snapshot));
    }

    #[test]
    fn test_hint() {
        let snapshot: Snapshot = "121\n###".parse().unwrap();
        assert_eq!(hint(&snapshot), Some(p(1, 1)));
        let snapshot: Snapshot = "3#\n##".parse().unwrap();
        assert_eq!(hint(&snapshot), None);
    }
}
