//! Local constraints ("groups") around revealed cells.
//!
//! A group is the set of covered neighbors of one revealed numbered cell,
//! plus how many of its neighbors are already known hazards. The trivial
//! saturation rules are answered here; anything else gets registered in the
//! [`GroupIndex`] for pairwise comparison.

use crate::types::{CellState, Count, NeighborCache, Position, Snapshot};

pub type GroupId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub anchor: Position,
    /// Covered neighbors, in neighbor-scan order.
    pub covered: Vec<Position>,
    pub known_hazards: u8,
    pub target: u8,
}

/// Outcome of the single-constraint rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Every covered neighbor is a hazard.
    AllHazards,
    /// Every covered neighbor is safe.
    AllSafe,
    Ambiguous,
}

impl Group {
    /// Build the group for the revealed cell at `anchor`.
    pub fn extract(snapshot: &Snapshot, nc: &NeighborCache, anchor: Position, target: Count) -> Self {
        let mut covered = Vec::with_capacity(8);
        let mut known_hazards = 0u8;

        for &n in nc.get(anchor) {
            let state = snapshot.get(n);
            if state.is_known_hazard() {
                known_hazards += 1;
            } else if state == CellState::Covered {
                covered.push(n);
            }
        }

        Self {
            anchor,
            covered,
            known_hazards,
            target: target.get(),
        }
    }

    /// Hazards still to be found among `covered`. Negative on malformed input.
    #[inline(always)]
    pub fn remaining(&self) -> i32 {
        self.target as i32 - self.known_hazards as i32
    }

    #[inline(always)]
    pub fn contains(&self, pos: Position) -> bool {
        self.covered.contains(&pos)
    }

    pub fn resolve(&self) -> Resolution {
        if self.covered.len() as i32 + self.known_hazards as i32 == self.target as i32 {
            Resolution::AllHazards
        } else if self.remaining() == 0 {
            Resolution::AllSafe
        } else {
            Resolution::Ambiguous
        }
    }
}

/// Reverse index from a covered cell to the registered groups covering it.
pub struct GroupIndex {
    height: usize,
    by_cell: Vec<Vec<GroupId>>,
}

impl GroupIndex {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            height,
            by_cell: vec![Vec::new(); width * height],
        }
    }

    pub fn insert(&mut self, id: GroupId, cells: &[Position]) {
        for p in cells {
            self.by_cell[p.x * self.height + p.y].push(id);
        }
    }

    /// Groups covering `pos`, in registration order.
    #[inline(always)]
    pub fn at(&self, pos: Position) -> &[GroupId] {
        &self.by_cell[pos.x * self.height + pos.y]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group_at(grid: &str, x: usize, y: usize) -> Group {
        let s: Snapshot = grid.parse().unwrap();
        let nc = NeighborCache::new(s.width(), s.height());
        let pos = Position::new(x, y);
        match s.get(pos) {
            CellState::Revealed(n) => Group::extract(&s, &nc, pos, n),
            other => panic!("not a revealed cell: {:?}", other),
        }
    }

    #[test]
    fn test_extract_counts_neighbors() {
        let g = group_at(
            "#F#
             *3#
             111",
            1,
            1,
        );
        assert_eq!(g.known_hazards, 2);
        assert_eq!(g.target, 3);
        assert_eq!(g.remaining(), 1);
        assert_eq!(
            g.covered,
            vec![Position::new(0, 0), Position::new(2, 0), Position::new(2, 1)]
        );
    }

    #[test]
    fn test_extract_clips_to_bounds() {
        let g = group_at("1#\n##", 0, 0);
        assert_eq!(g.covered.len(), 3);
        assert_eq!(g.known_hazards, 0);
    }

    #[test]
    fn test_resolve_all_hazards() {
        let g = group_at("2#\n#F", 0, 0);
        // 2 covered + 1 flag != 2, so this one is not saturated.
        assert_eq!(g.resolve(), Resolution::Ambiguous);

        let g = group_at("3#\n#F", 0, 0);
        assert_eq!(g.resolve(), Resolution::AllHazards);
    }

    #[test]
    fn test_resolve_all_safe() {
        let g = group_at("1#\n#F", 0, 0);
        assert_eq!(g.resolve(), Resolution::AllSafe);
    }

    #[test]
    fn test_resolve_prefers_hazards_when_nothing_covered() {
        let g = group_at("1F\n22", 0, 0);
        assert!(g.covered.is_empty());
        assert_eq!(g.resolve(), Resolution::AllHazards);
    }

    #[test]
    fn test_index_lookup() {
        let mut index = GroupIndex::new(3, 3);
        let a = Position::new(1, 2);
        let b = Position::new(2, 2);
        index.insert(0, &[a, b]);
        index.insert(1, &[b]);
        assert_eq!(index.at(a), &[0]);
        assert_eq!(index.at(b), &[0, 1]);
        assert!(index.at(Position::new(0, 0)).is_empty());
    }
}
