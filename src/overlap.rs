//! Pairwise reasoning between two overlapping groups.
//!
//! Given groups `G1` and `G2` with covered sets `C1`, `C2` and remaining
//! hazard counts `r1`, `r2`, the cells split into `C1 \ C2`, `C2 \ C1` and the
//! shared region `C1 ∩ C2`. A lower bound on hazards forced into the shared
//! region follows from how many of each group's hazards could fit outside it.
//! Subset relations pin that number down exactly.

use crate::collector::MoveCollector;
use crate::group::Group;
use crate::types::{Action, Position};
use log::trace;

/// The three regions of a pair of groups. Each list keeps the order of the
/// group it was taken from; the shared region follows `C1`.
struct Split {
    only_first: Vec<Position>,
    only_second: Vec<Position>,
    shared: Vec<Position>,
}

impl Split {
    fn of(g1: &Group, g2: &Group) -> Self {
        let (shared, only_first) = g1.covered.iter().partition(|&&p| g2.contains(p));
        let only_second = g2.covered.iter().copied().filter(|&p| !g1.contains(p)).collect();
        Self {
            only_first,
            only_second,
            shared,
        }
    }
}

/// Compare `g1` (registered earlier) with `g2` (just registered) and emit
/// every move the pair forces.
pub fn compare(g1: &Group, g2: &Group, out: &mut MoveCollector) {
    let Split { only_first, only_second, shared } = Split::of(g1, g2);
    let r1 = g1.remaining();
    let r2 = g2.remaining();
    let d1 = only_first.len() as i32;
    let d2 = only_second.len() as i32;

    let mut shared_hazards = (r1 - d1).max(r2 - d2).max(0);

    if only_first.is_empty() {
        // C1 ⊆ C2: all of r1 sits in the shared region.
        shared_hazards = r1;
        let on_rest = r2 - r1;
        if on_rest == d2 {
            out.emit_all(&only_second, Action::Flag);
        }
        if on_rest == 0 {
            out.emit_all(&only_second, Action::Uncover);
        }
    }

    if only_second.is_empty() {
        shared_hazards = r2;
        let on_rest = r1 - r2;
        if on_rest == d1 {
            out.emit_all(&only_first, Action::Flag);
        }
        if on_rest == 0 {
            out.emit_all(&only_first, Action::Uncover);
        }
    }

    trace!(
        target: "overlap",
        "{} vs {}: r=({}, {}) split=({}, {}, {}) shared_hazards={}",
        g1.anchor, g2.anchor, r1, r2, d1, shared.len(), d2, shared_hazards
    );

    if shared_hazards == 0 {
        return;
    }
    if r1 == shared_hazards {
        out.emit_all(&only_first, Action::Uncover);
    }
    if shared_hazards == shared.len() as i32 {
        out.emit_all(&shared, Action::Flag);
    }
    if r2 == shared_hazards {
        out.emit_all(&only_second, Action::Uncover);
    }
}
