//! Linear-scan baseline.

use ped_core::{AgentId, GridPos};

use crate::NeighborIndex;
use crate::index::slot_id;

/// Keeps a flat copy of every position and scans all of them per query.
///
/// O(N) per query.  Used as the reference the other indices are tested
/// against, and selectable for tiny populations.
#[derive(Clone, Debug, Default)]
pub struct BruteForceIndex {
    positions: Vec<GridPos>,
}

impl BruteForceIndex {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NeighborIndex for BruteForceIndex {
    fn name(&self) -> &'static str {
        "brute"
    }

    fn rebuild(&mut self, positions: &[GridPos]) {
        self.positions.clear();
        self.positions.extend_from_slice(positions);
    }

    #[inline]
    fn relocate(&mut self, agent: AgentId, to: GridPos) {
        self.positions[agent.index()] = to;
    }

    #[inline]
    fn position(&self, agent: AgentId) -> GridPos {
        self.positions[agent.index()]
    }

    fn query(&self, center: GridPos, dist: u32) -> Vec<AgentId> {
        // Enumeration order is already ascending.
        self.positions
            .iter()
            .enumerate()
            .filter(|(_, p)| p.within(center, dist))
            .map(|(i, _)| slot_id(i))
            .collect()
    }

    fn len(&self) -> usize {
        self.positions.len()
    }
}
