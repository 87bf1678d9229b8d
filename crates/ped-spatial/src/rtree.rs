//! R-tree neighbor index backed by `rstar`.
//!
//! Points are stored as `[f64; 2]` rather than `[i32; 2]`: rstar computes
//! envelope areas and squared distances in the point's scalar type, and
//! integer products overflow long before coordinates do.  Every `i32` is
//! exact in `f64`.
//!
//! The tree answers Euclidean radius queries, so a Chebyshev square of
//! half-width `d` is fetched through its circumscribed circle (radius²
//! `2d²`) and then filtered exactly.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use ped_core::{AgentId, GridPos};

use crate::NeighborIndex;
use crate::index::slot_id;

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// One agent point in the tree.  Equality covers both fields so `remove`
/// finds exactly the entry that was inserted for this agent.
#[derive(Clone, Debug, PartialEq)]
struct AgentEntry {
    point: [f64; 2],
    id:    AgentId,
}

impl AgentEntry {
    fn new(id: AgentId, p: GridPos) -> Self {
        Self { point: to_point(p), id }
    }
}

impl RTreeObject for AgentEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for AgentEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

#[inline]
fn to_point(p: GridPos) -> [f64; 2] {
    [p.x as f64, p.y as f64]
}

// ── RTreeIndex ────────────────────────────────────────────────────────────────

/// R-tree over agent positions.  Rebuilds bulk-load; relocations are a
/// remove followed by an insert.
pub struct RTreeIndex {
    tree:      RTree<AgentEntry>,
    positions: Vec<GridPos>,
}

impl RTreeIndex {
    pub fn new() -> Self {
        Self { tree: RTree::new(), positions: Vec::new() }
    }
}

impl Default for RTreeIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl NeighborIndex for RTreeIndex {
    fn name(&self) -> &'static str {
        "rtree"
    }

    fn rebuild(&mut self, positions: &[GridPos]) {
        self.positions.clear();
        self.positions.extend_from_slice(positions);
        let entries = positions
            .iter()
            .enumerate()
            .map(|(i, &p)| AgentEntry::new(slot_id(i), p))
            .collect();
        self.tree = RTree::bulk_load(entries);
    }

    fn relocate(&mut self, agent: AgentId, to: GridPos) {
        let from = std::mem::replace(&mut self.positions[agent.index()], to);
        if from == to {
            return;
        }
        self.tree.remove(&AgentEntry::new(agent, from));
        self.tree.insert(AgentEntry::new(agent, to));
    }

    #[inline]
    fn position(&self, agent: AgentId) -> GridPos {
        self.positions[agent.index()]
    }

    fn query(&self, center: GridPos, dist: u32) -> Vec<AgentId> {
        let d = dist as f64;
        // Slack covers f64 rounding near the i32 extremes; the exact filter
        // below decides membership.
        let radius_2 = 2.0 * d * d * (1.0 + 1e-9) + 1.0;
        let mut out: Vec<AgentId> = self
            .tree
            .locate_within_distance(to_point(center), radius_2)
            .map(|e| e.id)
            .filter(|a| self.positions[a.index()].within(center, dist))
            .collect();
        out.sort_unstable();
        out
    }

    fn len(&self) -> usize {
        self.positions.len()
    }
}
