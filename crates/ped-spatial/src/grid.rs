//! Hash-bucketed uniform grid.
//!
//! # Layout
//!
//! The plane is tiled into square buckets of `cell_size × cell_size` grid
//! cells.  Bucket `(bx, by)` holds every agent whose position `p` satisfies
//! `p.x.div_euclid(cell_size) == bx` (likewise for y).  Only occupied
//! buckets exist in the map, so memory is O(agents) regardless of extent.
//!
//! A query visits the buckets overlapping the query square and filters
//! their members by exact Chebyshev distance.  For very large radii the
//! square covers more buckets than exist; the query then walks the occupied
//! buckets directly instead of the empty ones.
//!
//! `relocate` is O(bucket occupancy) when the agent crosses a bucket border
//! and O(1) otherwise.  One-cell moves cross a border at most once every
//! `cell_size` steps per axis.

use rustc_hash::FxHashMap;

use ped_core::{AgentId, GridPos};

use crate::index::slot_id;
use crate::{NeighborIndex, SpatialError, SpatialResult};

type Bucket = (i32, i32);

/// Uniform-grid neighbor index.
#[derive(Clone, Debug)]
pub struct CellGridIndex {
    cell_size: i32,
    positions: Vec<GridPos>,
    buckets:   FxHashMap<Bucket, Vec<AgentId>>,
}

impl CellGridIndex {
    /// Create an empty grid.  `cell_size` must be in `1..=i32::MAX`.
    pub fn new(cell_size: u32) -> SpatialResult<Self> {
        let max = i32::MAX as u32;
        if cell_size == 0 || cell_size > max {
            return Err(SpatialError::InvalidCellSize { got: cell_size, max });
        }
        Ok(Self {
            cell_size: cell_size as i32,
            positions: Vec::new(),
            buckets:   FxHashMap::default(),
        })
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size as u32
    }

    /// Number of non-empty buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    fn bucket_of(&self, p: GridPos) -> Bucket {
        (p.x.div_euclid(self.cell_size), p.y.div_euclid(self.cell_size))
    }

    fn collect_from(&self, members: &[AgentId], center: GridPos, dist: u32, out: &mut Vec<AgentId>) {
        out.extend(
            members
                .iter()
                .copied()
                .filter(|a| self.positions[a.index()].within(center, dist)),
        );
    }
}

impl NeighborIndex for CellGridIndex {
    fn name(&self) -> &'static str {
        "grid"
    }

    fn rebuild(&mut self, positions: &[GridPos]) {
        self.positions.clear();
        self.positions.extend_from_slice(positions);
        self.buckets.clear();
        for (i, &p) in positions.iter().enumerate() {
            let bucket = self.bucket_of(p);
            self.buckets.entry(bucket).or_default().push(slot_id(i));
        }
    }

    fn relocate(&mut self, agent: AgentId, to: GridPos) {
        let from = std::mem::replace(&mut self.positions[agent.index()], to);
        let (old, new) = (self.bucket_of(from), self.bucket_of(to));
        if old == new {
            return;
        }

        if let Some(members) = self.buckets.get_mut(&old) {
            if let Some(slot) = members.iter().position(|&a| a == agent) {
                members.swap_remove(slot);
            }
            if members.is_empty() {
                self.buckets.remove(&old);
            }
        }
        self.buckets.entry(new).or_default().push(agent);
    }

    #[inline]
    fn position(&self, agent: AgentId) -> GridPos {
        self.positions[agent.index()]
    }

    fn query(&self, center: GridPos, dist: u32) -> Vec<AgentId> {
        let (lo, hi) = center.square(dist);
        let (bx0, by0) = self.bucket_of(lo);
        let (bx1, by1) = self.bucket_of(hi);
        let span = ((bx1 as i64 - bx0 as i64 + 1) as u64)
            .saturating_mul((by1 as i64 - by0 as i64 + 1) as u64);

        let mut out = Vec::new();
        if span > self.buckets.len() as u64 {
            for members in self.buckets.values() {
                self.collect_from(members, center, dist, &mut out);
            }
        } else {
            for bx in bx0..=bx1 {
                for by in by0..=by1 {
                    if let Some(members) = self.buckets.get(&(bx, by)) {
                        self.collect_from(members, center, dist, &mut out);
                    }
                }
            }
        }
        out.sort_unstable();
        out
    }

    fn len(&self) -> usize {
        self.positions.len()
    }
}
