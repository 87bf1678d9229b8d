//! The `NeighborIndex` trait and a factory keyed by configuration.

use ped_core::{AgentId, GridPos, IndexKind};

use crate::{BruteForceIndex, CellGridIndex, RTreeIndex, SpatialResult};

/// Spatial lookup over agent positions.
///
/// Agents are identified by dense ids: after `rebuild(positions)` agent
/// `AgentId(i)` stands at `positions[i]`.  Passing an id that was never
/// indexed to [`relocate`][Self::relocate] or [`position`][Self::position]
/// is a programmer error and panics.
pub trait NeighborIndex: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Discard everything and index `positions`, one agent per slot.
    ///
    /// # Panics
    /// Panics if `positions` has more slots than `AgentId` can number.
    fn rebuild(&mut self, positions: &[GridPos]);

    /// Record that `agent` now stands at `to`.
    fn relocate(&mut self, agent: AgentId, to: GridPos);

    /// Where the index believes `agent` stands.
    fn position(&self, agent: AgentId) -> GridPos;

    /// All agents within Chebyshev distance `dist` of `center`, ascending.
    fn query(&self, center: GridPos, dist: u32) -> Vec<AgentId>;

    /// Number of indexed agents.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Construct an empty index of the configured kind.
pub fn make_index(kind: IndexKind) -> SpatialResult<Box<dyn NeighborIndex>> {
    Ok(match kind {
        IndexKind::BruteForce            => Box::new(BruteForceIndex::new()),
        IndexKind::CellGrid { cell_size } => Box::new(CellGridIndex::new(cell_size)?),
        IndexKind::RTree                 => Box::new(RTreeIndex::new()),
    })
}

/// The id of slot `i` in a rebuilt index.
#[inline]
pub(crate) fn slot_id(i: usize) -> AgentId {
    AgentId::try_from(i).expect("more positions than AgentId can number")
}
