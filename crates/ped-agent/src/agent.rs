//! The agent entity and its waypoint queue.

use std::collections::VecDeque;

use ped_core::{AgentId, GridPos, WaypointId};

// ── Route ─────────────────────────────────────────────────────────────────────

/// Ordered queue of waypoints an agent visits.
///
/// A looping route re-appends every reached waypoint, so the agent patrols
/// the same circuit forever.  A one-way route drains and the agent stops once
/// its last waypoint is reached.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    queue:   VecDeque<WaypointId>,
    looping: bool,
}

impl Route {
    /// Visit `waypoints` once, in order.
    pub fn one_way(waypoints: impl IntoIterator<Item = WaypointId>) -> Self {
        Self { queue: waypoints.into_iter().collect(), looping: false }
    }

    /// Visit `waypoints` in order, then start over.
    pub fn looping(waypoints: impl IntoIterator<Item = WaypointId>) -> Self {
        Self { queue: waypoints.into_iter().collect(), looping: true }
    }

    /// A route with nowhere to go.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Waypoints still queued, front first.  Excludes the current destination.
    pub fn pending(&self) -> impl Iterator<Item = WaypointId> + '_ {
        self.queue.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Hand out the next destination after `reached` was arrived at (or
    /// `None` if the agent had no destination yet).
    pub(crate) fn advance(&mut self, reached: Option<WaypointId>) -> Option<WaypointId> {
        if self.looping {
            if let Some(done) = reached {
                self.queue.push_back(done);
            }
        }
        self.queue.pop_front()
    }
}

// ── Agent ─────────────────────────────────────────────────────────────────────

/// One simulated pedestrian.
///
/// `position` is written only by a commit (direct in `tick`, or through
/// collision resolution).  `desired` is written only by the kernel and is
/// meaningful only between the compute and commit phases of one tick.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Agent {
    pub id:       AgentId,
    pub position: GridPos,
    pub desired:  GridPos,
    pub(crate) destination: Option<WaypointId>,
    pub(crate) route:       Route,
}

impl Agent {
    /// Create an agent standing at `position` with no destination selected
    /// yet; the first kernel call picks the front of `route`.
    pub fn new(id: AgentId, position: GridPos, route: Route) -> Self {
        Self {
            id,
            position,
            desired: position,
            destination: None,
            route,
        }
    }

    /// Waypoint currently walked toward.
    #[inline]
    pub fn destination(&self) -> Option<WaypointId> {
        self.destination
    }

    #[inline]
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Every waypoint this agent refers to (current destination first).
    pub fn waypoint_refs(&self) -> impl Iterator<Item = WaypointId> + '_ {
        self.destination.into_iter().chain(self.route.pending())
    }

    /// `true` once a one-way route is exhausted and the agent stands still.
    pub fn is_finished(&self) -> bool {
        self.destination.is_none() && self.route.is_empty()
    }

    /// Move to `desired` unconditionally.
    #[inline]
    pub fn commit_desired(&mut self) {
        self.position = self.desired;
    }
}
