//! Fluent builder for a population of agents and the waypoints they visit.
//!
//! # Usage
//!
//! ```rust
//! use ped_agent::{PopulationBuilder, Route};
//! use ped_core::GridPos;
//!
//! let mut b = PopulationBuilder::new();
//! let east = b.waypoint(50.0, 0.0, 2.0);
//! let west = b.waypoint(0.0, 0.0, 2.0);
//! b.agent(GridPos::new(0, 0), Route::looping([east, west]));
//! b.agent(GridPos::new(50, 0), Route::looping([west, east]));
//!
//! let (agents, waypoints) = b.build();
//! assert_eq!(agents.len(), 2);
//! assert_eq!(waypoints.len(), 2);
//! ```

use ped_core::{AgentId, GridPos, WaypointId};

use crate::{Agent, Route, Waypoint};

/// Collects agents and waypoints, assigning dense ids in insertion order.
#[derive(Default)]
pub struct PopulationBuilder {
    agents:    Vec<Agent>,
    waypoints: Vec<Waypoint>,
}

impl PopulationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate for `agents` agents.
    pub fn with_capacity(agents: usize) -> Self {
        Self { agents: Vec::with_capacity(agents), waypoints: Vec::new() }
    }

    /// Register a waypoint at `(x, y)` with arrival radius `r`.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX + 1` waypoints are registered.
    pub fn waypoint(&mut self, x: f64, y: f64, r: f64) -> WaypointId {
        let id = WaypointId::try_from(self.waypoints.len())
            .expect("waypoint count exceeds the WaypointId range");
        self.waypoints.push(Waypoint::new(id, x, y, r));
        id
    }

    /// Spawn an agent at `position` following `route`.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX + 1` agents are spawned.
    pub fn agent(&mut self, position: GridPos, route: Route) -> AgentId {
        let id = AgentId::try_from(self.agents.len())
            .expect("agent count exceeds the AgentId range");
        self.agents.push(Agent::new(id, position, route));
        id
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    /// Hand over both arenas.  Index `i` of each `Vec` holds the entity with
    /// id `i`.
    pub fn build(self) -> (Vec<Agent>, Vec<Waypoint>) {
        (self.agents, self.waypoints)
    }
}
