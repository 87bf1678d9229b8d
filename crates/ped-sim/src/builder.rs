//! Fluent builder for constructing a [`Model`].

use std::sync::Arc;

use rustc_hash::FxHashSet;
use tracing::{info, warn};

use ped_agent::{Agent, Waypoint};
use ped_core::{GridPos, SimConfig};
use ped_spatial::make_index;

use crate::{Model, OffloadDevice, Scheduler, SimError, SimResult};

/// Fluent builder for [`Model`].
///
/// | Method             | Default                                   |
/// |--------------------|-------------------------------------------|
/// | `.agents(v)`       | no agents                                 |
/// | `.waypoints(v)`    | no waypoints                              |
/// | `.population(p)`   | sets both from a `PopulationBuilder`      |
/// | `.offload(dev)`    | none; `Strategy::Offload` is then refused |
///
/// # Example
///
/// ```rust,ignore
/// let mut pop = PopulationBuilder::new();
/// let goal = pop.waypoint(20.0, 0.0, 1.5);
/// pop.agent(GridPos::new(0, 0), Route::one_way([goal]));
///
/// let mut model = ModelBuilder::new(SimConfig::default())
///     .population(pop.build())
///     .build()?;
/// model.run(&mut NoopObserver);
/// ```
pub struct ModelBuilder {
    config:    SimConfig,
    agents:    Vec<Agent>,
    waypoints: Vec<Waypoint>,
    offload:   Option<Arc<dyn OffloadDevice>>,
}

impl ModelBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            agents:    Vec::new(),
            waypoints: Vec::new(),
            offload:   None,
        }
    }

    /// Supply the agents.  Agent `i` must carry `AgentId(i)`.
    pub fn agents(mut self, agents: Vec<Agent>) -> Self {
        self.agents = agents;
        self
    }

    /// Supply the waypoints.  Waypoint `i` must carry `WaypointId(i)`.
    pub fn waypoints(mut self, waypoints: Vec<Waypoint>) -> Self {
        self.waypoints = waypoints;
        self
    }

    /// Supply both arenas as returned by `PopulationBuilder::build`.
    pub fn population(self, (agents, waypoints): (Vec<Agent>, Vec<Waypoint>)) -> Self {
        self.agents(agents).waypoints(waypoints)
    }

    /// Attach the device used by `Strategy::Offload`.
    pub fn offload(mut self, device: Arc<dyn OffloadDevice>) -> Self {
        self.offload = Some(device);
        self
    }

    /// Validate inputs, build the worker pool and neighbor index, and return
    /// a ready-to-run [`Model`].
    pub fn build(self) -> SimResult<Model> {
        self.config.validate()?;

        // ── Validate the arenas ───────────────────────────────────────────
        for (index, agent) in self.agents.iter().enumerate() {
            if agent.id.index() != index {
                return Err(SimError::AgentIdMismatch { index, id: agent.id });
            }
        }
        for (index, wp) in self.waypoints.iter().enumerate() {
            if wp.id.index() != index {
                return Err(SimError::WaypointIdMismatch { index, id: wp.id });
            }
            if !wp.x.is_finite() || !wp.y.is_finite() || wp.r.is_nan() || wp.r < 0.0 {
                return Err(SimError::InvalidWaypoint(wp.id));
            }
        }
        for agent in &self.agents {
            if let Some(waypoint) = agent
                .waypoint_refs()
                .find(|w| w.index() >= self.waypoints.len())
            {
                return Err(SimError::DanglingWaypoint { agent: agent.id, waypoint });
            }
        }

        // ── Scheduler and index ───────────────────────────────────────────
        let scheduler = Scheduler::new(
            self.config.strategy,
            self.config.resolved_workers(),
            self.offload,
        )?;

        let positions: Vec<GridPos> = self.agents.iter().map(|a| a.position).collect();
        let mut index = make_index(self.config.index)?;
        index.rebuild(&positions);

        let mut seen = FxHashSet::default();
        let colocated = positions.iter().filter(|p| !seen.insert(**p)).count();
        if colocated > 0 {
            warn!(colocated, "agents start on occupied cells; step() will not separate them");
        }

        info!(
            agents = self.agents.len(),
            waypoints = self.waypoints.len(),
            strategy = %scheduler.strategy(),
            workers = scheduler.workers(),
            offload = scheduler.offload_name().unwrap_or("none"),
            index = index.name(),
            "model ready"
        );

        Ok(Model::new(self.config, self.agents, self.waypoints, scheduler, index))
    }
}
