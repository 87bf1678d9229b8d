//! The `Model` struct and its update cycle.

use std::time::Instant;

use rustc_hash::FxHashSet;
use tracing::{debug, info, trace};

use ped_agent::{Agent, Pass, Waypoint};
use ped_core::{AgentId, GridPos, SimConfig, Strategy, Tick};
use ped_spatial::NeighborIndex;

use crate::resolver::{self, NEIGHBOR_RADIUS, Resolution};
use crate::{Scheduler, SimObserver, SimResult};

// ── StepStats ─────────────────────────────────────────────────────────────────

/// Outcome counts for one [`Model::step`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Agents that reached their desired cell.
    pub moved:       usize,
    /// Agents that committed to one of the alternative cells.
    pub sidestepped: usize,
    /// Agents whose every candidate was occupied.
    pub blocked:     usize,
}

impl StepStats {
    fn record(&mut self, outcome: Resolution) {
        match outcome {
            Resolution::Idle                   => {}
            Resolution::Moved { rank: 0, .. }  => self.moved += 1,
            Resolution::Moved { .. }           => self.sidestepped += 1,
            Resolution::Blocked                => self.blocked += 1,
        }
    }
}

// ── Model ─────────────────────────────────────────────────────────────────────

/// Owns the population, the waypoints, the scheduler and the neighbor index.
///
/// Two update cycles are offered:
///
/// - [`tick`](Self::tick) computes every agent's desired cell under the
///   active strategy and commits it unconditionally.  Fast, but two agents
///   may end up on one cell.
/// - [`step`](Self::step) computes desired cells the same way, then commits
///   each agent through collision resolution in ascending `AgentId` order.
///   No two agents ever share a cell afterwards, given none did before.
///
/// The neighbor index mirrors committed positions after every commit, so
/// [`neighbors`](Self::neighbors) is never stale.
///
/// Create via [`ModelBuilder`][crate::ModelBuilder].
pub struct Model {
    config:    SimConfig,
    tick:      Tick,
    agents:    Vec<Agent>,
    waypoints: Vec<Waypoint>,
    scheduler: Scheduler,
    index:     Box<dyn NeighborIndex>,
}

impl Model {
    pub(crate) fn new(
        config:    SimConfig,
        agents:    Vec<Agent>,
        waypoints: Vec<Waypoint>,
        scheduler: Scheduler,
        index:     Box<dyn NeighborIndex>,
    ) -> Self {
        Self { config, tick: Tick::ZERO, agents, waypoints, scheduler, index }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// The tick the next `tick`/`step` will process.
    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// # Panics
    /// Panics if `id` is not an agent of this model.
    pub fn agent(&self, id: AgentId) -> &Agent {
        &self.agents[id.index()]
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn strategy(&self) -> Strategy {
        self.scheduler.strategy()
    }

    pub fn workers(&self) -> usize {
        self.scheduler.workers()
    }

    pub fn index_name(&self) -> &'static str {
        self.index.name()
    }

    // ── Reconfiguration ───────────────────────────────────────────────────

    /// Select the strategy used by the compute phase from now on.
    ///
    /// Fails with [`SimError::NoOffloadDevice`][crate::SimError::NoOffloadDevice]
    /// if `Offload` is requested and the model was built without a device;
    /// the previous strategy then stays active.
    pub fn set_strategy(&mut self, strategy: Strategy) -> SimResult<()> {
        let previous = self.scheduler.strategy();
        self.scheduler.set_strategy(strategy)?;
        info!(from = %previous, to = %strategy, "execution strategy changed");
        Ok(())
    }

    // ── Update cycles ─────────────────────────────────────────────────────

    /// Compute every agent's desired cell without committing anything.
    ///
    /// [`move_agent`](Self::move_agent) then commits agents one at a time.
    pub fn plan(&mut self) {
        self.scheduler.run(&mut self.agents, &self.waypoints, Pass::Plan);
    }

    /// One tick with direct commit: every agent moves to its desired cell.
    ///
    /// Returns how many agents changed cell.  Collisions are not resolved.
    pub fn tick(&mut self) -> usize {
        let started = Instant::now();
        self.scheduler.run(&mut self.agents, &self.waypoints, Pass::PlanAndCommit);
        let moved = self.sync_index();
        debug!(
            tick = %self.tick,
            strategy = %self.scheduler.strategy(),
            moved,
            elapsed_us = started.elapsed().as_micros() as u64,
            "tick committed"
        );
        self.tick.advance();
        moved
    }

    /// Commit agent `id` to its desired cell or the best free alternative.
    ///
    /// Uses the `desired` cell from the most recent compute pass.  The index
    /// is updated before returning, so the next call sees this agent's new
    /// cell.
    ///
    /// # Panics
    /// Panics if `id` is not an agent of this model.
    pub fn move_agent(&mut self, id: AgentId) -> Resolution {
        let agent = &self.agents[id.index()];
        let (current, desired) = (agent.position, agent.desired);
        if current == desired {
            return Resolution::Idle;
        }

        let occupied: Vec<GridPos> = self
            .index
            .query(current, NEIGHBOR_RADIUS)
            .into_iter()
            .map(|n| self.index.position(n))
            .collect();

        let outcome = resolver::resolve(current, desired, &occupied);
        match outcome {
            Resolution::Moved { to, .. } => {
                self.agents[id.index()].position = to;
                self.index.relocate(id, to);
            }
            Resolution::Blocked => {
                trace!(agent = %id, at = %current, wanted = %desired, "all candidates occupied");
            }
            Resolution::Idle => {}
        }
        outcome
    }

    /// One tick with collision resolution.
    ///
    /// Plans every agent under the active strategy, then resolves them
    /// sequentially in ascending `AgentId` order.
    pub fn step(&mut self) -> StepStats {
        let started = Instant::now();
        self.plan();

        let mut stats = StepStats::default();
        for i in 0..self.agents.len() {
            let id = self.agents[i].id;
            stats.record(self.move_agent(id));
        }

        debug!(
            tick = %self.tick,
            strategy = %self.scheduler.strategy(),
            moved = stats.moved,
            sidestepped = stats.sidestepped,
            blocked = stats.blocked,
            elapsed_us = started.elapsed().as_micros() as u64,
            "step committed"
        );
        self.tick.advance();
        stats
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Agents within Chebyshev distance `dist` of `center`, ascending by id.
    pub fn neighbors(&self, center: GridPos, dist: u32) -> Vec<AgentId> {
        self.index.query(center, dist)
    }

    /// Number of agents standing on a cell some lower-id agent already holds.
    ///
    /// Always zero after [`step`](Self::step) on a collision-free start;
    /// [`tick`](Self::tick) can raise it.
    pub fn collisions(&self) -> usize {
        let mut seen = FxHashSet::default();
        self.agents.iter().filter(|a| !seen.insert(a.position)).count()
    }

    // ── Run loops ─────────────────────────────────────────────────────────

    /// Step until `config.total_ticks` ticks have been processed.
    ///
    /// Calls observer hooks around every step.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) {
        while self.tick.0 < self.config.total_ticks {
            self.run_one(observer);
        }
        observer.on_sim_end(self.tick);
    }

    /// Step exactly `n` more times, ignoring `total_ticks`.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.run_one(observer);
        }
    }

    fn run_one<O: SimObserver>(&mut self, observer: &mut O) {
        let now = self.tick;
        observer.on_tick_start(now);
        let stats = self.step();
        observer.on_tick_end(now, &stats);
        if now.is_output_tick(self.config.output_interval_ticks) {
            observer.on_snapshot(now, &self.agents);
        }
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Push committed positions that differ from the index into it.
    fn sync_index(&mut self) -> usize {
        let mut moved = 0;
        for agent in &self.agents {
            if self.index.position(agent.id) != agent.position {
                self.index.relocate(agent.id, agent.position);
                moved += 1;
            }
        }
        moved
    }
}
