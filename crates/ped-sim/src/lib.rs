//! `ped-sim` — scheduling, collision resolution and the update cycle for the
//! `pedsim` grid crowd simulator.
//!
//! # Update cycle
//!
//! ```text
//! step():
//!   ① Plan     — Scheduler runs the desired-position kernel over all agents
//!                under the active Strategy (serial, batch, workshare, offload).
//!                Returns only when every agent is done.
//!   ② Resolve  — for each agent in ascending AgentId order:
//!                  query the neighbor index within 2 of the current cell,
//!                  commit the first free candidate (desired, then two
//!                  alternatives) or stay put, update the index.
//!
//! tick():
//!   ① Plan and commit in one pass; no collision resolution.
//!   ② Sync the neighbor index with the committed positions.
//! ```
//!
//! Every strategy yields identical desired cells: the kernel reads only its
//! own agent and the shared waypoint slice.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ped_agent::{PopulationBuilder, Route};
//! use ped_core::{GridPos, SimConfig, Strategy};
//! use ped_sim::{ModelBuilder, NoopObserver};
//!
//! let mut pop = PopulationBuilder::new();
//! let goal = pop.waypoint(10.0, 0.0, 1.0);
//! pop.agent(GridPos::new(0, 0), Route::one_way([goal]));
//!
//! let config = SimConfig { strategy: Strategy::WorkShare, ..SimConfig::default() };
//! let mut model = ModelBuilder::new(config).population(pop.build()).build()?;
//! model.run(&mut NoopObserver);
//! ```

pub mod builder;
pub mod error;
pub mod model;
pub mod observer;
pub mod resolver;
pub mod scheduler;


pub use builder::ModelBuilder;
pub use error::{SimError, SimResult};
pub use model::{Model, StepStats};
pub use observer::{NoopObserver, SimObserver};
pub use resolver::Resolution;
pub use scheduler::{OffloadDevice, Scheduler};
