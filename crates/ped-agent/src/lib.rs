//! `ped-agent` — agent and waypoint entities for the `pedsim` simulator.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`agent`]     | `Agent`, `Route` (waypoint queue)                          |
//! | [`waypoint`]  | `Waypoint`, target point with an arrival radius            |
//! | [`kernel`]    | `compute_desired`, `run_kernel`, `Pass`                    |
//! | [`builder`]   | `PopulationBuilder` (dense-id construction)                |
//!
//! # Ownership
//!
//! Agents and waypoints are plain values.  The model stores them in two
//! `Vec` arenas and the `AgentId` / `WaypointId` of each entity is its index.
//! An agent refers to waypoints by id only, so the kernel receives the
//! waypoint slice as a separate shared borrow.  That split is what lets
//! the scheduler hand out `&mut Agent` to many threads at once while every
//! thread reads the same `&[Waypoint]`.

pub mod agent;
pub mod builder;
pub mod kernel;
pub mod waypoint;

#[cfg(test)]
mod tests;

pub use agent::{Agent, Route};
pub use builder::PopulationBuilder;
pub use kernel::{Pass, compute_desired, run_kernel};
pub use waypoint::Waypoint;
