//! `ped-core` — foundational types for the `pedsim` grid crowd simulator.
//!
//! This crate is a dependency of every other `ped-*` crate.  It has no
//! `ped-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `WaypointId`                               |
//! | [`geo`]         | `GridPos`, Chebyshev distance, unit steps             |
//! | [`time`]        | `Tick`                                                |
//! | [`config`]      | `SimConfig`, `Strategy`, `IndexKind`                  |
//! | [`rng`]         | `SimRng` (seeded scenario generation)                 |
//! | [`error`]       | `PedError`, `PedResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{IndexKind, SimConfig, Strategy};
pub use error::{PedError, PedResult};
pub use geo::GridPos;
pub use ids::{AgentId, WaypointId};
pub use rng::SimRng;
pub use time::Tick;
