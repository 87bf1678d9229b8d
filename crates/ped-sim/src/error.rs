use ped_core::{AgentId, PedError, WaypointId};
use ped_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] PedError),

    #[error(transparent)]
    Spatial(#[from] SpatialError),

    #[error("failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    #[error("agent at index {index} carries id {id}")]
    AgentIdMismatch { index: usize, id: AgentId },

    #[error("waypoint at index {index} carries id {id}")]
    WaypointIdMismatch { index: usize, id: WaypointId },

    #[error("{agent} refers to unknown {waypoint}")]
    DanglingWaypoint { agent: AgentId, waypoint: WaypointId },

    #[error("{0} has a non-finite position or an invalid arrival radius")]
    InvalidWaypoint(WaypointId),

    #[error("offload strategy selected but no offload device is attached")]
    NoOffloadDevice,
}

pub type SimResult<T> = Result<T, SimError>;
