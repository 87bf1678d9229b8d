//! Spatial-subsystem error type.

use thiserror::Error;

/// Errors produced by `ped-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("grid cell size must be in 1..={max}, got {got}")]
    InvalidCellSize { got: u32, max: u32 },
}

pub type SpatialResult<T> = Result<T, SpatialError>;
