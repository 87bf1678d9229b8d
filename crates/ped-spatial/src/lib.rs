//! `ped-spatial` — neighbor indices for collision resolution.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`index`]   | `NeighborIndex` trait, `make_index` factory                 |
//! | [`brute`]   | `BruteForceIndex`, linear scan, correctness baseline        |
//! | [`grid`]    | `CellGridIndex`, FxHash-bucketed uniform grid               |
//! | [`rtree`]   | `RTreeIndex`, `rstar` R-tree over agent points              |
//! | [`error`]   | `SpatialError`, `SpatialResult<T>`                          |
//!
//! # Query semantics
//!
//! `query(center, dist)` returns every indexed agent whose cell lies within
//! Chebyshev distance `dist` of `center`, in ascending `AgentId` order.
//! Nobody is excluded by identity.  All three indices return the same set
//! for the same placement; `BruteForceIndex` exists to prove that in tests.
//!
//! Indices are incrementally maintained: the owner calls
//! [`NeighborIndex::relocate`] after every position commit so a query never
//! sees a stale position.

pub mod brute;
pub mod error;
pub mod grid;
pub mod index;
pub mod rtree;

#[cfg(test)]
mod tests;

pub use brute::BruteForceIndex;
pub use error::{SpatialError, SpatialResult};
pub use grid::CellGridIndex;
pub use index::{NeighborIndex, make_index};
pub use rtree::RTreeIndex;
