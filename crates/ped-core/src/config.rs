//! Simulation configuration.
//!
//! `SimConfig` is a plain struct, typically filled from CLI flags or a
//! serialized file by the application crate and handed to the model builder.
//! The two selector enums parse from the short names used on command lines
//! (`"serial"`, `"batch"`, `"grid:8"`, …).

use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use crate::{PedError, PedResult};

// ── Strategy ──────────────────────────────────────────────────────────────────

/// How the desired-position pass is spread over threads.
///
/// The choice only affects wall-clock time and thread count, never the
/// resulting positions.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Strategy {
    /// One thread, agents in collection order.
    #[default]
    Serial,
    /// Contiguous chunks, one per worker.
    DataBatch,
    /// Per-agent work items stolen dynamically across the worker pool.
    WorkShare,
    /// Delegate the pass to an attached accelerator backend.
    Offload,
}

impl Strategy {
    /// Every strategy that runs on the host CPU.
    pub const HOST: [Strategy; 3] = [Strategy::Serial, Strategy::DataBatch, Strategy::WorkShare];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Serial    => "serial",
            Strategy::DataBatch => "batch",
            Strategy::WorkShare => "workshare",
            Strategy::Offload   => "offload",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = PedError;

    fn from_str(s: &str) -> PedResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "serial" | "seq"                                          => Ok(Strategy::Serial),
            "batch" | "threads" | "pthread"                           => Ok(Strategy::DataBatch),
            "workshare" | "work-share" | "data-parallel" | "omp"      => Ok(Strategy::WorkShare),
            "offload" | "gpu" | "cuda"                                => Ok(Strategy::Offload),
            other => Err(PedError::Parse(format!("unknown strategy {other:?}"))),
        }
    }
}

// ── IndexKind ─────────────────────────────────────────────────────────────────

/// Which neighbor index backs the spatial query.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum IndexKind {
    /// Linear scan over every agent.  Correctness baseline.
    BruteForce,
    /// Hash-bucketed uniform grid with square buckets of `cell_size` cells.
    CellGrid { cell_size: u32 },
    /// R-tree over agent points.
    RTree,
}

impl IndexKind {
    pub const DEFAULT_CELL_SIZE: u32 = 4;
}

impl Default for IndexKind {
    fn default() -> Self {
        IndexKind::CellGrid { cell_size: Self::DEFAULT_CELL_SIZE }
    }
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKind::BruteForce            => f.write_str("brute"),
            IndexKind::CellGrid { cell_size } => write!(f, "grid:{cell_size}"),
            IndexKind::RTree                 => f.write_str("rtree"),
        }
    }
}

impl FromStr for IndexKind {
    type Err = PedError;

    /// Accepts `brute`, `rtree`, `grid` and `grid:<cell_size>`.
    fn from_str(s: &str) -> PedResult<Self> {
        let s = s.trim().to_ascii_lowercase();
        match s.split_once(':') {
            Some(("grid", size)) => size
                .parse::<u32>()
                .map(|cell_size| IndexKind::CellGrid { cell_size })
                .map_err(|e| PedError::Parse(format!("bad grid cell size {size:?}: {e}"))),
            Some(_) => Err(PedError::Parse(format!("unknown index kind {s:?}"))),
            None => match s.as_str() {
                "brute" | "brute-force" | "scan" => Ok(IndexKind::BruteForce),
                "grid"                           => Ok(IndexKind::default()),
                "rtree" | "r-tree"               => Ok(IndexKind::RTree),
                other => Err(PedError::Parse(format!("unknown index kind {other:?}"))),
            },
        }
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Total ticks for a full run.  Stepping the model by hand ignores it.
    pub total_ticks: u64,

    /// Master RNG seed for scenario generation.
    pub seed: u64,

    /// Worker thread count for the parallel strategies.  `None` uses the
    /// available hardware parallelism.
    pub worker_count: Option<usize>,

    /// Initial execution strategy.
    pub strategy: Strategy,

    /// Neighbor index used for collision resolution.
    pub index: IndexKind,

    /// Emit a snapshot every N ticks.  0 disables snapshots.
    pub output_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            total_ticks:           100,
            seed:                  42,
            worker_count:          None,
            strategy:              Strategy::Serial,
            index:                 IndexKind::default(),
            output_interval_ticks: 0,
        }
    }
}

impl SimConfig {
    /// Number of pool workers this config asks for.
    pub fn resolved_workers(&self) -> usize {
        self.worker_count.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1)
        })
    }

    /// Reject values no component can run with.
    pub fn validate(&self) -> PedResult<()> {
        if self.worker_count == Some(0) {
            return Err(PedError::Config("worker_count must be at least 1".into()));
        }
        if let IndexKind::CellGrid { cell_size } = self.index {
            if cell_size == 0 || cell_size > i32::MAX as u32 {
                return Err(PedError::Config(format!(
                    "grid cell size {cell_size} out of range 1..={}",
                    i32::MAX
                )));
            }
        }
        Ok(())
    }
}
