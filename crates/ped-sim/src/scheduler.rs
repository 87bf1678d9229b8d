//! Compute-phase scheduler.
//!
//! The scheduler applies [`run_kernel`] to every agent under the selected
//! [`Strategy`].  Because the kernel only touches its own agent, every
//! strategy is a different way of splitting one `&mut [Agent]` into disjoint
//! pieces; the borrow checker proves no worker sees another's writes.
//!
//! The rayon pool is built once, sized by configuration, and reused for every
//! pass.  `Serial` never enters it.

use std::sync::Arc;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use ped_agent::{Agent, Pass, Waypoint, run_kernel};
use ped_core::Strategy;

use crate::{SimError, SimResult};

// ── OffloadDevice ─────────────────────────────────────────────────────────────

/// An accelerator backend that runs a whole pass outside the host pool.
///
/// The scheduler treats it as opaque.  An implementation must leave every
/// agent exactly as [`run_kernel`] would, so results stay identical to the
/// host strategies.
pub trait OffloadDevice: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Apply `pass` to every agent in `agents`.
    fn run_pass(&self, agents: &mut [Agent], waypoints: &[Waypoint], pass: Pass);
}

// ── Scheduler ─────────────────────────────────────────────────────────────────

/// The active strategy, carrying the device when it needs one.
enum Backend {
    Serial,
    DataBatch,
    WorkShare,
    Offload(Arc<dyn OffloadDevice>),
}

impl Backend {
    fn select(strategy: Strategy, device: Option<&Arc<dyn OffloadDevice>>) -> SimResult<Self> {
        Ok(match strategy {
            Strategy::Serial    => Backend::Serial,
            Strategy::DataBatch => Backend::DataBatch,
            Strategy::WorkShare => Backend::WorkShare,
            Strategy::Offload   => Backend::Offload(device.cloned().ok_or(SimError::NoOffloadDevice)?),
        })
    }

    fn strategy(&self) -> Strategy {
        match self {
            Backend::Serial     => Strategy::Serial,
            Backend::DataBatch  => Strategy::DataBatch,
            Backend::WorkShare  => Strategy::WorkShare,
            Backend::Offload(_) => Strategy::Offload,
        }
    }
}

/// Owns the worker pool and the active strategy.
pub struct Scheduler {
    backend: Backend,
    workers: usize,
    pool:    ThreadPool,
    device:  Option<Arc<dyn OffloadDevice>>,
}

impl Scheduler {
    /// Build a pool of `workers` threads and select `strategy`.
    pub fn new(
        strategy: Strategy,
        workers:  usize,
        device:   Option<Arc<dyn OffloadDevice>>,
    ) -> SimResult<Self> {
        if workers == 0 {
            return Err(SimError::Config("worker count must be at least 1".into()));
        }
        let backend = Backend::select(strategy, device.as_ref())?;
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("ped-worker-{i}"))
            .build()?;
        Ok(Self { backend, workers, pool, device })
    }

    #[inline]
    pub fn strategy(&self) -> Strategy {
        self.backend.strategy()
    }

    /// Size of the worker pool.
    #[inline]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Name of the attached offload device, if any.
    pub fn offload_name(&self) -> Option<&str> {
        self.device.as_deref().map(|d| d.name())
    }

    /// Switch strategy for subsequent passes.  The pool is kept.
    pub fn set_strategy(&mut self, strategy: Strategy) -> SimResult<()> {
        self.backend = Backend::select(strategy, self.device.as_ref())?;
        Ok(())
    }

    /// Apply `pass` to every agent.  Returns once all workers are done.
    pub fn run(&self, agents: &mut [Agent], waypoints: &[Waypoint], pass: Pass) {
        match &self.backend {
            Backend::Serial => {
                for agent in agents.iter_mut() {
                    run_kernel(agent, waypoints, pass);
                }
            }

            // One contiguous chunk per worker, fixed up front.
            Backend::DataBatch => {
                let chunk = batch_len(agents.len(), self.workers);
                self.pool.install(|| {
                    agents.par_chunks_mut(chunk).for_each(|batch| {
                        for agent in batch {
                            run_kernel(agent, waypoints, pass);
                        }
                    });
                });
            }

            // Rayon splits adaptively and idle workers steal the rest.
            Backend::WorkShare => {
                self.pool.install(|| {
                    agents
                        .par_iter_mut()
                        .for_each(|agent| run_kernel(agent, waypoints, pass));
                });
            }

            Backend::Offload(device) => device.run_pass(agents, waypoints, pass),
        }
    }
}

/// Agents per static batch so that `workers` batches cover `len` agents.
#[inline]
pub(crate) fn batch_len(len: usize, workers: usize) -> usize {
    len.div_ceil(workers.max(1)).max(1)
}
