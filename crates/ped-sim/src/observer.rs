//! Hooks for progress reporting and data collection.

use ped_agent::Agent;
use ped_core::Tick;

use crate::StepStats;

/// Callbacks invoked by [`Model::run`][crate::Model::run] and
/// [`Model::run_ticks`][crate::Model::run_ticks] around every step.
///
/// Every method has a no-op default so implementors only override what they
/// care about.
///
/// # Example
///
/// ```rust,ignore
/// struct BlockedCounter(usize);
///
/// impl SimObserver for BlockedCounter {
///     fn on_tick_end(&mut self, _tick: Tick, stats: &StepStats) {
///         self.0 += stats.blocked;
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called before the step for `tick` does anything.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once the step for `tick` has committed every agent.
    fn on_tick_end(&mut self, _tick: Tick, _stats: &StepStats) {}

    /// Called every `config.output_interval_ticks` ticks, after
    /// `on_tick_end`, with the committed positions.
    fn on_snapshot(&mut self, _tick: Tick, _agents: &[Agent]) {}

    /// Called once after the final tick of [`Model::run`][crate::Model::run].
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
