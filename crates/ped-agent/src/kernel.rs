//! The per-agent desired-position kernel.
//!
//! Every function here touches exactly one `Agent` mutably and the waypoint
//! arena immutably.  No other agent is read, which is what makes the compute
//! phase safe to run on any number of threads in any order.

use ped_core::GridPos;

use crate::{Agent, Waypoint};

/// What a scheduler pass does with each agent.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Pass {
    /// Compute `desired` only; positions are committed later by collision
    /// resolution.
    Plan,
    /// Compute `desired` and copy it straight into `position`.
    PlanAndCommit,
}

/// Apply one pass to one agent.
#[inline]
pub fn run_kernel(agent: &mut Agent, waypoints: &[Waypoint], pass: Pass) {
    compute_desired(agent, waypoints);
    if pass == Pass::PlanAndCommit {
        agent.commit_desired();
    }
}

/// Advance the agent's goal if it has arrived, then write the cell one step
/// toward the goal into `agent.desired`.
///
/// With no goal left, `desired == position`.
///
/// # Panics
/// Panics if the agent refers to a waypoint id outside `waypoints`.  The
/// model builder rejects such agents, so reaching this is a programmer error.
pub fn compute_desired(agent: &mut Agent, waypoints: &[Waypoint]) {
    let arrived = match agent.destination {
        None     => true,
        Some(id) => waypoints[id.index()].reached_by(agent.position),
    };
    if arrived {
        // A drained one-way route yields `None` here and the agent stops.
        agent.destination = agent.route.advance(agent.destination);
    }

    agent.desired = match agent.destination {
        None     => agent.position,
        Some(id) => step_toward(agent.position, &waypoints[id.index()]),
    };
}

/// The neighboring cell on the straight line from `from` to `target`.
///
/// Each component of the normalized direction is rounded half away from
/// zero, so the step is one of the 8 king moves.  At least one component of
/// a unit vector is ≥ 1/√2, so the agent never stalls while `len > 0`.
/// A step past the edge of the grid is clamped onto it.
fn step_toward(from: GridPos, target: &Waypoint) -> GridPos {
    let (dx, dy, len) = target.offset_from(from);
    if len == 0.0 {
        return from;
    }
    from.offset((dx / len).round() as i32, (dy / len).round() as i32)
}
