//! Unit tests for ped-agent.

#[cfg(test)]
mod helpers {
    use ped_core::GridPos;

    use crate::{Agent, PopulationBuilder, Route, Waypoint};

    /// One agent at `start` with a route over `targets` (x, y, r).
    pub fn single(
        start:   GridPos,
        targets: &[(f64, f64, f64)],
        looping: bool,
    ) -> (Agent, Vec<Waypoint>) {
        let mut b = PopulationBuilder::new();
        let ids: Vec<_> = targets.iter().map(|&(x, y, r)| b.waypoint(x, y, r)).collect();
        let route = if looping { Route::looping(ids) } else { Route::one_way(ids) };
        b.agent(start, route);
        let (mut agents, waypoints) = b.build();
        (agents.remove(0), waypoints)
    }
}

// ── Waypoint ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod waypoint {
    use ped_core::{GridPos, WaypointId};

    use crate::Waypoint;

    #[test]
    fn arrival_radius_is_strict() {
        let wp = Waypoint::new(WaypointId(0), 3.0, 4.0, 5.0);
        assert!(!wp.reached_by(GridPos::new(0, 0)), "distance 5 is not < 5");
        assert!(wp.reached_by(GridPos::new(1, 1)));
    }

    #[test]
    fn offset_length_is_euclidean() {
        let wp = Waypoint::new(WaypointId(0), 3.0, 4.0, 1.0);
        let (dx, dy, len) = wp.offset_from(GridPos::new(0, 0));
        assert_eq!((dx, dy), (3.0, 4.0));
        assert!((len - 5.0).abs() < 1e-12);
    }
}

// ── Route ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod route {
    use ped_core::WaypointId;

    use crate::Route;

    #[test]
    fn one_way_drains() {
        let mut r = Route::one_way([WaypointId(0), WaypointId(1)]);
        assert_eq!(r.advance(None), Some(WaypointId(0)));
        assert_eq!(r.advance(Some(WaypointId(0))), Some(WaypointId(1)));
        assert_eq!(r.advance(Some(WaypointId(1))), None);
        assert!(r.is_empty());
    }

    #[test]
    fn looping_recycles_reached_waypoint() {
        let mut r = Route::looping([WaypointId(0), WaypointId(1)]);
        assert_eq!(r.advance(None), Some(WaypointId(0)));
        assert_eq!(r.advance(Some(WaypointId(0))), Some(WaypointId(1)));
        assert_eq!(r.advance(Some(WaypointId(1))), Some(WaypointId(0)));
        assert_eq!(r.len(), 1);
    }

    #[test]
    fn first_advance_does_not_requeue_nothing() {
        let mut r = Route::looping([WaypointId(4)]);
        assert_eq!(r.advance(None), Some(WaypointId(4)));
        assert!(r.is_empty());
        assert_eq!(r.advance(Some(WaypointId(4))), Some(WaypointId(4)));
    }
}

// ── Kernel ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod kernel {
    use ped_core::{GridPos, WaypointId};

    use super::helpers::single;
    use crate::{Pass, compute_desired, run_kernel};

    #[test]
    fn straight_step_east() {
        let (mut a, wps) = single(GridPos::new(0, 0), &[(10.0, 0.0, 1.0)], false);
        compute_desired(&mut a, &wps);
        assert_eq!(a.destination(), Some(WaypointId(0)));
        assert_eq!(a.desired, GridPos::new(1, 0));
        assert_eq!(a.position, GridPos::new(0, 0), "compute must not move the agent");
    }

    #[test]
    fn diagonal_step() {
        let (mut a, wps) = single(GridPos::new(0, 0), &[(-5.0, 5.0, 1.0)], false);
        compute_desired(&mut a, &wps);
        assert_eq!(a.desired, GridPos::new(-1, 1));
    }

    #[test]
    fn shallow_angle_rounds_to_axis() {
        // 3/sqrt(109) ≈ 0.287 rounds to 0.
        let (mut a, wps) = single(GridPos::new(0, 0), &[(10.0, 3.0, 1.0)], false);
        compute_desired(&mut a, &wps);
        assert_eq!(a.desired, GridPos::new(1, 0));
    }

    #[test]
    fn every_step_is_one_king_move() {
        for (tx, ty) in [(7.0, 1.0), (-3.0, -9.0), (0.5, 0.4), (-100.0, 37.0), (2.0, -2.0)] {
            let (mut a, wps) = single(GridPos::new(0, 0), &[(tx, ty, 0.1)], false);
            compute_desired(&mut a, &wps);
            assert_eq!(a.desired.chebyshev(a.position), 1, "target ({tx}, {ty})");
        }
    }

    #[test]
    fn step_past_grid_edge_is_clamped() {
        let (mut a, wps) = single(GridPos::new(i32::MAX, 0), &[(3e9, 0.0, 1.0)], false);
        compute_desired(&mut a, &wps);
        assert_eq!(a.desired, GridPos::new(i32::MAX, 0));

        let (mut a, wps) = single(GridPos::new(0, i32::MIN), &[(-5.0, -3e9, 1.0)], false);
        compute_desired(&mut a, &wps);
        assert_eq!(a.desired, GridPos::new(0, i32::MIN));
    }

    #[test]
    fn standing_on_target_center_stays() {
        let (mut a, wps) = single(GridPos::new(4, 4), &[(4.0, 4.0, 0.0)], false);
        compute_desired(&mut a, &wps);
        assert_eq!(a.desired, a.position);
    }

    #[test]
    fn no_route_stays_put() {
        let (mut a, wps) = single(GridPos::new(2, 3), &[], false);
        compute_desired(&mut a, &wps);
        assert_eq!(a.desired, GridPos::new(2, 3));
        assert!(a.is_finished());
    }

    #[test]
    fn arrival_switches_to_next_waypoint() {
        let (mut a, wps) =
            single(GridPos::new(0, 0), &[(3.0, 0.0, 1.5), (3.0, 5.0, 1.0)], false);
        for _ in 0..3 {
            run_kernel(&mut a, &wps, Pass::PlanAndCommit);
        }
        // (0,0) → (1,0) → (2,0); at (2,0) the first waypoint is within 1.5.
        assert_eq!(a.destination(), Some(WaypointId(1)));
        assert_eq!(a.position, GridPos::new(2, 1));
    }

    #[test]
    fn one_way_route_finishes_and_stops() {
        let (mut a, wps) = single(GridPos::new(0, 0), &[(5.0, 0.0, 1.0)], false);
        for _ in 0..20 {
            run_kernel(&mut a, &wps, Pass::PlanAndCommit);
        }
        assert!(a.is_finished());
        let parked = a.position;
        assert_eq!(parked, GridPos::new(5, 0));
        run_kernel(&mut a, &wps, Pass::PlanAndCommit);
        assert_eq!(a.position, parked);
    }

    #[test]
    fn looping_route_keeps_patrolling() {
        let (mut a, wps) =
            single(GridPos::new(0, 0), &[(4.0, 0.0, 1.0), (0.0, 0.0, 1.0)], true);
        let mut visited_far_end = false;
        let mut returned = false;
        for _ in 0..30 {
            run_kernel(&mut a, &wps, Pass::PlanAndCommit);
            if a.position == GridPos::new(4, 0) {
                visited_far_end = true;
            }
            if visited_far_end && a.position == GridPos::new(0, 0) {
                returned = true;
            }
        }
        assert!(visited_far_end && returned);
        assert!(!a.is_finished());
    }

    #[test]
    fn plan_pass_leaves_position() {
        let (mut a, wps) = single(GridPos::new(0, 0), &[(0.0, 9.0, 1.0)], false);
        run_kernel(&mut a, &wps, Pass::Plan);
        assert_eq!(a.position, GridPos::new(0, 0));
        assert_eq!(a.desired, GridPos::new(0, 1));
    }

    #[test]
    fn desired_recomputed_from_current_position() {
        let (mut a, wps) = single(GridPos::new(0, 0), &[(0.0, 9.0, 1.0)], false);
        run_kernel(&mut a, &wps, Pass::Plan);
        run_kernel(&mut a, &wps, Pass::Plan);
        // Never committed, so the second plan is the same step again.
        assert_eq!(a.desired, GridPos::new(0, 1));
    }

    #[test]
    #[should_panic]
    fn dangling_waypoint_panics() {
        let (mut a, _) = single(GridPos::new(0, 0), &[(1.0, 1.0, 1.0)], false);
        compute_desired(&mut a, &[]);
    }
}

// ── PopulationBuilder ─────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use ped_core::{AgentId, GridPos, WaypointId};

    use crate::{PopulationBuilder, Route};

    #[test]
    fn ids_are_dense_and_match_indices() {
        let mut b = PopulationBuilder::with_capacity(3);
        let w0 = b.waypoint(0.0, 0.0, 1.0);
        let w1 = b.waypoint(9.0, 9.0, 1.0);
        assert_eq!((w0, w1), (WaypointId(0), WaypointId(1)));
        for i in 0..3 {
            assert_eq!(b.agent(GridPos::new(i, 0), Route::one_way([w1])), AgentId(i as u32));
        }
        assert_eq!(b.agent_count(), 3);

        let (agents, waypoints) = b.build();
        for (i, a) in agents.iter().enumerate() {
            assert_eq!(a.id.index(), i);
            assert_eq!(a.desired, a.position, "desired starts at position");
        }
        for (i, w) in waypoints.iter().enumerate() {
            assert_eq!(w.id.index(), i);
        }
    }

    #[test]
    fn waypoint_refs_lists_destination_then_queue() {
        let mut b = PopulationBuilder::new();
        let w0 = b.waypoint(1.0, 0.0, 0.5);
        let w1 = b.waypoint(2.0, 0.0, 0.5);
        b.agent(GridPos::new(0, 0), Route::one_way([w0, w1]));
        let (mut agents, waypoints) = b.build();
        assert_eq!(agents[0].waypoint_refs().collect::<Vec<_>>(), vec![w0, w1]);

        crate::compute_desired(&mut agents[0], &waypoints);
        assert_eq!(agents[0].destination(), Some(w0));
        assert_eq!(agents[0].waypoint_refs().collect::<Vec<_>>(), vec![w0, w1]);
    }
}
