//! Unit tests for ped-spatial.
//!
//! Every index is checked against `BruteForceIndex`, which is itself checked
//! against the Chebyshev predicate directly.

#[cfg(test)]
mod helpers {
    use ped_core::{AgentId, GridPos, IndexKind};

    use crate::{NeighborIndex, make_index};

    pub const KINDS: [IndexKind; 5] = [
        IndexKind::BruteForce,
        IndexKind::CellGrid { cell_size: 1 },
        IndexKind::CellGrid { cell_size: 3 },
        IndexKind::CellGrid { cell_size: 64 },
        IndexKind::RTree,
    ];

    /// Small fixed placement spanning negative and positive coordinates.
    pub fn placement() -> Vec<GridPos> {
        vec![
            GridPos::new(0, 0),
            GridPos::new(1, 1),
            GridPos::new(2, -2),
            GridPos::new(-3, 0),
            GridPos::new(5, 5),
            GridPos::new(-7, -7),
            GridPos::new(10, 0),
            GridPos::new(0, -10),
            GridPos::new(3, 4),
        ]
    }

    pub fn built(kind: IndexKind, positions: &[GridPos]) -> Box<dyn NeighborIndex> {
        let mut index = make_index(kind).unwrap();
        index.rebuild(positions);
        index
    }

    /// The definition, evaluated directly.
    pub fn expected(positions: &[GridPos], center: GridPos, dist: u32) -> Vec<AgentId> {
        positions
            .iter()
            .enumerate()
            .filter(|(_, p)| p.chebyshev(center) <= dist as u64)
            .map(|(i, _)| AgentId(i as u32))
            .collect()
    }
}

// ── Query correctness on a fixed placement ────────────────────────────────────

#[cfg(test)]
mod query {
    use ped_core::{AgentId, GridPos, IndexKind};

    use super::helpers::{KINDS, built, expected, placement};
    use crate::NeighborIndex;

    #[test]
    fn all_kinds_match_definition() {
        let positions = placement();
        let centers = [
            GridPos::new(0, 0),
            GridPos::new(2, 2),
            GridPos::new(-5, -5),
            GridPos::new(100, 100),
            GridPos::new(-1, 3),
        ];
        for kind in KINDS {
            let index = built(kind, &positions);
            for center in centers {
                for dist in [0, 1, 2, 3, 7, 15] {
                    assert_eq!(
                        index.query(center, dist),
                        expected(&positions, center, dist),
                        "{kind} center {center} dist {dist}",
                    );
                }
            }
        }
    }

    #[test]
    fn radius_two_around_origin() {
        let index = built(IndexKind::CellGrid { cell_size: 2 }, &placement());
        // (0,0), (1,1), (2,-2) are within 2; (-3,0) is 3 away.
        assert_eq!(index.query(GridPos::new(0, 0), 2), vec![AgentId(0), AgentId(1), AgentId(2)]);
    }

    #[test]
    fn huge_distance_returns_everyone() {
        let positions = placement();
        for kind in KINDS {
            let index = built(kind, &positions);
            let all = index.query(GridPos::new(0, 0), u32::MAX);
            assert_eq!(all.len(), positions.len(), "{kind}");
        }
    }

    #[test]
    fn huge_distance_from_far_corner() {
        let positions = vec![GridPos::new(i32::MIN, i32::MIN), GridPos::new(i32::MAX, i32::MAX)];
        for kind in KINDS {
            let index = built(kind, &positions);
            assert_eq!(index.query(GridPos::new(i32::MAX, 0), u32::MAX).len(), 2, "{kind}");
        }
    }

    #[test]
    fn caller_is_not_excluded() {
        for kind in KINDS {
            let index = built(kind, &[GridPos::new(4, 4)]);
            assert_eq!(index.query(GridPos::new(4, 4), 0), vec![AgentId(0)], "{kind}");
        }
    }

    #[test]
    fn colocated_agents_both_reported() {
        let positions = [GridPos::new(1, 1), GridPos::new(1, 1)];
        for kind in KINDS {
            let index = built(kind, &positions);
            assert_eq!(index.query(GridPos::new(1, 1), 0), vec![AgentId(0), AgentId(1)], "{kind}");
        }
    }

    #[test]
    fn empty_index() {
        for kind in KINDS {
            let index = built(kind, &[]);
            assert!(index.is_empty());
            assert!(index.query(GridPos::new(0, 0), 1_000).is_empty());
        }
    }
}

// ── Incremental maintenance ───────────────────────────────────────────────────

#[cfg(test)]
mod relocate {
    use ped_core::{AgentId, GridPos, IndexKind};

    use super::helpers::{KINDS, built, expected, placement};
    use crate::{CellGridIndex, NeighborIndex};

    #[test]
    fn relocation_is_visible_to_next_query() {
        for kind in KINDS {
            let mut index = built(kind, &placement());
            index.relocate(AgentId(4), GridPos::new(0, 1));
            assert_eq!(index.position(AgentId(4)), GridPos::new(0, 1));
            assert!(index.query(GridPos::new(0, 0), 1).contains(&AgentId(4)), "{kind}");
            assert!(index.query(GridPos::new(5, 5), 1).is_empty(), "{kind}");
        }
    }

    #[test]
    fn walk_matches_fresh_rebuild() {
        // March every agent diagonally for a while; the incrementally
        // maintained index must agree with one rebuilt from scratch.
        for kind in KINDS {
            let mut positions = placement();
            let mut index = built(kind, &positions);
            for step in 0..25 {
                for (i, p) in positions.iter_mut().enumerate() {
                    let dx = if i % 2 == 0 { 1 } else { -1 };
                    let dy = if step % 3 == 0 { 1 } else { 0 };
                    *p = p.offset(dx, dy);
                    index.relocate(AgentId(i as u32), *p);
                }
                let fresh = built(kind, &positions);
                for center in [GridPos::new(0, 0), positions[0], positions[3]] {
                    assert_eq!(index.query(center, 4), fresh.query(center, 4), "{kind} step {step}");
                    assert_eq!(index.query(center, 4), expected(&positions, center, 4));
                }
            }
        }
    }

    #[test]
    fn relocate_to_same_cell_is_noop() {
        for kind in KINDS {
            let mut index = built(kind, &placement());
            index.relocate(AgentId(0), GridPos::new(0, 0));
            assert_eq!(index.query(GridPos::new(0, 0), 0), vec![AgentId(0)], "{kind}");
        }
    }

    #[test]
    fn grid_drops_empty_buckets() {
        let mut grid = CellGridIndex::new(4).unwrap();
        grid.rebuild(&[GridPos::new(0, 0), GridPos::new(1, 1)]);
        assert_eq!(grid.bucket_count(), 1);
        grid.relocate(AgentId(0), GridPos::new(-1, 0));
        assert_eq!(grid.bucket_count(), 2);
        grid.relocate(AgentId(1), GridPos::new(-2, 2));
        assert_eq!(grid.bucket_count(), 1, "bucket (0,0) emptied");
    }

    #[test]
    fn grid_buckets_negative_coordinates_by_floor() {
        let mut grid = CellGridIndex::new(4).unwrap();
        grid.rebuild(&[GridPos::new(-1, -1), GridPos::new(0, 0)]);
        // -1 div_euclid 4 = -1, so the two agents land in different buckets.
        assert_eq!(grid.bucket_count(), 2);
        assert_eq!(grid.query(GridPos::new(0, 0), 1), vec![AgentId(0), AgentId(1)]);
    }

    #[test]
    fn rebuild_discards_previous_state() {
        for kind in [IndexKind::BruteForce, IndexKind::CellGrid { cell_size: 2 }, IndexKind::RTree] {
            let mut index = built(kind, &placement());
            index.rebuild(&[GridPos::new(50, 50)]);
            assert_eq!(index.len(), 1);
            assert!(index.query(GridPos::new(0, 0), 20).is_empty());
            assert_eq!(index.query(GridPos::new(50, 50), 0), vec![AgentId(0)]);
        }
    }

    #[test]
    #[should_panic]
    fn unknown_agent_panics() {
        let mut index = built(IndexKind::RTree, &placement());
        index.relocate(AgentId(999), GridPos::new(0, 0));
    }
}

// ── Construction ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod construction {
    use ped_core::IndexKind;

    use crate::{CellGridIndex, SpatialError, make_index};

    #[test]
    fn zero_cell_size_rejected() {
        assert!(matches!(
            CellGridIndex::new(0),
            Err(SpatialError::InvalidCellSize { got: 0, .. })
        ));
        assert!(make_index(IndexKind::CellGrid { cell_size: 0 }).is_err());
    }

    #[test]
    fn oversized_cell_rejected() {
        assert!(CellGridIndex::new(u32::MAX).is_err());
        assert!(CellGridIndex::new(i32::MAX as u32).is_ok());
    }

    #[test]
    fn names() {
        assert_eq!(make_index(IndexKind::BruteForce).unwrap().name(), "brute");
        assert_eq!(make_index(IndexKind::default()).unwrap().name(), "grid");
        assert_eq!(make_index(IndexKind::RTree).unwrap().name(), "rtree");
    }
}

// ── Property: every index agrees with brute force ─────────────────────────────

#[cfg(test)]
mod agreement {
    use proptest::prelude::*;

    use ped_core::{AgentId, GridPos};

    use super::helpers::{KINDS, built, expected};

    fn arb_positions() -> impl Strategy<Value = Vec<GridPos>> {
        prop::collection::vec((-40i32..40, -40i32..40).prop_map(GridPos::from), 0..60)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_queries_match_definition(
            positions in arb_positions(),
            cx in -50i32..50,
            cy in -50i32..50,
            dist in 0u32..30,
        ) {
            let center = GridPos::new(cx, cy);
            let want = expected(&positions, center, dist);
            for kind in KINDS {
                let index = built(kind, &positions);
                prop_assert_eq!(index.query(center, dist), want.clone(), "{}", kind);
            }
        }

        #[test]
        fn prop_relocations_keep_indices_in_sync(
            positions in arb_positions(),
            moves in prop::collection::vec((0usize..60, -3i32..=3, -3i32..=3), 0..80),
        ) {
            let mut truth = positions.clone();
            let mut indices: Vec<_> = KINDS.iter().map(|&k| built(k, &positions)).collect();
            for (slot, dx, dy) in moves {
                if truth.is_empty() {
                    break;
                }
                let i = slot % truth.len();
                truth[i] = truth[i].offset(dx, dy);
                for index in indices.iter_mut() {
                    index.relocate(AgentId(i as u32), truth[i]);
                }
            }
            for index in &indices {
                for center in [GridPos::new(0, 0), GridPos::new(-20, 15)] {
                    prop_assert_eq!(index.query(center, 6), expected(&truth, center, 6), "{}", index.name());
                }
            }
        }
    }
}
