//! Collision resolution for one agent.
//!
//! Pure functions over cells: the model gathers occupancy from its neighbor
//! index and commits whatever [`resolve`] picks.  Every candidate is a king
//! move from the agent's current cell, so any agent that could block one
//! stands within [`NEIGHBOR_RADIUS`] of it.

use ped_core::GridPos;

/// Chebyshev radius of the occupancy query around the agent's current cell.
pub const NEIGHBOR_RADIUS: u32 = 2;

/// Outcome of resolving one agent.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Resolution {
    /// Desired cell equals the current one; nothing to resolve.
    Idle,
    /// Committed to `to`, which was candidate number `rank` (0 is the desired
    /// cell, 1 and 2 the alternatives).
    Moved { to: GridPos, rank: u8 },
    /// Every candidate was occupied; the agent stays put.
    Blocked,
}

/// The three cells tried for a move from `current` to `desired`, in order.
///
/// Straight moves try the desired cell, then the cells beside it on either
/// side of the direction of travel (the displacement rotated by ∓90°).
/// Diagonal moves try the desired cell, then its two axis-aligned shoulders
/// `(desired.x, current.y)` and `(current.x, desired.y)`.  An alternative
/// that would lie outside the `i32` grid is `None`.
pub fn candidates(current: GridPos, desired: GridPos) -> [Option<GridPos>; 3] {
    let (dx, dy) = current.delta_to(desired);
    let (first, second) = if dx == 0 || dy == 0 {
        (desired.checked_offset(-dy, -dx), desired.checked_offset(dy, dx))
    } else {
        (
            Some(GridPos::new(desired.x, current.y)),
            Some(GridPos::new(current.x, desired.y)),
        )
    };
    [Some(desired), first, second]
}

/// First candidate that exists and is not in `occupied`, with its rank.
pub fn choose(candidates: &[Option<GridPos>; 3], occupied: &[GridPos]) -> Option<(GridPos, u8)> {
    candidates
        .iter()
        .zip(0u8..)
        .find_map(|(c, rank)| c.filter(|c| !occupied.contains(c)).map(|c| (c, rank)))
}

/// Pick the final cell for an agent at `current` that wants `desired`, given
/// the cells already taken nearby.
pub fn resolve(current: GridPos, desired: GridPos, occupied: &[GridPos]) -> Resolution {
    if current == desired {
        return Resolution::Idle;
    }
    match choose(&candidates(current, desired), occupied) {
        Some((to, rank)) => Resolution::Moved { to, rank },
        None             => Resolution::Blocked,
    }
}
