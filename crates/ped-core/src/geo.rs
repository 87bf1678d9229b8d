//! Integer grid coordinates.
//!
//! Agents live on an unbounded 2D lattice of `i32` cells.  Every distance
//! used by the simulator is the Chebyshev (king-move) metric, so "within
//! distance `d`" means inside the square of half-width `d`.  Arithmetic that
//! can leave the `i32` range saturates at the edge of the grid, except
//! [`GridPos::checked_offset`], which reports it.

use std::fmt;

/// One cell of the simulation grid.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance, i.e. the number of king moves between two cells.
    #[inline]
    pub fn chebyshev(self, other: GridPos) -> u64 {
        let dx = (self.x as i64 - other.x as i64).unsigned_abs();
        let dy = (self.y as i64 - other.y as i64).unsigned_abs();
        dx.max(dy)
    }

    /// `true` if `self` lies in the square of half-width `dist` around `center`.
    #[inline]
    pub fn within(self, center: GridPos, dist: u32) -> bool {
        self.chebyshev(center) <= dist as u64
    }

    /// Displacement `other - self` as `(dx, dy)`, saturated to `i32`.
    #[inline]
    pub fn delta_to(self, other: GridPos) -> (i32, i32) {
        (
            clamp_i32(other.x as i64 - self.x as i64),
            clamp_i32(other.y as i64 - self.y as i64),
        )
    }

    /// The cell `(x + dx, y + dy)`, saturated at the edge of the grid.
    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> GridPos {
        GridPos::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }

    /// The cell `(x + dx, y + dy)`, or `None` if it lies outside the grid.
    #[inline]
    pub fn checked_offset(self, dx: i32, dy: i32) -> Option<GridPos> {
        Some(GridPos::new(self.x.checked_add(dx)?, self.y.checked_add(dy)?))
    }

    /// Inclusive corners `(min, max)` of the query square around `self`,
    /// clamped to the `i32` range so huge radii never overflow.
    pub fn square(self, dist: u32) -> (GridPos, GridPos) {
        let d = dist as i64;
        (
            GridPos::new(clamp_i32(self.x as i64 - d), clamp_i32(self.y as i64 - d)),
            GridPos::new(clamp_i32(self.x as i64 + d), clamp_i32(self.y as i64 + d)),
        )
    }
}

#[inline]
fn clamp_i32(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

impl From<(i32, i32)> for GridPos {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        GridPos::new(x, y)
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
