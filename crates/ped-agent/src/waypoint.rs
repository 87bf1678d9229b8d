//! Destinations agents walk toward.

use ped_core::{GridPos, WaypointId};

/// A target point with an arrival radius.
///
/// Coordinates are continuous so a waypoint can sit between cells; agents
/// themselves always stand on integer cells.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Waypoint {
    pub id: WaypointId,
    pub x:  f64,
    pub y:  f64,
    /// Arrival radius.  An agent strictly closer than `r` has arrived.
    pub r:  f64,
}

impl Waypoint {
    pub fn new(id: WaypointId, x: f64, y: f64, r: f64) -> Self {
        Self { id, x, y, r }
    }

    /// Euclidean offset `(dx, dy)` and length from `pos` to this waypoint.
    #[inline]
    pub fn offset_from(&self, pos: GridPos) -> (f64, f64, f64) {
        let dx = self.x - pos.x as f64;
        let dy = self.y - pos.y as f64;
        (dx, dy, dx.hypot(dy))
    }

    /// `true` if an agent at `pos` is inside the arrival radius.
    #[inline]
    pub fn reached_by(&self, pos: GridPos) -> bool {
        self.offset_from(pos).2 < self.r
    }
}
