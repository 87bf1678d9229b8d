//! Corridor layout: a `length × width` strip with a spawn zone at each end.
//!
//! Eastbound walkers start in the west zone and patrol between the far east
//! and far west ends; westbound walkers do the reverse.  Both streams share
//! the same two waypoints, so they meet head-on in the middle.

use anyhow::{Result, bail};

use ped_agent::{Agent, PopulationBuilder, Route, Waypoint};
use ped_core::{GridPos, SimRng};

/// Fraction of the corridor length each spawn zone covers.
const ZONE_FRACTION: i32 = 4;

pub struct Corridor {
    pub length: i32,
    pub width:  i32,
}

impl Corridor {
    fn zone_len(&self) -> i32 {
        (self.length / ZONE_FRACTION).max(1)
    }

    /// Distinct cells of the zone starting at column `x0`, shuffled.
    fn zone_cells(&self, x0: i32, rng: &mut SimRng) -> Vec<GridPos> {
        let mut cells: Vec<GridPos> = (x0..x0 + self.zone_len())
            .flat_map(|x| (0..self.width).map(move |y| GridPos::new(x, y)))
            .collect();
        rng.shuffle(&mut cells);
        cells
    }

    /// Place `agents` walkers, half per stream, on distinct cells.
    pub fn populate(&self, agents: usize, seed: u64) -> Result<(Vec<Agent>, Vec<Waypoint>)> {
        if self.length < 2 || self.width < 1 {
            bail!("corridor {}x{} is too small", self.length, self.width);
        }
        let capacity = (self.zone_len() * self.width) as usize;
        let west_count = agents.div_ceil(2);
        if west_count > capacity {
            bail!("{agents} agents do not fit two spawn zones of {capacity} cells");
        }

        let mut rng = SimRng::new(seed);
        let mut west_rng = rng.child(0);
        let mut east_rng = rng.child(1);

        let mid = (self.width - 1) as f64 / 2.0;
        let half_width = self.width as f64 / 2.0;
        let mut pop = PopulationBuilder::with_capacity(agents);
        let east_end = pop.waypoint((self.length - 1) as f64, mid, half_width);
        let west_end = pop.waypoint(0.0, mid, half_width);

        let west_zone = self.zone_cells(0, &mut west_rng);
        let east_zone = self.zone_cells(self.length - self.zone_len(), &mut east_rng);

        // Interleave the streams so ids alternate direction; the lower id
        // wins contested cells and neither stream gets every tie.
        let mut west = west_zone.into_iter();
        let mut east = east_zone.into_iter();
        for i in 0..agents {
            let (cell, route) = if i % 2 == 0 {
                (west.next(), Route::looping([east_end, west_end]))
            } else {
                (east.next(), Route::looping([west_end, east_end]))
            };
            match cell {
                Some(cell) => pop.agent(cell, route),
                None => bail!("spawn zone exhausted after {i} agents"),
            };
        }
        Ok(pop.build())
    }
}
