//! Initial placement of racks, boxes, and robots.
//!
//! Random scenes use rejection sampling: draw `y` then `x` uniformly, keep the
//! cell only if it is still empty, otherwise draw again.  Racks go down first,
//! then boxes, then robots, so each phase avoids what the earlier ones took.
//! There is no retry limit; callers validate counts against the grid area
//! first so every phase is guaranteed a free cell.

use std::collections::HashSet;

use wh_core::{Cell, Coord, Grid, RobotId, SimRng, WhError, WhResult};

use crate::Robot;

// ── Random scenes ─────────────────────────────────────────────────────────────

/// Place `count` copies of `cell` on distinct empty cells.
pub(crate) fn scatter(grid: &mut Grid, rng: &mut SimRng, count: u32, cell: Cell) {
    for _ in 0..count {
        let at = sample_empty(grid, rng);
        grid.set(at, cell);
    }
}

/// Place `count` robots, ids assigned in placement order.
pub(crate) fn deploy(grid: &mut Grid, rng: &mut SimRng, count: u32) -> Vec<Robot> {
    (0..count)
        .map(|id| {
            let at = sample_empty(grid, rng);
            grid.set(at, Cell::Robot);
            Robot::new(RobotId(id), at)
        })
        .collect()
}

fn sample_empty(grid: &Grid, rng: &mut SimRng) -> Coord {
    loop {
        let y = rng.gen_range(0..grid.height());
        let x = rng.gen_range(0..grid.width());
        let at = Coord::new(x, y);
        if grid.get(at).is_empty() {
            return at;
        }
    }
}

// ── Scripted scenes ───────────────────────────────────────────────────────────

/// A hand-placed scene, used instead of random placement when the exact
/// starting floor matters (scripted scenarios, regression traces).
///
/// Racks start empty.  Robots are numbered in list order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Layout {
    pub racks:  Vec<Coord>,
    pub boxes:  Vec<Coord>,
    pub robots: Vec<Coord>,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rack(mut self, at: impl Into<Coord>) -> Self {
        self.racks.push(at.into());
        self
    }

    pub fn loose_box(mut self, at: impl Into<Coord>) -> Self {
        self.boxes.push(at.into());
        self
    }

    pub fn robot(mut self, at: impl Into<Coord>) -> Self {
        self.robots.push(at.into());
        self
    }

    /// Every coordinate must be on a `width × height` floor and used once.
    pub fn validate(&self, width: u32, height: u32) -> WhResult<()> {
        let mut seen = HashSet::new();
        for &at in self.racks.iter().chain(&self.boxes).chain(&self.robots) {
            if at.x >= width || at.y >= height {
                return Err(WhError::InvalidLayout(format!(
                    "{at} is outside the {width}x{height} grid"
                )));
            }
            if !seen.insert(at) {
                return Err(WhError::InvalidLayout(format!("{at} is used more than once")));
            }
        }
        Ok(())
    }

    /// Write the layout onto `grid` and return the roster.
    pub(crate) fn apply(&self, grid: &mut Grid) -> Vec<Robot> {
        for &at in &self.racks {
            grid.set(at, Cell::EMPTY_RACK);
        }
        for &at in &self.boxes {
            grid.set(at, Cell::Box);
        }
        (0u32..)
            .zip(&self.robots)
            .map(|(id, &at)| {
                grid.set(at, Cell::Robot);
                Robot::new(RobotId(id), at)
            })
            .collect()
    }
}
