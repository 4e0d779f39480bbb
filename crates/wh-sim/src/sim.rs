//! The `Sim` struct and its step driver.

use std::collections::HashSet;

use log::{debug, info, trace};
use wh_core::{Cell, Grid, GridSnapshot, RACK_CAPACITY, RobotId, SimRng, WarehouseConfig};

use crate::{Action, Robot, SimBuilder, SimError, SimObserver, SimResult};

// ── StepSummary ───────────────────────────────────────────────────────────────

/// What happened during one step, plus the running totals after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepSummary {
    /// Zero-based index of the step just taken.
    pub step:            u64,
    /// Robots that relocated this step.
    pub moves:           u32,
    pub pickups:         u32,
    pub drop_offs:       u32,
    /// Robots whose random step hit a wall or an occupied cell.
    pub blocked:         u32,
    /// Running total of relocations.
    pub moves_made:      u64,
    pub boxes_remaining: u32,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The warehouse simulation.
///
/// `Sim` exclusively owns the floor and the roster.  Robots are handed
/// `&mut Grid` one at a time during [`step`](Self::step), in roster order, so
/// a step is a strictly sequential pass in which every robot sees the writes
/// of the robots before it.
///
/// Create via [`Sim::new`] or [`SimBuilder`].
pub struct Sim {
    grid:            Grid,
    /// Fixed at construction, never reordered.  `robots[i].id() == RobotId(i)`.
    robots:          Vec<Robot>,
    rng:             SimRng,
    racks_needed:    u32,
    initial_loose:   u32,
    boxes_remaining: u32,
    boxes_racked:    u32,
    moves_made:      u64,
    steps_taken:     u64,
}

impl Sim {
    /// Validate `config` and lay out a random scene.
    pub fn new(config: WarehouseConfig) -> SimResult<Self> {
        SimBuilder::new(config).build()
    }

    pub(crate) fn from_scene(
        grid:          Grid,
        robots:        Vec<Robot>,
        rng:           SimRng,
        racks_needed:  u32,
        initial_loose: u32,
    ) -> Self {
        info!(
            "scene ready: {}x{} floor, {} racks, {} boxes, {} robots",
            grid.width(),
            grid.height(),
            racks_needed,
            initial_loose,
            robots.len(),
        );
        Self {
            grid,
            robots,
            rng,
            racks_needed,
            initial_loose,
            boxes_remaining: initial_loose,
            boxes_racked: 0,
            moves_made: 0,
            steps_taken: 0,
        }
    }

    // ── Stepping ──────────────────────────────────────────────────────────

    /// Advance one step without observer callbacks.
    pub fn step(&mut self) -> StepSummary {
        self.step_with(&mut crate::NoopObserver)
    }

    /// Advance one step: every robot acts once, in roster order.
    ///
    /// `observer.on_snapshot` sees the floor as it was before the step;
    /// `observer.on_step_end` sees the summary after it.
    pub fn step_with<O: SimObserver>(&mut self, observer: &mut O) -> StepSummary {
        let step = self.steps_taken;
        observer.on_snapshot(step, &self.grid);

        let mut summary = StepSummary { step, ..StepSummary::default() };
        for robot in &mut self.robots {
            match robot.act(&mut self.grid, &mut self.rng) {
                Action::Moved { from, to } => {
                    trace!("step {step}: {} moved {from} -> {to}", robot.id());
                    self.moves_made += 1;
                    summary.moves += 1;
                }
                Action::PickedUp { from } => {
                    debug!("step {step}: {} picked up box at {from}", robot.id());
                    summary.pickups += 1;
                }
                Action::Dropped { at, rack } => {
                    self.boxes_remaining = self.boxes_remaining.saturating_sub(1);
                    self.boxes_racked += 1;
                    summary.drop_offs += 1;
                    debug!(
                        "step {step}: {} stored box on rack {at} (code {}), {} left",
                        robot.id(),
                        rack.code(),
                        self.boxes_remaining,
                    );
                    if self.boxes_remaining == 0 {
                        info!("all boxes racked after {} steps", step + 1);
                    }
                }
                Action::Blocked { .. } => summary.blocked += 1,
            }
        }

        self.steps_taken += 1;
        summary.moves_made = self.moves_made;
        summary.boxes_remaining = self.boxes_remaining;
        observer.on_step_end(&summary);
        summary
    }

    /// Run exactly `n` steps.  Never stops early: deciding when the run is
    /// over belongs to the caller.
    pub fn run_steps<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.step_with(observer);
        }
    }

    /// Hand the final floor to `observer`.  Call once when the driver stops.
    pub fn finish<O: SimObserver>(&self, observer: &mut O) {
        observer.on_sim_end(self.steps_taken, &self.grid);
    }

    // ── Observable state ──────────────────────────────────────────────────

    /// `true` once every loose box has been racked.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.boxes_remaining == 0
    }

    /// Boxes not yet stored on a rack, including those being carried.
    #[inline]
    pub fn boxes_remaining(&self) -> u32 {
        self.boxes_remaining
    }

    #[inline]
    pub fn boxes_racked(&self) -> u32 {
        self.boxes_racked
    }

    /// Total relocations.  Pickups, drop-offs, and blocked moves do not count.
    #[inline]
    pub fn moves_made(&self) -> u64 {
        self.moves_made
    }

    /// Racks plus loose boxes at the start of the run.
    #[inline]
    pub fn total_boxes(&self) -> u32 {
        self.racks_needed + self.initial_loose
    }

    #[inline]
    pub fn racks_needed(&self) -> u32 {
        self.racks_needed
    }

    #[inline]
    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snapshot(&self) -> GridSnapshot {
        self.grid.snapshot()
    }

    /// The roster, in activation order.
    #[inline]
    pub fn robots(&self) -> &[Robot] {
        &self.robots
    }

    pub fn robot(&self, id: RobotId) -> Option<&Robot> {
        self.robots.get(id.index())
    }

    // ── Invariants ────────────────────────────────────────────────────────

    /// Cross-check the roster and counters against the floor.
    ///
    /// Verifies that robots stand on distinct cells each holding the robot
    /// marker and that no stray markers exist, that racks stay within
    /// capacity, and that every loose box is on the floor, in a robot's
    /// hands, or on a rack.
    pub fn check_invariants(&self) -> SimResult<()> {
        let violation = |msg: String| Err(SimError::InvariantViolated(msg));

        let mut occupied = HashSet::with_capacity(self.robots.len());
        for robot in &self.robots {
            let at = robot.position();
            let cell = self.grid.get(at);
            if cell != Cell::Robot {
                return violation(format!("{} at {at} but the cell reads {cell:?}", robot.id()));
            }
            if !occupied.insert(at) {
                return violation(format!("two robots share {at}"));
            }
        }
        let markers = self.grid.count(|c| c == Cell::Robot);
        if markers != self.robots.len() {
            return violation(format!("{markers} robot markers for {} robots", self.robots.len()));
        }

        let mut stored = 0u32;
        for (at, cell) in self.grid.iter() {
            if let Cell::Rack { stored: n } = cell {
                if n > RACK_CAPACITY {
                    return violation(format!("rack at {at} holds {n} boxes"));
                }
                stored += n as u32;
            }
        }
        if stored != self.boxes_racked {
            return violation(format!("racks hold {stored} boxes, {} were dropped", self.boxes_racked));
        }

        if self.boxes_remaining + self.boxes_racked != self.initial_loose {
            return violation(format!(
                "{} remaining + {} racked != {} placed",
                self.boxes_remaining, self.boxes_racked, self.initial_loose,
            ));
        }
        let on_floor = self.grid.count(|c| c == Cell::Box);
        let carried = self.robots.iter().filter(|r| r.carrying()).count();
        if (on_floor + carried) as u32 != self.boxes_remaining {
            return violation(format!(
                "{on_floor} on the floor + {carried} carried != {} remaining",
                self.boxes_remaining,
            ));
        }
        Ok(())
    }
}
