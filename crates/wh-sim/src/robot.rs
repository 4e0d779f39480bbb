//! Per-robot decision procedure.

use wh_core::{Cell, Coord, Direction, Grid, RobotId, SimRng};

/// What a robot did with its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Lifted the loose box at `from`; the robot did not move.
    PickedUp { from: Coord },

    /// Stored the carried box on the rack at `at`, which now reads `rack`.
    Dropped { at: Coord, rack: Cell },

    /// Stepped from `from` to `to`.
    Moved { from: Coord, to: Coord },

    /// Tried to step `toward` but the target was off the floor or occupied.
    Blocked { toward: Direction },
}

/// A warehouse robot.
///
/// The robot remembers only where it stands and whether it holds a box.
/// Everything else is read fresh from the grid each turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Robot {
    id:       RobotId,
    position: Coord,
    carrying: bool,
}

impl Robot {
    pub fn new(id: RobotId, position: Coord) -> Self {
        Self { id, position, carrying: false }
    }

    #[inline]
    pub fn id(&self) -> RobotId {
        self.id
    }

    #[inline]
    pub fn position(&self) -> Coord {
        self.position
    }

    #[inline]
    pub fn carrying(&self) -> bool {
        self.carrying
    }

    #[cfg(test)]
    pub(crate) fn loaded(mut self) -> Self {
        self.carrying = true;
        self
    }

    /// Take one turn against `grid`.
    ///
    /// Idle robots pick up the first adjacent loose box in E/W/N/S order;
    /// carrying robots drop onto the first adjacent rack with room.  Either
    /// of those consumes the turn.  Otherwise the robot tries one uniformly
    /// random step onto empty floor.
    ///
    /// Writes land on `grid` immediately, so later robots in the same step
    /// see them.
    pub fn act(&mut self, grid: &mut Grid, rng: &mut SimRng) -> Action {
        if self.carrying {
            let slot = neighbours(self.position, grid)
                .find_map(|c| grid.get(c).with_box_added().map(|rack| (c, rack)));
            if let Some((at, rack)) = slot {
                grid.set(at, rack);
                self.carrying = false;
                return Action::Dropped { at, rack };
            }
        } else {
            let pickup = neighbours(self.position, grid).find(|&c| grid.get(c) == Cell::Box);
            if let Some(from) = pickup {
                grid.set(from, Cell::Empty);
                self.carrying = true;
                return Action::PickedUp { from };
            }
        }

        self.wander(grid, rng)
    }

    fn wander(&mut self, grid: &mut Grid, rng: &mut SimRng) -> Action {
        let Some(&dir) = rng.choose(&Direction::SCAN_ORDER) else {
            return Action::Blocked { toward: Direction::East };
        };
        match grid.neighbour(self.position, dir) {
            Some(to) if grid.get(to).is_empty() => {
                let from = self.position;
                grid.set(from, Cell::Empty);
                grid.set(to, Cell::Robot);
                self.position = to;
                Action::Moved { from, to }
            }
            _ => Action::Blocked { toward: dir },
        }
    }
}

/// In-bounds neighbours of `here` in scan order.
fn neighbours(here: Coord, grid: &Grid) -> impl Iterator<Item = Coord> + '_ {
    Direction::SCAN_ORDER
        .into_iter()
        .filter_map(move |dir| grid.neighbour(here, dir))
}
