//! Grid coordinates and the four cardinal directions.

use std::fmt;

// ── Coord ─────────────────────────────────────────────────────────────────────

/// A cell address on the warehouse floor.  `x` grows east, `y` grows north.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: u32,
    pub y: u32,
}

impl Coord {
    #[inline]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// The adjacent coordinate in `dir`, or `None` if it would fall below zero.
    ///
    /// The upper bound is the grid's business; see `Grid::neighbour`.
    #[inline]
    pub fn step(self, dir: Direction) -> Option<Coord> {
        let (dx, dy) = dir.offset();
        Some(Coord {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(u32, u32)> for Coord {
    #[inline]
    fn from((x, y): (u32, u32)) -> Self {
        Coord { x, y }
    }
}

// ── Direction ─────────────────────────────────────────────────────────────────

/// A cardinal direction.  No diagonals.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Direction {
    East,
    West,
    North,
    South,
}

impl Direction {
    /// Neighbour scan order for pickup and drop-off.  First match wins, so
    /// this order is part of the reproducible trace.
    pub const SCAN_ORDER: [Direction; 4] = [
        Direction::East,
        Direction::West,
        Direction::North,
        Direction::South,
    ];

    /// `(dx, dy)` for one step in this direction.
    #[inline]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::East  => (1, 0),
            Direction::West  => (-1, 0),
            Direction::North => (0, 1),
            Direction::South => (0, -1),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::East  => "east",
            Direction::West  => "west",
            Direction::North => "north",
            Direction::South => "south",
        };
        f.write_str(s)
    }
}
