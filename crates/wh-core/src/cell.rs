//! Cell states and their integer codes.
//!
//! | code   | cell                          |
//! |--------|-------------------------------|
//! | `0`    | empty floor                   |
//! | `1`    | loose box                     |
//! | `-1`   | rack holding no boxes         |
//! | `2..4` | rack holding 1–3 boxes        |
//! | `5`    | full rack (4 boxes)           |
//! | `7`    | robot                         |
//!
//! A rack's code is "boxes stored + 1", except that an empty rack is `-1`
//! rather than `1` so it cannot be confused with a loose box.

use crate::{WhError, WhResult};

/// Boxes a rack accepts before it reads as full (code 5).
pub const RACK_CAPACITY: u8 = 4;

/// Code written for a robot-occupied cell.
pub const ROBOT_CODE: i8 = 7;

/// What a single grid cell holds.  A cell is exactly one of these, so a robot
/// can never share a cell with a box or a rack.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum Cell {
    #[default]
    Empty,
    /// A loose box waiting to be picked up.
    Box,
    /// A storage rack holding `stored` boxes (`0..=RACK_CAPACITY`).
    Rack { stored: u8 },
    /// Transient marker for a robot standing here.
    Robot,
}

impl Cell {
    /// A rack with nothing on it.
    pub const EMPTY_RACK: Cell = Cell::Rack { stored: 0 };

    /// Integer code used in snapshots.
    #[inline]
    pub fn code(self) -> i8 {
        match self {
            Cell::Empty => 0,
            Cell::Box => 1,
            Cell::Rack { stored: 0 } => -1,
            Cell::Rack { stored } => stored as i8 + 1,
            Cell::Robot => ROBOT_CODE,
        }
    }

    /// Empty floor that a robot may step onto.
    #[inline]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    #[inline]
    pub fn is_rack(self) -> bool {
        matches!(self, Cell::Rack { .. })
    }

    /// A rack that still has room for a box.
    #[inline]
    pub fn accepts_box(self) -> bool {
        matches!(self, Cell::Rack { stored } if stored < RACK_CAPACITY)
    }

    /// The rack after one more box is stored (`-1 → 2`, `n → n + 1`).
    ///
    /// Returns `None` for anything that does not [`accept a box`](Self::accepts_box).
    #[inline]
    pub fn with_box_added(self) -> Option<Cell> {
        match self {
            Cell::Rack { stored } if stored < RACK_CAPACITY => {
                Some(Cell::Rack { stored: stored + 1 })
            }
            _ => None,
        }
    }
}

impl TryFrom<i8> for Cell {
    type Error = WhError;

    fn try_from(code: i8) -> WhResult<Cell> {
        match code {
            0 => Ok(Cell::Empty),
            1 => Ok(Cell::Box),
            -1 => Ok(Cell::EMPTY_RACK),
            2..=5 => Ok(Cell::Rack { stored: (code - 1) as u8 }),
            ROBOT_CODE => Ok(Cell::Robot),
            other => Err(WhError::InvalidCellCode(other)),
        }
    }
}

impl From<Cell> for i8 {
    #[inline]
    fn from(cell: Cell) -> i8 {
        cell.code()
    }
}
