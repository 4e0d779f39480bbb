//! The warehouse floor: a bounded `width × height` array of [`Cell`]s.
//!
//! The grid is the single source of truth for what stands where.  It only
//! does bounds checking and raw reads/writes; keeping cells consistent with
//! the robot roster is the caller's job.

use std::fmt;

use crate::{Cell, Coord, Direction, WhError, WhResult};

// ── Grid ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width:  u32,
    height: u32,
    /// Row-major by `y`: `cells[y * width + x]`.
    cells:  Vec<Cell>,
}

impl Grid {
    /// An all-empty floor.  Dimensions are assumed validated by the caller
    /// (see [`WarehouseConfig::validate`](crate::WarehouseConfig::validate)).
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width as usize * height as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `true` iff `0 <= x < width` and `0 <= y < height`.
    #[inline]
    pub fn is_valid(&self, x: i64, y: i64) -> bool {
        (0..self.width as i64).contains(&x) && (0..self.height as i64).contains(&y)
    }

    #[inline]
    pub fn contains(&self, coord: Coord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    /// Read a cell.
    ///
    /// # Panics
    /// Panics if `coord` is outside the grid; internal logic never asks for one.
    #[inline]
    pub fn get(&self, coord: Coord) -> Cell {
        self.cells[self.index_of(coord)]
    }

    /// Overwrite a cell.
    ///
    /// # Panics
    /// Panics if `coord` is outside the grid.
    #[inline]
    pub fn set(&mut self, coord: Coord, cell: Cell) {
        let i = self.index_of(coord);
        self.cells[i] = cell;
    }

    /// Checked read for arbitrary (possibly negative) coordinates.
    pub fn try_get(&self, x: i64, y: i64) -> WhResult<Cell> {
        if !self.is_valid(x, y) {
            return Err(WhError::OutOfBounds {
                x,
                y,
                width:  self.width,
                height: self.height,
            });
        }
        Ok(self.get(Coord::new(x as u32, y as u32)))
    }

    /// The in-bounds neighbour of `coord` in `dir`, if any.
    #[inline]
    pub fn neighbour(&self, coord: Coord, dir: Direction) -> Option<Coord> {
        coord.step(dir).filter(|&c| self.contains(c))
    }

    /// Every `(coord, cell)` pair in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        let width = self.width as usize;
        self.cells.iter().enumerate().map(move |(i, &cell)| {
            (Coord::new((i % width) as u32, (i / width) as u32), cell)
        })
    }

    /// Number of cells matching `pred`.
    pub fn count(&self, pred: impl Fn(Cell) -> bool) -> usize {
        self.cells.iter().filter(|&&c| pred(c)).count()
    }

    /// An owned copy of every cell code, for recording and playback.
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            width:  self.width,
            height: self.height,
            codes:  self.cells.iter().copied().map(i8::from).collect(),
        }
    }

    #[inline]
    fn index_of(&self, coord: Coord) -> usize {
        assert!(
            self.contains(coord),
            "coordinate {coord} is outside the {}x{} grid",
            self.width,
            self.height,
        );
        coord.y as usize * self.width as usize + coord.x as usize
    }
}

/// One text row per `y`, highest `y` (north) first.
///
/// `.` empty, `b` box, `R` empty rack, `1`–`4` rack fill, `@` robot.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                let glyph = match self.get(Coord::new(x, y)) {
                    Cell::Empty => '.',
                    Cell::Box => 'b',
                    Cell::Rack { stored: 0 } => 'R',
                    Cell::Rack { stored } => char::from(b'0' + stored),
                    Cell::Robot => '@',
                };
                write!(f, "{glyph}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// ── GridSnapshot ──────────────────────────────────────────────────────────────

/// A frozen `width × height` array of cell codes.
///
/// Independent of the live grid, so a sequence of these can be kept for
/// playback after the simulation has moved on.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSnapshot {
    pub width:  u32,
    pub height: u32,
    /// Row-major by `y`, same layout as the live grid.
    pub codes:  Vec<i8>,
}

impl GridSnapshot {
    /// Code at `(x, y)`.
    ///
    /// # Panics
    /// Panics if `(x, y)` is out of bounds.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> i8 {
        assert!(x < self.width && y < self.height, "({x}, {y}) outside snapshot");
        self.codes[y as usize * self.width as usize + x as usize]
    }

    /// Rows from `y = 0` upward.
    pub fn rows(&self) -> impl Iterator<Item = &[i8]> {
        self.codes.chunks_exact(self.width.max(1) as usize)
    }

    /// `(x, y, code)` for every cell, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32, i8)> + '_ {
        let width = self.width as usize;
        self.codes
            .iter()
            .enumerate()
            .map(move |(i, &code)| ((i % width) as u32, (i / width) as u32, code))
    }
}
