//! 8x8 board geometry and cell occupancy

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Board width and height
pub const BOARD_SIZE: usize = 8;

/// Number of cells on the board
pub const NUM_CELLS: usize = BOARD_SIZE * BOARD_SIZE;

/// Direction vectors (d_row, d_col), row-major starting north-west
pub const DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// The four corner cells
pub const CORNERS: [Pos; 4] = [
    Pos::new_unchecked(0, 0),
    Pos::new_unchecked(0, 7),
    Pos::new_unchecked(7, 0),
    Pos::new_unchecked(7, 7),
];

// ============================================================================
// SIDES AND COORDINATES
// ============================================================================

/// One of the two player slots. Slots are bound to color tokens by the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// Board coordinate, always inside the 8x8 grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    /// Bounds-checked constructor
    pub fn new(row: usize, col: usize) -> Result<Self, EngineError> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(EngineError::OutOfBounds { row, col });
        }
        Ok(Self::new_unchecked(row as u8, col as u8))
    }

    pub(crate) const fn new_unchecked(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Neighbor one step in direction `(dr, dc)`, if still on the board
    pub fn step(self, dr: i8, dc: i8) -> Option<Pos> {
        let r = self.row as i8 + dr;
        let c = self.col as i8 + dc;
        let size = BOARD_SIZE as i8;
        if (0..size).contains(&r) && (0..size).contains(&c) {
            Some(Pos::new_unchecked(r as u8, c as u8))
        } else {
            None
        }
    }

    pub fn is_corner(self) -> bool {
        CORNERS.contains(&self)
    }

    /// On the outer ring but not a corner
    pub fn is_edge(self) -> bool {
        let last = (BOARD_SIZE - 1) as u8;
        !self.is_corner()
            && (self.row == 0 || self.row == last || self.col == 0 || self.col == last)
    }

    /// The corner this cell touches (C- and X-squares), if any
    pub fn adjacent_corner(self) -> Option<Pos> {
        if self.is_corner() {
            return None;
        }
        CORNERS.iter().copied().find(|corner| {
            self.row.abs_diff(corner.row) <= 1 && self.col.abs_diff(corner.col) <= 1
        })
    }

    /// Iterate every cell in row-major order
    pub fn all() -> impl Iterator<Item = Pos> {
        (0..BOARD_SIZE as u8)
            .flat_map(|row| (0..BOARD_SIZE as u8).map(move |col| Pos::new_unchecked(row, col)))
    }
}

// ============================================================================
// BOARD
// ============================================================================

/// 8x8 grid of optional owners. A plain value: `clone()` is a deep copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [[Option<Side>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Canonical start: (3,3) and (4,4) for B, (3,4) and (4,3) for A
    pub fn new() -> Self {
        let mut board = Self::empty();
        let mid = BOARD_SIZE / 2;
        board.cells[mid - 1][mid - 1] = Some(Side::B);
        board.cells[mid - 1][mid] = Some(Side::A);
        board.cells[mid][mid - 1] = Some(Side::A);
        board.cells[mid][mid] = Some(Side::B);
        board
    }

    pub fn empty() -> Self {
        Self {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Owner of a cell, or `OutOfBounds`
    pub fn get(&self, row: usize, col: usize) -> Result<Option<Side>, EngineError> {
        let pos = Pos::new(row, col)?;
        Ok(self.at(pos))
    }

    /// Unconditional write; legality is the caller's job
    pub fn set(&mut self, row: usize, col: usize, owner: Side) -> Result<(), EngineError> {
        let pos = Pos::new(row, col)?;
        self.put(pos, owner);
        Ok(())
    }

    /// Owner at an already validated coordinate
    pub fn at(&self, pos: Pos) -> Option<Side> {
        self.cells[pos.row as usize][pos.col as usize]
    }

    pub(crate) fn put(&mut self, pos: Pos, owner: Side) {
        self.cells[pos.row as usize][pos.col as usize] = Some(owner);
    }

    pub fn is_empty_at(&self, pos: Pos) -> bool {
        self.at(pos).is_none()
    }

    pub fn count(&self, owner: Side) -> u32 {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| **cell == Some(owner))
            .count() as u32
    }

    /// Total placed pieces
    pub fn occupied(&self) -> u32 {
        self.cells.iter().flatten().filter(|cell| cell.is_some()).count() as u32
    }

    pub fn empty_count(&self) -> u32 {
        NUM_CELLS as u32 - self.occupied()
    }

    pub fn is_full(&self) -> bool {
        self.empty_count() == 0
    }

    /// Iterate `(pos, owner)` over every cell in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (Pos, Option<Side>)> + '_ {
        Pos::all().map(move |pos| (pos, self.at(pos)))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
