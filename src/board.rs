use anyhow::{bail, Result};
use itertools::Itertools;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::cell::Cell;

/// One of the three constraint groups a cell belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unit {
    Row,
    Column,
    Block,
}

impl Unit {
    pub const ALL: [Unit; 3] = [Unit::Row, Unit::Column, Unit::Block];
}

impl Cell {
    /// Index of this cell's group along the given unit.
    pub fn unit(&self, unit: Unit) -> usize {
        match unit {
            Unit::Row => self.row,
            Unit::Column => self.col,
            Unit::Block => self.block(),
        }
    }
}

/// A 9×9 grid of cells, row-major. `Clone` deep-copies every candidate set,
/// so clones pushed onto the branch stack are fully independent.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Board {
    cells: [[Cell; 9]; 9],
}

impl Board {
    fn blank() -> Self {
        Self { cells: std::array::from_fn(|r| std::array::from_fn(|c| Cell::blank(r, c))) }
    }

    /// Parses the compact 81-character form: digits 1-9 for clues, `.` for
    /// blanks, no separators. Anything else is a load-time error.
    pub fn parse(text: &str) -> Result<Self> {
        let chars: Vec<char> = text.chars().collect();
        if chars.len() != 81 {
            bail!("puzzle must be exactly 81 characters, got {}", chars.len());
        }
        let mut board = Self::blank();
        for (i, &ch) in chars.iter().enumerate() {
            board.cells[i / 9][i % 9] = Cell::from_char(i / 9, i % 9, ch)?;
        }
        Ok(board)
    }

    /// Compact form of the current state: solved digit or `.` per cell.
    pub fn to_compact(&self) -> String {
        self.iter()
            .map(|cell| cell.digit().map_or('.', |d| (b'0' + d) as char))
            .collect()
    }

    pub fn get(&self, row: usize, col: usize) -> &Cell {
        &self.cells[row][col]
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> &mut Cell {
        &mut self.cells[row][col]
    }

    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        debug_assert_eq!((cell.row, cell.col), (row, col));
        self.cells[row][col] = cell;
    }

    /// All cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().flatten()
    }

    pub fn is_solved(&self) -> bool {
        self.iter().all(Cell::is_solved)
    }

    pub fn is_valid(&self) -> bool {
        self.iter().all(Cell::is_valid)
    }

    /// Coordinates of every other cell sharing `unit` with `cell`, in board
    /// order. The queried cell is excluded by its own (row, col) index, so
    /// the caller may pass a detached copy of a cell from this board.
    pub fn neighbors(&self, cell: &Cell, unit: Unit) -> Vec<(usize, usize)> {
        self.iter()
            .filter(|other| {
                other.unit(unit) == cell.unit(unit)
                    && (other.row, other.col) != (cell.row, cell.col)
            })
            .map(|other| (other.row, other.col))
            .collect()
    }

    /// The unsolved cell with the fewest remaining candidates, ties broken by
    /// first occurrence in row-major order. Callers must check `is_solved`
    /// first; on a fully solved board there is nothing to branch on.
    pub fn next_branch_cell(&self) -> (usize, usize) {
        debug_assert!(!self.is_solved(), "no unsolved cell to branch on");
        let idx = self
            .iter()
            .position_min_by_key(|cell| if cell.is_solved() { 10 } else { cell.candidates.len() })
            .expect("board always has 81 cells");
        (idx / 9, idx % 9)
    }
}
