use std::fmt::{self, Display, Formatter};

use anyhow::{bail, Result};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A sudoku digit, 1..=9.
pub type Digit = u8;

// bits 1..=9 set
const ALL_DIGITS: u16 = 0b11_1111_1110;

/// Set of digits a cell could still hold; bit `d` set means digit `d` is possible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Candidates(u16);

impl Candidates {
    pub fn all() -> Self { Self(ALL_DIGITS) }
    pub fn single(digit: Digit) -> Self { Self(1 << digit) }

    pub fn contains(self, digit: Digit) -> bool { self.0 & (1 << digit) != 0 }
    pub fn len(self) -> usize { self.0.count_ones() as usize }
    pub fn is_empty(self) -> bool { self.0 == 0 }

    /// The one digit left in a singleton set.
    pub fn solo(self) -> Option<Digit> {
        if self.0.count_ones() == 1 { Some(self.0.trailing_zeros() as Digit) } else { None }
    }

    /// Removes `digit` if present; reports whether a removal occurred.
    pub fn remove(&mut self, digit: Digit) -> bool {
        let before = self.0;
        self.0 &= !(1 << digit);
        self.0 != before
    }

    /// Remaining digits in ascending order.
    pub fn iter(self) -> impl Iterator<Item = Digit> {
        (1..=9).filter(move |&d| self.contains(d))
    }
}

impl Display for Candidates {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for d in self.iter() { write!(f, "{d}")?; }
        write!(f, "]")
    }
}

/// One of the 81 positions on a board, carrying its remaining candidates.
///
/// A cell with exactly one candidate is solved; a cell with none is in a
/// contradictory state and the board holding it must be discarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub candidates: Candidates,
}

impl Cell {
    pub fn blank(row: usize, col: usize) -> Self {
        Self { row, col, candidates: Candidates::all() }
    }

    pub fn clue(row: usize, col: usize, digit: Digit) -> Self {
        Self { row, col, candidates: Candidates::single(digit) }
    }

    pub fn from_char(row: usize, col: usize, ch: char) -> Result<Self> {
        match ch {
            '.' => Ok(Self::blank(row, col)),
            '1'..='9' => Ok(Self::clue(row, col, ch as u8 - b'0')),
            _ => bail!("invalid puzzle character {ch:?} at r{}c{}", row + 1, col + 1),
        }
    }

    /// Blocks are numbered 0..=8 left-to-right, top-to-bottom.
    pub fn block(&self) -> usize {
        (self.row / 3) * 3 + self.col / 3
    }

    pub fn is_solved(&self) -> bool { self.candidates.len() == 1 }
    pub fn is_valid(&self) -> bool { !self.candidates.is_empty() }

    /// The committed digit of a solved cell.
    pub fn digit(&self) -> Option<Digit> { self.candidates.solo() }

    pub fn remove_candidate(&mut self, digit: Digit) -> bool {
        self.candidates.remove(digit)
    }
}
