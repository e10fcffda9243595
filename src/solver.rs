use anyhow::Result;

use crate::board::{Board, Unit};
use crate::cell::Cell;
use crate::logger::StepLogger;

/// Alternates candidate elimination with a depth-first search over board
/// snapshots. Branches live on an explicit heap stack rather than the call
/// stack, so search depth never threatens a stack overflow; each entry is an
/// independent deep copy of the board it was branched from.
pub struct Solver {
    puzzle: String,
    current: Board,
    branches: Vec<Board>,
    solution: Option<String>,
}

impl Solver {
    pub fn new(puzzle: &str) -> Result<Self> {
        Ok(Self {
            current: Board::parse(puzzle)?,
            puzzle: puzzle.to_string(),
            branches: Vec::new(),
            solution: None,
        })
    }

    /// Replaces the loaded puzzle, clearing the branch stack and any
    /// previous solution.
    pub fn load_puzzle(&mut self, puzzle: &str) -> Result<()> {
        self.current = Board::parse(puzzle)?;
        self.puzzle = puzzle.to_string();
        self.branches.clear();
        self.solution = None;
        Ok(())
    }

    pub fn puzzle(&self) -> &str {
        &self.puzzle
    }

    /// Compact solution text; populated only after a successful `solve`.
    pub fn solution(&self) -> Option<&str> {
        self.solution.as_deref()
    }

    pub fn board(&self) -> &Board {
        &self.current
    }

    pub fn branch_count(&self) -> usize {
        self.branches.len()
    }

    pub fn is_solved(&self) -> bool {
        self.current.is_solved()
    }

    /// One propagation pass: every cell that is solved when visited scrubs
    /// its digit from all row, column, and block neighbors. This is not a
    /// fixed-point iteration; the outer search loop re-invokes it, which
    /// compounds propagation across iterations. Returns false if any cell is
    /// left without candidates.
    pub fn eliminate(&mut self) -> bool {
        for row in 0..9 {
            for col in 0..9 {
                let cell = *self.current.get(row, col);
                let Some(digit) = cell.digit() else { continue };
                for unit in Unit::ALL {
                    for (r, c) in self.current.neighbors(&cell, unit) {
                        self.current.get_mut(r, c).remove_candidate(digit);
                    }
                }
            }
        }
        self.current.is_valid()
    }

    /// Branches on the unsolved cell with the fewest candidates: one board
    /// snapshot per remaining digit is pushed onto the stack. Candidates are
    /// pushed in ascending order, so the highest digit is popped (explored)
    /// first. Order has no bearing on correctness, only on which solution is
    /// found first if the puzzle has several.
    pub fn guess(&mut self, log: &mut StepLogger) -> Result<()> {
        let (row, col) = self.current.next_branch_cell();
        let cell = *self.current.get(row, col);
        if log.enabled() {
            log.log(
                "Guess",
                &format!("branching on r{}c{} {}", row + 1, col + 1, cell.candidates),
            )?;
        }
        for digit in cell.candidates.iter() {
            let mut branch = self.current.clone();
            branch.set(row, col, Cell::clue(row, col, digit));
            self.branches.push(branch);
        }
        Ok(())
    }

    /// Runs the eliminate/guess loop to completion. Returns whether a
    /// solution was found; contradictions inside the search are recovered by
    /// backtracking and never surface. `Err` is reserved for logger I/O.
    pub fn solve(&mut self, log: &mut StepLogger) -> Result<bool> {
        if !self.eliminate() {
            log.log("Unsolvable", "the given clues contradict each other")?;
            return Ok(false);
        }
        if self.is_solved() {
            self.solution = Some(self.current.to_compact());
            log.log("Solved", "by elimination alone, no branching")?;
            return Ok(true);
        }
        self.guess(log)?;

        while let Some(board) = self.branches.pop() {
            self.current = board;
            if !self.eliminate() {
                // dead branch; backtrack to the next stacked snapshot
                if log.enabled() {
                    log.log("Backtrack", &format!("{} branches left", self.branches.len()))?;
                }
                continue;
            }
            if self.is_solved() {
                self.solution = Some(self.current.to_compact());
                if log.enabled() {
                    log.log("Solved", &format!("{} branches unexplored", self.branches.len()))?;
                }
                return Ok(true);
            }
            self.guess(log)?;
        }

        log.log("Exhausted", "no branches left to explore")?;
        Ok(false)
    }
}
