//! 9×9 Sudoku solving by candidate elimination plus depth-first search over
//! board snapshots on an explicit branch stack.

pub mod board;
pub mod cell;
pub mod logger;
pub mod solver;

pub use board::{Board, Unit};
pub use cell::{Candidates, Cell, Digit};
pub use logger::StepLogger;
pub use solver::Solver;
