use std::collections::HashSet;

use nonet::{Solver, StepLogger};
use pretty_assertions::assert_eq;

const PUZZLE: &str =
    "4.....8.5.3..........7......2.....6.....8.4......1.......6.3.7.5..2.....1.4......";
const SOLUTION: &str =
    "417369825632158947958724316825437169791586432346912758289643571573291684164875293";
const EASY: &str =
    "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79";

/// Every row, column, and block must hold each digit 1-9 exactly once.
fn assert_well_formed(solution: &str) {
    let digits: Vec<u8> = solution.bytes().map(|b| b.wrapping_sub(b'0')).collect();
    assert_eq!(digits.len(), 81);
    let full: HashSet<u8> = (1..=9).collect();
    for i in 0..9 {
        let row: HashSet<u8> = (0..9).map(|j| digits[9 * i + j]).collect();
        let col: HashSet<u8> = (0..9).map(|j| digits[9 * j + i]).collect();
        let block: HashSet<u8> = (0..9)
            .map(|j| digits[9 * ((i / 3) * 3 + j / 3) + (i % 3) * 3 + j % 3])
            .collect();
        assert_eq!(row, full, "row {i}");
        assert_eq!(col, full, "column {i}");
        assert_eq!(block, full, "block {i}");
    }
}

#[test]
fn solves_pinned_puzzle() {
    let mut solver = Solver::new(PUZZLE).unwrap();
    assert!(solver.solve(&mut StepLogger::disabled()).unwrap());

    let solution = solver.solution().unwrap();
    assert_eq!(solution, SOLUTION);
    assert_well_formed(solution);

    // every original clue survives unchanged
    for (given, solved) in PUZZLE.chars().zip(solution.chars()) {
        if given != '.' {
            assert_eq!(given, solved);
        }
    }
}

#[test]
fn solves_easy_puzzle() {
    let mut solver = Solver::new(EASY).unwrap();
    assert!(solver.solve(&mut StepLogger::disabled()).unwrap());
    assert_well_formed(solver.solution().unwrap());
}

#[test]
fn fully_solved_input_succeeds_unchanged() {
    let mut solver = Solver::new(SOLUTION).unwrap();
    assert!(solver.is_solved());
    assert!(solver.solve(&mut StepLogger::disabled()).unwrap());
    assert_eq!(solver.solution(), Some(SOLUTION));
    assert_eq!(solver.branch_count(), 0);
}

#[test]
fn eliminate_on_solved_board_is_a_no_op() {
    let mut solver = Solver::new(SOLUTION).unwrap();
    let before = solver.board().to_compact();
    assert!(solver.eliminate());
    assert!(solver.eliminate());
    assert!(solver.is_solved());
    assert_eq!(solver.board().to_compact(), before);
}

#[test]
fn single_blank_falls_to_elimination_alone() {
    // blank out the center cell; its digit is forced by its peers
    let mut puzzle = SOLUTION.to_string();
    puzzle.replace_range(40..41, ".");

    let mut solver = Solver::new(&puzzle).unwrap();
    assert!(!solver.is_solved());
    assert!(solver.eliminate());
    assert!(solver.is_solved());
    assert_eq!(solver.board().to_compact(), SOLUTION);
    assert_eq!(solver.branch_count(), 0);
}

#[test]
fn duplicate_clues_in_a_row_fail() {
    let mut puzzle = String::from("55");
    puzzle.push_str(&".".repeat(79));

    let mut solver = Solver::new(&puzzle).unwrap();
    assert!(!solver.solve(&mut StepLogger::disabled()).unwrap());
    assert_eq!(solver.solution(), None);
}

#[test]
fn search_exhaustion_reports_no_solution() {
    // Row 0 needs 1, 2, and 9 in its three blanks, but the 9 clue below
    // shares their block, leaving three cells fighting over two digits.
    // Elimination alone cannot see that, so the solver must branch and
    // run the stack dry.
    let mut puzzle = String::from("...345678");
    puzzle.push_str(&".".repeat(9));
    puzzle.push_str("..9......");
    puzzle.push_str(&".".repeat(54));

    let mut solver = Solver::new(&puzzle).unwrap();
    assert!(solver.eliminate(), "clues on their own are consistent");
    assert!(!solver.is_solved());

    assert!(!solver.solve(&mut StepLogger::disabled()).unwrap());
    assert_eq!(solver.solution(), None);
    assert_eq!(solver.branch_count(), 0);
}

#[test]
fn guess_pushes_one_branch_per_candidate() {
    let mut solver = Solver::new(PUZZLE).unwrap();
    assert!(solver.eliminate());
    assert!(!solver.is_solved());

    let (row, col) = solver.board().next_branch_cell();
    let expected = solver.board().get(row, col).candidates.len();
    assert!(expected >= 2, "branch cell is unsolved, so at least two candidates");

    solver.guess(&mut StepLogger::disabled()).unwrap();
    assert_eq!(solver.branch_count(), expected);
}

#[test]
fn load_puzzle_resets_state() {
    let mut solver = Solver::new(EASY).unwrap();
    assert!(solver.solve(&mut StepLogger::disabled()).unwrap());
    assert!(solver.solution().is_some());

    solver.load_puzzle(SOLUTION).unwrap();
    assert_eq!(solver.puzzle(), SOLUTION);
    assert_eq!(solver.solution(), None);
    assert_eq!(solver.branch_count(), 0);
    assert!(solver.solve(&mut StepLogger::disabled()).unwrap());
}

#[test]
fn solution_round_trips_as_an_immediately_solved_puzzle() {
    let mut solver = Solver::new(PUZZLE).unwrap();
    assert!(solver.solve(&mut StepLogger::disabled()).unwrap());
    let solution = solver.solution().unwrap().to_string();

    let reparsed = Solver::new(&solution).unwrap();
    assert!(reparsed.is_solved());
}

#[test]
fn step_logger_records_solve_steps() {
    let dir = std::env::temp_dir().join(format!("nonet-solve-log-test-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);

    let mut log = StepLogger::new(Some(dir.clone()), false, false, 0).unwrap();
    let mut solver = Solver::new(EASY).unwrap();
    assert!(solver.solve(&mut log).unwrap());
    assert!(dir.join("step-00001.txt").exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn step_logger_honors_max_logs() {
    let dir = std::env::temp_dir().join(format!("nonet-logger-test-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);

    let mut log = StepLogger::new(Some(dir.clone()), false, false, 2).unwrap();
    log.log("first", "a").unwrap();
    log.log("second", "b").unwrap();
    log.log("third", "dropped past the cap").unwrap();

    assert!(dir.join("step-00001.txt").exists());
    assert!(dir.join("step-00002.txt").exists());
    assert!(!dir.join("step-00003.txt").exists());

    let _ = std::fs::remove_dir_all(&dir);
}
