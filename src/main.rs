use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use nonet::{logger::StepLogger, solver::Solver};

/// The classic demo rotation: three proper puzzles plus a notoriously hard
/// one, solved in sequence when no input file is given.
const DEMO_PUZZLES: [&str; 4] = [
    "4.....8.5.3..........7......2.....6.....8.4......1.......6.3.7.5..2.....1.4......",
    "52...6.........7.13...........4..8..6......5...........418.........3..2...87.....",
    "6.....8.3.4.7.................5.4.7.3..2.....1.6.......2.....5.....8.6......1....",
    "8..........36......7..9.2...5...7.......457.....1...3...1....68..85...1..9....4..",
];

#[derive(Parser, Debug)]
#[command(name = "nonet", version, about = "Sudoku solver: candidate elimination plus stack-based search")]
struct Cli {
    /// Path to a puzzle file (81 chars, digits 1-9 and dots; whitespace is
    /// ignored). If omitted, solves the built-in demo puzzles.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Log each guess/backtrack step to the console
    #[arg(long)]
    trace: bool,

    /// Write step logs into this directory (implies --trace)
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Colorize output
    #[arg(long)]
    color: bool,

    /// Pause for Enter after each logged step (implies --trace)
    #[arg(long)]
    step: bool,

    /// Maximum steps to log (0 = unlimited)
    #[arg(long, default_value_t = 0)]
    max_logs: usize,
}

fn read_puzzle(path: &PathBuf) -> Result<String> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(raw.chars().filter(|ch| !ch.is_whitespace()).collect())
}

/// Renders the compact 81-character form as a 9×9 grid with block separators.
fn grid(compact: &str) -> String {
    let mut out = String::new();
    for (i, ch) in compact.chars().enumerate() {
        let (r, c) = (i / 9, i % 9);
        out.push(' ');
        out.push(ch);
        if c == 2 || c == 5 {
            out.push_str(" |");
        }
        if c == 8 {
            out.push('\n');
            if r == 2 || r == 5 {
                out.push_str("-------+-------+-------\n");
            }
        }
    }
    out
}

fn play(puzzle: &str, log: &mut StepLogger, color: bool) -> Result<()> {
    let heading = |s: &str| if color { s.green().bold().to_string() } else { s.to_string() };

    let mut solver = Solver::new(puzzle).context("parse puzzle")?;
    if solver.solve(log)? {
        let solution = solver.solution().expect("solution is recorded on success");
        println!("{}", heading("Puzzle:"));
        println!("{}", grid(solver.puzzle()));
        println!("{}", heading("Solution:"));
        println!("{}", grid(solution));
    } else {
        println!("Invalid puzzle or no solution found.");
    }
    println!("=============================");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut log = if cli.trace || cli.step || cli.log_dir.is_some() {
        StepLogger::new(cli.log_dir.clone(), cli.color, cli.step, cli.max_logs)?
    } else {
        StepLogger::disabled()
    };

    match &cli.input {
        Some(path) => play(&read_puzzle(path)?, &mut log, cli.color)?,
        None => {
            for puzzle in DEMO_PUZZLES {
                play(puzzle, &mut log, cli.color)?;
            }
        }
    }
    Ok(())
}
