use std::{
    fs::{self, File},
    io::Write,
    path::PathBuf,
};

use anyhow::Result;
use chrono::Local;
use colored::Colorize;

/// Records solver steps to the console, and optionally to numbered files in
/// a log directory. A disabled logger swallows everything, so the solver can
/// thread one through unconditionally.
pub struct StepLogger {
    enabled: bool,
    dir: Option<PathBuf>,
    color: bool,
    step: bool,
    max_logs: usize,
    counter: usize,
}

impl StepLogger {
    pub fn new(dir: Option<PathBuf>, color: bool, step: bool, max_logs: usize) -> Result<Self> {
        if let Some(dir) = &dir {
            fs::create_dir_all(dir)?;
        }
        Ok(Self { enabled: true, dir, color, step, max_logs, counter: 0 })
    }

    /// Logger that drops every step; used when tracing is off and in tests.
    pub fn disabled() -> Self {
        Self { enabled: false, dir: None, color: false, step: false, max_logs: 0, counter: 0 }
    }

    /// Cheap check for callers that would otherwise format log text in a
    /// hot loop.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn log(&mut self, title: &str, details: &str) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        // max_logs == 0 means unlimited
        if self.max_logs != 0 && self.counter >= self.max_logs {
            return Ok(());
        }
        self.counter += 1;

        if let Some(dir) = &self.dir {
            let path = dir.join(format!("step-{:05}.txt", self.counter));
            let ts = Local::now().format("%Y-%m-%d %H:%M:%S");
            let mut f = File::create(path)?;
            writeln!(f, "[{ts}] {title}\n\n{details}")?;
        }

        if self.color {
            println!("{} {} {}", "➤".cyan().bold(), title.bold(), details);
        } else {
            println!("➤ {title} {details}");
        }

        if self.step {
            print!("-- press Enter to continue --");
            use std::io::{self, Write as _};
            io::stdout().flush().ok();
            let mut line = String::new();
            io::stdin().read_line(&mut line).ok();
        }
        Ok(())
    }
}
