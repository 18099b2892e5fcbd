//! Progress counting and reporting.
//!
//! The default reporter prints `progress: <current>/<total>` lines to
//! stdout, one per finished work unit, for front ends that parse them with
//! `^progress: (\d+)/(\d+)$`. An indicatif bar on stderr is available for
//! interactive use.

use crate::constants::PROGRESS_PREFIX;
use crate::error::{Error, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;

/// Format one progress line (without newline).
pub fn format_progress(current: usize, total: usize) -> String {
    format!("{PROGRESS_PREFIX}{current}/{total}")
}

/// Completed and planned work units of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressCounter {
    completed: usize,
    total: usize,
}

impl ProgressCounter {
    /// Counter for a run of `total` units.
    pub const fn new(total: usize) -> Self {
        Self {
            completed: 0,
            total,
        }
    }

    /// Record one finished unit and return the new completed count.
    pub fn advance(&mut self) -> Result<usize> {
        let next = self.completed + 1;
        if next > self.total {
            return Err(Error::ProgressOverflow {
                completed: next,
                total: self.total,
            });
        }
        self.completed = next;
        Ok(next)
    }

    /// Units finished so far.
    pub const fn completed(&self) -> usize {
        self.completed
    }

    /// Planned units.
    pub const fn total(&self) -> usize {
        self.total
    }
}

/// Receives progress updates from the driver.
pub trait ProgressReporter {
    /// Called once before the first unit, with the planned total.
    fn start(&mut self, _total: usize) {}

    /// Called after every finished unit.
    fn report(&mut self, current: usize, total: usize) -> Result<()>;

    /// Called once after the last unit.
    fn finish(&mut self) {}
}

/// Writes progress lines to a writer, flushing after each line.
#[derive(Debug)]
pub struct LineReporter<W: Write> {
    out: W,
}

impl<W: Write> LineReporter<W> {
    /// Report to `out`.
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl LineReporter<std::io::Stdout> {
    /// Report to stdout.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ProgressReporter for LineReporter<W> {
    fn report(&mut self, current: usize, total: usize) -> Result<()> {
        writeln!(self.out, "{}", format_progress(current, total))?;
        self.out.flush()?;
        Ok(())
    }
}

/// Interactive progress bar on stderr.
#[derive(Debug, Default)]
pub struct BarReporter {
    bar: Option<ProgressBar>,
}

impl BarReporter {
    /// Create a reporter; the bar appears on `start`.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressReporter for BarReporter {
    fn start(&mut self, total: usize) {
        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} conversions ({eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓▒░ "),
        );
        self.bar = Some(pb);
    }

    fn report(&mut self, current: usize, _total: usize) -> Result<()> {
        if let Some(pb) = &self.bar {
            pb.set_position(current as u64);
        }
        Ok(())
    }

    fn finish(&mut self) {
        if let Some(pb) = self.bar.take() {
            pb.finish_with_message("Complete");
        }
    }
}

/// Discards all progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn report(&mut self, _current: usize, _total: usize) -> Result<()> {
        Ok(())
    }
}
