//! Per-command edit journal (`--debug-log`).
//!
//! One line per input command: where the cursor was, where it ended up and
//! which structural case the edit took. Skipped lines are recorded too, so
//! the journal lines up with the script.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use crate::command::{Command, CommandError};
use crate::editor::{EditCase, Position};

/// What happened to one applied command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JournalEntry {
    /// One-based line number in the input.
    pub line: usize,
    pub command: Command,
    pub before: Position,
    pub after: Position,
    /// `None` for moves, prints and quit.
    pub case: Option<EditCase>,
}

impl fmt::Display for JournalEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}: {} {} -> {}",
            self.line,
            self.command.code(),
            self.before,
            self.after
        )?;
        if let Some(case) = self.case {
            write!(f, " ({case})")?;
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct Journal<W: Write> {
    writer: W,
    start: Instant,
    recorded: usize,
}

impl Journal<BufWriter<File>> {
    /// Create (or truncate) a journal file.
    pub fn create(path: &Path) -> io::Result<Self> {
        Self::new(BufWriter::new(File::create(path)?))
    }
}

impl<W: Write> Journal<W> {
    /// Start a journal on `writer`, writing the header line.
    pub fn new(mut writer: W) -> io::Result<Self> {
        writeln!(writer, "linkpad journal")?;
        Ok(Self {
            writer,
            start: Instant::now(),
            recorded: 0,
        })
    }

    pub fn record(&mut self, entry: &JournalEntry) -> io::Result<()> {
        self.recorded += 1;
        let elapsed_ms = self.elapsed_ms();
        writeln!(self.writer, "[{elapsed_ms:>10.3} ms] {entry}")
    }

    pub fn skip(&mut self, line: usize, err: &CommandError) -> io::Result<()> {
        let elapsed_ms = self.elapsed_ms();
        writeln!(self.writer, "[{elapsed_ms:>10.3} ms] line {line}: skipped ({err})")
    }

    /// Number of entries recorded so far, skips excluded.
    pub const fn recorded(&self) -> usize {
        self.recorded
    }

    /// Flush and hand back the writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}
