//! Command session and main read loop.
//!
//! - [`Session`]: the document, its cursor and the render policy
//! - [`Effect`]: what a command asks the loop to do next
//! - [`update`]: applies one [`Command`](crate::command::Command) to a session
//! - [`App::run`]: reads commands and writes printed text
//! - [`Journal`]: optional per-command record of cursor moves and edit cases

mod event_loop;
mod journal;
mod model;
mod update;

use std::path::{Path, PathBuf};

pub use journal::{Journal, JournalEntry};
pub use model::Session;
pub use update::{Effect, update};

use crate::editor::EmptyLines;

/// Drives a [`Session`] from a stream of protocol lines.
#[derive(Debug, Default, Clone)]
pub struct App {
    empty_lines: EmptyLines,
    echo: bool,
    check: bool,
    timing: bool,
    journal_path: Option<PathBuf>,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose how empty lines are printed.
    pub const fn with_empty_lines(mut self, policy: EmptyLines) -> Self {
        self.empty_lines = policy;
        self
    }

    /// Echo each parsed command to stderr.
    pub const fn with_echo(mut self, enabled: bool) -> Self {
        self.echo = enabled;
        self
    }

    /// Verify buffer invariants after every command.
    pub const fn with_check(mut self, enabled: bool) -> Self {
        self.check = enabled;
        self
    }

    /// Print a timing summary to stderr when the session ends.
    pub const fn with_timing(mut self, enabled: bool) -> Self {
        self.timing = enabled;
        self
    }

    /// Write a [`Journal`] of every command to `path`.
    pub fn with_journal(mut self, path: Option<PathBuf>) -> Self {
        self.journal_path = path;
        self
    }

    pub fn journal_path(&self) -> Option<&Path> {
        self.journal_path.as_deref()
    }
}
