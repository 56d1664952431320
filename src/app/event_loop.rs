use std::io::{BufRead, Write};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::app::{App, Effect, Journal, JournalEntry, Session};
use crate::command::{Command, CommandError};

impl App {
    /// Read commands from `input` until `Q` or end of input, writing all
    /// printed text to `output`.
    ///
    /// Blank lines are skipped. Unknown commands and lines that are not
    /// valid UTF-8 are logged and skipped.
    ///
    /// # Errors
    /// Returns an error if reading or writing fails, if the journal cannot
    /// be written, or, with checking enabled, if a command leaves the buffer
    /// inconsistent.
    pub fn run<R: BufRead, W: Write>(&self, mut input: R, mut output: W) -> Result<Session> {
        let start = Instant::now();
        let mut session = Session::new(self.empty_lines);
        let mut journal = match self.journal_path() {
            Some(path) => Some(
                Journal::create(path)
                    .with_context(|| format!("Failed to create debug log {}", path.display()))?,
            ),
            None => None,
        };
        let mut applied = 0usize;
        let mut number = 0usize;
        let mut raw = Vec::new();

        loop {
            raw.clear();
            let read = input
                .read_until(b'\n', &mut raw)
                .with_context(|| format!("Failed to read command line {}", number + 1))?;
            if read == 0 {
                break;
            }
            number += 1;

            let command = match Command::parse_bytes(&raw) {
                Ok(command) => command,
                Err(CommandError::Empty) => continue,
                Err(err) => {
                    warn!(line = number, %err, "skipping command");
                    if let Some(journal) = journal.as_mut() {
                        journal.skip(number, &err).context("Failed to write debug log")?;
                    }
                    continue;
                }
            };
            if self.echo {
                eprintln!("> {}", command.code());
            }

            let before = session.position();
            let case = session.classify(command);
            let effect = session.apply(command);
            applied += 1;
            if let Some(journal) = journal.as_mut() {
                let entry = JournalEntry {
                    line: number,
                    command,
                    before,
                    after: session.position(),
                    case,
                };
                journal.record(&entry).context("Failed to write debug log")?;
            }
            if self.check {
                session.buffer().check_invariants().with_context(|| {
                    format!("Buffer inconsistent after `{}` on line {number}", command.code())
                })?;
            }

            match effect {
                Effect::Continue => {}
                Effect::Output(text) => output
                    .write_all(text.as_bytes())
                    .context("Failed to write output")?,
                Effect::Quit => break,
            }
        }

        output.flush().context("Failed to flush output")?;
        if let Some(journal) = journal {
            journal.finish().context("Failed to flush debug log")?;
        }
        if self.timing {
            let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
            eprintln!("[perf] session: {applied} commands from {number} lines in {elapsed_ms:.2} ms");
        }
        debug!(
            applied,
            lines = session.buffer().line_count(),
            "session finished"
        );
        Ok(session)
    }
}
