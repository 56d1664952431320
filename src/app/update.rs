use tracing::trace;

use crate::app::Session;
use crate::command::Command;
use crate::editor::EditCase;

/// Result of applying one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// State may have changed; nothing to print.
    Continue,
    /// Text to write out verbatim.
    Output(String),
    /// Stop reading commands.
    Quit,
}

impl Session {
    /// Apply `command`, see [`update`].
    pub fn apply(&mut self, command: Command) -> Effect {
        update(self, command)
    }

    /// The structural case `command` would take from the current cursor.
    ///
    /// `None` for commands that do not edit.
    pub fn classify(&self, command: Command) -> Option<EditCase> {
        match command {
            Command::Insert(ch) => Some(self.buffer.insert_case(self.cursor, ch)),
            Command::Enter => Some(self.buffer.split_case(self.cursor)),
            Command::Delete => Some(self.buffer.delete_case(self.cursor)),
            _ => None,
        }
    }
}

/// Apply one command to the session.
///
/// Edits and moves replace the session cursor with the one the buffer hands
/// back. Printing never changes state.
pub fn update(session: &mut Session, command: Command) -> Effect {
    let Session {
        buffer,
        cursor,
        empty_lines,
    } = session;
    let before = *cursor;
    *cursor = match command {
        Command::Insert(ch) => buffer.insert(before, ch),
        Command::Enter => buffer.split_line(before),
        Command::Delete => buffer.delete_at_cursor(before),
        Command::Move(direction) => buffer.move_cursor(before, direction),
        Command::Home => buffer.move_home(before),
        Command::End => buffer.move_end(before),
        Command::PrintLine => {
            return Effect::Output(buffer.render_line(before, *empty_lines));
        }
        Command::PrintText => {
            return Effect::Output(buffer.render_text(*empty_lines).concat());
        }
        Command::Quit => return Effect::Quit,
    };
    trace!(?command, ?before, after = ?*cursor, "applied");
    Effect::Continue
}
