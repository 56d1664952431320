//! Single-letter command protocol.
//!
//! One command per input line: the first non-blank character is the code,
//! and `I` takes the character two positions later as its argument
//! (`I x`). A bare `I` inserts a space.

use thiserror::Error;

use crate::editor::Direction;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command: {0:?}")]
    Unknown(char),
    #[error("Empty command")]
    Empty,
    #[error("Command is not valid UTF-8")]
    NotUtf8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `I c`: insert before the cursor.
    Insert(char),
    /// `N`: split the line.
    Enter,
    /// `D`: delete under the cursor.
    Delete,
    /// `h` `j` `k` `l`: vi-style arrows.
    Move(Direction),
    /// `H`
    Home,
    /// `E`
    End,
    /// `P`: print the current line.
    PrintLine,
    /// `T`: print the whole text.
    PrintText,
    /// `Q`
    Quit,
}

impl Command {
    /// Pure parser: &str → Result<Command, CommandError>
    ///
    /// The insert argument is positional, not the next non-blank character:
    /// `"Ia"` has nothing at the third position and inserts a space, the
    /// same as a bare `"I"`.
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        let trimmed = input.trim_start();
        let mut chars = trimmed.chars();
        let Some(code) = chars.next() else {
            return Err(CommandError::Empty);
        };

        match code {
            'I' => Ok(Self::Insert(chars.nth(1).unwrap_or(' '))),
            'N' => Ok(Self::Enter),
            'D' => Ok(Self::Delete),
            'h' => Ok(Self::Move(Direction::Left)),
            'j' => Ok(Self::Move(Direction::Down)),
            'k' => Ok(Self::Move(Direction::Up)),
            'l' => Ok(Self::Move(Direction::Right)),
            'H' => Ok(Self::Home),
            'E' => Ok(Self::End),
            'P' => Ok(Self::PrintLine),
            'T' => Ok(Self::PrintText),
            'Q' => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other)),
        }
    }

    /// Parse one raw input line, trailing `\n` or `\r\n` allowed.
    pub fn parse_bytes(line: &[u8]) -> Result<Self, CommandError> {
        let line = line.strip_suffix(b"\n").unwrap_or(line);
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        let text = std::str::from_utf8(line).map_err(|_| CommandError::NotUtf8)?;
        Self::parse(text)
    }

    /// The protocol text for this command.
    pub fn code(self) -> String {
        match self {
            Self::Insert(ch) => format!("I {ch}"),
            Self::Enter => "N".to_string(),
            Self::Delete => "D".to_string(),
            Self::Move(Direction::Left) => "h".to_string(),
            Self::Move(Direction::Down) => "j".to_string(),
            Self::Move(Direction::Up) => "k".to_string(),
            Self::Move(Direction::Right) => "l".to_string(),
            Self::Home => "H".to_string(),
            Self::End => "E".to_string(),
            Self::PrintLine => "P".to_string(),
            Self::PrintText => "T".to_string(),
            Self::Quit => "Q".to_string(),
        }
    }
}
