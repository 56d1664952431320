//! Naming the structural path an edit takes.
//!
//! [`Buffer::split_line`] and [`Buffer::delete_at_cursor`] each branch on
//! where the cursor sits. The queries here answer which branch a cursor
//! would take, without editing.

use std::fmt;

use super::buffer::{Buffer, CharNode, Cursor, NEWLINE};

/// Which structural change an edit makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditCase {
    /// A character is linked in before the cursor.
    Insert,
    /// Enter on the terminal newline: the cursor's node opens a new line below.
    SplitAtEnd,
    /// Enter inside a line: the tail moves to a new line below.
    SplitInside,
    /// Enter at the start of a non-empty line: an empty line opens above.
    OpenAbove,
    /// A non-newline character is unlinked.
    DeleteChar,
    /// Delete on a newline: the next line is spliced onto this one.
    JoinLines,
    /// Delete on an empty line with a line below: the empty line goes away.
    RemoveEmptyLine,
    /// Delete on the newline of the last line.
    NoOp,
}

impl EditCase {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::SplitAtEnd => "split-at-end",
            Self::SplitInside => "split-inside",
            Self::OpenAbove => "open-above",
            Self::DeleteChar => "delete-char",
            Self::JoinLines => "join-lines",
            Self::RemoveEmptyLine => "remove-empty-line",
            Self::NoOp => "no-op",
        }
    }

    /// Whether the edit changes the number of lines.
    pub const fn changes_line_count(self) -> bool {
        matches!(
            self,
            Self::SplitAtEnd
                | Self::SplitInside
                | Self::OpenAbove
                | Self::JoinLines
                | Self::RemoveEmptyLine
        )
    }
}

impl fmt::Display for EditCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Buffer {
    /// The case [`Buffer::insert`] takes for `ch` at `cursor`.
    pub fn insert_case(&self, cursor: Cursor, ch: char) -> EditCase {
        if ch == NEWLINE {
            self.split_case(cursor)
        } else {
            EditCase::Insert
        }
    }

    /// The case [`Buffer::split_line`] takes at `cursor`.
    pub fn split_case(&self, cursor: Cursor) -> EditCase {
        let CharNode { prev, next, .. } = self.node(cursor);
        match (prev, next) {
            (_, None) => EditCase::SplitAtEnd,
            (None, Some(_)) => EditCase::OpenAbove,
            (Some(_), Some(_)) => EditCase::SplitInside,
        }
    }

    /// The case [`Buffer::delete_at_cursor`] takes at `cursor`.
    pub fn delete_case(&self, cursor: Cursor) -> EditCase {
        let CharNode {
            prev, next, line, ..
        } = self.node(cursor);
        if next.is_some() {
            return EditCase::DeleteChar;
        }
        match (self.lines[line].next, prev) {
            (None, _) => EditCase::NoOp,
            (Some(_), None) => EditCase::RemoveEmptyLine,
            (Some(_), Some(_)) => EditCase::JoinLines,
        }
    }
}
