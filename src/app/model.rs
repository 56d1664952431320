use crate::editor::{Buffer, Cursor, EmptyLines, Position};

/// The complete session state: one document and one cursor.
#[derive(Debug)]
pub struct Session {
    pub(super) buffer: Buffer,
    pub(super) cursor: Cursor,
    pub(super) empty_lines: EmptyLines,
}

impl Session {
    /// Start on an empty document.
    pub fn new(empty_lines: EmptyLines) -> Self {
        let (buffer, cursor) = Buffer::create();
        Self {
            buffer,
            cursor,
            empty_lines,
        }
    }

    pub const fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub const fn empty_lines(&self) -> EmptyLines {
        self.empty_lines
    }

    /// Row and column of the cursor.
    pub fn position(&self) -> Position {
        self.buffer.position(self.cursor)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(EmptyLines::default())
    }
}
