//! Turning lines back into text.

use super::buffer::{Buffer, Cursor, LineId, NEWLINE};

/// What to emit for a line that holds nothing but its newline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmptyLines {
    /// Emit nothing for empty lines.
    #[default]
    Suppress,
    /// Emit the bare newline.
    Render,
}

impl Buffer {
    /// Text of the cursor's line, trailing newline included.
    pub fn render_line(&self, cursor: Cursor, policy: EmptyLines) -> String {
        self.render_line_id(self.line_of(cursor), policy)
    }

    /// Every line, first to last.
    pub fn render_text(&self, policy: EmptyLines) -> Vec<String> {
        self.line_ids()
            .map(|line| self.render_line_id(line, policy))
            .collect()
    }

    /// Whole document as one string.
    pub fn to_text(&self, policy: EmptyLines) -> String {
        self.render_text(policy).concat()
    }

    fn render_line_id(&self, line: LineId, policy: EmptyLines) -> String {
        let head = self.lines[line].head;
        if policy == EmptyLines::Suppress && self.chars[head].value == NEWLINE {
            return String::new();
        }
        self.char_ids(line).map(|id| self.chars[id].value).collect()
    }
}
