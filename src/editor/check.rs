//! Structural self-check for [`Buffer`].

use thiserror::Error;

use super::buffer::{Buffer, NEWLINE};

/// A broken structural invariant, located by row and column.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    #[error("first line has a predecessor")]
    HeadLineHasPrev,
    #[error("line {row}: next line does not link back")]
    LineBacklink { row: usize },
    #[error("line {row}: first character has a predecessor")]
    HeadCharHasPrev { row: usize },
    #[error("line {row}, col {col}: next character does not link back")]
    CharBacklink { row: usize, col: usize },
    #[error("line {row}, col {col}: character belongs to another line")]
    WrongOwner { row: usize, col: usize },
    #[error("line {row}, col {col}: newline before end of line")]
    StrayNewline { row: usize, col: usize },
    #[error("line {row}: does not end with a newline")]
    MissingNewline { row: usize },
    #[error("links form a cycle")]
    Cycle,
    #[error("{reachable} of {live} {kind} reachable from the first line")]
    Unreachable {
        kind: &'static str,
        reachable: usize,
        live: usize,
    },
}

impl Buffer {
    /// Walk the whole document and verify every link.
    ///
    /// Checks that lines and characters link both ways, that every node's
    /// owning line is the line it is reached from, that each line ends in
    /// exactly one newline, and that no live node is unreachable.
    ///
    /// # Errors
    /// Returns the first violation found.
    pub fn check_invariants(&self) -> Result<(), TopologyError> {
        if self.lines[self.head_line].prev.is_some() {
            return Err(TopologyError::HeadLineHasPrev);
        }

        let mut line_total = 0;
        let mut char_total = 0;
        let mut line = Some(self.head_line);
        while let Some(current) = line {
            let row = line_total;
            line_total += 1;
            if line_total > self.lines.len() {
                return Err(TopologyError::Cycle);
            }

            let record = &self.lines[current];
            if let Some(next) = record.next {
                if self.lines[next].prev != Some(current) {
                    return Err(TopologyError::LineBacklink { row });
                }
            }
            if self.chars[record.head].prev.is_some() {
                return Err(TopologyError::HeadCharHasPrev { row });
            }

            let mut col = 0;
            let mut node = record.head;
            loop {
                char_total += 1;
                if char_total > self.chars.len() {
                    return Err(TopologyError::Cycle);
                }
                let current_node = &self.chars[node];
                if current_node.line != current {
                    return Err(TopologyError::WrongOwner { row, col });
                }
                let Some(next) = current_node.next else {
                    if current_node.value != NEWLINE {
                        return Err(TopologyError::MissingNewline { row });
                    }
                    break;
                };
                if current_node.value == NEWLINE {
                    return Err(TopologyError::StrayNewline { row, col });
                }
                if self.chars[next].prev != Some(node) {
                    return Err(TopologyError::CharBacklink { row, col });
                }
                node = next;
                col += 1;
            }
            line = record.next;
        }

        if line_total != self.lines.len() {
            return Err(TopologyError::Unreachable {
                kind: "lines",
                reachable: line_total,
                live: self.lines.len(),
            });
        }
        if char_total != self.chars.len() {
            return Err(TopologyError::Unreachable {
                kind: "characters",
                reachable: char_total,
                live: self.chars.len(),
            });
        }
        Ok(())
    }
}
