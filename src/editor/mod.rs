//! Linked-list text buffer.
//!
//! A document is a doubly-linked list of lines; each line is a
//! doubly-linked list of characters ending in a newline node. A [`Cursor`]
//! is a reference to one character node, and every edit or movement takes a
//! cursor and hands back the one to use next.

mod arena;
mod buffer;
mod case;
mod check;
mod render;

pub use buffer::{Buffer, Cursor, Direction, NEWLINE, Position};
pub use case::EditCase;
pub use check::TopologyError;
pub use render::EmptyLines;
