// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. command::CommandError)
    clippy::module_name_repetitions
)]

//! # Linkpad
//!
//! An in-memory text buffer driven by single-letter editing commands.
//!
//! The document is a doubly-linked list of lines, each a doubly-linked list
//! of characters ending in a newline node. A cursor is a reference to one
//! character node; row and column are never stored, only derived by
//! walking links.
//!
//! ## Modules
//!
//! - [`editor`]: The linked buffer, cursor movement and rendering
//! - [`command`]: The single-letter command protocol
//! - [`app`]: Session state, the command read loop and the edit journal
//! - [`config`]: Flag files and defaults

pub mod app;
pub mod command;
pub mod config;
pub mod editor;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Effect, Session};
    pub use crate::command::Command;
    pub use crate::editor::{Buffer, Cursor, Direction, EditCase, EmptyLines};
}
