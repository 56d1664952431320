use std::fmt;

use tracing::{debug, trace};

use super::arena::{Arena, Id};

/// The character stored in every line's terminal node.
pub const NEWLINE: char = '\n';

pub(super) type CharId = Id<CharNode>;
pub(super) type LineId = Id<Line>;

/// One character slot of a line, including the terminal newline.
#[derive(Debug, Clone, Copy)]
pub(super) struct CharNode {
    pub(super) value: char,
    pub(super) prev: Option<CharId>,
    pub(super) next: Option<CharId>,
    /// Owning line. Not an ownership edge: the line reaches its nodes through `head`.
    pub(super) line: LineId,
}

impl CharNode {
    const fn sentinel(line: LineId) -> Self {
        Self {
            value: NEWLINE,
            prev: None,
            next: None,
            line,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(super) struct Line {
    pub(super) head: CharId,
    pub(super) prev: Option<LineId>,
    pub(super) next: Option<LineId>,
}

/// A position in the buffer: the character the cursor sits in front of.
///
/// Cursors are plain ids into the buffer's node storage. Every operation
/// that edits or moves returns the cursor to use next; a cursor whose node
/// was deleted becomes stale and must not be passed back in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor(CharId);

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Row and column of a cursor, derived by walking the structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    /// Zero-based line index.
    pub row: usize,
    /// Zero-based character offset within the line.
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.col)
    }
}

/// A text buffer stored as a linked list of lines, each a linked list of
/// characters ending in a [`NEWLINE`] node.
///
/// Nodes live in arenas and link to each other by id. Row and column are
/// never stored; they are recovered by walking links (see [`Buffer::position`]).
pub struct Buffer {
    pub(super) chars: Arena<CharNode>,
    pub(super) lines: Arena<Line>,
    /// First line of the document.
    pub(super) head_line: LineId,
}

impl Buffer {
    /// Create an empty document: one line holding only its newline.
    ///
    /// The returned cursor sits on that newline.
    pub fn create() -> (Self, Cursor) {
        let mut chars = Arena::new();
        let mut lines = Arena::new();
        let line = lines.next_id();
        let head = chars.alloc(CharNode::sentinel(line));
        let head_line = lines.alloc(Line {
            head,
            prev: None,
            next: None,
        });
        debug_assert_eq!(head_line, line);
        let buffer = Self {
            chars,
            lines,
            head_line,
        };
        (buffer, Cursor(head))
    }

    /// Build a document by typing `text` into an empty buffer.
    ///
    /// Each `'\n'` starts a new line, so `"ab\n"` yields the lines `ab` and an
    /// empty one. The cursor is returned at the start of the first line.
    pub fn from_text(text: &str) -> (Self, Cursor) {
        let (mut buffer, mut cursor) = Self::create();
        for ch in text.chars() {
            cursor = buffer.insert(cursor, ch);
        }
        let first = buffer.lines[buffer.head_line].head;
        (buffer, Cursor(first))
    }

    /// Insert `ch` immediately before the cursor, within the cursor's line.
    ///
    /// The cursor keeps pointing at the same node, so consecutive inserts
    /// build text to the left of it. Inserting [`NEWLINE`] is a line split.
    pub fn insert(&mut self, cursor: Cursor, ch: char) -> Cursor {
        if ch == NEWLINE {
            return self.split_line(cursor);
        }
        let at = cursor.0;
        let CharNode { prev, line, .. } = self.chars[at];
        let node = self.chars.alloc(CharNode {
            value: ch,
            prev,
            next: Some(at),
            line,
        });
        match prev {
            Some(prev) => self.chars[prev].next = Some(node),
            None => self.lines[line].head = node,
        }
        self.chars[at].prev = Some(node);
        trace!(?ch, ?node, "insert");
        cursor
    }

    /// Break the line at the cursor ("enter").
    ///
    /// - On the terminal newline, the cursor's node moves down into a new
    ///   line and the original line gets a fresh newline.
    /// - Inside a line, the cursor's node and everything after it move into
    ///   a new line below.
    /// - At the start of a non-empty line, an empty line is opened above and
    ///   the cursor stays where it is.
    pub fn split_line(&mut self, cursor: Cursor) -> Cursor {
        let at = cursor.0;
        let CharNode {
            prev, next, line, ..
        } = self.chars[at];

        if next.is_none() {
            let fresh = self.chars.alloc(CharNode {
                value: NEWLINE,
                prev,
                next: None,
                line,
            });
            match prev {
                Some(prev) => self.chars[prev].next = Some(fresh),
                None => self.lines[line].head = fresh,
            }
            let below = self.link_line_after(line, at);
            let node = &mut self.chars[at];
            node.prev = None;
            node.line = below;
            debug!(?line, ?below, "split at end of line");
            return cursor;
        }

        let Some(prev) = prev else {
            let above = self.open_empty_line_before(line);
            debug!(?line, ?above, "split at start of line");
            return cursor;
        };

        let fresh = self.chars.alloc(CharNode {
            value: NEWLINE,
            prev: Some(prev),
            next: None,
            line,
        });
        self.chars[prev].next = Some(fresh);
        self.chars[at].prev = None;
        let below = self.link_line_after(line, at);
        let moved = self.adopt_from(at, below);
        debug!(?line, ?below, moved, "split inside line");
        cursor
    }

    /// Delete the character under the cursor, or join the next line onto
    /// this one when the cursor is on the terminal newline.
    ///
    /// Returns the node that now occupies the cursor's position. Deleting
    /// the newline of the last line does nothing.
    pub fn delete_at_cursor(&mut self, cursor: Cursor) -> Cursor {
        let at = cursor.0;
        let CharNode {
            prev, next, line, ..
        } = self.chars[at];

        if let Some(next) = next {
            match prev {
                Some(prev) => self.chars[prev].next = Some(next),
                None => self.lines[line].head = next,
            }
            self.chars[next].prev = prev;
            self.release_char(at);
            trace!(node = ?at, "delete");
            return Cursor(next);
        }

        let Some(below) = self.lines[line].next else {
            return cursor;
        };

        let Some(prev) = prev else {
            // Nothing to splice from an empty line: drop the line itself and
            // let the one below take its place.
            let above = self.lines[line].prev;
            match above {
                Some(above) => self.lines[above].next = Some(below),
                None => self.head_line = below,
            }
            self.lines[below].prev = above;
            let head = self.lines[below].head;
            self.release_line(line);
            self.release_char(at);
            debug!(removed = ?line, ?below, "join into empty line");
            return Cursor(head);
        };

        let Line {
            head: spliced,
            next: after,
            ..
        } = self.lines[below];
        self.chars[prev].next = Some(spliced);
        self.chars[spliced].prev = Some(prev);
        let moved = self.adopt_from(spliced, line);
        self.lines[line].next = after;
        if let Some(after) = after {
            self.lines[after].prev = Some(line);
        }
        self.release_line(below);
        self.release_char(at);
        debug!(?line, removed = ?below, moved, "join lines");
        Cursor(spliced)
    }

    /// Move the cursor in the given direction.
    pub fn move_cursor(&self, cursor: Cursor, direction: Direction) -> Cursor {
        match direction {
            Direction::Left => self.move_left(cursor),
            Direction::Right => self.move_right(cursor),
            Direction::Up => self.move_up(cursor),
            Direction::Down => self.move_down(cursor),
        }
    }

    /// One character left, wrapping to the newline of the line above.
    pub fn move_left(&self, cursor: Cursor) -> Cursor {
        let node = &self.chars[cursor.0];
        if let Some(prev) = node.prev {
            return Cursor(prev);
        }
        match self.lines[node.line].prev {
            Some(above) => Cursor(self.tail_of(above)),
            None => cursor,
        }
    }

    /// One character right, wrapping to the start of the line below.
    pub fn move_right(&self, cursor: Cursor) -> Cursor {
        let node = &self.chars[cursor.0];
        if let Some(next) = node.next {
            return Cursor(next);
        }
        match self.lines[node.line].next {
            Some(below) => Cursor(self.lines[below].head),
            None => cursor,
        }
    }

    /// Start of the line above. The column is not kept.
    pub fn move_up(&self, cursor: Cursor) -> Cursor {
        match self.lines[self.line_of(cursor)].prev {
            Some(above) => Cursor(self.lines[above].head),
            None => cursor,
        }
    }

    /// Start of the line below. The column is not kept.
    pub fn move_down(&self, cursor: Cursor) -> Cursor {
        match self.lines[self.line_of(cursor)].next {
            Some(below) => Cursor(self.lines[below].head),
            None => cursor,
        }
    }

    /// Start of the current line.
    pub fn move_home(&self, cursor: Cursor) -> Cursor {
        let mut at = cursor.0;
        while let Some(prev) = self.chars[at].prev {
            at = prev;
        }
        Cursor(at)
    }

    /// Terminal newline of the current line.
    pub fn move_end(&self, cursor: Cursor) -> Cursor {
        let mut at = cursor.0;
        while let Some(next) = self.chars[at].next {
            at = next;
        }
        Cursor(at)
    }

    /// The character under the cursor.
    pub fn char_at(&self, cursor: Cursor) -> char {
        self.chars[cursor.0].value
    }

    /// Whether the cursor sits on its line's terminal newline.
    pub fn is_line_end(&self, cursor: Cursor) -> bool {
        self.chars[cursor.0].next.is_none()
    }

    /// Whether `cursor` still refers to a node of this buffer.
    pub fn is_live(&self, cursor: Cursor) -> bool {
        self.chars.contains(cursor.0)
    }

    /// Row and column of the cursor. Walks the line and the lines above it.
    pub fn position(&self, cursor: Cursor) -> Position {
        let mut col = 0;
        let mut at = cursor.0;
        while let Some(prev) = self.chars[at].prev {
            col += 1;
            at = prev;
        }
        let mut row = 0;
        let mut line = self.chars[at].line;
        while let Some(above) = self.lines[line].prev {
            row += 1;
            line = above;
        }
        Position::new(row, col)
    }

    /// Cursor at the start of the first line.
    pub fn start(&self) -> Cursor {
        Cursor(self.lines[self.head_line].head)
    }

    /// Number of lines in the document.
    pub const fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Number of character nodes, newlines included.
    pub const fn node_count(&self) -> usize {
        self.chars.len()
    }

    // --- Crate-internal structure access ---

    pub(super) fn node(&self, cursor: Cursor) -> CharNode {
        self.chars[cursor.0]
    }

    pub(super) fn line_of(&self, cursor: Cursor) -> LineId {
        self.chars[cursor.0].line
    }

    /// Lines from the first to the last.
    pub(super) fn line_ids(&self) -> impl Iterator<Item = LineId> + '_ {
        std::iter::successors(Some(self.head_line), |&line| self.lines[line].next)
    }

    /// Nodes of `line` from head to newline.
    pub(super) fn char_ids(&self, line: LineId) -> impl Iterator<Item = CharId> + '_ {
        std::iter::successors(Some(self.lines[line].head), |&node| self.chars[node].next)
    }

    // --- Private helpers ---

    fn tail_of(&self, line: LineId) -> CharId {
        self.move_end(Cursor(self.lines[line].head)).0
    }

    /// Create a line after `line` whose first node is `head`.
    ///
    /// Only the line sequence is linked; the caller fixes up `head`'s own
    /// links and back-reference.
    fn link_line_after(&mut self, line: LineId, head: CharId) -> LineId {
        let after = self.lines[line].next;
        let below = self.lines.alloc(Line {
            head,
            prev: Some(line),
            next: after,
        });
        if let Some(after) = after {
            self.lines[after].prev = Some(below);
        }
        self.lines[line].next = Some(below);
        below
    }

    fn open_empty_line_before(&mut self, line: LineId) -> LineId {
        let above = self.lines[line].prev;
        let id = self.lines.next_id();
        let head = self.chars.alloc(CharNode::sentinel(id));
        let new_line = self.lines.alloc(Line {
            head,
            prev: above,
            next: Some(line),
        });
        debug_assert_eq!(new_line, id);
        match above {
            Some(above) => self.lines[above].next = Some(new_line),
            None => self.head_line = new_line,
        }
        self.lines[line].prev = Some(new_line);
        new_line
    }

    /// Point `from` and every node after it at `line`. Returns how many moved.
    fn adopt_from(&mut self, from: CharId, line: LineId) -> usize {
        let mut moved = 0;
        let mut walk = Some(from);
        while let Some(id) = walk {
            let node = &mut self.chars[id];
            node.line = line;
            walk = node.next;
            moved += 1;
        }
        moved
    }

    fn release_char(&mut self, id: CharId) {
        let freed = self.chars.free(id);
        debug_assert!(freed.is_some(), "character node {id:?} released twice");
    }

    fn release_line(&mut self, id: LineId) {
        let freed = self.lines.free(id);
        debug_assert!(freed.is_some(), "line {id:?} released twice");
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("lines", &self.lines.len())
            .field("nodes", &self.chars.len())
            .field("head_line", &self.head_line)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::EmptyLines;

    fn text(buf: &Buffer) -> Vec<String> {
        buf.render_text(EmptyLines::Render)
    }

    fn assert_sound(buf: &Buffer) {
        if let Err(err) = buf.check_invariants() {
            panic!("topology broken: {err}");
        }
    }

    /// Cursor at `row`, `col`, reached with down/right moves from the start.
    fn cursor_at(buf: &Buffer, row: usize, col: usize) -> Cursor {
        let mut cursor = buf.start();
        for _ in 0..row {
            cursor = buf.move_down(cursor);
        }
        for _ in 0..col {
            cursor = buf.move_right(cursor);
        }
        assert_eq!(buf.position(cursor), Position::new(row, col));
        cursor
    }

    // --- Construction ---

    #[test]
    fn test_create_has_one_empty_line() {
        let (buf, cursor) = Buffer::create();
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.node_count(), 1);
        assert_eq!(buf.char_at(cursor), NEWLINE);
        assert!(buf.is_line_end(cursor));
        assert_eq!(text(&buf), vec!["\n"]);
        assert_sound(&buf);
    }

    #[test]
    fn test_from_text_builds_lines() {
        let (buf, cursor) = Buffer::from_text("ab\ncd");
        assert_eq!(text(&buf), vec!["ab\n", "cd\n"]);
        assert_eq!(buf.position(cursor), Position::new(0, 0));
        assert_sound(&buf);
    }

    #[test]
    fn test_from_text_trailing_newline_adds_empty_line() {
        let (buf, _) = Buffer::from_text("ab\n");
        assert_eq!(text(&buf), vec!["ab\n", "\n"]);
    }

    // --- Insert ---

    #[test]
    fn test_insert_builds_text_left_of_cursor() {
        let (mut buf, cursor) = Buffer::create();
        let cursor = buf.insert(cursor, 'h');
        let cursor = buf.insert(cursor, 'i');
        assert_eq!(buf.render_line(cursor, EmptyLines::Suppress), "hi\n");
        assert_eq!(buf.char_at(cursor), NEWLINE);
        assert_eq!(buf.position(cursor), Position::new(0, 2));
        assert_sound(&buf);
    }

    #[test]
    fn test_insert_at_line_start_moves_head() {
        let (mut buf, cursor) = Buffer::from_text("bc");
        let cursor = buf.insert(cursor, 'a');
        assert_eq!(buf.char_at(cursor), 'b');
        assert_eq!(text(&buf), vec!["abc\n"]);
        assert_eq!(buf.char_at(buf.start()), 'a');
        assert_sound(&buf);
    }

    #[test]
    fn test_insert_in_middle() {
        let (mut buf, _) = Buffer::from_text("ac");
        let cursor = cursor_at(&buf, 0, 1);
        buf.insert(cursor, 'b');
        assert_eq!(text(&buf), vec!["abc\n"]);
        assert_sound(&buf);
    }

    #[test]
    fn test_insert_newline_splits() {
        let (mut buf, _) = Buffer::from_text("abcd");
        let cursor = cursor_at(&buf, 0, 2);
        let cursor = buf.insert(cursor, NEWLINE);
        assert_eq!(text(&buf), vec!["ab\n", "cd\n"]);
        assert_eq!(buf.position(cursor), Position::new(1, 0));
        assert_sound(&buf);
    }

    // --- Split ---

    #[test]
    fn test_split_at_end_relocates_cursor_node() {
        let (mut buf, _) = Buffer::from_text("hi");
        let end = cursor_at(&buf, 0, 2);
        let cursor = buf.split_line(end);
        assert_eq!(cursor, end);
        assert_eq!(text(&buf), vec!["hi\n", "\n"]);
        assert_eq!(buf.position(cursor), Position::new(1, 0));
        assert_sound(&buf);
    }

    #[test]
    fn test_split_on_empty_line_adds_line_below() {
        let (mut buf, cursor) = Buffer::create();
        let cursor = buf.split_line(cursor);
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.position(cursor), Position::new(1, 0));
        assert_sound(&buf);
    }

    #[test]
    fn test_split_inside_line_moves_tail() {
        let (mut buf, _) = Buffer::from_text("abcd\nxy");
        let at = cursor_at(&buf, 0, 2);
        let cursor = buf.split_line(at);
        assert_eq!(cursor, at);
        assert_eq!(buf.char_at(cursor), 'c');
        assert_eq!(text(&buf), vec!["ab\n", "cd\n", "xy\n"]);
        assert_eq!(buf.position(cursor), Position::new(1, 0));
        assert_sound(&buf);
    }

    #[test]
    fn test_split_at_line_start_opens_line_above() {
        let (mut buf, _) = Buffer::from_text("ab\ncd");
        let at = cursor_at(&buf, 1, 0);
        let cursor = buf.split_line(at);
        assert_eq!(cursor, at);
        assert_eq!(text(&buf), vec!["ab\n", "\n", "cd\n"]);
        assert_eq!(buf.position(cursor), Position::new(2, 0));
        assert_sound(&buf);
    }

    #[test]
    fn test_split_at_start_of_first_line_moves_head_line() {
        let (mut buf, cursor) = Buffer::from_text("ab");
        let cursor = buf.split_line(cursor);
        assert_eq!(text(&buf), vec!["\n", "ab\n"]);
        assert_eq!(buf.position(cursor), Position::new(1, 0));
        assert_eq!(buf.char_at(buf.start()), NEWLINE);
        assert_sound(&buf);
    }

    #[test]
    fn test_split_line_start_on_empty_line_is_end_case() {
        // Head and newline coincide: this is the end-of-line split, not the
        // open-above one.
        let (mut buf, _) = Buffer::from_text("ab\n\ncd");
        let at = cursor_at(&buf, 1, 0);
        let cursor = buf.split_line(at);
        assert_eq!(text(&buf), vec!["ab\n", "\n", "\n", "cd\n"]);
        assert_eq!(buf.position(cursor), Position::new(2, 0));
        assert_sound(&buf);
    }

    // --- Delete ---

    #[test]
    fn test_delete_returns_successor() {
        let (mut buf, _) = Buffer::from_text("abc");
        let cursor = cursor_at(&buf, 0, 1);
        let cursor = buf.delete_at_cursor(cursor);
        assert_eq!(buf.char_at(cursor), 'c');
        assert_eq!(text(&buf), vec!["ac\n"]);
        assert_sound(&buf);
    }

    #[test]
    fn test_delete_first_char_moves_head() {
        let (mut buf, cursor) = Buffer::from_text("abc");
        let cursor = buf.delete_at_cursor(cursor);
        assert_eq!(buf.char_at(cursor), 'b');
        assert_eq!(buf.start(), cursor);
        assert_sound(&buf);
    }

    #[test]
    fn test_delete_invalidates_old_cursor() {
        let (mut buf, cursor) = Buffer::from_text("abc");
        buf.delete_at_cursor(cursor);
        assert!(!buf.is_live(cursor));
    }

    #[test]
    fn test_delete_newline_of_last_line_is_noop() {
        let (mut buf, _) = Buffer::from_text("ab");
        let end = cursor_at(&buf, 0, 2);
        assert_eq!(buf.delete_at_cursor(end), end);
        assert_eq!(text(&buf), vec!["ab\n"]);
        assert_sound(&buf);
    }

    #[test]
    fn test_delete_newline_joins_next_line() {
        let (mut buf, _) = Buffer::from_text("ab\ncd\nef");
        let end = cursor_at(&buf, 0, 2);
        let cursor = buf.delete_at_cursor(end);
        assert_eq!(buf.char_at(cursor), 'c');
        assert_eq!(text(&buf), vec!["abcd\n", "ef\n"]);
        assert_eq!(buf.position(cursor), Position::new(0, 2));
        assert_sound(&buf);
    }

    #[test]
    fn test_delete_newline_joins_empty_next_line() {
        let (mut buf, _) = Buffer::from_text("ab\n");
        let end = cursor_at(&buf, 0, 2);
        let cursor = buf.delete_at_cursor(end);
        assert_eq!(buf.char_at(cursor), NEWLINE);
        assert_eq!(text(&buf), vec!["ab\n"]);
        assert_eq!(buf.line_count(), 1);
        assert_sound(&buf);
    }

    #[test]
    fn test_delete_on_empty_line_removes_it() {
        let (mut buf, _) = Buffer::from_text("ab\n\ncd");
        let empty = cursor_at(&buf, 1, 0);
        let cursor = buf.delete_at_cursor(empty);
        assert_eq!(buf.char_at(cursor), 'c');
        assert_eq!(text(&buf), vec!["ab\n", "cd\n"]);
        assert_eq!(buf.position(cursor), Position::new(1, 0));
        assert_eq!(buf.node_count(), 6);
        assert_sound(&buf);
    }

    #[test]
    fn test_delete_on_empty_first_line_moves_head_line() {
        let (mut buf, cursor) = Buffer::from_text("\ncd");
        let cursor = buf.delete_at_cursor(cursor);
        assert_eq!(buf.start(), cursor);
        assert_eq!(text(&buf), vec!["cd\n"]);
        assert_eq!(buf.move_up(cursor), cursor);
        assert_sound(&buf);
    }

    #[test]
    fn test_delete_on_empty_last_line_is_noop() {
        let (mut buf, _) = Buffer::from_text("ab\n");
        let last = cursor_at(&buf, 1, 0);
        assert_eq!(buf.delete_at_cursor(last), last);
        assert_eq!(buf.line_count(), 2);
    }

    // --- Navigation ---

    #[test]
    fn test_move_left_wraps_to_previous_newline() {
        let (buf, _) = Buffer::from_text("ab\ncd");
        let cursor = buf.move_left(cursor_at(&buf, 1, 0));
        assert_eq!(buf.position(cursor), Position::new(0, 2));
        assert!(buf.is_line_end(cursor));
    }

    #[test]
    fn test_move_right_wraps_to_next_head() {
        let (buf, _) = Buffer::from_text("ab\ncd");
        let cursor = buf.move_right(cursor_at(&buf, 0, 2));
        assert_eq!(buf.position(cursor), Position::new(1, 0));
    }

    #[test]
    fn test_boundary_moves_are_noops() {
        let (buf, start) = Buffer::from_text("ab\ncd");
        assert_eq!(buf.move_left(start), start);
        assert_eq!(buf.move_up(start), start);
        let end = cursor_at(&buf, 1, 2);
        assert_eq!(buf.move_right(end), end);
        assert_eq!(buf.move_end(end), end);
        assert_eq!(buf.move_down(end), end);
        assert_eq!(buf.move_home(start), start);
    }

    #[test]
    fn test_vertical_moves_land_at_line_start() {
        let (buf, start) = Buffer::from_text("one\ntwo\nthree");
        let cursor = buf.move_down(buf.move_right(start));
        assert_eq!(buf.position(cursor), Position::new(1, 0));
        let cursor = buf.move_down(cursor);
        let cursor = buf.move_up(cursor);
        assert_eq!(buf.position(cursor), Position::new(1, 0));
    }

    #[test]
    fn test_home_and_end() {
        let (buf, _) = Buffer::from_text("hello");
        let mid = cursor_at(&buf, 0, 3);
        assert_eq!(buf.position(buf.move_home(mid)), Position::new(0, 0));
        let end = buf.move_end(mid);
        assert_eq!(buf.position(end), Position::new(0, 5));
        assert_eq!(buf.char_at(end), NEWLINE);
    }

    #[test]
    fn test_move_cursor_dispatches_direction() {
        let (buf, start) = Buffer::from_text("ab\ncd");
        assert_eq!(
            buf.move_cursor(start, Direction::Right),
            buf.move_right(start)
        );
        assert_eq!(buf.move_cursor(start, Direction::Down), buf.move_down(start));
        assert_eq!(buf.move_cursor(start, Direction::Left), start);
        assert_eq!(buf.move_cursor(start, Direction::Up), start);
    }

    // --- Complex editing sequences ---

    #[test]
    fn test_split_then_join_restores_line() {
        let (mut buf, _) = Buffer::from_text("abcd");
        let cursor = buf.split_line(cursor_at(&buf, 0, 2));
        let end = buf.move_left(cursor);
        let cursor = buf.delete_at_cursor(end);
        assert_eq!(text(&buf), vec!["abcd\n"]);
        assert_eq!(buf.char_at(cursor), 'c');
        assert_eq!(buf.node_count(), 5);
        assert_sound(&buf);
    }

    #[test]
    fn test_freed_slots_are_reused() {
        let (mut buf, cursor) = Buffer::create();
        let cursor = buf.insert(cursor, 'a');
        let first = buf.start();
        buf.delete_at_cursor(first);
        buf.insert(cursor, 'b');
        assert_eq!(buf.node_count(), 2);
        assert_sound(&buf);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone, Copy)]
        enum Op {
            Insert(char),
            Split,
            Delete,
            Move(Direction),
            Home,
            End,
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                3 => prop::char::range('a', 'e').prop_map(Op::Insert),
                1 => Just(Op::Split),
                2 => Just(Op::Delete),
                1 => Just(Op::Move(Direction::Left)),
                1 => Just(Op::Move(Direction::Right)),
                1 => Just(Op::Move(Direction::Up)),
                1 => Just(Op::Move(Direction::Down)),
                1 => Just(Op::Home),
                1 => Just(Op::End),
            ]
        }

        /// Plain vector model of the document with a row/column cursor.
        struct Model {
            lines: Vec<Vec<char>>,
            row: usize,
            col: usize,
        }

        impl Model {
            fn apply(&mut self, op: Op) {
                let len = self.lines[self.row].len();
                let last = self.lines.len() - 1;
                match op {
                    Op::Insert(ch) => {
                        self.lines[self.row].insert(self.col, ch);
                        self.col += 1;
                    }
                    Op::Split if self.col == len => {
                        self.lines.insert(self.row + 1, Vec::new());
                        self.row += 1;
                        self.col = 0;
                    }
                    Op::Split if self.col == 0 => {
                        self.lines.insert(self.row, Vec::new());
                        self.row += 1;
                    }
                    Op::Split => {
                        let tail = self.lines[self.row].split_off(self.col);
                        self.lines.insert(self.row + 1, tail);
                        self.row += 1;
                        self.col = 0;
                    }
                    Op::Delete if self.col < len => {
                        self.lines[self.row].remove(self.col);
                    }
                    Op::Delete if self.row < last => {
                        let below = self.lines.remove(self.row + 1);
                        self.lines[self.row].extend(below);
                    }
                    Op::Delete => {}
                    Op::Move(Direction::Left) if self.col > 0 => self.col -= 1,
                    Op::Move(Direction::Left) if self.row > 0 => {
                        self.row -= 1;
                        self.col = self.lines[self.row].len();
                    }
                    Op::Move(Direction::Right) if self.col < len => self.col += 1,
                    Op::Move(Direction::Right | Direction::Down) if self.row < last => {
                        self.row += 1;
                        self.col = 0;
                    }
                    Op::Move(Direction::Up) if self.row > 0 => {
                        self.row -= 1;
                        self.col = 0;
                    }
                    Op::Move(_) => {}
                    Op::Home => self.col = 0,
                    Op::End => self.col = len,
                }
            }

            fn rendered(&self) -> Vec<String> {
                self.lines
                    .iter()
                    .map(|line| line.iter().chain(std::iter::once(&NEWLINE)).collect())
                    .collect()
            }
        }

        fn apply(buf: &mut Buffer, cursor: Cursor, op: Op) -> Cursor {
            match op {
                Op::Insert(ch) => buf.insert(cursor, ch),
                Op::Split => buf.split_line(cursor),
                Op::Delete => buf.delete_at_cursor(cursor),
                Op::Move(direction) => buf.move_cursor(cursor, direction),
                Op::Home => buf.move_home(cursor),
                Op::End => buf.move_end(cursor),
            }
        }

        proptest! {
            #[test]
            fn topology_holds_after_any_edit_sequence(
                ops in prop::collection::vec(op(), 0..200),
            ) {
                let (mut buf, mut cursor) = Buffer::create();
                for op in ops {
                    cursor = apply(&mut buf, cursor, op);
                    prop_assert!(buf.check_invariants().is_ok(), "after {:?}", op);
                    prop_assert!(buf.is_live(cursor));
                }
            }

            #[test]
            fn buffer_matches_vector_model(
                ops in prop::collection::vec(op(), 0..200),
            ) {
                let (mut buf, mut cursor) = Buffer::create();
                let mut model = Model { lines: vec![Vec::new()], row: 0, col: 0 };
                for op in ops {
                    cursor = apply(&mut buf, cursor, op);
                    model.apply(op);
                    prop_assert_eq!(
                        buf.position(cursor),
                        Position::new(model.row, model.col),
                        "after {:?}", op
                    );
                }
                prop_assert_eq!(buf.render_text(EmptyLines::Render), model.rendered());
                prop_assert_eq!(buf.line_count(), model.lines.len());
            }
        }
    }
}
