//! Editor coordinate types.
//!
//! Positions are zero-based `(line, char)` pairs in editor coordinate
//! space; columns count characters, not bytes.

/// A position in a text document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    /// Line number (0-indexed).
    pub line: usize,
    /// Character offset within the line (0-indexed).
    pub char: usize,
}

impl Position {
    /// Create a position at the given line and character.
    pub fn new(line: usize, char: usize) -> Self {
        Self { line, char }
    }
}

/// A text selection with an anchor and an active point.
///
/// The active point is the caret; it moves while the anchor stays put.
/// An empty selection (anchor == active) is a plain cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Fixed end of the selection.
    pub anchor: Position,
    /// Moving end of the selection (caret).
    pub active: Position,
}

impl Selection {
    /// Create a selection spanning anchor to active.
    pub fn new(anchor: Position, active: Position) -> Self {
        Self { anchor, active }
    }

    /// Create an empty selection (a bare cursor) at the given position.
    pub fn caret(position: Position) -> Self {
        Self {
            anchor: position,
            active: position,
        }
    }

    /// Returns true if the selection contains no text.
    pub fn is_empty(&self) -> bool {
        self.anchor == self.active
    }

    /// Leftmost end of the selection.
    pub fn start(&self) -> Position {
        self.anchor.min(self.active)
    }

    /// Rightmost end of the selection.
    pub fn end(&self) -> Position {
        self.anchor.max(self.active)
    }
}
