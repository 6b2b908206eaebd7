//! Editor view abstraction.
//!
//! The engine never owns an editor. It holds an [`EditorId`] and
//! re-resolves it through the host on every use, so a closed or
//! replaced editor degrades to a state transition instead of a stale
//! handle.

use crate::position::{Position, Selection};

/// Opaque identifier for a host editor view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EditorId(pub u64);

/// Render style for a label decoration, resolved from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecorationStyle {
    /// Label text color.
    pub foreground: String,
    /// Label background color.
    pub background: String,
}

/// An overlay label to render at a display position.
///
/// The position here already includes the configured display offset;
/// the logical target column is kept separately by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoration {
    /// Display position of the label glyphs.
    pub position: Position,
    /// Label text (the code the user types).
    pub label: String,
    /// Render style.
    pub style: DecorationStyle,
}

/// Direction for a one-character boundary nudge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nudge {
    Left,
    Right,
}

/// Host editor view consumed by the engine.
///
/// Selections are ordered; the last entry is the most recent one and
/// its active point is treated as the caret.
pub trait EditorView {
    /// Current selections, ordered, last = most recent.
    fn selections(&self) -> Vec<Selection>;

    /// Replace the full selection set.
    fn set_selections(&mut self, selections: Vec<Selection>);

    /// Scroll the viewport so the position is visible, centered.
    fn reveal(&mut self, position: Position);

    /// Replace the overlay decorations owned by the engine.
    fn set_decorations(&mut self, decorations: Vec<Decoration>);

    /// Remove all engine-owned overlay decorations.
    fn clear_decorations(&mut self);

    /// Move the caret (or selection boundary when `extend` is set) one
    /// character in the given direction.
    fn nudge_boundary(&mut self, direction: Nudge, extend: bool);
}
