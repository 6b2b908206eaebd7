//! Visible-line snapshots and the host-facing traits.

use crate::command::{HostEvent, JumpCommand};
use crate::editor::{EditorId, EditorView};
use crate::subscription::Subscription;

/// One currently visible line of an editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleLine {
    /// Line number in the document (0-indexed).
    pub number: usize,
    /// Line text without the trailing newline.
    pub text: String,
    /// True when the line is empty or whitespace-only.
    pub is_blank: bool,
}

impl VisibleLine {
    /// Build a visible line, deriving the blank flag from the text.
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        let text = text.into();
        let is_blank = text.trim().is_empty();
        Self {
            number,
            text,
            is_blank,
        }
    }
}

/// Provides the currently visible lines of an editor.
///
/// Recomputed fresh on every call; the returned lines are in viewport
/// order and may cover disjoint ranges (splits, folds).
pub trait LineProvider {
    fn visible_lines(&self, editor: EditorId) -> Vec<VisibleLine>;
}

/// The host application, as seen by the jump engine.
///
/// Supplies editor lookup, the "is in jump mode" context flag for
/// conditional key bindings, and user-visible error reporting.
pub trait JumpHost: LineProvider {
    /// Currently focused editor, if any.
    fn active_editor(&self) -> Option<EditorId>;

    /// Resolve an editor id to its view. Returns `None` when the editor
    /// has been closed or replaced.
    fn editor_mut(&mut self, id: EditorId) -> Option<&mut dyn EditorView>;

    /// Keep the host's jump-mode context flag in sync.
    fn set_jump_context(&mut self, active: bool);

    /// Surface a user-visible error message.
    fn show_error(&mut self, message: &str);

    /// Register one of the engine's commands with the key-binding
    /// layer. Hosts that wire bindings themselves can keep the default.
    fn register_command(&mut self, command: JumpCommand) -> Subscription {
        let _ = command;
        Subscription::noop()
    }

    /// Subscribe the engine to a host event stream.
    fn register_event(&mut self, event: HostEvent) -> Subscription {
        let _ = event;
        Subscription::noop()
    }

    /// Start routing typed characters to the engine. Armed on jump-mode
    /// entry, released on exit, so normal typing is untouched
    /// otherwise.
    fn register_typed_capture(&mut self) -> Subscription {
        Subscription::noop()
    }
}
