//! Jump-mode state.

use jumplabel_core::{EditorId, JumpCommand};

/// Behavior flags captured at jump-mode entry, immutable until exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModeFlags {
    /// Match word starts (true) or word ends (false).
    pub match_start_of_word: bool,
    /// Extend the last selection to the target instead of moving.
    pub expand_selection: bool,
    /// Add a cursor at the target instead of moving.
    pub add_cursor: bool,
}

impl ModeFlags {
    /// Flags for an enter command, or `None` for `Exit`.
    pub fn for_command(command: JumpCommand) -> Option<Self> {
        let (match_start_of_word, expand_selection, add_cursor) = match command {
            JumpCommand::EnterWordStart => (true, false, false),
            JumpCommand::EnterWordEnd => (false, false, false),
            JumpCommand::EnterSelectWordStart => (true, true, false),
            JumpCommand::EnterSelectWordEnd => (false, true, false),
            JumpCommand::EnterAddCursorWordStart => (true, false, true),
            JumpCommand::EnterAddCursorWordEnd => (false, false, true),
            JumpCommand::Exit => return None,
        };
        Some(Self {
            match_start_of_word,
            expand_selection,
            add_cursor,
        })
    }
}

/// The jump-mode state machine's state.
///
/// There is no "active without an editor": the editor reference only
/// exists inside the `Active` variant, and it is an id the host
/// re-resolves on every use, never an owned handle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum JumpState {
    /// Not in jump mode; typed characters pass through untouched.
    #[default]
    Inactive,
    /// In jump mode on the given editor.
    Active {
        /// The captured editor.
        editor: EditorId,
        /// Flags from the entering command.
        flags: ModeFlags,
        /// Zero or one buffered keystrokes; the second resolves.
        typed: String,
    },
}

impl JumpState {
    /// Returns true while in jump mode.
    pub fn is_active(&self) -> bool {
        matches!(self, JumpState::Active { .. })
    }
}
