//! Commands and host events exposed to the key-binding layer.

/// Commands the engine offers for host key bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JumpCommand {
    /// Jump to the start of a word.
    EnterWordStart,
    /// Jump to the end of a word.
    EnterWordEnd,
    /// Extend the selection to the start of a word.
    EnterSelectWordStart,
    /// Extend the selection to the end of a word.
    EnterSelectWordEnd,
    /// Add a cursor at the start of a word.
    EnterAddCursorWordStart,
    /// Add a cursor at the end of a word.
    EnterAddCursorWordEnd,
    /// Leave jump mode without jumping.
    Exit,
}

impl JumpCommand {
    /// All commands, in registration order.
    pub const ALL: [JumpCommand; 7] = [
        JumpCommand::EnterWordStart,
        JumpCommand::EnterWordEnd,
        JumpCommand::EnterSelectWordStart,
        JumpCommand::EnterSelectWordEnd,
        JumpCommand::EnterAddCursorWordStart,
        JumpCommand::EnterAddCursorWordEnd,
        JumpCommand::Exit,
    ];

    /// Stable identifier for host-side binding tables.
    pub fn id(self) -> &'static str {
        match self {
            JumpCommand::EnterWordStart => "jump.word-start",
            JumpCommand::EnterWordEnd => "jump.word-end",
            JumpCommand::EnterSelectWordStart => "jump.select-word-start",
            JumpCommand::EnterSelectWordEnd => "jump.select-word-end",
            JumpCommand::EnterAddCursorWordStart => "jump.add-cursor-word-start",
            JumpCommand::EnterAddCursorWordEnd => "jump.add-cursor-word-end",
            JumpCommand::Exit => "jump.exit",
        }
    }
}

/// Host events the engine subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostEvent {
    ConfigChanged,
    SelectionChanged,
    ActiveEditorChanged,
    VisibleRangesChanged,
}

impl HostEvent {
    /// All events, in registration order.
    pub const ALL: [HostEvent; 4] = [
        HostEvent::ConfigChanged,
        HostEvent::SelectionChanged,
        HostEvent::ActiveEditorChanged,
        HostEvent::VisibleRangesChanged,
    ];
}
