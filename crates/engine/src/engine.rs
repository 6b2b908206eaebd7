//! The jump engine: lifecycle, event handling, and resolution.

use std::str::FromStr;
use std::time::Instant;

use jumplabel_config::{Config, Settings};
use jumplabel_core::{EditorId, HostEvent, JumpCommand, JumpHost, Subscription};
use jumplabel_logger::{self as logger, LogLevel};
use jumplabel_scanner::{scan, LabelMap};

use crate::action::apply_jump;
use crate::debounce::RefreshDebounce;
use crate::state::{JumpState, ModeFlags};

/// Registered handler tokens, released exactly once on teardown.
///
/// The typed-character capture lives in its own slot because it is
/// armed per jump session, not per activation.
#[derive(Debug, Default)]
struct HandleSet {
    commands: Vec<Subscription>,
    events: Vec<Subscription>,
    typed_capture: Option<Subscription>,
}

impl HandleSet {
    fn release_typed_capture(&mut self) {
        if let Some(mut handle) = self.typed_capture.take() {
            handle.release();
        }
    }

    fn release_all(&mut self) {
        self.release_typed_capture();
        for handle in &mut self.commands {
            handle.release();
        }
        for handle in &mut self.events {
            handle.release();
        }
        self.commands.clear();
        self.events.clear();
    }
}

/// The jump-label engine.
///
/// Single-threaded and host-driven: the host calls exactly one handler
/// at a time and polls [`JumpEngine::tick`] for the debounced refresh.
pub struct JumpEngine {
    settings: Settings,
    state: JumpState,
    labels: LabelMap,
    debounce: RefreshDebounce,
    handles: HandleSet,
}

impl JumpEngine {
    /// Create an engine with compiled settings.
    pub fn new(settings: Settings) -> Self {
        let debounce = RefreshDebounce::new(settings.debounce());
        Self {
            settings,
            state: JumpState::Inactive,
            labels: LabelMap::default(),
            debounce,
            handles: HandleSet::default(),
        }
    }

    /// Returns true while a jump session is active.
    pub fn is_in_jump_mode(&self) -> bool {
        self.state.is_active()
    }

    /// Number of currently assigned labels (0 while inactive).
    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    /// Register commands and event subscriptions with the host.
    pub fn activate(&mut self, host: &mut dyn JumpHost) {
        for command in JumpCommand::ALL {
            self.handles.commands.push(host.register_command(command));
        }
        for event in HostEvent::ALL {
            self.handles.events.push(host.register_event(event));
        }
        logger::info("engine activated");
    }

    /// Tear down: leave jump mode, cancel the pending refresh, and
    /// release every registration. Idempotent.
    pub fn deactivate(&mut self, host: &mut dyn JumpHost) {
        self.exit_jump_mode(host);
        self.debounce.cancel();
        self.handles.release_all();
        logger::info("engine deactivated");
    }

    /// Route a key-binding command.
    pub fn dispatch(&mut self, host: &mut dyn JumpHost, command: JumpCommand) {
        match ModeFlags::for_command(command) {
            Some(flags) => self.enter_jump_mode(host, flags),
            None => self.exit_jump_mode(host),
        }
    }

    /// Enter jump mode on the active editor.
    ///
    /// Re-entry while active performs a full exit first, so no stale
    /// decorations or pending refresh survive. Without an active editor
    /// this is a silent no-op.
    pub fn enter_jump_mode(&mut self, host: &mut dyn JumpHost, flags: ModeFlags) {
        if self.state.is_active() {
            self.exit_jump_mode(host);
        }

        let Some(editor) = host.active_editor() else {
            return;
        };

        host.set_jump_context(true);
        self.handles.typed_capture = Some(host.register_typed_capture());
        self.state = JumpState::Active {
            editor,
            flags,
            typed: String::new(),
        };
        logger::debug(format!("jump mode entered: {:?}", flags));

        self.refresh(host);
    }

    /// Leave jump mode, clearing decorations and the context flag.
    /// No-op while inactive.
    pub fn exit_jump_mode(&mut self, host: &mut dyn JumpHost) {
        let JumpState::Active { editor, .. } = self.state else {
            return;
        };

        if let Some(view) = host.editor_mut(editor) {
            view.clear_decorations();
        }
        self.labels = LabelMap::default();
        self.debounce.cancel();
        self.handles.release_typed_capture();
        self.state = JumpState::Inactive;
        host.set_jump_context(false);
        logger::debug("jump mode exited");
    }

    /// Feed one typed character.
    ///
    /// The first word-class character is buffered; the second resolves
    /// the code. Anything else clears the buffer and the session
    /// continues, so a mistyped first character can simply be retyped.
    pub fn handle_typed_character(&mut self, host: &mut dyn JumpHost, text: &str) {
        let Some(ch) = word_class_char(text) else {
            if let JumpState::Active { typed, .. } = &mut self.state {
                typed.clear();
            }
            return;
        };

        let JumpState::Active {
            editor,
            flags,
            typed,
        } = &mut self.state
        else {
            return;
        };

        if typed.is_empty() {
            typed.push(ch);
            return;
        }

        let mut code = std::mem::take(typed);
        code.push(ch);
        let (editor, flags) = (*editor, *flags);

        let Some(target) = self.labels.get(&code) else {
            logger::error(format!("code {:?} not in label map", code));
            host.show_error(&format!("jump: no target for code \"{}\"", code));
            self.exit_jump_mode(host);
            return;
        };

        logger::debug(format!("code {:?} resolved to {:?}", code, target));
        if let Some(view) = host.editor_mut(editor) {
            apply_jump(view, target, flags, self.settings.adjust_selection_boundary());
        }
        self.exit_jump_mode(host);
    }

    /// Selection moved: rescan immediately (the caret-proximity order
    /// depends on it). No-op while inactive.
    pub fn handle_selection_change(&mut self, host: &mut dyn JumpHost) {
        if self.state.is_active() {
            self.refresh(host);
        }
    }

    /// Focus moved to another editor (or none). No-op while inactive.
    pub fn handle_editor_change(
        &mut self,
        host: &mut dyn JumpHost,
        new_editor: Option<EditorId>,
    ) {
        let JumpState::Active { editor, .. } = &mut self.state else {
            return;
        };

        let Some(new_editor) = new_editor else {
            self.exit_jump_mode(host);
            return;
        };

        let old = std::mem::replace(editor, new_editor);
        if let Some(view) = host.editor_mut(old) {
            view.clear_decorations();
        }
        self.refresh(host);
    }

    /// Configuration changed. A config that fails validation keeps the
    /// previous settings.
    pub fn handle_config_change(&mut self, host: &mut dyn JumpHost, config: &Config) {
        let settings = match Settings::from_config(config) {
            Ok(settings) => settings,
            Err(err) => {
                logger::error(format!("rejected configuration: {:#}", err));
                return;
            }
        };

        if let JumpState::Active { editor, .. } = self.state {
            if let Some(view) = host.editor_mut(editor) {
                view.clear_decorations();
            }
        }

        self.debounce.set_delay(settings.debounce());
        self.settings = settings;
        if let Ok(level) = LogLevel::from_str(&config.logging.min_level) {
            logger::set_min_level(level);
        }
        logger::info("configuration applied");

        if self.state.is_active() {
            self.refresh(host);
        }
    }

    /// Viewport scrolled or resized: schedule a debounced rescan.
    /// No-op while inactive.
    pub fn handle_visible_ranges_change(&mut self, now: Instant) {
        if self.state.is_active() {
            self.debounce.schedule(now);
        }
    }

    /// Host tick: fire the debounced refresh if its quiet period has
    /// elapsed.
    pub fn tick(&mut self, host: &mut dyn JumpHost, now: Instant) {
        if self.debounce.fire_if_due(now) {
            self.refresh(host);
        }
    }

    /// Rescan visible lines, rebuild the label map, and push the
    /// decorations. Exits jump mode if the captured editor is gone.
    fn refresh(&mut self, host: &mut dyn JumpHost) {
        let JumpState::Active { editor, flags, .. } = self.state else {
            return;
        };

        let lines = host.visible_lines(editor);
        let Some(view) = host.editor_mut(editor) else {
            self.exit_jump_mode(host);
            return;
        };

        let caret = view
            .selections()
            .last()
            .map(|s| s.active)
            .unwrap_or_default();

        let labels = scan(
            &lines,
            self.settings.pattern(flags.match_start_of_word),
            caret,
            self.settings.codes(),
            self.settings.char_offset(),
        );

        let decorations = labels
            .assignments()
            .iter()
            .map(|a| self.settings.decoration(&a.code, a.display))
            .collect();
        view.set_decorations(decorations);

        logger::debug(format!("scan assigned {} labels", labels.len()));
        self.labels = labels;
    }
}

/// Accept a single word-class character (ASCII letter, digit,
/// underscore), lowercased. Everything else is rejected.
fn word_class_char(text: &str) -> Option<char> {
    let mut chars = text.chars();
    let ch = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    if ch.is_ascii_alphanumeric() || ch == '_' {
        Some(ch.to_ascii_lowercase())
    } else {
        None
    }
}
