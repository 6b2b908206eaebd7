//! End-to-end engine tests against a scripted fake host.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::{Duration, Instant};

use jumplabel_config::{Config, Settings};
use jumplabel_core::{
    Decoration, EditorId, EditorView, HostEvent, JumpCommand, JumpHost, LineProvider, Nudge,
    Position, Selection, Subscription, VisibleLine,
};
use jumplabel_engine::{JumpEngine, ModeFlags};

#[derive(Default)]
struct FakeEditor {
    selections: Vec<Selection>,
    decorations: Vec<Decoration>,
    decoration_sets: usize,
    revealed: Vec<Position>,
}

impl FakeEditor {
    fn with_caret(position: Position) -> Self {
        Self {
            selections: vec![Selection::caret(position)],
            ..Default::default()
        }
    }
}

impl EditorView for FakeEditor {
    fn selections(&self) -> Vec<Selection> {
        self.selections.clone()
    }

    fn set_selections(&mut self, selections: Vec<Selection>) {
        self.selections = selections;
    }

    fn reveal(&mut self, position: Position) {
        self.revealed.push(position);
    }

    fn set_decorations(&mut self, decorations: Vec<Decoration>) {
        self.decorations = decorations;
        self.decoration_sets += 1;
    }

    fn clear_decorations(&mut self) {
        self.decorations.clear();
    }

    fn nudge_boundary(&mut self, _direction: Nudge, _extend: bool) {}
}

#[derive(Default)]
struct FakeHost {
    editors: HashMap<u64, FakeEditor>,
    lines: HashMap<u64, Vec<VisibleLine>>,
    active: Option<EditorId>,
    context: bool,
    errors: Vec<String>,
    registrations: Rc<RefCell<Vec<String>>>,
    releases: Rc<RefCell<Vec<String>>>,
}

impl FakeHost {
    fn with_editor(lines: &[&str], caret: Position) -> Self {
        let mut host = Self::default();
        host.editors.insert(1, FakeEditor::with_caret(caret));
        host.lines.insert(
            1,
            lines
                .iter()
                .enumerate()
                .map(|(number, text)| VisibleLine::new(number, *text))
                .collect(),
        );
        host.active = Some(EditorId(1));
        host
    }

    fn editor(&self, id: u64) -> &FakeEditor {
        &self.editors[&id]
    }

    fn track(&self, name: String) -> Subscription {
        self.registrations.borrow_mut().push(name.clone());
        let releases = self.releases.clone();
        Subscription::new(move || releases.borrow_mut().push(name))
    }
}

impl LineProvider for FakeHost {
    fn visible_lines(&self, editor: EditorId) -> Vec<VisibleLine> {
        self.lines.get(&editor.0).cloned().unwrap_or_default()
    }
}

impl JumpHost for FakeHost {
    fn active_editor(&self) -> Option<EditorId> {
        self.active
    }

    fn editor_mut(&mut self, id: EditorId) -> Option<&mut dyn EditorView> {
        self.editors
            .get_mut(&id.0)
            .map(|editor| editor as &mut dyn EditorView)
    }

    fn set_jump_context(&mut self, active: bool) {
        self.context = active;
    }

    fn show_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    fn register_command(&mut self, command: JumpCommand) -> Subscription {
        self.track(command.id().to_string())
    }

    fn register_event(&mut self, event: HostEvent) -> Subscription {
        self.track(format!("{:?}", event))
    }

    fn register_typed_capture(&mut self) -> Subscription {
        self.track("typed-capture".to_string())
    }
}

fn engine() -> JumpEngine {
    let mut config = Config::default();
    // Small alphabet keeps expected codes predictable: aa ab ba bb ...
    config.jump.characters = "abcd".to_string();
    JumpEngine::new(Settings::from_config(&config).unwrap())
}

fn word_start_flags() -> ModeFlags {
    ModeFlags {
        match_start_of_word: true,
        ..Default::default()
    }
}

#[test]
fn test_enter_without_editor_is_noop() {
    let mut host = FakeHost::default();
    let mut engine = engine();

    engine.enter_jump_mode(&mut host, word_start_flags());

    assert!(!engine.is_in_jump_mode());
    assert!(!host.context);
}

#[test]
fn test_enter_scans_and_decorates() {
    let mut host = FakeHost::with_editor(&["foo bar baz"], Position::new(9, 0));
    let mut engine = engine();

    engine.enter_jump_mode(&mut host, word_start_flags());

    assert!(engine.is_in_jump_mode());
    assert!(host.context);
    assert_eq!(engine.label_count(), 3);

    let decorations = &host.editor(1).decorations;
    assert_eq!(decorations.len(), 3);
    assert_eq!(decorations[0].label, "aa");
    assert_eq!(decorations[0].position, Position::new(0, 0));
    assert_eq!(decorations[1].label, "ab");
    assert_eq!(decorations[1].position, Position::new(0, 4));
}

#[test]
fn test_typed_code_round_trip_moves_caret_and_exits() {
    let mut host = FakeHost::with_editor(&["foo bar baz"], Position::new(9, 0));
    let mut engine = engine();

    engine.enter_jump_mode(&mut host, word_start_flags());
    engine.handle_typed_character(&mut host, "a");
    assert!(engine.is_in_jump_mode());
    engine.handle_typed_character(&mut host, "c");

    // Third code "ac" is the candidate at column 8.
    assert_eq!(
        host.editor(1).selections,
        vec![Selection::caret(Position::new(0, 8))]
    );
    assert!(!engine.is_in_jump_mode());
    assert!(!host.context);
    assert!(host.editor(1).decorations.is_empty());
    assert_eq!(engine.label_count(), 0);
}

#[test]
fn test_caret_line_candidates_sorted_by_proximity() {
    // Caret on column 4 of the scanned line: nearest target gets "aa".
    let mut host = FakeHost::with_editor(&["foo bar baz"], Position::new(0, 4));
    let mut engine = engine();

    engine.enter_jump_mode(&mut host, word_start_flags());
    engine.handle_typed_character(&mut host, "a");
    engine.handle_typed_character(&mut host, "a");

    assert_eq!(
        host.editor(1).selections,
        vec![Selection::caret(Position::new(0, 4))]
    );
}

#[test]
fn test_uppercase_input_is_lowercased() {
    let mut host = FakeHost::with_editor(&["foo bar"], Position::new(9, 0));
    let mut engine = engine();

    engine.enter_jump_mode(&mut host, word_start_flags());
    engine.handle_typed_character(&mut host, "A");
    engine.handle_typed_character(&mut host, "B");

    assert_eq!(
        host.editor(1).selections,
        vec![Selection::caret(Position::new(0, 4))]
    );
}

#[test]
fn test_invalid_character_clears_buffer_but_keeps_session() {
    let mut host = FakeHost::with_editor(&["foo bar"], Position::new(9, 0));
    let mut engine = engine();

    engine.enter_jump_mode(&mut host, word_start_flags());
    engine.handle_typed_character(&mut host, "a");
    engine.handle_typed_character(&mut host, "-");
    assert!(engine.is_in_jump_mode());
    assert!(host.errors.is_empty());

    // Buffer was reset, so the next two characters form a fresh code.
    engine.handle_typed_character(&mut host, "a");
    engine.handle_typed_character(&mut host, "b");
    assert_eq!(
        host.editor(1).selections,
        vec![Selection::caret(Position::new(0, 4))]
    );
}

#[test]
fn test_non_ascii_letter_clears_buffer_but_keeps_session() {
    // Non-ASCII letters are not code characters: they must behave like
    // punctuation (reset the buffer), not get buffered into a code
    // that can never resolve.
    let mut host = FakeHost::with_editor(&["foo bar"], Position::new(9, 0));
    let mut engine = engine();

    engine.enter_jump_mode(&mut host, word_start_flags());
    engine.handle_typed_character(&mut host, "é");
    engine.handle_typed_character(&mut host, "a");
    assert!(engine.is_in_jump_mode());
    assert!(host.errors.is_empty());

    // The "a" above started a fresh code; "b" completes it.
    engine.handle_typed_character(&mut host, "b");
    assert_eq!(
        host.editor(1).selections,
        vec![Selection::caret(Position::new(0, 4))]
    );
    assert!(!engine.is_in_jump_mode());
}

#[test]
fn test_unknown_code_reports_error_and_exits() {
    let mut host = FakeHost::with_editor(&["foo"], Position::new(9, 0));
    let mut engine = engine();

    engine.enter_jump_mode(&mut host, word_start_flags());
    // Only one candidate, so "dd" was never assigned.
    engine.handle_typed_character(&mut host, "d");
    engine.handle_typed_character(&mut host, "d");

    assert!(!engine.is_in_jump_mode());
    assert_eq!(host.errors.len(), 1);
    assert!(host.errors[0].contains("dd"));
    assert!(host.editor(1).decorations.is_empty());
}

#[test]
fn test_blank_line_is_reachable() {
    let mut host = FakeHost::with_editor(&["foo", "", "bar"], Position::new(9, 0));
    let mut engine = engine();

    engine.enter_jump_mode(&mut host, word_start_flags());
    // Codes: aa -> (0,0), ab -> (1,0) blank line, ac -> (2,0).
    engine.handle_typed_character(&mut host, "a");
    engine.handle_typed_character(&mut host, "b");

    assert_eq!(
        host.editor(1).selections,
        vec![Selection::caret(Position::new(1, 0))]
    );
}

#[test]
fn test_expand_selection_spans_anchor_to_target() {
    let mut host = FakeHost::with_editor(
        &["foo bar", "baz qux", "quux corge"],
        Position::new(2, 0),
    );
    host.editors.get_mut(&1).unwrap().selections = vec![Selection::caret(Position::new(2, 0))];
    let mut engine = engine();

    let flags = ModeFlags {
        match_start_of_word: true,
        expand_selection: true,
        add_cursor: false,
    };
    engine.enter_jump_mode(&mut host, flags);
    // "ab" is the second candidate: (0,4).
    engine.handle_typed_character(&mut host, "a");
    engine.handle_typed_character(&mut host, "b");

    assert_eq!(
        host.editor(1).selections,
        vec![Selection::new(Position::new(2, 0), Position::new(0, 4))]
    );
    assert!(!engine.is_in_jump_mode());
}

#[test]
fn test_add_cursor_appends_and_exits() {
    let mut host = FakeHost::with_editor(&["foo", "bar baz"], Position::new(0, 0));
    let mut engine = engine();

    let flags = ModeFlags {
        match_start_of_word: true,
        expand_selection: false,
        add_cursor: true,
    };
    engine.enter_jump_mode(&mut host, flags);
    // "ac" is the third candidate: (1,4).
    engine.handle_typed_character(&mut host, "a");
    engine.handle_typed_character(&mut host, "c");

    let editor = host.editor(1);
    assert_eq!(
        editor.selections,
        vec![
            Selection::caret(Position::new(0, 0)),
            Selection::caret(Position::new(1, 4)),
        ]
    );
    assert_eq!(editor.revealed, vec![Position::new(1, 4)]);
    // Exit after a single addition; chaining requires re-entry.
    assert!(!engine.is_in_jump_mode());
}

#[test]
fn test_reentry_exits_first_and_rescans() {
    let mut host = FakeHost::with_editor(&["foo bar"], Position::new(9, 0));
    let mut engine = engine();

    engine.enter_jump_mode(&mut host, word_start_flags());
    engine.handle_typed_character(&mut host, "a");
    engine.enter_jump_mode(&mut host, word_start_flags());

    // The stale first keystroke must not leak into the new session.
    engine.handle_typed_character(&mut host, "a");
    assert!(engine.is_in_jump_mode());
    engine.handle_typed_character(&mut host, "b");
    assert_eq!(
        host.editor(1).selections,
        vec![Selection::caret(Position::new(0, 4))]
    );
}

#[test]
fn test_visible_range_burst_coalesces_into_one_refresh() {
    let mut host = FakeHost::with_editor(&["foo bar"], Position::new(9, 0));
    let mut engine = engine();
    let start = Instant::now();

    engine.enter_jump_mode(&mut host, word_start_flags());
    let after_enter = host.editor(1).decoration_sets;

    engine.handle_visible_ranges_change(start);
    engine.handle_visible_ranges_change(start + Duration::from_millis(100));
    engine.handle_visible_ranges_change(start + Duration::from_millis(200));

    // Quiet period counts from the last event.
    engine.tick(&mut host, start + Duration::from_millis(450));
    assert_eq!(host.editor(1).decoration_sets, after_enter);

    engine.tick(&mut host, start + Duration::from_millis(500));
    assert_eq!(host.editor(1).decoration_sets, after_enter + 1);

    // Fire-once: later ticks do nothing.
    engine.tick(&mut host, start + Duration::from_millis(900));
    assert_eq!(host.editor(1).decoration_sets, after_enter + 1);
}

#[test]
fn test_exit_cancels_pending_debounce() {
    let mut host = FakeHost::with_editor(&["foo"], Position::new(9, 0));
    let mut engine = engine();
    let start = Instant::now();

    engine.enter_jump_mode(&mut host, word_start_flags());
    engine.handle_visible_ranges_change(start);
    engine.exit_jump_mode(&mut host);

    let sets = host.editor(1).decoration_sets;
    engine.tick(&mut host, start + Duration::from_secs(5));
    assert_eq!(host.editor(1).decoration_sets, sets);
}

#[test]
fn test_editor_loss_exits() {
    let mut host = FakeHost::with_editor(&["foo"], Position::new(9, 0));
    let mut engine = engine();

    engine.enter_jump_mode(&mut host, word_start_flags());
    engine.handle_editor_change(&mut host, None);

    assert!(!engine.is_in_jump_mode());
    assert!(!host.context);
}

#[test]
fn test_editor_switch_repoints_and_rescans() {
    let mut host = FakeHost::with_editor(&["foo bar"], Position::new(9, 0));
    host.editors.insert(2, FakeEditor::with_caret(Position::new(0, 0)));
    host.lines.insert(2, vec![VisibleLine::new(0, "qux")]);
    let mut engine = engine();

    engine.enter_jump_mode(&mut host, word_start_flags());
    engine.handle_editor_change(&mut host, Some(EditorId(2)));

    assert!(engine.is_in_jump_mode());
    assert!(host.editor(1).decorations.is_empty());
    assert_eq!(host.editor(2).decorations.len(), 1);

    engine.handle_typed_character(&mut host, "a");
    engine.handle_typed_character(&mut host, "a");
    assert_eq!(
        host.editor(2).selections,
        vec![Selection::caret(Position::new(0, 0))]
    );
}

#[test]
fn test_closed_editor_detected_on_refresh() {
    let mut host = FakeHost::with_editor(&["foo"], Position::new(9, 0));
    let mut engine = engine();

    engine.enter_jump_mode(&mut host, word_start_flags());
    host.editors.remove(&1);
    engine.handle_selection_change(&mut host);

    assert!(!engine.is_in_jump_mode());
    assert!(!host.context);
}

#[test]
fn test_config_change_recompiles_and_rescans() {
    let mut host = FakeHost::with_editor(&["foo bar"], Position::new(9, 0));
    let mut engine = engine();

    engine.enter_jump_mode(&mut host, word_start_flags());

    let mut config = Config::default();
    config.jump.characters = "xy".to_string();
    engine.handle_config_change(&mut host, &config);

    assert!(engine.is_in_jump_mode());
    let decorations = &host.editor(1).decorations;
    assert_eq!(decorations[0].label, "xx");
    assert_eq!(decorations[1].label, "xy");
}

#[test]
fn test_invalid_config_change_keeps_previous_settings() {
    let mut host = FakeHost::with_editor(&["foo bar"], Position::new(9, 0));
    let mut engine = engine();

    engine.enter_jump_mode(&mut host, word_start_flags());

    let mut config = Config::default();
    config.jump.word_pattern = "(".to_string();
    engine.handle_config_change(&mut host, &config);

    // Old settings still resolve codes.
    engine.handle_typed_character(&mut host, "a");
    engine.handle_typed_character(&mut host, "b");
    assert_eq!(
        host.editor(1).selections,
        vec![Selection::caret(Position::new(0, 4))]
    );
}

#[test]
fn test_events_ignored_while_inactive() {
    let mut host = FakeHost::with_editor(&["foo"], Position::new(9, 0));
    let mut engine = engine();

    engine.handle_selection_change(&mut host);
    engine.handle_editor_change(&mut host, None);
    engine.handle_typed_character(&mut host, "a");
    engine.handle_visible_ranges_change(Instant::now());
    engine.tick(&mut host, Instant::now() + Duration::from_secs(1));

    assert!(!engine.is_in_jump_mode());
    assert_eq!(host.editor(1).decoration_sets, 0);
    assert!(host.errors.is_empty());
}

#[test]
fn test_dispatch_maps_commands_to_modes() {
    let mut host = FakeHost::with_editor(&["foo bar"], Position::new(9, 0));
    let mut engine = engine();

    engine.dispatch(&mut host, JumpCommand::EnterSelectWordEnd);
    assert!(engine.is_in_jump_mode());
    // Word-end candidates: (0,2) and (0,6).
    engine.handle_typed_character(&mut host, "a");
    engine.handle_typed_character(&mut host, "b");
    assert_eq!(
        host.editor(1).selections,
        vec![Selection::new(Position::new(9, 0), Position::new(0, 6))]
    );

    engine.dispatch(&mut host, JumpCommand::EnterWordStart);
    engine.dispatch(&mut host, JumpCommand::Exit);
    assert!(!engine.is_in_jump_mode());
}

#[test]
fn test_activate_registers_and_deactivate_releases_all() {
    let mut host = FakeHost::with_editor(&["foo"], Position::new(9, 0));
    let mut engine = engine();

    engine.activate(&mut host);
    assert_eq!(
        host.registrations.borrow().len(),
        JumpCommand::ALL.len() + HostEvent::ALL.len()
    );

    engine.enter_jump_mode(&mut host, word_start_flags());
    assert!(host
        .registrations
        .borrow()
        .contains(&"typed-capture".to_string()));

    engine.deactivate(&mut host);
    let releases = host.releases.borrow();
    assert_eq!(releases.len(), host.registrations.borrow().len());
    assert!(!host.context);

    // A second deactivate must not double-release.
    drop(releases);
    engine.deactivate(&mut host);
    assert_eq!(
        host.releases.borrow().len(),
        host.registrations.borrow().len()
    );
}

#[test]
fn test_typed_capture_released_on_every_exit_path() {
    let mut host = FakeHost::with_editor(&["foo"], Position::new(9, 0));
    let mut engine = engine();

    engine.enter_jump_mode(&mut host, word_start_flags());
    engine.exit_jump_mode(&mut host);
    assert_eq!(
        host.releases
            .borrow()
            .iter()
            .filter(|r| *r == "typed-capture")
            .count(),
        1
    );

    // Re-entry arms a fresh capture; the error path releases it too.
    engine.enter_jump_mode(&mut host, word_start_flags());
    engine.handle_typed_character(&mut host, "d");
    engine.handle_typed_character(&mut host, "d");
    assert_eq!(
        host.releases
            .borrow()
            .iter()
            .filter(|r| *r == "typed-capture")
            .count(),
        2
    );
}
