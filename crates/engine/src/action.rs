//! Selection mutation applied when a code resolves.

use jumplabel_core::{EditorView, Nudge, Position, Selection};

use crate::state::ModeFlags;

/// Apply the jump action for a resolved target.
///
/// - expand-selection: span from the most recent selection's anchor to
///   the target;
/// - add-cursor with an empty last selection: append a cursor at the
///   target and reveal it (suppressed while a non-empty selection
///   exists);
/// - otherwise: collapse to a single cursor at the target.
///
/// When `adjust_boundary` is set and the target is off line 0 and
/// column 0, the boundary is nudged left then right by one character so
/// the target character itself ends up inside the selection.
pub(crate) fn apply_jump(
    editor: &mut dyn EditorView,
    target: Position,
    flags: ModeFlags,
    adjust_boundary: bool,
) {
    let nudge = adjust_boundary && target.line != 0 && target.char != 0;
    let selections = editor.selections();
    let last = selections.last().copied();

    if flags.expand_selection {
        let anchor = last.map(|s| s.anchor).unwrap_or(target);
        editor.set_selections(vec![Selection::new(anchor, target)]);
        if nudge {
            editor.nudge_boundary(Nudge::Left, true);
            editor.nudge_boundary(Nudge::Right, true);
        }
        return;
    }

    let has_selection = last.is_some_and(|s| !s.is_empty());
    if flags.add_cursor && !has_selection {
        let mut selections = selections;
        selections.push(Selection::caret(target));
        editor.set_selections(selections);
        editor.reveal(target);
    } else {
        editor.set_selections(vec![Selection::caret(target)]);
        if nudge {
            editor.nudge_boundary(Nudge::Left, false);
            editor.nudge_boundary(Nudge::Right, false);
        }
    }
}
