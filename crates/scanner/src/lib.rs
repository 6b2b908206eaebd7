//! Candidate position scanning and label assignment for jumplabel.
//!
//! Turns a snapshot of visible lines into a [`LabelMap`]: an ordered,
//! bijective assignment of short codes to target positions. The map is
//! rebuilt wholesale on every scan; nothing carries over between scans,
//! so identical inputs always produce identical assignments.

use std::collections::HashMap;

use regex::Regex;

use jumplabel_core::{Position, VisibleLine};

/// One code assigned to one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// The code the user types to select this target.
    pub code: String,
    /// Logical target position (where the caret lands).
    pub target: Position,
    /// Display position for the label glyphs (target column plus the
    /// configured display offset).
    pub display: Position,
}

/// The code → position mapping produced by a scan.
///
/// Assignments are kept in scan order for rendering; lookup by code is
/// backed by an index. `len() == min(candidates, alphabet length)` and
/// both codes and positions are unique.
#[derive(Debug, Clone, Default)]
pub struct LabelMap {
    assignments: Vec<Assignment>,
    index: HashMap<String, Position>,
}

impl LabelMap {
    /// Resolve a typed code to its target position.
    pub fn get(&self, code: &str) -> Option<Position> {
        self.index.get(code).copied()
    }

    /// Assignments in scan order, for the overlay renderer.
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Number of assigned codes.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Returns true if the scan produced no assignments.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    fn push(&mut self, code: &str, target: Position, char_offset: usize) {
        self.index.insert(code.to_string(), target);
        self.assignments.push(Assignment {
            code: code.to_string(),
            target,
            display: Position::new(target.line, target.char + char_offset),
        });
    }
}

/// Scan visible lines and assign codes to candidate positions.
///
/// Lines are visited in viewport order until the code alphabet is
/// exhausted. A blank line contributes a single candidate at column 0
/// so it stays reachable. On the line containing the caret, candidates
/// are reordered by ascending distance from the caret column (stable,
/// so equidistant candidates keep left-to-right order) and therefore
/// receive the earliest codes.
pub fn scan(
    lines: &[VisibleLine],
    pattern: &Regex,
    caret: Position,
    codes: &[String],
    char_offset: usize,
) -> LabelMap {
    let mut map = LabelMap::default();
    let mut next = codes.iter();

    for line in lines {
        if map.len() >= codes.len() {
            break;
        }

        if line.is_blank {
            if let Some(code) = next.next() {
                map.push(code, Position::new(line.number, 0), char_offset);
            }
            continue;
        }

        let mut columns = match_columns(&line.text, pattern);
        if line.number == caret.line {
            columns.sort_by_key(|&col| col.abs_diff(caret.char));
        }

        for col in columns {
            let Some(code) = next.next() else {
                break;
            };
            map.push(code, Position::new(line.number, col), char_offset);
        }
    }

    map
}

/// Collect match start columns (in characters) left to right.
fn match_columns(text: &str, pattern: &Regex) -> Vec<usize> {
    pattern
        .find_iter(text)
        .map(|mat| text[..mat.start()].chars().count())
        .collect()
}
