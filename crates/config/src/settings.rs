//! Configuration structures for jumplabel settings.

use std::collections::HashSet;
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

use jumplabel_core::{Decoration, DecorationStyle, Position};

use crate::defaults;

/// Application configuration with nested sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Jump behavior settings
    #[serde(default)]
    pub jump: JumpSettings,

    /// Label overlay style
    #[serde(default)]
    pub style: StyleSettings,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Jump behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JumpSettings {
    /// Characters the two-letter label codes are built from
    #[serde(default = "default_characters")]
    pub characters: String,

    /// Regex matching the start of a word
    #[serde(default = "default_word_pattern")]
    pub word_pattern: String,

    /// Regex matching the end of a word
    #[serde(default = "default_end_of_word_pattern")]
    pub end_of_word_pattern: String,

    /// Display column offset for label glyphs
    #[serde(default = "default_char_offset")]
    pub char_offset: usize,

    /// Nudge the selection boundary after a jump so the target
    /// character is included
    #[serde(default = "default_adjust_selection_boundary")]
    pub adjust_selection_boundary: bool,

    /// Debounce delay for visible-range refreshes in ms
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

/// Label overlay style.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleSettings {
    /// Label text color
    #[serde(default = "default_label_foreground")]
    pub foreground: String,

    /// Label background color
    #[serde(default = "default_label_background")]
    pub background: String,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log file path (empty = data dir default)
    #[serde(default)]
    pub file_path: Option<String>,

    /// Minimum log level (debug, info, warn, error)
    #[serde(default = "default_min_level")]
    pub min_level: String,
}

// Default value functions for serde
fn default_characters() -> String {
    defaults::CHARACTERS.to_string()
}

fn default_word_pattern() -> String {
    defaults::WORD_PATTERN.to_string()
}

fn default_end_of_word_pattern() -> String {
    defaults::END_OF_WORD_PATTERN.to_string()
}

fn default_char_offset() -> usize {
    defaults::CHAR_OFFSET
}

fn default_adjust_selection_boundary() -> bool {
    defaults::ADJUST_SELECTION_BOUNDARY
}

fn default_debounce_ms() -> u64 {
    defaults::DEBOUNCE_MS
}

fn default_label_foreground() -> String {
    defaults::LABEL_FOREGROUND.to_string()
}

fn default_label_background() -> String {
    defaults::LABEL_BACKGROUND.to_string()
}

fn default_min_level() -> String {
    defaults::MIN_LOG_LEVEL.to_string()
}

impl Default for JumpSettings {
    fn default() -> Self {
        Self {
            characters: default_characters(),
            word_pattern: default_word_pattern(),
            end_of_word_pattern: default_end_of_word_pattern(),
            char_offset: default_char_offset(),
            adjust_selection_boundary: default_adjust_selection_boundary(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            foreground: default_label_foreground(),
            background: default_label_background(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file_path: None,
            min_level: default_min_level(),
        }
    }
}

/// Compiled runtime settings consumed by the engine.
///
/// Built from a [`Config`] once per (re)configuration. The code list is
/// every ordered two-character pair over the configured alphabet, so a
/// code is always exactly two keystrokes and the resolver never has to
/// guess at code length.
#[derive(Debug, Clone)]
pub struct Settings {
    codes: Vec<String>,
    word_regex: Regex,
    end_of_word_regex: Regex,
    char_offset: usize,
    adjust_selection_boundary: bool,
    debounce: Duration,
    style: DecorationStyle,
}

impl Settings {
    /// Compile a configuration, validating the alphabet and patterns.
    pub fn from_config(config: &Config) -> Result<Self> {
        let jump = &config.jump;

        ensure!(
            !jump.characters.is_empty(),
            "jump.characters must not be empty"
        );

        let mut seen = HashSet::new();
        for ch in jump.characters.chars() {
            ensure!(
                ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_',
                "jump.characters contains non-typeable character {:?}",
                ch
            );
            ensure!(
                seen.insert(ch),
                "jump.characters contains duplicate character {:?}",
                ch
            );
        }

        let word_regex = Regex::new(&jump.word_pattern)
            .with_context(|| format!("invalid jump.word_pattern: {:?}", jump.word_pattern))?;
        let end_of_word_regex = Regex::new(&jump.end_of_word_pattern).with_context(|| {
            format!(
                "invalid jump.end_of_word_pattern: {:?}",
                jump.end_of_word_pattern
            )
        })?;

        // Every code is a two-character pair, major digit first, so
        // early alphabet characters label the earliest targets.
        let chars: Vec<char> = jump.characters.chars().collect();
        let mut codes = Vec::with_capacity(chars.len() * chars.len());
        for &first in &chars {
            for &second in &chars {
                let mut code = String::with_capacity(2);
                code.push(first);
                code.push(second);
                codes.push(code);
            }
        }

        Ok(Self {
            codes,
            word_regex,
            end_of_word_regex,
            char_offset: jump.char_offset,
            adjust_selection_boundary: jump.adjust_selection_boundary,
            debounce: Duration::from_millis(jump.debounce_ms),
            style: DecorationStyle {
                foreground: config.style.foreground.clone(),
                background: config.style.background.clone(),
            },
        })
    }

    /// Ordered code alphabet.
    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    /// Match pattern for the given mode.
    pub fn pattern(&self, match_start_of_word: bool) -> &Regex {
        if match_start_of_word {
            &self.word_regex
        } else {
            &self.end_of_word_regex
        }
    }

    /// Display column offset for label glyphs.
    pub fn char_offset(&self) -> usize {
        self.char_offset
    }

    /// Whether to nudge the selection boundary after a jump.
    pub fn adjust_selection_boundary(&self) -> bool {
        self.adjust_selection_boundary
    }

    /// Debounce delay for visible-range refreshes.
    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Build the overlay decoration for a code at a display position.
    pub fn decoration(&self, code: &str, position: Position) -> Decoration {
        Decoration {
            position,
            label: code.to_string(),
            style: self.style.clone(),
        }
    }
}
