use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::util::unicode::{self, next_grapheme_boundary, prev_grapheme_boundary};

/// A single-line text buffer with a grapheme-safe byte cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineInput {
    pub text: String,
    pub cursor: usize,
}

impl LineInput {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        LineInput { text, cursor }
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Cursor position in terminal cells
    pub fn cursor_col(&self) -> usize {
        unicode::byte_offset_to_display_col(&self.text, self.cursor)
    }

    pub fn insert(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn insert_str(&mut self, s: &str) {
        let clean: String = s
            .chars()
            .map(|c| if c == '\n' { ' ' } else { c })
            .filter(|c| !c.is_control())
            .collect();
        self.text.insert_str(self.cursor, &clean);
        self.cursor += clean.len();
    }

    /// Apply an editing key. Returns false for keys it does not handle.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match (key.modifiers, key.code) {
            (m, KeyCode::Backspace)
                if m.contains(KeyModifiers::ALT) || m.contains(KeyModifiers::CONTROL) =>
            {
                let start = unicode::word_boundary_left(&self.text, self.cursor);
                self.text.drain(start..self.cursor);
                self.cursor = start;
            }
            (_, KeyCode::Backspace) => {
                if let Some(prev) = prev_grapheme_boundary(&self.text, self.cursor) {
                    self.text.drain(prev..self.cursor);
                    self.cursor = prev;
                }
            }
            (_, KeyCode::Delete) => {
                if let Some(next) = next_grapheme_boundary(&self.text, self.cursor) {
                    self.text.drain(self.cursor..next);
                }
            }
            (_, KeyCode::Left) => {
                if let Some(prev) = prev_grapheme_boundary(&self.text, self.cursor) {
                    self.cursor = prev;
                }
            }
            (_, KeyCode::Right) => {
                if let Some(next) = next_grapheme_boundary(&self.text, self.cursor) {
                    self.cursor = next;
                }
            }
            (_, KeyCode::Home) => self.cursor = 0,
            (KeyModifiers::CONTROL, KeyCode::Char('a')) => self.cursor = 0,
            (_, KeyCode::End) => self.cursor = self.text.len(),
            (KeyModifiers::CONTROL, KeyCode::Char('e')) => self.cursor = self.text.len(),
            (KeyModifiers::CONTROL, KeyCode::Char('u')) => {
                self.text.drain(..self.cursor);
                self.cursor = 0;
            }
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => self.insert(c),
            _ => return false,
        }
        true
    }
}
