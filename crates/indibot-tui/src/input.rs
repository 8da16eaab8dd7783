//! Minimal single-line text buffer for input editing.
//!
//! Used for both the chat input line and the rename overlay. Supports the
//! subset of editing operations the shell needs; the cursor is tracked in
//! char units.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Cursor movement commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    Forward,
    Back,
    Head,
    End,
}

/// Single-line text buffer with a char-indexed cursor.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    text: String,
    cursor: usize,
}

impl InputState {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a buffer pre-filled with `text`, cursor at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    /// Returns the buffer contents.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the cursor position in char units.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns true if the buffer is empty or whitespace-only.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Takes the buffer contents, leaving it empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    /// Inserts a string at the cursor, advancing the cursor.
    ///
    /// Newlines are replaced with spaces; the buffer is single-line.
    pub fn insert_str(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let text = text.replace(['\n', '\r'], " ");
        let byte_idx = char_to_byte_index(&self.text, self.cursor);
        self.text.insert_str(byte_idx, &text);
        self.cursor += text.chars().count();
    }

    /// Inserts a single character at the cursor.
    pub fn insert_char(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        self.insert_str(ch.encode_utf8(&mut buf));
    }

    /// Deletes the character before the cursor (Backspace semantics).
    pub fn delete_prev_char(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let start = char_to_byte_index(&self.text, self.cursor - 1);
        let end = char_to_byte_index(&self.text, self.cursor);
        self.text.replace_range(start..end, "");
        self.cursor -= 1;
    }

    /// Deletes the character at the cursor (Delete key semantics).
    pub fn delete_next_char(&mut self) {
        if self.cursor >= self.text.chars().count() {
            return;
        }
        let start = char_to_byte_index(&self.text, self.cursor);
        let end = char_to_byte_index(&self.text, self.cursor + 1);
        self.text.replace_range(start..end, "");
    }

    /// Moves the cursor according to a movement command.
    pub fn move_cursor(&mut self, movement: CursorMove) {
        let len = self.text.chars().count();
        match movement {
            CursorMove::Forward => self.cursor = (self.cursor + 1).min(len),
            CursorMove::Back => self.cursor = self.cursor.saturating_sub(1),
            CursorMove::Head => self.cursor = 0,
            CursorMove::End => self.cursor = len,
        }
    }

    /// Handles a key input for basic editing.
    pub fn input(&mut self, key: KeyEvent) {
        if matches!(key.kind, KeyEventKind::Release) {
            return;
        }

        match key.code {
            KeyCode::Char(ch)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.insert_char(ch);
            }
            KeyCode::Backspace => self.delete_prev_char(),
            KeyCode::Delete => self.delete_next_char(),
            KeyCode::Left => self.move_cursor(CursorMove::Back),
            KeyCode::Right => self.move_cursor(CursorMove::Forward),
            KeyCode::Home => self.move_cursor(CursorMove::Head),
            KeyCode::End => self.move_cursor(CursorMove::End),
            _ => {}
        }
    }
}

fn char_to_byte_index(text: &str, col: usize) -> usize {
    if col == 0 {
        return 0;
    }
    text.char_indices()
        .nth(col)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_delete_roundtrip() {
        let mut input = InputState::new();
        input.insert_str("hello");
        assert_eq!(input.text(), "hello");
        assert_eq!(input.cursor(), 5);

        input.delete_prev_char();
        assert_eq!(input.text(), "hell");
        assert_eq!(input.cursor(), 4);
    }

    #[test]
    fn insert_in_the_middle() {
        let mut input = InputState::with_text("helo");
        input.move_cursor(CursorMove::Back);
        input.insert_char('l');
        assert_eq!(input.text(), "hello");
        assert_eq!(input.cursor(), 4);
    }

    #[test]
    fn cursor_is_char_indexed_for_multibyte_text() {
        let mut input = InputState::with_text("héllo");
        assert_eq!(input.cursor(), 5);
        input.move_cursor(CursorMove::Head);
        input.move_cursor(CursorMove::Forward);
        input.delete_next_char(); // removes 'é'
        assert_eq!(input.text(), "hllo");
    }

    #[test]
    fn pasted_newlines_become_spaces() {
        let mut input = InputState::new();
        input.insert_str("one\ntwo");
        assert_eq!(input.text(), "one two");
    }

    #[test]
    fn take_empties_the_buffer() {
        let mut input = InputState::with_text("hello");
        assert_eq!(input.take(), "hello");
        assert_eq!(input.text(), "");
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn is_blank_treats_whitespace_as_empty() {
        assert!(InputState::with_text("   ").is_blank());
        assert!(!InputState::with_text(" x ").is_blank());
    }
}
