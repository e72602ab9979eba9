//! Cursor position and horizontal scrolling for the single-line composer.
//!
//! `CursorState` owns the byte offset of the cursor and the first visible
//! byte. Widths are measured in terminal columns with `unicode-width`, so
//! wide glyphs (CJK, emoji) keep the cursor aligned.

use unicode_width::UnicodeWidthStr;

pub(super) struct CursorState {
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    pub pos: usize,
    /// Byte offset of the first visible character
    pub scroll: usize,
}

impl CursorState {
    pub fn new() -> Self {
        Self { pos: 0, scroll: 0 }
    }

    /// Reset cursor to start (used after Submit clears the buffer).
    pub fn reset(&mut self) {
        self.pos = 0;
        self.scroll = 0;
    }

    pub fn move_left(&mut self, buffer: &str) -> bool {
        if self.pos == 0 {
            return false;
        }
        self.pos = prev_char_boundary(buffer, self.pos);
        true
    }

    pub fn move_right(&mut self, buffer: &str) -> bool {
        if self.pos >= buffer.len() {
            return false;
        }
        self.pos = next_char_boundary(buffer, self.pos);
        true
    }

    /// Adjust `scroll` so the cursor stays inside a window `width` columns wide.
    /// Returns the visible slice and the cursor column within it.
    pub fn window<'b>(&mut self, buffer: &'b str, width: u16) -> (&'b str, u16) {
        let width = width as usize;
        if width == 0 {
            return ("", 0);
        }

        if self.scroll > self.pos {
            self.scroll = self.pos;
        }
        // Leave one column for the cursor itself at the end of the text.
        while buffer[self.scroll..self.pos].width() >= width {
            self.scroll = next_char_boundary(buffer, self.scroll);
        }

        let rest = &buffer[self.scroll..];
        let mut end = rest.len();
        for (i, _) in rest.char_indices() {
            if rest[..i].width() > width {
                end = prev_char_boundary(rest, i);
                break;
            }
        }
        if rest[..end].width() > width {
            end = prev_char_boundary(rest, end);
        }

        let cursor_col = buffer[self.scroll..self.pos].width() as u16;
        (&rest[..end], cursor_col)
    }
}

/// Byte offset of the character boundary before `pos`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Byte offset of the character boundary after `pos`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}
