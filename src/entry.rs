//! The entry-line document: text, tag spans, and the cursor.
//!
//! [`EntryBuffer`] is the engine-side mirror of the host's text widget: a
//! rope-backed single-line document plus the colored spans painted over it
//! and the user's cursor (a char index, kept on grapheme boundaries).
//!
//! Span maintenance is the engine's job: structural edits leave spans
//! untouched and the engine repaints after each reconciliation step, so a
//! span never outlives the pass that placed it.

use std::ops::Range;

use ropey::Rope;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::palette::Tag;
use crate::style::Style;

/// One painted span: a char range, the tag that owns it, and its style.
#[derive(Clone, Debug, PartialEq)]
pub struct TagSpan {
    pub range: Range<usize>,
    pub tag: Tag,
    pub style: Style,
}

/// Rope-backed entry-line document with tag spans and a cursor.
#[derive(Clone, Debug, Default)]
pub struct EntryBuffer {
    rope: Rope,
    spans: Vec<TagSpan>,
    cursor: usize,
}

impl EntryBuffer {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer with initial text, cursor at the end.
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        let rope = Rope::from_str(text);
        let cursor = rope.len_chars();
        Self {
            rope,
            spans: Vec::new(),
            cursor,
        }
    }

    /// Document content with any trailing newline trimmed.
    #[must_use]
    pub fn content(&self) -> String {
        let mut text = self.rope.to_string();
        while text.ends_with(['\n', '\r']) {
            text.pop();
        }
        text
    }

    /// Number of chars in the document.
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Replace the whole document. Clears spans and clamps the cursor.
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.spans.clear();
        self.cursor = self.clamp_to_grapheme(self.cursor);
    }

    /// Insert text at a char position, shifting the cursor with it.
    pub fn insert(&mut self, at: usize, text: &str) {
        let at = at.min(self.rope.len_chars());
        self.rope.insert(at, text);
        if at <= self.cursor {
            self.cursor += text.chars().count();
        }
    }

    /// Append text at the end of the document.
    pub fn append(&mut self, text: &str) {
        self.insert(self.rope.len_chars(), text);
    }

    /// Remove a char range, pulling the cursor back if it sat inside or
    /// after it.
    pub fn remove(&mut self, range: Range<usize>) {
        let len = self.rope.len_chars();
        let start = range.start.min(len);
        let end = range.end.min(len);
        if start >= end {
            return;
        }
        self.rope.remove(start..end);
        if self.cursor >= end {
            self.cursor -= end - start;
        } else if self.cursor > start {
            self.cursor = start;
        }
    }

    /// Cursor position as a char index.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor, clamping to the document and snapping down to a
    /// grapheme boundary.
    pub fn set_cursor(&mut self, at: usize) {
        self.cursor = self.clamp_to_grapheme(at);
    }

    /// Insert one character at the cursor.
    pub fn insert_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.insert(self.cursor, c.encode_utf8(&mut buf));
    }

    /// Remove the grapheme before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let start = self.grapheme_boundary_before(self.cursor);
        self.remove(start..self.cursor);
    }

    /// Remove the grapheme after the cursor.
    pub fn delete_forward(&mut self) {
        let end = self.grapheme_boundary_after(self.cursor);
        if end > self.cursor {
            self.remove(self.cursor..end);
        }
    }

    /// Visual column of the cursor (display width of the text before it).
    #[must_use]
    pub fn visual_col(&self) -> usize {
        let prefix: String = self.rope.chars().take(self.cursor).collect();
        prefix.width()
    }

    /// Drop all spans.
    pub fn clear_spans(&mut self) {
        self.spans.clear();
    }

    /// Paint a span over a char range.
    pub fn add_span(&mut self, range: Range<usize>, tag: Tag, style: Style) {
        self.spans.push(TagSpan { range, tag, style });
    }

    /// All painted spans, in paint order.
    #[must_use]
    pub fn spans(&self) -> &[TagSpan] {
        &self.spans
    }

    /// The span covering a char position, if any.
    #[must_use]
    pub fn span_at(&self, at: usize) -> Option<&TagSpan> {
        self.spans.iter().find(|s| s.range.contains(&at))
    }

    /// Find a whole-token occurrence of `token` at or after `from`.
    ///
    /// A match must be bounded by whitespace or the document edges, so a
    /// token never matches inside a longer token. Returns the char index
    /// of the match start.
    #[must_use]
    pub fn search_token(&self, token: &str, from: usize) -> Option<usize> {
        let chars: Vec<char> = self.rope.chars().collect();
        let needle: Vec<char> = token.chars().collect();
        if needle.is_empty() {
            return None;
        }

        let n = chars.len();
        let m = needle.len();
        let mut i = from;
        while i + m <= n {
            let bounded_left = i == 0 || chars[i - 1].is_whitespace();
            let bounded_right = i + m == n || chars[i + m].is_whitespace();
            if bounded_left && bounded_right && chars[i..i + m] == needle[..] {
                return Some(i);
            }
            i += 1;
        }
        None
    }

    fn clamp_to_grapheme(&self, at: usize) -> usize {
        let len = self.rope.len_chars();
        if at >= len {
            return len;
        }
        let text = self.rope.to_string();
        let mut char_offset = 0;
        let mut best = 0;
        for g in text.graphemes(true) {
            if char_offset > at {
                break;
            }
            best = char_offset;
            char_offset += g.chars().count();
        }
        best
    }

    fn grapheme_boundary_before(&self, at: usize) -> usize {
        let text = self.rope.to_string();
        let mut char_offset = 0;
        let mut prev = 0;
        for g in text.graphemes(true) {
            if char_offset >= at {
                break;
            }
            prev = char_offset;
            char_offset += g.chars().count();
        }
        prev
    }

    fn grapheme_boundary_after(&self, at: usize) -> usize {
        let text = self.rope.to_string();
        let mut char_offset = 0;
        for g in text.graphemes(true) {
            let next = char_offset + g.chars().count();
            if char_offset >= at {
                return next;
            }
            char_offset = next;
        }
        char_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;

    #[test]
    fn test_content_trims_trailing_newline() {
        let buffer = EntryBuffer::with_text("a b\n");
        assert_eq!(buffer.content(), "a b");
    }

    #[test]
    fn test_insert_shifts_cursor() {
        let mut buffer = EntryBuffer::with_text("abc");
        buffer.set_cursor(1);
        buffer.insert(0, "xy");
        assert_eq!(buffer.content(), "xyabc");
        assert_eq!(buffer.cursor(), 3);

        buffer.insert(5, "z");
        assert_eq!(buffer.content(), "xyabcz");
        assert_eq!(buffer.cursor(), 3);
    }

    #[test]
    fn test_remove_adjusts_cursor() {
        let mut buffer = EntryBuffer::with_text("hello world");
        buffer.set_cursor(8);
        buffer.remove(0..6);
        assert_eq!(buffer.content(), "world");
        assert_eq!(buffer.cursor(), 2);

        let mut buffer = EntryBuffer::with_text("hello");
        buffer.set_cursor(3);
        buffer.remove(1..5);
        assert_eq!(buffer.cursor(), 1);
    }

    #[test]
    fn test_backspace_removes_whole_grapheme() {
        // "e" followed by a combining acute accent is one grapheme
        let mut buffer = EntryBuffer::with_text("ae\u{301}");
        buffer.backspace();
        assert_eq!(buffer.content(), "a");
        assert_eq!(buffer.cursor(), 1);
    }

    #[test]
    fn test_cursor_snaps_to_grapheme_boundary() {
        let mut buffer = EntryBuffer::with_text("e\u{301}x");
        buffer.set_cursor(1);
        assert_eq!(buffer.cursor(), 0);
        buffer.set_cursor(2);
        assert_eq!(buffer.cursor(), 2);
    }

    #[test]
    fn test_delete_forward() {
        let mut buffer = EntryBuffer::with_text("abc");
        buffer.set_cursor(1);
        buffer.delete_forward();
        assert_eq!(buffer.content(), "ac");
        assert_eq!(buffer.cursor(), 1);
    }

    #[test]
    fn test_search_token_is_whole_token() {
        let buffer = EntryBuffer::with_text(":4 :42 x:4");
        assert_eq!(buffer.search_token(":4", 0), Some(0));
        assert_eq!(buffer.search_token(":42", 0), Some(3));
        assert_eq!(buffer.search_token(":4", 1), None);
        assert_eq!(buffer.search_token("missing", 0), None);
    }

    #[test]
    fn test_spans() {
        let mut buffer = EntryBuffer::with_text("ab cd");
        buffer.add_span(0..2, Tag::Color(0), Style::fg(Rgba::RED));
        buffer.add_span(3..5, Tag::Wrong, Style::bg(Rgba::RED));

        assert_eq!(buffer.spans().len(), 2);
        assert_eq!(buffer.span_at(1).map(|s| s.tag), Some(Tag::Color(0)));
        assert_eq!(buffer.span_at(2), None);
        assert_eq!(buffer.span_at(4).map(|s| s.tag), Some(Tag::Wrong));

        buffer.clear_spans();
        assert!(buffer.spans().is_empty());
    }

    #[test]
    fn test_visual_col_counts_wide_chars() {
        let mut buffer = EntryBuffer::with_text("中x");
        buffer.set_cursor(1);
        assert_eq!(buffer.visual_col(), 2);
    }
}
