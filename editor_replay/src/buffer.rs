//! Text buffer, selection and style marks
//!
//! All indices are character indices, not byte offsets.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Half-open character range `[start, end)` targeted by the next edit
///
/// An empty selection (`start == end`) is a caret and is still present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Style tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Style {
    Bold,
}

/// A styled character range `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StyledRange {
    pub start: usize,
    pub end: usize,
    pub style: Style,
}

/// Text buffer with an optional selection
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Buffer {
    text: String,
    selection: Option<Selection>,
    styled: BTreeSet<StyledRange>,
}

impl Buffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            text: content.into(),
            ..Self::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn styled_ranges(&self) -> &BTreeSet<StyledRange> {
        &self.styled
    }

    /// Insert text, replacing the selection if one is present, else appending
    pub fn insert(&mut self, text: &str) {
        match self.selection.take() {
            Some(sel) => {
                let start = self.byte_offset(sel.start);
                let end = self.byte_offset(sel.end);
                self.text.replace_range(start..end, text);
                trace!(start = sel.start, end = sel.end, len = text.len(), "replace selection");
            }
            None => {
                self.text.push_str(text);
                trace!(len = text.len(), "append");
            }
        }
        self.clip_styles();
    }

    /// Delete the selection if one is present, else the last character
    pub fn delete_backward(&mut self) {
        match self.selection.take() {
            Some(sel) => {
                let start = self.byte_offset(sel.start);
                let end = self.byte_offset(sel.end);
                self.text.replace_range(start..end, "");
                trace!(start = sel.start, end = sel.end, "delete selection");
            }
            None => {
                if self.text.pop().is_some() {
                    trace!("delete last character");
                }
            }
        }
        self.clip_styles();
    }

    /// Select `[start, end)` over the current text
    ///
    /// `end` is clamped to the text length. A negative `start`, or a `start`
    /// past the clamped `end`, leaves the buffer untouched. Returns whether a
    /// selection was set.
    pub fn set_selection(&mut self, start: i64, end: i64) -> bool {
        let Ok(start) = usize::try_from(start) else {
            return false;
        };
        let len = self.len();
        let end = usize::try_from(end).ok().map(|end| end.min(len));
        match end {
            Some(end) if start <= end => {
                self.selection = Some(Selection::new(start, end));
                trace!(start, end, "select");
                true
            }
            _ => false,
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Mark the selected range with `style`
    ///
    /// Needs a non-empty selection over non-empty text; otherwise ignored.
    /// Returns whether a range was marked.
    pub fn mark_style(&mut self, style: Style) -> bool {
        match self.selection {
            Some(sel) if !sel.is_empty() && !self.text.is_empty() => {
                self.styled.insert(StyledRange {
                    start: sel.start,
                    end: sel.end,
                    style,
                });
                trace!(start = sel.start, end = sel.end, ?style, "mark style");
                true
            }
            _ => false,
        }
    }

    /// Replace text and selection wholesale; style marks are kept and clipped
    pub(crate) fn restore(&mut self, text: String, selection: Option<Selection>) {
        self.text = text;
        self.selection = selection;
        self.clip_styles();
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map_or(self.text.len(), |(offset, _)| offset)
    }

    /// Keep style marks inside `0..=len` after a text change
    fn clip_styles(&mut self) {
        let len = self.len();
        if self.styled.iter().all(|range| range.end <= len) {
            return;
        }
        self.styled = self
            .styled
            .iter()
            .filter(|range| range.start < len)
            .map(|range| StyledRange {
                end: range.end.min(len),
                ..*range
            })
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_appends_without_selection() {
        let mut buffer = Buffer::new();
        buffer.insert("hello");
        buffer.insert(" world");
        assert_eq!(buffer.text(), "hello world");
        assert_eq!(buffer.selection(), None);
    }

    #[test]
    fn test_insert_empty_text() {
        let mut buffer = Buffer::with_content("abc");
        buffer.insert("");
        assert_eq!(buffer.text(), "abc");
    }

    #[test]
    fn test_insert_replaces_selection() {
        let mut buffer = Buffer::with_content("hello");
        assert!(buffer.set_selection(1, 3));
        buffer.insert("XY");
        assert_eq!(buffer.text(), "hXYlo");
        assert_eq!(buffer.selection(), None);
    }

    #[test]
    fn test_insert_at_caret() {
        let mut buffer = Buffer::with_content("hello");
        assert!(buffer.set_selection(0, 0));
        buffer.insert(">");
        assert_eq!(buffer.text(), ">hello");
    }

    #[test]
    fn test_selection_from_zero_is_valid() {
        let mut buffer = Buffer::with_content("hello");
        assert!(buffer.set_selection(0, 2));
        buffer.insert("J");
        assert_eq!(buffer.text(), "Jllo");
    }

    #[test]
    fn test_delete_backward_removes_one_character() {
        let mut buffer = Buffer::with_content("hello");
        buffer.delete_backward();
        assert_eq!(buffer.text(), "hell");
    }

    #[test]
    fn test_delete_backward_empty_buffer() {
        let mut buffer = Buffer::new();
        buffer.delete_backward();
        assert_eq!(buffer.text(), "");
    }

    #[test]
    fn test_delete_backward_removes_selection() {
        let mut buffer = Buffer::with_content("hello");
        buffer.set_selection(1, 4);
        buffer.delete_backward();
        assert_eq!(buffer.text(), "ho");
        assert_eq!(buffer.selection(), None);
    }

    #[test]
    fn test_delete_backward_empty_selection_removes_nothing() {
        let mut buffer = Buffer::with_content("hello");
        buffer.set_selection(2, 2);
        buffer.delete_backward();
        assert_eq!(buffer.text(), "hello");
        assert_eq!(buffer.selection(), None);
    }

    #[test]
    fn test_set_selection_clamps_end() {
        let mut buffer = Buffer::with_content("hello");
        assert!(buffer.set_selection(2, 99));
        assert_eq!(buffer.selection(), Some(Selection::new(2, 5)));
    }

    #[test]
    fn test_set_selection_rejects_bad_bounds() {
        let mut buffer = Buffer::with_content("hello");
        assert!(!buffer.set_selection(-1, 3));
        assert!(!buffer.set_selection(4, 2));
        assert!(!buffer.set_selection(7, 99));
        assert!(!buffer.set_selection(0, -1));
        assert_eq!(buffer.selection(), None);
    }

    #[test]
    fn test_rejected_selection_keeps_previous() {
        let mut buffer = Buffer::with_content("hello");
        buffer.set_selection(1, 2);
        buffer.set_selection(3, 1);
        assert_eq!(buffer.selection(), Some(Selection::new(1, 2)));
    }

    #[test]
    fn test_clear_selection() {
        let mut buffer = Buffer::with_content("hello");
        buffer.set_selection(1, 2);
        buffer.clear_selection();
        assert_eq!(buffer.selection(), None);
    }

    #[test]
    fn test_multibyte_characters() {
        let mut buffer = Buffer::with_content("héllo");
        buffer.set_selection(1, 2);
        buffer.insert("e");
        assert_eq!(buffer.text(), "hello");

        let mut buffer = Buffer::with_content("añ");
        buffer.delete_backward();
        assert_eq!(buffer.text(), "a");
    }

    #[test]
    fn test_mark_style() {
        let mut buffer = Buffer::with_content("hello");
        buffer.set_selection(1, 3);
        assert!(buffer.mark_style(Style::Bold));
        let ranges: Vec<_> = buffer.styled_ranges().iter().copied().collect();
        assert_eq!(
            ranges,
            vec![StyledRange {
                start: 1,
                end: 3,
                style: Style::Bold
            }]
        );
        // Selection survives styling
        assert_eq!(buffer.selection(), Some(Selection::new(1, 3)));
    }

    #[test]
    fn test_mark_style_ignored_without_selection() {
        let mut buffer = Buffer::with_content("hello");
        assert!(!buffer.mark_style(Style::Bold));

        buffer.set_selection(2, 2);
        assert!(!buffer.mark_style(Style::Bold));

        let mut empty = Buffer::new();
        empty.set_selection(0, 0);
        assert!(!empty.mark_style(Style::Bold));
        assert!(empty.styled_ranges().is_empty());
    }

    #[test]
    fn test_styles_clipped_after_shrink() {
        let mut buffer = Buffer::with_content("hello");
        buffer.set_selection(1, 5);
        buffer.mark_style(Style::Bold);
        buffer.set_selection(2, 5);
        buffer.delete_backward();
        assert_eq!(buffer.text(), "he");
        let range = buffer.styled_ranges().iter().next().copied().unwrap();
        assert_eq!((range.start, range.end), (1, 2));

        buffer.delete_backward();
        buffer.delete_backward();
        assert!(buffer.styled_ranges().is_empty());
    }
}
