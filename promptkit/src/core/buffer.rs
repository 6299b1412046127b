/// Minimal contract the expansion engine needs from a live editing
/// surface: the current text, the cursor, and two mutations. All
/// offsets are character offsets, not byte offsets, so multi-byte
/// input behaves the same as ASCII.
///
/// Calls are synchronous and single-threaded; the caller owns the
/// buffer exclusively for the duration of one engine call.
pub trait EditBuffer {
    /// Full buffer text.
    fn text(&self) -> &str;

    /// Cursor position as a character offset into `text()`.
    fn cursor(&self) -> usize;

    /// Replace the half-open character range `start..end` with
    /// `replacement`. Out-of-range bounds are clamped.
    fn replace_range(&mut self, start: usize, end: usize, replacement: &str);

    /// Move the cursor to `pos` (clamped to the text length).
    fn set_cursor(&mut self, pos: usize);
}

/// Owned single-line buffer used by the shell adapter and tests.
#[derive(Debug, Default, Clone)]
pub struct LineBuffer {
    text: String,
    cursor: usize,
}

/// Byte index of character offset `pos` in `s` (clamped to the end).
fn byte_index(s: &str, pos: usize) -> usize {
    s.char_indices().nth(pos).map_or(s.len(), |(b, _)| b)
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer pre-filled with `text`, cursor at the end.
    pub fn from_text(text: &str) -> Self {
        let mut buf = Self::new();
        buf.insert_text(text);
        buf
    }

    /// Insert `text` at the cursor and advance the cursor past it.
    pub fn insert_text(&mut self, text: &str) {
        let at = byte_index(&self.text, self.cursor);
        self.text.insert_str(at, text);
        self.cursor += text.chars().count();
    }

    /// Number of characters in the buffer.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Take the buffer contents, leaving it empty with the cursor at 0.
    pub fn take_text(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }
}

impl EditBuffer for LineBuffer {
    fn text(&self) -> &str {
        &self.text
    }

    fn cursor(&self) -> usize {
        self.cursor
    }

    fn replace_range(&mut self, start: usize, end: usize, replacement: &str) {
        let len = self.char_len();
        let start = start.min(len);
        let end = end.clamp(start, len);
        let from = byte_index(&self.text, start);
        let to = byte_index(&self.text, end);
        self.text.replace_range(from..to, replacement);
        self.cursor = self.cursor.min(self.char_len());
    }

    fn set_cursor(&mut self, pos: usize) {
        self.cursor = pos.min(self.char_len());
    }
}
