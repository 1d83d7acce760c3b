//! Capacity-bounded edit buffer with cursor tracking.
//!
//! The buffer is byte-oriented: cursor arithmetic counts bytes, matching
//! the renderer's column math. It grows on demand up to a fixed capacity;
//! inserts past capacity are silently dropped rather than reported, so a
//! runaway paste degrades gracefully instead of failing the read.
//!
//! Invariant maintained by every operation:
//! `0 <= cursor <= len <= capacity`.

/// Upper bound for an edited line, including the slot classic
/// implementations reserve for a terminator.
pub const MAX_LINE: usize = 4096;

/// A mutable single-line edit buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    bytes: Vec<u8>,
    cursor: usize,
    capacity: usize,
}

impl LineBuffer {
    /// Create an empty buffer with the default capacity of
    /// `MAX_LINE - 1` usable bytes.
    pub fn new() -> Self {
        Self::with_capacity(MAX_LINE - 1)
    }

    /// Create an empty buffer holding at most `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        LineBuffer {
            bytes: Vec::new(),
            cursor: 0,
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The raw bytes of the edited line.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The edited line as text. Bytes that do not form valid UTF-8 are
    /// replaced, which only happens when a multi-byte sequence was cut by
    /// the capacity limit or partial input.
    pub fn to_text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }

    /// Insert one byte at the cursor, shifting the tail right. Returns
    /// `false` when the buffer is full and the byte was dropped.
    pub fn insert(&mut self, byte: u8) -> bool {
        if self.bytes.len() >= self.capacity {
            return false;
        }
        self.bytes.insert(self.cursor, byte);
        self.cursor += 1;
        true
    }

    /// Whether the cursor sits at the end of the line.
    pub fn cursor_at_end(&self) -> bool {
        self.cursor == self.bytes.len()
    }

    /// Place the cursor at an absolute offset, clamped to the line end.
    pub fn set_cursor(&mut self, pos: usize) {
        self.cursor = pos.min(self.bytes.len());
    }

    /// Replace the whole line, truncating to capacity, and park the
    /// cursor at the end. Used by history recall and completion commit.
    pub fn set_text(&mut self, text: &str) {
        let mut bytes = text.as_bytes().to_vec();
        bytes.truncate(self.capacity);
        self.cursor = bytes.len();
        self.bytes = bytes;
    }

    /// Delete the byte left of the cursor (backspace). No-op at the
    /// start of the line.
    pub fn delete_prev(&mut self) -> bool {
        if self.cursor == 0 || self.bytes.is_empty() {
            return false;
        }
        self.cursor -= 1;
        self.bytes.remove(self.cursor);
        true
    }

    /// Delete the byte under the cursor without moving it (the Delete
    /// key). No-op at the end of the line.
    pub fn delete_under(&mut self) -> bool {
        if self.bytes.is_empty() || self.cursor >= self.bytes.len() {
            return false;
        }
        self.bytes.remove(self.cursor);
        true
    }

    /// Swap the byte before the cursor with the byte under it, advancing
    /// the cursor unless it already sits before the last byte.
    pub fn transpose(&mut self) -> bool {
        if self.cursor == 0 || self.cursor >= self.bytes.len() {
            return false;
        }
        self.bytes.swap(self.cursor - 1, self.cursor);
        if self.cursor != self.bytes.len() - 1 {
            self.cursor += 1;
        }
        true
    }

    /// Clear the whole line.
    pub fn kill_line(&mut self) {
        self.bytes.clear();
        self.cursor = 0;
    }

    /// Delete from the cursor to the end of the line.
    pub fn kill_to_end(&mut self) {
        self.bytes.truncate(self.cursor);
    }

    /// Delete the whitespace-delimited word before the cursor, leaving
    /// the cursor at the start of the removed region.
    pub fn delete_prev_word(&mut self) {
        let old_cursor = self.cursor;
        while self.cursor > 0 && self.bytes[self.cursor - 1] == b' ' {
            self.cursor -= 1;
        }
        while self.cursor > 0 && self.bytes[self.cursor - 1] != b' ' {
            self.cursor -= 1;
        }
        self.bytes.drain(self.cursor..old_cursor);
    }

    pub fn move_left(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn move_right(&mut self) -> bool {
        if self.cursor >= self.bytes.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    pub fn move_home(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor = 0;
        true
    }

    pub fn move_end(&mut self) -> bool {
        if self.cursor == self.bytes.len() {
            return false;
        }
        self.cursor = self.bytes.len();
        true
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_with(text: &str) -> LineBuffer {
        let mut buf = LineBuffer::new();
        buf.set_text(text);
        buf
    }

    fn assert_invariant(buf: &LineBuffer) {
        assert!(buf.cursor() <= buf.len());
        assert!(buf.len() <= buf.capacity());
    }

    #[test]
    fn insert_at_end_appends() {
        let mut buf = LineBuffer::new();
        assert!(buf.insert(b'h'));
        assert!(buf.insert(b'i'));
        assert_eq!(buf.to_text(), "hi");
        assert_eq!(buf.cursor(), 2);
    }

    #[test]
    fn insert_mid_line_shifts_tail() {
        let mut buf = buffer_with("hllo");
        buf.move_home();
        buf.move_right();
        buf.insert(b'e');
        assert_eq!(buf.to_text(), "hello");
        assert_eq!(buf.cursor(), 2);
    }

    #[test]
    fn insert_past_capacity_is_dropped() {
        let mut buf = LineBuffer::with_capacity(3);
        assert!(buf.insert(b'a'));
        assert!(buf.insert(b'b'));
        assert!(buf.insert(b'c'));
        assert!(!buf.insert(b'd'));
        assert_eq!(buf.to_text(), "abc");
        assert_invariant(&buf);
    }

    #[test]
    fn set_text_truncates_to_capacity() {
        let mut buf = LineBuffer::with_capacity(4);
        buf.set_text("abcdef");
        assert_eq!(buf.to_text(), "abcd");
        assert_eq!(buf.cursor(), 4);
        assert_invariant(&buf);
    }

    #[test]
    fn delete_prev_removes_left_of_cursor() {
        let mut buf = buffer_with("abc");
        assert!(buf.delete_prev());
        assert_eq!(buf.to_text(), "ab");
        assert_eq!(buf.cursor(), 2);

        buf.move_home();
        assert!(!buf.delete_prev());
    }

    #[test]
    fn delete_under_keeps_cursor() {
        let mut buf = buffer_with("abc");
        buf.move_home();
        assert!(buf.delete_under());
        assert_eq!(buf.to_text(), "bc");
        assert_eq!(buf.cursor(), 0);

        buf.move_end();
        assert!(!buf.delete_under());
    }

    #[test]
    fn transpose_swaps_and_advances() {
        let mut buf = buffer_with("abcd");
        buf.move_home();
        buf.move_right(); // cursor between a and b
        assert!(buf.transpose());
        assert_eq!(buf.to_text(), "bacd");
        assert_eq!(buf.cursor(), 2);
    }

    #[test]
    fn transpose_at_last_position_does_not_advance() {
        let mut buf = buffer_with("ab");
        buf.move_home();
        buf.move_right(); // cursor == len - 1
        assert!(buf.transpose());
        assert_eq!(buf.to_text(), "ba");
        assert_eq!(buf.cursor(), 1);
    }

    #[test]
    fn transpose_at_line_edges_is_noop() {
        let mut buf = buffer_with("ab");
        assert!(!buf.transpose()); // cursor at end
        buf.move_home();
        assert!(!buf.transpose()); // cursor at start
    }

    #[test]
    fn kill_line_clears_everything() {
        let mut buf = buffer_with("hello");
        buf.kill_line();
        assert!(buf.is_empty());
        assert_eq!(buf.cursor(), 0);
    }

    #[test]
    fn kill_to_end_truncates_at_cursor() {
        let mut buf = buffer_with("hello world");
        buf.move_home();
        for _ in 0..5 {
            buf.move_right();
        }
        buf.kill_to_end();
        assert_eq!(buf.to_text(), "hello");
        assert_eq!(buf.cursor(), 5);
    }

    #[test]
    fn delete_prev_word_stops_at_word_start() {
        let mut buf = buffer_with("one two three");
        buf.delete_prev_word();
        assert_eq!(buf.to_text(), "one two ");
        assert_eq!(buf.cursor(), 8);

        // Trailing spaces are skipped before the word itself.
        let mut buf = buffer_with("one two   ");
        buf.delete_prev_word();
        assert_eq!(buf.to_text(), "one ");
        assert_eq!(buf.cursor(), 4);
    }

    #[test]
    fn delete_prev_word_mid_line() {
        let mut buf = buffer_with("one two three");
        buf.move_home();
        for _ in 0..7 {
            buf.move_right();
        }
        buf.delete_prev_word();
        assert_eq!(buf.to_text(), "one  three");
        assert_eq!(buf.cursor(), 4);
    }

    #[test]
    fn cursor_invariant_holds_under_mixed_operations() {
        let mut buf = LineBuffer::with_capacity(8);
        let ops: &[&dyn Fn(&mut LineBuffer)] = &[
            &|b| {
                b.insert(b'x');
            },
            &|b| {
                b.delete_prev();
            },
            &|b| {
                b.delete_under();
            },
            &|b| {
                b.move_left();
            },
            &|b| {
                b.move_right();
            },
            &|b| {
                b.transpose();
            },
            &|b| b.kill_to_end(),
            &|b| b.delete_prev_word(),
            &|b| b.kill_line(),
            &|b| b.set_text("seed text"),
        ];
        // Deterministic pseudo-random walk over the operation set.
        let mut state: u32 = 0x2545_f491;
        for _ in 0..2000 {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let op = (state >> 16) as usize % ops.len();
            ops[op](&mut buf);
            assert_invariant(&buf);
        }
    }
}
