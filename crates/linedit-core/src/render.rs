//! VT100 repaint of the edited line.
//!
//! Two strategies are supported. Single-line mode keeps the edit on one
//! terminal row and slides a window over the buffer when it is wider
//! than the screen. Multi-line mode lets the line wrap and repaints the
//! whole block, tracking how many rows the previous paint used so stale
//! rows can be erased.
//!
//! Painting is split from writing: [`Renderer::paint`] builds the full
//! escape stream as bytes and [`Renderer::refresh`] flushes it with a
//! single console write, so a repaint never tears.

use crate::buffer::LineBuffer;
use crate::console::{Console, ConsoleResult};
use crate::hint::Hint;

/// Repaint engine for one edit session.
#[derive(Debug, Default)]
pub struct Renderer {
    multi_line: bool,
    /// Cursor offset at the previous paint, for multi-line row math.
    old_cursor: usize,
    /// High-water mark of rows the edit has occupied.
    max_rows: usize,
}

impl Renderer {
    pub fn new(multi_line: bool) -> Self {
        Renderer {
            multi_line,
            old_cursor: 0,
            max_rows: 0,
        }
    }

    pub fn multi_line(&self) -> bool {
        self.multi_line
    }

    pub fn set_multi_line(&mut self, multi_line: bool) {
        self.multi_line = multi_line;
    }

    /// Forget previous-paint state. Call before the first paint of a
    /// fresh line.
    pub fn reset(&mut self) {
        self.old_cursor = 0;
        self.max_rows = 0;
    }

    /// Build the escape stream that brings the screen in sync with
    /// `buffer`, updating the tracked paint state.
    pub fn paint(
        &mut self,
        prompt: &str,
        buffer: &LineBuffer,
        columns: usize,
        hint: Option<&Hint>,
    ) -> Vec<u8> {
        let columns = columns.max(1);
        if self.multi_line {
            self.paint_multi_line(prompt, buffer, columns, hint)
        } else {
            paint_single_line(prompt, buffer, columns, hint)
        }
    }

    /// Paint and flush in one console write. The caller supplies the
    /// width so all repaints of one read agree on it.
    pub fn refresh(
        &mut self,
        console: &mut dyn Console,
        prompt: &str,
        buffer: &LineBuffer,
        columns: usize,
        hint: Option<&Hint>,
    ) -> ConsoleResult<()> {
        let bytes = self.paint(prompt, buffer, columns, hint);
        console.write(&bytes)
    }

    fn paint_multi_line(
        &mut self,
        prompt: &str,
        buffer: &LineBuffer,
        columns: usize,
        hint: Option<&Hint>,
    ) -> Vec<u8> {
        let plen = prompt.len();
        let len = buffer.len();
        let pos = buffer.cursor();

        // Rows the buffer occupies now, and the row the cursor sat on
        // after the previous paint (both 1-based).
        let mut rows = (plen + len + columns - 1) / columns;
        let rpos = (plen + self.old_cursor + columns) / columns;
        let old_rows = self.max_rows;
        if rows > self.max_rows {
            self.max_rows = rows;
        }

        let mut out = Vec::new();

        // Drop to the block's last row, then erase rows bottom-up.
        if old_rows > rpos {
            out.extend_from_slice(format!("\x1b[{}B", old_rows - rpos).as_bytes());
        }
        for _ in 1..old_rows {
            out.extend_from_slice(b"\r\x1b[0K\x1b[1A");
        }
        out.extend_from_slice(b"\r\x1b[0K");

        out.extend_from_slice(prompt.as_bytes());
        out.extend_from_slice(buffer.as_bytes());
        append_hint(&mut out, plen, len, columns, hint);

        // A cursor sitting exactly on a column boundary at the end of
        // the line needs a fresh row to stand on.
        if pos > 0 && pos == len && (pos + plen) % columns == 0 {
            out.extend_from_slice(b"\n\r");
            rows += 1;
            if rows > self.max_rows {
                self.max_rows = rows;
            }
        }

        // Climb from the bottom row to the cursor row, then set the
        // column.
        let rpos2 = (plen + pos + columns) / columns;
        if rows > rpos2 {
            out.extend_from_slice(format!("\x1b[{}A", rows - rpos2).as_bytes());
        }
        let col = (plen + pos) % columns;
        if col > 0 {
            out.extend_from_slice(format!("\r\x1b[{}C", col).as_bytes());
        } else {
            out.push(b'\r');
        }

        self.old_cursor = pos;
        out
    }
}

/// Single-line repaint. Stateless: the same inputs always produce the
/// same byte stream.
fn paint_single_line(
    prompt: &str,
    buffer: &LineBuffer,
    columns: usize,
    hint: Option<&Hint>,
) -> Vec<u8> {
    let plen = prompt.len();
    let bytes = buffer.as_bytes();

    // Slide the window so the cursor is on screen, then trim the tail
    // to the screen width.
    let mut start = 0;
    let mut len = bytes.len();
    let mut pos = buffer.cursor();
    while pos > 0 && plen + pos >= columns {
        start += 1;
        len -= 1;
        pos -= 1;
    }
    while len > 0 && plen + len > columns {
        len -= 1;
    }

    let mut out = Vec::new();
    out.push(b'\r');
    out.extend_from_slice(prompt.as_bytes());
    out.extend_from_slice(&bytes[start..start + len]);
    append_hint(&mut out, plen, len, columns, hint);
    out.extend_from_slice(b"\x1b[0K");
    out.extend_from_slice(format!("\r\x1b[{}C", pos + plen).as_bytes());
    out
}

/// Append the hint after the line text when the visible line leaves
/// room for it, truncated to the remaining width.
fn append_hint(out: &mut Vec<u8>, plen: usize, shown_len: usize, columns: usize, hint: Option<&Hint>) {
    let hint = match hint {
        Some(hint) if plen + shown_len < columns => hint,
        _ => return,
    };
    let room = columns - (plen + shown_len);
    let shown = hint.text.len().min(room);
    if shown == 0 {
        return;
    }
    let style = hint.style_prefix();
    if let Some(prefix) = &style {
        out.extend_from_slice(prefix.as_bytes());
    }
    out.extend_from_slice(&hint.text.as_bytes()[..shown]);
    if style.is_some() {
        out.extend_from_slice(b"\x1b[0m");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hint::HintColor;

    fn buffer_with(text: &str) -> LineBuffer {
        let mut buf = LineBuffer::new();
        buf.set_text(text);
        buf
    }

    #[test]
    fn single_line_short_line() {
        let mut renderer = Renderer::new(false);
        let buf = buffer_with("hi");
        let out = renderer.paint("> ", &buf, 80, None);
        assert_eq!(out, b"\r> hi\x1b[0K\r\x1b[4C");
    }

    #[test]
    fn single_line_paint_is_idempotent() {
        let mut renderer = Renderer::new(false);
        let buf = buffer_with("echo hello");
        let first = renderer.paint("$ ", &buf, 40, None);
        let second = renderer.paint("$ ", &buf, 40, None);
        assert_eq!(first, second);
    }

    #[test]
    fn single_line_window_slides_past_screen_edge() {
        let mut renderer = Renderer::new(false);
        // prompt(2) + 10 bytes on a 8-column screen, cursor at end:
        // slide until prompt + cursor fits, then trim the tail.
        let buf = buffer_with("0123456789");
        let out = renderer.paint("> ", &buf, 8, None);
        assert_eq!(out, b"\r> 56789\x1b[0K\r\x1b[7C");
    }

    #[test]
    fn single_line_mid_buffer_cursor_stays_visible() {
        let mut renderer = Renderer::new(false);
        let mut buf = buffer_with("0123456789");
        buf.move_home();
        let out = renderer.paint("> ", &buf, 8, None);
        // No slide needed; tail trimmed to the screen width.
        assert_eq!(out, b"\r> 012345\x1b[0K\r\x1b[2C");
    }

    #[test]
    fn single_line_hint_is_truncated_to_free_width() {
        let mut renderer = Renderer::new(false);
        let buf = buffer_with("git");
        let hint = Hint::new(" commit --amend");
        let out = renderer.paint("> ", &buf, 10, Some(&hint));
        // 5 columns used, 5 left for the hint.
        assert_eq!(out, b"\r> git comm\x1b[0K\r\x1b[5C");
    }

    #[test]
    fn single_line_styled_hint_wraps_in_sgr() {
        let mut renderer = Renderer::new(false);
        let buf = buffer_with("git");
        let hint = Hint::with_style(" ok", HintColor::Green, false);
        let out = renderer.paint("> ", &buf, 80, Some(&hint));
        assert_eq!(
            out,
            b"\r> git\x1b[0;32;49m ok\x1b[0m\x1b[0K\r\x1b[5C"
        );
    }

    #[test]
    fn hint_suppressed_when_line_fills_screen() {
        let mut renderer = Renderer::new(false);
        let buf = buffer_with("12345678");
        let hint = Hint::new("never");
        let out = renderer.paint("> ", &buf, 10, Some(&hint));
        assert!(!out.windows(5).any(|w| w == b"never"));
    }

    #[test]
    fn multi_line_first_paint_clears_one_row() {
        let mut renderer = Renderer::new(true);
        let buf = buffer_with("hi");
        let out = renderer.paint("> ", &buf, 80, None);
        assert_eq!(out, b"\r\x1b[0K> hi\r\x1b[4C");
    }

    #[test]
    fn multi_line_row_count_formula() {
        let mut renderer = Renderer::new(true);
        // prompt(2) + 17 bytes on 10 columns -> ceil(19/10) = 2 rows.
        let buf = buffer_with("abcdefghijklmnopq");
        renderer.paint("> ", &buf, 10, None);
        assert_eq!(renderer.max_rows, 2);

        // Shrinking the line keeps the high-water mark.
        let small = buffer_with("x");
        renderer.paint("> ", &small, 10, None);
        assert_eq!(renderer.max_rows, 2);
    }

    #[test]
    fn multi_line_erases_previous_rows() {
        let mut renderer = Renderer::new(true);
        let long = buffer_with("abcdefghijklmnopq");
        renderer.paint("> ", &long, 10, None);

        let short = buffer_with("x");
        let out = renderer.paint("> ", &short, 10, None);
        // Previous paint used 2 rows with the cursor on the last one:
        // erase the bottom row, climb, erase the top, then repaint.
        assert_eq!(out, b"\r\x1b[0K\x1b[1A\r\x1b[0K> x\r\x1b[3C");
    }

    #[test]
    fn multi_line_exact_wrap_emits_fresh_row() {
        let mut renderer = Renderer::new(true);
        // prompt(2) + 8 bytes exactly fills 10 columns with the cursor
        // at the end, so the paint opens a new row for it.
        let buf = buffer_with("abcdefgh");
        let out = renderer.paint("> ", &buf, 10, None);
        assert_eq!(out, b"\r\x1b[0K> abcdefgh\n\r\r");
        assert_eq!(renderer.max_rows, 2);
    }

    #[test]
    fn reset_forgets_previous_paint() {
        let mut renderer = Renderer::new(true);
        let long = buffer_with("abcdefghijklmnopq");
        renderer.paint("> ", &long, 10, None);
        renderer.reset();

        let buf = buffer_with("hi");
        let out = renderer.paint("> ", &buf, 10, None);
        assert_eq!(out, b"\r\x1b[0K> hi\r\x1b[4C");
    }
}
