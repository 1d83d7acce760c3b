//! The interactive edit loop.
//!
//! An [`EditSession`] drives one line read: it decodes keys, applies them
//! to the buffer, repaints through the renderer and walks history. The
//! session borrows its collaborators so the caller keeps ownership of
//! history and renderer state across reads.

use crate::buffer::LineBuffer;
use crate::completion::Completer;
use crate::console::{Console, ConsoleResult};
use crate::decoder::KeyDecoder;
use crate::hint::{Hint, Hinter};
use crate::history::History;
use crate::key::{codes, Key};
use crate::render::Renderer;

/// How a line read ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// The user committed a line, or input ended with text accumulated.
    Line(String),
    /// Ctrl-C cancelled the read.
    Interrupted,
    /// Ctrl-D on an empty line signalled end of input.
    Eof,
}

/// One interactive line read over a raw-mode console.
pub struct EditSession<'a> {
    console: &'a mut dyn Console,
    history: &'a mut History,
    renderer: &'a mut Renderer,
    prompt: &'a str,
    completer: Option<&'a dyn Completer>,
    hinter: Option<&'a dyn Hinter>,
    buffer: LineBuffer,
    decoder: KeyDecoder,
    history_index: usize,
    columns: usize,
}

impl<'a> EditSession<'a> {
    pub fn new(
        console: &'a mut dyn Console,
        history: &'a mut History,
        renderer: &'a mut Renderer,
        prompt: &'a str,
    ) -> Self {
        EditSession {
            console,
            history,
            renderer,
            prompt,
            completer: None,
            hinter: None,
            buffer: LineBuffer::new(),
            decoder: KeyDecoder::new(),
            history_index: 0,
            columns: 80,
        }
    }

    pub fn completer(mut self, completer: Option<&'a dyn Completer>) -> Self {
        self.completer = completer;
        self
    }

    pub fn hinter(mut self, hinter: Option<&'a dyn Hinter>) -> Self {
        self.hinter = hinter;
        self
    }

    /// Run the edit loop until the line is committed, cancelled or the
    /// input ends. A read failure commits whatever has been typed; a
    /// write failure aborts with the error.
    pub fn run(&mut self) -> ConsoleResult<ReadOutcome> {
        self.renderer.reset();
        // Width is sampled once per read; a resize shows up on the next
        // prompt.
        self.columns = self.console.columns();

        // Park an empty entry at the history tail so the user can step
        // back down to the line being typed.
        self.history.push_transient("");
        self.history_index = self.history.len() - 1;

        let outcome = self.edit_loop();
        if outcome.is_err() {
            // Every Ok exit pops the entry itself; error exits do not.
            self.history.pop_transient();
        }
        outcome
    }

    fn edit_loop(&mut self) -> ConsoleResult<ReadOutcome> {
        self.refresh()?;

        let mut pending: Option<Key> = None;
        loop {
            let key = match pending.take() {
                Some(key) => key,
                None => match self.decoder.read_key(&mut *self.console) {
                    Ok(Some(key)) => key,
                    Ok(None) | Err(_) => {
                        // Input gone: hand back what was accumulated.
                        self.history.pop_transient();
                        return Ok(ReadOutcome::Line(self.buffer.to_text()));
                    }
                },
            };
            log::trace!("key {:?}", key);

            if key == Key::Tab && self.completer.is_some() {
                pending = self.complete_line()?;
                continue;
            }
            if let Some(outcome) = self.handle_key(key)? {
                log::debug!("read finished: {:?}", outcome);
                return Ok(outcome);
            }
        }
    }

    fn handle_key(&mut self, key: Key) -> ConsoleResult<Option<ReadOutcome>> {
        match key {
            Key::Enter => {
                self.history.pop_transient();
                let moved = self.renderer.multi_line() && self.buffer.move_end();
                // Repaint once more so the cursor lands after the last
                // wrapped row and a shown hint does not survive past
                // the committed line.
                if moved || self.hinter.is_some() {
                    self.refresh_with(None)?;
                }
                return Ok(Some(ReadOutcome::Line(self.buffer.to_text())));
            }
            Key::CtrlC => {
                self.history.pop_transient();
                return Ok(Some(ReadOutcome::Interrupted));
            }
            Key::CtrlD => {
                if self.buffer.is_empty() {
                    self.history.pop_transient();
                    return Ok(Some(ReadOutcome::Eof));
                }
                if self.buffer.delete_under() {
                    self.refresh()?;
                }
            }
            Key::Backspace | Key::CtrlH => {
                if self.buffer.delete_prev() {
                    self.refresh()?;
                }
            }
            Key::Delete => {
                if self.buffer.delete_under() {
                    self.refresh()?;
                }
            }
            Key::CtrlT => {
                if self.buffer.transpose() {
                    self.refresh()?;
                }
            }
            Key::CtrlB | Key::Left => {
                if self.buffer.move_left() {
                    self.refresh()?;
                }
            }
            Key::CtrlF | Key::Right => {
                if self.buffer.move_right() {
                    self.refresh()?;
                }
            }
            Key::CtrlA | Key::Home => {
                if self.buffer.move_home() {
                    self.refresh()?;
                }
            }
            Key::CtrlE | Key::End => {
                if self.buffer.move_end() {
                    self.refresh()?;
                }
            }
            Key::CtrlP | Key::Up => self.navigate_history(true)?,
            Key::CtrlN | Key::Down => self.navigate_history(false)?,
            Key::CtrlU => {
                self.buffer.kill_line();
                self.refresh()?;
            }
            Key::CtrlK => {
                self.buffer.kill_to_end();
                self.refresh()?;
            }
            Key::CtrlW => {
                self.buffer.delete_prev_word();
                self.refresh()?;
            }
            Key::CtrlL => {
                self.console.clear_screen()?;
                self.refresh()?;
            }
            // Tab reaches here only when no completer is registered.
            Key::Tab => self.insert_byte(codes::TAB)?,
            Key::Char(byte) => self.insert_byte(byte)?,
            Key::Ignore => {}
        }
        Ok(None)
    }

    /// Insert a byte, writing just that byte when it lands at the end of
    /// a line that still fits on one row. Otherwise a full repaint.
    fn insert_byte(&mut self, byte: u8) -> ConsoleResult<()> {
        if !self.buffer.insert(byte) {
            return Ok(());
        }
        let fits = self.prompt.len() + self.buffer.len() < self.columns;
        if !self.renderer.multi_line()
            && self.buffer.cursor_at_end()
            && fits
            && self.hinter.is_none()
        {
            self.console.write(&[byte])
        } else {
            self.refresh()
        }
    }

    /// Step through history. The slot currently selected is overwritten
    /// with the edited text first, so edits follow the user around. At
    /// either end the index clamps without a repaint.
    fn navigate_history(&mut self, older: bool) -> ConsoleResult<()> {
        if self.history.len() <= 1 {
            return Ok(());
        }
        let current = self.buffer.to_text();
        self.history.set(self.history_index, &current);
        if older {
            if self.history_index == 0 {
                return Ok(());
            }
            self.history_index -= 1;
        } else {
            if self.history_index + 1 >= self.history.len() {
                return Ok(());
            }
            self.history_index += 1;
        }
        if let Some(entry) = self.history.get(self.history_index) {
            let entry = entry.to_owned();
            self.buffer.set_text(&entry);
        }
        self.refresh()
    }

    /// Completion sub-loop. Candidates are previewed in place; Tab cycles
    /// through them (with the original line after the last), Escape
    /// restores the original line, and any other key commits the shown
    /// candidate and is handed back for normal dispatch.
    fn complete_line(&mut self) -> ConsoleResult<Option<Key>> {
        let completer = match self.completer {
            Some(completer) => completer,
            None => return Ok(None),
        };
        let candidates = completer.complete(&self.buffer.to_text());
        log::debug!("{} completion candidates", candidates.len());
        if candidates.is_empty() {
            self.console.beep();
            return Ok(None);
        }

        let saved_text = self.buffer.to_text();
        let saved_cursor = self.buffer.cursor();
        let mut index = 0usize;
        loop {
            if index < candidates.len() {
                // Preview the candidate, then put the real line back so
                // editing state is untouched until a commit.
                self.buffer.set_text(&candidates[index]);
                self.refresh()?;
                self.buffer.set_text(&saved_text);
                self.buffer.set_cursor(saved_cursor);
            } else {
                self.refresh()?;
            }

            let byte = match self.console.read_byte()? {
                Some(byte) => byte,
                None => return Ok(None),
            };
            match byte {
                codes::TAB => {
                    index = (index + 1) % (candidates.len() + 1);
                    if index == candidates.len() {
                        self.console.beep();
                    }
                }
                codes::ESC => {
                    if index < candidates.len() {
                        self.refresh()?;
                    }
                    return Ok(None);
                }
                other => {
                    if index < candidates.len() {
                        self.buffer.set_text(&candidates[index]);
                    }
                    return Ok(Some(Key::from_byte(other)));
                }
            }
        }
    }

    fn current_hint(&self) -> Option<Hint> {
        self.hinter.and_then(|h| h.hint(&self.buffer.to_text()))
    }

    fn refresh(&mut self) -> ConsoleResult<()> {
        let hint = self.current_hint();
        self.refresh_with(hint.as_ref())
    }

    fn refresh_with(&mut self, hint: Option<&Hint>) -> ConsoleResult<()> {
        self.renderer
            .refresh(&mut *self.console, self.prompt, &self.buffer, self.columns, hint)
    }
}
