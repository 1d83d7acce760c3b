//! High-level prompt interface.
//!
//! [`Prompt`] ties the engine together: it owns the console backend,
//! history, renderer and the optional completer and hinter, and exposes
//! a single [`Prompt::input`] call that reads one line. Terminals that
//! cannot do raw-mode editing degrade to plain line reads.

use linedit_core::buffer::MAX_LINE;
use linedit_core::completion::Completer;
use linedit_core::console::{Console, ConsoleResult};
use linedit_core::hint::Hinter;
use linedit_core::history::History;
use linedit_core::render::Renderer;
use linedit_core::session::{EditSession, ReadOutcome};
use linedit_io::UnixConsole;

use std::io;
use std::path::Path;

use crate::persistence;

/// Interactive line reader with history, completion and hints.
pub struct Prompt {
    console: Box<dyn Console>,
    history: History,
    renderer: Renderer,
    completer: Option<Box<dyn Completer>>,
    hinter: Option<Box<dyn Hinter>>,
    interrupted: bool,
}

impl Prompt {
    /// A prompt over the process terminal with default settings.
    pub fn new() -> Self {
        Prompt::builder().build()
    }

    pub fn builder() -> PromptBuilder {
        PromptBuilder::default()
    }

    /// Read one line, displaying `prompt` before the input.
    ///
    /// Returns `None` when the user cancels with Ctrl-C (see
    /// [`Prompt::was_interrupted`]), signals end of input with Ctrl-D on
    /// an empty line, or the terminal write path fails.
    ///
    /// When stdin is not a terminal the line is read verbatim with no
    /// editing or length cap. When the terminal type is on the
    /// no-escape blacklist the prompt is printed and a plain, capped
    /// line read is used instead of the editor.
    pub fn input(&mut self, prompt: &str) -> Option<String> {
        self.interrupted = false;

        if !self.console.is_tty() {
            return self.read_plain_line(false);
        }
        if !self.console.supports_escapes() {
            log::info!("terminal lacks escape support, using plain reads");
            self.console.write(prompt.as_bytes()).ok()?;
            return self.read_plain_line(true);
        }

        let guard = self.console.enable_raw_mode().ok()?;
        let outcome = EditSession::new(
            &mut *self.console,
            &mut self.history,
            &mut self.renderer,
            prompt,
        )
        .completer(self.completer.as_deref())
        .hinter(self.hinter.as_deref())
        .run();
        guard.restore();
        let _ = self.console.write(b"\n");

        match outcome {
            Ok(ReadOutcome::Line(line)) => Some(line),
            Ok(ReadOutcome::Interrupted) => {
                self.interrupted = true;
                None
            }
            Ok(ReadOutcome::Eof) => None,
            Err(err) => {
                log::warn!("line read aborted: {err}");
                None
            }
        }
    }

    /// Whether the last [`Prompt::input`] call ended with Ctrl-C.
    pub fn was_interrupted(&self) -> bool {
        self.interrupted
    }

    /// Append a line to history. Returns `false` when history is
    /// disabled or the line repeats the most recent entry.
    pub fn add_history(&mut self, line: &str) -> bool {
        self.history.add(line)
    }

    /// Bound the number of remembered lines; 0 disables history.
    pub fn set_history_max_size(&mut self, max_size: usize) {
        self.history.set_max_size(max_size);
    }

    /// Switch between single-line and wrapped multi-line editing.
    pub fn set_multi_line(&mut self, multi_line: bool) {
        self.renderer.set_multi_line(multi_line);
    }

    pub fn set_completer<C: Completer + 'static>(&mut self, completer: C) {
        self.completer = Some(Box::new(completer));
    }

    pub fn set_hinter<H: Hinter + 'static>(&mut self, hinter: H) {
        self.hinter = Some(Box::new(hinter));
    }

    /// Clear the screen and home the cursor.
    pub fn clear_screen(&mut self) -> ConsoleResult<()> {
        self.console.clear_screen()
    }

    /// Load history entries from a newline-separated file.
    pub fn load_history(&mut self, path: impl AsRef<Path>) -> io::Result<()> {
        persistence::load_history(&mut self.history, path)
    }

    /// Write the current history to a newline-separated file.
    pub fn save_history(&self, path: impl AsRef<Path>) -> io::Result<()> {
        persistence::save_history(&self.history, path)
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Line read with no editing. `capped` bounds the accepted length
    /// the same way the editor does and strips a trailing carriage
    /// return, the terminal fallback behavior; uncapped reads keep the
    /// bytes verbatim.
    fn read_plain_line(&mut self, capped: bool) -> Option<String> {
        let mut bytes = Vec::new();
        loop {
            match self.console.read_byte() {
                Ok(Some(b'\n')) => break,
                Ok(Some(byte)) => {
                    bytes.push(byte);
                    if capped && bytes.len() >= MAX_LINE - 1 {
                        break;
                    }
                }
                Ok(None) | Err(_) => {
                    if bytes.is_empty() {
                        return None;
                    }
                    break;
                }
            }
        }
        if capped && bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
        Some(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl Default for Prompt {
    fn default() -> Self {
        Self::new()
    }
}

/// Configures and builds a [`Prompt`].
#[derive(Default)]
pub struct PromptBuilder {
    console: Option<Box<dyn Console>>,
    multi_line: bool,
    history_max: Option<usize>,
    completer: Option<Box<dyn Completer>>,
    hinter: Option<Box<dyn Hinter>>,
}

impl PromptBuilder {
    /// Use a specific console backend instead of the process terminal.
    pub fn with_console(mut self, console: Box<dyn Console>) -> Self {
        self.console = Some(console);
        self
    }

    pub fn with_multi_line(mut self, multi_line: bool) -> Self {
        self.multi_line = multi_line;
        self
    }

    pub fn with_history_max_size(mut self, max_size: usize) -> Self {
        self.history_max = Some(max_size);
        self
    }

    pub fn with_completer<C: Completer + 'static>(mut self, completer: C) -> Self {
        self.completer = Some(Box::new(completer));
        self
    }

    pub fn with_hinter<H: Hinter + 'static>(mut self, hinter: H) -> Self {
        self.hinter = Some(Box::new(hinter));
        self
    }

    pub fn build(self) -> Prompt {
        let console = self
            .console
            .unwrap_or_else(|| Box::new(UnixConsole::new()));
        let mut history = History::new();
        if let Some(max) = self.history_max {
            history.set_max_size(max);
        }
        Prompt {
            console,
            history,
            renderer: Renderer::new(self.multi_line),
            completer: self.completer,
            hinter: self.hinter,
            interrupted: false,
        }
    }
}
