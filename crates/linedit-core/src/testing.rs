//! Scripted console for tests.
//!
//! Lives in the core crate so the decoder and session tests can use it
//! directly; `linedit-io` re-exports it next to the real backend.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::console::{Console, ConsoleError, ConsoleResult, RawModeGuard};

/// In-memory console replaying a fixed input stream and capturing all
/// output. Reports itself as an 80-column VT100-capable terminal unless
/// configured otherwise.
pub struct MockConsole {
    input: VecDeque<u8>,
    output: Vec<u8>,
    columns: usize,
    columns_queries: usize,
    tty: bool,
    escapes: bool,
    beeps: usize,
    fail_writes: bool,
    raw_active: Arc<AtomicBool>,
}

impl MockConsole {
    pub fn new(input: &[u8]) -> Self {
        MockConsole {
            input: input.iter().copied().collect(),
            output: Vec::new(),
            columns: 80,
            columns_queries: 0,
            tty: true,
            escapes: true,
            beeps: 0,
            fail_writes: false,
            raw_active: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_tty(mut self, tty: bool) -> Self {
        self.tty = tty;
        self
    }

    pub fn with_escapes(mut self, escapes: bool) -> Self {
        self.escapes = escapes;
        self
    }

    /// Make every subsequent write fail.
    pub fn fail_writes(&mut self) {
        self.fail_writes = true;
    }

    /// Everything written so far.
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    pub fn beep_count(&self) -> usize {
        self.beeps
    }

    /// How often the width has been asked for.
    pub fn columns_query_count(&self) -> usize {
        self.columns_queries
    }

    /// Whether a raw mode guard is currently live.
    pub fn raw_mode_active(&self) -> bool {
        self.raw_active.load(Ordering::SeqCst)
    }
}

impl Console for MockConsole {
    fn is_tty(&self) -> bool {
        self.tty
    }

    fn supports_escapes(&self) -> bool {
        self.escapes
    }

    fn enable_raw_mode(&mut self) -> ConsoleResult<RawModeGuard> {
        if !self.tty {
            return Err(ConsoleError::NotATty);
        }
        self.raw_active.store(true, Ordering::SeqCst);
        let active = Arc::clone(&self.raw_active);
        Ok(RawModeGuard::new(move || {
            active.store(false, Ordering::SeqCst);
        }))
    }

    fn read_byte(&mut self) -> ConsoleResult<Option<u8>> {
        Ok(self.input.pop_front())
    }

    fn write(&mut self, bytes: &[u8]) -> ConsoleResult<()> {
        if self.fail_writes {
            return Err(ConsoleError::Io("mock write failure".to_owned()));
        }
        self.output.extend_from_slice(bytes);
        Ok(())
    }

    fn columns(&mut self) -> usize {
        self.columns_queries += 1;
        self.columns
    }

    fn beep(&mut self) {
        self.beeps += 1;
    }
}
