//! Console abstraction for terminal input/output.
//!
//! The engine talks to the terminal exclusively through the [`Console`]
//! trait so that the edit session, decoder and renderer can be exercised
//! against a scripted backend in tests. Platform implementations live in
//! the `linedit-io` crate.

use std::fmt;

/// Errors produced by console backends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleError {
    /// Standard input is not attached to a terminal.
    NotATty,
    /// An underlying read or write failed.
    Io(String),
    /// Terminal mode setup or teardown failed.
    Terminal(String),
}

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsoleError::NotATty => write!(f, "standard input is not a TTY"),
            ConsoleError::Io(msg) => write!(f, "I/O error: {msg}"),
            ConsoleError::Terminal(msg) => write!(f, "terminal error: {msg}"),
        }
    }
}

impl std::error::Error for ConsoleError {}

/// Result type for console operations.
pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// Blocking, byte-oriented access to one terminal.
///
/// Reads deliver one byte at a time (`Ok(None)` is end of input); writes
/// are expected to reach the terminal before the call returns. A width
/// query may itself perform terminal I/O when probing is required, which
/// is why it takes `&mut self`.
pub trait Console {
    /// Whether standard input is attached to a terminal.
    fn is_tty(&self) -> bool;

    /// Whether the terminal understands basic VT100 escape sequences.
    ///
    /// Backends report `false` for the small blacklist of terminal types
    /// that do not (`dumb`, `cons25`, `emacs`).
    fn supports_escapes(&self) -> bool;

    /// Switch the terminal to raw mode, returning a guard that restores
    /// the previous mode when dropped.
    fn enable_raw_mode(&mut self) -> ConsoleResult<RawModeGuard>;

    /// Read one byte, blocking until input arrives. `Ok(None)` means the
    /// input stream has ended.
    fn read_byte(&mut self) -> ConsoleResult<Option<u8>>;

    /// Write bytes to the terminal.
    fn write(&mut self, bytes: &[u8]) -> ConsoleResult<()>;

    /// Number of columns in the terminal, falling back to 80 when the
    /// width cannot be determined.
    fn columns(&mut self) -> usize;

    /// Emit an audible bell.
    fn beep(&mut self);

    /// Clear the screen and home the cursor.
    fn clear_screen(&mut self) -> ConsoleResult<()> {
        self.write(b"\x1b[H\x1b[2J")
    }
}

/// RAII guard restoring the terminal mode saved by
/// [`Console::enable_raw_mode`].
///
/// The restore closure runs exactly once, either on drop or through an
/// explicit [`RawModeGuard::restore`] call. Every exit path of a line
/// read, including error paths, goes through this guard.
pub struct RawModeGuard {
    restore: Option<Box<dyn FnOnce() + Send>>,
}

impl RawModeGuard {
    pub fn new<F>(restore: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        RawModeGuard {
            restore: Some(Box::new(restore)),
        }
    }

    /// Restore the terminal mode now instead of waiting for drop.
    pub fn restore(mut self) {
        if let Some(restore) = self.restore.take() {
            restore();
        }
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Some(restore) = self.restore.take() {
            restore();
        }
    }
}

impl fmt::Debug for RawModeGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawModeGuard")
            .field("active", &self.restore.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn guard_runs_restore_on_drop() {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        {
            let _guard = RawModeGuard::new(move || {
                c.fetch_add(1, Ordering::SeqCst);
            });
        }
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn explicit_restore_runs_once() {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        let guard = RawModeGuard::new(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });
        guard.restore();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn console_error_display() {
        assert_eq!(
            ConsoleError::NotATty.to_string(),
            "standard input is not a TTY"
        );
        assert_eq!(
            ConsoleError::Io("broken pipe".to_string()).to_string(),
            "I/O error: broken pipe"
        );
    }
}
