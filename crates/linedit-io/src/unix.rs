//! Terminal backend for Unix-like systems.
//!
//! Raw mode follows the classic recipe: disable input translation and
//! flow control, output post-processing, echo, canonical mode and
//! signals, with `VMIN=1`/`VTIME=0` so reads block for exactly one
//! byte. The original attributes are restored through the guard with
//! `TCSAFLUSH`, discarding unread input.

use std::io;
use std::os::unix::io::AsRawFd;

use linedit_core::console::{Console, ConsoleError, ConsoleResult, RawModeGuard};

/// Terminal types that do not understand VT100 escapes.
const UNSUPPORTED_TERMS: [&str; 3] = ["dumb", "cons25", "emacs"];

fn term_supported(term: Option<&str>) -> bool {
    match term {
        Some(term) => !UNSUPPORTED_TERMS
            .iter()
            .any(|unsupported| term.eq_ignore_ascii_case(unsupported)),
        None => true,
    }
}

fn terminal_error() -> ConsoleError {
    ConsoleError::Terminal(io::Error::last_os_error().to_string())
}

/// Console over stdin/stdout of the current process.
pub struct UnixConsole {
    stdin_fd: i32,
    stdout_fd: i32,
}

impl UnixConsole {
    pub fn new() -> Self {
        UnixConsole {
            stdin_fd: io::stdin().as_raw_fd(),
            stdout_fd: io::stdout().as_raw_fd(),
        }
    }

    /// Ask the terminal where the cursor is and return the column.
    /// Part of the width fallback for terminals where `TIOCGWINSZ`
    /// reports nothing useful.
    fn cursor_column(&mut self) -> Option<usize> {
        self.write(b"\x1b[6n").ok()?;
        // Reply has the form ESC [ rows ; cols R.
        let mut reply = Vec::new();
        loop {
            match self.read_byte() {
                Ok(Some(b'R')) => break,
                Ok(Some(byte)) => {
                    reply.push(byte);
                    if reply.len() >= 32 {
                        return None;
                    }
                }
                _ => return None,
            }
        }
        let text = std::str::from_utf8(reply.strip_prefix(b"\x1b[")?).ok()?;
        let (_rows, cols) = text.split_once(';')?;
        cols.parse().ok()
    }

    /// Measure the width by parking the cursor at the right edge and
    /// asking where it ended up, then move it back.
    fn probe_columns(&mut self) -> Option<usize> {
        let start = self.cursor_column()?;
        self.write(b"\x1b[999C").ok()?;
        let end = self.cursor_column()?;
        if end > start {
            let back = format!("\x1b[{}D", end - start);
            let _ = self.write(back.as_bytes());
        }
        Some(end)
    }
}

impl Default for UnixConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for UnixConsole {
    fn is_tty(&self) -> bool {
        unsafe { libc::isatty(self.stdin_fd) == 1 }
    }

    fn supports_escapes(&self) -> bool {
        let term = std::env::var("TERM").ok();
        term_supported(term.as_deref())
    }

    fn enable_raw_mode(&mut self) -> ConsoleResult<RawModeGuard> {
        if !self.is_tty() {
            return Err(ConsoleError::NotATty);
        }
        let fd = self.stdin_fd;
        let mut original: libc::termios = unsafe { std::mem::zeroed() };
        if unsafe { libc::tcgetattr(fd, &mut original) } == -1 {
            return Err(terminal_error());
        }

        let mut raw = original;
        raw.c_iflag &= !(libc::BRKINT | libc::ICRNL | libc::INPCK | libc::ISTRIP | libc::IXON);
        raw.c_oflag &= !libc::OPOST;
        raw.c_cflag |= libc::CS8;
        raw.c_lflag &= !(libc::ECHO | libc::ICANON | libc::IEXTEN | libc::ISIG);
        raw.c_cc[libc::VMIN] = 1;
        raw.c_cc[libc::VTIME] = 0;
        if unsafe { libc::tcsetattr(fd, libc::TCSAFLUSH, &raw) } == -1 {
            return Err(terminal_error());
        }
        log::debug!("raw mode enabled on fd {fd}");

        Ok(RawModeGuard::new(move || {
            unsafe {
                libc::tcsetattr(fd, libc::TCSAFLUSH, &original);
            }
            log::debug!("raw mode restored on fd {fd}");
        }))
    }

    fn read_byte(&mut self) -> ConsoleResult<Option<u8>> {
        let mut byte = 0u8;
        loop {
            let n = unsafe {
                libc::read(self.stdin_fd, &mut byte as *mut u8 as *mut libc::c_void, 1)
            };
            match n {
                1 => return Ok(Some(byte)),
                0 => return Ok(None),
                _ => {
                    let err = io::Error::last_os_error();
                    if err.kind() != io::ErrorKind::Interrupted {
                        return Err(ConsoleError::Io(err.to_string()));
                    }
                }
            }
        }
    }

    fn write(&mut self, bytes: &[u8]) -> ConsoleResult<()> {
        let mut written = 0;
        while written < bytes.len() {
            let n = unsafe {
                libc::write(
                    self.stdout_fd,
                    bytes[written..].as_ptr() as *const libc::c_void,
                    bytes.len() - written,
                )
            };
            if n >= 0 {
                written += n as usize;
            } else {
                let err = io::Error::last_os_error();
                if err.kind() != io::ErrorKind::Interrupted {
                    return Err(ConsoleError::Io(err.to_string()));
                }
            }
        }
        Ok(())
    }

    fn columns(&mut self) -> usize {
        let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
        let rc = unsafe { libc::ioctl(self.stdout_fd, libc::TIOCGWINSZ, &mut ws) };
        if rc == -1 || ws.ws_col == 0 {
            log::debug!("window size ioctl failed, probing cursor position");
            return self.probe_columns().unwrap_or(80);
        }
        ws.ws_col as usize
    }

    fn beep(&mut self) {
        let bell = [0x07u8];
        unsafe {
            libc::write(libc::STDERR_FILENO, bell.as_ptr() as *const libc::c_void, 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blacklisted_terms_are_rejected_case_insensitively() {
        assert!(!term_supported(Some("dumb")));
        assert!(!term_supported(Some("DUMB")));
        assert!(!term_supported(Some("Emacs")));
        assert!(!term_supported(Some("cons25")));
    }

    #[test]
    fn other_terms_are_supported() {
        assert!(term_supported(Some("xterm-256color")));
        assert!(term_supported(Some("screen")));
        assert!(term_supported(None));
    }
}
