//! Console backends for the linedit engine.
//!
//! [`UnixConsole`] talks to a real terminal through termios and raw
//! file-descriptor I/O. [`MockConsole`] replays a scripted byte stream
//! and records everything written, for tests.

#[cfg(unix)]
mod unix;
#[cfg(unix)]
pub use unix::UnixConsole;

pub use linedit_core::console::{Console, ConsoleError, ConsoleResult, RawModeGuard};
pub use linedit_core::testing::MockConsole;
