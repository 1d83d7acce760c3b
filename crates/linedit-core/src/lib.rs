//! Core line-editing engine: key decoding, edit buffer, history,
//! completion, hints and VT100 rendering.
//!
//! Everything here is platform-independent and driven through the
//! [`Console`] trait, so the whole engine can be tested against a
//! scripted console. Real terminal backends live in `linedit-io`, the
//! user-facing prompt in `linedit`.

pub mod buffer;
pub mod completion;
pub mod console;
pub mod decoder;
pub mod hint;
pub mod history;
pub mod key;
pub mod render;
pub mod session;
pub mod testing;

pub use buffer::{LineBuffer, MAX_LINE};
pub use completion::{Completer, StaticCompleter};
pub use console::{Console, ConsoleError, ConsoleResult, RawModeGuard};
pub use decoder::KeyDecoder;
pub use hint::{Hint, HintColor, Hinter};
pub use history::{History, DEFAULT_HISTORY_MAX};
pub use key::Key;
pub use render::Renderer;
pub use session::{EditSession, ReadOutcome};
