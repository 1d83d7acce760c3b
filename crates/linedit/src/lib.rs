//! Minimal VT100 line editing with history, completion and hints.
//!
//! ```no_run
//! use linedit::{Prompt, StaticCompleter};
//!
//! let mut prompt = Prompt::builder()
//!     .with_completer(StaticCompleter::new(["help", "history", "quit"]))
//!     .build();
//! while let Some(line) = prompt.input("> ") {
//!     prompt.add_history(&line);
//!     println!("you said: {line}");
//! }
//! ```

mod persistence;
mod prompt;

pub use persistence::{load_history, save_history};
pub use prompt::{Prompt, PromptBuilder};

pub use linedit_core::{
    Completer, Console, ConsoleError, ConsoleResult, Hint, HintColor, Hinter, History, Key,
    ReadOutcome, StaticCompleter,
};
pub use linedit_io::{MockConsole, UnixConsole};
