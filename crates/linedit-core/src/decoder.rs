//! Decoding of raw terminal bytes into logical keys.
//!
//! The decoder pulls bytes from a [`Console`] one at a time. Plain bytes
//! map directly through [`Key::from_byte`]; an escape byte triggers further
//! blocking reads to resolve the VT100 sequences for arrows, Home/End and
//! Delete. Unrecognized or truncated sequences decode to [`Key::Ignore`]
//! so the session leaves its state untouched.

use crate::console::{Console, ConsoleResult};
use crate::key::{codes, Key};

/// Stateless decoder for the VT100 input subset the engine understands.
#[derive(Debug, Default)]
pub struct KeyDecoder;

impl KeyDecoder {
    pub fn new() -> Self {
        KeyDecoder
    }

    /// Read and decode the next key. `Ok(None)` means the input stream has
    /// ended before a byte arrived.
    pub fn read_key(&self, console: &mut dyn Console) -> ConsoleResult<Option<Key>> {
        match console.read_byte()? {
            Some(byte) => Ok(Some(self.decode(byte, console)?)),
            None => Ok(None),
        }
    }

    /// Decode a key given its first byte, reading continuation bytes for
    /// escape sequences.
    pub fn decode(&self, first: u8, console: &mut dyn Console) -> ConsoleResult<Key> {
        if first != codes::ESC {
            return Ok(Key::from_byte(first));
        }
        self.decode_escape(console)
    }

    /// Resolve the bytes following an escape. The two continuation bytes
    /// are read individually because slow terminals may deliver them as
    /// separate reads.
    fn decode_escape(&self, console: &mut dyn Console) -> ConsoleResult<Key> {
        let first = match console.read_byte()? {
            Some(b) => b,
            None => return Ok(Key::Ignore),
        };
        let second = match console.read_byte()? {
            Some(b) => b,
            None => return Ok(Key::Ignore),
        };

        match (first, second) {
            (b'[', b'0'..=b'9') => {
                // Extended sequence such as ESC[3~, needs one more byte.
                let third = match console.read_byte()? {
                    Some(b) => b,
                    None => return Ok(Key::Ignore),
                };
                if third != b'~' {
                    return Ok(Key::Ignore);
                }
                Ok(match second {
                    b'3' => Key::Delete,
                    // Home/End variants sent by some terminals (PuTTY).
                    b'1' => Key::Home,
                    b'4' => Key::End,
                    _ => Key::Ignore,
                })
            }
            (b'[', b'A') => Ok(Key::Up),
            (b'[', b'B') => Ok(Key::Down),
            (b'[', b'C') => Ok(Key::Right),
            (b'[', b'D') => Ok(Key::Left),
            (b'[', b'H') => Ok(Key::Home),
            (b'[', b'F') => Ok(Key::End),
            (b'O', b'H') => Ok(Key::Home),
            (b'O', b'F') => Ok(Key::End),
            _ => Ok(Key::Ignore),
        }
    }
}
