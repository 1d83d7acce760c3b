//! Key definitions for decoded terminal input.
//!
//! The [`Key`] enum covers the bindings the edit session reacts to: the
//! control characters of the classic readline subset, the navigation keys
//! reachable through VT100 escape sequences, and plain printable bytes.

/// A logical key decoded from the raw terminal byte stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Ctrl-A, move to start of line.
    CtrlA,
    /// Ctrl-B, move cursor left.
    CtrlB,
    /// Ctrl-C, cancel the current line.
    CtrlC,
    /// Ctrl-D, delete under cursor or signal end-of-input.
    CtrlD,
    /// Ctrl-E, move to end of line.
    CtrlE,
    /// Ctrl-F, move cursor right.
    CtrlF,
    /// Ctrl-H, same as backspace.
    CtrlH,
    /// Ctrl-K, kill to end of line.
    CtrlK,
    /// Ctrl-L, clear the screen.
    CtrlL,
    /// Ctrl-N, next history entry.
    CtrlN,
    /// Ctrl-P, previous history entry.
    CtrlP,
    /// Ctrl-T, transpose characters around the cursor.
    CtrlT,
    /// Ctrl-U, kill the whole line.
    CtrlU,
    /// Ctrl-W, delete the previous word.
    CtrlW,
    /// Tab, starts completion when a completer is registered.
    Tab,
    /// Enter (carriage return), commits the line.
    Enter,
    /// Backspace (0x7f).
    Backspace,

    // Navigation keys delivered as escape sequences.
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Delete,

    /// A printable byte to insert at the cursor.
    Char(u8),
    /// A sequence the decoder recognized but the session should not act on.
    Ignore,
}

/// Raw byte values for the control keys the decoder switches on.
pub mod codes {
    pub const CTRL_A: u8 = 1;
    pub const CTRL_B: u8 = 2;
    pub const CTRL_C: u8 = 3;
    pub const CTRL_D: u8 = 4;
    pub const CTRL_E: u8 = 5;
    pub const CTRL_F: u8 = 6;
    pub const CTRL_H: u8 = 8;
    pub const TAB: u8 = 9;
    pub const CTRL_K: u8 = 11;
    pub const CTRL_L: u8 = 12;
    pub const ENTER: u8 = 13;
    pub const CTRL_N: u8 = 14;
    pub const CTRL_P: u8 = 16;
    pub const CTRL_T: u8 = 20;
    pub const CTRL_U: u8 = 21;
    pub const CTRL_W: u8 = 23;
    pub const ESC: u8 = 27;
    pub const BACKSPACE: u8 = 127;
}

impl Key {
    /// Map a single non-escape byte to its logical key.
    ///
    /// Escape (0x1b) is not handled here; the decoder owns the multi-byte
    /// sequences that follow it.
    pub fn from_byte(byte: u8) -> Key {
        match byte {
            codes::CTRL_A => Key::CtrlA,
            codes::CTRL_B => Key::CtrlB,
            codes::CTRL_C => Key::CtrlC,
            codes::CTRL_D => Key::CtrlD,
            codes::CTRL_E => Key::CtrlE,
            codes::CTRL_F => Key::CtrlF,
            codes::CTRL_H => Key::CtrlH,
            codes::TAB => Key::Tab,
            codes::CTRL_K => Key::CtrlK,
            codes::CTRL_L => Key::CtrlL,
            codes::ENTER => Key::Enter,
            codes::CTRL_N => Key::CtrlN,
            codes::CTRL_P => Key::CtrlP,
            codes::CTRL_T => Key::CtrlT,
            codes::CTRL_U => Key::CtrlU,
            codes::CTRL_W => Key::CtrlW,
            codes::BACKSPACE => Key::Backspace,
            b => Key::Char(b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_bytes_map_to_control_keys() {
        assert_eq!(Key::from_byte(1), Key::CtrlA);
        assert_eq!(Key::from_byte(3), Key::CtrlC);
        assert_eq!(Key::from_byte(13), Key::Enter);
        assert_eq!(Key::from_byte(127), Key::Backspace);
    }

    #[test]
    fn printable_bytes_map_to_char() {
        assert_eq!(Key::from_byte(b'a'), Key::Char(b'a'));
        assert_eq!(Key::from_byte(b' '), Key::Char(b' '));
        assert_eq!(Key::from_byte(b'~'), Key::Char(b'~'));
    }

    #[test]
    fn escape_is_not_a_direct_mapping() {
        // 27 falls through to Char; the decoder intercepts it first.
        assert_eq!(Key::from_byte(27), Key::Char(27));
    }
}
