//! Inline hints shown to the right of the cursor.

/// Standard foreground colors for hint text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HintColor {
    /// Terminal default color.
    #[default]
    None,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl HintColor {
    /// SGR foreground code, or `None` for the terminal default.
    pub fn ansi_code(self) -> Option<u8> {
        match self {
            HintColor::None => None,
            HintColor::Black => Some(30),
            HintColor::Red => Some(31),
            HintColor::Green => Some(32),
            HintColor::Yellow => Some(33),
            HintColor::Blue => Some(34),
            HintColor::Magenta => Some(35),
            HintColor::Cyan => Some(36),
            HintColor::White => Some(37),
        }
    }
}

/// A hint and how to style it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Hint {
    pub text: String,
    pub color: HintColor,
    pub bold: bool,
}

impl Hint {
    pub fn new(text: impl Into<String>) -> Self {
        Hint {
            text: text.into(),
            color: HintColor::None,
            bold: false,
        }
    }

    pub fn with_style(text: impl Into<String>, color: HintColor, bold: bool) -> Self {
        Hint {
            text: text.into(),
            color,
            bold,
        }
    }

    /// SGR prefix for the hint, or `None` when it renders unstyled.
    /// Bold hints with no explicit color fall back to white so the bold
    /// attribute is visible on terminals that render bold as bright.
    pub fn style_prefix(&self) -> Option<String> {
        let mut color = self.color.ansi_code();
        if self.bold && color.is_none() {
            color = Some(37);
        }
        color.map(|code| format!("\x1b[{};{};49m", u8::from(self.bold), code))
    }
}

/// Produces a hint for the current line, if any.
pub trait Hinter {
    fn hint(&self, line: &str) -> Option<Hint>;
}

/// Any `Fn(&str) -> Option<Hint>` works directly as a hinter.
impl<F> Hinter for F
where
    F: Fn(&str) -> Option<Hint>,
{
    fn hint(&self, line: &str) -> Option<Hint> {
        self(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unstyled_hint_has_no_prefix() {
        assert_eq!(Hint::new("args").style_prefix(), None);
    }

    #[test]
    fn colored_hint_prefix() {
        let hint = Hint::with_style("args", HintColor::Green, false);
        assert_eq!(hint.style_prefix().as_deref(), Some("\x1b[0;32;49m"));
    }

    #[test]
    fn bold_without_color_falls_back_to_white() {
        let hint = Hint::with_style("args", HintColor::None, true);
        assert_eq!(hint.style_prefix().as_deref(), Some("\x1b[1;37;49m"));
    }

    #[test]
    fn closure_acts_as_hinter() {
        let hinter = |line: &str| {
            if line == "git" {
                Some(Hint::new(" <subcommand>"))
            } else {
                None
            }
        };
        assert_eq!(hinter.hint("git").map(|h| h.text), Some(" <subcommand>".to_owned()));
        assert!(hinter.hint("ls").is_none());
    }
}
