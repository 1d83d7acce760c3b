//! Tab-completion sources.

/// Produces candidate replacements for the line being edited.
///
/// The whole line up to its current state is handed to the completer;
/// each returned candidate replaces the entire line when selected.
pub trait Completer {
    fn complete(&self, line: &str) -> Vec<String>;
}

/// Any `Fn(&str) -> Vec<String>` works directly as a completer.
impl<F> Completer for F
where
    F: Fn(&str) -> Vec<String>,
{
    fn complete(&self, line: &str) -> Vec<String> {
        self(line)
    }
}

/// Completer over a fixed candidate list, matched by case-insensitive
/// prefix.
#[derive(Debug, Clone, Default)]
pub struct StaticCompleter {
    candidates: Vec<String>,
}

impl StaticCompleter {
    pub fn new<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StaticCompleter {
            candidates: candidates.into_iter().map(Into::into).collect(),
        }
    }
}

impl Completer for StaticCompleter {
    fn complete(&self, line: &str) -> Vec<String> {
        let needle = line.to_lowercase();
        self.candidates
            .iter()
            .filter(|candidate| candidate.to_lowercase().starts_with(&needle))
            .cloned()
            .collect()
    }
}
