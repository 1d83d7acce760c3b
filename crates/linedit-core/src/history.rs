//! Bounded history of submitted lines.

use std::collections::VecDeque;

/// Default number of remembered lines.
pub const DEFAULT_HISTORY_MAX: usize = 100;

/// Ordered collection of previously submitted lines, oldest first.
///
/// During history navigation the line being edited is parked as a
/// transient entry at the tail so that stepping back down restores it;
/// the session removes that entry before the line is committed.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: VecDeque<String>,
    max_size: usize,
}

impl History {
    pub fn new() -> Self {
        History {
            entries: VecDeque::new(),
            max_size: DEFAULT_HISTORY_MAX,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Entry at `index`, where 0 is the oldest line.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    /// Overwrite the entry at `index`. Used while navigating so that
    /// edits made on a recalled line survive stepping away from it.
    pub fn set(&mut self, index: usize, line: &str) {
        if let Some(entry) = self.entries.get_mut(index) {
            *entry = line.to_owned();
        }
    }

    /// Append a line. Returns `false` when history is disabled or the
    /// line duplicates the most recent entry.
    pub fn add(&mut self, line: &str) -> bool {
        if self.max_size == 0 {
            return false;
        }
        if self.entries.back().map(String::as_str) == Some(line) {
            return false;
        }
        if self.entries.len() >= self.max_size {
            self.entries.pop_front();
        }
        self.entries.push_back(line.to_owned());
        true
    }

    /// Park the line currently being edited at the tail so history
    /// navigation can return to it.
    pub fn push_transient(&mut self, line: &str) {
        self.entries.push_back(line.to_owned());
    }

    /// Remove the transient tail entry installed by [`push_transient`].
    ///
    /// [`push_transient`]: History::push_transient
    pub fn pop_transient(&mut self) {
        self.entries.pop_back();
    }

    /// Change the retention bound, evicting oldest entries when the new
    /// bound is smaller. A bound of 0 disables history and clears it.
    pub fn set_max_size(&mut self, max_size: usize) {
        self.max_size = max_size;
        while self.entries.len() > max_size {
            self.entries.pop_front();
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_appends_newest_last() {
        let mut history = History::new();
        assert!(history.add("first"));
        assert!(history.add("second"));
        assert_eq!(history.get(0), Some("first"));
        assert_eq!(history.get(1), Some("second"));
    }

    #[test]
    fn adjacent_duplicates_are_suppressed() {
        let mut history = History::new();
        assert!(history.add("ls"));
        assert!(!history.add("ls"));
        assert_eq!(history.len(), 1);

        // A non-adjacent duplicate is allowed.
        assert!(history.add("pwd"));
        assert!(history.add("ls"));
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn oldest_entry_is_evicted_at_capacity() {
        let mut history = History::new();
        history.set_max_size(3);
        for line in ["a", "b", "c", "d"] {
            history.add(line);
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.get(0), Some("b"));
        assert_eq!(history.get(2), Some("d"));
    }

    #[test]
    fn shrinking_max_size_evicts_oldest() {
        let mut history = History::new();
        for line in ["a", "b", "c", "d"] {
            history.add(line);
        }
        history.set_max_size(2);
        assert_eq!(history.len(), 2);
        assert_eq!(history.get(0), Some("c"));
        assert_eq!(history.get(1), Some("d"));
    }

    #[test]
    fn zero_max_size_disables_history() {
        let mut history = History::new();
        history.add("kept?");
        history.set_max_size(0);
        assert!(history.is_empty());
        assert!(!history.add("dropped"));
        assert!(history.is_empty());
    }

    #[test]
    fn transient_entry_round_trip() {
        let mut history = History::new();
        history.add("old");
        history.push_transient("draft");
        assert_eq!(history.get(1), Some("draft"));
        history.pop_transient();
        assert_eq!(history.len(), 1);
        assert_eq!(history.get(0), Some("old"));
    }
}
