//! History files.
//!
//! One entry per line, loaded through [`History::add`] so the usual
//! duplicate suppression and size bound apply. Saved files are created
//! owner-readable only, since command history tends to contain secrets.

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use linedit_core::history::History;

pub fn load_history(history: &mut History, path: impl AsRef<Path>) -> io::Result<()> {
    let file = File::open(path)?;
    for line in BufReader::new(file).lines() {
        let line = line?;
        // Files written on Windows carry a CR before the newline.
        history.add(line.strip_suffix('\r').unwrap_or(&line));
    }
    Ok(())
}

pub fn save_history(history: &History, path: impl AsRef<Path>) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut writer = BufWriter::new(options.open(path)?);
    for line in history.iter() {
        writeln!(writer, "{line}")?;
    }
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history");

        let mut history = History::new();
        history.add("first");
        history.add("second");
        save_history(&history, &path).unwrap();

        let mut loaded = History::new();
        load_history(&mut loaded, &path).unwrap();
        assert_eq!(loaded.iter().collect::<Vec<_>>(), vec!["first", "second"]);
    }

    #[test]
    fn loading_applies_the_size_bound() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history");

        let mut history = History::new();
        for i in 0..5 {
            history.add(&format!("line {i}"));
        }
        save_history(&history, &path).unwrap();

        let mut loaded = History::new();
        loaded.set_max_size(2);
        load_history(&mut loaded, &path).unwrap();
        assert_eq!(loaded.iter().collect::<Vec<_>>(), vec!["line 3", "line 4"]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut history = History::new();
        assert!(load_history(&mut history, dir.path().join("absent")).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn saved_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history");
        let mut history = History::new();
        history.add("secret");
        save_history(&history, &path).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
