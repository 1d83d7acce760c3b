//! Small shell-like loop showing history, completion and hints.
//!
//! Run with `cargo run --example repl`. Type `/history`, `/clear` or
//! `/multiline` to poke at the runtime toggles; `quit` exits.

use linedit::{Hint, HintColor, Prompt, StaticCompleter};

fn main() {
    let history_path = std::env::temp_dir().join("linedit_repl_history");

    let mut prompt = Prompt::builder()
        .with_completer(StaticCompleter::new([
            "/history",
            "/clear",
            "/multiline",
            "hello",
            "help",
            "quit",
        ]))
        .with_hinter(|line: &str| {
            if line == "hello" {
                Some(Hint::with_style(" world", HintColor::Green, false))
            } else {
                None
            }
        })
        .build();

    if let Err(err) = prompt.load_history(&history_path) {
        eprintln!("no history loaded: {err}");
    }

    let mut multi_line = false;
    while let Some(line) = prompt.input("linedit> ") {
        match line.as_str() {
            "" => continue,
            "quit" => break,
            "/history" => {
                for (i, entry) in prompt.history().iter().enumerate() {
                    println!("{i:4}  {entry}");
                }
            }
            "/clear" => {
                if let Err(err) = prompt.clear_screen() {
                    eprintln!("clear failed: {err}");
                }
            }
            "/multiline" => {
                multi_line = !multi_line;
                prompt.set_multi_line(multi_line);
                println!("multi-line editing {}", if multi_line { "on" } else { "off" });
            }
            other => println!("echo: {other}"),
        }
        prompt.add_history(&line);
    }

    if prompt.was_interrupted() {
        println!("interrupted");
    }
    if let Err(err) = prompt.save_history(&history_path) {
        eprintln!("could not save history: {err}");
    }
}
