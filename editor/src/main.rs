use std::io::BufRead;
use std::path::PathBuf;

use worldedit_editor::{EditorCommand, EditorSession, EditorSettings, SETTINGS_FILE, init_logging};

/// Reads command names from stdin, one per line, and runs them against an
/// empty world. Prints the history after each command.
fn main() {
    if let Err(e) = init_logging() {
        eprintln!("failed to install logger: {e}");
    }

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE));
    let settings = EditorSettings::load_or_default(&path);
    let mut session = EditorSession::new(&settings);

    for line in std::io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::error!("failed to read command: {e}");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let result = line
            .parse::<EditorCommand>()
            .and_then(|command| command.execute(&mut session));
        match result {
            Ok(()) => print!("{}", worldedit_editor::format_history(session.stack())),
            Err(e) => log::warn!("{e}"),
        }
    }
}
