//! # World editor
//!
//! The editing session built on top of `worldedit-world`: one world, its
//! undo/redo history, the hovered and selected targets, and the staged
//! entity used for placement. Everything a user does goes through
//! [`EditorSession`] so it can be undone.

pub mod commands;
pub mod error;
pub mod history;
pub mod session;
pub mod settings;

pub use commands::EditorCommand;
pub use error::{EditorError, EditorResult};
pub use history::{HistoryEntry, HistoryEntryKind, entries, format_history};
pub use session::EditorSession;
pub use settings::{EditorSettings, HistorySettings, SettingsError, WorldSettings};

/// Default settings file, looked up in the working directory.
pub const SETTINGS_FILE: &str = "worldedit.toml";

/// Installs `env_logger`, filtered by `RUST_LOG` (default `info`).
///
/// Fails if a logger is already installed.
pub fn init_logging() -> Result<(), log::SetLoggerError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).try_init()
}
