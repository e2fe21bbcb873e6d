//! Named editor commands, as bound to menu entries and shortcuts.

use std::fmt;
use std::str::FromStr;

use crate::error::{EditorError, EditorResult};
use crate::session::EditorSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorCommand {
    Undo,
    Redo,
    DeleteSelection,
    ClearSelection,
    CancelCreation,
}

impl EditorCommand {
    pub const ALL: [EditorCommand; 5] = [
        EditorCommand::Undo,
        EditorCommand::Redo,
        EditorCommand::DeleteSelection,
        EditorCommand::ClearSelection,
        EditorCommand::CancelCreation,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EditorCommand::Undo => "edit.undo",
            EditorCommand::Redo => "edit.redo",
            EditorCommand::DeleteSelection => "edit.delete",
            EditorCommand::ClearSelection => "selection.clear",
            EditorCommand::CancelCreation => "creation.cancel",
        }
    }

    /// Runs the command against `session`. Commands with nothing to act on
    /// are no-ops.
    pub fn execute(self, session: &mut EditorSession) -> EditorResult {
        match self {
            EditorCommand::Undo => {
                if session.can_undo() {
                    session.undo();
                }
            }
            EditorCommand::Redo => {
                if session.can_redo() {
                    session.redo();
                }
            }
            EditorCommand::DeleteSelection => {
                session.delete_selected();
            }
            EditorCommand::ClearSelection => session.selection_mut().clear(),
            EditorCommand::CancelCreation => match session.cancel_creation() {
                Ok(()) | Err(EditorError::NothingStaged) => {}
                Err(e) => return Err(e),
            },
        }
        Ok(())
    }
}

impl fmt::Display for EditorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EditorCommand {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|command| command.name() == name)
            .ok_or_else(|| EditorError::UnknownCommand(name.to_owned()))
    }
}
