//! Text view of the undo/redo history.

use worldedit_core::abstract_editor::{EditStack, Editable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryEntryKind {
    /// Would be reapplied by a redo.
    Redo,
    /// Marker between the two sides.
    Current,
    /// Would be reverted by an undo.
    Undo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub kind: HistoryEntryKind,
    pub description: String,
}

/// Lists the stack top to bottom: redo entries with the next to reapply
/// nearest the marker, the current position, then undo entries most recent
/// first.
pub fn entries<T: Editable>(stack: &EditStack<T>) -> Vec<HistoryEntry> {
    let mut redo: Vec<_> = stack
        .reverted_descriptions()
        .map(|description| HistoryEntry {
            kind: HistoryEntryKind::Redo,
            description: description.to_owned(),
        })
        .collect();
    redo.reverse();

    redo.into_iter()
        .chain(std::iter::once(HistoryEntry {
            kind: HistoryEntryKind::Current,
            description: String::new(),
        }))
        .chain(stack.applied_descriptions().map(|description| HistoryEntry {
            kind: HistoryEntryKind::Undo,
            description: description.to_owned(),
        }))
        .collect()
}

pub fn format_history<T: Editable>(stack: &EditStack<T>) -> String {
    let mut out = format!(
        "Undo: {} | Redo: {}\n",
        stack.applied_len(),
        stack.reverted_len()
    );
    for entry in entries(stack) {
        let line = match entry.kind {
            HistoryEntryKind::Redo => format!("REDO {}", entry.description),
            HistoryEntryKind::Current => "> current".to_owned(),
            HistoryEntryKind::Undo => format!("UNDO {}", entry.description),
        };
        out.push_str(&line);
        out.push('\n');
    }
    out
}
