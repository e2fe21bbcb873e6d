//! Undo/redo edit stack.
//!
//! [`EditStack`] manages two LIFO sequences of [`Edit`] trait objects:
//! `applied` (undo side) and `reverted` (redo side). Applying a new edit
//! clears the reverted side. Consecutive compatible edits are folded into a
//! single entry through coalescing, and transparent edits are undone/redone
//! together with the edit below them.

use std::fmt;

use super::edit::{Edit, Editable};

/// Default number of entries reserved up front for each side of the stack.
pub const DEFAULT_STACK_RESERVE: usize = 8192;

/// Upper bound on the entries reserved up front for each side.
pub const MAX_STACK_RESERVE: usize = 65_536;

/// Flags applied to the edit that ends up on top of the stack after
/// [`EditStack::apply`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyFlags {
    /// Bar the entry from absorbing later edits.
    pub closed: bool,
    /// Group the entry with the edit below it for undo/redo.
    pub transparent: bool,
}

impl ApplyFlags {
    pub fn closed() -> Self {
        Self {
            closed: true,
            transparent: false,
        }
    }

    pub fn transparent() -> Self {
        Self {
            closed: false,
            transparent: true,
        }
    }
}

/// Manages the undo/redo stacks of an editor.
///
/// Both sides are plain [`Vec`]s with [`DEFAULT_STACK_RESERVE`] entries
/// reserved up front; the stack itself never drops history.
///
/// # Example
///
/// ```ignore
/// let mut stack = EditStack::new();
/// let mut context = EditContext::new(world);
///
/// stack.apply(Box::new(my_edit), &mut context, ApplyFlags::default());
/// stack.revert(1, &mut context);
/// stack.reapply(1, &mut context);
/// ```
pub struct EditStack<T: Editable> {
    applied: Vec<Box<dyn Edit<T>>>,
    reverted: Vec<Box<dyn Edit<T>>>,
    /// Distance from the saved state.
    ///
    /// - `Some(0)`: the current state matches the last save.
    /// - `Some(n)` where `n > 0`: `n` reverts needed to reach the saved state.
    /// - `Some(n)` where `n < 0`: `|n|` reapplies needed to reach the saved state.
    /// - `None`: never saved, or the save point was discarded together with
    ///   the reverted side or changed by coalescing.
    save_distance: Option<i64>,
}

impl<T: Editable> EditStack<T> {
    /// Creates an empty stack with [`DEFAULT_STACK_RESERVE`] entries reserved.
    pub fn new() -> Self {
        Self::with_reserve(DEFAULT_STACK_RESERVE)
    }

    /// Creates an empty stack reserving `reserve` entries on each side,
    /// clamped to [`MAX_STACK_RESERVE`]. The sides still grow past it.
    pub fn with_reserve(reserve: usize) -> Self {
        let reserve = reserve.min(MAX_STACK_RESERVE);
        Self {
            applied: Vec::with_capacity(reserve),
            reverted: Vec::with_capacity(reserve),
            save_distance: Some(0),
        }
    }

    /// Applies an edit and records it.
    ///
    /// If the top of the applied side is open, the incoming edit is open and
    /// the top reports it as coalescable, the top is reverted, absorbs the
    /// incoming edit and is applied again. Otherwise the incoming edit is
    /// applied and pushed. The reverted side is cleared in both cases, then
    /// `flags` are set on whatever edit is now on top.
    pub fn apply(&mut self, mut edit: Box<dyn Edit<T>>, target: &mut T, flags: ApplyFlags) {
        // The redo branch is about to be discarded, and with it any save
        // point that lived there.
        if let Some(d) = self.save_distance
            && d < 0
        {
            self.save_distance = None;
        }

        if let Some(top) = self.applied.last_mut()
            && !top.is_closed()
            && !edit.is_closed()
            && top.is_coalescable(&*edit)
        {
            log::trace!("coalescing '{}' into top of edit stack", edit.description());
            top.revert(target);
            top.coalesce(&mut *edit);
            top.apply(target);

            if self.save_distance == Some(0) {
                self.save_distance = None;
            }
        } else {
            edit.apply(target);
            self.applied.push(edit);

            if let Some(d) = &mut self.save_distance {
                *d += 1;
            }
        }

        self.reverted.clear();

        if let Some(top) = self.applied.last_mut() {
            if flags.closed {
                top.close();
            }
            if flags.transparent {
                top.mark_transparent();
            }
        }
    }

    /// Reverts up to `count` user-visible steps.
    ///
    /// Each step first peels off every transparent edit on top, then reverts
    /// the next edit. Stops early once the applied side is empty. Afterwards
    /// the new top of the applied side is closed so a later edit can't
    /// coalesce into it.
    pub fn revert(&mut self, count: usize, target: &mut T) {
        for _ in 0..count {
            while let Some(top) = self.applied.last()
                && top.is_transparent()
            {
                self.revert_top(target);
            }

            if self.applied.is_empty() {
                break;
            }

            self.revert_top(target);
        }

        self.close_last();
    }

    /// Reapplies up to `count` user-visible steps.
    ///
    /// Each step reapplies the top of the reverted side, then every
    /// transparent edit directly above it. Stops early once the reverted
    /// side is empty.
    pub fn reapply(&mut self, count: usize, target: &mut T) {
        for _ in 0..count {
            if self.reverted.is_empty() {
                break;
            }

            self.reapply_top(target);

            while let Some(top) = self.reverted.last()
                && top.is_transparent()
            {
                self.reapply_top(target);
            }
        }
    }

    /// Reverts everything on the applied side.
    pub fn revert_all(&mut self, target: &mut T) {
        self.revert(self.applied.len(), target);
    }

    /// Reapplies everything on the reverted side.
    pub fn reapply_all(&mut self, target: &mut T) {
        self.reapply(self.reverted.len(), target);
    }

    /// Closes the top of the applied side, if any.
    pub fn close_last(&mut self) {
        if let Some(top) = self.applied.last_mut() {
            top.close();
        }
    }

    /// Drops both sides, keeping their allocations.
    ///
    /// If the current state was the saved state it remains so. Otherwise
    /// the save point is lost.
    pub fn clear(&mut self) {
        self.applied.clear();
        self.reverted.clear();
        if self.save_distance != Some(0) {
            self.save_distance = None;
        }
    }

    pub fn applied_len(&self) -> usize {
        self.applied.len()
    }

    pub fn reverted_len(&self) -> usize {
        self.reverted.len()
    }

    pub fn applied_is_empty(&self) -> bool {
        self.applied.is_empty()
    }

    pub fn reverted_is_empty(&self) -> bool {
        self.reverted.is_empty()
    }

    /// The edit on top of the applied side.
    pub fn applied_top(&self) -> Option<&dyn Edit<T>> {
        self.applied.last().map(|edit| &**edit)
    }

    /// Descriptions of the applied side, most recent first.
    pub fn applied_descriptions(&self) -> impl Iterator<Item = &str> {
        self.applied.iter().rev().map(|e| e.description())
    }

    /// Descriptions of the reverted side, next to reapply first.
    pub fn reverted_descriptions(&self) -> impl Iterator<Item = &str> {
        self.reverted.iter().rev().map(|e| e.description())
    }

    /// Records the current state as the saved state.
    pub fn mark_saved(&mut self) {
        self.save_distance = Some(0);
    }

    /// Returns `true` if the current state differs from the last saved state,
    /// or if [`mark_saved`](Self::mark_saved) was never called.
    pub fn has_unsaved_changes(&self) -> bool {
        self.save_distance != Some(0)
    }

    fn revert_top(&mut self, target: &mut T) {
        if let Some(mut edit) = self.applied.pop() {
            log::trace!("revert '{}'", edit.description());
            edit.revert(target);
            self.reverted.push(edit);
            if let Some(d) = &mut self.save_distance {
                *d -= 1;
            }
        }
    }

    fn reapply_top(&mut self, target: &mut T) {
        if let Some(mut edit) = self.reverted.pop() {
            log::trace!("reapply '{}'", edit.description());
            edit.apply(target);
            self.applied.push(edit);
            if let Some(d) = &mut self.save_distance {
                *d += 1;
            }
        }
    }
}

impl<T: Editable> Default for EditStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Editable> fmt::Debug for EditStack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditStack")
            .field("applied", &self.applied.len())
            .field("reverted", &self.reverted.len())
            .field("save_distance", &self.save_distance)
            .finish()
    }
}
