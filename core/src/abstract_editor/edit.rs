//! Edit targets and reversible edits.
//!
//! This module defines the core abstractions for an undo/redo editor system:
//!
//! - [`Editable`]: marker trait for types that can be edited
//! - [`Edit`]: a reversible edit (Command pattern)
//! - [`EditFlags`]: the `closed` / `transparent` state every edit carries
//!
//! Edits are self-contained: each implementation internally stores whatever
//! data it needs (target identifiers, old/new values, removed entities, etc.).
//! None of the operations can fail. A precondition violation (an edit run
//! against a target that no longer holds what it captured) is a programming
//! error and panics.

use std::any::Any;
use std::fmt;

/// Helper trait for downcasting trait objects to concrete types.
///
/// Automatically implemented for all `'static` types. Used by
/// [`Edit::is_coalescable`] and [`Edit::coalesce`] to downcast
/// `&dyn Edit<T>` to the concrete edit type.
pub trait AsAny: 'static {
    /// Returns a reference to `self` as `&dyn Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Returns a mutable reference to `self` as `&mut dyn Any` for downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: 'static> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Marker trait for types that serve as edit targets.
///
/// Implement this on any type that edits operate on, such as a world edit
/// context or a plain counter in a test.
pub trait Editable: 'static {}

/// Stateful flags carried by every edit.
///
/// - `closed`: the edit never absorbs a following edit through coalescing.
/// - `transparent`: the edit is an automatic consequence of the edit below it
///   and is undone/redone together with it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditFlags {
    closed: bool,
    transparent: bool,
}

impl EditFlags {
    /// Flags for an edit that starts out closed.
    pub fn closed() -> Self {
        Self {
            closed: true,
            transparent: false,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn is_transparent(&self) -> bool {
        self.transparent
    }

    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn mark_transparent(&mut self) {
        self.transparent = true;
    }
}

/// A reversible edit (Command pattern).
///
/// Edits encapsulate a single logical mutation and capture enough state to
/// revert the change and apply it again. `apply` followed by `revert` must
/// leave every field the edit owns exactly as it was.
///
/// # Coalescing
///
/// Edits produced by continuous interaction (each mouse move during a drag,
/// each keystroke in a text field) report themselves as coalescable with an
/// edit of the same concrete type targeting the same entity and field. The
/// [`EditStack`](super::EditStack) then folds the new edit into the one on
/// top of the stack: the top keeps its original "old" value and takes the
/// incoming "new" value. Use [`AsAny::as_any`] on `other` to downcast it.
///
/// # Object Safety
///
/// This trait is dyn-compatible so that different edit types can be stored
/// in a single stack as `Box<dyn Edit<T>>`.
///
/// # Example
///
/// ```ignore
/// #[derive(Debug)]
/// struct SetHeight {
///     old: f32,
///     new: f32,
///     flags: EditFlags,
/// }
///
/// impl Edit<Terrain> for SetHeight {
///     fn apply(&mut self, target: &mut Terrain) {
///         target.height = self.new;
///     }
///
///     fn revert(&mut self, target: &mut Terrain) {
///         target.height = self.old;
///     }
///
///     fn is_coalescable(&self, other: &dyn Edit<Terrain>) -> bool {
///         other.as_any().is::<SetHeight>()
///     }
///
///     fn coalesce(&mut self, other: &mut dyn Edit<Terrain>) {
///         if let Some(other) = other.as_any_mut().downcast_mut::<SetHeight>() {
///             self.new = other.new;
///         }
///     }
///
///     fn description(&self) -> &str {
///         "Set height"
///     }
///
///     fn flags(&self) -> &EditFlags {
///         &self.flags
///     }
///
///     fn flags_mut(&mut self) -> &mut EditFlags {
///         &mut self.flags
///     }
/// }
/// ```
pub trait Edit<T: Editable>: fmt::Debug + AsAny + Send {
    /// Moves the target to the edit's "new" state (forward / redo direction).
    fn apply(&mut self, target: &mut T);

    /// Restores the target to the edit's "old" state (undo direction).
    fn revert(&mut self, target: &mut T);

    /// Whether `other` can be folded into `self`.
    ///
    /// Only true for the same concrete edit type targeting the same entity
    /// and field. Returns `false` by default.
    fn is_coalescable(&self, other: &dyn Edit<T>) -> bool {
        let _ = other;
        false
    }

    /// Absorbs `other`'s "new" value. `self`'s "old" value is untouched.
    ///
    /// Only called after [`is_coalescable`](Self::is_coalescable) returned
    /// `true`. `other` is discarded afterwards and may be left in any state.
    fn coalesce(&mut self, other: &mut dyn Edit<T>) {
        let _ = other;
    }

    /// A short, human-readable description for history listings.
    ///
    /// Examples: `"position"`, `"Insert object"`, `"Delete sector"`.
    fn description(&self) -> &str;

    /// The edit's closed/transparent state.
    fn flags(&self) -> &EditFlags;

    /// Mutable access to the edit's closed/transparent state.
    fn flags_mut(&mut self) -> &mut EditFlags;

    /// Bars the edit from absorbing any further edit.
    fn close(&mut self) {
        self.flags_mut().close();
    }

    fn is_closed(&self) -> bool {
        self.flags().is_closed()
    }

    /// Marks the edit as an automatic side effect of the edit below it.
    fn mark_transparent(&mut self) {
        self.flags_mut().mark_transparent();
    }

    fn is_transparent(&self) -> bool {
        self.flags().is_transparent()
    }
}
