//! Abstract editor framework for reversible editing operations.
//!
//! This module provides the foundational traits and types for building
//! an undo/redo-capable editor. It is decoupled from the world data model so
//! that any target type can be edited through it.
//!
//! - [`Editable`]: marker trait for types that can be edited
//! - [`Edit`]: a reversible edit (Command pattern)
//! - [`EditStack`]: undo/redo stack with coalescing and transparent grouping
//! - [`EditQueue`]: thread-safe queue for submitting edits from other threads
//!
//! # Coalescing
//!
//! When the top of the stack is open and reports an incoming edit as
//! coalescable, the stack folds the incoming edit into the top instead of
//! pushing it. A drag that produces hundreds of position edits thus ends up
//! as a single undo step. Closing an edit (explicitly, via [`ApplyFlags`], or
//! implicitly after a revert) ends the chain.
//!
//! # Transparent edits
//!
//! An edit applied with `transparent` set is an automatic consequence of the
//! edit below it (for example the rename that follows placing a new entity).
//! Reverting always peels transparent edits off together with the next
//! non-transparent edit, and reapplying brings them back in the same step.

mod edit;
mod edit_queue;
mod stack;

pub use edit::{AsAny, Edit, EditFlags, Editable};
pub use edit_queue::EditQueue;
pub use stack::{ApplyFlags, DEFAULT_STACK_RESERVE, EditStack, MAX_STACK_RESERVE};
