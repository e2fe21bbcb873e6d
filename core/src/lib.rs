//! # World editor core
//!
//! Target-agnostic building blocks of the world editor: reversible edits and
//! the undo/redo stack, a thread-safe edit queue, address-stable storage and
//! math aliases.

pub mod abstract_editor;
pub mod math;
pub mod pinned;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
